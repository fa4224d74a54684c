use crate::domain::payment::PaymentRecord;
use crate::sheets::credentials::GoogleCredentials;
use crate::sheets::{sheet_row, SheetSync};
use anyhow::{anyhow, bail, Context, Result};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com";

const TOKEN_LIFETIME_SECS: i64 = 3600;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    TOKEN_LIFETIME_SECS as u64
}

#[derive(Clone)]
pub struct GoogleSheetsClient {
    pub base_url: String,
    pub spreadsheet_id: String,
    pub range: String,
    pub timeout_ms: u64,
    pub credentials: GoogleCredentials,
    pub client: reqwest::Client,
    token: Arc<RwLock<Option<(Instant, String)>>>,
}

impl GoogleSheetsClient {
    pub fn new(
        spreadsheet_id: String,
        range: String,
        timeout_ms: u64,
        credentials: GoogleCredentials,
    ) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            spreadsheet_id,
            range,
            timeout_ms,
            credentials,
            client: reqwest::Client::new(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    fn signed_assertion(&self) -> Result<String> {
        let iat = chrono::Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: &self.credentials.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.credentials.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())
            .context("service account private key is not a valid RSA PEM")?;
        Ok(jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)?)
    }

    /// Cached bearer token, refreshed shortly before it expires.
    async fn access_token(&self) -> Result<String> {
        {
            let read = self.token.read().await;
            if let Some((expires_at, token)) = &*read {
                if Instant::now() + TOKEN_REFRESH_MARGIN < *expires_at {
                    return Ok(token.clone());
                }
            }
        }

        let assertion = self.signed_assertion()?;
        let resp = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "token exchange failed: HTTP {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            );
        }

        let token: TokenResponse = resp.json().await?;
        debug!(expires_in = token.expires_in, "obtained sheets access token");
        let mut write = self.token.write().await;
        *write = Some((
            Instant::now() + Duration::from_secs(token.expires_in),
            token.access_token.clone(),
        ));
        Ok(token.access_token)
    }

    pub fn append_url(&self) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.base_url)?;
        let range = format!("{}:append", self.range);
        url.path_segments_mut()
            .map_err(|_| anyhow!("sheets base url cannot carry a path"))?
            .pop_if_empty()
            .extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                range.as_str(),
            ]);
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED");
        Ok(url)
    }
}

#[async_trait::async_trait]
impl SheetSync for GoogleSheetsClient {
    fn name(&self) -> &'static str {
        "google_sheets"
    }

    async fn append_row(&self, record: &PaymentRecord) -> Result<()> {
        let token = self.access_token().await?;
        let resp = self
            .client
            .post(self.append_url()?)
            .bearer_auth(token)
            .json(&json!({ "values": [sheet_row(record)] }))
            .timeout(Duration::from_millis(self.timeout_ms))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!(
                "sheets append failed: HTTP {}: {}",
                status.as_u16(),
                body.chars().take(200).collect::<String>()
            );
        }

        info!(payment_id = %record.id, spreadsheet_id = %self.spreadsheet_id, "row appended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GoogleSheetsClient {
        GoogleSheetsClient::new(
            "sheet-123".to_string(),
            "Sheet1!A:C".to_string(),
            10_000,
            GoogleCredentials::from_inline("sync@example.iam.gserviceaccount.com", "not-a-key"),
        )
    }

    #[test]
    fn append_url_targets_range() {
        let url = client().append_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/Sheet1!A:C:append?valueInputOption=USER_ENTERED"
        );
    }

    #[test]
    fn invalid_private_key_fails_signing() {
        assert!(client().signed_assertion().is_err());
    }
}
