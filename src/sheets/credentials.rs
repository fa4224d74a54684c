use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_KEY_FILE: &str = "credentials.json";

#[derive(Debug, Error)]
pub enum CredentialsError {
    #[error("reading key file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing key file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("GOOGLE_PRIVATE_KEY is set but GOOGLE_CLIENT_EMAIL is missing")]
    MissingClientEmail,
}

/// Service-account identity used to sign token requests. Loaded either from
/// environment values or from a downloaded key file.
#[derive(Clone, Deserialize)]
pub struct GoogleCredentials {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl std::fmt::Debug for GoogleCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleCredentials")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl GoogleCredentials {
    /// Env-provided keys usually carry literal `\n` sequences.
    pub fn from_inline(client_email: &str, private_key: &str) -> Self {
        Self {
            client_email: client_email.to_string(),
            private_key: private_key.replace("\\n", "\n"),
            token_uri: default_token_uri(),
        }
    }

    pub fn from_key_file(path: &Path) -> Result<Self, CredentialsError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CredentialsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| CredentialsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Inline values win over a key file. An explicitly named key file must
    /// exist; the default `credentials.json` is only used when present.
    pub fn resolve(
        client_email: Option<&str>,
        private_key: Option<&str>,
        key_file: Option<&str>,
    ) -> Result<Option<Self>, CredentialsError> {
        match (client_email, private_key) {
            (Some(email), Some(key)) => return Ok(Some(Self::from_inline(email, key))),
            (None, Some(_)) => return Err(CredentialsError::MissingClientEmail),
            _ => {}
        }

        match key_file {
            Some(path) => Self::from_key_file(Path::new(path)).map(Some),
            None if Path::new(DEFAULT_KEY_FILE).exists() => {
                Self::from_key_file(Path::new(DEFAULT_KEY_FILE)).map(Some)
            }
            None => Ok(None),
        }
    }
}
