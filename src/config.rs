#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub email_host: String,
    pub email_port: u16,
    pub email_user: Option<String>,
    pub email_pass: Option<String>,
    pub notify_fail_open: bool,
    pub spreadsheet_id: Option<String>,
    pub sheets_range: String,
    pub sheets_timeout_ms: u64,
    pub google_client_email: Option<String>,
    pub google_private_key: Option<String>,
    pub google_credentials_file: Option<String>,
    pub success_page: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| format!("0.0.0.0:{port}")),
            email_host: std::env::var("EMAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            email_port: std::env::var("EMAIL_PORT")
                .ok()
                .and_then(|s| s.parse::<u16>().ok())
                .unwrap_or(587),
            email_user: non_empty("EMAIL_USER"),
            email_pass: non_empty("EMAIL_PASS"),
            notify_fail_open: std::env::var("NOTIFY_FAIL_OPEN")
                .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
                .unwrap_or(false),
            spreadsheet_id: non_empty("SPREADSHEET_ID"),
            sheets_range: std::env::var("SHEETS_RANGE").unwrap_or_else(|_| "Sheet1!A:C".to_string()),
            sheets_timeout_ms: std::env::var("SHEETS_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(10_000),
            google_client_email: non_empty("GOOGLE_CLIENT_EMAIL"),
            google_private_key: non_empty("GOOGLE_PRIVATE_KEY"),
            google_credentials_file: non_empty("GOOGLE_APPLICATION_CREDENTIALS"),
            success_page: std::env::var("SUCCESS_PAGE").unwrap_or_else(|_| "/success.html".to_string()),
        }
    }

    /// SMTP user and password, when both are set.
    pub fn email_credentials(&self) -> Option<(&str, &str)> {
        match (&self.email_user, &self.email_pass) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
