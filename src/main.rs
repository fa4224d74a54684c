use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tuition_payments::config::AppConfig;
use tuition_payments::notify::mock::LogMailer;
use tuition_payments::notify::smtp::SmtpMailer;
use tuition_payments::notify::{Mailer, NotificationDispatcher};
use tuition_payments::repo::payments_repo::PaymentsRepo;
use tuition_payments::service::payment_service::PaymentService;
use tuition_payments::sheets::credentials::GoogleCredentials;
use tuition_payments::sheets::google::GoogleSheetsClient;
use tuition_payments::sheets::{DisabledSheetSync, SheetSync};
use tuition_payments::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let mailer: Arc<dyn Mailer> = match cfg.email_credentials() {
        Some((user, pass)) => match SmtpMailer::new(&cfg.email_host, cfg.email_port, user, pass) {
            Ok(m) => Arc::new(m),
            Err(e) => {
                tracing::warn!(error = %e, "smtp setup failed, running in mock mode");
                Arc::new(LogMailer)
            }
        },
        None => {
            tracing::warn!("email configuration not found, running in mock mode");
            Arc::new(LogMailer)
        }
    };

    let sheet_sync: Arc<dyn SheetSync> = match &cfg.spreadsheet_id {
        Some(spreadsheet_id) => {
            let credentials = GoogleCredentials::resolve(
                cfg.google_client_email.as_deref(),
                cfg.google_private_key.as_deref(),
                cfg.google_credentials_file.as_deref(),
            )?;
            match credentials {
                Some(credentials) => Arc::new(GoogleSheetsClient::new(
                    spreadsheet_id.clone(),
                    cfg.sheets_range.clone(),
                    cfg.sheets_timeout_ms,
                    credentials,
                )),
                None => {
                    tracing::warn!("SPREADSHEET_ID set but no service account credentials found");
                    Arc::new(DisabledSheetSync)
                }
            }
        }
        None => Arc::new(DisabledSheetSync),
    };

    let payments_repo = PaymentsRepo::new();
    let payment_service = PaymentService {
        payments_repo: payments_repo.clone(),
        notifier: NotificationDispatcher::new(mailer.clone()),
        sheet_sync: sheet_sync.clone(),
        notify_fail_open: cfg.notify_fail_open,
        success_page: cfg.success_page.clone(),
    };

    let app = tuition_payments::http::routes::router(AppState { payment_service });

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    tracing::info!(
        mailer = mailer.name(),
        sheets = sheet_sync.name(),
        fail_open = cfg.notify_fail_open,
        "integrations ready"
    );
    tracing::info!("payments storage: in-memory ({} records)", payments_repo.len().await);
    axum::serve(listener, app).await?;
    Ok(())
}
