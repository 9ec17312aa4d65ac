use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use contact_relay::{Config, ContactService, FormatSettings, SmtpMailSender, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {CONFIG_PATH}: {e}");
            eprintln!("Using default configuration with environment overrides.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = contact_relay::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        contact_relay::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    let sender = match SmtpMailSender::new(&config.smtp) {
        Ok(sender) => sender,
        Err(e) => {
            error!("Failed to set up SMTP relay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match sender.verify().await {
        Ok(true) => info!("SMTP relay {}:{} reachable", config.smtp.host, config.smtp.port),
        Ok(false) => warn!("SMTP relay {} did not accept a test connection", config.smtp.host),
        Err(e) => warn!("SMTP relay check failed: {}", e),
    }

    let contact = ContactService::new(
        Arc::new(sender),
        config.contact.admin_email.clone(),
        FormatSettings::from(&config.contact),
    );

    let server = match WebServer::new(&config.web, contact) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Contact relay starting on {}", server.addr());

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
