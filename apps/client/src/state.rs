use crossterm::tty::IsTty;

use crate::api_client::ApiClient;
use crate::config::Config;
use crate::errors::AppError;

/// Shared application state handed to every command handler.
#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Config,
    /// Whether stdout gets ANSI styling.
    pub color: bool,
}

impl AppState {
    pub fn new(config: Config, no_color: bool) -> Result<Self, AppError> {
        let api = ApiClient::new(
            &config.api_url,
            config.access_token.clone(),
            config.request_timeout,
        )?;
        Ok(Self {
            api,
            config,
            color: !no_color && std::io::stdout().is_tty(),
        })
    }
}
