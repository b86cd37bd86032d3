use crate::controllers::user::UserController;
use crate::core::config::Args;
use crate::core::error::ConfigError;
use crate::token::{Secret, TokenIssuer, TokenVerifier};
use crate::types::MANAGER;

#[derive(Clone, Debug)]
pub struct AppState {
    pub(crate) verifier: TokenVerifier,
    pub(crate) user_controller: UserController,
    pub(crate) https_redirect: bool,
}

impl AppState {
    /// Builds the issuer and verifier from the one shared secret, then seeds
    /// the bootstrap manager account if one is configured.
    pub async fn new(config: &Args) -> Result<Self, ConfigError> {
        let secret = Secret::new(&config.secret)?;

        let state = AppState {
            verifier: TokenVerifier::new(&secret),
            user_controller: UserController::new(
                TokenIssuer::new(&secret),
                config.password_hash_cost,
            )?,
            https_redirect: config.https_redirect,
        };

        if let Some((username, password)) = config.admin()? {
            state
                .user_controller
                .register(username, password, MANAGER)
                .await
                .map_err(|e| ConfigError::InvalidAdmin(e.to_string()))?;

            tracing::info!(username, "seeded bootstrap manager");
        }

        Ok(state)
    }
}
