use config::Config;
use serde::Deserialize;

use crate::core::error::ConfigError;

const CONFIG_FILE: &str = "shop";
const ENV_PREFIX: &str = "SHOP";

#[derive(Debug, Deserialize, Clone)]
pub struct Args {
    pub secret: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub https_redirect: bool,
    #[serde(default = "default_password_hash_cost")]
    pub password_hash_cost: u32,
    #[serde(default)]
    pub admin_username: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".into()
}

fn default_password_hash_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Args {
    /// Reads `shop.toml` (if present) and then `SHOP_*` environment variables,
    /// the latter taking precedence.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?;

        Ok(config.try_deserialize::<Args>()?)
    }

    pub(crate) fn admin(&self) -> Result<Option<(&str, &str)>, ConfigError> {
        match (&self.admin_username, &self.admin_password) {
            (Some(username), Some(password)) => Ok(Some((username, password))),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidAdmin(
                "admin_username and admin_password must be set together".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> Args {
        Args {
            secret: "secret".into(),
            port: default_port(),
            log_level: default_log_level(),
            https_redirect: false,
            password_hash_cost: 4,
            admin_username: None,
            admin_password: None,
        }
    }

    #[test]
    fn admin_requires_both_fields() {
        let mut args = args();
        assert!(matches!(args.admin(), Ok(None)));

        args.admin_username = Some("boss".into());
        assert!(matches!(args.admin(), Err(ConfigError::InvalidAdmin(_))));

        args.admin_password = Some("password123".into());
        assert!(matches!(args.admin(), Ok(Some(("boss", "password123")))));
    }
}
