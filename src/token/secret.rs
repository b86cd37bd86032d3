use std::fmt;
use std::sync::Arc;

use crate::core::error::ConfigError;

/// The shared HMAC key used to both sign and verify credentials.
#[derive(Clone)]
pub struct Secret(Arc<[u8]>);

impl Secret {
    pub fn new(secret: impl AsRef<str>) -> Result<Self, ConfigError> {
        let secret = secret.as_ref();

        if secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }

        Ok(Self(Arc::from(secret.as_bytes())))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}
