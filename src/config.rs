//! Provider configuration, supplied by the embedding caller.

use std::fmt;

use serde::Deserialize;
use zeroize::Zeroizing;

/// Connection settings for the control server.
///
/// Immutable for the provider's lifetime. The embedding application owns the
/// config store; this crate only consumes the deserialized values.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Control server address. A bare host connects on
    /// [`CONTROL_PORT`](crate::CONTROL_PORT); an explicit `host:port` is
    /// honored as written.
    pub host: String,
    /// Account name for the `LOGIN` handshake.
    pub username: String,
    /// Account password for the `LOGIN` handshake.
    pub password: Password,
}

impl ProviderConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<Password>,
    ) -> Self {
        ProviderConfig {
            host: host.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Control server password.
///
/// The backing string is wiped from memory on drop, and `Debug` output is
/// redacted so the password cannot leak through logging.
#[derive(Clone)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Password(Zeroizing::new(password.into()))
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Password::new(value)
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Password::new(value)
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Password::new)
    }
}
