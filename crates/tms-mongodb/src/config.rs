//! Connection configuration loaded from the environment
//!
//! # Example
//! ```rust,ignore
//! use tms_mongodb::ClientConfig;
//!
//! // From HOST, PORT, USERNAME, PASSWORD, DATABASE_NAME
//! let config = ClientConfig::from_env()?;
//! println!("{}", config.connection_string());
//! ```

use std::fmt;

use tms_common::{Result, TmsError};

pub const HOST_VAR: &str = "HOST";
pub const PORT_VAR: &str = "PORT";
pub const USERNAME_VAR: &str = "USERNAME";
pub const PASSWORD_VAR: &str = "PASSWORD";
pub const DATABASE_NAME_VAR: &str = "DATABASE_NAME";

/// Parameters needed to reach the backing document store
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database_name: String,
}

impl ClientConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Every variable is required; empty values count as missing. All missing
    /// variables are reported together.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = read(HOST_VAR);
        let port = read(PORT_VAR);
        let username = read(USERNAME_VAR);
        let password = read(PASSWORD_VAR);
        let database_name = read(DATABASE_NAME_VAR);

        let port = match port {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                TmsError::Configuration(format!(
                    "Invalid {} value: '{}'. Must be a valid port number.",
                    PORT_VAR, raw
                ))
            })?),
            None => None,
        };

        match (host, port, username, password, database_name) {
            (Some(host), Some(port), Some(username), Some(password), Some(database_name)) => {
                Ok(Self {
                    host,
                    port,
                    username,
                    password,
                    database_name,
                })
            }
            (host, port, username, password, database_name) => {
                let missing: Vec<&str> = [
                    (HOST_VAR, host.is_none()),
                    (PORT_VAR, port.is_none()),
                    (USERNAME_VAR, username.is_none()),
                    (PASSWORD_VAR, password.is_none()),
                    (DATABASE_NAME_VAR, database_name.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                Err(TmsError::Configuration(format!(
                    "Missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// MongoDB connection string with percent-encoded credentials.
    ///
    /// The database is not part of the URI; it is selected by name after
    /// connecting.
    pub fn connection_string(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}/",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            self.host,
            self.port
        )
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("database_name", &self.database_name)
            .finish()
    }
}
