//! MongoDB connection handle with liveness checking

use std::time::Duration;

use bson::doc;
use mongodb::sync::{Client, Collection, Database};
use tms_common::{Result, TmsError};
use tracing::{debug, info};

use crate::config::ClientConfig;

/// Driver options appended to the connection string
#[derive(Debug, Clone)]
pub struct ConnectOptions {
    /// Connection timeout (default: 10s)
    pub connect_timeout: Option<Duration>,
    /// Server selection timeout (default: 30s)
    pub server_selection_timeout: Option<Duration>,
    /// Application name for server logs
    pub app_name: Option<String>,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Some(Duration::from_secs(10)),
            server_selection_timeout: Some(Duration::from_secs(30)),
            app_name: Some("tms".to_string()),
        }
    }
}

impl ConnectOptions {
    /// Append these options as URI query parameters to `base`
    pub fn apply_to(&self, base: &str) -> String {
        let mut params = Vec::new();
        if let Some(connect) = self.connect_timeout {
            params.push(format!("connectTimeoutMS={}", connect.as_millis()));
        }
        if let Some(selection) = self.server_selection_timeout {
            params.push(format!("serverSelectionTimeoutMS={}", selection.as_millis()));
        }
        if let Some(ref app) = self.app_name {
            params.push(format!("appName={}", urlencoding::encode(app)));
        }

        if params.is_empty() {
            base.to_string()
        } else {
            format!("{}?{}", base, params.join("&"))
        }
    }
}

/// Live connection to one MongoDB database
///
/// The database handle keeps the driver's client alive; dropping the
/// connection closes its pool.
pub struct Connection {
    database: Database,
}

impl Connection {
    /// Connect with custom options and verify the server answers a ping
    pub fn open_with(config: &ClientConfig, options: &ConnectOptions) -> Result<Self> {
        let uri = options.apply_to(&config.connection_string());
        debug!(
            "Connecting to MongoDB at {}:{} as '{}'",
            config.host, config.port, config.username
        );

        let client = Client::with_uri_str(&uri).map_err(|e| {
            TmsError::Connection(format!("Failed to create MongoDB client: {}", e))
        })?;
        let connection = Self {
            database: client.database(&config.database_name),
        };
        connection.check_alive()?;

        info!(
            "Connected to MongoDB at {}:{} (database '{}')",
            config.host, config.port, config.database_name
        );
        Ok(connection)
    }

    /// Get a reference to the database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get a collection by name (untyped documents)
    pub fn collection(&self, name: &str) -> Collection<bson::Document> {
        self.database.collection(name)
    }

    /// Ping the server; any failure is a connection error
    pub fn check_alive(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .run()
            .map(|_| ())
            .map_err(|e| TmsError::Connection(format!("Ping failed: {}", e)))
    }
}
