//! Once-initialized access to the shared [`DocumentClient`]
//!
//! A [`ClientProvider`] is built by the composition root and handed to
//! whoever needs database access. The first [`ClientProvider::acquire`] loads
//! configuration and connects; concurrent first callers wait on the same
//! initialization, so at most one connection attempt is in flight. A failed
//! attempt retains nothing and the next call starts over.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tms_common::Result;
use tracing::{error, info};

use crate::client::DocumentClient;
use crate::config::ClientConfig;
use crate::connection::{ConnectOptions, Connection};
use crate::store::DocumentStore;

/// Opens a connection to the backing store
pub trait Connector: Send + Sync {
    /// Connect and verify liveness
    fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn DocumentStore>>;
}

impl<C: Connector + ?Sized> Connector for Arc<C> {
    fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn DocumentStore>> {
        (**self).connect(config)
    }
}

/// Connects to a MongoDB server
#[derive(Debug, Clone, Default)]
pub struct MongoConnector {
    options: ConnectOptions,
}

impl MongoConnector {
    pub fn new(options: ConnectOptions) -> Self {
        Self { options }
    }
}

impl Connector for MongoConnector {
    fn connect(&self, config: &ClientConfig) -> Result<Arc<dyn DocumentStore>> {
        let connection = Connection::open_with(config, &self.options)?;
        Ok(Arc::new(connection))
    }
}

type ConfigLoader = Box<dyn Fn() -> Result<ClientConfig> + Send + Sync>;

/// Owns the process's one [`DocumentClient`]
pub struct ClientProvider {
    loader: ConfigLoader,
    connector: Box<dyn Connector>,
    client: OnceCell<Arc<DocumentClient>>,
}

impl ClientProvider {
    /// Provider with a custom configuration source and connector
    pub fn new<L, C>(loader: L, connector: C) -> Self
    where
        L: Fn() -> Result<ClientConfig> + Send + Sync + 'static,
        C: Connector + 'static,
    {
        Self {
            loader: Box::new(loader),
            connector: Box::new(connector),
            client: OnceCell::new(),
        }
    }

    /// Provider reading the environment and connecting to MongoDB
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env, MongoConnector::default())
    }

    /// Provider with a fixed configuration
    pub fn with_config<C>(config: ClientConfig, connector: C) -> Self
    where
        C: Connector + 'static,
    {
        Self::new(move || Ok(config.clone()), connector)
    }

    /// Return the shared client, connecting on first use.
    ///
    /// # Errors
    /// `Configuration` if a setting is missing or invalid, `Connection` if the
    /// server cannot be reached. Neither leaves a client behind.
    pub fn acquire(&self) -> Result<Arc<DocumentClient>> {
        self.client
            .get_or_try_init(|| self.initialize())
            .map(Arc::clone)
    }

    fn initialize(&self) -> Result<Arc<DocumentClient>> {
        let config = (self.loader)()
            .inspect_err(|e| error!("Environment configuration error: {}", e))?;

        let store = self
            .connector
            .connect(&config)
            .inspect_err(|e| error!("Error during MongoDB connection: {}", e))?;

        info!(
            "Document client initialized for database '{}'",
            config.database_name
        );
        Ok(Arc::new(DocumentClient::new(config.database_name, store)))
    }

    /// True once a client has been created and retained
    pub fn is_initialized(&self) -> bool {
        self.client.get().is_some()
    }

    /// The retained client, without connecting
    pub fn get(&self) -> Option<Arc<DocumentClient>> {
        self.client.get().cloned()
    }

    /// Close the retained client's connection, if any. The client stays
    /// retained; see [`DocumentClient::release`].
    pub fn release(&self) {
        if let Some(client) = self.client.get() {
            client.release();
        }
    }
}
