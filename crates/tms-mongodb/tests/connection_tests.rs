//! Tests for the MongoDB-backed store that need no running server

use std::sync::Arc;
use std::time::{Duration, Instant};

use tms_mongodb::{
    ClientConfig, ClientProvider, ConnectOptions, Connection, Connector, DocumentStore,
    MongoConnector,
};

/// Helper: a configuration pointing at a port nothing listens on
fn unreachable_config() -> ClientConfig {
    ClientConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        username: "tms".to_string(),
        password: "p@ss:word".to_string(),
        database_name: "tms".to_string(),
    }
}

fn fast_failing_options() -> ConnectOptions {
    ConnectOptions {
        connect_timeout: Some(Duration::from_millis(200)),
        server_selection_timeout: Some(Duration::from_millis(300)),
        ..Default::default()
    }
}

fn assert_store<T: DocumentStore + 'static>() {}

#[test]
fn test_connection_implements_document_store() {
    assert_store::<Connection>();

    // The live store must also fit behind the shared seam
    let _coerce: fn(Connection) -> Arc<dyn DocumentStore> = |c| Arc::new(c);
}

#[test]
fn test_open_unreachable_server_is_connection_error() {
    let started = Instant::now();
    let result = Connection::open_with(&unreachable_config(), &fast_failing_options());

    let err = match result {
        Ok(_) => panic!("nothing listens on port 1"),
        Err(e) => e,
    };
    assert!(err.is_connection_error(), "got {:?}", err);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn test_mongo_connector_failure_is_discarded() {
    let connector = MongoConnector::new(fast_failing_options());
    assert!(connector
        .connect(&unreachable_config())
        .err()
        .is_some_and(|e| e.is_connection_error()));

    let provider = ClientProvider::with_config(
        unreachable_config(),
        MongoConnector::new(fast_failing_options()),
    );
    assert!(provider.acquire().unwrap_err().is_connection_error());
    assert!(!provider.is_initialized());
}
