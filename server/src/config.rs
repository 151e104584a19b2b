//! Fixed service configuration.
//!
//! Everything here is a constant by design — the connection string is the
//! single environment-driven value the service accepts.

use std::time::Duration;

/// Address the HTTP listener binds to.
pub const BIND_ADDR: &str = "0.0.0.0:9010";

/// Database holding the todo collection.
pub const DB_NAME: &str = "demo_todo";

/// The single collection every operation addresses.
pub const COLLECTION_NAME: &str = "todo";

/// Environment variable naming the MongoDB deployment.
pub const MONGO_URI_VAR: &str = "MONGO_URI";

/// Fallback connection string for local development.
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";

/// Upper bound on a single request before the middleware cuts it off.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// How long in-flight requests get to drain after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Resolves the MongoDB connection string from the environment.
pub fn mongo_uri() -> String {
    std::env::var(MONGO_URI_VAR).unwrap_or_else(|_| DEFAULT_MONGO_URI.to_string())
}
