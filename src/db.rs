use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::MigrationError;

/// Connected handle to the document store: the database migration steps
/// run against, plus the underlying client for callers that manage
/// store-level transactions themselves.
#[derive(Clone)]
pub struct Store {
    pub client: Client,
    pub db: Database,
}

impl Store {
    /// Connect and ping before handing the handle out, so an unreachable
    /// store fails here as `StoreUnavailable` instead of inside a step.
    pub async fn connect(config: &StoreConfig) -> Result<Self, MigrationError> {
        let client = Client::with_uri_str(&config.url)
            .await
            .map_err(|source| MigrationError::StoreUnavailable { source })?;
        let db = client.database(&config.db_name);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MigrationError::StoreUnavailable { source })?;

        debug!(db = %db.name(), "store connection established");
        Ok(Self { client, db })
    }
}
