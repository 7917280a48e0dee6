use async_trait::async_trait;
use mongodb::{Client, Database};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::MigrationError;
use crate::schema::{CollectionSchema, FieldSpec, FieldType};
use crate::step::MigrationStep;

pub const USERS: &str = "users";

/// Validated shape of the `users` collection. All four fields are
/// mandatory on every stored document; undeclared extra keys stay allowed.
pub const USERS_SCHEMA: CollectionSchema = CollectionSchema::new(
    USERS,
    &[
        FieldSpec::required("email", FieldType::String),
        FieldSpec::required("password_hash", FieldType::String),
        FieldSpec::required("refresh_token", FieldType::String),
        FieldSpec::required("refresh_token_expiry_time", FieldType::Date),
    ],
);

/// User document as the application stores it. The password hash is an
/// opaque digest and the refresh token an opaque bearer credential; this
/// crate never inspects either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub refresh_token: String,
    #[serde(with = "mongodb::bson::serde_helpers::time_0_3_offsetdatetime_as_bson_datetime")]
    pub refresh_token_expiry_time: OffsetDateTime,
}

/// Creates the validated `users` collection.
///
/// Apply is not idempotent: a second run fails with
/// [`MigrationError::CollectionAlreadyExists`]. Revert drops the ENTIRE
/// database, not only `users` — a deliberate asymmetry inherited from the
/// system this step migrates, kept rather than silently narrowed (see
/// DESIGN.md) and gated behind an explicit confirmation.
pub struct InitUsers;

#[async_trait]
impl MigrationStep for InitUsers {
    fn name(&self) -> &'static str {
        "init_users"
    }

    fn revert_drops_database(&self) -> bool {
        true
    }

    async fn apply(&self, db: &Database, _client: Option<&Client>) -> Result<(), MigrationError> {
        db.create_collection(USERS)
            .validator(USERS_SCHEMA.validator())
            .await
            .map_err(|err| MigrationError::from_store(err, USERS))
    }

    async fn revert(&self, db: &Database, _client: Option<&Client>) -> Result<(), MigrationError> {
        db.drop()
            .await
            .map_err(|err| MigrationError::from_store(err, USERS))
    }
}
