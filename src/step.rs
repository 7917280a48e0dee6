use async_trait::async_trait;
use mongodb::{Client, Database};
use tracing::{info, warn};

use crate::error::MigrationError;

/// One versioned schema transformation with a forward and a backward
/// direction. Steps take their store handles explicitly; nothing here is
/// ambient. The secondary client handle is unused by the steps themselves
/// and reserved for callers that run steps inside store-level transactions.
///
/// Steps are single-shot and awaited to completion. They carry no retry,
/// timeout, or dry-run machinery, and running two steps concurrently
/// against the same store is undefined; whoever sequences migrations must
/// serialize them.
#[async_trait]
pub trait MigrationStep: Send + Sync {
    fn name(&self) -> &'static str;

    /// True when revert destroys the entire database instead of undoing
    /// only what apply created. Such reverts are refused by [`revert_step`]
    /// unless the caller confirms the exact database by name.
    fn revert_drops_database(&self) -> bool {
        false
    }

    async fn apply(&self, db: &Database, client: Option<&Client>) -> Result<(), MigrationError>;

    async fn revert(&self, db: &Database, client: Option<&Client>) -> Result<(), MigrationError>;
}

/// Caller acknowledgement for destructive reverts. A database-dropping
/// revert only proceeds when the confirmation names the database that is
/// about to be dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevertConfirmation {
    None,
    DropDatabase(String),
}

impl RevertConfirmation {
    pub fn drop_database(name: impl Into<String>) -> Self {
        Self::DropDatabase(name.into())
    }

    fn covers_drop_of(&self, database: &str) -> bool {
        matches!(self, Self::DropDatabase(name) if name == database)
    }
}

/// Run a step forward, with logging around the otherwise-silent step.
pub async fn apply_step(
    step: &dyn MigrationStep,
    db: &Database,
    client: Option<&Client>,
) -> Result<(), MigrationError> {
    info!(step = step.name(), db = %db.name(), "applying migration step");
    step.apply(db, client).await?;
    info!(step = step.name(), "migration step applied");
    Ok(())
}

/// Run a step backward. Refuses database-dropping reverts that are not
/// confirmed for this exact database, before any store traffic happens.
pub async fn revert_step(
    step: &dyn MigrationStep,
    db: &Database,
    client: Option<&Client>,
    confirm: &RevertConfirmation,
) -> Result<(), MigrationError> {
    if step.revert_drops_database() {
        if !confirm.covers_drop_of(db.name()) {
            return Err(MigrationError::RevertNotConfirmed {
                database: db.name().to_string(),
            });
        }
        warn!(
            step = step.name(),
            db = %db.name(),
            "revert drops the ENTIRE database, not only this step's collection"
        );
    }
    info!(step = step.name(), db = %db.name(), "reverting migration step");
    step.revert(db, client).await?;
    info!(step = step.name(), "migration step reverted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_must_name_the_database() {
        assert!(RevertConfirmation::drop_database("viconv").covers_drop_of("viconv"));
        assert!(!RevertConfirmation::drop_database("other").covers_drop_of("viconv"));
        assert!(!RevertConfirmation::None.covers_drop_of("viconv"));
    }
}
