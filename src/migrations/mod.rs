use crate::step::MigrationStep;

pub mod init_users;

/// All known steps, in the order they are applied.
pub fn steps() -> Vec<Box<dyn MigrationStep>> {
    vec![Box::new(init_users::InitUsers)]
}

pub fn find(name: &str) -> Option<Box<dyn MigrationStep>> {
    steps().into_iter().find(|step| step.name() == name)
}
