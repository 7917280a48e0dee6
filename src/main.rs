use tracing::info;

use viconv_migrate::config::StoreConfig;
use viconv_migrate::db::Store;
use viconv_migrate::migrations;
use viconv_migrate::step::{apply_step, revert_step, MigrationStep, RevertConfirmation};

const USAGE: &str = "usage: viconv-migrate <up|down> [step] [--yes-drop-database]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "viconv_migrate=debug,mongodb=warn".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let mut direction: Option<String> = None;
    let mut step_name: Option<String> = None;
    let mut yes_drop_database = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--yes-drop-database" => yes_drop_database = true,
            "up" | "down" if direction.is_none() => direction = Some(arg),
            _ if direction.is_some() && step_name.is_none() => step_name = Some(arg),
            _ => anyhow::bail!(USAGE),
        }
    }
    let direction = direction.ok_or_else(|| anyhow::anyhow!(USAGE))?;

    let selected: Vec<Box<dyn MigrationStep>> = match &step_name {
        Some(name) => vec![migrations::find(name)
            .ok_or_else(|| anyhow::anyhow!("unknown migration step `{name}`"))?],
        None => migrations::steps(),
    };

    let config = StoreConfig::from_env()?;
    let store = Store::connect(&config).await?;

    match direction.as_str() {
        "up" => {
            for step in &selected {
                apply_step(step.as_ref(), &store.db, Some(&store.client)).await?;
            }
        }
        "down" => {
            let confirm = if yes_drop_database {
                RevertConfirmation::drop_database(store.db.name())
            } else {
                RevertConfirmation::None
            };
            for step in selected.iter().rev() {
                revert_step(step.as_ref(), &store.db, Some(&store.client), &confirm).await?;
            }
        }
        _ => unreachable!("direction is validated above"),
    }

    info!(direction = %direction, steps = selected.len(), "migration run finished");
    Ok(())
}
