use gamestore_federation::MigrationOutcome;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Session;
use crate::error::CliError;

/// Entry point for `migrate <key>` and `migrate --all`.
pub(crate) async fn run_migrate(session: &Session, key: Option<&str>) -> Result<(), CliError> {
    let games = &session.federation.games;
    let Some(key) = key else {
        let stats = games.migrate_all().await?;
        log::info!(
            "{} {} of {} legacy game(s)",
            "Migrated".if_supports_color(Stdout, |t| t.green()),
            stats.migrated.if_supports_color(Stdout, |t| t.bold()),
            stats.examined,
        );
        if stats.already_present > 0 {
            log::info!(
                "  {} already in the primary store",
                stats.already_present.if_supports_color(Stdout, |t| t.dimmed())
            );
        }
        if stats.shadows_written > 0 {
            log::info!("  {} shadow row(s) written", stats.shadows_written);
        }
        if stats.failed > 0 {
            log::warn!("  {} game(s) could not be migrated", stats.failed);
        }
        return Ok(());
    };

    match games.migrate(key).await? {
        MigrationOutcome::AlreadyPresent => {
            log::warn!("{} is already in the primary store", key);
        }
        MigrationOutcome::Migrated { shadowed } => {
            log::info!(
                "{} {}",
                "Migrated".if_supports_color(Stdout, |t| t.green()),
                key.if_supports_color(Stdout, |t| t.bold()),
            );
            if shadowed {
                log::info!("  Original key kept as a deleted shadow row");
            }
        }
    }
    Ok(())
}
