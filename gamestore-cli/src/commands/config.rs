use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;
use crate::settings::{self, Settings, StoragePaths};

/// Show effective settings and where each store lives.
pub(crate) fn run_config_show(settings: &Settings, paths: &StoragePaths) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "gamestore Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let db_source = source_label(settings.storage.primary_db.is_some());
    let legacy_source = source_label(settings.storage.legacy_snapshot.is_some());
    log::info!(
        "  {:<18} {} {}",
        "primary_db",
        paths.primary_db.display(),
        db_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<18} {} {}",
        "legacy_snapshot",
        paths.legacy_snapshot.display(),
        legacy_source.if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!(
        "  {:<18} {}",
        "default_page_size",
        settings.catalog.default_page_size.as_deref().unwrap_or("all"),
    );
    log::info!(
        "  {:<18} {}",
        "show_deleted",
        settings.permissions.show_deleted,
    );
}

fn source_label(from_settings: bool) -> &'static str {
    if from_settings {
        "(settings)"
    } else {
        "(default or flag)"
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

/// Write a default settings file.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings::settings_path();
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    settings::save_settings(&Settings::default())?;
    log::info!(
        "{} {}",
        "Wrote".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
