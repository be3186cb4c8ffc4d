use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Session;
use crate::error::CliError;

/// Entry point for `view <key>`.
pub(crate) async fn run_view(session: &Session, key: &str) -> Result<(), CliError> {
    let views = session.federation.games.increment_views(key).await?;
    log::info!(
        "{}: {} view(s)",
        key.if_supports_color(Stdout, |t| t.bold()),
        views
    );
    Ok(())
}

/// Entry point for `stock <key> <delta>`.
pub(crate) async fn run_stock(session: &Session, key: &str, delta: i32) -> Result<(), CliError> {
    let units = session.federation.games.adjust_stock(key, delta).await?;
    let change = format!("{delta:+}");
    log::info!(
        "{}: {} unit(s) in stock ({})",
        key.if_supports_color(Stdout, |t| t.bold()),
        units,
        change.if_supports_color(Stdout, |t| t.dimmed()),
    );
    if units < 0 {
        log::warn!("{} is oversold", key);
    }
    Ok(())
}
