use gamestore_catalog::{Game, GameFilter};
use gamestore_federation::GameRepository;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::{Session, truncate_str};
use crate::cli_types::GameListArgs;
use crate::error::CliError;
use crate::settings::Settings;

fn build_filter(args: GameListArgs, settings: &Settings) -> GameFilter {
    GameFilter {
        name: args.name,
        genre_ids: args.genre,
        platform_ids: args.platform,
        publisher_id: args.publisher,
        min_price: args.min_price,
        max_price: args.max_price,
        published_within: args.published_within,
        sort: args.sort,
        page: args.page,
        page_size: settings.page_size(args.page_size),
    }
}

/// Entry point for `games`.
pub(crate) async fn run_games(
    session: &Session,
    args: GameListArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let can_see_deleted = settings.can_see_deleted(args.show_deleted);
    let filter = build_filter(args, settings);
    let page = session
        .federation
        .games
        .list(&filter, can_see_deleted)
        .await?;

    if page.games.is_empty() {
        log::info!("No games match.");
        return Ok(());
    }

    log::info!(
        "  {:<20} {:<32} {:>9} {:>6} {:>7}",
        "Key".if_supports_color(Stdout, |t| t.bold()),
        "Name".if_supports_color(Stdout, |t| t.bold()),
        "Price".if_supports_color(Stdout, |t| t.bold()),
        "Stock".if_supports_color(Stdout, |t| t.bold()),
        "Views".if_supports_color(Stdout, |t| t.bold()),
    );
    for game in &page.games {
        print_game_row(game);
    }
    log::info!("");
    log::info!(
        "Showing {} of {} game(s), page {}",
        page.games.len().if_supports_color(Stdout, |t| t.bold()),
        page.total_count.if_supports_color(Stdout, |t| t.bold()),
        filter.page,
    );
    Ok(())
}

fn print_game_row(game: &Game) {
    let name = truncate_str(&game.name, 32);
    let line = format!(
        "  {:<20} {:<32} {:>9.2} {:>6} {:>7}",
        truncate_str(&game.key, 20),
        name,
        game.price,
        game.units_in_stock,
        game.view_count
    );
    if game.is_deleted {
        log::info!(
            "{} {}",
            line.if_supports_color(Stdout, |t| t.dimmed()),
            "(deleted)".if_supports_color(Stdout, |t| t.red()),
        );
    } else {
        log::info!("{}", line);
    }
}

/// Entry point for `game <key>`.
pub(crate) async fn run_game(
    session: &Session,
    key: &str,
    show_deleted: bool,
    settings: &Settings,
) -> Result<(), CliError> {
    let game = session
        .federation
        .games
        .get_by_key(key, settings.can_see_deleted(show_deleted))
        .await?
        .ok_or_else(|| CliError::not_found(format!("game '{key}'")))?;

    log::info!(
        "{} {}",
        game.name.if_supports_color(Stdout, |t| t.bold()),
        format!("[{}]", game.key).if_supports_color(Stdout, |t| t.dimmed()),
    );
    if game.is_deleted {
        log::info!("  {}", "deleted".if_supports_color(Stdout, |t| t.red()));
    }
    log::info!("  Id:        {}", game.id.if_supports_color(Stdout, |t| t.cyan()));
    log::info!("  Price:     {:.2} ({}% off)", game.price, game.discount);
    log::info!("  Stock:     {}", game.units_in_stock);
    log::info!("  Views:     {}", game.view_count);
    if let Some(publisher) = &game.publisher {
        log::info!("  Publisher: {}", publisher.company_name);
    }
    if !game.genres.is_empty() {
        let names: Vec<&str> = game.genres.iter().map(|g| g.name.as_str()).collect();
        log::info!("  Genres:    {}", names.join(", "));
    }
    if !game.platforms.is_empty() {
        let kinds: Vec<&str> = game.platforms.iter().map(|p| p.kind.as_str()).collect();
        log::info!("  Platforms: {}", kinds.join(", "));
    }
    if let Some(created) = game.created_at {
        log::info!("  Added:     {}", created.format("%Y-%m-%d"));
    }
    if let Some(description) = &game.description {
        log::info!("");
        log::info!("  {}", description);
    }
    Ok(())
}

/// Entry point for `delete <key>`.
pub(crate) async fn run_delete(session: &Session, key: &str) -> Result<(), CliError> {
    session.federation.games.delete(key).await?;
    log::info!(
        "{} {}",
        "Deleted".if_supports_color(Stdout, |t| t.green()),
        key.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

/// Entry point for `stats`.
pub(crate) async fn run_stats(session: &Session) -> Result<(), CliError> {
    let total = session.federation.games.seed_counter().await?;
    log::info!(
        "{} game(s) across both stores",
        total.if_supports_color(Stdout, |t| t.bold())
    );
    Ok(())
}
