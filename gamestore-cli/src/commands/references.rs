use gamestore_federation::{GenreRepository, OrderRepository, PublisherRepository};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use super::Session;
use crate::error::CliError;

/// Entry point for `genres`.
pub(crate) async fn run_genres(session: &Session) -> Result<(), CliError> {
    let genres = session.federation.genres.list().await?;
    log::info!(
        "{} genre(s)",
        genres.len().if_supports_color(Stdout, |t| t.bold())
    );
    for genre in &genres {
        log::info!(
            "  {:<24} {}",
            genre.name,
            genre.id.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Entry point for `publishers`.
pub(crate) async fn run_publishers(session: &Session) -> Result<(), CliError> {
    let publishers = session.federation.publishers.list().await?;
    log::info!(
        "{} publisher(s)",
        publishers.len().if_supports_color(Stdout, |t| t.bold())
    );
    for publisher in &publishers {
        let home = publisher.home_page.as_deref().unwrap_or("");
        log::info!(
            "  {:<28} {} {}",
            publisher.company_name,
            publisher.id.if_supports_color(Stdout, |t| t.dimmed()),
            home.if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    Ok(())
}

/// Entry point for `orders`.
pub(crate) async fn run_orders(session: &Session) -> Result<(), CliError> {
    let orders = session.federation.orders.list().await?;
    if orders.is_empty() {
        log::info!("No orders.");
        return Ok(());
    }
    for order in &orders {
        log::info!(
            "  {}  {:<12} {:<16} {}",
            order.order_date.format("%Y-%m-%d"),
            order.customer_id,
            order.ship_city.as_deref().unwrap_or("-"),
            order.id.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Entry point for `comments <key>`.
pub(crate) async fn run_comments(session: &Session, key: &str) -> Result<(), CliError> {
    let comments = session.federation.games.comments_for(key).await?;
    if comments.is_empty() {
        log::info!("No comments on {}.", key);
        return Ok(());
    }
    for comment in &comments {
        log::info!(
            "{} {}",
            comment.author.if_supports_color(Stdout, |t| t.bold()),
            comment
                .created_at
                .format("%Y-%m-%d %H:%M")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("  {}", comment.body);
    }
    Ok(())
}

/// Entry point for `comment <key>`.
pub(crate) async fn run_add_comment(
    session: &Session,
    key: &str,
    author: &str,
    body: &str,
) -> Result<(), CliError> {
    let comment = session
        .federation
        .games
        .add_comment(key, author, body)
        .await?;
    log::info!(
        "{} comment {} on {}",
        "Added".if_supports_color(Stdout, |t| t.green()),
        comment.id.if_supports_color(Stdout, |t| t.dimmed()),
        key.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}
