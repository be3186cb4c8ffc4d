//! gamestore CLI
//!
//! Command-line interface over the federated game catalog: the primary
//! SQLite store and the legacy document snapshot.

mod cli_types;
mod commands;
mod error;
mod settings;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Session;
use error::CliError;
use settings::{Settings, StoragePaths};

fn init_logging(quiet: bool, verbose: bool) {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level));
    builder.target(env_logger::Target::Stdout);
    if !verbose {
        // Plain lines for normal output; verbose keeps level and timestamp.
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level, record.args()),
        });
    }
    builder.init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let settings = settings::load_settings();
    let paths = StoragePaths::resolve(cli.db, cli.legacy, &settings);

    if let Err(e) = run(cli.command, &settings, &paths) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands, settings: &Settings, paths: &StoragePaths) -> Result<(), CliError> {
    if let Commands::Config { action } = &command {
        match action {
            ConfigAction::Show => commands::config::run_config_show(settings, paths),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::Init { force } => commands::config::run_config_init(*force)?,
        }
        return Ok(());
    }

    let rt = tokio::runtime::Runtime::new().map_err(|e| CliError::runtime(e.to_string()))?;
    rt.block_on(async {
        let session = Session::open(paths)?;
        let save_legacy = command.mutates_legacy();
        dispatch(&session, command, settings).await?;
        if save_legacy {
            session.save_legacy().await?;
        }
        Ok::<_, CliError>(())
    })
}

async fn dispatch(
    session: &Session,
    command: Commands,
    settings: &Settings,
) -> Result<(), CliError> {
    use commands::{counters, games, migrate, references};

    match command {
        Commands::Games { args } => games::run_games(session, args, settings).await,
        Commands::Game { key, show_deleted } => {
            games::run_game(session, &key, show_deleted, settings).await
        }
        Commands::Genres => references::run_genres(session).await,
        Commands::Publishers => references::run_publishers(session).await,
        Commands::Orders => references::run_orders(session).await,
        Commands::Comments { key } => references::run_comments(session, &key).await,
        Commands::Comment { key, author, body } => {
            references::run_add_comment(session, &key, &author, &body).await
        }
        Commands::Migrate { key, .. } => migrate::run_migrate(session, key.as_deref()).await,
        Commands::View { key } => counters::run_view(session, &key).await,
        Commands::Stock { key, delta } => counters::run_stock(session, &key, delta).await,
        Commands::Delete { key } => games::run_delete(session, &key).await,
        Commands::Stats => games::run_stats(session).await,
        Commands::Config { .. } => Ok(()),
    }
}
