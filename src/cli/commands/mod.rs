//! Command implementations for the Big Year CLI
//!
//! Each subcommand lives in its own module:
//! - `serve`: HTTP API with graceful shutdown
//! - `import`: offline import of export files
//! - `leaderboard`: standings table
//! - `species`: one participant's species list

pub mod import;
pub mod leaderboard;
pub mod serve;
pub mod shared;
pub mod species;

pub use import::ImportSummary;

use crate::cli::args::{Args, Commands};
use tokio_util::sync::CancellationToken;

/// Main command runner
///
/// Installs logging for the chosen subcommand and dispatches to it. The
/// `shutdown` token is cancelled on Ctrl-C.
pub async fn run(args: Args, shutdown: CancellationToken) -> anyhow::Result<()> {
    let Some(command) = args.command else {
        anyhow::bail!("No command given; run with --help to list commands");
    };
    shared::setup_logging(&args.global, command.default_log_level())?;

    match command {
        Commands::Serve(serve_args) => serve::run_serve(&args.global, serve_args, shutdown).await,
        Commands::Import(import_args) => {
            import::run_import(&args.global, import_args, shutdown)
                .await
                .map(|_| ())
        }
        Commands::Leaderboard(lb_args) => leaderboard::run_leaderboard(&args.global, lb_args)
            .await
            .map(|_| ()),
        Commands::Species(species_args) => species::run_species(&args.global, species_args)
            .await
            .map(|_| ()),
    }
}
