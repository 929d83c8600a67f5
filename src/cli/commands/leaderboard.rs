//! Leaderboard command: print standings from the local snapshot

use super::shared::{load_configuration, open_service};
use crate::app::services::leaderboard::LeaderboardView;
use crate::cli::args::{GlobalArgs, LeaderboardArgs, OutputFormat};
use colored::*;

pub async fn run_leaderboard(
    global: &GlobalArgs,
    args: LeaderboardArgs,
) -> anyhow::Result<LeaderboardView> {
    let config = load_configuration(global)?;
    let service = open_service(config)?;
    let view = service.leaderboard(args.year, args.limit).await?;

    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Human => print!("{}", render_table(&view)),
    }
    Ok(view)
}

/// Human-readable leaderboard table
pub fn render_table(view: &LeaderboardView) -> String {
    let mut output = format!(
        "{} {} ({} participants)\n",
        "Big Year Leaderboard".bright_green().bold(),
        view.year,
        view.participants
    );
    if view.leaderboard.is_empty() {
        output.push_str("  No sightings yet\n");
        return output;
    }

    output.push_str(&format!(
        "{:>5}  {:<30} {:>8}  {:<12}\n",
        "Rank", "Birder", "Species", "Last seen"
    ));
    for row in &view.leaderboard {
        let last_seen = row
            .last_observation_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "-".to_string());
        let name = if row.rank == 1 {
            row.name.bright_yellow().bold().to_string()
        } else {
            row.name.clone()
        };
        output.push_str(&format!(
            "{:>5}  {:<30} {:>8}  {:<12}\n",
            row.rank, name, row.species_count, last_seen
        ));
    }
    output
}
