//! Species command: print one participant's species list

use super::shared::{load_configuration, open_service};
use crate::app::services::leaderboard::SpeciesListView;
use crate::cli::args::{GlobalArgs, OutputFormat, SpeciesArgs};
use colored::*;

pub async fn run_species(
    global: &GlobalArgs,
    args: SpeciesArgs,
) -> anyhow::Result<SpeciesListView> {
    args.validate()?;
    let config = load_configuration(global)?;
    let service = open_service(config)?;
    let view = service
        .species_list(args.user_id, args.year, Some(&args.sort))
        .await?;

    match args.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Human => print!("{}", render_list(&view)),
    }
    Ok(view)
}

pub fn render_list(view: &SpeciesListView) -> String {
    let mut output = format!(
        "{} {} species in {} ({})\n",
        view.user_name.bright_white().bold(),
        view.species_count.to_string().bright_green().bold(),
        view.year,
        view.privacy_level
    );
    if let Some(message) = &view.message {
        output.push_str(&format!("  {}\n", message.italic()));
    }
    for (index, species) in view.species.iter().enumerate() {
        output.push_str(&format!(
            "{:>4}. {:<35} {:<35} {}",
            index + 1,
            species.common_name,
            species.scientific_name.italic(),
            species.first_observation_date
        ));
        if let Some(state) = &species.state_province {
            output.push_str(&format!("  {}", state));
        }
        output.push('\n');
    }
    output
}
