use clap::{Parser, Subcommand};
use color_eyre::eyre::{self, eyre};

use crate::api::types::Character;
use crate::api::{CharacterQuery, FuturamaClient};
use crate::config::AppConfig;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "futurama-tui", about = "Browse Futurama characters in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand)]
pub enum CliCommand {
    /// Launch the interactive TUI (default)
    Tui,
    /// Fetch the character list once and print it (JSONL)
    List,
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

/// Self-contained JSON object for one character with its display labels.
fn character_record(character: &Character) -> serde_json::Value {
    serde_json::json!({
        "character": character,
        "gender_label": character.gender.label(),
        "status_label": character.status.label(),
    })
}

// ---------------------------------------------------------------------------
// Command execution
// ---------------------------------------------------------------------------

pub async fn run_command(cmd: CliCommand, config: AppConfig) -> eyre::Result<()> {
    match cmd {
        CliCommand::Tui => unreachable!("tui is handled in main"),

        CliCommand::List => {
            let client = FuturamaClient::new(&config)?;
            let characters = client
                .get_characters(&CharacterQuery::with_size(config.page_size))
                .await
                .map_err(|e| {
                    tracing::error!("failed to fetch characters: {e}");
                    eyre!("{}", crate::labels::LOAD_FAILED)
                })?;
            for character in &characters {
                let line = serde_json::to_string(&character_record(character))?;
                println!("{line}");
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Gender, Status};

    #[test]
    fn record_embeds_labels() {
        let character = Character {
            id: 1,
            name: "Bender".into(),
            gender: Gender::Male,
            status: Status::Dead,
            species: "Robot".into(),
            created_at: None,
            image: "x".into(),
        };
        let record = character_record(&character);
        assert_eq!(record["gender_label"], "Hombre");
        assert_eq!(record["status_label"], "Muerto");
        assert_eq!(record["character"]["name"], "Bender");
        assert_eq!(record["character"]["status"], "DEAD");
    }

    #[test]
    fn defaults_to_tui() {
        let cli = Cli::parse_from(["futurama-tui"]);
        assert!(cli.command.is_none());
        let cli = Cli::parse_from(["futurama-tui", "list"]);
        assert!(matches!(cli.command, Some(CliCommand::List)));
    }
}
