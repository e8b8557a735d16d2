//! acetext CLI: inspect controlled-English documents and their lexicons.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use acetext::config::AceConfig;
use acetext::export::{DocumentFile, OwlDocument};

#[derive(Parser)]
#[command(name = "acetext", version, about = "Controlled-English text and lexicon tool")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show text and lexicon statistics.
    Stats {
        /// Path to the JSON document.
        #[arg(long)]
        file: PathBuf,

        /// Print as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Complete a word-form prefix against the lexicon.
    Complete {
        #[arg(long)]
        file: PathBuf,

        /// Prefix to complete.
        prefix: String,
    },

    /// Print the lexicon in APE lexicon format.
    Lexicon {
        #[arg(long)]
        file: PathBuf,
    },

    /// List snippets mentioning every entity of a snippet.
    Similar {
        #[arg(long)]
        file: PathBuf,

        /// Position of the snippet in the text, starting at 0.
        index: usize,
    },

    /// Print the entity index.
    Index {
        #[arg(long)]
        file: PathBuf,
    },

    /// Print the effective configuration as TOML.
    Config,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AceConfig::load(path)?,
        None => AceConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Stats { file, json } => {
            let document = open(&file, config)?;
            let metrics = document.metrics();
            if json {
                let json = serde_json::to_string_pretty(&metrics).into_diagnostic()?;
                println!("{json}");
            } else {
                print!("{metrics}");
            }
        }

        Commands::Complete { file, prefix } => {
            let document = open(&file, config)?;
            let candidates = document.candidates(&prefix);
            if candidates.is_empty() {
                println!("No word-forms start with \"{prefix}\".");
            } else {
                println!("Completion: {}", document.complete(&prefix));
                println!("Candidates ({}):", candidates.len());
                for candidate in &candidates {
                    println!("  {candidate}");
                }
            }
        }

        Commands::Lexicon { file } => {
            let document = open(&file, config)?;
            print!("{}", document.lexicon().to_ace_lexicon_format());
        }

        Commands::Similar { file, index } => {
            let document = open(&file, config)?;
            let text = document.text();
            let Some(snippet) = text.get(index) else {
                miette::bail!(
                    "no snippet at position {index}; the text has {} snippets",
                    text.len()
                );
            };

            let mut similar: Vec<(usize, String)> = text
                .similar_snippets(snippet)
                .iter()
                .filter_map(|s| text.index_of(s).map(|i| (i, s.to_string())))
                .collect();
            similar.sort();

            println!("Snippet {index}: {snippet}");
            if similar.is_empty() {
                println!("No similar snippets.");
            } else {
                println!("Similar snippets ({}):", similar.len());
                for (i, rendering) in &similar {
                    println!("  {i}. {rendering}");
                }
            }
        }

        Commands::Index { file } => {
            let document = open(&file, config)?;
            for entry in document.text().entity_index() {
                println!("{} ({})", entry.entity, entry.entity.iri);
                for snippet in &entry.snippets {
                    println!("  {snippet}");
                }
            }
        }

        Commands::Config => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

fn open(path: &Path, config: AceConfig) -> Result<OwlDocument> {
    let document = DocumentFile::load(path)?.into_document(config)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn similar_help_describes_entity_matching() {
        let command = Cli::command();
        let similar = command
            .get_subcommands()
            .find(|sub| sub.get_name() == "similar")
            .unwrap();
        let about = similar.get_about().unwrap().to_string();
        assert!(about.contains("mentioning every entity"));
        assert!(!about.contains("content words"));
    }
}
