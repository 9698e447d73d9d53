use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use cbc_ingest::parse_statement_file;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cbc-statements", version, about = "CBC (Belgium) CSV statement normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a CBC CSV export and print the normalized statement
    Convert {
        /// Path to the `;`-delimited CSV export
        file: PathBuf,

        /// Emit the full statement as JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Convert { file, json } => {
            if !file.exists() {
                bail!("CSV not found: {}", file.display());
            }

            let statement = parse_statement_file(&file)
                .with_context(|| format!("parsing {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&statement)?);
            } else {
                println!(
                    "Parsed {} transactions for account {} ({})\n",
                    statement.lines.len(),
                    statement.account_id,
                    statement.currency
                );
                for line in &statement.lines {
                    println!(
                        "{}  {:>12.2}  {:<6}  {}",
                        line.date,
                        line.amount,
                        line.kind.as_str(),
                        line.payee
                    );
                }
            }
        }
    }

    Ok(())
}
