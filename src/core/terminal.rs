use crate::core::model::{Action, SurfaceOutput};
use crate::core::ports::EditSurface;
use crate::core::sheet;
use crate::utils::error::{BudgetError, Result};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(BudgetError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: text, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Empty,
    Summary,
    UpdateServices(PathBuf),
    UpdateHumanCapital(PathBuf),
    GrandTotal,
    Help,
    Quit,
    Invalid(String),
    Unknown(String),
}

fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (trimmed, ""),
    };

    match head {
        "summary" => Command::Summary,
        "grand-total" => Command::GrandTotal,
        "update-services" => {
            if rest.is_empty() {
                Command::Invalid("update-services needs a CSV file path".to_string())
            } else {
                Command::UpdateServices(PathBuf::from(rest))
            }
        }
        "update-human-capital" => {
            if rest.is_empty() {
                Command::Invalid("update-human-capital needs a CSV file path".to_string())
            } else {
                Command::UpdateHumanCapital(PathBuf::from(rest))
            }
        }
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// Line-oriented editing surface. Edited tables are submitted as CSV files
/// (edit in any spreadsheet tool, save, submit the path); computed totals
/// render as text or JSON. The numeric >= 0 constraints on service edits
/// are enforced here, before rows reach the model.
pub struct TerminalSurface {
    format: OutputFormat,
    stdin: io::Stdin,
}

impl TerminalSurface {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            stdin: io::stdin(),
        }
    }

    fn read_service_edits(&self, path: &Path) -> Result<Action> {
        let bytes = std::fs::read(path)?;
        let label = path.display().to_string();
        let edits = sheet::decode_service_edits(&label, &bytes)?;
        Ok(Action::UpdateServices(edits))
    }

    fn read_human_capital_edits(&self, path: &Path) -> Result<Action> {
        let bytes = std::fs::read(path)?;
        let label = path.display().to_string();
        let edits = sheet::decode_human_capital_edits(&label, &bytes)?;
        Ok(Action::UpdateHumanCapital(edits))
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  summary                        show current category totals");
        println!("  update-services <file.csv>     submit an edited services sheet");
        println!("  update-human-capital <file.csv> submit an edited human-capital sheet");
        println!("  grand-total                    show the combined total");
        println!("  help                           show this help");
        println!("  quit                           end the session");
    }
}

fn error_output(err: &BudgetError) -> SurfaceOutput {
    SurfaceOutput::Error {
        message: err.user_friendly_message(),
        suggestion: err.recovery_suggestion(),
    }
}

fn format_usd(value: Decimal, places: u32) -> String {
    format!(
        "${:.precision$}",
        value.round_dp(places),
        precision = places as usize
    )
}

impl EditSurface for TerminalSurface {
    fn next_action(&mut self) -> Result<Option<Action>> {
        loop {
            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            let read = self.stdin.read_line(&mut line)?;
            if read == 0 {
                // EOF ends the session like an explicit quit
                return Ok(None);
            }

            match parse_command(&line) {
                Command::Empty => continue,
                Command::Summary => return Ok(Some(Action::ShowSummary)),
                Command::GrandTotal => return Ok(Some(Action::GrandTotal)),
                Command::UpdateServices(path) => match self.read_service_edits(&path) {
                    Ok(action) => return Ok(Some(action)),
                    Err(err) => {
                        tracing::warn!("Rejected services submission: {}", err);
                        self.present(&error_output(&err))?;
                    }
                },
                Command::UpdateHumanCapital(path) => match self.read_human_capital_edits(&path) {
                    Ok(action) => return Ok(Some(action)),
                    Err(err) => {
                        tracing::warn!("Rejected human-capital submission: {}", err);
                        self.present(&error_output(&err))?;
                    }
                },
                Command::Help => self.print_help(),
                Command::Quit => return Ok(None),
                Command::Invalid(reason) => eprintln!("❌ {}", reason),
                Command::Unknown(command) => {
                    eprintln!("❌ Unknown command: {} (try 'help')", command);
                }
            }
        }
    }

    fn present(&mut self, output: &SurfaceOutput) -> Result<()> {
        match self.format {
            OutputFormat::Text => match output {
                SurfaceOutput::Summary(summary) => {
                    println!(
                        "Total services/products cost: {}",
                        format_usd(summary.services_total, 2)
                    );
                    println!(
                        "Total human capital and operations cost: {}",
                        format_usd(summary.human_capital_total, 2)
                    );
                }
                SurfaceOutput::ServicesTotal(total) => {
                    println!("Updated services total: {}", format_usd(*total, 4));
                }
                SurfaceOutput::HumanCapitalTotal(total) => {
                    println!("Updated human capital total: {}", format_usd(*total, 4));
                }
                SurfaceOutput::GrandTotal(total) => {
                    println!("Grand total: {}", format_usd(*total, 2));
                }
                SurfaceOutput::Error {
                    message,
                    suggestion,
                } => {
                    eprintln!("❌ {}", message);
                    eprintln!("💡 {}", suggestion);
                }
            },
            OutputFormat::Json => {
                let value = match output {
                    SurfaceOutput::Summary(summary) => json!({ "summary": summary }),
                    SurfaceOutput::ServicesTotal(total) => json!({ "services_total": total }),
                    SurfaceOutput::HumanCapitalTotal(total) => {
                        json!({ "human_capital_total": total })
                    }
                    SurfaceOutput::GrandTotal(total) => json!({ "grand_total": total }),
                    SurfaceOutput::Error {
                        message,
                        suggestion,
                    } => json!({ "error": message, "suggestion": suggestion }),
                };
                println!("{}", serde_json::to_string(&value)?);
            }
        }

        Ok(())
    }
}
