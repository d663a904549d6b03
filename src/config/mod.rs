pub mod cli;
pub mod toml_config;

use crate::core::terminal::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_WORKBOOK_PATH: &str = "data/initial-investment-budget";
pub const DEFAULT_SERVICES_SHEET: &str = "Services and Products";
pub const DEFAULT_HUMAN_CAPITAL_SHEET: &str = "Human Capital and Operations";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "budget-sim")]
#[command(about = "An interactive investment-budget calculator over a two-sheet workbook")]
pub struct CliConfig {
    /// Workbook directory holding the two budget sheets
    /// [default: data/initial-investment-budget]
    #[arg(long)]
    pub workbook: Option<String>,

    /// TOML configuration file; explicit CLI flags take precedence
    #[arg(long = "config")]
    pub config_file: Option<String>,

    /// Rendering for computed totals [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(skip)]
    #[serde(default)]
    pub services_sheet: Option<String>,

    #[arg(skip)]
    #[serde(default)]
    pub human_capital_sheet: Option<String>,
}

impl CliConfig {
    /// 合併 TOML 配置（CLI 旗標優先）
    pub fn merged_with(mut self, file: TomlConfig) -> Self {
        if self.format.is_none() {
            self.format = file
                .display
                .as_ref()
                .and_then(|display| display.format.as_deref())
                .and_then(|format| format.parse().ok());
        }
        if self.workbook.is_none() {
            self.workbook = Some(file.workbook.path);
        }
        if self.services_sheet.is_none() {
            self.services_sheet = file.workbook.services_sheet;
        }
        if self.human_capital_sheet.is_none() {
            self.human_capital_sheet = file.workbook.human_capital_sheet;
        }
        self
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or(OutputFormat::Text)
    }
}

impl ConfigProvider for CliConfig {
    fn workbook_path(&self) -> &str {
        self.workbook.as_deref().unwrap_or(DEFAULT_WORKBOOK_PATH)
    }

    fn services_sheet(&self) -> &str {
        self.services_sheet
            .as_deref()
            .unwrap_or(DEFAULT_SERVICES_SHEET)
    }

    fn human_capital_sheet(&self) -> &str {
        self.human_capital_sheet
            .as_deref()
            .unwrap_or(DEFAULT_HUMAN_CAPITAL_SHEET)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("workbook", self.workbook_path())?;
        validation::validate_non_empty_string("services_sheet", self.services_sheet())?;
        validation::validate_non_empty_string("human_capital_sheet", self.human_capital_sheet())?;
        Ok(())
    }
}
