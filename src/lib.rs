pub mod config;
pub mod core;
pub mod utils;

pub use config::{cli::CsvWorkbook, CliConfig};

pub use crate::core::{
    budget::BudgetModel, engine::SessionEngine, session::BudgetSession, terminal::TerminalSurface,
};
pub use utils::error::{BudgetError, Result};
