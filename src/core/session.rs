use crate::core::budget::{self, BudgetModel};
use crate::core::model::{BudgetSummary, HumanCapitalEdit, ServiceEdit};
use crate::core::ports::{ConfigProvider, WorkbookSource};
use crate::utils::error::{BudgetError, Result};
use rust_decimal::Decimal;

enum ModelState {
    Loaded(BudgetModel),
    Failed(BudgetError),
}

/// One program run. Wraps the model with its two-state lifecycle: a failed
/// load is terminal, and every aggregation afterwards reports
/// `DataUnavailable`. The session also retains the most recent
/// human-capital submission so the grand total is deterministic instead of
/// depending on whether the surface happens to resubmit.
pub struct BudgetSession {
    state: ModelState,
    retained_human_capital: Option<Vec<HumanCapitalEdit>>,
}

impl BudgetSession {
    /// Attempts the one-time workbook load. Never fails outright; a load
    /// error is stored and replayed as `DataUnavailable` on every operation.
    pub fn open<S: WorkbookSource, C: ConfigProvider>(source: &S, config: &C) -> Self {
        let state = match BudgetModel::load(source, config) {
            Ok(model) => ModelState::Loaded(model),
            Err(err) => {
                tracing::error!("Workbook load failed: {}", err);
                ModelState::Failed(err)
            }
        };

        Self {
            state,
            retained_human_capital: None,
        }
    }

    pub fn from_model(model: BudgetModel) -> Self {
        Self {
            state: ModelState::Loaded(model),
            retained_human_capital: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    /// The error that left the session unusable, if the load failed.
    pub fn load_error(&self) -> Option<&BudgetError> {
        match &self.state {
            ModelState::Loaded(_) => None,
            ModelState::Failed(err) => Some(err),
        }
    }

    fn model(&self) -> Result<&BudgetModel> {
        match &self.state {
            ModelState::Loaded(model) => Ok(model),
            ModelState::Failed(_) => Err(BudgetError::DataUnavailable),
        }
    }

    fn model_mut(&mut self) -> Result<&mut BudgetModel> {
        match &mut self.state {
            ModelState::Loaded(model) => Ok(model),
            ModelState::Failed(_) => Err(BudgetError::DataUnavailable),
        }
    }

    pub fn summarize(&self) -> Result<BudgetSummary> {
        self.model().map(|model| model.summarize())
    }

    pub fn apply_service_edits(&mut self, edits: Vec<ServiceEdit>) -> Result<Decimal> {
        self.model_mut().map(|model| model.apply_service_edits(edits))
    }

    /// Computes the coerced sum for the submitted rows and retains them for
    /// later grand totals. The model's stored collection stays untouched.
    pub fn update_human_capital(&mut self, edits: Vec<HumanCapitalEdit>) -> Result<Decimal> {
        let total = self.model()?.coerce_and_sum_human_capital(&edits);
        self.retained_human_capital = Some(edits);
        Ok(total)
    }

    /// Services total from the stored model plus the human-capital total
    /// from the retained submission (or the loaded rows before any
    /// submission).
    pub fn grand_total(&self) -> Result<Decimal> {
        let model = self.model()?;
        let summary = model.summarize();

        let human_capital_total = match &self.retained_human_capital {
            Some(edits) => model.coerce_and_sum_human_capital(edits),
            None => summary.human_capital_total,
        };

        Ok(budget::grand_total(
            summary.services_total,
            human_capital_total,
        ))
    }
}
