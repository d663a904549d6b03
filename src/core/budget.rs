use crate::core::model::{
    BudgetSummary, HumanCapitalEdit, HumanCapitalLineItem, ServiceEdit, ServiceLineItem,
};
use crate::core::ports::{ConfigProvider, WorkbookSource};
use crate::core::sheet;
use crate::utils::error::{BudgetError, Result};
use rust_decimal::Decimal;

/// The budget domain model: the two line-item collections plus the
/// cost-aggregation operations. All I/O happens once, in `load`.
#[derive(Debug)]
pub struct BudgetModel {
    services: Vec<ServiceLineItem>,
    human_capital: Vec<HumanCapitalLineItem>,
}

impl BudgetModel {
    /// Loads both named sheets from the workbook source. An absent source
    /// fails with `SourceNotFound`; a present source with a broken sheet
    /// fails with the sheet-level error.
    pub fn load<S: WorkbookSource, C: ConfigProvider>(source: &S, config: &C) -> Result<Self> {
        if !source.exists() {
            return Err(BudgetError::SourceNotFound {
                path: config.workbook_path().to_string(),
            });
        }

        tracing::info!("Loading workbook from: {}", config.workbook_path());

        let services_bytes = source.read_sheet(config.services_sheet())?;
        let services = sheet::decode_service_sheet(config.services_sheet(), &services_bytes)?;

        let human_capital_bytes = source.read_sheet(config.human_capital_sheet())?;
        let human_capital =
            sheet::decode_human_capital_sheet(config.human_capital_sheet(), &human_capital_bytes)?;

        tracing::info!(
            "Loaded {} service rows and {} human-capital rows",
            services.len(),
            human_capital.len()
        );

        Ok(Self {
            services,
            human_capital,
        })
    }

    pub fn from_rows(
        services: Vec<ServiceLineItem>,
        human_capital: Vec<HumanCapitalLineItem>,
    ) -> Self {
        Self {
            services,
            human_capital,
        }
    }

    /// Current totals for both categories. Missing human-capital amounts are
    /// excluded from the sum, not counted as zero. No side effects.
    pub fn summarize(&self) -> BudgetSummary {
        let services_total = self.services.iter().map(|item| item.total_cost()).sum();
        let human_capital_total = self
            .human_capital
            .iter()
            .filter_map(|item| item.amount_usd)
            .sum();

        BudgetSummary {
            services_total,
            human_capital_total,
        }
    }

    /// Replaces the service collection wholesale with the edited rows and
    /// returns the sum of the recomputed per-row totals.
    pub fn apply_service_edits(&mut self, edits: Vec<ServiceEdit>) -> Decimal {
        self.services = edits.into_iter().map(ServiceLineItem::from).collect();

        let total: Decimal = self.services.iter().map(|item| item.total_cost()).sum();
        tracing::debug!(
            "Applied {} edited service rows, new total {}",
            self.services.len(),
            total
        );
        total
    }

    /// Coerces each edited amount and returns the sum of the rows that
    /// coerced successfully. The stored human-capital collection is not
    /// touched; edits live only in the returned total.
    pub fn coerce_and_sum_human_capital(&self, edits: &[HumanCapitalEdit]) -> Decimal {
        edits
            .iter()
            .filter_map(|edit| sheet::coerce_amount(&edit.amount))
            .sum()
    }

    pub fn services(&self) -> &[ServiceLineItem] {
        &self.services
    }

    pub fn human_capital(&self) -> &[HumanCapitalLineItem] {
        &self.human_capital
    }
}

/// Arithmetic sum of the two category totals. Pure, no model state.
pub fn grand_total(services_total: Decimal, human_capital_total: Decimal) -> Decimal {
    services_total + human_capital_total
}
