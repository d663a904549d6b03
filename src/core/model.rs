use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One service/product row. `total_cost` is derived from quantity and unit
/// cost at construction and is never settable on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLineItem {
    description: String,
    quantity: u32,
    unit_cost: Decimal,
    total_cost: Decimal,
}

impl ServiceLineItem {
    pub fn new(description: String, quantity: u32, unit_cost: Decimal) -> Self {
        let total_cost = unit_cost * Decimal::from(quantity);
        Self {
            description,
            quantity,
            unit_cost,
            total_cost,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_cost(&self) -> Decimal {
        self.unit_cost
    }

    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }
}

impl From<ServiceEdit> for ServiceLineItem {
    fn from(edit: ServiceEdit) -> Self {
        ServiceLineItem::new(edit.description, edit.quantity, edit.unit_cost)
    }
}

/// One human-capital/operations row. `None` means the source cell held no
/// usable number; missing amounts are excluded from sums, never zeroed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanCapitalLineItem {
    pub description: String,
    pub amount_usd: Option<Decimal>,
}

/// An edited service row as submitted by the editing surface. The surface
/// guarantees quantity and unit cost are numeric and non-negative before
/// rows reach the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEdit {
    pub description: String,
    pub quantity: u32,
    pub unit_cost: Decimal,
}

/// An edited human-capital row. The amount stays raw text so that the
/// numeric-or-missing coercion policy applies to edits the same way it
/// applies to loaded cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanCapitalEdit {
    pub description: String,
    pub amount: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub services_total: Decimal,
    pub human_capital_total: Decimal,
}

/// One user interaction, as produced by the editing surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ShowSummary,
    UpdateServices(Vec<ServiceEdit>),
    UpdateHumanCapital(Vec<HumanCapitalEdit>),
    GrandTotal,
}

/// One displayed value, handed back to the editing surface for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOutput {
    Summary(BudgetSummary),
    ServicesTotal(Decimal),
    HumanCapitalTotal(Decimal),
    GrandTotal(Decimal),
    Error { message: String, suggestion: String },
}
