pub mod budget;
pub mod engine;
pub mod model;
pub mod ports;
pub mod session;
pub mod sheet;
pub mod terminal;

pub use crate::core::model::{
    Action, BudgetSummary, HumanCapitalEdit, HumanCapitalLineItem, ServiceEdit, ServiceLineItem,
    SurfaceOutput,
};
pub use crate::core::ports::{ConfigProvider, EditSurface, WorkbookSource};
pub use crate::utils::error::Result;
