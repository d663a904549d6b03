use crate::core::model::{Action, SurfaceOutput};
use crate::utils::error::Result;

/// A workbook of named sheets. The domain reads the raw bytes of a sheet
/// exactly once, at load time.
pub trait WorkbookSource: Send + Sync {
    fn exists(&self) -> bool;
    fn read_sheet(&self, name: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn workbook_path(&self) -> &str;
    fn services_sheet(&self) -> &str;
    fn human_capital_sheet(&self) -> &str;
}

/// The editing surface: produces one action per interaction and renders the
/// values the session computes. `next_action` returns `None` when the user
/// ends the session.
pub trait EditSurface {
    fn next_action(&mut self) -> Result<Option<Action>>;
    fn present(&mut self, output: &SurfaceOutput) -> Result<()>;
}
