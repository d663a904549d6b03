use crate::core::WorkbookSource;
use crate::utils::error::{BudgetError, Result};
use std::fs;
use std::path::PathBuf;

/// A workbook directory: each named sheet is a `<name>.csv` file inside it.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    base_path: PathBuf,
}

impl CsvWorkbook {
    pub fn new(base_path: String) -> Self {
        Self {
            base_path: PathBuf::from(base_path),
        }
    }

    fn sheet_path(&self, name: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", name))
    }
}

impl WorkbookSource for CsvWorkbook {
    fn exists(&self) -> bool {
        self.base_path.is_dir()
    }

    fn read_sheet(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.sheet_path(name);
        if !path.is_file() {
            return Err(BudgetError::SheetMissing {
                name: name.to_string(),
            });
        }

        let data = fs::read(path)?;
        Ok(data)
    }
}
