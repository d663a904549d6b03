use budget_sim::config::toml_config::TomlConfig;
use budget_sim::core::ConfigProvider;
use budget_sim::utils::error::BudgetError;
use budget_sim::{BudgetModel, CliConfig, CsvWorkbook};
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_for(workbook_dir: &Path) -> CliConfig {
    CliConfig {
        workbook: Some(workbook_dir.to_str().unwrap().to_string()),
        config_file: None,
        format: None,
        verbose: false,
        services_sheet: None,
        human_capital_sheet: None,
    }
}

#[test]
fn test_load_decodes_both_sheets_with_coercion() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("workbook");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Services and Products.csv"),
        "Description,Quantity,Unit Cost USD,Total Cost USD\n\
         Cloud hosting,3,12.2500,36.7500\n\
         Licenses,0,99.0000,0.0000\n",
    )
    .unwrap();
    fs::write(
        dir.join("Human Capital and Operations.csv"),
        "Description,Amount USD\n\
         Lead engineer,\"$5,000.00\"\n\
         Office lease,1200.50\n\
         Contingency,pending\n\
         Travel,\n",
    )
    .unwrap();

    let config = config_for(&dir);
    let workbook = CsvWorkbook::new(dir.to_str().unwrap().to_string());
    let model = BudgetModel::load(&workbook, &config).unwrap();

    assert_eq!(model.services().len(), 2);
    assert_eq!(model.services()[0].total_cost(), dec!(36.7500));
    assert_eq!(model.services()[1].total_cost(), dec!(0));

    // Currency formatting coerces, junk and blanks are missing
    let amounts: Vec<_> = model
        .human_capital()
        .iter()
        .map(|row| row.amount_usd)
        .collect();
    assert_eq!(
        amounts,
        vec![Some(dec!(5000.00)), Some(dec!(1200.50)), None, None]
    );

    let summary = model.summarize();
    assert_eq!(summary.services_total, dec!(36.7500));
    assert_eq!(summary.human_capital_total, dec!(6200.50));
}

#[test]
fn test_missing_required_column_fails_the_load() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("workbook");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Services and Products.csv"),
        "Description,Count,Unit Cost USD\nCloud hosting,2,10.00\n",
    )
    .unwrap();
    fs::write(
        dir.join("Human Capital and Operations.csv"),
        "Description,Amount USD\nLead engineer,100\n",
    )
    .unwrap();

    let config = config_for(&dir);
    let workbook = CsvWorkbook::new(dir.to_str().unwrap().to_string());
    let err = BudgetModel::load(&workbook, &config).unwrap_err();

    assert!(matches!(
        err,
        BudgetError::MissingColumnError { ref column, .. } if column == "Quantity"
    ));
}

#[test]
fn test_malformed_service_quantity_fails_the_load() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("workbook");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Services and Products.csv"),
        "Description,Quantity,Unit Cost USD\nCloud hosting,two,10.00\n",
    )
    .unwrap();
    fs::write(
        dir.join("Human Capital and Operations.csv"),
        "Description,Amount USD\nLead engineer,100\n",
    )
    .unwrap();

    let config = config_for(&dir);
    let workbook = CsvWorkbook::new(dir.to_str().unwrap().to_string());
    let err = BudgetModel::load(&workbook, &config).unwrap_err();

    assert!(matches!(err, BudgetError::RowDecodeError { row: 2, .. }));
}

#[test]
fn test_sheet_names_can_be_overridden_via_file_config() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("workbook");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Servicios y Productos.csv"),
        "Description,Quantity,Unit Cost USD\nHospedaje,2,10.00\n",
    )
    .unwrap();
    fs::write(
        dir.join("Capital Humano y Operacion.csv"),
        "Description,Amount USD\nIngeniera,900\n",
    )
    .unwrap();

    let file = TomlConfig::from_toml_str(&format!(
        r#"
        [workbook]
        path = "{}"
        services_sheet = "Servicios y Productos"
        human_capital_sheet = "Capital Humano y Operacion"
        "#,
        dir.to_str().unwrap().replace('\\', "/")
    ))
    .unwrap();
    file.validate_config().unwrap();

    let config = CliConfig {
        workbook: None,
        config_file: None,
        format: None,
        verbose: false,
        services_sheet: None,
        human_capital_sheet: None,
    }
    .merged_with(file);

    let workbook = CsvWorkbook::new(config.workbook_path().to_string());
    let model = BudgetModel::load(&workbook, &config).unwrap();

    let summary = model.summarize();
    assert_eq!(summary.services_total, dec!(20.00));
    assert_eq!(summary.human_capital_total, dec!(900));
}
