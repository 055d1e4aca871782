//! Integration tests for the CLI interface
//!
//! Drives the binary against CSV worksheets in a temporary directory

mod common;

use common::TestContextBuilder;
use predicates::prelude::*;

#[test]
fn test_cli_help_flag() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();
    ctx.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_invalid_command() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();
    ctx.command()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_init_creates_worksheets() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();
    ctx.command_with_data()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("sales.csv"));

    assert_eq!(
        ctx.read_worksheet("stock").unwrap(),
        "bacon,chicken,egg,ham,tuna,turkey\n"
    );

    ctx.command_with_data()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exist"));
}

#[test]
fn test_run_records_sales_and_surplus() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_stock([10, 10, 10, 10, 10, 10])
        .build()
        .unwrap();

    ctx.command_with_data()
        .arg("run")
        .write_stdin("5,5,5,5,5,5\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to love sandwiches data automation!"))
        .stdout(predicate::str::contains("Data is valid!"))
        .stdout(predicate::str::contains("surplus worksheet updated successfully."));

    assert_eq!(ctx.worksheet_rows("sales").unwrap(), vec!["5,5,5,5,5,5"]);
    assert_eq!(ctx.worksheet_rows("surplus").unwrap(), vec!["5,5,5,5,5,5"]);
    // One sales entry is short of the forecast window, stock is untouched
    assert_eq!(ctx.worksheet_rows("stock").unwrap(), vec!["10,10,10,10,10,10"]);
}

#[test]
fn test_default_command_is_run() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_stock([50, 40, 30, 20, 10, 5])
        .build()
        .unwrap();

    ctx.command_with_data()
        .write_stdin("10,20,30,40,50,6\n")
        .assert()
        .success();

    assert_eq!(
        ctx.worksheet_rows("surplus").unwrap(),
        vec!["40,20,0,-20,-40,-1"]
    );
}

#[test]
fn test_run_reprompts_on_invalid_input() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_stock([10; 6])
        .build()
        .unwrap();

    ctx.command_with_data()
        .arg("run")
        .write_stdin("1,2,3\nabc\n1,1,1,1,1,1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Invalid data: Exactly 6 values required. You provided 3, please try again.",
        ))
        .stdout(predicate::str::contains("Invalid data: 'abc' is not a whole number"));

    assert_eq!(ctx.worksheet_rows("sales").unwrap(), vec!["1,1,1,1,1,1"]);
}

#[test]
fn test_run_forecasts_stock_from_history() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_sales([10; 6])
        .with_sales([10; 6])
        .with_sales([10; 6])
        .with_sales([10; 6])
        .with_stock([12; 6])
        .build()
        .unwrap();

    ctx.command_with_data()
        .arg("run")
        .write_stdin("10,10,10,10,10,10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculating stock data..."))
        .stdout(predicate::str::contains("Stock for next market: [11, 11, 11, 11, 11, 11]"));

    assert_eq!(
        ctx.worksheet_rows("stock").unwrap(),
        vec!["12,12,12,12,12,12", "11,11,11,11,11,11"]
    );
}

#[test]
fn test_no_forecast_leaves_stock_alone() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_sales([10; 6])
        .with_sales([10; 6])
        .with_sales([10; 6])
        .with_sales([10; 6])
        .with_stock([12; 6])
        .build()
        .unwrap();

    ctx.command_with_data()
        .args(["run", "--no-forecast"])
        .write_stdin("10,10,10,10,10,10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calculating stock data...").not());

    assert_eq!(ctx.worksheet_rows("stock").unwrap().len(), 1);
}

#[test]
fn test_run_fails_when_input_closes() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_stock([10; 6])
        .build()
        .unwrap();

    ctx.command_with_data()
        .arg("run")
        .write_stdin("not,numbers\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));

    assert!(ctx.worksheet_rows("sales").unwrap().is_empty());
}

#[test]
fn test_run_fails_without_worksheets() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();

    ctx.command_with_data()
        .arg("run")
        .write_stdin("1,1,1,1,1,1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worksheet not found: sales"));
}

#[test]
fn test_run_fails_on_empty_stock() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_worksheets()
        .build()
        .unwrap();

    ctx.command_with_data()
        .arg("run")
        .write_stdin("1,1,1,1,1,1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("stock worksheet has no entries"));

    // The sales append is not rolled back
    assert_eq!(ctx.worksheet_rows("sales").unwrap(), vec!["1,1,1,1,1,1"]);
}

#[test]
fn test_show_prints_last_rows() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_sales([1; 6])
        .with_sales([2; 6])
        .with_sales([3; 6])
        .build()
        .unwrap();

    ctx.command_with_data()
        .args(["show", "sales", "--last", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sales (last 2 of its entries)"))
        .stdout(predicate::str::contains("   bacon  chicken"))
        .stdout(predicate::str::contains("       3"));
}

#[test]
fn test_show_rejects_unknown_worksheet() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_worksheets()
        .build()
        .unwrap();

    ctx.command_with_data()
        .args(["show", "orders"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown worksheet"));
}

#[test]
fn test_config_file_sets_data_dir_and_forecast() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_sales([30; 6])
        .with_stock([10; 6])
        .build()
        .unwrap();
    let config = format!(
        "[storage.file]\ndata_dir = {:?}\n\n[forecast]\nwindow = 2\n",
        ctx.data_dir().display().to_string()
    );
    std::fs::write(ctx.path().join("love-sandwiches.toml"), config).unwrap();

    ctx.command()
        .arg("run")
        .write_stdin("10,10,10,10,10,10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stock for next market: [22, 22, 22, 22, 22, 22]"));
}

#[test]
fn test_bad_config_file_is_reported() {
    let ctx = TestContextBuilder::new()
        .unwrap()
        .with_file("broken.toml", "[forecast]\nwindow = \"lots\"\n")
        .build()
        .unwrap();

    ctx.command()
        .args(["--config", "broken.toml", "run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_sheets_backend_requires_credentials() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();

    ctx.command()
        .args(["--backend", "sheets", "run"])
        .write_stdin("1,1,1,1,1,1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("spreadsheet_id"));
}

#[test]
fn test_memory_backend_is_refused() {
    let ctx = TestContextBuilder::new().unwrap().build().unwrap();

    ctx.command()
        .args(["--backend", "memory", "run"])
        .write_stdin("1,1,1,1,1,1\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("memory backend starts empty"));

    ctx.command()
        .args(["--backend", "memory", "show", "stock"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("memory backend starts empty"));
}
