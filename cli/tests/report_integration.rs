//! Integration tests for the report pipeline on real files.

use std::fs;
use std::path::{Path, PathBuf};

use intraday_pnl_cli::config::Config;
use intraday_pnl_cli::error::Error;
use intraday_pnl_cli::locate;
use intraday_pnl_cli::run::{self, RunOptions};
use rust_decimal_macros::dec;
use tempfile::TempDir;

const ORDERS: &str = "\
Time,Type,Instrument,Product,Qty.,Avg. price,Status
2024-06-03 09:20:01,BUY,X,MIS,100/100,50.00,COMPLETE
2024-06-03 09:21:13,BUY,HDFCBANK,CNC,5/5,1520.00,COMPLETE
2024-06-03 09:40:56,SELL,Y,MIS,10/10,200.00,COMPLETE
2024-06-03 11:02:30,BUY,Y,MIS,10/20,210.00,REJECTED
2024-06-03 11:03:02,BUY,Y,MIS,10/10,210.00,COMPLETE
2024-06-03 14:55:10,SELL,X,MIS,100/100,55.00,COMPLETE
";

fn write_orders(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("orders.csv");
    fs::write(&path, body).unwrap();
    path
}

fn plain() -> RunOptions {
    RunOptions {
        json: false,
        plain: true,
    }
}

fn run_to_string(config: &Config, orders: &Path) -> Result<String, Error> {
    let mut out = Vec::new();
    run::run(config, orders, &plain(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

// ============================================================================
// Happy path
// ============================================================================

#[test]
fn full_day_report() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(&dir, ORDERS);

    let summary = run::summarize(&Config::default(), &orders).unwrap();
    assert_eq!(summary.positions.len(), 2);
    assert_eq!(summary.positions[0].instrument.as_str(), "X");
    assert_eq!(summary.positions[0].net_profit, dec!(494.32));
    assert_eq!(summary.positions[1].instrument.as_str(), "Y");
    assert!(summary.positions[1].net_profit < dec!(-100));
    assert_eq!(
        summary.total_charges,
        summary.positions[0].charges + summary.positions[1].charges
    );

    let text = run_to_string(&Config::default(), &orders).unwrap();
    assert!(text.starts_with("\nX\n    Net P&L : +494.32\n    Turnover: 10500.00\n    ~20%: 1050\n"));
    assert!(text.contains("\nY\n    Net P&L : -"));
    assert!(text.contains("Charges Paid (Included in above P&L calc): -"));
    assert!(!text.contains("HDFCBANK"));
}

#[test]
fn located_default_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(&dir, ORDERS);
    let found = locate::resolve_from(None, vec![dir.path().join("nope.csv"), orders.clone()]).unwrap();
    assert_eq!(found, orders);
    assert!(run_to_string(&Config::default(), &found).is_ok());
}

#[test]
fn json_output() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(&dir, ORDERS);
    let mut out = Vec::new();
    let opts = RunOptions {
        json: true,
        plain: true,
    };
    run::run(&Config::default(), &orders, &opts, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["positions"].as_array().unwrap().len(), 2);
    assert_eq!(value["positions"][0]["tax_reserve"], "1050");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn config_overrides_charges_and_filter() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(
        &dir,
        "h,h,h,h,h,h,h\n\
         t,BUY,X,CNC,100,50,COMPLETE\n\
         t,SELL,X,CNC,100,55,COMPLETE\n\
         t,BUY,Y,MIS,1,10,COMPLETE\n",
    );
    let config_path = dir.path().join("pnl.toml");
    fs::write(
        &config_path,
        r#"
[filter]
product = "CNC"

[charges]
brokerage_rate = "0"
gst_rate = "0"
exchange_txn_rate = "0"
ipf_rate = "0"
sebi_rate = "0"
stamp_duty_rate = "0"
stt_rate = "0"
"#,
    )
    .unwrap();

    let config = Config::load_or_default(Some(&config_path)).unwrap();
    let summary = run::summarize(&config, &orders).unwrap();
    assert_eq!(summary.positions.len(), 1);
    assert_eq!(summary.total_net_profit, dec!(500));
    assert_eq!(summary.total_charges, dec!(0));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn open_position_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(
        &dir,
        "h,h,h,h,h,h,h\n\
         t,BUY,X,MIS,100,50,COMPLETE\n\
         t,SELL,X,MIS,60,55,COMPLETE\n",
    );
    let err = run_to_string(&Config::default(), &orders).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("net quantity for X is 40"));
}

#[test]
fn malformed_row_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(&dir, "h,h,h,h,h,h,h\nt,BUY,X,MIS,100,N/A,COMPLETE\n");
    let err = run::summarize(&Config::default(), &orders).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.to_string(), "malformed order row: line 2: invalid price 'N/A'");
}

#[test]
fn oversized_row_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let orders = write_orders(
        &dir,
        "h,h,h,h,h,h,h\nt,BUY,X,MIS,2,79228162514264337593543950335,COMPLETE\n",
    );
    let err = run::summarize(&Config::default(), &orders).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().starts_with("malformed order row: line 2: trade value 2 x "));
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = locate::resolve(Some(&dir.path().join("orders.csv")), "orders.csv").unwrap_err();
    assert!(matches!(err, Error::InputNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
}
