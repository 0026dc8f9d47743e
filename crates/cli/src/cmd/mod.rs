pub mod calculate;
pub mod check;
pub mod doctor;
pub mod history;
pub mod output;
pub mod paper;
pub mod undelivered;

use std::fmt::Display;

use chrono::Local;
use npbc_core::config::types::ResolvedConfig;
use npbc_core::store::BillDb;
use npbc_core::BillingPeriod;

use crate::PeriodArgs;

/// Print a failure for `command` and exit with status 1.
pub fn fail(command: &str, err: impl Display) -> ! {
    println!("FAIL npbc {command}");
    println!("{err}");
    std::process::exit(1);
}

pub fn open_store(rc: &ResolvedConfig, command: &str) -> BillDb {
    BillDb::open(&rc.database).unwrap_or_else(|e| fail(command, e))
}

/// Period from `--month`/`--year`, filling gaps relative to today.
pub fn resolve_period(args: PeriodArgs, command: &str) -> BillingPeriod {
    let today = Local::now().date_naive();
    BillingPeriod::from_parts(args.month, args.year, today).unwrap_or_else(|e| fail(command, e))
}

/// Split `"key:string;key:string"` into (key, string) pairs.
pub fn parse_undelivered_arg(input: &str) -> Result<Vec<(String, String)>, String> {
    input
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(':') {
            Some((key, string)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), string.trim().to_string()))
            }
            _ => Err(format!("expected 'key:string', got '{part}'")),
        })
        .collect()
}
