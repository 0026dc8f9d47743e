//! Calculate command implementation.

use chrono::Utc;
use npbc_core::compute_bill;
use npbc_core::config::types::ResolvedConfig;
use tracing::info;

use super::output::{format_summary, print_json, BillOutput};
use super::{fail, open_store, parse_undelivered_arg, resolve_period};
use crate::CalculateArgs;

const COMMAND: &str = "calculate";

pub fn run(rc: &ResolvedConfig, args: &CalculateArgs) {
    let period = resolve_period(args.period, COMMAND);
    let db = open_store(rc, COMMAND);

    if let Some(ref extra) = args.undelivered {
        let pairs = parse_undelivered_arg(extra).unwrap_or_else(|e| fail(COMMAND, e));
        for (key, string) in pairs {
            if let Err(e) = db.add_undelivered_string(&key, period, &string) {
                fail(COMMAND, e);
            }
        }
    }

    let papers = db.list_papers().unwrap_or_else(|e| fail(COMMAND, e));
    let strings = db.undelivered_strings(period).unwrap_or_else(|e| fail(COMMAND, e));

    let bill = compute_bill(period, &papers, &strings.per_paper, &strings.all_papers)
        .unwrap_or_else(|e| fail(COMMAND, e));
    info!("Calculated {} papers for {}: {:.2}", bill.papers.len(), period, bill.total);

    if args.output.json {
        print_json(&BillOutput::new(&bill, &papers));
    } else {
        print!("{}", format_summary(&bill, &papers));
    }

    if args.no_log {
        return;
    }

    if let Err(e) = db.save_results(&bill, &papers, Utc::now()) {
        fail(COMMAND, e);
    }
    if !args.output.json {
        println!("\nSaved results to logs.");
    }
}
