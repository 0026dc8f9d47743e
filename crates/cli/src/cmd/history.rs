use npbc_core::config::types::ResolvedConfig;

use super::output::{print_history_table, print_json, CostRecordOutput};
use super::{fail, open_store, resolve_period};
use crate::HistoryArgs;

pub fn run(rc: &ResolvedConfig, args: &HistoryArgs) {
    let period = (!args.all).then(|| resolve_period(args.period, "history"));
    let db = open_store(rc, "history");
    let records = db.cost_history(period).unwrap_or_else(|e| fail("history", e));

    if args.output.json {
        let out: Vec<CostRecordOutput> = records.iter().map(CostRecordOutput::from).collect();
        print_json(&out);
    } else {
        print_history_table(&records);
    }
}
