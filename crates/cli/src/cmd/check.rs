use chrono::Local;
use npbc_core::calendar::WEEKDAY_NAMES;
use npbc_core::undelivered::{count_by_weekday, parse};
use npbc_core::{resolve, BillingPeriod};

use super::fail;
use crate::CheckArgs;

pub fn run(args: &CheckArgs) {
    if let Err(e) = parse(&args.string) {
        fail("check", e);
    }

    println!("OK   npbc check");
    println!("'{}' is a valid undelivered string", args.string.trim());

    let Some(month) = args.month else {
        return;
    };
    let today = Local::now().date_naive();
    let period = BillingPeriod::from_parts(Some(month), args.year, today)
        .unwrap_or_else(|e| fail("check", e));
    let dates = resolve(&args.string, period).unwrap_or_else(|e| fail("check", e));

    println!();
    println!("{} dates in {}:", dates.len(), period);
    for date in &dates {
        println!("  {}", date.format("%a %d/%m/%Y"));
    }

    let counts = count_by_weekday(&dates);
    let by_day: Vec<String> = WEEKDAY_NAMES
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(name, count)| format!("{name}: {count}"))
        .collect();
    if !by_day.is_empty() {
        println!("by weekday: {}", by_day.join(", "));
    }
}
