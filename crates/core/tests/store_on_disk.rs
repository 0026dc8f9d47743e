use npbc_core::store::{BillDb, SCHEMA_VERSION};
use npbc_core::{ALL_PAPERS_KEY, BillingPeriod, Paper, Schedule, compute_bill};
use tempfile::tempdir;

#[test]
fn data_survives_reopening() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("nested/dir/npbc.db");
    let period = BillingPeriod::new(3, 2024).unwrap();

    {
        let db = BillDb::open(&path).unwrap();
        let schedule = Schedule::from_flags_and_prices("YYYYYYY", &[1.5; 7]).unwrap();
        db.add_paper(&Paper::new("herald", "The Herald", schedule)).unwrap();
        db.add_undelivered_string("herald", period, "sundays").unwrap();
        db.add_undelivered_string(ALL_PAPERS_KEY, period, "1-2").unwrap();
    }

    assert!(path.exists());
    assert!(SCHEMA_VERSION >= 1);

    let db = BillDb::open(&path).unwrap();
    let papers = db.list_papers().unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].name, "The Herald");

    let strings = db.undelivered_strings(period).unwrap();
    let bill = compute_bill(period, &papers, &strings.per_paper, &strings.all_papers).unwrap();

    // March 2024: 31 days, 5 Sundays (3, 10, 17, 24, 31), plus the 1st and 2nd.
    assert_eq!(bill.get("herald").unwrap().undelivered.len(), 7);
    assert_eq!(bill.total, 24.0 * 1.5);
}
