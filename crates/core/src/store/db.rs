//! Database connection and operations.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use tracing::{debug, info};

use super::schema::{SchemaError, init_schema};
use super::types::{CostRecord, UndeliveredRecord, UndeliveredStrings};
use crate::billing::BillResult;
use crate::calendar::BillingPeriod;
use crate::papers::{ALL_PAPERS_KEY, DaySchedule, Paper, Schedule};
use crate::undelivered::{ExpressionError, parse};

const RECORD_DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("failed to create data directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Paper already exists: {0}")]
    PaperExists(String),

    #[error("Paper not found: {0}")]
    PaperNotFound(String),

    #[error("'{0}' is reserved for undelivered strings that apply to every paper")]
    ReservedKey(String),

    #[error(transparent)]
    InvalidExpression(#[from] ExpressionError),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Bill database handle.
pub struct BillDb {
    conn: Connection,
}

impl BillDb {
    /// Open or create a database at the given path, creating its directory.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;
        init_schema(&conn)?;
        debug!("Opened bill database at {}", path.display());
        Ok(Self { conn })
    }

    /// Create an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Papers
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a new paper.
    pub fn add_paper(&self, paper: &Paper) -> Result<(), StoreError> {
        if paper.key == ALL_PAPERS_KEY {
            return Err(StoreError::ReservedKey(paper.key.clone()));
        }
        if self.paper_exists(&paper.key)? {
            return Err(StoreError::PaperExists(paper.key.clone()));
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO papers (key, name) VALUES (?1, ?2)",
            params![paper.key, paper.name],
        )?;
        insert_schedule(&tx, &paper.key, &paper.schedule)?;
        tx.commit()?;

        info!("Added paper {}", paper.key);
        Ok(())
    }

    /// Change a paper's name and/or schedule.
    pub fn edit_paper(
        &self,
        key: &str,
        name: Option<&str>,
        schedule: Option<&Schedule>,
    ) -> Result<(), StoreError> {
        if !self.paper_exists(key)? {
            return Err(StoreError::PaperNotFound(key.to_string()));
        }

        let tx = self.conn.unchecked_transaction()?;
        if let Some(name) = name {
            tx.execute("UPDATE papers SET name = ?1 WHERE key = ?2", params![name, key])?;
        }
        if let Some(schedule) = schedule {
            tx.execute("DELETE FROM paper_days WHERE paper_key = ?1", [key])?;
            insert_schedule(&tx, key, schedule)?;
        }
        tx.commit()?;

        info!("Edited paper {}", key);
        Ok(())
    }

    /// Remove a paper, its schedule and its undelivered strings.
    pub fn delete_paper(&self, key: &str) -> Result<(), StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let rows = tx.execute("DELETE FROM papers WHERE key = ?1", [key])?;
        if rows == 0 {
            return Err(StoreError::PaperNotFound(key.to_string()));
        }
        tx.execute("DELETE FROM undelivered_strings WHERE paper_key = ?1", [key])?;
        tx.commit()?;

        info!("Deleted paper {}", key);
        Ok(())
    }

    pub fn paper_exists(&self, key: &str) -> Result<bool, StoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT COUNT(*) > 0 FROM papers WHERE key = ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Get a paper by its key.
    pub fn get_paper(&self, key: &str) -> Result<Option<Paper>, StoreError> {
        let name: Option<String> = self
            .conn
            .query_row("SELECT name FROM papers WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;

        match name {
            Some(name) => {
                let schedule = self.load_schedule(key)?;
                Ok(Some(Paper::new(key, name, schedule)))
            }
            None => Ok(None),
        }
    }

    /// All papers, ordered by key.
    pub fn list_papers(&self) -> Result<Vec<Paper>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key, name FROM papers ORDER BY key")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(key, name)| -> Result<Paper, StoreError> {
                let schedule = self.load_schedule(&key)?;
                Ok(Paper::new(key, name, schedule))
            })
            .collect()
    }

    fn load_schedule(&self, key: &str) -> Result<Schedule, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT delivered, price FROM paper_days WHERE paper_key = ?1 ORDER BY day_id",
        )?;
        let days = stmt
            .query_map([key], |row| {
                Ok(DaySchedule { delivered: row.get(0)?, price: row.get(1)? })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Schedule::from_entries(days)
            .map_err(|e| StoreError::InvalidData(format!("schedule of '{key}': {e}")))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Undelivered strings
    // ─────────────────────────────────────────────────────────────────────────

    /// Append an undelivered string for `key` (or every paper, for `all`).
    ///
    /// The string must be valid syntax. Earlier strings for the same paper and
    /// period are kept.
    pub fn add_undelivered_string(
        &self,
        key: &str,
        period: BillingPeriod,
        string: &str,
    ) -> Result<(), StoreError> {
        parse(string)?;

        if key != ALL_PAPERS_KEY && !self.paper_exists(key)? {
            return Err(StoreError::PaperNotFound(key.to_string()));
        }

        self.conn.execute(
            "INSERT INTO undelivered_strings (paper_key, month, year, string)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, period.month(), period.year(), string.trim()],
        )?;

        debug!("Stored undelivered string '{}' for {} in {}", string.trim(), key, period);
        Ok(())
    }

    /// Every undelivered string stored for `period`.
    pub fn undelivered_strings(
        &self,
        period: BillingPeriod,
    ) -> Result<UndeliveredStrings, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT paper_key, string FROM undelivered_strings
             WHERE month = ?1 AND year = ?2 ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![period.month(), period.year()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut strings = UndeliveredStrings::default();
        for (key, string) in rows {
            strings.push(&key, string);
        }
        Ok(strings)
    }

    /// Clear stored strings for `period`, for one key or for all keys.
    /// Returns the number of strings removed.
    pub fn delete_undelivered_strings(
        &self,
        period: BillingPeriod,
        key: Option<&str>,
    ) -> Result<usize, StoreError> {
        let rows = match key {
            Some(key) => self.conn.execute(
                "DELETE FROM undelivered_strings
                 WHERE month = ?1 AND year = ?2 AND paper_key = ?3",
                params![period.month(), period.year(), key],
            )?,
            None => self.conn.execute(
                "DELETE FROM undelivered_strings WHERE month = ?1 AND year = ?2",
                params![period.month(), period.year()],
            )?,
        };
        info!("Deleted {} undelivered strings for {}", rows, period);
        Ok(rows)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Record the costs and undelivered dates of a calculated bill.
    ///
    /// `papers` supplies display names; a paper missing from it is recorded
    /// under its key.
    pub fn save_results(
        &self,
        bill: &BillResult,
        papers: &[Paper],
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let names: HashMap<&str, &str> =
            papers.iter().map(|p| (p.key.as_str(), p.name.as_str())).collect();
        let ts = timestamp.to_rfc3339();
        let (month, year) = (bill.period.month(), bill.period.year());

        let tx = self.conn.unchecked_transaction()?;
        for paper_bill in &bill.papers {
            let name = names
                .get(paper_bill.key.as_str())
                .copied()
                .unwrap_or(paper_bill.key.as_str());
            tx.execute(
                "INSERT INTO cost_records (timestamp, month, year, paper_key, name, cost)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![ts, month, year, paper_bill.key, name, paper_bill.cost],
            )?;

            if !paper_bill.undelivered.is_empty() {
                let dates = paper_bill
                    .undelivered
                    .iter()
                    .map(|d| d.format(RECORD_DATE_FORMAT).to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                tx.execute(
                    "INSERT INTO undelivered_records (timestamp, month, year, paper_key, dates)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![ts, month, year, paper_bill.key, dates],
                )?;
            }
        }
        tx.execute(
            "INSERT INTO cost_records (timestamp, month, year, paper_key, name, cost)
             VALUES (?1, ?2, ?3, NULL, 'TOTAL', ?4)",
            params![ts, month, year, bill.total],
        )?;
        tx.commit()?;

        info!("Saved results for {}", bill.period);
        Ok(())
    }

    /// Recorded costs, newest first, optionally limited to one period.
    pub fn cost_history(
        &self,
        period: Option<BillingPeriod>,
    ) -> Result<Vec<CostRecord>, StoreError> {
        let (sql, filter) = period_filter(
            "SELECT timestamp, month, year, paper_key, name, cost FROM cost_records",
            period,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(filter), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(ts, month, year, paper_key, name, cost)| -> Result<CostRecord, StoreError> {
                Ok(CostRecord {
                    timestamp: parse_timestamp(&ts)?,
                    period: parse_period(month, year)?,
                    paper_key,
                    name,
                    cost,
                })
            })
            .collect()
    }

    /// Recorded undelivered dates, newest first, optionally limited to one period.
    pub fn undelivered_history(
        &self,
        period: Option<BillingPeriod>,
    ) -> Result<Vec<UndeliveredRecord>, StoreError> {
        let (sql, filter) = period_filter(
            "SELECT timestamp, month, year, paper_key, dates FROM undelivered_records",
            period,
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(filter), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, i32>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(ts, month, year, paper_key, dates)| -> Result<UndeliveredRecord, StoreError> {
                let dates = dates
                    .split(',')
                    .map(|d| {
                        NaiveDate::parse_from_str(d, RECORD_DATE_FORMAT).map_err(|e| {
                            StoreError::InvalidData(format!("recorded date '{d}': {e}"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(UndeliveredRecord {
                    timestamp: parse_timestamp(&ts)?,
                    period: parse_period(month, year)?,
                    paper_key,
                    dates,
                })
            })
            .collect()
    }
}

fn insert_schedule(
    conn: &Connection,
    key: &str,
    schedule: &Schedule,
) -> Result<(), StoreError> {
    for (day_id, day) in schedule.days().iter().enumerate() {
        // SQLite stores NaN as NULL; an ignored price is written as zero.
        let price = if day.delivered { day.price } else { 0.0 };
        conn.execute(
            "INSERT INTO paper_days (paper_key, day_id, delivered, price)
             VALUES (?1, ?2, ?3, ?4)",
            params![key, day_id, day.delivered, price],
        )?;
    }
    Ok(())
}

fn period_filter(select: &str, period: Option<BillingPeriod>) -> (String, Vec<i64>) {
    match period {
        Some(p) => (
            format!("{select} WHERE month = ?1 AND year = ?2 ORDER BY id DESC"),
            vec![i64::from(p.month()), i64::from(p.year())],
        ),
        None => (format!("{select} ORDER BY id DESC"), Vec::new()),
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(s)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData(format!("timestamp '{s}': {e}")))
}

fn parse_period(month: u32, year: i32) -> Result<BillingPeriod, StoreError> {
    BillingPeriod::new(month, year)
        .map_err(|e| StoreError::InvalidData(format!("recorded period: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::compute_bill;
    use chrono::TimeZone;

    fn sample_paper(key: &str) -> Paper {
        let schedule =
            Schedule::from_flags_and_prices("YYYYYYN", &[2.0, 2.0, 2.0, 2.0, 2.0, 3.0])
                .unwrap();
        Paper::new(key, format!("The {key}"), schedule)
    }

    fn jan_2024() -> BillingPeriod {
        BillingPeriod::new(1, 2024).unwrap()
    }

    #[test]
    fn test_add_and_get_paper() {
        let db = BillDb::open_in_memory().unwrap();
        let paper = sample_paper("times");

        db.add_paper(&paper).unwrap();

        let retrieved = db.get_paper("times").unwrap().unwrap();
        assert_eq!(retrieved, paper);
        assert!(db.get_paper("missing").unwrap().is_none());
    }

    #[test]
    fn test_add_duplicate_paper_fails() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("times")).unwrap();

        let err = db.add_paper(&sample_paper("times")).unwrap_err();
        assert!(matches!(err, StoreError::PaperExists(k) if k == "times"));
    }

    #[test]
    fn test_all_is_reserved() {
        let db = BillDb::open_in_memory().unwrap();
        let err = db.add_paper(&sample_paper(ALL_PAPERS_KEY)).unwrap_err();
        assert!(matches!(err, StoreError::ReservedKey(_)));
    }

    #[test]
    fn test_unscheduled_day_price_round_trips_as_zero() {
        let db = BillDb::open_in_memory().unwrap();
        let mut days = [DaySchedule::delivered(1.0); 7];
        days[6] = DaySchedule { delivered: false, price: f64::NAN };
        let paper = Paper::new("x", "X", Schedule::new(days).unwrap());

        db.add_paper(&paper).unwrap();
        let retrieved = db.get_paper("x").unwrap().unwrap();
        assert_eq!(retrieved.schedule.days()[6], DaySchedule::not_delivered());
    }

    #[test]
    fn test_edit_paper() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("times")).unwrap();

        let weekend = Schedule::from_flags_and_prices("NNNNNYY", &[5.0, 6.0]).unwrap();
        db.edit_paper("times", Some("Weekend Times"), Some(&weekend)).unwrap();

        let retrieved = db.get_paper("times").unwrap().unwrap();
        assert_eq!(retrieved.name, "Weekend Times");
        assert_eq!(retrieved.schedule, weekend);

        let err = db.edit_paper("missing", Some("x"), None).unwrap_err();
        assert!(matches!(err, StoreError::PaperNotFound(_)));
    }

    #[test]
    fn test_delete_paper_removes_its_strings() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("times")).unwrap();
        db.add_undelivered_string("times", jan_2024(), "1-3").unwrap();
        db.add_undelivered_string(ALL_PAPERS_KEY, jan_2024(), "20").unwrap();

        db.delete_paper("times").unwrap();

        assert!(db.get_paper("times").unwrap().is_none());
        let strings = db.undelivered_strings(jan_2024()).unwrap();
        assert!(strings.per_paper.is_empty());
        assert_eq!(strings.all_papers, vec!["20".to_string()]);

        let err = db.delete_paper("times").unwrap_err();
        assert!(matches!(err, StoreError::PaperNotFound(_)));
    }

    #[test]
    fn test_list_papers_sorted_by_key() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("zeta")).unwrap();
        db.add_paper(&sample_paper("alpha")).unwrap();

        let keys: Vec<_> = db.list_papers().unwrap().into_iter().map(|p| p.key).collect();
        assert_eq!(keys, ["alpha", "zeta"]);
    }

    #[test]
    fn test_undelivered_strings_accumulate() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("times")).unwrap();

        db.add_undelivered_string("times", jan_2024(), "1-3").unwrap();
        db.add_undelivered_string("times", jan_2024(), " mondays ").unwrap();
        db.add_undelivered_string(ALL_PAPERS_KEY, jan_2024(), "26").unwrap();
        db.add_undelivered_string("times", BillingPeriod::new(2, 2024).unwrap(), "5")
            .unwrap();

        let strings = db.undelivered_strings(jan_2024()).unwrap();
        assert_eq!(
            strings.per_paper.get("times").unwrap(),
            &vec!["1-3".to_string(), "mondays".to_string()]
        );
        assert_eq!(strings.all_papers, vec!["26".to_string()]);
    }

    #[test]
    fn test_invalid_or_unknown_strings_are_rejected() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("times")).unwrap();

        let err = db.add_undelivered_string("times", jan_2024(), "1, , 40-x").unwrap_err();
        assert!(matches!(err, StoreError::InvalidExpression(_)));

        let err = db.add_undelivered_string("ghost", jan_2024(), "1").unwrap_err();
        assert!(matches!(err, StoreError::PaperNotFound(_)));

        assert!(db.undelivered_strings(jan_2024()).unwrap().is_empty());
    }

    #[test]
    fn test_delete_undelivered_strings() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("a")).unwrap();
        db.add_paper(&sample_paper("b")).unwrap();
        db.add_undelivered_string("a", jan_2024(), "1").unwrap();
        db.add_undelivered_string("b", jan_2024(), "2").unwrap();
        db.add_undelivered_string("b", jan_2024(), "3").unwrap();

        assert_eq!(db.delete_undelivered_strings(jan_2024(), Some("b")).unwrap(), 2);
        let strings = db.undelivered_strings(jan_2024()).unwrap();
        assert!(strings.per_paper.contains_key("a"));
        assert!(!strings.per_paper.contains_key("b"));

        assert_eq!(db.delete_undelivered_strings(jan_2024(), None).unwrap(), 1);
        assert!(db.undelivered_strings(jan_2024()).unwrap().is_empty());
    }

    #[test]
    fn test_save_results_and_history() {
        let db = BillDb::open_in_memory().unwrap();
        db.add_paper(&sample_paper("times")).unwrap();
        db.add_undelivered_string("times", jan_2024(), "mondays").unwrap();

        let papers = db.list_papers().unwrap();
        let strings = db.undelivered_strings(jan_2024()).unwrap();
        let bill =
            compute_bill(jan_2024(), &papers, &strings.per_paper, &strings.all_papers)
                .unwrap();

        let ts = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        db.save_results(&bill, &papers, ts).unwrap();

        let costs = db.cost_history(Some(jan_2024())).unwrap();
        assert_eq!(costs.len(), 2);
        // Newest first: the total is written last.
        assert_eq!(costs[0].paper_key, None);
        assert_eq!(costs[0].name, "TOTAL");
        assert_eq!(costs[0].cost, bill.total);
        assert_eq!(costs[1].paper_key.as_deref(), Some("times"));
        assert_eq!(costs[1].name, "The times");
        assert_eq!(costs[1].timestamp, ts);

        let records = db.undelivered_history(None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dates.len(), 5);
        assert_eq!(records[0].dates[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(db.cost_history(Some(BillingPeriod::new(2, 2024).unwrap())).unwrap().is_empty());
    }
}
