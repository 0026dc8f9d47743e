//! Shared output formatting for bill commands.

use std::collections::HashMap;

use npbc_core::store::CostRecord;
use npbc_core::calendar::WEEKDAY_NAMES;
use npbc_core::{BillResult, Paper};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Human-readable summary of a calculated bill.
///
/// Papers missing from `papers` are listed under their key.
pub fn format_summary(bill: &BillResult, papers: &[Paper]) -> String {
    let names: HashMap<&str, &str> =
        papers.iter().map(|p| (p.key.as_str(), p.name.as_str())).collect();

    let mut out = format!("For {}\n\n", bill.period);
    out.push_str(&format!("TOTAL: {:.2}\n", bill.total));
    for paper_bill in &bill.papers {
        let name =
            names.get(paper_bill.key.as_str()).copied().unwrap_or(paper_bill.key.as_str());
        out.push_str(&format!("{name}: {:.2}\n", paper_bill.cost));
    }
    out
}

/// Calculated bill for JSON output.
#[derive(Debug, Serialize)]
pub struct BillOutput {
    pub month: u32,
    pub year: i32,
    pub total: f64,
    pub papers: Vec<PaperBillOutput>,
}

#[derive(Debug, Serialize)]
pub struct PaperBillOutput {
    pub key: String,
    pub name: String,
    pub cost: f64,
    pub undelivered: Vec<String>,
}

impl BillOutput {
    pub fn new(bill: &BillResult, papers: &[Paper]) -> Self {
        let papers = bill
            .papers
            .iter()
            .map(|paper_bill| PaperBillOutput {
                key: paper_bill.key.clone(),
                name: papers
                    .iter()
                    .find(|p| p.key == paper_bill.key)
                    .map_or_else(|| paper_bill.key.clone(), |p| p.name.clone()),
                cost: paper_bill.cost,
                undelivered: paper_bill
                    .undelivered
                    .iter()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .collect(),
            })
            .collect();

        Self {
            month: bill.period.month(),
            year: bill.period.year(),
            total: bill.total,
            papers,
        }
    }
}

/// Paper and its weekly schedule for JSON output.
#[derive(Debug, Serialize)]
pub struct PaperOutput {
    pub key: String,
    pub name: String,
    pub days: Vec<DayOutput>,
}

#[derive(Debug, Serialize)]
pub struct DayOutput {
    pub day: &'static str,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl From<&Paper> for PaperOutput {
    fn from(paper: &Paper) -> Self {
        let days = WEEKDAY_NAMES
            .iter()
            .zip(paper.schedule.days())
            .map(|(name, day)| DayOutput {
                day: *name,
                delivered: day.delivered,
                price: day.delivered.then_some(day.price),
            })
            .collect();

        Self { key: paper.key.clone(), name: paper.name.clone(), days }
    }
}

#[derive(Tabled)]
struct PaperRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Days")]
    days: String,
    #[tabled(rename = "Prices")]
    prices: String,
}

pub fn print_papers_table(papers: &[Paper]) {
    if papers.is_empty() {
        println!("(no papers registered)");
        return;
    }

    let rows: Vec<PaperRow> = papers
        .iter()
        .map(|paper| PaperRow {
            key: paper.key.clone(),
            name: paper.name.clone(),
            days: paper.schedule.delivery_flags(),
            prices: paper
                .schedule
                .days()
                .iter()
                .filter(|day| day.delivered)
                .map(|day| format!("{:.2}", day.price))
                .collect::<Vec<_>>()
                .join(";"),
        })
        .collect();

    println!("{}", Table::new(&rows).with(Style::rounded()));
}

/// Recorded cost line for JSON output.
#[derive(Debug, Serialize)]
pub struct CostRecordOutput {
    pub timestamp: String,
    pub month: u32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub name: String,
    pub cost: f64,
}

impl From<&CostRecord> for CostRecordOutput {
    fn from(record: &CostRecord) -> Self {
        Self {
            timestamp: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            month: record.period.month(),
            year: record.period.year(),
            key: record.paper_key.clone(),
            name: record.name.clone(),
            cost: record.cost,
        }
    }
}

#[derive(Tabled)]
struct CostRow {
    #[tabled(rename = "Recorded")]
    recorded: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Paper")]
    name: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

pub fn print_history_table(records: &[CostRecord]) {
    if records.is_empty() {
        println!("(no recorded bills)");
        return;
    }

    let rows: Vec<CostRow> = records
        .iter()
        .map(|record| CostRow {
            recorded: record.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            month: record.period.to_string(),
            name: record.name.clone(),
            cost: format!("{:.2}", record.cost),
        })
        .collect();

    println!("{}", Table::new(&rows).with(Style::rounded()));
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}
