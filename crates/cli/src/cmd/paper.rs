//! Paper registry commands.

use npbc_core::config::types::ResolvedConfig;
use npbc_core::papers::parse_prices;
use npbc_core::{Paper, Schedule, ScheduleError};

use super::output::{print_json, print_papers_table, PaperOutput};
use super::{fail, open_store};
use crate::{AddPaperArgs, EditPaperArgs, OutputArgs};

fn parse_schedule(days: &str, prices: &str) -> Result<Schedule, ScheduleError> {
    let prices = parse_prices(prices)?;
    Schedule::from_flags_and_prices(days, &prices)
}

pub fn add(rc: &ResolvedConfig, args: &AddPaperArgs) {
    let schedule =
        parse_schedule(&args.days, &args.prices).unwrap_or_else(|e| fail("addpaper", e));
    let paper = Paper::new(args.key.trim(), args.name.trim(), schedule);
    let db = open_store(rc, "addpaper");

    match db.add_paper(&paper) {
        Ok(()) => {
            println!("OK   npbc addpaper");
            println!("Added {} ({})", paper.name, paper.key);
        }
        Err(e) => fail("addpaper", e),
    }
}

pub fn edit(rc: &ResolvedConfig, args: &EditPaperArgs) {
    let schedule = match (&args.days, &args.prices) {
        (Some(days), Some(prices)) => {
            Some(parse_schedule(days, prices).unwrap_or_else(|e| fail("editpaper", e)))
        }
        _ => None,
    };
    if args.name.is_none() && schedule.is_none() {
        fail("editpaper", "nothing to change: give --name or --days with --prices");
    }

    let db = open_store(rc, "editpaper");
    match db.edit_paper(&args.key, args.name.as_deref().map(str::trim), schedule.as_ref()) {
        Ok(()) => {
            println!("OK   npbc editpaper");
            println!("Updated {}", args.key);
        }
        Err(e) => fail("editpaper", e),
    }
}

pub fn delete(rc: &ResolvedConfig, key: &str) {
    let db = open_store(rc, "delpaper");
    match db.delete_paper(key) {
        Ok(()) => {
            println!("OK   npbc delpaper");
            println!("Deleted {key}");
        }
        Err(e) => fail("delpaper", e),
    }
}

pub fn list(rc: &ResolvedConfig, args: &OutputArgs) {
    let db = open_store(rc, "papers");
    let papers = db.list_papers().unwrap_or_else(|e| fail("papers", e));

    if args.json {
        let out: Vec<PaperOutput> = papers.iter().map(PaperOutput::from).collect();
        print_json(&out);
    } else {
        print_papers_table(&papers);
    }
}
