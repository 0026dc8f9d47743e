use npbc_core::config::types::ResolvedConfig;

use super::{fail, open_store, resolve_period};
use crate::{AddUndeliveredArgs, DeleteUndeliveredArgs};

pub fn add(rc: &ResolvedConfig, args: &AddUndeliveredArgs) {
    let period = resolve_period(args.period, "addudl");
    let db = open_store(rc, "addudl");

    match db.add_undelivered_string(&args.key, period, &args.string) {
        Ok(()) => {
            println!("OK   npbc addudl");
            println!("Stored '{}' for {} in {}", args.string.trim(), args.key, period);
        }
        Err(e) => fail("addudl", e),
    }
}

pub fn delete(rc: &ResolvedConfig, args: &DeleteUndeliveredArgs) {
    let period = resolve_period(args.period, "deludl");
    let db = open_store(rc, "deludl");

    match db.delete_undelivered_strings(period, args.key.as_deref()) {
        Ok(count) => {
            println!("OK   npbc deludl");
            match args.key {
                Some(ref key) => println!("Deleted {count} strings for {key} in {period}"),
                None => println!("Deleted {count} strings in {period}"),
            }
        }
        Err(e) => fail("deludl", e),
    }
}
