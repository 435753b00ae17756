//! CLI probe for notekeep core.
//!
//! # Responsibility
//! - Verify `notekeep_core` linkage and print its version.
//! - Optionally list the notes stored in a SQLite database file.
//!
//! Usage: `notekeep_cli [DB_PATH [FILTER]]`
//!
//! Set `NOTEKEEP_LOG_DIR` to an absolute directory to enable file logging.

use notekeep_core::{
    core_version, default_log_level, init_logging, LoadStatus, NoteStore, SqliteKvStore,
    StoreConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("notekeep_core version={}", core_version());

    if let Ok(log_dir) = std::env::var("NOTEKEEP_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut args = std::env::args().skip(1);
    let Some(db_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let filter = args.next();

    let kv = match SqliteKvStore::open(&db_path) {
        Ok(kv) => kv,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };
    let (store, report) = match NoteStore::open(kv, StoreConfig::default()) {
        Ok(opened) => opened,
        Err(err) => {
            eprintln!("failed to open note store: {err}");
            return ExitCode::FAILURE;
        }
    };

    match &report.status {
        LoadStatus::Restored => {}
        LoadStatus::Missing => println!("no notes stored yet"),
        LoadStatus::Recovered(err) => eprintln!("stored notes unreadable, showing none: {err}"),
    }

    for note in store.list(filter.as_deref()) {
        println!(
            "{}\t{}\t{}\t{}",
            note.id, note.last_modified, note.folder, note.title
        );
    }
    ExitCode::SUCCESS
}
