//! Demonstration consumer for the switchyard argument table.
//!
//! Wires up three sample arguments (positional tokens, a verbosity level and
//! a path), parses the process argv, and prints what the table produced.
//! With no arguments it parses a built-in sample vector instead, so running
//! the binary bare still shows the full flow.

use std::env;
use std::process::ExitCode;

use log::debug;
use switchyard_core::error::Result;
use switchyard_core::table::ArgumentTable;
use switchyard_core::validators;

fn build_table() -> Result<ArgumentTable> {
    let mut table = ArgumentTable::new(["--", "-"])?;

    table.register(validators::joined(", "), &[""])?;
    table.register(validators::int_in_range(1..=3, 1), &["--verbose", "-v"])?;
    table.register(validators::joined(" "), &["--path", "-p"])?;

    Ok(table)
}

fn execute() -> Result<()> {
    let mut table = build_table()?;

    let argv: Vec<String> = env::args().skip(1).collect();
    if argv.is_empty() {
        debug!("No arguments given, parsing the sample vector");
        table.parse(["Extra", "stuff!", "-v", "3", "--path", "C:\\Program", "Files\\"])?;
    } else {
        table.parse(argv)?;
    }

    println!("Default:\t['{}']", table.value_or("", String::new()));
    println!(
        "Verbose:\t{}/{} (level: {})",
        table.raw_arguments().contains_key("-v"),
        table.raw_arguments().contains_key("--verbose"),
        table.value_or("-v", 1i64)
    );
    println!("   Path:\t'{}'", table.value_or("--path", String::new()));

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.parameter() {
                Some(parameter) => eprintln!("{parameter}: {e}"),
                None => eprintln!("{e}"),
            }
            ExitCode::FAILURE
        }
    }
}
