//! Read shapes as flat JSON records, one per line, and print the area of each.
//!
//! ```text
//! $ echo '{"type": "circle", "r": 1}' | cargo run --example areas
//! circle: 3.142
//! ```

use colored::*;
use serde_json::Value;
use std::{
    error::Error,
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};
use structopt::StructOpt;
use tagfold::{partial_fold, Handlers, PartialFold, Record, Tagged};

/// Print the area of every shape in a stream of JSON records.
#[derive(Debug, Clone, StructOpt)]
struct Options {
    /// Read records from this file instead of standard input
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,
    /// Digits to print after the decimal point
    #[structopt(short, long, default_value = "3")]
    precision: usize,
}

fn number(record: &Record, field: &str) -> Option<f64> {
    record.get(field).and_then(Value::as_f64)
}

/// Areas of the shapes we know about; `None` for malformed payloads and unknown shapes.
fn area() -> PartialFold<'static, Record, Option<f64>> {
    partial_fold(
        Handlers::new()
            .on_tag("circle", |c: &Record| {
                number(c, "r").map(|r| r * r * std::f64::consts::PI)
            })
            .on_tag("rectangle", |r: &Record| Some(number(r, "w")? * number(r, "h")?))
            .on_tag("square", |s: &Record| number(s, "s").map(|s| s * s)),
        |_: Option<&Record>| None,
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let options = Options::from_args();
    let input: Box<dyn BufRead> = match &options.input {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let area = area();
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: Record = match serde_json::from_str(&line) {
            Ok(record) => record,
            Err(err) => {
                eprintln!("{} {}", "invalid record:".red(), err);
                continue;
            }
        };
        match area.apply(&record) {
            Some(area) => println!(
                "{}: {:.*}",
                record.tag().bold(),
                options.precision,
                area
            ),
            None => println!("{}: {}", record.tag().bold(), "no area".yellow()),
        }
    }
    Ok(())
}
