//! Validate a CII invoice file and print the report.
//!
//! ```text
//! cargo run --example validate -- invoice.xml
//! RUST_LOG=einvoice=debug cargo run --example validate -- invoice.xml
//! ```
//!
//! Exits with 0 for a clean invoice, 1 when rules are violated and 2 when
//! the file cannot be read or parsed.

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use einvoice::cii;
use einvoice::core::*;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: validate <invoice.xml>");
        return ExitCode::from(2);
    };

    match run(&path) {
        Ok(report) if report.is_valid() => {
            for warning in report.warnings() {
                println!("warning  {warning}");
            }
            println!("{path}: valid");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            for violation in report.all() {
                let label = if violation.is_error() { "error" } else { "warning" };
                println!("{label:<8} {violation}");
            }
            println!("{path}: {} error(s)", report.count());
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("{path}: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(path: &str) -> Result<Report, InvoiceError> {
    let file = File::open(path)?;
    let parsed = cii::read_cii(BufReader::new(file))?;
    println!(
        "{} ({}, {} line(s), profile {})",
        parsed.invoice.number,
        parsed.invoice.currency,
        parsed.invoice.lines.len(),
        parsed.invoice.profile().tag(),
    );

    let mut report = parsed.violations;
    for violation in validate(&parsed.invoice) {
        if !report.all().contains(&violation) {
            report.push(violation);
        }
    }
    Ok(report)
}
