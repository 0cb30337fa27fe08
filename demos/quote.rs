//! Quote Example
//!
//! This example prices a single purchase and prints the receipt and calculation trace.
//!
//! Use `-p` to set the price and `-c` the customer type
//! Use `-r` to load a rule set fixture by name instead of the built-in policy
//! Set `RUST_LOG=cascade=debug` to see rule matching as it happens

use std::io;

use anyhow::Result;

use cascade::{
    calculator::Calculator, fixtures::Fixture, observer::TraceLog, receipt::write_to,
    rules::RuleSet, utils::ExampleQuoteArgs,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Quote Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = ExampleQuoteArgs::parse();

    let rules = match args.rules.as_deref() {
        Some(name) => Fixture::with_base_path(&args.fixtures).load_rules(name)?,
        None => RuleSet::default_policy(),
    };

    let context = args.context()?;
    let calculator = Calculator::new(rules);

    let mut trace = TraceLog::new();
    let result = calculator.calculate_with_observer(&context, &mut trace)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_to(&result, &mut handle)?;

    println!("{}\n", result.summary());

    for line in trace.lines() {
        println!("  {line}");
    }

    Ok(())
}
