//! Receipt
//!
//! Renders a calculation result as a terminal table: one row per applied discount followed
//! by a subtotal, total and savings summary.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{discounts::rate_of, results::DiscountResult};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the receipt for `result` to `out`.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if writing fails.
pub fn write_to(result: &DiscountResult<'_>, mut out: impl io::Write) -> Result<(), ReceiptError> {
    if result.applied().is_empty() {
        writeln!(out, "\n {}", result.summary()).map_err(|_err| ReceiptError::IO)?;
    } else {
        write_discount_table(&mut out, result)?;
    }

    write_receipt_summary(&mut out, result)
}

fn write_discount_table(
    out: &mut impl io::Write,
    result: &DiscountResult<'_>,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["", "Discount", "Price Before", "Savings", "Price After"]);

    let mut price_before = result.original_price();

    for (idx, applied) in result.applied().iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            applied.name.clone(),
            format!("{price_before}"),
            format!("-{}", applied.amount),
            format!("{}", applied.price_after),
        ]);

        price_before = applied.price_after;
    }

    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(
        1,
        HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
    );

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Columns::new(4..5), Color::FG_GREEN);

    let table_str = dim_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    result: &DiscountResult<'_>,
) -> Result<(), ReceiptError> {
    let savings_percent_points = percent_points_from_fractional_percentage(result.savings_percent());

    let rows = [
        (" Subtotal:", format!("{}  ", result.original_price())),
        (
            " \x1b[1mTotal:\x1b[0m",
            format!("\x1b[1m{}\x1b[0m  ", result.final_price()),
        ),
        (
            " Savings:",
            format!("({savings_percent_points:.2}%) {}  ", result.discount_amount()),
        ),
    ];

    let label_width = rows
        .iter()
        .map(|(label, _)| visible_width(label))
        .max()
        .unwrap_or_default();

    let value_width = rows
        .iter()
        .map(|(_, value)| visible_width(value))
        .max()
        .unwrap_or_default();

    for (label, value) in &rows {
        write_summary_line(out, label, value, label_width, value_width)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_width: usize,
    value_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_width.saturating_sub(visible_width(label));
    let value_pad = value_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{label}{:label_pad$} {:value_pad$}{value}",
        "", ""
    )
    .map_err(|_err| ReceiptError::IO)
}

/// Converts a fractional percentage to percent points for display.
fn percent_points_from_fractional_percentage(percentage: Percentage) -> Decimal {
    // `Percentage` is a fraction (e.g. 0.25), so multiply by 100 to print percent points.
    (rate_of(&percentage) * Decimal::ONE_HUNDRED).round_dp(2)
}

const DIM: &str = "\x1b[90m";
const RESET: &str = "\x1b[0m";

/// Box-drawing characters (U+2500..U+257F) used for table borders.
fn is_border(ch: char) -> bool {
    ('\u{2500}'..='\u{257F}').contains(&ch)
}

/// Dims every run of border characters, leaving cell text as rendered.
fn dim_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_border = false;

    for ch in table.chars() {
        let border = is_border(ch);

        match (in_border, border) {
            (false, true) => out.push_str(DIM),
            (true, false) => out.push_str(RESET),
            _ => {}
        }

        out.push(ch);
        in_border = border;
    }

    if in_border {
        out.push_str(RESET);
    }

    out
}

/// Number of characters a terminal shows for `s`, skipping ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    s.split('\x1b')
        .enumerate()
        .map(|(idx, part)| {
            if idx == 0 {
                part.chars().count()
            } else {
                // Escape sequences end at their first ASCII letter
                part.chars()
                    .skip_while(|ch| !ch.is_ascii_alphabetic())
                    .skip(1)
                    .count()
            }
        })
        .sum()
}
