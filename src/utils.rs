//! Utils

use clap::Parser;
use jiff::{Zoned, civil::Date};
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use thiserror::Error;

use crate::context::{CustomerType, DiscountContext};

/// Errors turning example arguments into a context
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExampleArgsError {
    /// Currency code is not an ISO 4217 code
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),
}

/// Arguments for the quote example
#[derive(Debug, Parser)]
pub struct ExampleQuoteArgs {
    /// Original price, in major units (e.g. 249.99)
    #[clap(short, long)]
    pub price: Decimal,

    /// ISO 4217 currency code
    #[clap(long, default_value = "USD")]
    pub currency: String,

    /// Customer type: regular, premium or vip
    #[clap(short, long, default_value = "regular")]
    pub customer: CustomerType,

    /// Number of items purchased
    #[clap(short, long, default_value_t = 1)]
    pub quantity: u32,

    /// Purchase date (YYYY-MM-DD), defaults to today
    #[clap(short, long)]
    pub date: Option<Date>,

    /// First purchase for this customer
    #[clap(long)]
    pub first_time: bool,

    /// Product category
    #[clap(long)]
    pub category: Option<String>,

    /// Customer lifetime value, in major units
    #[clap(long)]
    pub lifetime_value: Option<Decimal>,

    /// Rule set fixture to use instead of the built-in policy
    #[clap(short, long)]
    pub rules: Option<String>,

    /// Base path for rule set fixtures
    #[clap(long, default_value = "./fixtures")]
    pub fixtures: String,
}

impl ExampleQuoteArgs {
    /// Build the discount context described by these arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleArgsError::UnknownCurrency`] if the currency code is not recognised.
    pub fn context(&self) -> Result<DiscountContext<'static>, ExampleArgsError> {
        let currency = iso::find(&self.currency.to_ascii_uppercase())
            .ok_or_else(|| ExampleArgsError::UnknownCurrency(self.currency.clone()))?;

        let date = self.date.unwrap_or_else(|| Zoned::now().date());

        let mut context = DiscountContext::new(
            Money::from_decimal(self.price, currency),
            self.customer,
            self.quantity,
            date,
        )
        .first_time_customer(self.first_time);

        if let Some(category) = &self.category {
            context = context.with_category(category.clone());
        }

        if let Some(lifetime_value) = self.lifetime_value {
            context = context.with_lifetime_value(lifetime_value);
        }

        Ok(context)
    }
}
