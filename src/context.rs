//! Discount Context
//!
//! The immutable snapshot of customer and purchase facts a single calculation is based on.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised when a context is not fit for pricing.
#[derive(Debug, Error, PartialEq)]
pub enum ContextError {
    /// The original price was below zero.
    #[error("original price must not be negative, got {price}")]
    NegativePrice {
        /// Offending price amount
        price: Decimal,
    },

    /// The customer lifetime value was below zero.
    #[error("customer lifetime value must not be negative, got {value}")]
    NegativeLifetimeValue {
        /// Offending lifetime value
        value: Decimal,
    },
}

/// Errors raised when parsing a customer classification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CustomerTypeError {
    /// The classification is not one of the known tiers.
    #[error("unknown customer type: {0}")]
    Unknown(String),
}

/// Customer classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerType {
    /// No loyalty tier
    Regular,

    /// Premium tier
    Premium,

    /// VIP tier
    Vip,
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CustomerType::Regular => "Regular",
            CustomerType::Premium => "Premium",
            CustomerType::Vip => "VIP",
        };

        f.write_str(label)
    }
}

impl FromStr for CustomerType {
    type Err = CustomerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "regular" => Ok(CustomerType::Regular),
            "premium" => Ok(CustomerType::Premium),
            "vip" => Ok(CustomerType::Vip),
            _ => Err(CustomerTypeError::Unknown(s.to_string())),
        }
    }
}

/// Input snapshot for one pricing decision.
#[derive(Debug, Clone)]
pub struct DiscountContext<'a> {
    original_price: Money<'a, Currency>,
    customer_type: CustomerType,
    quantity: u32,
    purchase_date: Date,
    first_time_customer: bool,
    category: Option<String>,
    lifetime_value: Option<Decimal>,
}

impl<'a> DiscountContext<'a> {
    /// Create a new context for a returning customer with no category or lifetime value.
    pub fn new(
        original_price: Money<'a, Currency>,
        customer_type: CustomerType,
        quantity: u32,
        purchase_date: Date,
    ) -> Self {
        Self {
            original_price,
            customer_type,
            quantity,
            purchase_date,
            first_time_customer: false,
            category: None,
            lifetime_value: None,
        }
    }

    /// Mark whether this is the customer's first purchase.
    #[must_use]
    pub fn first_time_customer(mut self, first_time_customer: bool) -> Self {
        self.first_time_customer = first_time_customer;
        self
    }

    /// Attach a product category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Attach the customer's lifetime value.
    #[must_use]
    pub fn with_lifetime_value(mut self, lifetime_value: Decimal) -> Self {
        self.lifetime_value = Some(lifetime_value);
        self
    }

    /// Price before any discount.
    pub fn original_price(&self) -> Money<'a, Currency> {
        self.original_price
    }

    /// Currency of the original price.
    pub fn currency(&self) -> &'a Currency {
        self.original_price.currency()
    }

    /// Customer classification.
    pub fn customer_type(&self) -> CustomerType {
        self.customer_type
    }

    /// Purchase quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Purchase date.
    pub fn purchase_date(&self) -> Date {
        self.purchase_date
    }

    /// Whether this is the customer's first purchase.
    pub fn is_first_time_customer(&self) -> bool {
        self.first_time_customer
    }

    /// Product category, if known.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Customer lifetime value, if known.
    pub fn lifetime_value(&self) -> Option<Decimal> {
        self.lifetime_value
    }

    /// Check the context can be priced.
    ///
    /// # Errors
    ///
    /// - [`ContextError::NegativePrice`]: the original price is below zero.
    /// - [`ContextError::NegativeLifetimeValue`]: the lifetime value is below zero.
    pub fn validate(&self) -> Result<(), ContextError> {
        let price = *self.original_price.amount();

        if price < Decimal::ZERO {
            return Err(ContextError::NegativePrice { price });
        }

        if let Some(value) = self.lifetime_value
            && value < Decimal::ZERO
        {
            return Err(ContextError::NegativeLifetimeValue { value });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn customer_type_parses_case_insensitively() -> TestResult {
        assert_eq!("VIP".parse::<CustomerType>()?, CustomerType::Vip);
        assert_eq!(" premium ".parse::<CustomerType>()?, CustomerType::Premium);
        assert_eq!("Regular".parse::<CustomerType>()?, CustomerType::Regular);

        Ok(())
    }

    #[test]
    fn customer_type_rejects_unknown_tiers() {
        let result = "platinum".parse::<CustomerType>();

        assert_eq!(
            result,
            Err(CustomerTypeError::Unknown("platinum".to_string()))
        );
    }

    #[test]
    fn customer_type_displays_labels() {
        assert_eq!(CustomerType::Vip.to_string(), "VIP");
        assert_eq!(CustomerType::Premium.to_string(), "Premium");
    }

    #[test]
    fn builder_sets_optional_fields() {
        let context = DiscountContext::new(
            Money::from_minor(10_000, USD),
            CustomerType::Regular,
            3,
            date(2024, 3, 1),
        )
        .first_time_customer(true)
        .with_category("Electronics")
        .with_lifetime_value(Decimal::new(5_000, 0));

        assert!(context.is_first_time_customer());
        assert_eq!(context.category(), Some("Electronics"));
        assert_eq!(context.lifetime_value(), Some(Decimal::new(5_000, 0)));
        assert_eq!(context.currency(), USD);
    }

    #[test]
    fn validate_rejects_negative_price() {
        let context = DiscountContext::new(
            Money::from_minor(-5_000, USD),
            CustomerType::Regular,
            1,
            date(2024, 3, 1),
        );

        assert!(matches!(
            context.validate(),
            Err(ContextError::NegativePrice { price }) if price == Decimal::new(-50, 0)
        ));
    }

    #[test]
    fn validate_rejects_negative_lifetime_value() {
        let context = DiscountContext::new(
            Money::from_minor(5_000, USD),
            CustomerType::Regular,
            1,
            date(2024, 3, 1),
        )
        .with_lifetime_value(Decimal::new(-1, 0));

        assert!(matches!(
            context.validate(),
            Err(ContextError::NegativeLifetimeValue { .. })
        ));
    }

    #[test]
    fn validate_accepts_zero_price() {
        let context = DiscountContext::new(
            Money::from_minor(0, USD),
            CustomerType::Vip,
            0,
            date(2024, 12, 24),
        );

        assert_eq!(context.validate(), Ok(()));
    }
}
