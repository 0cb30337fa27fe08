//! Rule Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rustc_hash::FxHashSet;
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    context::CustomerType,
    discounts::{Discount, composite::CompositeDiscount, season::Season},
    fixtures::FixtureError,
    rules::{
        DiscountRule, RuleSet,
        condition::{BoolOp, Condition, Predicate},
    },
};

/// Wrapper for rules in YAML
#[derive(Debug, Deserialize)]
pub struct RuleSetFixture {
    /// Rules in declaration order
    pub rules: Vec<RuleFixture>,
}

/// Rule fixture from YAML
#[derive(Debug, Deserialize)]
pub struct RuleFixture {
    /// Rule name
    pub name: String,

    /// Rule priority, lower runs first
    pub priority: i32,

    /// Rule condition; omitted means "always"
    #[serde(default)]
    pub when: Option<ConditionFixture>,

    /// Discount produced when the rule matches
    pub discount: DiscountFixture,
}

/// Condition fixture: predicates combined with `op`
#[derive(Debug, Deserialize)]
pub struct ConditionFixture {
    /// How predicates are combined (`and` unless given)
    #[serde(default)]
    pub op: BoolOp,

    /// Child predicates
    #[serde(default)]
    pub predicates: Vec<PredicateFixture>,
}

/// Predicate fixture
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PredicateFixture {
    /// First purchase
    FirstTimeCustomer,

    /// Exact customer tier
    CustomerType {
        /// Tier name (`regular`, `premium`, `vip`)
        value: CustomerType,
    },

    /// Minimum purchase quantity
    MinQuantity {
        /// Inclusive minimum
        value: u32,
    },

    /// Purchase month window
    PurchaseMonths {
        /// Season name
        season: String,

        /// First month (1-12)
        from: i8,

        /// Last month (1-12), may be before `from` to wrap over the year end
        to: i8,
    },

    /// Product category
    Category {
        /// Category name
        value: String,
    },

    /// Minimum customer lifetime value
    MinLifetimeValue {
        /// Inclusive minimum (e.g. `1000` or `"1000.00"`)
        value: NumberFixture,
    },

    /// Nested group
    Group {
        /// How predicates are combined
        #[serde(default)]
        op: BoolOp,

        /// Child predicates
        predicates: Vec<PredicateFixture>,
    },
}

/// Discount fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountFixture {
    /// First time customer percentage
    FirstTimeCustomer {
        /// Rate (e.g. `0.15` or `"15%"`)
        rate: NumberFixture,
    },

    /// Loyalty tier percentage
    Loyalty {
        /// Tier the customer must belong to
        tier: CustomerType,

        /// Rate
        rate: NumberFixture,
    },

    /// Bulk purchase percentage
    BulkPurchase {
        /// Inclusive minimum quantity
        min_quantity: u32,

        /// Rate
        rate: NumberFixture,
    },

    /// Seasonal percentage
    Seasonal {
        /// Season name
        season: String,

        /// First month (1-12)
        from: i8,

        /// Last month (1-12), may be before `from` to wrap over the year end
        to: i8,

        /// Rate
        rate: NumberFixture,
    },

    /// Fixed amount off
    AmountOff {
        /// Display name
        name: String,

        /// Amount in the context's currency (e.g. `5` or `"4.99"`)
        amount: NumberFixture,
    },

    /// Discounts applied one after another
    Composite {
        /// Discounts in application order
        discounts: Vec<DiscountFixture>,
    },
}

/// A number written either as a YAML number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum NumberFixture {
    /// Plain YAML number
    Number(f64),

    /// Quoted value, e.g. `"15%"` or `"4.99"`
    Text(String),
}

impl TryFrom<RuleSetFixture> for RuleSet {
    type Error = FixtureError;

    fn try_from(fixture: RuleSetFixture) -> Result<Self, Self::Error> {
        let mut seen = FxHashSet::default();
        let mut rules = Vec::with_capacity(fixture.rules.len());

        for rule in fixture.rules {
            if !seen.insert(rule.name.clone()) {
                return Err(FixtureError::DuplicateRule(rule.name));
            }

            rules.push(DiscountRule::try_from(rule)?);
        }

        Ok(RuleSet::new(rules))
    }
}

impl TryFrom<RuleFixture> for DiscountRule {
    type Error = FixtureError;

    fn try_from(fixture: RuleFixture) -> Result<Self, Self::Error> {
        let condition = match fixture.when {
            Some(condition) => Condition::try_from(condition)?,
            None => Condition::always(),
        };

        Ok(DiscountRule::new(
            fixture.name,
            fixture.priority,
            condition,
            Discount::try_from(fixture.discount)?,
        ))
    }
}

impl TryFrom<ConditionFixture> for Condition {
    type Error = FixtureError;

    fn try_from(fixture: ConditionFixture) -> Result<Self, Self::Error> {
        let predicates = fixture
            .predicates
            .into_iter()
            .map(Predicate::try_from)
            .collect::<Result<SmallVec<[Predicate; 2]>, _>>()?;

        Ok(Condition::new(fixture.op, predicates))
    }
}

impl TryFrom<PredicateFixture> for Predicate {
    type Error = FixtureError;

    fn try_from(fixture: PredicateFixture) -> Result<Self, Self::Error> {
        Ok(match fixture {
            PredicateFixture::FirstTimeCustomer => Predicate::FirstTimeCustomer,
            PredicateFixture::CustomerType { value } => Predicate::CustomerType(value),
            PredicateFixture::MinQuantity { value } => Predicate::MinQuantity(value),
            PredicateFixture::PurchaseMonths { season, from, to } => {
                Predicate::PurchaseMonths(parse_season(season, from, to)?)
            }
            PredicateFixture::Category { value } => Predicate::Category(value),
            PredicateFixture::MinLifetimeValue { value } => {
                Predicate::MinLifetimeValue(parse_amount(&value)?)
            }
            PredicateFixture::Group { op, predicates } => {
                Predicate::Group(Box::new(Condition::try_from(ConditionFixture {
                    op,
                    predicates,
                })?))
            }
        })
    }
}

impl TryFrom<DiscountFixture> for Discount {
    type Error = FixtureError;

    fn try_from(fixture: DiscountFixture) -> Result<Self, Self::Error> {
        Ok(match fixture {
            DiscountFixture::FirstTimeCustomer { rate } => Discount::FirstTimeCustomer {
                rate: parse_percentage(&rate)?,
            },
            DiscountFixture::Loyalty { tier, rate } => Discount::Loyalty {
                tier,
                rate: parse_percentage(&rate)?,
            },
            DiscountFixture::BulkPurchase { min_quantity, rate } => Discount::BulkPurchase {
                min_quantity,
                rate: parse_percentage(&rate)?,
            },
            DiscountFixture::Seasonal {
                season,
                from,
                to,
                rate,
            } => Discount::Seasonal {
                season: parse_season(season, from, to)?,
                rate: parse_percentage(&rate)?,
            },
            DiscountFixture::AmountOff { name, amount } => Discount::AmountOff {
                name,
                amount: parse_amount(&amount)?,
            },
            DiscountFixture::Composite { discounts } => {
                Discount::Composite(CompositeDiscount::new(
                    discounts
                        .into_iter()
                        .map(Discount::try_from)
                        .collect::<Result<Vec<_>, _>>()?,
                ))
            }
        })
    }
}

/// Build a season, checking both months are within 1-12.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidMonth`] for a month outside 1-12.
pub fn parse_season(name: String, from: i8, to: i8) -> Result<Season, FixtureError> {
    if let Some(month) = [from, to]
        .into_iter()
        .find(|month| !(1..=12).contains(month))
    {
        return Err(FixtureError::InvalidMonth {
            season: name,
            month,
        });
    }

    Ok(Season::new(name, from, to))
}

/// Parse a rate written as `"15%"`, `"0.15"` or `0.15` into a `Percentage`.
///
/// # Errors
///
/// Returns an error if the value cannot be parsed or is outside 0%-100%.
pub fn parse_percentage(value: &NumberFixture) -> Result<Percentage, FixtureError> {
    let invalid = || FixtureError::InvalidPercentage(display(value));

    let rate = match value {
        NumberFixture::Number(number) => Decimal::from_f64(*number).ok_or_else(invalid)?,
        NumberFixture::Text(text) => {
            let trimmed = text.trim();

            if let Some(percent) = trimmed.strip_suffix('%') {
                percent
                    .trim()
                    .parse::<Decimal>()
                    .map_err(|_err| invalid())?
                    .checked_div(Decimal::ONE_HUNDRED)
                    .ok_or_else(invalid)?
            } else {
                trimmed.parse::<Decimal>().map_err(|_err| invalid())?
            }
        }
    };

    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid());
    }

    Ok(Percentage::from(rate))
}

/// Parse a non-negative amount written as a number or a string.
///
/// # Errors
///
/// Returns an error if the value cannot be parsed or is negative.
pub fn parse_amount(value: &NumberFixture) -> Result<Decimal, FixtureError> {
    let invalid = || FixtureError::InvalidAmount(display(value));

    let amount = match value {
        NumberFixture::Number(number) => Decimal::from_f64(*number).ok_or_else(invalid)?,
        NumberFixture::Text(text) => text.trim().parse::<Decimal>().map_err(|_err| invalid())?,
    };

    if amount < Decimal::ZERO {
        return Err(invalid());
    }

    Ok(amount)
}

fn display(value: &NumberFixture) -> String {
    match value {
        NumberFixture::Number(number) => number.to_string(),
        NumberFixture::Text(text) => text.clone(),
    }
}
