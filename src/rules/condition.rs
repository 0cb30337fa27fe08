//! Rule Conditions
//!
//! Nested boolean predicates over a discount context, used to decide whether a rule fires.

use rust_decimal::Decimal;
use serde::Deserialize;
use smallvec::{SmallVec, smallvec};

use crate::{
    context::{CustomerType, DiscountContext},
    discounts::season::Season,
};

/// Condition expression evaluated against a context.
#[derive(Debug, Clone)]
pub struct Condition {
    /// How `predicates` are combined.
    pub op: BoolOp,

    /// Child predicates. Empty means "always".
    pub predicates: SmallVec<[Predicate; 2]>,
}

/// Boolean operation used to combine predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolOp {
    /// All child predicates must hold.
    #[default]
    And,

    /// At least one child predicate must hold.
    Or,
}

/// Single predicate over a context.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// The customer is buying for the first time.
    FirstTimeCustomer,

    /// The customer belongs to exactly this tier.
    CustomerType(CustomerType),

    /// At least this many items are purchased.
    MinQuantity(u32),

    /// The purchase month falls within the season.
    PurchaseMonths(Season),

    /// The product category equals this one, ignoring ASCII case.
    Category(String),

    /// The customer's lifetime value is at least this amount.
    MinLifetimeValue(Decimal),

    /// Nested condition group.
    Group(Box<Condition>),
}

impl Condition {
    /// Create a condition from operator and predicates.
    #[must_use]
    pub fn new(op: BoolOp, predicates: SmallVec<[Predicate; 2]>) -> Self {
        Self { op, predicates }
    }

    /// Condition that always holds.
    #[must_use]
    pub fn always() -> Self {
        Self {
            op: BoolOp::And,
            predicates: SmallVec::new(),
        }
    }

    /// Condition made of a single predicate.
    #[must_use]
    pub fn when(predicate: Predicate) -> Self {
        Self {
            op: BoolOp::And,
            predicates: smallvec![predicate],
        }
    }

    /// Evaluate the condition against a context.
    #[must_use]
    pub fn matches(&self, context: &DiscountContext<'_>) -> bool {
        if self.predicates.is_empty() {
            return true;
        }

        match self.op {
            BoolOp::And => self
                .predicates
                .iter()
                .all(|predicate| predicate.matches(context)),
            BoolOp::Or => self
                .predicates
                .iter()
                .any(|predicate| predicate.matches(context)),
        }
    }
}

impl Default for Condition {
    fn default() -> Self {
        Self::always()
    }
}

impl Predicate {
    #[must_use]
    fn matches(&self, context: &DiscountContext<'_>) -> bool {
        match self {
            Self::FirstTimeCustomer => context.is_first_time_customer(),
            Self::CustomerType(customer_type) => context.customer_type() == *customer_type,
            Self::MinQuantity(quantity) => context.quantity() >= *quantity,
            Self::PurchaseMonths(season) => season.contains(context.purchase_date().month()),
            Self::Category(category) => context
                .category()
                .is_some_and(|actual| actual.eq_ignore_ascii_case(category)),
            Self::MinLifetimeValue(value) => context
                .lifetime_value()
                .is_some_and(|actual| actual >= *value),
            Self::Group(group) => group.matches(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso::USD};
    use smallvec::smallvec;

    use super::*;

    fn context<'a>() -> DiscountContext<'a> {
        DiscountContext::new(
            Money::from_minor(50_000, USD),
            CustomerType::Premium,
            4,
            date(2024, 7, 4),
        )
        .with_category("garden")
    }

    #[test]
    fn empty_condition_always_matches() {
        assert!(Condition::default().matches(&context()));
    }

    #[test]
    fn single_predicates_follow_context() {
        let context = context();

        assert!(Condition::when(Predicate::CustomerType(CustomerType::Premium)).matches(&context));
        assert!(!Condition::when(Predicate::CustomerType(CustomerType::Vip)).matches(&context));
        assert!(!Condition::when(Predicate::FirstTimeCustomer).matches(&context));
        assert!(Condition::when(Predicate::MinQuantity(4)).matches(&context));
        assert!(!Condition::when(Predicate::MinQuantity(5)).matches(&context));
        assert!(Condition::when(Predicate::PurchaseMonths(Season::summer())).matches(&context));
        assert!(Condition::when(Predicate::Category("Garden".to_string())).matches(&context));
    }

    #[test]
    fn missing_optional_fields_never_match() {
        let context = context();

        assert!(
            !Condition::when(Predicate::MinLifetimeValue(Decimal::ZERO)).matches(&context),
            "no lifetime value recorded"
        );

        let without_category = DiscountContext::new(
            Money::from_minor(50_000, USD),
            CustomerType::Premium,
            4,
            date(2024, 7, 4),
        );

        assert!(!Condition::when(Predicate::Category("garden".to_string())).matches(&without_category));
    }

    #[test]
    fn supports_nested_boolean_groups() {
        let condition = Condition::new(
            BoolOp::And,
            smallvec![
                Predicate::PurchaseMonths(Season::summer()),
                Predicate::Group(Box::new(Condition::new(
                    BoolOp::Or,
                    smallvec![
                        Predicate::CustomerType(CustomerType::Vip),
                        Predicate::MinQuantity(3)
                    ]
                )))
            ],
        );

        assert!(condition.matches(&context()));

        let winter = DiscountContext::new(
            Money::from_minor(50_000, USD),
            CustomerType::Vip,
            1,
            date(2024, 1, 4),
        );

        assert!(!condition.matches(&winter));
    }
}
