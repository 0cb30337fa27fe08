//! Discount Rules
//!
//! A rule pairs a condition with the discount it produces and a priority. A [`RuleSet`] is
//! the registry the calculator evaluates: it is built once, ordered by priority and never
//! mutated afterwards.

use crate::{
    context::{CustomerType, DiscountContext},
    discounts::{BULK_PURCHASE_MIN_QUANTITY, Discount, season::Season},
    rules::condition::{Condition, Predicate},
};

pub mod chain;
pub mod condition;

/// Declarative policy entry.
#[derive(Debug, Clone)]
pub struct DiscountRule {
    name: String,
    priority: i32,
    condition: Condition,
    discount: Discount,
}

impl DiscountRule {
    /// Create a new rule. Lower priorities run first.
    pub fn new(
        name: impl Into<String>,
        priority: i32,
        condition: Condition,
        discount: Discount,
    ) -> Self {
        Self {
            name: name.into(),
            priority,
            condition,
            discount,
        }
    }

    /// Rule name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rule priority
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Rule condition
    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    /// Discount template produced by this rule
    pub fn discount(&self) -> &Discount {
        &self.discount
    }

    /// Whether this rule fires for the context.
    pub fn matches(&self, context: &DiscountContext<'_>) -> bool {
        self.condition.matches(context)
    }

    /// Create the discount instance for one calculation.
    pub fn instantiate(&self) -> Discount {
        self.discount.clone()
    }
}

/// Priority-ordered registry of discount rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<DiscountRule>,
}

impl RuleSet {
    /// Create a rule set, ordering rules by ascending priority.
    ///
    /// Rules sharing a priority keep their declaration order.
    pub fn new(rules: impl IntoIterator<Item = DiscountRule>) -> Self {
        let mut rules: Vec<DiscountRule> = rules.into_iter().collect();

        rules.sort_by_key(DiscountRule::priority);

        Self { rules }
    }

    /// The standard discount policy.
    pub fn default_policy() -> Self {
        Self::new([
            DiscountRule::new(
                "First Time Customer",
                1,
                Condition::when(Predicate::FirstTimeCustomer),
                Discount::first_time_customer(),
            ),
            DiscountRule::new(
                "VIP Loyalty",
                2,
                Condition::when(Predicate::CustomerType(CustomerType::Vip)),
                Discount::vip_loyalty(),
            ),
            DiscountRule::new(
                "Premium Loyalty",
                3,
                Condition::when(Predicate::CustomerType(CustomerType::Premium)),
                Discount::premium_loyalty(),
            ),
            DiscountRule::new(
                "Bulk Purchase",
                4,
                Condition::when(Predicate::MinQuantity(BULK_PURCHASE_MIN_QUANTITY)),
                Discount::bulk_purchase(),
            ),
            DiscountRule::new(
                "Holiday Sale",
                5,
                Condition::when(Predicate::PurchaseMonths(Season::holiday())),
                Discount::holiday(),
            ),
            DiscountRule::new(
                "Summer Sale",
                6,
                Condition::when(Predicate::PurchaseMonths(Season::summer())),
                Discount::summer(),
            ),
        ])
    }

    /// Rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = &DiscountRule> {
        self.rules.iter()
    }

    /// Lookup a rule by name.
    pub fn get(&self, name: &str) -> Option<&DiscountRule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a DiscountRule;
    type IntoIter = std::slice::Iter<'a, DiscountRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
