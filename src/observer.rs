//! Calculation Observers
//!
//! Callbacks fired while a calculation runs, so callers can keep an audit trail of which
//! rules matched and what each discount took off without the engine knowing where that
//! trail ends up. Observers cannot fail: whatever they do with an event, the calculation
//! completes with the same result.

use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use crate::{
    results::{AppliedDiscount, DiscountResult},
    rules::DiscountRule,
};

/// Observer trait for following a calculation as it happens.
///
/// All callbacks default to doing nothing.
pub trait CalculationObserver {
    /// Called when a rule's condition holds and its discount joins the chain.
    fn on_rule_matched(&mut self, _rule: &DiscountRule) {}

    /// Called when a rule's condition does not hold.
    fn on_rule_skipped(&mut self, _rule: &DiscountRule) {}

    /// Called for each discount that took money off, in application order.
    fn on_discount_applied(&mut self, _applied: &AppliedDiscount<'_>) {}

    /// Called once with the final result.
    fn on_calculation_complete(&mut self, _result: &DiscountResult<'_>) {}
}

/// No-op observer for unobserved calculations.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl CalculationObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl CalculationObserver for TracingObserver {
    fn on_rule_matched(&mut self, rule: &DiscountRule) {
        debug!(rule = rule.name(), priority = rule.priority(), "rule matched");
    }

    fn on_rule_skipped(&mut self, rule: &DiscountRule) {
        trace!(rule = rule.name(), priority = rule.priority(), "rule skipped");
    }

    fn on_discount_applied(&mut self, applied: &AppliedDiscount<'_>) {
        debug!(
            discount = %applied.name,
            amount = %applied.amount,
            price_after = %applied.price_after,
            "discount applied"
        );
    }

    fn on_calculation_complete(&mut self, result: &DiscountResult<'_>) {
        info!(
            original_price = %result.original_price(),
            discount_amount = %result.discount_amount(),
            final_price = %result.final_price(),
            applied = result.applied().len(),
            "final price: {}",
            result.final_price()
        );
    }
}

/// Structured audit event.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A rule matched the context.
    RuleMatched {
        /// Rule name
        rule: String,

        /// Rule priority
        priority: i32,
    },

    /// A discount took money off the running price.
    DiscountApplied {
        /// Discount name
        discount: String,

        /// Amount taken off
        amount: Decimal,

        /// Running price afterwards
        price_after: Decimal,
    },

    /// The calculation finished.
    Completed {
        /// Final price
        final_price: Decimal,

        /// Total discount
        discount_amount: Decimal,
    },
}

/// Observer that records every event in order.
#[derive(Debug, Default)]
pub struct TraceLog {
    events: Vec<TraceEvent>,
}

impl TraceLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Names of the rules that matched, in order.
    pub fn matched_rules(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                TraceEvent::RuleMatched { rule, .. } => Some(rule.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Render the log as human-readable lines.
    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|event| match event {
                TraceEvent::RuleMatched { rule, priority } => {
                    format!("rule matched: {rule} (priority {priority})")
                }
                TraceEvent::DiscountApplied {
                    discount,
                    amount,
                    price_after,
                } => format!("applied {discount}: -{amount} -> {price_after}"),
                TraceEvent::Completed { final_price, .. } => format!("final price: {final_price}"),
            })
            .collect()
    }
}

impl CalculationObserver for TraceLog {
    fn on_rule_matched(&mut self, rule: &DiscountRule) {
        self.events.push(TraceEvent::RuleMatched {
            rule: rule.name().to_string(),
            priority: rule.priority(),
        });
    }

    fn on_discount_applied(&mut self, applied: &AppliedDiscount<'_>) {
        self.events.push(TraceEvent::DiscountApplied {
            discount: applied.name.clone(),
            amount: *applied.amount.amount(),
            price_after: *applied.price_after.amount(),
        });
    }

    fn on_calculation_complete(&mut self, result: &DiscountResult<'_>) {
        self.events.push(TraceEvent::Completed {
            final_price: *result.final_price().amount(),
            discount_amount: *result.discount_amount().amount(),
        });
    }
}
