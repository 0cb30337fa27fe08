//! Chain Builder
//!
//! Turns the rules that match a context into a composite discount.

use tracing::debug;

use crate::{
    context::DiscountContext, discounts::composite::CompositeDiscount,
    observer::CalculationObserver, rules::RuleSet,
};

/// Build the discount chain for a context.
///
/// Rules are visited in priority order and every matching rule contributes one discount
/// instance. Returns `None` when no rule matches, so callers can skip pricing entirely.
pub fn build_chain<O: CalculationObserver + ?Sized>(
    rules: &RuleSet,
    context: &DiscountContext<'_>,
    observer: &mut O,
) -> Option<CompositeDiscount> {
    let discounts: Vec<_> = rules
        .iter()
        .filter(|rule| {
            let matched = rule.matches(context);

            if matched {
                observer.on_rule_matched(rule);
            } else {
                observer.on_rule_skipped(rule);
            }

            matched
        })
        .map(|rule| rule.instantiate())
        .collect();

    if discounts.is_empty() {
        debug!(rules = rules.len(), "no discount rules matched");

        return None;
    }

    debug!(
        rules = rules.len(),
        matched = discounts.len(),
        "built discount chain"
    );

    Some(CompositeDiscount::new(discounts))
}
