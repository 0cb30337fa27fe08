//! Composite Discount
//!
//! Applies an ordered list of discounts one after another, each to the price left over by
//! the previous one (percentage-off-remaining-balance, not additive stacking).

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{
    context::DiscountContext,
    discounts::Discount,
    results::{AppliedDiscount, DiscountResult},
};

/// An ordered chain of discounts applied sequentially.
#[derive(Debug, Clone, Default)]
pub struct CompositeDiscount {
    discounts: Vec<Discount>,
}

impl CompositeDiscount {
    /// Create a composite from discounts in application order.
    pub fn new(discounts: Vec<Discount>) -> Self {
        Self { discounts }
    }

    /// Discounts in application order.
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Number of discounts in the chain.
    pub fn len(&self) -> usize {
        self.discounts.len()
    }

    /// Whether the chain has no discounts.
    pub fn is_empty(&self) -> bool {
        self.discounts.is_empty()
    }

    /// Whether any discount in the chain applies to the context.
    pub fn is_applicable(&self, context: &DiscountContext<'_>) -> bool {
        self.discounts
            .iter()
            .any(|discount| discount.is_applicable(context))
    }

    /// Fold the applicable discounts over `current_price`.
    ///
    /// Each step sees the already-discounted working price. Steps that take nothing off are
    /// skipped and leave the accumulator untouched.
    pub fn apply<'a>(
        &self,
        context: &DiscountContext<'a>,
        current_price: Money<'a, Currency>,
    ) -> DiscountResult<'a> {
        let currency = current_price.currency();

        let (working, total, applied) = self
            .discounts
            .iter()
            .filter(|discount| discount.is_applicable(context))
            .fold(
                (
                    *current_price.amount(),
                    Decimal::ZERO,
                    SmallVec::<[AppliedDiscount<'a>; 4]>::new(),
                ),
                |(working, total, mut applied), discount| {
                    let step = discount.apply(context, Money::from_decimal(working, currency));
                    let amount = *step.discount_amount().amount();

                    if amount <= Decimal::ZERO {
                        return (working, total, applied);
                    }

                    applied.extend(step.applied().iter().cloned());

                    (*step.final_price().amount(), total + amount, applied)
                },
            );

        DiscountResult::from_parts(current_price, total, working, applied)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::iso::USD;

    use crate::context::CustomerType;

    use super::*;

    fn vip_bulk_december<'a>() -> DiscountContext<'a> {
        DiscountContext::new(
            Money::from_minor(100_000, USD),
            CustomerType::Vip,
            15,
            date(2024, 12, 10),
        )
    }

    #[test]
    fn applies_discounts_to_remaining_balance() {
        let context = vip_bulk_december();
        let composite =
            CompositeDiscount::new(vec![Discount::vip_loyalty(), Discount::bulk_purchase()]);

        let result = composite.apply(&context, context.original_price());

        // 1000 * 0.80 * 0.92, not 1000 * (1 - 0.20 - 0.08)
        assert_eq!(result.final_price(), Money::from_minor(73_600, USD));
        assert_eq!(result.discount_amount(), Money::from_minor(26_400, USD));
        assert_ne!(result.final_price(), Money::from_minor(72_000, USD));
    }

    #[test]
    fn skips_discounts_that_do_not_apply() {
        let context = vip_bulk_december();
        let composite = CompositeDiscount::new(vec![
            Discount::premium_loyalty(),
            Discount::vip_loyalty(),
            Discount::summer(),
        ]);

        let result = composite.apply(&context, context.original_price());

        assert_eq!(result.applied_names(), vec!["VIP Loyalty Discount"]);
        assert_eq!(result.final_price(), Money::from_minor(80_000, USD));
    }

    #[test]
    fn zero_amount_steps_are_not_recorded() {
        let context = vip_bulk_december();
        let composite = CompositeDiscount::new(vec![
            Discount::AmountOff {
                name: "Nothing".to_string(),
                amount: Decimal::ZERO,
            },
            Discount::vip_loyalty(),
        ]);

        let result = composite.apply(&context, context.original_price());

        assert_eq!(result.applied_names(), vec!["VIP Loyalty Discount"]);
    }

    #[test]
    fn nested_composites_flatten_applied_entries() {
        let context = vip_bulk_december();
        let inner =
            CompositeDiscount::new(vec![Discount::vip_loyalty(), Discount::bulk_purchase()]);
        let outer = CompositeDiscount::new(vec![Discount::Composite(inner), Discount::holiday()]);

        let result = outer.apply(&context, context.original_price());

        assert_eq!(
            result.applied_names(),
            vec![
                "VIP Loyalty Discount",
                "Bulk Purchase Discount (10+ items)",
                "Holiday Seasonal Discount"
            ]
        );
        assert_eq!(result.final_price(), Money::from_minor(64_768, USD));
    }

    #[test]
    fn clamped_step_stops_price_at_zero() {
        let context = vip_bulk_december();
        let composite = CompositeDiscount::new(vec![
            Discount::AmountOff {
                name: "Gift Card".to_string(),
                amount: Decimal::new(1_500, 0),
            },
            Discount::vip_loyalty(),
        ]);

        let result = composite.apply(&context, context.original_price());

        assert_eq!(result.final_price(), Money::from_minor(0, USD));
        assert_eq!(result.discount_amount(), Money::from_minor(100_000, USD));
        assert_eq!(result.applied_names(), vec!["Gift Card"]);
    }

    #[test]
    fn empty_composite_is_not_applicable() {
        let context = vip_bulk_december();
        let composite = CompositeDiscount::default();

        assert!(composite.is_empty());
        assert!(!composite.is_applicable(&context));
    }
}
