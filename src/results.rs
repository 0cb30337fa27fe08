//! Discount Results

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};

/// Summary used when nothing was taken off.
pub const NO_DISCOUNTS_APPLIED: &str = "No discounts applied";

/// One discount that took money off the running price.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedDiscount<'a> {
    /// Discount display name
    pub name: String,

    /// Amount taken off by this discount
    pub amount: Money<'a, Currency>,

    /// Running price after this discount
    pub price_after: Money<'a, Currency>,
}

/// Outcome of applying one or more discounts to a price.
#[derive(Debug, Clone)]
pub struct DiscountResult<'a> {
    /// Price the discounts were applied to
    original_price: Money<'a, Currency>,

    /// Total taken off, never negative
    discount_amount: Money<'a, Currency>,

    /// Price after all discounts, never negative
    final_price: Money<'a, Currency>,

    /// Applied discounts in application order
    applied: SmallVec<[AppliedDiscount<'a>; 4]>,

    /// Human-readable summary
    summary: String,
}

impl<'a> DiscountResult<'a> {
    /// A result that leaves the price untouched.
    pub fn none(price: Money<'a, Currency>) -> Self {
        Self {
            original_price: price,
            discount_amount: Money::from_decimal(Decimal::ZERO, price.currency()),
            final_price: price,
            applied: SmallVec::new(),
            summary: NO_DISCOUNTS_APPLIED.to_string(),
        }
    }

    /// A zero-discount result for a discount that does not apply.
    pub fn not_eligible(price: Money<'a, Currency>, name: &str) -> Self {
        Self {
            summary: format!("{name} (not eligible)"),
            ..Self::none(price)
        }
    }

    /// A result for a single discount taking `amount` off `price`.
    pub fn single(price: Money<'a, Currency>, name: String, amount: Decimal) -> Self {
        let currency = price.currency();
        let remaining = *price.amount() - amount;

        let applied = smallvec![AppliedDiscount {
            name,
            amount: Money::from_decimal(amount, currency),
            price_after: Money::from_decimal(remaining, currency),
        }];

        Self::from_parts(price, amount, remaining, applied)
    }

    /// Assemble a result from the totals of a discount chain.
    pub fn from_parts(
        price: Money<'a, Currency>,
        discount_amount: Decimal,
        final_price: Decimal,
        applied: SmallVec<[AppliedDiscount<'a>; 4]>,
    ) -> Self {
        let currency = price.currency();
        let discount_amount = Money::from_decimal(discount_amount, currency);
        let summary = summarize(&applied, discount_amount);

        Self {
            original_price: price,
            discount_amount,
            final_price: Money::from_decimal(final_price, currency),
            applied,
            summary,
        }
    }

    /// Price the discounts were applied to.
    pub fn original_price(&self) -> Money<'a, Currency> {
        self.original_price
    }

    /// Total taken off.
    pub fn discount_amount(&self) -> Money<'a, Currency> {
        self.discount_amount
    }

    /// Price after all discounts.
    pub fn final_price(&self) -> Money<'a, Currency> {
        self.final_price
    }

    /// Applied discounts in application order.
    ///
    /// After [`DiscountResult::rounded`] the step amounts are whole minor units and sum to
    /// [`DiscountResult::discount_amount`].
    pub fn applied(&self) -> &[AppliedDiscount<'a>] {
        &self.applied
    }

    /// Names of the applied discounts in application order.
    pub fn applied_names(&self) -> Vec<&str> {
        self.applied
            .iter()
            .map(|applied| applied.name.as_str())
            .collect()
    }

    /// Human-readable summary.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Whether anything was taken off.
    pub fn is_discounted(&self) -> bool {
        *self.discount_amount.amount() > Decimal::ZERO
    }

    /// Fraction of the original price that was taken off.
    pub fn savings_percent(&self) -> Percentage {
        let savings = self
            .discount_amount
            .amount()
            .checked_div(*self.original_price.amount())
            .unwrap_or(Decimal::ZERO);

        Percentage::from(savings)
    }

    /// Round the final price and every running price to the currency's minor unit.
    ///
    /// Amounts are recomputed from the rounded prices, so each step's amount is the
    /// difference between consecutive running prices. The steps then sum to the total
    /// and `final_price + discount_amount == original_price` holds exactly.
    #[must_use]
    pub fn rounded(self) -> Self {
        let currency = self.original_price.currency();
        let original = *self.original_price.amount();
        let round = |amount: &Decimal| {
            amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
        };

        let final_price = round(self.final_price.amount());

        let mut price_before = original;
        let applied = self
            .applied
            .into_iter()
            .map(|step| {
                let price_after = round(step.price_after.amount());
                let amount = price_before - price_after;

                price_before = price_after;

                AppliedDiscount {
                    name: step.name,
                    amount: Money::from_decimal(amount, currency),
                    price_after: Money::from_decimal(price_after, currency),
                }
            })
            .collect();

        Self::from_parts(self.original_price, original - final_price, final_price, applied)
    }
}

fn summarize(applied: &[AppliedDiscount<'_>], total: Money<'_, Currency>) -> String {
    if applied.is_empty() {
        return NO_DISCOUNTS_APPLIED.to_string();
    }

    let names = applied
        .iter()
        .map(|applied| applied.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Applied {} discount(s): {names}. Saved {total}",
        applied.len()
    )
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};

    use super::*;

    #[test]
    fn none_keeps_price() {
        let price = Money::from_minor(10_000, USD);
        let result = DiscountResult::none(price);

        assert_eq!(result.final_price(), price);
        assert_eq!(result.discount_amount(), Money::from_minor(0, USD));
        assert!(!result.is_discounted());
        assert_eq!(result.summary(), NO_DISCOUNTS_APPLIED);
    }

    #[test]
    fn single_records_the_step() {
        let price = Money::from_minor(25_000, USD);
        let result = DiscountResult::single(price, "Voucher".to_string(), Decimal::new(25, 0));

        assert_eq!(result.final_price(), Money::from_minor(22_500, USD));
        assert_eq!(
            result.applied(),
            &[AppliedDiscount {
                name: "Voucher".to_string(),
                amount: Money::from_minor(2_500, USD),
                price_after: Money::from_minor(22_500, USD),
            }]
        );
        assert!(result.summary().starts_with("Applied 1 discount(s): Voucher."));
    }

    #[test]
    fn rounded_keeps_conservation_exact() {
        let price = Money::from_minor(25_000, USD);
        let result = DiscountResult::from_parts(
            price,
            Decimal::new(48_125, 3),
            Decimal::new(201_875, 3),
            SmallVec::new(),
        )
        .rounded();

        assert_eq!(result.final_price(), Money::from_minor(20_188, USD));
        assert_eq!(result.discount_amount(), Money::from_minor(4_812, USD));
        assert_eq!(
            *result.final_price().amount() + *result.discount_amount().amount(),
            *price.amount()
        );
    }

    #[test]
    fn rounded_steps_reconcile_with_total() {
        let price = Money::from_minor(25_000, USD);
        let applied = smallvec![
            AppliedDiscount {
                name: "First Time Customer Discount".to_string(),
                amount: Money::from_decimal(Decimal::new(3_750, 2), USD),
                price_after: Money::from_decimal(Decimal::new(21_250, 2), USD),
            },
            AppliedDiscount {
                name: "Summer Seasonal Discount".to_string(),
                amount: Money::from_decimal(Decimal::new(10_625, 3), USD),
                price_after: Money::from_decimal(Decimal::new(201_875, 3), USD),
            },
        ];

        let result = DiscountResult::from_parts(
            price,
            Decimal::new(48_125, 3),
            Decimal::new(201_875, 3),
            applied,
        )
        .rounded();

        let amounts: Vec<_> = result.applied().iter().map(|step| step.amount).collect();

        assert_eq!(
            amounts,
            vec![Money::from_minor(3_750, USD), Money::from_minor(1_062, USD)]
        );
        assert_eq!(
            result.applied().last().map(|step| step.price_after),
            Some(result.final_price())
        );
        assert_eq!(
            amounts.iter().map(|amount| *amount.amount()).sum::<Decimal>(),
            *result.discount_amount().amount()
        );
    }

    #[test]
    fn savings_percent_handles_zero_price() {
        let result = DiscountResult::none(Money::from_minor(0, GBP));

        assert_eq!(result.savings_percent(), Percentage::from(Decimal::ZERO));
    }

    #[test]
    fn savings_percent_is_fraction_of_original() {
        let result = DiscountResult::single(
            Money::from_minor(20_000, GBP),
            "Half".to_string(),
            Decimal::new(100, 0),
        );

        assert_eq!(result.savings_percent(), Percentage::from(Decimal::new(5, 1)));
    }
}
