//! Discounts
//!
//! A discount is a single pricing adjustment: it knows whether it applies to a context
//! and how much to take off a running price. Every variant is plain data, so a rule table
//! can hold one as a template and hand out copies when the rule matches.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};

use crate::{
    context::{CustomerType, DiscountContext},
    discounts::{composite::CompositeDiscount, season::Season},
    results::DiscountResult,
};

pub mod composite;
pub mod season;

/// Minimum quantity for the standard bulk purchase discount.
pub const BULK_PURCHASE_MIN_QUANTITY: u32 = 10;

/// A single pricing adjustment strategy.
#[derive(Debug, Clone)]
pub enum Discount {
    /// Percentage off for a customer's first purchase.
    FirstTimeCustomer {
        /// Fraction of the running price taken off
        rate: Percentage,
    },

    /// Percentage off for customers in a loyalty tier.
    Loyalty {
        /// Tier the customer must belong to
        tier: CustomerType,

        /// Fraction of the running price taken off
        rate: Percentage,
    },

    /// Percentage off when buying at least `min_quantity` items.
    BulkPurchase {
        /// Minimum purchase quantity
        min_quantity: u32,

        /// Fraction of the running price taken off
        rate: Percentage,
    },

    /// Percentage off for purchases made during a season.
    Seasonal {
        /// Months the discount is valid for
        season: Season,

        /// Fraction of the running price taken off
        rate: Percentage,
    },

    /// Fixed amount off the running price (e.g. "$5 off").
    ///
    /// The amount is expressed in the context's currency.
    AmountOff {
        /// Display name
        name: String,

        /// Amount subtracted from the running price
        amount: Decimal,
    },

    /// Several discounts applied one after another.
    Composite(CompositeDiscount),
}

impl Discount {
    /// 15% off a first purchase.
    pub fn first_time_customer() -> Self {
        Discount::FirstTimeCustomer {
            rate: Percentage::from(Decimal::new(15, 2)),
        }
    }

    /// 20% off for VIP customers.
    pub fn vip_loyalty() -> Self {
        Discount::Loyalty {
            tier: CustomerType::Vip,
            rate: Percentage::from(Decimal::new(20, 2)),
        }
    }

    /// 10% off for Premium customers.
    pub fn premium_loyalty() -> Self {
        Discount::Loyalty {
            tier: CustomerType::Premium,
            rate: Percentage::from(Decimal::new(10, 2)),
        }
    }

    /// 8% off orders of [`BULK_PURCHASE_MIN_QUANTITY`] or more items.
    pub fn bulk_purchase() -> Self {
        Discount::BulkPurchase {
            min_quantity: BULK_PURCHASE_MIN_QUANTITY,
            rate: Percentage::from(Decimal::new(8, 2)),
        }
    }

    /// 12% off in December.
    pub fn holiday() -> Self {
        Discount::Seasonal {
            season: Season::holiday(),
            rate: Percentage::from(Decimal::new(12, 2)),
        }
    }

    /// 5% off from June to August.
    pub fn summer() -> Self {
        Discount::Seasonal {
            season: Season::summer(),
            rate: Percentage::from(Decimal::new(5, 2)),
        }
    }

    /// Human-readable discount label.
    pub fn name(&self) -> String {
        match self {
            Discount::FirstTimeCustomer { .. } => "First Time Customer Discount".to_string(),
            Discount::Loyalty { tier, .. } => format!("{tier} Loyalty Discount"),
            Discount::BulkPurchase { min_quantity, .. } => {
                format!("Bulk Purchase Discount ({min_quantity}+ items)")
            }
            Discount::Seasonal { season, .. } => format!("{season} Seasonal Discount"),
            Discount::AmountOff { name, .. } => name.clone(),
            Discount::Composite(_) => "Combined Discount".to_string(),
        }
    }

    /// Whether this discount applies to the given context.
    pub fn is_applicable(&self, context: &DiscountContext<'_>) -> bool {
        match self {
            Discount::FirstTimeCustomer { .. } => context.is_first_time_customer(),
            Discount::Loyalty { tier, .. } => context.customer_type() == *tier,
            Discount::BulkPurchase { min_quantity, .. } => context.quantity() >= *min_quantity,
            Discount::Seasonal { season, .. } => season.contains(context.purchase_date().month()),
            Discount::AmountOff { .. } => true,
            Discount::Composite(composite) => composite.is_applicable(context),
        }
    }

    /// Apply this discount to `current_price`, which may already be discounted.
    ///
    /// When the discount does not apply, the result carries no discount and its summary is
    /// tagged "(not eligible)".
    pub fn apply<'a>(
        &self,
        context: &DiscountContext<'a>,
        current_price: Money<'a, Currency>,
    ) -> DiscountResult<'a> {
        if !self.is_applicable(context) {
            return DiscountResult::not_eligible(current_price, &self.name());
        }

        if let Discount::Composite(composite) = self {
            return composite.apply(context, current_price);
        }

        let amount = self.amount_off(*current_price.amount());

        DiscountResult::single(current_price, self.name(), amount)
    }

    /// Amount taken off `current`, capped so the running price never goes below zero.
    fn amount_off(&self, current: Decimal) -> Decimal {
        let amount = match self {
            Discount::FirstTimeCustomer { rate }
            | Discount::Loyalty { rate, .. }
            | Discount::BulkPurchase { rate, .. }
            | Discount::Seasonal { rate, .. } => rate_of(rate)
                .checked_mul(current)
                .unwrap_or(current),
            Discount::AmountOff { amount, .. } => *amount,
            Discount::Composite(_) => Decimal::ZERO,
        };

        amount.min(current).max(Decimal::ZERO)
    }
}

/// The rate as a plain decimal fraction.
pub(crate) fn rate_of(percent: &Percentage) -> Decimal {
    // decimal_percentage doesn't expose the underlying Decimal
    (*percent) * Decimal::ONE
}
