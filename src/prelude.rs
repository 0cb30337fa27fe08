//! Cascade prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    calculator::Calculator,
    context::{ContextError, CustomerType, CustomerTypeError, DiscountContext},
    discounts::{
        BULK_PURCHASE_MIN_QUANTITY, Discount, composite::CompositeDiscount, season::Season,
    },
    fixtures::{Fixture, FixtureError, rules_from_path, rules_from_str},
    observer::{CalculationObserver, NoopObserver, TraceEvent, TraceLog, TracingObserver},
    receipt::{ReceiptError, write_to},
    results::{AppliedDiscount, DiscountResult, NO_DISCOUNTS_APPLIED},
    rules::{
        DiscountRule, RuleSet,
        chain::build_chain,
        condition::{BoolOp, Condition, Predicate},
    },
};
