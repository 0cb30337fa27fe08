//! Discount Calculator
//!
//! Entry point for pricing: validate the context, build the discount chain from the rule
//! set and run it against the original price.

use tracing::instrument;

use crate::{
    context::{ContextError, DiscountContext},
    observer::{CalculationObserver, TracingObserver},
    results::DiscountResult,
    rules::{RuleSet, chain::build_chain},
};

/// Facade over a rule set.
#[derive(Debug, Clone)]
pub struct Calculator {
    rules: RuleSet,
}

impl Calculator {
    /// Create a calculator for the given rules.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Rules this calculator evaluates.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Calculate the discount for a context, logging matches and totals through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] if the context fails validation.
    pub fn calculate<'a>(
        &self,
        context: &DiscountContext<'a>,
    ) -> Result<DiscountResult<'a>, ContextError> {
        self.calculate_with_observer(context, &mut TracingObserver)
    }

    /// Calculate the discount for a context, reporting progress to `observer`.
    ///
    /// No matching rule is not an error: the result then carries the original price and an
    /// empty list of applied discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`ContextError`] if the context fails validation.
    #[instrument(
        name = "calculate_discount",
        skip_all,
        fields(
            customer_type = %context.customer_type(),
            quantity = context.quantity(),
            original_price = %context.original_price(),
        )
    )]
    pub fn calculate_with_observer<'a, O: CalculationObserver + ?Sized>(
        &self,
        context: &DiscountContext<'a>,
        observer: &mut O,
    ) -> Result<DiscountResult<'a>, ContextError> {
        context.validate()?;

        let result = match build_chain(&self.rules, context, &mut *observer) {
            Some(chain) => chain.apply(context, context.original_price()).rounded(),
            None => DiscountResult::none(context.original_price()),
        };

        for applied in result.applied() {
            observer.on_discount_applied(applied);
        }

        observer.on_calculation_complete(&result);

        Ok(result)
    }
}

impl Default for Calculator {
    /// Calculator for [`RuleSet::default_policy`].
    fn default() -> Self {
        Self::new(RuleSet::default_policy())
    }
}
