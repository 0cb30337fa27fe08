//! Integration tests for rule sets loaded from YAML fixtures.

use std::fs;

use jiff::civil::date;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use cascade::{
    calculator::Calculator,
    context::{CustomerType, DiscountContext},
    fixtures::{Fixture, FixtureError},
    rules::RuleSet,
};

#[test]
fn default_fixture_matches_built_in_policy() -> TestResult {
    let loaded = Calculator::new(Fixture::new().load_rules("default")?);
    let built_in = Calculator::new(RuleSet::default_policy());

    let names = |rules: &RuleSet| -> Vec<(String, i32)> {
        rules
            .iter()
            .map(|rule| (rule.name().to_string(), rule.priority()))
            .collect()
    };

    assert_eq!(names(loaded.rules()), names(built_in.rules()));

    for customer_type in [CustomerType::Regular, CustomerType::Premium, CustomerType::Vip] {
        for (quantity, month, first_time) in [(1, 3, false), (12, 7, true), (10, 12, false)] {
            let context = DiscountContext::new(
                Money::from_minor(24_999, USD),
                customer_type,
                quantity,
                date(2024, month, 20),
            )
            .first_time_customer(first_time);

            let from_fixture = loaded.calculate(&context)?;
            let from_code = built_in.calculate(&context)?;

            assert_eq!(from_fixture.final_price(), from_code.final_price());
            assert_eq!(from_fixture.applied(), from_code.applied());
        }
    }

    Ok(())
}

#[test]
fn tiebreak_fixture_keeps_declaration_order() -> TestResult {
    let calculator = Calculator::new(Fixture::new().load_rules("tiebreak")?);
    let context = DiscountContext::new(
        Money::from_minor(10_000, USD),
        CustomerType::Regular,
        1,
        date(2024, 3, 1),
    );

    let result = calculator.calculate(&context)?;

    assert_eq!(result.applied_names(), vec!["Rule X", "Rule Y"]);
    assert_eq!(result.final_price(), Money::from_minor(7_000, USD));

    Ok(())
}

#[test]
fn garden_fixture_combines_nested_conditions_and_composites() -> TestResult {
    let calculator = Calculator::new(Fixture::new().load_rules("garden")?);

    let club_member = DiscountContext::new(
        Money::from_minor(10_000, USD),
        CustomerType::Vip,
        1,
        date(2024, 4, 2),
    )
    .with_category("Garden")
    .with_lifetime_value(rust_decimal::Decimal::new(1_500, 0));

    let result = calculator.calculate(&club_member)?;

    // 100 x 0.80 = 80, - 5 = 75, x 0.90 = 67.50
    assert_eq!(result.final_price(), Money::from_minor(6_750, USD));
    assert_eq!(
        result.applied_names(),
        vec![
            "VIP Loyalty Discount",
            "Garden Club Voucher",
            "Spring Seasonal Discount",
        ]
    );

    let outsider = DiscountContext::new(
        Money::from_minor(10_000, USD),
        CustomerType::Regular,
        1,
        date(2024, 4, 2),
    )
    .with_category("garden");

    let result = calculator.calculate(&outsider)?;

    assert!(result.applied().is_empty());

    Ok(())
}

#[test]
fn loads_rules_from_custom_base_path() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("rules"))?;
    fs::write(
        dir.path().join("rules").join("weekend.yml"),
        r#"
rules:
  - name: Bulk Weekend
    priority: 1
    when:
      predicates:
        - type: min_quantity
          value: 3
    discount:
      type: bulk_purchase
      min_quantity: 3
      rate: 0.25
"#,
    )?;

    let rules = Fixture::with_base_path(dir.path()).load_rules("weekend")?;
    let context = DiscountContext::new(
        Money::from_minor(2_000, USD),
        CustomerType::Regular,
        3,
        date(2024, 5, 4),
    );

    let result = Calculator::new(rules).calculate(&context)?;

    assert_eq!(result.final_price(), Money::from_minor(1_500, USD));
    assert_eq!(
        result.applied_names(),
        vec!["Bulk Purchase Discount (3+ items)"]
    );

    Ok(())
}

#[test]
fn duplicate_rule_names_are_rejected() -> TestResult {
    let dir = tempfile::tempdir()?;
    fs::create_dir_all(dir.path().join("rules"))?;
    fs::write(
        dir.path().join("rules").join("dupes.yml"),
        r#"
rules:
  - name: Voucher
    priority: 1
    discount: { type: amount_off, name: Voucher, amount: 5 }
  - name: Voucher
    priority: 2
    discount: { type: amount_off, name: Voucher, amount: 10 }
"#,
    )?;

    let result = Fixture::with_base_path(dir.path()).load_rules("dupes");

    assert!(matches!(result, Err(FixtureError::DuplicateRule(name)) if name == "Voucher"));

    Ok(())
}
