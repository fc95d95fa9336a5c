//! End-to-end analysis tests against the shared contract fixtures.

use approx::assert_relative_eq;
use proptest::prelude::*;
use std::fs;

use sfc_core::prelude::*;
use sfc_engine::prelude::*;

const DEKA_FIXTURE: &str = "../../tests/fixtures/deka_bank.json";

fn deka() -> Contract {
    let content = fs::read_to_string(DEKA_FIXTURE).expect("Failed to read fixture file");
    let input: ContractInput = serde_json::from_str(&content).expect("Failed to parse fixture JSON");
    input.into_contract().unwrap()
}

// =============================================================================
// Deka Bank: 2,100,000 paid up front for five years at 420,000
// =============================================================================

#[test]
fn test_deka_present_value() {
    let results = analyze(&deka(), 0.06, 0.20, None, true).unwrap();
    let pv = results.pv_analysis.as_ref().unwrap();

    assert_eq!(pv.period_count(), 5);
    assert_eq!(pv.total_stated, 2_100_000.0);
    assert_relative_eq!(pv.rows[0].present_value, 396_226.42, epsilon = 0.01);
    assert_relative_eq!(pv.rows[0].financing_component, 23_773.58, epsilon = 0.01);
    assert_relative_eq!(pv.total_pv, 1_769_192.79, epsilon = 0.01);
    assert_relative_eq!(pv.financing_component, 330_807.21, epsilon = 0.01);
    assert_relative_eq!(pv.financing_pct, 15.7527, epsilon = 1e-4);

    let sum_fc: f64 = pv.rows.iter().map(|r| r.financing_component).sum();
    assert_relative_eq!(sum_fc, pv.financing_component, max_relative = 1e-9);
}

#[test]
fn test_deka_allocation() {
    let results = analyze(&deka(), 0.06, 0.20, None, true).unwrap();
    let alloc = &results.allocation;

    assert_relative_eq!(alloc.license_revenue, 353_838.56, epsilon = 0.01);
    assert_relative_eq!(alloc.support_total, 1_415_354.23, epsilon = 0.01);
    assert_eq!(alloc.annual_support, alloc.support_total / 5.0);
    assert_relative_eq!(
        alloc.license_revenue + alloc.support_total,
        alloc.total_pv,
        max_relative = 1e-9
    );
}

#[test]
fn test_deka_schedule() {
    let contract = deka();
    let results = analyze(&contract, 0.06, 0.20, None, true).unwrap();
    let schedule = &results.amortization_schedule;

    assert_eq!(schedule.len(), 6);

    let license = schedule.license_row().unwrap();
    assert_eq!(license.period.to_string(), "License Delivery");
    assert_eq!(license.opening_liability, 2_100_000.0);
    assert_relative_eq!(license.ending_liability, 1_746_161.44, epsilon = 0.01);

    let year1 = &schedule.rows()[1];
    assert_eq!(year1.period.to_string(), "Year 1");
    assert_eq!(year1.date, Date::from_ymd(2026, 12, 30).unwrap());
    assert_relative_eq!(year1.interest_income, 97_903.92, epsilon = 0.01);

    // Interest declines with the outstanding balance
    for pair in schedule.period_rows().windows(2) {
        assert!(pair[1].interest_income < pair[0].interest_income);
    }

    let rec = &results.reconciliation;
    assert!(rec.is_reconciled);
    assert!(rec.difference.abs() < 1.0);
    assert_relative_eq!(rec.total_interest, 330_807.21, epsilon = 0.01);
    assert_relative_eq!(
        rec.residual_liability,
        contract.cash_received() - results.transaction_price.total_pv
            + results.transaction_price.financing_component,
        epsilon = 1e-6
    );
}

#[test]
fn test_deka_journal() {
    let results = analyze(&deka(), 0.06, 0.20, None, true).unwrap();
    let entries = &results.journal_entries;

    assert_eq!(entries.len(), 12);
    assert!(entries.iter().all(JournalEntry::is_balanced));
    assert_eq!(entries[0].total_debits(), 2_100_000.0);
    assert_eq!(entries[0].date, Date::from_ymd(2025, 12, 31).unwrap());
    assert_eq!(entries[10].description, "Interest income - Year 5");
    assert_eq!(entries[11].description, "Support revenue - Year 5");
    assert_eq!(entries[11].date, Date::from_ymd(2030, 12, 30).unwrap());
}

#[test]
fn test_deka_summary() {
    let results = analyze(&deka(), 0.06, 0.20, None, true).unwrap();
    let summary = &results.summary;

    assert_eq!(summary.customer, "Deka Bank");
    assert_eq!(summary.cash_received, 2_100_000.0);
    assert_eq!(summary.total_stated, 2_100_000.0);
    assert_eq!(summary.discount_rate, 0.06);
    assert_relative_eq!(summary.license_pct, 20.0);
    assert_relative_eq!(summary.support_pct, 80.0);
    assert!(summary.is_significant);
}

#[test]
fn test_deka_exact_days() {
    let integer = analyze(&deka(), 0.06, 0.20, None, true).unwrap();
    let exact = analyze(&deka(), 0.06, 0.20, None, false).unwrap();

    // Every period ends one day short of a full year, so exact days discount less
    assert!(exact.transaction_price.total_pv > integer.transaction_price.total_pv);
    assert!(exact.reconciliation.is_reconciled);
}

// =============================================================================
// Override and edge cases
// =============================================================================

#[test]
fn test_override_path() {
    let contract = deka();
    let results = analyze(&contract, 0.06, 0.20, Some(1_800_000.0), true).unwrap();

    assert!(results.pv_analysis.is_none());
    assert_eq!(results.transaction_price.source, PriceSource::Override);
    assert_eq!(results.summary.transaction_price, 1_800_000.0);
    assert_eq!(
        results.summary.financing_component,
        contract.cash_received() - 1_800_000.0
    );
    assert_relative_eq!(
        results.summary.financing_pct,
        300_000.0 / 2_100_000.0 * 100.0,
        max_relative = 1e-12
    );
    assert!(results.reconciliation.is_reconciled);
    assert_eq!(results.journal_entries.len(), 12);
}

#[test]
fn test_single_period() {
    let period = ServicePeriod::new(
        Date::from_ymd(2025, 1, 1).unwrap(),
        Date::from_ymd(2025, 12, 31).unwrap(),
        100_000.0,
    )
    .unwrap();
    let contract =
        Contract::new("Solo", 100_000.0, Date::from_ymd(2025, 1, 1).unwrap(), vec![period]).unwrap();
    let results = analyze(&contract, 0.06, 0.20, None, true).unwrap();

    assert_eq!(results.amortization_schedule.len(), 2);
    assert_eq!(results.journal_entries.len(), 4);
    assert_relative_eq!(
        results.amortization_schedule.period_rows()[0].interest_income,
        results.transaction_price.financing_component,
        max_relative = 1e-12
    );
}

#[test]
fn test_zero_rate_runs_off_to_zero() {
    let results = analyze(&deka(), 0.0, 0.20, None, true).unwrap();
    assert_eq!(results.transaction_price.financing_component, 0.0);
    assert_relative_eq!(
        results.reconciliation.residual_liability,
        0.0,
        epsilon = 1.0
    );
}

#[test]
fn test_idempotent() {
    let contract = deka();
    let first = analyze(&contract, 0.06, 0.20, None, false).unwrap();
    let second = analyze(&contract, 0.06, 0.20, None, false).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_error_kinds() {
    let contract = deka();
    assert_eq!(
        analyze(&contract, -1.0, 0.2, None, true).unwrap_err().code(),
        "DEGENERATE_RATE"
    );
    assert_eq!(
        analyze(&contract, 0.06, -0.1, None, true).unwrap_err().code(),
        "INVALID_ALLOCATION"
    );
    assert_eq!(
        analyze(&contract, 0.06, 0.2, Some(-5.0), true).unwrap_err().code(),
        "INVALID_AMOUNT"
    );
}

#[test]
fn test_results_serialize() {
    let results = analyze(&deka(), 0.06, 0.20, None, true).unwrap();
    let json = serde_json::to_value(&results).unwrap();

    assert_eq!(json["summary"]["customer"], "Deka Bank");
    assert_eq!(json["amortization_schedule"]["rows"][0]["period"], "License Delivery");
    assert_eq!(json["journal_entries"][0]["debits"][0]["account"], "Cash");
    assert_eq!(json["transaction_price"]["source"], "discounted");
}

// =============================================================================
// Properties over generated contracts
// =============================================================================

fn contract_strategy() -> impl Strategy<Value = Contract> {
    prop::collection::vec(1_000.0f64..1_000_000.0, 1..10).prop_map(|amounts| {
        let periods: Vec<ServicePeriod> = amounts
            .iter()
            .enumerate()
            .map(|(i, &amount)| {
                let start = Date::from_ymd(2025, 1, 1).unwrap().add_days(365 * i as i64);
                ServicePeriod::new(start, start.add_days(364), amount).unwrap()
            })
            .collect();
        let cash = amounts.iter().sum();
        Contract::new("Generated", cash, Date::from_ymd(2025, 1, 1).unwrap(), periods).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_schedule_reconciles(
        contract in contract_strategy(),
        rate in 0.0f64..0.20,
        license_pct in 0.0f64..=1.0,
        integer_years in any::<bool>(),
    ) {
        let results = analyze(&contract, rate, license_pct, None, integer_years).unwrap();
        let n = contract.period_count();

        prop_assert_eq!(results.amortization_schedule.len(), n + 1);
        prop_assert_eq!(results.journal_entries.len(), 2 + 2 * n);
        prop_assert!(results.reconciliation.difference.abs() < 1.0);
        prop_assert!(results.journal_entries.iter().all(JournalEntry::is_balanced));

        let alloc = &results.allocation;
        prop_assert_eq!(alloc.annual_support, alloc.support_total / n as f64);
        prop_assert!(
            (alloc.license_revenue + alloc.support_total - alloc.total_pv).abs()
                <= 1e-9 * alloc.total_pv
        );

        let price = &results.transaction_price;
        let expected_residual = contract.cash_received() - price.total_pv + price.financing_component;
        prop_assert!((results.reconciliation.residual_liability - expected_residual).abs() < 1e-3);
    }

    #[test]
    fn prop_present_value_per_period(
        contract in contract_strategy(),
        rate in 0.0f64..0.20,
    ) {
        let pv = calculate_present_value(&contract, rate, DiscountConvention::IntegerYears).unwrap();
        for row in &pv.rows {
            let expected = row.stated_amount / (1.0 + rate).powf(row.years_from_payment);
            prop_assert!((row.present_value - expected).abs() <= 1e-9 * row.stated_amount);
            prop_assert_eq!(row.financing_component, row.stated_amount - row.present_value);
        }
    }

    #[test]
    fn prop_entry_numbers_contiguous(contract in contract_strategy()) {
        let results = analyze(&contract, 0.06, 0.2, None, true).unwrap();
        for (i, entry) in results.journal_entries.iter().enumerate() {
            prop_assert_eq!(entry.entry_num, i + 1);
        }
    }
}
