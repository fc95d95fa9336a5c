//! Parses the shared contract fixtures through the raw input record.

use sfc_core::types::{ContractInput, Date};
use std::fs;

/// Path to the shared contract fixture
const DEKA_FIXTURE: &str = "../../tests/fixtures/deka_bank.json";

fn load(path: &str) -> ContractInput {
    let content = fs::read_to_string(path).expect("Failed to read fixture file");
    serde_json::from_str(&content).expect("Failed to parse fixture JSON")
}

#[test]
fn test_deka_fixture_parses() {
    let contract = load(DEKA_FIXTURE).into_contract().unwrap();

    assert_eq!(contract.customer(), "Deka Bank");
    assert_eq!(contract.cash_received(), 2_100_000.0);
    assert_eq!(contract.period_count(), 5);
    assert_eq!(contract.total_stated(), 2_100_000.0);
    assert!(contract.overlapping_periods().is_empty());

    let last = contract.periods().last().unwrap();
    assert_eq!(last.end(), Date::from_ymd(2030, 12, 30).unwrap());
}

#[test]
fn test_periods_are_chronological() {
    let contract = load(DEKA_FIXTURE).into_contract().unwrap();
    for pair in contract.periods().windows(2) {
        assert!(pair[0].end() < pair[1].start());
    }
}
