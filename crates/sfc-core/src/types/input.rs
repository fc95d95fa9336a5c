//! Loosely typed contract record as it arrives from JSON.
//!
//! [`ContractInput`] mirrors the wire shape (`customer`, `cash_received`,
//! `payment_date`, `periods[]`) with every field optional, so that a missing
//! field is reported as `MissingField` rather than as a serde error.

use serde::{Deserialize, Serialize};

use super::{Contract, Date, ServicePeriod};
use crate::error::{SfcError, SfcResult};

/// Raw service period record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodInput {
    /// Period start (`YYYY-MM-DD`).
    #[serde(default)]
    pub start: Option<String>,
    /// Period end (`YYYY-MM-DD`).
    #[serde(default)]
    pub end: Option<String>,
    /// Stated amount for the period.
    #[serde(default)]
    pub stated_amount: Option<f64>,
}

/// Raw contract record.
///
/// # Example
///
/// ```rust
/// use sfc_core::types::ContractInput;
///
/// let json = r#"{
///     "customer": "Deka Bank",
///     "cash_received": 420000,
///     "payment_date": "2025-12-31",
///     "periods": [{"start": "2025-12-31", "end": "2026-12-30", "stated_amount": 420000}]
/// }"#;
/// let input: ContractInput = serde_json::from_str(json).unwrap();
/// let contract = input.into_contract().unwrap();
/// assert_eq!(contract.period_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractInput {
    /// Customer name.
    #[serde(default)]
    pub customer: Option<String>,
    /// Up-front cash payment.
    #[serde(default)]
    pub cash_received: Option<f64>,
    /// Payment date (`YYYY-MM-DD`).
    #[serde(default)]
    pub payment_date: Option<String>,
    /// Service periods in contract order.
    #[serde(default)]
    pub periods: Option<Vec<PeriodInput>>,
}

impl ContractInput {
    /// Validates the record and builds a [`Contract`].
    ///
    /// Fields are checked in declaration order and the first problem is
    /// returned.
    ///
    /// # Errors
    ///
    /// `MissingField`, `InvalidDate`, `InvalidAmount` or `InvalidPeriod`.
    pub fn into_contract(self) -> SfcResult<Contract> {
        let customer = self
            .customer
            .ok_or_else(|| SfcError::missing_field("customer"))?;
        let cash_received = self
            .cash_received
            .ok_or_else(|| SfcError::missing_field("cash_received"))?;
        let payment_date = self
            .payment_date
            .as_deref()
            .ok_or_else(|| SfcError::missing_field("payment_date"))
            .and_then(|s| Date::parse_field("payment_date", s))?;
        let raw_periods = self
            .periods
            .ok_or_else(|| SfcError::missing_field("periods"))?;

        let periods = raw_periods
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_period(i))
            .collect::<SfcResult<Vec<_>>>()?;

        Contract::new(customer, cash_received, payment_date, periods)
    }
}

impl PeriodInput {
    fn into_period(self, i: usize) -> SfcResult<ServicePeriod> {
        let field = |name: &str| format!("periods[{i}].{name}");

        let start = self
            .start
            .as_deref()
            .ok_or_else(|| SfcError::missing_field(field("start")))
            .and_then(|s| Date::parse_field(&field("start"), s))?;
        let end = self
            .end
            .as_deref()
            .ok_or_else(|| SfcError::missing_field(field("end")))
            .and_then(|s| Date::parse_field(&field("end"), s))?;
        let stated_amount = self
            .stated_amount
            .ok_or_else(|| SfcError::missing_field(field("stated_amount")))?;

        ServicePeriod::validated(i + 1, start, end, stated_amount)
    }
}

impl From<&Contract> for ContractInput {
    fn from(contract: &Contract) -> Self {
        Self {
            customer: Some(contract.customer().to_string()),
            cash_received: Some(contract.cash_received()),
            payment_date: Some(contract.payment_date().to_string()),
            periods: Some(
                contract
                    .periods()
                    .iter()
                    .map(|p| PeriodInput {
                        start: Some(p.start().to_string()),
                        end: Some(p.end().to_string()),
                        stated_amount: Some(p.stated_amount()),
                    })
                    .collect(),
            ),
        }
    }
}

impl TryFrom<ContractInput> for Contract {
    type Error = SfcError;

    fn try_from(input: ContractInput) -> SfcResult<Self> {
        input.into_contract()
    }
}
