//! Double-entry journal entries generated from the amortization schedule.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

use sfc_core::types::{Contract, Date};

use crate::amortization::AmortizationSchedule;

/// Tolerance used by [`JournalEntry::is_balanced`].
const BALANCE_TOLERANCE: f64 = 1e-6;

/// Ledger accounts touched by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Account {
    /// Cash.
    Cash,
    /// Contract liability (deferred revenue).
    ContractLiability,
    /// License revenue.
    LicenseRevenue,
    /// Interest income from the financing component.
    InterestIncome,
    /// Support revenue.
    SupportRevenue,
}

impl Account {
    /// Returns the account name used in ledgers and exports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Account::Cash => "Cash",
            Account::ContractLiability => "Contract Liability",
            Account::LicenseRevenue => "License Revenue",
            Account::InterestIncome => "Interest Income",
            Account::SupportRevenue => "Support Revenue",
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// An (account, amount) posting on one side of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JournalLine {
    /// Account posted to.
    pub account: Account,
    /// Amount posted.
    pub amount: f64,
}

impl JournalLine {
    /// Creates a posting.
    #[must_use]
    pub fn new(account: Account, amount: f64) -> Self {
        Self { account, amount }
    }
}

/// A dated, balanced journal entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JournalEntry {
    /// Sequential number starting at 1.
    pub entry_num: usize,
    /// Posting date.
    pub date: Date,
    /// Memo.
    pub description: String,
    /// Debit postings in order.
    pub debits: Vec<JournalLine>,
    /// Credit postings in order.
    pub credits: Vec<JournalLine>,
}

impl JournalEntry {
    /// Creates a two-line entry moving `amount` from `credit` to `debit`.
    #[must_use]
    pub fn simple(
        entry_num: usize,
        date: Date,
        description: impl Into<String>,
        debit: Account,
        credit: Account,
        amount: f64,
    ) -> Self {
        Self {
            entry_num,
            date,
            description: description.into(),
            debits: vec![JournalLine::new(debit, amount)],
            credits: vec![JournalLine::new(credit, amount)],
        }
    }

    /// Sum of debit amounts.
    #[must_use]
    pub fn total_debits(&self) -> f64 {
        self.debits.iter().map(|l| l.amount).sum()
    }

    /// Sum of credit amounts.
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        self.credits.iter().map(|l| l.amount).sum()
    }

    /// Returns true if debits equal credits.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        (self.total_debits() - self.total_credits()).abs() <= BALANCE_TOLERANCE
    }
}

/// Generates the journal for a contract from its schedule.
///
/// Order: cash receipt, license recognition, then an interest entry and a
/// support entry for every period row.
#[must_use]
pub fn generate_journal_entries(
    contract: &Contract,
    schedule: &AmortizationSchedule,
) -> Vec<JournalEntry> {
    let mut entries = Vec::with_capacity(2 + 2 * schedule.period_rows().len());
    let mut push = |date: Date, description: String, debit, credit, amount| {
        let entry_num = entries.len() + 1;
        entries.push(JournalEntry::simple(
            entry_num,
            date,
            description,
            debit,
            credit,
            amount,
        ));
    };

    push(
        contract.payment_date(),
        "Initial cash receipt".to_string(),
        Account::Cash,
        Account::ContractLiability,
        contract.cash_received(),
    );

    if let Some(license) = schedule.license_row() {
        push(
            license.date,
            "License revenue recognition (point in time)".to_string(),
            Account::ContractLiability,
            Account::LicenseRevenue,
            license.revenue_recognized,
        );
    }

    for row in schedule.period_rows() {
        let label = row.period;
        push(
            row.date,
            format!("Interest income - {label}"),
            Account::ContractLiability,
            Account::InterestIncome,
            row.interest_income,
        );
        push(
            row.date,
            format!("Support revenue - {label}"),
            Account::ContractLiability,
            Account::SupportRevenue,
            row.revenue_recognized,
        );
    }

    debug_assert!(entries.iter().all(JournalEntry::is_balanced));
    debug!(entries = entries.len(), "journal entries generated");

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::allocate;
    use crate::amortization::build_schedule;
    use sfc_core::types::ServicePeriod;

    fn setup(n: i32) -> (Contract, AmortizationSchedule) {
        let periods = (0..n)
            .map(|i| {
                ServicePeriod::new(
                    Date::from_ymd(2025 + i, 12, 31).unwrap(),
                    Date::from_ymd(2026 + i, 12, 30).unwrap(),
                    1000.0,
                )
                .unwrap()
            })
            .collect();
        let cash = 1000.0 * f64::from(n);
        let contract =
            Contract::new("Test", cash, Date::from_ymd(2025, 12, 31).unwrap(), periods).unwrap();
        let alloc = allocate(cash * 0.9, 0.2, 0.8, n as usize).unwrap();
        let schedule = build_schedule(&contract, &alloc, cash * 0.1).unwrap();
        (contract, schedule)
    }

    #[test]
    fn test_entry_sequence() {
        let (contract, schedule) = setup(3);
        let entries = generate_journal_entries(&contract, &schedule);

        assert_eq!(entries.len(), 8);
        let nums: Vec<_> = entries.iter().map(|e| e.entry_num).collect();
        assert_eq!(nums, (1..=8).collect::<Vec<_>>());

        assert_eq!(entries[0].description, "Initial cash receipt");
        assert_eq!(entries[0].debits[0].account, Account::Cash);
        assert_eq!(entries[0].credits[0].account, Account::ContractLiability);
        assert_eq!(entries[0].total_debits(), 3000.0);

        assert_eq!(
            entries[1].description,
            "License revenue recognition (point in time)"
        );
        assert_eq!(entries[1].credits[0].account, Account::LicenseRevenue);

        assert_eq!(entries[2].description, "Interest income - Year 1");
        assert_eq!(entries[2].credits[0].account, Account::InterestIncome);
        assert_eq!(entries[3].description, "Support revenue - Year 1");
        assert_eq!(entries[3].credits[0].account, Account::SupportRevenue);
        assert_eq!(entries[7].description, "Support revenue - Year 3");
    }

    #[test]
    fn test_entries_follow_schedule() {
        let (contract, schedule) = setup(2);
        let entries = generate_journal_entries(&contract, &schedule);

        for (i, row) in schedule.period_rows().iter().enumerate() {
            let interest = &entries[2 + 2 * i];
            let support = &entries[3 + 2 * i];
            assert_eq!(interest.date, row.date);
            assert_eq!(interest.total_credits(), row.interest_income);
            assert_eq!(support.date, row.date);
            assert_eq!(support.total_credits(), row.revenue_recognized);
        }
    }

    #[test]
    fn test_all_balanced() {
        let (contract, schedule) = setup(5);
        let entries = generate_journal_entries(&contract, &schedule);
        assert!(entries.iter().all(JournalEntry::is_balanced));
    }

    #[test]
    fn test_unbalanced_entry_detected() {
        let mut entry = JournalEntry::simple(
            1,
            Date::from_ymd(2025, 1, 1).unwrap(),
            "x",
            Account::Cash,
            Account::ContractLiability,
            10.0,
        );
        entry.credits.push(JournalLine::new(Account::SupportRevenue, 1.0));
        assert!(!entry.is_balanced());
    }

    #[test]
    fn test_account_names() {
        assert_eq!(Account::ContractLiability.to_string(), "Contract Liability");
        assert_eq!(
            serde_json::to_string(&Account::InterestIncome).unwrap(),
            "\"Interest Income\""
        );
    }
}
