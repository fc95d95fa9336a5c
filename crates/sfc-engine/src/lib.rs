//! # SFC Engine
//!
//! Calculation engine for the significant financing component of a contract
//! paid up front for a license and several years of support.
//!
//! The engine is a fixed pipeline of pure stages:
//!
//! - **Present value**: discount each period's stated amount to the payment date
//! - **Allocation**: split the transaction price between license and support
//! - **Amortization**: liability schedule with interest accretion
//! - **Journal**: balanced entries for each schedule row
//! - **Analysis**: run the stages in order and summarize
//!
//! ## Usage
//!
//! ```rust
//! use sfc_core::prelude::*;
//! use sfc_engine::prelude::*;
//!
//! let periods = vec![
//!     ServicePeriod::new(Date::parse("2025-12-31")?, Date::parse("2026-12-30")?, 420_000.0)?,
//!     ServicePeriod::new(Date::parse("2026-12-31")?, Date::parse("2027-12-30")?, 420_000.0)?,
//! ];
//! let contract = Contract::new("Deka Bank", 840_000.0, Date::parse("2025-12-31")?, periods)?;
//!
//! let results = analyze(&contract, 0.06, 0.20, None, true)?;
//! assert_eq!(results.journal_entries.len(), 6);
//! assert!(results.reconciliation.is_reconciled);
//! # Ok::<(), SfcError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

pub mod allocation;
pub mod amortization;
pub mod analysis;
pub mod config;
pub mod journal;
pub mod present_value;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::allocation::{allocate, Allocation, PriceSource, TransactionPrice};
    pub use crate::amortization::{
        build_schedule, AmortizationSchedule, PeriodLabel, Reconciliation, ScheduleRow,
    };
    pub use crate::analysis::{analyze, analyze_with_config, AnalysisResults, Summary};
    pub use crate::config::{AnalysisConfig, DEFAULT_DISCOUNT_RATE, DEFAULT_LICENSE_PCT};
    pub use crate::journal::{generate_journal_entries, Account, JournalEntry, JournalLine};
    pub use crate::present_value::{
        calculate_present_value, discount_factor, PresentValueAnalysis, PvAnalysisRow,
    };
}

pub use analysis::{analyze, analyze_with_config, AnalysisResults, Summary};
pub use config::AnalysisConfig;
