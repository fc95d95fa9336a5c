//! # SFC Core
//!
//! Core types and errors for the significant financing component analyzer.
//!
//! This crate provides the foundational building blocks used by the engine
//! and its outer layers:
//!
//! - **Types**: `Date`, the validated `Contract` model and its raw JSON form
//! - **Conventions**: how discount horizons are measured
//! - **Errors**: the single `SfcError` taxonomy with stable codes
//!
//! ## Example
//!
//! ```rust
//! use sfc_core::prelude::*;
//!
//! let period = ServicePeriod::new(
//!     Date::parse("2025-12-31").unwrap(),
//!     Date::parse("2026-12-30").unwrap(),
//!     420_000.0,
//! )
//! .unwrap();
//! let contract = Contract::new("Deka Bank", 420_000.0, Date::parse("2025-12-31").unwrap(), vec![period]).unwrap();
//! assert_eq!(contract.total_stated(), 420_000.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{SfcError, SfcResult};
    pub use crate::types::{
        Contract, ContractInput, Date, DiscountConvention, PeriodInput, ServicePeriod,
    };
}

// Re-export commonly used types at crate root
pub use error::{SfcError, SfcResult};
pub use types::{Contract, ContractInput, Date, DiscountConvention, ServicePeriod};
