//! Domain types for contract analysis.
//!
//! - [`Date`]: Calendar date
//! - [`ServicePeriod`] / [`Contract`]: Validated contract model
//! - [`ContractInput`] / [`PeriodInput`]: Raw JSON record
//! - [`DiscountConvention`]: How discount horizons are measured

mod contract;
mod convention;
mod date;
mod input;

pub use contract::{Contract, ServicePeriod};
pub use convention::{DiscountConvention, DAYS_PER_YEAR};
pub use date::Date;
pub use input::{ContractInput, PeriodInput};
