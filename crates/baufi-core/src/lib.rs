//! # baufi-core
//!
//! Property financing calculation engine with decimal precision.
//!
//! Given a set of financing parameters (price, equity, rate, term,
//! special repayments), the engine validates them, builds a monthly
//! amortization schedule with a yearly rollup, derives summary metrics,
//! prices a deterministic catalogue of competitor bank offers, computes
//! rental investment metrics, and snapshots named scenarios.
//!
//! ## Architecture
//!
//! - **types / validation**: parameter model and severity-tagged checks
//! - **annuity / schedule / calculator**: the single annuity formula,
//!   the monthly schedule, and the derived [`FinancingResult`]
//! - **offers / investment**: bank comparison and rental metrics
//! - **scenario / controller**: persistence and debounced orchestration
//!
//! All computations are pure, synchronous and deterministic: identical
//! parameters always yield a bit-identical result.

pub mod annuity;
pub mod calculator;
pub mod controller;
pub mod error;
pub mod investment;
pub mod offers;
pub mod scenario;
pub mod schedule;
pub mod types;
pub mod validation;

pub use calculator::{calculate, FinancingResult};
pub use error::BaufiError;
pub use investment::{analyze_investment, InvestmentMetrics};
pub use offers::{compare_offers, simulate_offers, BankOffer, OfferComparison, OfferSortKey};
pub use scenario::{FinancingScenario, ScenarioStore};
pub use types::{FinancingParameters, Money, Rate};
pub use validation::{has_blocking_errors, validate, Severity, ValidationIssue};

/// Standard result type for all fallible engine operations.
pub type BaufiResult<T> = Result<T, BaufiError>;
