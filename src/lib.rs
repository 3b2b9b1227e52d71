//! `loan_tracker` is a Rust library for computing fixed-rate loan schedules and
//! tracking which installments have been paid.
//!
//! It provides:
//! - **Amortization**: the fixed monthly installment and a payment-by-payment
//!   schedule (principal, interest, remaining balance, due date), rounded to
//!   cents with the last payment closing the loan exactly.
//! - **Tracking**: marking payments paid or unpaid, locking them against bulk
//!   changes, and a progress summary derived from that state.
//! - **Sessions**: a small state machine that revalidates and recomputes on
//!   every parameter edit, plus save/load through a key-value store.
//! - **Export**: CSV, JSON and plain-text reports.
//!
//! ## Usage
//!
//! Add `loan_tracker` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! loan_tracker = "0.1.0"
//! rust_decimal = "1.39.0"
//! rust_decimal_macros = "1.39.0"
//! ```
//!
//! Then open a session, mark payments and read the summary:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use loan_tracker::{CalculatorConfig, CalculatorSession, LoanParametersUpdate};
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let mut session = CalculatorSession::with_parameters(
//!         CalculatorConfig::default(),
//!         LoanParametersUpdate {
//!             principal: Some(dec!(100_000)),
//!             interest_rate: Some(dec!(6)),
//!             term_months: Some(360),
//!             start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
//!             ..Default::default()
//!         },
//!     );
//!
//!     session.update_payment(1, true, None, Some("autopay")).unwrap();
//!
//!     if let Some(summary) = session.summary() {
//!         println!("Monthly payment: {:.2}", summary.monthly_payment);
//!         println!("Progress:        {}%", summary.progress_percentage);
//!         println!("Paid off on:     {}", summary.completion_date);
//!     }
//! }
//! ```

pub mod amortization;
pub mod config;
pub mod dates;
pub mod error;
pub mod export;
pub mod format;
pub mod payments;
pub mod session;
pub mod storage;
pub mod summary;
pub mod types;

pub use amortization::{calculate_monthly_payment, generate_amortization_schedule, round_money};
pub use config::CalculatorConfig;
pub use error::{LoanError, LoanField, LoanResult, ValidationErrors};
pub use export::{ExportDocument, ExportKind, print_report, schedule_csv};
pub use format::{format_currency, format_percentage};
pub use payments::{
    PaymentFilter, bulk_update_payments, count_locked, filter_payments, search_payments,
    toggle_payment_lock, update_payment_status,
};
pub use session::{CalculatorSession, SessionStatus};
pub use storage::{FileStore, KeyValueStore, LoanStorage, MemoryStore, StoredLoan};
pub use summary::calculate_loan_summary;
pub use types::{
    AmortizationSchedule, BulkPaymentUpdate, BulkStatus, LoanParameters, LoanParametersUpdate,
    LoanSummary, Money, PaymentStatus, Rate, ScheduledPayment,
};
