use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dates::calendar_date;

/// Monetary amounts, always in currency units.
pub type Money = Decimal;

/// Annual interest rate as a percentage (5.5 means 5.5%).
pub type Rate = Decimal;

/// Everything needed to generate a schedule, plus bookkeeping fields.
///
/// `term_months` is signed so that out-of-range user input can be represented
/// and reported by validation instead of being rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanParameters {
    pub id: String,
    /// The original borrowed amount.
    pub principal: Money,
    /// Annual interest rate as a percentage.
    pub interest_rate: Rate,
    /// Number of monthly installments.
    pub term_months: i32,
    /// Due date of the first payment.
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    /// Lender or origin of the loan.
    #[serde(default)]
    pub loan_source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LoanParameters {
    /// Fresh parameters with a new random id, stamped `now`.
    pub fn new(
        principal: Money,
        interest_rate: Rate,
        term_months: i32,
        start_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            principal,
            interest_rate,
            term_months,
            start_date,
            description: String::new(),
            loan_source: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the fields that drive amortization differ.
    pub fn schedule_inputs_differ(&self, other: &LoanParameters) -> bool {
        self.principal != other.principal
            || self.interest_rate != other.interest_rate
            || self.term_months != other.term_months
            || self.start_date != other.start_date
    }
}

/// A partial edit of [`LoanParameters`]; `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanParametersUpdate {
    pub principal: Option<Money>,
    pub interest_rate: Option<Rate>,
    pub term_months: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub loan_source: Option<String>,
}

impl LoanParametersUpdate {
    pub fn apply_to(&self, params: &mut LoanParameters) {
        if let Some(principal) = self.principal {
            params.principal = principal;
        }
        if let Some(rate) = self.interest_rate {
            params.interest_rate = rate;
        }
        if let Some(term) = self.term_months {
            params.term_months = term;
        }
        if let Some(start) = self.start_date {
            params.start_date = start;
        }
        if let Some(description) = &self.description {
            params.description = description.clone();
        }
        if let Some(source) = &self.loan_source {
            params.loan_source = source.clone();
        }
    }
}

/// One installment of an amortization schedule.
///
/// Amounts, due date and payment number are fixed at generation time; only
/// `is_paid`, `paid_date`, `is_locked` and `notes` change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    /// 1-based position in the schedule.
    pub payment_number: u32,
    #[serde(with = "calendar_date")]
    pub due_date: NaiveDate,
    pub principal_amount: Money,
    pub interest_amount: Money,
    pub total_payment: Money,
    /// Balance left after this payment.
    pub remaining_balance: Money,
    pub is_paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ScheduledPayment {
    pub fn status(&self) -> PaymentStatus {
        match (self.is_locked, self.is_paid) {
            (false, true) => PaymentStatus::Paid,
            (false, false) => PaymentStatus::Unpaid,
            (true, true) => PaymentStatus::LockedPaid,
            (true, false) => PaymentStatus::LockedUnpaid,
        }
    }

    /// Copies the user-editable fields from `saved`, keeping every computed
    /// field of `self`.
    pub fn merge_tracking_from(&mut self, saved: &ScheduledPayment) {
        self.is_paid = saved.is_paid;
        self.paid_date = saved.paid_date;
        self.is_locked = saved.is_locked;
        self.notes = saved.notes.clone();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    LockedPaid,
    LockedUnpaid,
}

/// Result of the amortization engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    /// Installment paid on every payment but possibly the last.
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// Principal plus total interest.
    pub total_amount: Money,
    pub payments: Vec<ScheduledPayment>,
}

impl AmortizationSchedule {
    pub fn payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        self.payments
            .iter()
            .find(|payment| payment.payment_number == payment_number)
    }
}

/// Progress figures derived from a schedule's paid/unpaid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSummary {
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_amount: Money,
    /// Sum of the principal portions still unpaid.
    pub remaining_balance: Money,
    /// Sum of the total payments already made.
    pub paid_amount: Money,
    pub paid_payments: u32,
    pub total_payments: u32,
    #[serde(with = "calendar_date")]
    pub completion_date: NaiveDate,
    /// Paid count as a percentage of total count, 2 decimals.
    pub progress_percentage: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkStatus {
    Paid,
    Unpaid,
}

impl BulkStatus {
    pub fn is_paid(self) -> bool {
        matches!(self, BulkStatus::Paid)
    }
}

/// A status change requested for several payments at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentUpdate {
    pub payment_numbers: Vec<u32>,
    pub status: BulkStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
