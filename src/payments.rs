//! Paid/locked state changes on a schedule's payment list, plus the
//! read-only views used to list it.
//!
//! Every mutation takes the current list and returns a new one in the same
//! order. Only `is_paid`, `paid_date`, `is_locked` and `notes` are ever
//! touched; payments that are not addressed come back unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ScheduledPayment;

/// Which payments a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFilter {
    #[default]
    All,
    Paid,
    Unpaid,
    Locked,
}

impl PaymentFilter {
    pub fn matches(self, payment: &ScheduledPayment) -> bool {
        match self {
            PaymentFilter::All => true,
            PaymentFilter::Paid => payment.is_paid,
            PaymentFilter::Unpaid => !payment.is_paid,
            PaymentFilter::Locked => payment.is_locked,
        }
    }
}

/// Payments matching `filter`, in schedule order. `Locked` selects on the
/// lock flag alone, paid or not.
pub fn filter_payments(
    payments: &[ScheduledPayment],
    filter: PaymentFilter,
) -> Vec<&ScheduledPayment> {
    payments
        .iter()
        .filter(|payment| filter.matches(payment))
        .collect()
}

/// Case-insensitive substring search over the payment number, the due month
/// (`Jan 2024`) and the installment amount. A blank term matches everything.
pub fn search_payments<'a>(
    payments: &'a [ScheduledPayment],
    term: &str,
) -> Vec<&'a ScheduledPayment> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return payments.iter().collect();
    }

    payments
        .iter()
        .filter(|payment| {
            payment.payment_number.to_string().contains(&needle)
                || payment
                    .due_date
                    .format("%b %Y")
                    .to_string()
                    .to_lowercase()
                    .contains(&needle)
                || payment.total_payment.normalize().to_string().contains(&needle)
        })
        .collect()
}

pub fn count_locked(payments: &[ScheduledPayment]) -> usize {
    payments.iter().filter(|payment| payment.is_locked).count()
}

fn apply_status(
    payment: &ScheduledPayment,
    is_paid: bool,
    paid_date: Option<DateTime<Utc>>,
    notes: Option<&str>,
) -> ScheduledPayment {
    ScheduledPayment {
        is_paid,
        paid_date: if is_paid {
            Some(paid_date.unwrap_or_else(Utc::now))
        } else {
            None
        },
        notes: notes.map(str::to_string),
        ..payment.clone()
    }
}

/// Marks one payment paid or unpaid.
///
/// A paid payment gets `paid_date`, or the current time when none is given;
/// an unpaid one loses its paid date. `notes` replaces the previous note.
/// The lock flag is not consulted here, unlike [`bulk_update_payments`].
pub fn update_payment_status(
    payments: &[ScheduledPayment],
    payment_number: u32,
    is_paid: bool,
    paid_date: Option<DateTime<Utc>>,
    notes: Option<&str>,
) -> Vec<ScheduledPayment> {
    payments
        .iter()
        .map(|payment| {
            if payment.payment_number == payment_number {
                apply_status(payment, is_paid, paid_date, notes)
            } else {
                payment.clone()
            }
        })
        .collect()
}

/// Flips the lock flag of one payment.
pub fn toggle_payment_lock(
    payments: &[ScheduledPayment],
    payment_number: u32,
) -> Vec<ScheduledPayment> {
    payments
        .iter()
        .map(|payment| {
            if payment.payment_number == payment_number {
                ScheduledPayment {
                    is_locked: !payment.is_locked,
                    ..payment.clone()
                }
            } else {
                payment.clone()
            }
        })
        .collect()
}

/// Applies the [`update_payment_status`] change to every unlocked payment
/// whose number is listed. Locked payments and unknown numbers are skipped.
pub fn bulk_update_payments(
    payments: &[ScheduledPayment],
    payment_numbers: &[u32],
    is_paid: bool,
    paid_date: Option<DateTime<Utc>>,
    notes: Option<&str>,
) -> Vec<ScheduledPayment> {
    payments
        .iter()
        .map(|payment| {
            if payment_numbers.contains(&payment.payment_number) && !payment.is_locked {
                apply_status(payment, is_paid, paid_date, notes)
            } else {
                payment.clone()
            }
        })
        .collect()
}

/// Overlays the tracking state of `saved` onto a freshly generated list,
/// matching by payment number. Amounts and dates always come from `fresh`;
/// saved entries without a counterpart are dropped.
pub fn merge_saved_payments(
    fresh: Vec<ScheduledPayment>,
    saved: &[ScheduledPayment],
) -> Vec<ScheduledPayment> {
    fresh
        .into_iter()
        .map(|mut payment| {
            if let Some(previous) = saved
                .iter()
                .find(|candidate| candidate.payment_number == payment.payment_number)
            {
                payment.merge_tracking_from(previous);
            }
            payment
        })
        .collect()
}
