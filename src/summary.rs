use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::amortization::round_money;
use crate::types::{AmortizationSchedule, LoanParameters, LoanSummary};

/// Derives progress figures from the schedule's current paid/unpaid flags.
///
/// Amortization is not recomputed. Sums saturate at [`Decimal::MAX`] rather
/// than overflow. `remaining_balance` is the sum of the
/// unpaid principal portions, so marking payments out of order makes it differ
/// from the running balance column. `completion_date` is the due date of the
/// last unpaid payment, or the loan's start date once everything is paid.
pub fn calculate_loan_summary(
    params: &LoanParameters,
    schedule: &AmortizationSchedule,
) -> LoanSummary {
    let mut paid_payments: u32 = 0;
    let mut paid_amount = Decimal::ZERO;
    let mut remaining_balance = Decimal::ZERO;
    let mut completion_date = params.start_date;

    for payment in &schedule.payments {
        if payment.is_paid {
            paid_payments += 1;
            paid_amount = paid_amount.saturating_add(payment.total_payment);
        } else {
            remaining_balance = remaining_balance.saturating_add(payment.principal_amount);
            completion_date = payment.due_date;
        }
    }

    let total_payments = schedule.payments.len() as u32;

    LoanSummary {
        monthly_payment: schedule.monthly_payment,
        total_interest: schedule.total_interest,
        total_amount: schedule.total_amount,
        remaining_balance: round_money(remaining_balance),
        paid_amount: round_money(paid_amount),
        paid_payments,
        total_payments,
        completion_date,
        progress_percentage: progress_percentage(paid_payments, total_payments),
    }
}

/// `paid / total * 100` rounded to 2 decimals; an empty schedule is 0%.
pub fn progress_percentage(paid: u32, total: u32) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    round_money(Decimal::from(paid) * dec!(100) / Decimal::from(total))
}
