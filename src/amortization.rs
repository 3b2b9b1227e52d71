//! Fixed-payment (annuity) amortization.
//!
//! Every monetary figure is rounded to cents at the moment it is computed and
//! never rounded again afterwards. The final installment absorbs the drift
//! those roundings leave in the principal column, so the principal portions
//! always add up to the amount borrowed.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::dates::add_months;
use crate::error::{LoanError, LoanResult};
use crate::types::{AmortizationSchedule, LoanParameters, Money, Rate, ScheduledPayment};

/// Balances below this are treated as fully repaid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Rounds to cents, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts an annual percentage (e.g. 6 for 6%) into the nominal monthly
/// rate used for interest accrual (0.005).
pub fn monthly_rate(annual_interest_rate: Rate) -> Decimal {
    annual_interest_rate / dec!(100) / dec!(12)
}

fn overflow(context: &str) -> LoanError {
    LoanError::Computation(format!("arithmetic overflow while computing {context}"))
}

/// Calculates the unrounded fixed monthly installment.
///
/// The annuity formula is: PMT = P * [r(1 + r)^n] / [(1 + r)^n - 1].
/// A zero rate degenerates to a straight split of the principal.
///
/// # Errors
///
/// Returns [`LoanError::Computation`] if `term_months` is zero or the
/// intermediate values overflow.
pub fn calculate_monthly_payment(
    principal: Money,
    annual_interest_rate: Rate,
    term_months: u32,
) -> LoanResult<Money> {
    if term_months == 0 {
        return Err(LoanError::Computation(
            "term must contain at least one payment".to_string(),
        ));
    }

    if annual_interest_rate.is_zero() {
        return principal
            .checked_div(Decimal::from(term_months))
            .ok_or_else(|| overflow("monthly payment"));
    }

    let rate = monthly_rate(annual_interest_rate);
    let growth = (dec!(1) + rate)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| overflow("compound growth factor"))?;

    principal
        .checked_mul(rate)
        .and_then(|value| value.checked_mul(growth))
        .and_then(|numerator| numerator.checked_div(growth.checked_sub(dec!(1))?))
        .ok_or_else(|| overflow("monthly payment"))
}

/// Generates the full payment-by-payment schedule for `params`.
///
/// Inputs are not validated here; callers are expected to reject
/// non-positive principals and terms first. Payment `k` falls due
/// `k - 1` calendar months after the start date. Every payment starts
/// unpaid and unlocked.
///
/// # Errors
///
/// Returns [`LoanError::Computation`] when the term is not positive, a due
/// date falls outside the supported calendar or the arithmetic overflows.
pub fn generate_amortization_schedule(
    params: &LoanParameters,
) -> LoanResult<AmortizationSchedule> {
    let term_months = u32::try_from(params.term_months).map_err(|_| {
        LoanError::Computation(format!("invalid term of {} months", params.term_months))
    })?;

    let principal = params.principal;
    let payment = calculate_monthly_payment(principal, params.interest_rate, term_months)?;
    let rate = monthly_rate(params.interest_rate);
    let rounded_payment = round_money(payment);

    let mut balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut principal_scheduled = Decimal::ZERO;
    let mut payments = Vec::new();

    for payment_number in 1..=term_months {
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| overflow("interest portion"))?;
        let amortization = payment
            .checked_sub(interest)
            .ok_or_else(|| overflow("principal portion"))?;

        balance = balance
            .checked_sub(amortization)
            .ok_or_else(|| overflow("remaining balance"))?;
        total_interest = total_interest
            .checked_add(interest)
            .ok_or_else(|| overflow("total interest"))?;

        if balance < BALANCE_EPSILON {
            balance = Decimal::ZERO;
        }

        let due_date = add_months(params.start_date, payment_number - 1).ok_or_else(|| {
            LoanError::Computation(format!("due date of payment {payment_number} is out of range"))
        })?;

        let interest_amount = round_money(interest);
        let is_final = payment_number == term_months;
        let (principal_amount, total_payment, remaining_balance) = if is_final {
            // The last installment closes the loan.
            let closing_principal = principal
                .checked_sub(principal_scheduled)
                .ok_or_else(|| overflow("final principal portion"))?;
            let closing_payment = closing_principal
                .checked_add(interest_amount)
                .ok_or_else(|| overflow("final payment"))?;
            (closing_principal, closing_payment, Decimal::ZERO)
        } else {
            (round_money(amortization), rounded_payment, round_money(balance))
        };
        principal_scheduled = principal_scheduled
            .checked_add(principal_amount)
            .ok_or_else(|| overflow("scheduled principal"))?;

        payments.push(ScheduledPayment {
            payment_number,
            due_date,
            principal_amount,
            interest_amount,
            total_payment,
            remaining_balance,
            is_paid: false,
            paid_date: None,
            is_locked: false,
            notes: None,
        });
    }

    let total_amount = principal
        .checked_add(total_interest)
        .ok_or_else(|| overflow("total amount"))?;

    debug!(
        term_months,
        monthly_payment = %rounded_payment,
        total_interest = %round_money(total_interest),
        "generated amortization schedule"
    );

    Ok(AmortizationSchedule {
        monthly_payment: rounded_payment,
        total_interest: round_money(total_interest),
        total_amount: round_money(total_amount),
        payments,
    })
}
