//! Export of a computed loan: CSV payment table, JSON document and a
//! plain-text print report.

use std::fmt;
use std::io;

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dates::format_calendar_date;
use crate::error::LoanResult;
use crate::format::{format_currency, format_percentage, format_term};
use crate::payments::count_locked;
use crate::types::{AmortizationSchedule, LoanParameters, LoanSummary};

pub const EXPORT_VERSION: &str = "1.0";

const CSV_HEADERS: [&str; 9] = [
    "Payment Number",
    "Due Date",
    "Monthly Payment",
    "Principal Amount",
    "Interest Amount",
    "Remaining Balance",
    "Status",
    "Paid Date",
    "Notes",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Csv,
    Json,
}

/// `loan-schedule-<description>-<date>.csv` or
/// `loan-data-<description>-<date>.json`, with `untitled` standing in for an
/// empty description.
pub fn export_file_name(kind: ExportKind, description: &str, on: NaiveDate) -> String {
    let label = match description.trim() {
        "" => "untitled",
        trimmed => trimmed,
    };
    let date = format_calendar_date(on);
    match kind {
        ExportKind::Csv => format!("loan-schedule-{label}-{date}.csv"),
        ExportKind::Json => format!("loan-data-{label}-{date}.json"),
    }
}

/// Writes one row per payment under a fixed header.
pub fn write_schedule_csv<W: io::Write>(
    schedule: &AmortizationSchedule,
    writer: W,
) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADERS)?;

    for payment in &schedule.payments {
        wtr.write_record([
            payment.payment_number.to_string(),
            format_calendar_date(payment.due_date),
            format!("{:.2}", payment.total_payment),
            format!("{:.2}", payment.principal_amount),
            format!("{:.2}", payment.interest_amount),
            format!("{:.2}", payment.remaining_balance),
            paid_label(payment.is_paid).to_string(),
            payment
                .paid_date
                .map(|paid| format_calendar_date(paid.date_naive()))
                .unwrap_or_default(),
            payment.notes.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush().context("failed to flush CSV export")?;
    Ok(())
}

pub fn schedule_csv(schedule: &AmortizationSchedule) -> anyhow::Result<String> {
    let mut buffer = Vec::new();
    write_schedule_csv(schedule, &mut buffer)?;
    String::from_utf8(buffer).context("CSV export is not valid UTF-8")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub loan_details: &'a LoanParameters,
    pub amortization_schedule: Option<&'a AmortizationSchedule>,
    pub loan_summary: Option<&'a LoanSummary>,
    pub export_date: DateTime<Utc>,
    pub export_version: &'static str,
}

impl<'a> ExportDocument<'a> {
    pub fn new(
        loan_details: &'a LoanParameters,
        amortization_schedule: Option<&'a AmortizationSchedule>,
        loan_summary: Option<&'a LoanSummary>,
        export_date: DateTime<Utc>,
    ) -> Self {
        Self {
            loan_details,
            amortization_schedule,
            loan_summary,
            export_date,
            export_version: EXPORT_VERSION,
        }
    }

    pub fn to_json(&self) -> LoanResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

fn paid_label(is_paid: bool) -> &'static str {
    if is_paid { "Paid" } else { "Unpaid" }
}

/// Fixed-width printable report of a loan; see [`print_report`].
#[derive(Debug, Clone, Copy)]
pub struct PrintReport<'a> {
    pub params: &'a LoanParameters,
    pub schedule: &'a AmortizationSchedule,
    pub summary: &'a LoanSummary,
    pub currency: &'a str,
    pub generated_on: NaiveDate,
}

impl fmt::Display for PrintReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params = self.params;
        let summary = self.summary;
        let title = match params.description.as_str() {
            "" => "Untitled Loan",
            description => description,
        };
        let lender = match params.loan_source.as_str() {
            "" => "Not specified",
            source => source,
        };
        let money = |amount| format_currency(amount, self.currency);

        writeln!(f, "Loan Payment Schedule")?;
        writeln!(f, "{title}")?;
        writeln!(f, "Generated on {}", long_date(self.generated_on))?;
        writeln!(f)?;
        writeln!(f, "Loan Details")?;
        writeln!(f, "  Principal:       {}", money(params.principal))?;
        writeln!(f, "  Interest Rate:   {}%", params.interest_rate.normalize())?;
        writeln!(f, "  Term:            {}", format_term(params.term_months))?;
        writeln!(f, "  Start Date:      {}", long_date(params.start_date))?;
        writeln!(f, "  Lender:          {lender}")?;
        writeln!(f)?;
        writeln!(f, "Payment Summary")?;
        writeln!(f, "  Monthly Payment: {}", money(summary.monthly_payment))?;
        writeln!(f, "  Total Interest:  {}", money(summary.total_interest))?;
        writeln!(f, "  Total Amount:    {}", money(summary.total_amount))?;
        writeln!(
            f,
            "  Progress:        {} of {} payments ({})",
            summary.paid_payments,
            summary.total_payments,
            format_percentage(summary.progress_percentage, 1)
        )?;
        writeln!(f, "  Locked:          {}", count_locked(&self.schedule.payments))?;
        writeln!(f)?;
        writeln!(
            f,
            "{:>4}  {:<10}  {:>14}  {:>14}  {:>14}  {:>16}  {:<6}",
            "#", "Due Date", "Payment", "Principal", "Interest", "Balance", "Status"
        )?;

        for payment in &self.schedule.payments {
            writeln!(
                f,
                "{:>4}  {:<10}  {:>14}  {:>14}  {:>14}  {:>16}  {:<6}",
                payment.payment_number,
                format_calendar_date(payment.due_date),
                money(payment.total_payment),
                money(payment.principal_amount),
                money(payment.interest_amount),
                money(payment.remaining_balance),
                paid_label(payment.is_paid)
            )?;
        }

        Ok(())
    }
}

/// Renders a fixed-width report suitable for printing.
pub fn print_report(
    params: &LoanParameters,
    schedule: &AmortizationSchedule,
    summary: &LoanSummary,
    currency: &str,
    generated_on: NaiveDate,
) -> String {
    PrintReport {
        params,
        schedule,
        summary,
        currency,
        generated_on,
    }
    .to_string()
}
