//! Calculator session: owns the loan being edited, its schedule, summary and
//! bulk-selection state.
//!
//! Every parameter change runs validate -> compute -> ready (or error).
//! Schedule and summary are only available in [`SessionStatus::Ready`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::amortization::generate_amortization_schedule;
use crate::config::CalculatorConfig;
use crate::error::{GENERAL_FAILURE_MESSAGE, LoanError, LoanField, LoanResult, ValidationErrors};
use crate::payments::{
    bulk_update_payments, merge_saved_payments, toggle_payment_lock, update_payment_status,
};
use crate::storage::{KeyValueStore, LoanStorage};
use crate::summary::calculate_loan_summary;
use crate::types::{
    AmortizationSchedule, BulkPaymentUpdate, LoanParameters, LoanParametersUpdate, LoanSummary,
    ScheduledPayment,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Validating,
    Computing,
    Ready,
    Error,
}

/// Called with the loan and its payment list after every payment-level
/// change, typically to persist it.
pub type SaveHook = Box<dyn FnMut(&LoanParameters, &[ScheduledPayment]) + Send>;

/// Checks the fields that must hold before a schedule can be generated.
pub fn validate_parameters(params: &LoanParameters) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if params.principal <= Decimal::ZERO {
        errors.insert(LoanField::Principal, "Principal amount must be greater than 0");
    }
    if params.interest_rate < Decimal::ZERO {
        errors.insert(LoanField::InterestRate, "Interest rate cannot be negative");
    }
    if params.term_months <= 0 {
        errors.insert(LoanField::TermMonths, "Loan term must be greater than 0");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub struct CalculatorSession {
    config: CalculatorConfig,
    parameters: LoanParameters,
    schedule: Option<AmortizationSchedule>,
    summary: Option<LoanSummary>,
    selected_payments: BTreeSet<u32>,
    status: SessionStatus,
    errors: ValidationErrors,
    on_save: Option<SaveHook>,
}

impl fmt::Debug for CalculatorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalculatorSession")
            .field("parameters", &self.parameters)
            .field("status", &self.status)
            .field("errors", &self.errors)
            .field("selected_payments", &self.selected_payments)
            .field("has_schedule", &self.schedule.is_some())
            .field("autosave", &self.on_save.is_some())
            .finish_non_exhaustive()
    }
}

impl CalculatorSession {
    /// Starts a session on the configured default loan, starting today, and
    /// computes its schedule.
    pub fn new(config: CalculatorConfig) -> Self {
        Self::with_parameters(config, LoanParametersUpdate::default())
    }

    /// Like [`CalculatorSession::new`] with `initial` overriding the defaults.
    pub fn with_parameters(config: CalculatorConfig, initial: LoanParametersUpdate) -> Self {
        let now = Utc::now();
        let mut parameters = LoanParameters::new(
            config.default_principal,
            config.default_interest_rate,
            config.default_term_months,
            now.date_naive(),
            now,
        );
        initial.apply_to(&mut parameters);

        let mut session = Self {
            config,
            parameters,
            schedule: None,
            summary: None,
            selected_payments: BTreeSet::new(),
            status: SessionStatus::Validating,
            errors: ValidationErrors::new(),
            on_save: None,
        };
        // Failures are recorded in the session state.
        let _ = session.recalculate();
        session
    }

    /// Installs a hook run after every payment-level mutation.
    pub fn with_autosave(
        mut self,
        hook: impl FnMut(&LoanParameters, &[ScheduledPayment]) + Send + 'static,
    ) -> Self {
        self.on_save = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_calculating(&self) -> bool {
        self.status == SessionStatus::Computing
    }

    pub fn parameters(&self) -> &LoanParameters {
        &self.parameters
    }

    pub fn schedule(&self) -> Option<&AmortizationSchedule> {
        self.schedule.as_ref()
    }

    pub fn summary(&self) -> Option<&LoanSummary> {
        self.summary.as_ref()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn selected_payments(&self) -> Vec<u32> {
        self.selected_payments.iter().copied().collect()
    }

    fn transition(&mut self, status: SessionStatus) {
        debug!(
            from = ?self.status,
            to = ?status,
            loan_id = %self.parameters.id,
            "session transition"
        );
        self.status = status;
    }

    /// Applies a partial edit and bumps `updated_at`. The schedule is
    /// regenerated only when principal, rate, term or start date changed.
    ///
    /// # Errors
    ///
    /// Returns the validation or computation error of the regeneration; the
    /// session is left in [`SessionStatus::Error`] in that case.
    pub fn update_parameters(&mut self, update: LoanParametersUpdate) -> LoanResult<()> {
        let previous = self.parameters.clone();
        update.apply_to(&mut self.parameters);
        self.parameters.updated_at = Utc::now();

        if previous.schedule_inputs_differ(&self.parameters) {
            self.recalculate()
        } else {
            Ok(())
        }
    }

    /// Validates the current parameters and regenerates schedule and summary.
    pub fn recalculate(&mut self) -> LoanResult<()> {
        let schedule = self.compute_schedule()?;
        self.summary = Some(calculate_loan_summary(&self.parameters, &schedule));
        self.schedule = Some(schedule);
        self.transition(SessionStatus::Ready);
        Ok(())
    }

    /// Runs validation and generation, leaving the session in `Computing` on
    /// success so the caller can finish the transition to `Ready`.
    fn compute_schedule(&mut self) -> LoanResult<AmortizationSchedule> {
        self.schedule = None;
        self.summary = None;
        self.transition(SessionStatus::Validating);

        if let Err(errors) = validate_parameters(&self.parameters) {
            warn!(loan_id = %self.parameters.id, %errors, "invalid loan parameters");
            self.errors = errors.clone();
            self.transition(SessionStatus::Error);
            return Err(LoanError::Validation(errors));
        }

        self.errors = ValidationErrors::new();
        self.transition(SessionStatus::Computing);

        match generate_amortization_schedule(&self.parameters) {
            Ok(schedule) => Ok(schedule),
            Err(e) => {
                error!(loan_id = %self.parameters.id, error = %e, "calculation error");
                self.errors = ValidationErrors::general(GENERAL_FAILURE_MESSAGE);
                self.transition(SessionStatus::Error);
                Err(e)
            }
        }
    }

    fn replace_payments(
        &mut self,
        mutate: impl FnOnce(&[ScheduledPayment]) -> Vec<ScheduledPayment>,
    ) -> LoanResult<()> {
        let Some(schedule) = self.schedule.as_mut() else {
            return Err(LoanError::NoSchedule);
        };

        schedule.payments = mutate(&schedule.payments);
        self.summary = Some(calculate_loan_summary(&self.parameters, schedule));

        if let Some(hook) = self.on_save.as_mut() {
            hook(&self.parameters, &schedule.payments);
        }
        Ok(())
    }

    /// Marks a single payment paid or unpaid. Locked payments are updated too.
    pub fn update_payment(
        &mut self,
        payment_number: u32,
        is_paid: bool,
        paid_date: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> LoanResult<()> {
        self.replace_payments(|payments| {
            update_payment_status(payments, payment_number, is_paid, paid_date, notes)
        })
    }

    pub fn toggle_lock(&mut self, payment_number: u32) -> LoanResult<()> {
        self.replace_payments(|payments| toggle_payment_lock(payments, payment_number))
    }

    /// Updates every listed unlocked payment and clears the selection.
    pub fn bulk_update_payment_status(
        &mut self,
        payment_numbers: &[u32],
        is_paid: bool,
        paid_date: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> LoanResult<()> {
        self.replace_payments(|payments| {
            bulk_update_payments(payments, payment_numbers, is_paid, paid_date, notes)
        })?;
        self.selected_payments.clear();
        Ok(())
    }

    pub fn apply_bulk_update(&mut self, update: &BulkPaymentUpdate) -> LoanResult<()> {
        self.bulk_update_payment_status(
            &update.payment_numbers,
            update.status.is_paid(),
            update.paid_date,
            update.notes.as_deref(),
        )
    }

    /// Bulk-updates the current selection.
    pub fn update_selected_payments(
        &mut self,
        is_paid: bool,
        paid_date: Option<DateTime<Utc>>,
        notes: Option<&str>,
    ) -> LoanResult<()> {
        let selected = self.selected_payments();
        self.bulk_update_payment_status(&selected, is_paid, paid_date, notes)
    }

    pub fn toggle_payment_selection(&mut self, payment_number: u32) {
        if !self.selected_payments.remove(&payment_number) {
            self.selected_payments.insert(payment_number);
        }
    }

    /// Selects every payment that a bulk update could change.
    pub fn select_all_unlocked(&mut self) {
        self.selected_payments = self
            .schedule
            .iter()
            .flat_map(|schedule| schedule.payments.iter())
            .filter(|payment| !payment.is_locked)
            .map(|payment| payment.payment_number)
            .collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected_payments.clear();
    }

    /// Replaces the session with a saved loan.
    ///
    /// The schedule is regenerated from `parameters`; only the tracking
    /// fields of `payments` (paid flag, paid date, lock, notes) are carried
    /// over, matched by payment number.
    pub fn load_loan_data(
        &mut self,
        parameters: LoanParameters,
        payments: &[ScheduledPayment],
    ) -> LoanResult<()> {
        self.parameters = parameters;
        self.selected_payments.clear();

        let mut schedule = self.compute_schedule()?;
        schedule.payments = merge_saved_payments(schedule.payments, payments);
        self.summary = Some(calculate_loan_summary(&self.parameters, &schedule));
        self.schedule = Some(schedule);
        self.transition(SessionStatus::Ready);

        info!(loan_id = %self.parameters.id, "loaded loan data");
        Ok(())
    }

    /// Writes the current loan and its tracking state to `storage`.
    pub fn save<S: KeyValueStore>(&self, storage: &mut LoanStorage<S>) -> LoanResult<()> {
        let schedule = self.schedule.as_ref().ok_or(LoanError::NoSchedule)?;
        storage
            .save_loan(&self.parameters, &schedule.payments)
            .map_err(|e| LoanError::Storage(format!("{e:#}")))
    }

    /// Loads `loan_id` from `storage`. Returns `false` when the loan is
    /// unknown or its saved parameters no longer produce a schedule.
    pub fn load<S: KeyValueStore>(&mut self, storage: &LoanStorage<S>, loan_id: &str) -> bool {
        let Some(stored) = storage.load_loan(loan_id) else {
            warn!(loan_id, "no stored loan with this id");
            return false;
        };
        self.load_loan_data(stored.loan_details.clone(), &stored.payments)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::BulkStatus;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn session(principal: Decimal, rate: Decimal, term: i32) -> CalculatorSession {
        CalculatorSession::with_parameters(
            CalculatorConfig::default(),
            LoanParametersUpdate {
                principal: Some(principal),
                interest_rate: Some(rate),
                term_months: Some(term),
                start_date: Some(start()),
                ..Default::default()
            },
        )
    }

    fn paid_on() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_default_session_is_ready() {
        let session = CalculatorSession::new(CalculatorConfig::default());

        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.parameters().principal, dec!(100000));
        assert_eq!(session.parameters().interest_rate, dec!(5.5));
        assert_eq!(session.parameters().term_months, 360);
        assert_eq!(session.schedule().unwrap().payments.len(), 360);
        assert_eq!(session.summary().unwrap().monthly_payment, dec!(567.79));
        assert!(session.errors().is_empty());
        assert!(!session.is_calculating());
    }

    #[rstest]
    #[case(dec!(0), dec!(5), 12, vec![LoanField::Principal])]
    #[case(dec!(-10), dec!(5), 12, vec![LoanField::Principal])]
    #[case(dec!(1000), dec!(-0.5), 12, vec![LoanField::InterestRate])]
    #[case(dec!(1000), dec!(5), 0, vec![LoanField::TermMonths])]
    #[case(
        dec!(0),
        dec!(-1),
        -3,
        vec![LoanField::Principal, LoanField::InterestRate, LoanField::TermMonths]
    )]
    fn test_invalid_parameters_enter_error_state(
        #[case] principal: Decimal,
        #[case] rate: Decimal,
        #[case] term: i32,
        #[case] fields: Vec<LoanField>,
    ) {
        let session = session(principal, rate, term);

        assert_eq!(session.status(), SessionStatus::Error);
        assert!(session.schedule().is_none());
        assert!(session.summary().is_none());
        assert_eq!(session.errors().len(), fields.len());
        for field in fields {
            assert!(session.errors().contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_validation_messages() {
        let session = session(dec!(0), dec!(-1), 0);
        let errors = session.errors();
        assert_eq!(
            errors.get(LoanField::Principal),
            Some("Principal amount must be greater than 0")
        );
        assert_eq!(errors.get(LoanField::InterestRate), Some("Interest rate cannot be negative"));
        assert_eq!(errors.get(LoanField::TermMonths), Some("Loan term must be greater than 0"));
    }

    #[test]
    fn test_zero_rate_is_valid() {
        let session = session(dec!(12000), dec!(0), 12);
        assert_eq!(session.status(), SessionStatus::Ready);
        assert_eq!(session.summary().unwrap().monthly_payment, dec!(1000));
    }

    #[test]
    fn test_update_parameters_recomputes_and_recovers_from_error() {
        let mut session = session(dec!(12000), dec!(0), 12);

        let err = session
            .update_parameters(LoanParametersUpdate {
                principal: Some(dec!(-5)),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, LoanError::Validation(_)));
        assert_eq!(session.status(), SessionStatus::Error);
        assert!(session.schedule().is_none());

        session
            .update_parameters(LoanParametersUpdate {
                principal: Some(dec!(6000)),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(session.errors().is_empty());
        assert_eq!(session.schedule().unwrap().monthly_payment, dec!(500));
    }

    #[test]
    fn test_overflowing_loan_reports_general_failure() {
        let huge = Decimal::from_scientific("5e28").unwrap();
        let mut session = session(huge, dec!(10), 360);

        assert_eq!(session.status(), SessionStatus::Error);
        assert!(session.schedule().is_none());
        assert!(session.summary().is_none());
        assert_eq!(session.errors().len(), 1);
        assert_eq!(session.errors().get(LoanField::General), Some(GENERAL_FAILURE_MESSAGE));

        let err = session.recalculate().unwrap_err();
        assert!(matches!(err, LoanError::Computation(_)));
        assert_eq!(session.status(), SessionStatus::Error);

        session
            .update_parameters(LoanParametersUpdate {
                principal: Some(dec!(12000)),
                interest_rate: Some(dec!(12)),
                term_months: Some(12),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(session.status(), SessionStatus::Ready);
        assert!(session.errors().is_empty());
        assert_eq!(session.summary().unwrap().monthly_payment, dec!(1066.19));
    }

    #[test]
    fn test_due_date_past_calendar_end_reports_general_failure() {
        let mut session = session(dec!(12000), dec!(5), 12);
        let err = session
            .update_parameters(LoanParametersUpdate {
                start_date: Some(NaiveDate::MAX),
                ..Default::default()
            })
            .unwrap_err();

        assert!(matches!(err, LoanError::Computation(_)));
        assert_eq!(session.status(), SessionStatus::Error);
        assert!(session.schedule().is_none());
        assert_eq!(session.errors().get(LoanField::General), Some(GENERAL_FAILURE_MESSAGE));
    }

    #[test]
    fn test_description_edit_keeps_tracking_state() {
        let mut session = session(dec!(12000), dec!(0), 12);
        session.update_payment(1, true, Some(paid_on()), None).unwrap();
        let before = session.parameters().updated_at;

        session
            .update_parameters(LoanParametersUpdate {
                description: Some("Boat".to_string()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(session.parameters().description, "Boat");
        assert!(session.parameters().updated_at >= before);
        assert!(session.schedule().unwrap().payments[0].is_paid);
    }

    #[test]
    fn test_rate_edit_regenerates_schedule() {
        let mut session = session(dec!(12000), dec!(0), 12);
        session.update_payment(1, true, Some(paid_on()), None).unwrap();

        session
            .update_parameters(LoanParametersUpdate {
                interest_rate: Some(dec!(12)),
                ..Default::default()
            })
            .unwrap();

        let schedule = session.schedule().unwrap();
        assert_eq!(schedule.monthly_payment, dec!(1066.19));
        assert!(!schedule.payments[0].is_paid);
    }

    #[test]
    fn test_marking_first_two_paid() {
        let mut session = session(dec!(100000), dec!(6), 360);
        session.update_payment(1, true, Some(paid_on()), None).unwrap();
        session.update_payment(2, true, None, Some("autopay")).unwrap();

        let summary = session.summary().unwrap();
        assert_eq!(summary.paid_payments, 2);
        assert_eq!(summary.progress_percentage, dec!(0.56));

        let schedule = session.schedule().unwrap();
        assert_eq!(schedule.payments[1].notes.as_deref(), Some("autopay"));
        assert_eq!(schedule.payments[0].principal_amount, dec!(99.55));
    }

    #[test]
    fn test_summary_completion_date_after_partial_payment() {
        let mut session = session(dec!(3000), dec!(0), 3);
        session.update_payment(3, true, Some(paid_on()), None).unwrap();
        assert_eq!(
            session.summary().unwrap().completion_date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_mutations_require_a_schedule() {
        let mut session = session(dec!(0), dec!(5), 12);
        assert!(matches!(session.update_payment(1, true, None, None), Err(LoanError::NoSchedule)));
        assert!(matches!(session.toggle_lock(1), Err(LoanError::NoSchedule)));
        assert!(matches!(
            session.bulk_update_payment_status(&[1], true, None, None),
            Err(LoanError::NoSchedule)
        ));
    }

    #[test]
    fn test_bulk_update_skips_locked_and_clears_selection() {
        let mut session = session(dec!(12000), dec!(12), 12);
        session.toggle_lock(2).unwrap();
        session.toggle_payment_selection(2);
        session.toggle_payment_selection(3);
        assert_eq!(session.selected_payments(), vec![2, 3]);

        session.update_selected_payments(true, Some(paid_on()), None).unwrap();

        let payments = &session.schedule().unwrap().payments;
        assert!(!payments[1].is_paid);
        assert!(payments[1].is_locked);
        assert!(payments[2].is_paid);
        assert!(session.selected_payments().is_empty());
        assert_eq!(session.summary().unwrap().paid_payments, 1);
    }

    #[test]
    fn test_apply_bulk_update_request() {
        let mut session = session(dec!(12000), dec!(0), 12);
        let update = BulkPaymentUpdate {
            payment_numbers: vec![1, 2, 3],
            status: BulkStatus::Paid,
            paid_date: Some(paid_on()),
            notes: Some("catch-up".to_string()),
        };
        session.apply_bulk_update(&update).unwrap();

        let summary = session.summary().unwrap();
        assert_eq!(summary.paid_payments, 3);
        assert_eq!(summary.paid_amount, dec!(3000));
        assert_eq!(summary.remaining_balance, dec!(9000));
        assert_eq!(summary.progress_percentage, dec!(25));
    }

    #[test]
    fn test_toggle_lock_keeps_paid_flag() {
        let mut session = session(dec!(12000), dec!(0), 12);
        session.update_payment(4, true, Some(paid_on()), None).unwrap();
        session.toggle_lock(4).unwrap();

        let payment = &session.schedule().unwrap().payments[3];
        assert!(payment.is_locked);
        assert!(payment.is_paid);

        // Single updates are not blocked by the lock.
        session.update_payment(4, false, None, None).unwrap();
        assert!(!session.schedule().unwrap().payments[3].is_paid);
    }

    #[test]
    fn test_selection_toggle_and_select_all_unlocked() {
        let mut session = session(dec!(3000), dec!(0), 3);
        session.toggle_payment_selection(2);
        session.toggle_payment_selection(2);
        assert!(session.selected_payments().is_empty());

        session.toggle_lock(1).unwrap();
        session.select_all_unlocked();
        assert_eq!(session.selected_payments(), vec![2, 3]);

        session.clear_selection();
        assert!(session.selected_payments().is_empty());
    }

    #[test]
    fn test_autosave_hook_sees_every_payment_mutation() {
        let saved: Arc<Mutex<Vec<usize>>> = Arc::default();
        let sink = Arc::clone(&saved);
        let mut session = session(dec!(3000), dec!(0), 3).with_autosave(move |_, payments| {
            let paid = payments.iter().filter(|p| p.is_paid).count();
            sink.lock().unwrap().push(paid);
        });

        session.update_payment(1, true, Some(paid_on()), None).unwrap();
        session.toggle_lock(2).unwrap();
        session.bulk_update_payment_status(&[2, 3], true, Some(paid_on()), None).unwrap();

        assert_eq!(*saved.lock().unwrap(), vec![1, 1, 2]);
    }

    #[test]
    fn test_load_loan_data_takes_amounts_from_fresh_generation() {
        let mut source = session(dec!(12000), dec!(12), 12);
        source.update_payment(1, true, Some(paid_on()), Some("first")).unwrap();
        source.toggle_lock(2).unwrap();

        let mut saved = source.schedule().unwrap().payments.clone();
        saved[0].principal_amount = dec!(1);
        saved[0].due_date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();

        let mut target = CalculatorSession::new(CalculatorConfig::default());
        target.toggle_payment_selection(5);
        target
            .load_loan_data(source.parameters().clone(), &saved)
            .unwrap();

        assert_eq!(target.status(), SessionStatus::Ready);
        assert_eq!(target.parameters().id, source.parameters().id);
        assert!(target.selected_payments().is_empty());

        let first = &target.schedule().unwrap().payments[0];
        assert!(first.is_paid);
        assert_eq!(first.paid_date, Some(paid_on()));
        assert_eq!(first.notes.as_deref(), Some("first"));
        assert_eq!(first.principal_amount, dec!(946.19));
        assert_eq!(first.due_date, start());
        assert!(target.schedule().unwrap().payments[1].is_locked);
        assert_eq!(target.summary().unwrap().paid_payments, 1);
    }

    #[test]
    fn test_save_and_load_through_storage() {
        let mut storage = LoanStorage::open(MemoryStore::new(), "loans");
        let mut source = session(dec!(12000), dec!(12), 12);
        source.update_payment(3, true, Some(paid_on()), None).unwrap();
        source.save(&mut storage).unwrap();

        let mut target = CalculatorSession::new(CalculatorConfig::default());
        assert!(target.load(&storage, &source.parameters().id));
        assert_eq!(target.schedule(), source.schedule());
        assert_eq!(target.summary(), source.summary());

        assert!(!target.load(&storage, "missing"));
    }

    #[test]
    fn test_save_without_schedule_fails() {
        let mut storage = LoanStorage::open(MemoryStore::new(), "loans");
        let session = session(dec!(0), dec!(5), 12);
        assert!(matches!(session.save(&mut storage), Err(LoanError::NoSchedule)));
    }

    #[test]
    fn test_loading_invalid_saved_parameters_leaves_no_schedule() {
        let mut invalid = session(dec!(1000), dec!(5), 12).parameters().clone();
        invalid.term_months = 0;

        let mut target = CalculatorSession::new(CalculatorConfig::default());
        let result = target.load_loan_data(invalid, &[]);

        assert!(matches!(result, Err(LoanError::Validation(_))));
        assert_eq!(target.status(), SessionStatus::Error);
        assert!(target.schedule().is_none());
    }
}
