//! # Order Form Session
//!
//! Everything the open order dialog holds: the draft, the submit state
//! machine, the last reported errors and the per-field error styles.
//!
//! Created when the dialog opens, dropped on success or cancel.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::order::{FormField, OrderDraft, OrderSubmission};
use crate::sanitize::{FieldEvent, FieldFeedback, FieldSanitizer, KeyDecision, KeyPress};
use crate::submission::{SubmissionFlow, SubmissionState};
use crate::validation::{field_of, validate_order, FormRules};

#[derive(Debug, Clone)]
pub struct OrderFormSession {
    draft: OrderDraft,
    flow: SubmissionFlow,
    rules: FormRules,
    errors: Vec<ValidationError>,
    invalid_fields: BTreeSet<FormField>,
}

impl OrderFormSession {
    pub fn open(order_number: impl Into<String>, rules: FormRules) -> Self {
        OrderFormSession {
            draft: OrderDraft::new(order_number),
            flow: SubmissionFlow::new(),
            rules,
            errors: Vec::new(),
            invalid_fields: BTreeSet::new(),
        }
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn order_number(&self) -> &str {
        &self.draft.order_number
    }

    pub fn state(&self) -> SubmissionState {
        self.flow.state()
    }

    pub fn flow(&self) -> &SubmissionFlow {
        &self.flow
    }

    pub fn rules(&self) -> &FormRules {
        &self.rules
    }

    /// Errors from the last rejected submit.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Whether the field is drawn with the error style.
    pub fn is_invalid(&self, field: FormField) -> bool {
        self.invalid_fields.contains(&field)
    }

    /// Routes an editing event through the field's sanitizer.
    ///
    /// Fields without a sanitizer take input and paste verbatim.
    pub fn apply(&mut self, field: FormField, event: FieldEvent) -> CoreResult<FieldFeedback> {
        if field.is_read_only() {
            return Err(CoreError::ReadOnlyField(field));
        }

        let current = self.draft.get(field).to_string();
        let feedback = match FieldSanitizer::for_field(field) {
            Some(sanitizer) => sanitizer.apply(&current, &event),
            None => match event {
                FieldEvent::Input(raw) | FieldEvent::Paste(raw) => FieldFeedback {
                    value: raw,
                    invalid: false,
                },
                FieldEvent::Focus | FieldEvent::Blur => FieldFeedback {
                    value: current,
                    invalid: false,
                },
            },
        };

        self.draft.set(field, feedback.value.clone())?;
        if feedback.invalid {
            self.invalid_fields.insert(field);
        } else {
            self.invalid_fields.remove(&field);
        }
        Ok(feedback)
    }

    /// Sets a field as if typed in one go.
    pub fn fill(&mut self, field: FormField, value: &str) -> CoreResult<FieldFeedback> {
        self.apply(field, FieldEvent::Input(value.to_string()))
    }

    pub fn key_down(&self, field: FormField, press: &KeyPress) -> KeyDecision {
        FieldSanitizer::for_field(field)
            .map(|sanitizer| sanitizer.key_down(press))
            .unwrap_or(KeyDecision::Allow)
    }

    /// Starts a submit: validates, and on success moves to `Submitting`
    /// and returns the payload to deliver.
    ///
    /// On validation failure the flow is back at `Idle`, the errors are
    /// kept for display and nothing is returned to send.
    pub fn begin_submit(
        &mut self,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> CoreResult<OrderSubmission> {
        self.flow.begin()?;

        let errors = validate_order(&self.draft, &self.rules, today);
        if !errors.is_empty() {
            self.flow.reject()?;
            self.invalid_fields = errors.iter().map(field_of).collect();
            self.errors = errors.clone();
            return Err(CoreError::ValidationFailed(errors));
        }

        self.errors.clear();
        self.invalid_fields.clear();
        self.flow.dispatch()?;
        Ok(OrderSubmission::from_draft(&self.draft, now))
    }

    /// Records the delivery outcome and settles back to `Idle`.
    ///
    /// Returns `Succeeded` or `Failed`.
    pub fn finish(&mut self, sent: bool) -> CoreResult<SubmissionState> {
        let outcome = self.flow.complete(sent)?;
        self.flow.settle()?;
        Ok(outcome)
    }
}
