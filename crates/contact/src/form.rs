//! Client side of the contact page: draft bookkeeping and the submit flow.

use async_trait::async_trait;
use serde::Serialize;

use crate::{Employees, Field};

/// What the visitor has typed so far.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDraft {
    pub first_name: String,
    pub last_name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub employees: Employees,
    pub message: String,
}

impl FormDraft {
    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::JobTitle => &mut self.job_title,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::JobTitle => &self.job_title,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Loading,
    Success,
    Error,
}

impl FormStatus {
    /// Text shown under the submit button.
    pub fn message(&self) -> &'static str {
        match self {
            FormStatus::Loading => "Sending...",
            FormStatus::Success => "Message sent successfully!",
            FormStatus::Error => "Something went wrong. Please try again.",
        }
    }
}

/// Delivers a draft to the submission endpoint.
///
/// Returns the HTTP status code of the reply; `Err` means the request never
/// got one.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn post(&self, draft: &FormDraft) -> anyhow::Result<u16>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContactForm {
    draft: FormDraft,
    status: Option<FormStatus>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.status
    }

    pub fn can_submit(&self) -> bool {
        self.status != Some(FormStatus::Loading)
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.draft.field_mut(field) = value.into();
    }

    pub fn select_employees(&mut self, employees: Employees) {
        self.draft.employees = employees;
    }

    /// Moves to `Loading` and hands out the payload to send, or `None` when a
    /// submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<FormDraft> {
        if !self.can_submit() {
            return None;
        }

        self.status = Some(FormStatus::Loading);

        Some(self.draft.clone())
    }

    /// Applies the outcome of the request started by [`Self::begin_submit`].
    ///
    /// Only a 2xx reply clears the draft.
    pub fn finish_submit(&mut self, outcome: anyhow::Result<u16>) -> FormStatus {
        let status = match outcome {
            Ok(code) if (200..300).contains(&code) => {
                self.draft = FormDraft::default();
                FormStatus::Success
            }
            Ok(code) => {
                tracing::warn!(code, "contact submission rejected");
                FormStatus::Error
            }
            Err(err) => {
                tracing::warn!(error = %err, "contact submission failed");
                FormStatus::Error
            }
        };

        self.status = Some(status);

        status
    }

    pub async fn submit<S: Submitter + ?Sized>(&mut self, submitter: &S) -> Option<FormStatus> {
        let draft = self.begin_submit()?;
        let outcome = submitter.post(&draft).await;

        Some(self.finish_submit(outcome))
    }
}
