use std::str::FromStr;

use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::Employees;

/// Fields of a contact request body, as sent by the page.
///
/// Values that are not JSON strings are treated as absent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubmissionInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub employees: Option<String>,
}

impl SubmissionInput {
    pub fn from_json(body: &Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            name: text("name"),
            email: text("email"),
            message: text("message"),
            first_name: text("firstName"),
            last_name: text("lastName"),
            job_title: text("jobTitle"),
            phone: text("phone"),
            employees: text("employees"),
        }
    }

    /// `name` as given, or the page's first and last name joined when the
    /// body carries no `name` at all.
    fn resolved_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.trim().to_owned();
        }

        [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A submission whose required fields are trimmed and non-empty.
#[derive(Validate, Debug, Clone, PartialEq)]
pub struct Submission {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub message: String,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub employees: Option<Employees>,
}

impl TryFrom<SubmissionInput> for Submission {
    type Error = ValidationErrors;

    fn try_from(input: SubmissionInput) -> Result<Self, Self::Error> {
        let optional = |value: Option<String>| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };
        let required = |value: Option<String>| optional(value).unwrap_or_default();

        let submission = Submission {
            name: input.resolved_name(),
            employees: input
                .employees
                .as_deref()
                .and_then(|v| Employees::from_str(v.trim()).ok()),
            email: required(input.email),
            message: required(input.message),
            job_title: optional(input.job_title),
            phone: optional(input.phone),
        };

        submission.validate()?;

        Ok(submission)
    }
}
