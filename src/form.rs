//! Contact form: submission record and field focus styling.
//!
//! Nothing is validated or sent anywhere. The record is logged and dropped.

use std::fmt;

use crate::toast::{Notice, Severity};

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    /// Reads each named field through `lookup`. Missing fields become empty.
    pub fn from_lookup<F>(mut lookup: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut field = |name: &str| lookup(name).unwrap_or_default();
        Self {
            name: field("name"),
            email: field("email"),
            subject: field("subject"),
            message: field("message"),
        }
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ name: {:?}, email: {:?}, subject: {:?}, message: {:?} }}",
            self.name, self.email, self.subject, self.message
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub record: Submission,
    pub notice: Notice,
}

/// Handles one submit: builds the record, logs it and returns the
/// notification to show. The caller resets the form afterwards.
pub fn submit<F>(lookup: F) -> SubmitOutcome
where
    F: FnMut(&str) -> Option<String>,
{
    let record = Submission::from_lookup(lookup);
    log::info!("Form submitted: {record}");
    SubmitOutcome {
        record,
        notice: Notice::new(SUCCESS_MESSAGE, Severity::Success),
    }
}

/// Inline border and glow for a form control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldStyle {
    pub border_color: &'static str,
    pub box_shadow: &'static str,
}

impl FieldStyle {
    pub fn focused() -> Self {
        Self {
            border_color: "#a855f7",
            box_shadow: "0 0 0 2px rgba(168, 85, 247, 0.2)",
        }
    }

    pub fn blurred() -> Self {
        Self {
            border_color: "rgba(255, 255, 255, 0.2)",
            box_shadow: "none",
        }
    }
}
