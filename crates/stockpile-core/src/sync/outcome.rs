use std::fmt;

use serde::Serialize;

use crate::models::ProductDraft;

/// The user-facing operation an outcome reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Operation {
    Load,
    Add,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load"),
            Operation::Add => write!(f, "add"),
            Operation::Update => write!(f, "update"),
            Operation::Delete => write!(f, "delete"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum Severity {
    Info,
    Error,
}

/// Result of a controller operation, ready to be shown as a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Outcome {
    pub operation: Operation,
    pub severity: Severity,
    pub message: String,
}

impl Outcome {
    pub fn success(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn failure(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.severity == Severity::Info
    }
}

/// An edit in progress: the record's id and its editable fields.
///
/// Produced by `SyncController::begin_edit`, modified by the caller and
/// handed back to `SyncController::submit_edit`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub id: i64,
    pub draft: ProductDraft,
}
