use std::collections::HashMap;
use serde::{Deserialize, Serialize};

/// Failed calls grouped by status code and message.
#[derive(Debug, Default)]
pub struct HttpErrorStats {
    pub(crate) errors: HashMap<(u16, String), u32>,
}

/// One row of the error breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpErrorEntry {
    pub code: u16,
    pub message: String,
    pub count: u32,
}

impl HttpErrorStats {
    pub(crate) fn new() -> Self {
        HttpErrorStats::default()
    }

    // one more occurrence of this (code, message) pair
    pub(crate) fn increment(&mut self, status_code: u16, error_message: String) {
        *self.errors.entry((status_code, error_message)).or_insert(0) += 1;
    }

    /// Most frequent first, ties broken by code then message.
    pub(crate) fn entries(&self) -> Vec<HttpErrorEntry> {
        let mut entries: Vec<HttpErrorEntry> = self
            .errors
            .iter()
            .map(|((code, message), count)| HttpErrorEntry {
                code: *code,
                message: message.clone(),
                count: *count,
            })
            .collect();
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
        });
        entries
    }
}
