use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// Failure classes a caller can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Network,
    Server,
    NotFound,
    Validation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorCode::Network => "network error",
            ErrorCode::Server => "server error",
            ErrorCode::NotFound => "not found",
            ErrorCode::Validation => "validation error",
        })
    }
}

/// RFC 7807 problem body returned by the order API on rejected requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, Vec<String>>,
}

impl ProblemDetails {
    /// Single-line summary: field errors first, then detail, then title.
    pub fn summary(&self) -> Option<String> {
        let field_errors: Vec<String> = self
            .errors
            .iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| format!("{field}: {message}"))
            })
            .collect();
        if !field_errors.is_empty() {
            return Some(field_errors.join("; "));
        }
        self.detail
            .clone()
            .or_else(|| self.title.clone())
            .filter(|text| !text.trim().is_empty())
    }
}
