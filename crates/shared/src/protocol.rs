use serde::{Deserialize, Serialize};

use crate::domain::Game;

/// Body of `POST /submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub games: Vec<Game>,
}

/// Body returned by `/submit`. Every field is optional on the wire so that a
/// partial payload still decodes and can be classified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitVerdict {
    Accepted { redirect: String },
    Rejected { message: Option<String> },
}

impl SubmitResponse {
    pub fn accepted(redirect: impl Into<String>) -> Self {
        Self {
            success: true,
            message: None,
            redirect: Some(redirect.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            redirect: None,
        }
    }

    /// A success flag without a usable redirect target counts as a rejection
    /// with no server message.
    pub fn verdict(self) -> SubmitVerdict {
        match (self.success, self.redirect) {
            (true, Some(redirect)) if !redirect.trim().is_empty() => {
                SubmitVerdict::Accepted { redirect }
            }
            (true, _) => SubmitVerdict::Rejected { message: None },
            (false, _) => SubmitVerdict::Rejected {
                message: self.message.filter(|m| !m.is_empty()),
            },
        }
    }
}
