use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FieldError;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Body of POST /summaries/.
#[derive(Deserialize)]
pub struct SummaryPayload {
    pub url: Option<String>,
}

impl SummaryPayload {
    pub fn validate(&self) -> Result<&str, Vec<FieldError>> {
        let mut errors = Vec::new();
        let url = require_url(self.url.as_deref(), &mut errors);

        match url {
            Some(url) if errors.is_empty() => Ok(url),
            _ => Err(errors),
        }
    }
}

/// Body of PUT /summaries/{id}/. Both fields are required.
#[derive(Deserialize)]
pub struct SummaryUpdatePayload {
    pub url: Option<String>,
    pub summary: Option<String>,
}

impl SummaryUpdatePayload {
    pub fn validate(&self) -> Result<(&str, &str), Vec<FieldError>> {
        let mut errors = Vec::new();
        let url = require_url(self.url.as_deref(), &mut errors);

        let summary = match self.summary.as_deref() {
            Some(summary) => Some(summary),
            None => {
                errors.push(FieldError::missing("body", "summary"));
                None
            }
        };

        match (url, summary) {
            (Some(url), Some(summary)) if errors.is_empty() => Ok((url, summary)),
            _ => Err(errors),
        }
    }
}

/// Body of a successful DELETE /summaries/{id}/.
#[derive(Serialize)]
pub struct DeletedSummary {
    pub id: i64,
    pub url: String,
}

fn require_url<'a>(url: Option<&'a str>, errors: &mut Vec<FieldError>) -> Option<&'a str> {
    let Some(url) = url else {
        errors.push(FieldError::missing("body", "url"));
        return None;
    };

    match Url::parse(url) {
        Ok(parsed) if ALLOWED_SCHEMES.contains(&parsed.scheme()) => Some(url),
        Ok(_) => {
            errors.push(FieldError::scheme_not_permitted("body", "url"));
            None
        }
        Err(_) => {
            errors.push(FieldError {
                loc: vec!["body".to_string(), "url".to_string()],
                msg: "invalid or missing URL scheme".to_string(),
                kind: "value_error.url".to_string(),
            });
            None
        }
    }
}

/// Path identifiers must be strictly positive.
pub fn check_id(id: i64) -> Result<i64, Vec<FieldError>> {
    if id > 0 {
        Ok(id)
    } else {
        Err(vec![FieldError::not_positive("path", "id")])
    }
}
