//! Invoice metadata query.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{KsefError, ValidationError};

/// Largest page the service accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Which party of the invoice the querying subject is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubjectType {
    /// Invoices issued by the subject.
    #[default]
    #[serde(rename = "subject1")]
    Issuer,
    /// Invoices received by the subject.
    #[serde(rename = "subject2")]
    Recipient,
    /// Invoices naming the subject as a third party.
    #[serde(rename = "subject3")]
    ThirdParty,
    /// Invoices the subject is authorized to see.
    #[serde(rename = "subjectAuthorized")]
    Authorized,
}

/// Range query over invoicing dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceQuery {
    pub invoicing_date_from: DateTime<Utc>,
    pub invoicing_date_to: DateTime<Utc>,
    pub subject_type: SubjectType,
    pub page_size: u32,
    pub page_offset: u32,
}

impl InvoiceQuery {
    /// First page of invoices issued by the subject in `[from, to]`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            invoicing_date_from: from,
            invoicing_date_to: to,
            subject_type: SubjectType::default(),
            page_size: MAX_PAGE_SIZE,
            page_offset: 0,
        }
    }

    pub fn subject_type(mut self, subject_type: SubjectType) -> Self {
        self.subject_type = subject_type;
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_offset(mut self, page_offset: u32) -> Self {
        self.page_offset = page_offset;
        self
    }

    /// Check the range and paging before anything is sent.
    pub fn validate(&self) -> Result<(), KsefError> {
        let mut errors = Vec::new();
        if self.invoicing_date_from > self.invoicing_date_to {
            errors.push(ValidationError::new(
                "query.invoicing_date_from",
                "must not be after invoicing_date_to",
            ));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            errors.push(ValidationError::new(
                "query.page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(KsefError::InvalidFieldValue(errors))
        }
    }

    /// `PageSize` / `PageOffset` query parameters.
    pub(crate) fn paging(&self) -> [(&'static str, u32); 2] {
        [("PageSize", self.page_size), ("PageOffset", self.page_offset)]
    }

    /// JSON request body.
    pub(crate) fn body(&self) -> QueryRequest {
        QueryRequest {
            query_criteria: QueryCriteria {
                subject_type: self.subject_type,
                kind: "range",
                invoicing_date_from: format_instant(&self.invoicing_date_from),
                invoicing_date_to: format_instant(&self.invoicing_date_to),
            },
        }
    }
}

fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest {
    query_criteria: QueryCriteria,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryCriteria {
    subject_type: SubjectType,
    #[serde(rename = "type")]
    kind: &'static str,
    invoicing_date_from: String,
    invoicing_date_to: String,
}
