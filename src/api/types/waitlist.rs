//! Waitlist request and response bodies

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::waitlist::{TargetLanguage, WaitlistEntry, WaitlistQuery};

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const MAX_PAGE_SIZE: usize = 500;

/// Body of `POST /v1/waitlist`
#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    pub email: String,
    #[serde(default)]
    pub target_language: Option<String>,
}

impl JoinRequest {
    pub fn target_language(&self) -> Result<Option<TargetLanguage>, ApiError> {
        parse_language(self.target_language.as_deref())
    }
}

/// Query string of `GET /admin/waitlist`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WaitlistListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub language: Option<String>,
}

impl WaitlistListParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }

    pub fn to_query(&self) -> Result<WaitlistQuery, ApiError> {
        let mut query = WaitlistQuery::new()
            .with_limit(self.limit())
            .with_offset(self.offset());

        if let Some(language) = parse_language(self.language.as_deref())? {
            query = query.with_language(language);
        }

        Ok(query)
    }
}

#[derive(Debug, Serialize)]
pub struct WaitlistListResponse {
    pub object: &'static str,
    pub data: Vec<WaitlistEntry>,
    /// Matching entries before pagination
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl WaitlistListResponse {
    pub fn new(data: Vec<WaitlistEntry>, total: usize, params: &WaitlistListParams) -> Self {
        Self {
            object: "list",
            data,
            total,
            limit: params.limit(),
            offset: params.offset(),
        }
    }
}

fn parse_language(value: Option<&str>) -> Result<Option<TargetLanguage>, ApiError> {
    TargetLanguage::parse_optional(value).map_err(|e| {
        ApiError::bad_request(e.to_string())
            .with_param("target_language")
            .with_code("unknown_language")
    })
}
