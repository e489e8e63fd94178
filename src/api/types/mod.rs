//! Request and response types shared by the JSON endpoints

pub mod error;
pub mod json;
pub mod waitlist;

pub use error::{ApiError, ApiErrorResponse, ApiErrorType};
pub use json::Json;
pub use waitlist::{JoinRequest, WaitlistListParams, WaitlistListResponse};
