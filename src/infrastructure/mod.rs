//! Infrastructure layer - External service implementations

pub mod logging;
pub mod notification;
pub mod observability;
pub mod registration;
pub mod storage;
pub mod waitlist;
