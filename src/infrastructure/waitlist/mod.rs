//! Waitlist infrastructure implementations

mod repository;
mod service;

pub use repository::StorageWaitlistRepository;
pub use service::WaitlistService;
