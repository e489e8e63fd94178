//! Registration backends other than the local waitlist service

mod remote;
mod simulated;

pub use remote::RemoteRegistrationClient;
pub use simulated::SimulatedRegistrationService;
