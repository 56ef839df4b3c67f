pub(crate) mod commands;
pub mod config;
pub mod controller;
pub mod scoring;
pub mod state;

pub use config::ProtocolConfig;
pub use controller::SessionController;
pub use scoring::{PlaceholderScorer, SessionOutcome, SessionScorer};
pub use state::{ProtocolPhase, SessionSnapshot, SessionState};
