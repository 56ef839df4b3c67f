pub mod handwash_session;
pub mod user;

pub use handwash_session::{DailyStats, HandwashSession, NewHandwashSession};
pub use user::User;
