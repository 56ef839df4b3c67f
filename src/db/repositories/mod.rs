pub mod handwash_sessions;
pub mod users;
