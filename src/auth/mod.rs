pub(crate) mod commands;
pub mod context;
pub mod identity;

pub use context::{AuthContext, AuthSession};
pub use identity::IdentityFile;
