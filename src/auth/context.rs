//! Explicit authentication context.
//!
//! Every component that needs the current user gets a clone of the same
//! [`AuthContext`]; the watch channel inside it is the one place sign-in and
//! sign-out are observed.

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::db::User;

use super::IdentityFile;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub signed_in_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AuthContext {
    session: Arc<watch::Sender<Option<AuthSession>>>,
    identity: Option<Arc<IdentityFile>>,
}

impl AuthContext {
    pub fn signed_out() -> Self {
        Self::from_parts(None, None)
    }

    pub fn signed_in(user: User) -> Self {
        Self::from_parts(Some(new_session(user)), None)
    }

    /// Context backed by a file, so a sign-in outlives the process.
    pub fn from_identity(identity: IdentityFile) -> Self {
        let session = identity.load();
        Self::from_parts(session, Some(Arc::new(identity)))
    }

    fn from_parts(session: Option<AuthSession>, identity: Option<Arc<IdentityFile>>) -> Self {
        let (sender, _) = watch::channel(session);
        Self {
            session: Arc::new(sender),
            identity,
        }
    }

    pub fn current_session(&self) -> Option<AuthSession> {
        self.session.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.borrow().as_ref().map(|session| session.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_some()
    }

    pub fn sign_in(&self, user: User) -> Result<AuthSession> {
        let session = new_session(user);
        if let Some(identity) = &self.identity {
            identity.save(&session)?;
        }
        self.session.send_replace(Some(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&self) -> Result<()> {
        if let Some(identity) = &self.identity {
            identity.clear()?;
        }
        self.session.send_replace(None);
        Ok(())
    }

    /// Change notifications; the receiver starts at the current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<AuthSession>> {
        self.session.subscribe()
    }
}

fn new_session(user: User) -> AuthSession {
    AuthSession {
        user,
        signed_in_at: Utc::now(),
    }
}
