//! History view: today's aggregate plus the most recent sessions.

pub(crate) mod commands;
pub mod stats;

use crate::{
    auth::AuthContext,
    db::{DailyStats, HandwashSession, User},
    events::{EventBus, Notice, Route},
    store::{SessionStore, RECENT_SESSIONS_LIMIT},
    ui::handwash_log,
};

pub use stats::{compliance_percent, stats_cards, COMPLIANCE_TARGET};

// Set to false to silence dashboard logging.
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub const EMPTY_STATE: &str = "No hand-wash sessions recorded yet";
pub const EMPTY_STATE_ACTION: &str = "Start Your First Session";

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub user: User,
    pub sessions: Vec<HandwashSession>,
    pub stats: Option<DailyStats>,
}

impl DashboardView {
    pub fn total_washes(&self) -> u32 {
        self.stats.as_ref().map(|s| s.total_washes).unwrap_or(0)
    }

    pub fn compliance(&self) -> u32 {
        compliance_percent(self.total_washes())
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            "HandWashMonitor".to_string(),
            "WHO-Standard Hand Hygiene Tracking".to_string(),
            format!("Signed in as {}", self.user.email),
            String::new(),
        ];

        lines.extend(stats_cards(self.stats.as_ref()).iter().map(|card| card.render()));
        lines.push(String::new());
        lines.push("Recent Hand-Wash Sessions".to_string());

        if self.sessions.is_empty() {
            lines.push(EMPTY_STATE.to_string());
            lines.push(format!("( {EMPTY_STATE_ACTION} )"));
        } else {
            lines.extend(handwash_log::render(&self.sessions));
        }
        lines
    }
}

#[derive(Debug, Clone)]
pub enum DashboardOutcome {
    Ready(DashboardView),
    Redirect(Route),
}

/// Load the dashboard for whoever is signed in.
///
/// Fetch failures become notices; the view keeps whatever did load.
pub async fn mount<S: SessionStore>(
    auth: &AuthContext,
    store: &S,
    events: &EventBus,
) -> DashboardOutcome {
    let Some(user) = auth.current_user() else {
        events.navigate(Route::Auth);
        return DashboardOutcome::Redirect(Route::Auth);
    };

    let mut view = DashboardView {
        user,
        sessions: Vec::new(),
        stats: None,
    };

    let user_id = view.user.id.clone();
    match load_data(store, &user_id, &mut view).await {
        Ok(()) => log_info!(
            "Dashboard loaded {} sessions for {}",
            view.sessions.len(),
            view.user.email
        ),
        Err(err) => {
            log_warn!("Dashboard load failed: {err:#}");
            events.notice(Notice::destructive("Error loading data", format!("{err:#}")));
        }
    }

    DashboardOutcome::Ready(view)
}

async fn load_data<S: SessionStore>(
    store: &S,
    user_id: &str,
    view: &mut DashboardView,
) -> anyhow::Result<()> {
    view.sessions = store
        .list_recent_sessions(user_id, RECENT_SESSIONS_LIMIT)
        .await?;
    view.stats = store.get_daily_stats(user_id).await?.into_iter().next();
    Ok(())
}

/// Resolves once the user signs out, after requesting the auth route.
pub async fn redirect_on_sign_out(auth: &AuthContext, events: &EventBus) -> Route {
    let mut changes = auth.subscribe();
    loop {
        if changes.borrow_and_update().is_none() {
            break;
        }
        if changes.changed().await.is_err() {
            break;
        }
    }

    events.navigate(Route::Auth);
    Route::Auth
}

pub fn sign_out(auth: &AuthContext, events: &EventBus) -> anyhow::Result<()> {
    auth.sign_out()?;
    events.notice(Notice::info("Signed out", ""));
    events.navigate(Route::Auth);
    Ok(())
}
