use crate::{events::ProtocolEvent, ui::notice, AppState};

use super::{mount, DashboardOutcome};

pub async fn show_dashboard(state: &AppState) {
    let mut events = state.events.subscribe();

    match mount(&state.auth, &state.db, &state.events).await {
        DashboardOutcome::Ready(view) => {
            while let Ok(event) = events.try_recv() {
                if let ProtocolEvent::Notice(n) = event {
                    println!("{}", notice::render(&n));
                }
            }
            for line in view.render() {
                println!("{line}");
            }
        }
        DashboardOutcome::Redirect(_) => {
            println!("Sign in required. Run `handwash-monitor login <email>`.");
        }
    }
}
