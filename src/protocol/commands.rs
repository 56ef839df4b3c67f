use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::Result;
use tokio::sync::broadcast::error::RecvError;

use crate::{
    dashboard::commands::show_dashboard,
    events::{HapticPattern, NoticeVariant, ProtocolEvent, Route},
    gestures,
    ui::{notice, watch_face},
    AppState,
};

use super::{PlaceholderScorer, ProtocolConfig, SessionController};

#[derive(Debug, Clone, Default)]
pub struct SimulateOptions {
    pub fast: bool,
    pub no_haptics: bool,
    pub seed: Option<u64>,
}

impl SimulateOptions {
    fn protocol_config(&self, base: ProtocolConfig) -> ProtocolConfig {
        let mut config = if self.fast {
            ProtocolConfig {
                haptics_enabled: base.haptics_enabled,
                ..ProtocolConfig::fast()
            }
        } else {
            base
        };
        if self.no_haptics {
            config.haptics_enabled = false;
        }
        config
    }
}

/// One terminal bell per vibration pulse.
fn ring(pattern: &HapticPattern) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for _ in 0..pattern.pulses() {
        stdout.write_all(b"\x07")?;
    }
    stdout.flush()
}

fn print_lines(lines: &[String]) {
    println!("{}", "─".repeat(32));
    for line in lines {
        println!("  {line}");
    }
}

/// Run one session on the simulated watch, then show the dashboard if the
/// protocol asks for it. Ctrl-C is the "Back to Dashboard" button.
pub async fn simulate(state: &AppState, options: SimulateOptions) -> Result<()> {
    let config = options.protocol_config(state.settings.protocol());
    let mut controller = SessionController::new(
        state.db.clone(),
        state.auth.clone(),
        state.events.clone(),
        config,
    );
    if let Some(seed) = options.seed {
        controller = controller.with_scorer(Arc::new(PlaceholderScorer::seeded(seed)));
    }

    let mut events = state.events.subscribe();
    state.events.navigate(Route::Simulator);
    println!(
        "Guided session: {} gestures, about {}s",
        gestures::gesture_count(),
        controller
            .config()
            .session_length(gestures::gesture_count())
            .as_secs()
    );
    print_lines(&watch_face::render_idle());
    controller.start_session().await?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let route = loop {
        tokio::select! {
            received = events.recv() => match received {
                Ok(ProtocolEvent::StateChanged(snapshot)) => {
                    print_lines(&watch_face::render(&snapshot));
                }
                Ok(ProtocolEvent::Notice(n)) => {
                    println!("{}", notice::render(&n));
                    if n.variant == NoticeVariant::Destructive {
                        break None;
                    }
                }
                Ok(ProtocolEvent::Haptic(pattern)) => {
                    log::debug!("vibrate {:?}", pattern.0);
                    if let Err(err) = ring(&pattern) {
                        log::warn!("Could not ring the terminal bell: {err}");
                    }
                }
                Ok(ProtocolEvent::Navigate(route)) => {
                    log::debug!("Navigating to {}", route.path());
                    if route != Route::Simulator {
                        break Some(route);
                    }
                }
                Err(RecvError::Lagged(missed)) => {
                    log::warn!("Watch face skipped {missed} protocol events");
                }
                Err(RecvError::Closed) => break None,
            },
            _ = &mut ctrl_c => {
                controller.back_to_dashboard().await;
                break Some(Route::Dashboard);
            }
        }
    };

    if route == Some(Route::Dashboard) {
        println!();
        show_dashboard(state).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_keeps_configured_haptics_unless_disabled() {
        let base = ProtocolConfig {
            haptics_enabled: false,
            ..ProtocolConfig::default()
        };
        let fast = SimulateOptions {
            fast: true,
            ..SimulateOptions::default()
        };
        let config = fast.protocol_config(base);
        assert_eq!(config.detection_window_ms, 300);
        assert!(!config.haptics_enabled);

        let quiet = SimulateOptions {
            no_haptics: true,
            ..SimulateOptions::default()
        };
        assert!(!quiet.protocol_config(ProtocolConfig::default()).haptics_enabled);
    }
}
