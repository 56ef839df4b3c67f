use crate::gestures;
use crate::protocol::{ProtocolPhase, SessionSnapshot};

use super::{gesture_display, Emphasis, ProgressRing};

const RING_WIDTH: usize = 24;

pub fn render_idle() -> Vec<String> {
    vec![
        "HandWash Monitor".to_string(),
        "WHO Standard Protocol".to_string(),
        String::new(),
        "( Begin Handwash )".to_string(),
        "Back to Dashboard".to_string(),
    ]
}

pub fn render_active(snapshot: &SessionSnapshot) -> Vec<String> {
    let ring = ProgressRing::default();
    let mut lines = vec![ring.render_bar(snapshot.progress, RING_WIDTH), String::new()];

    if let Some(current) = &snapshot.current_gesture {
        lines.extend(gesture_display::render(
            current,
            &snapshot.state.detected_status,
            Emphasis::Large,
        ));
    }

    if let Some(next) = &snapshot.next_gesture {
        lines.push(String::new());
        lines.push("Next:".to_string());
        lines.extend(gesture_display::render(next, "", Emphasis::Small));
    }

    lines.push(String::new());
    lines.push(format!(
        "Step {} of {}",
        snapshot.state.current_step + 1,
        gestures::gesture_count()
    ));
    lines
}

pub fn render(snapshot: &SessionSnapshot) -> Vec<String> {
    if snapshot.state.is_active && snapshot.state.phase != ProtocolPhase::Idle {
        render_active(snapshot)
    } else {
        render_idle()
    }
}
