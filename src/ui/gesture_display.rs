use crate::gestures::Gesture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// The gesture being performed.
    Large,
    /// The "Next:" hint.
    Small,
}

pub fn render(gesture: &Gesture, status: &str, emphasis: Emphasis) -> Vec<String> {
    let mut lines = match emphasis {
        Emphasis::Large => vec![
            format!("[ {} ]", gesture.image),
            gesture.name.to_uppercase(),
            gesture.description.to_string(),
        ],
        Emphasis::Small => vec![format!("{} - {}", gesture.name, gesture.description)],
    };

    if !status.is_empty() {
        lines.push(status.to_string());
    }
    lines
}
