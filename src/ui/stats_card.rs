#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    Primary,
    Success,
    Accent,
    Default,
}

impl CardVariant {
    fn marker(&self) -> &'static str {
        match self {
            CardVariant::Primary => "◆",
            CardVariant::Success => "✔",
            CardVariant::Accent => "◷",
            CardVariant::Default => "↗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsCard {
    pub title: &'static str,
    pub value: String,
    pub variant: CardVariant,
}

impl StatsCard {
    pub fn new(title: &'static str, value: impl Into<String>, variant: CardVariant) -> Self {
        Self {
            title,
            value: value.into(),
            variant,
        }
    }

    pub fn render(&self) -> String {
        format!("{} {:<16} {:>6}", self.variant.marker(), self.title, self.value)
    }
}
