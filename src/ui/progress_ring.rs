use std::f64::consts::PI;

/// Circular progress indicator geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    pub radius: f64,
    pub stroke: f64,
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self {
            radius: 160.0,
            stroke: 12.0,
        }
    }
}

impl ProgressRing {
    /// Radius of the stroke's centre line.
    pub fn normalized_radius(&self) -> f64 {
        self.radius - self.stroke / 2.0
    }

    pub fn circumference(&self) -> f64 {
        self.normalized_radius() * 2.0 * PI
    }

    /// Share of the annulus that is filled, clamped to `[0, 1]`.
    pub fn filled_fraction(progress: f64) -> f64 {
        (progress / 100.0).clamp(0.0, 1.0)
    }

    /// Length of the unfilled part of the arc.
    pub fn dash_offset(&self, progress: f64) -> f64 {
        let circumference = self.circumference();
        circumference - Self::filled_fraction(progress) * circumference
    }

    /// Terminal stand-in for the ring: `[█████░░░░░]  50%`.
    pub fn render_bar(&self, progress: f64, width: usize) -> String {
        let filled = (Self::filled_fraction(progress) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!(
            "[{}{}] {:>3.0}%",
            "█".repeat(filled),
            "░".repeat(width - filled),
            Self::filled_fraction(progress) * 100.0
        )
    }
}
