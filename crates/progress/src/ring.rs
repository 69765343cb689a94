//! Progress ring geometry and its terminal rendering.

/// A circular progress indicator drawn as a stroked circle whose dash offset
/// hides the unfinished part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRing {
    /// Outer radius
    pub radius: f64,
    /// Stroke width
    pub stroke: f64,
}

/// Geometry of a ring at a given progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Radius of the stroked circle
    pub normalized_radius: f64,
    /// Full dash length
    pub circumference: f64,
    /// Length of the hidden part of the dash
    pub dash_offset: f64,
    /// Percentage actually drawn, in `[0, 100]`
    pub shown_percent: f64,
}

impl ProgressRing {
    /// Ring used by the timer view.
    pub const TIMER: ProgressRing = ProgressRing { radius: 100.0, stroke: 8.0 };

    /// Create a ring.
    pub fn new(radius: f64, stroke: f64) -> Self {
        Self { radius, stroke }
    }

    /// Geometry for `percent`. Values outside `[0, 100]` and NaN are clamped
    /// for drawing only.
    pub fn geometry(&self, percent: f64) -> RingGeometry {
        let normalized_radius = (self.radius - self.stroke * 2.0).max(0.0);
        let circumference = normalized_radius * 2.0 * std::f64::consts::PI;
        let shown_percent = clamp_percent(percent);
        RingGeometry {
            normalized_radius,
            circumference,
            dash_offset: circumference - shown_percent / 100.0 * circumference,
            shown_percent,
        }
    }
}

/// Clamp a raw percentage into `[0, 100]` for display.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

/// Render a fixed-width bar like `[#####-----]`.
pub fn render_bar(percent: f64, width: usize) -> String {
    let filled = ((clamp_percent(percent) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
