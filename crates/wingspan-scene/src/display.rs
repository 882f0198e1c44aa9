/// Which layers of a scene are streamed by [`Scene::draw`](crate::Scene::draw).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayOptions {
    pub curves: bool,
    /// Each window's four control points as a line strip.
    pub control_polygon: bool,
    pub control_points: bool,
    /// Chord tolerance for adaptive curve sampling; `None` samples uniformly.
    pub tolerance: Option<f64>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            curves: true,
            control_polygon: true,
            control_points: true,
            tolerance: None,
        }
    }
}

impl DisplayOptions {
    pub fn curves_only() -> Self {
        Self {
            control_polygon: false,
            control_points: false,
            ..Self::default()
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
}
