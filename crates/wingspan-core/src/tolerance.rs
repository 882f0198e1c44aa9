/// Distance tolerance used when welding generated geometry.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for distance comparisons (in model units)
    pub linear: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-7;

    pub fn new(linear: f64) -> Self {
        Self { linear }
    }

    /// Tolerance suited to vertices computed through trigonometry, e.g.
    /// welding sphere seams.
    pub fn loose() -> Self {
        Self::new(1e-4)
    }

    /// Quantize a coordinate onto the linear tolerance grid.
    ///
    /// Values closer than `linear` usually land in the same cell; callers that
    /// need exact neighbourhood queries must also probe adjacent cells.
    pub fn quantize(self, v: f64) -> i64 {
        (v / self.linear).round() as i64
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LINEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantize_merges_close_values() {
        let tol = Tolerance::loose();
        assert_eq!(tol.quantize(0.50001), tol.quantize(0.5));
        assert_ne!(tol.quantize(0.5), tol.quantize(0.5003));
        assert_eq!(tol.quantize(-0.0), tol.quantize(0.0));
    }

    #[test]
    fn test_default_is_tight() {
        let tol = Tolerance::default();
        assert_ne!(tol.quantize(0.5), tol.quantize(0.50001));
        assert_eq!(tol.quantize(1.0), 10_000_000);
    }
}
