//! JSON scene descriptions and the built-in presets.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use wingspan_core::traits::Validate;
use wingspan_core::{Result, WingspanError};
use wingspan_geometry::{ControlCurve, DEFAULT_SAMPLES};
use wingspan_math::{Axis, Color, Point3, Vector3};

use crate::animation::DEFAULT_CYCLE_MS;

fn default_cycle_ms() -> u64 {
    DEFAULT_CYCLE_MS
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

/// Top-level scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default = "default_cycle_ms")]
    pub cycle_ms: u64,
    #[serde(default = "default_samples")]
    pub samples_per_segment: usize,
    #[serde(default)]
    pub curves: Vec<CurveConfig>,
    #[serde(default)]
    pub animations: Vec<AnimationConfig>,
    #[serde(default)]
    pub spheres: Vec<SphereConfig>,
}

/// A flat-colored control curve. Without `windows`, every cyclic window is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    pub name: String,
    pub color: Color,
    pub points: Vec<Point3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<[usize; 4]>>,
}

/// Oscillating motion applied to a subset of one curve's points.
///
/// The driven value is `amplitude * -sin(2*PI * cycles * phase)`: a distance
/// along `direction` for translations, degrees for rotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub curve: String,
    pub points: Vec<usize>,
    pub motion: MotionConfig,
    pub amplitude: f64,
    #[serde(default = "one")]
    pub cycles: f64,
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionConfig {
    Translate { direction: Vector3 },
    Rotate { axis: Axis, pivot: Point3 },
}

/// A UV sphere streamed once when the scene is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereConfig {
    pub name: String,
    pub radius: f64,
    pub slices: usize,
    pub stacks: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cycle_ms: DEFAULT_CYCLE_MS,
            samples_per_segment: DEFAULT_SAMPLES,
            curves: Vec::new(),
            animations: Vec::new(),
            spheres: Vec::new(),
        }
    }
}

impl SceneConfig {
    /// Read and validate a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::info!(
            "loaded scene {}: {} curves, {} animations, {} spheres",
            path.display(),
            config.curves.len(),
            config.animations.len(),
            config.spheres.len()
        );
        Ok(config)
    }

    /// Parse and validate a scene document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| WingspanError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| WingspanError::Parse(e.to_string()))
    }

    pub fn curve(&self, name: &str) -> Option<&CurveConfig> {
        self.curves.iter().find(|c| c.name == name)
    }

    /// The butterfly: a body and six wing contours whose outer points flap
    /// along +Z twice per cycle.
    pub fn butterfly() -> Self {
        const CONTOUR: [[usize; 4]; 4] = [[0, 1, 2, 3], [1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 0]];
        const INNER: [[usize; 4]; 2] = [[0, 1, 2, 3], [1, 2, 3, 0]];

        let curve = |name: &str, color: Color, points: &[[f64; 3]], windows: &[[usize; 4]]| {
            CurveConfig {
                name: name.to_string(),
                color,
                points: points.iter().copied().map(Point3::from_array).collect(),
                windows: Some(windows.to_vec()),
            }
        };
        let flap = |name: &str, points: &[usize]| AnimationConfig {
            curve: name.to_string(),
            points: points.to_vec(),
            motion: MotionConfig::Translate {
                direction: Vector3::Z,
            },
            amplitude: 0.25,
            cycles: 2.0,
        };

        let curves = vec![
            curve(
                "body",
                [0.0, 0.0, 1.0],
                &[
                    [0.5, 2.0, 0.8],
                    [0.0, 1.5, 0.8],
                    [-0.2, 0.7, 0.8],
                    [0.0, 0.2, 0.8],
                    [0.2, 0.7, 0.8],
                    [-0.5, 2.0, 0.8],
                ],
                &[[0, 1, 2, 3], [1, 2, 3, 4], [2, 3, 4, 1], [3, 4, 1, 5], [4, 1, 5, 2], [2, 1, 0, 4]],
            ),
            curve(
                "wing1",
                [1.0, 0.0, 0.0],
                &[
                    [-0.5, 0.7, 0.8],
                    [0.0, 1.5, 0.8],
                    [1.2, 1.65, 1.2],
                    [0.7, 0.9, 1.2],
                    [1.05, 0.45, 1.2],
                    [0.0, 0.2, 0.8],
                ],
                &CONTOUR,
            ),
            curve(
                "wing2",
                [1.0, 0.5, 0.0],
                &[
                    [0.5, 0.7, 0.8],
                    [0.0, 1.5, 0.8],
                    [-1.2, 1.65, 1.2],
                    [-0.7, 0.9, 1.2],
                    [-1.05, 0.45, 1.2],
                    [0.0, 0.2, 0.8],
                ],
                &CONTOUR,
            ),
            curve(
                "innerwing1",
                [1.0, 1.0, 0.0],
                &[[0.5, 0.9, 0.8], [0.0, 1.5, 0.8], [0.9, 1.5, 1.2], [0.2, 0.9, 0.8]],
                &INNER,
            ),
            curve(
                "innerwing2",
                [0.5, 1.0, 0.0],
                &[[-0.5, 0.9, 0.8], [0.0, 1.5, 0.8], [-0.9, 1.5, 1.2], [-0.2, 0.9, 0.8]],
                &INNER,
            ),
            curve(
                "innerwing3",
                [0.0, 1.0, 0.5],
                &[[-0.5, 0.9, 0.8], [0.2, 0.9, 0.8], [0.6, 0.65, 1.2], [0.0, 0.2, 0.8]],
                &INNER,
            ),
            curve(
                "innerwing4",
                [0.0, 1.0, 1.0],
                &[[0.5, 0.9, 0.8], [-0.2, 0.9, 0.8], [-0.6, 0.65, 1.2], [0.0, 0.2, 0.8]],
                &INNER,
            ),
        ];

        let animations = vec![
            flap("body", &[0, 5]),
            flap("wing1", &[2, 3, 4]),
            flap("wing2", &[2, 3, 4]),
            flap("innerwing1", &[2]),
            flap("innerwing2", &[2]),
            flap("innerwing3", &[2]),
            flap("innerwing4", &[2]),
        ];

        Self {
            curves,
            animations,
            ..Self::default()
        }
    }

    /// The textured globe of the lit scene.
    pub fn globe() -> Self {
        Self {
            spheres: vec![SphereConfig {
                name: "globe".to_string(),
                radius: 1.5,
                slices: 32,
                stacks: 42,
            }],
            ..Self::default()
        }
    }
}

impl Validate for SceneConfig {
    fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(WingspanError::InvalidScene(msg));

        if self.cycle_ms == 0 {
            return invalid("cycle_ms must be positive".into());
        }
        if self.samples_per_segment == 0 {
            return invalid("samples_per_segment must be positive".into());
        }

        let mut sizes: HashMap<&str, usize> = HashMap::new();
        for curve in &self.curves {
            if curve.points.len() < ControlCurve::MIN_POINTS {
                return invalid(format!(
                    "curve '{}' has {} points, need at least {}",
                    curve.name,
                    curve.points.len(),
                    ControlCurve::MIN_POINTS
                ));
            }
            if let Some(bad) = curve
                .windows
                .iter()
                .flatten()
                .find(|w| w.iter().any(|&i| i >= curve.points.len()))
            {
                return invalid(format!(
                    "curve '{}': window {:?} refers past its {} points",
                    curve.name,
                    bad,
                    curve.points.len()
                ));
            }
            if sizes.insert(&curve.name, curve.points.len()).is_some() {
                return invalid(format!("duplicate curve name '{}'", curve.name));
            }
        }

        let mut driven: HashSet<(&str, usize)> = HashSet::new();
        for anim in &self.animations {
            let Some(&len) = sizes.get(anim.curve.as_str()) else {
                return invalid(format!("animation targets unknown curve '{}'", anim.curve));
            };
            if !anim.amplitude.is_finite() || !anim.cycles.is_finite() {
                return invalid(format!(
                    "animation on '{}' has a non-finite amplitude or cycle count",
                    anim.curve
                ));
            }
            if let MotionConfig::Translate { direction } = anim.motion {
                if direction.length_squared() == 0.0 {
                    return invalid(format!(
                        "animation on '{}' translates along a zero direction",
                        anim.curve
                    ));
                }
            }
            for &index in &anim.points {
                if index >= len {
                    return invalid(format!(
                        "animation on '{}' drives point {} of {}",
                        anim.curve, index, len
                    ));
                }
                if !driven.insert((anim.curve.as_str(), index)) {
                    return invalid(format!(
                        "point {} of '{}' is driven by more than one animation",
                        index, anim.curve
                    ));
                }
            }
        }

        for sphere in &self.spheres {
            if sphere.radius <= 0.0 {
                log::warn!(
                    "sphere '{}' has non-positive radius {}; geometry will be degenerate",
                    sphere.name,
                    sphere.radius
                );
            }
        }

        Ok(())
    }
}
