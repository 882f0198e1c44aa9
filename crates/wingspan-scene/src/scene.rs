//! The explicit scene value driven by the frame loop.

use wingspan_core::traits::Validate;
use wingspan_core::{Result, WingspanError};
use wingspan_geometry::tessellate::{curve_to_polyline, emit_line_strip};
use wingspan_geometry::{tessellate_sphere, ControlCurve, VertexSink};
use wingspan_math::{Aabb3, Motion, Point3};

use crate::animation::AnimationPhase;
use crate::config::{MotionConfig, SceneConfig, SphereConfig};
use crate::display::DisplayOptions;

/// An oscillating motion bound to some points of one curve.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionBinding {
    curve: usize,
    points: Vec<usize>,
    motion: MotionConfig,
    amplitude: f64,
    cycles: f64,
}

impl MotionBinding {
    pub fn curve_index(&self) -> usize {
        self.curve
    }

    pub fn points(&self) -> &[usize] {
        &self.points
    }

    /// Motion for `phase`; translations move `amplitude` units along the unit direction.
    pub fn motion_at(&self, phase: AnimationPhase) -> Motion {
        let value = phase.oscillate(self.amplitude, self.cycles);
        match self.motion {
            MotionConfig::Translate { direction } => Motion::Translate {
                offset: direction.normalize() * value,
            },
            MotionConfig::Rotate { axis, pivot } => Motion::Rotate {
                axis,
                degrees: value,
                pivot,
            },
        }
    }
}

/// Curves, their animation bindings and static spheres.
#[derive(Debug, Clone)]
pub struct Scene {
    curves: Vec<ControlCurve>,
    bindings: Vec<MotionBinding>,
    spheres: Vec<SphereConfig>,
    samples_per_segment: usize,
    cycle_ms: u64,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Result<Self> {
        config.validate()?;

        let curves = config
            .curves
            .iter()
            .map(|c| {
                let curve = ControlCurve::new(c.name.clone(), c.color, c.points.iter().copied());
                match &c.windows {
                    Some(windows) => curve.with_windows(windows.clone()),
                    None => Ok(curve),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        let bindings = config
            .animations
            .iter()
            .map(|a| {
                let curve = curves
                    .iter()
                    .position(|c| c.name() == a.curve)
                    .ok_or_else(|| WingspanError::NotFound(format!("curve '{}'", a.curve)))?;
                Ok(MotionBinding {
                    curve,
                    points: a.points.clone(),
                    motion: a.motion,
                    amplitude: a.amplitude,
                    cycles: a.cycles,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "scene built: {} curves, {} windows, {} bindings, {} spheres",
            curves.len(),
            curves.iter().map(|c| c.windows().len()).sum::<usize>(),
            bindings.len(),
            config.spheres.len()
        );

        Ok(Self {
            curves,
            bindings,
            spheres: config.spheres.clone(),
            samples_per_segment: config.samples_per_segment,
            cycle_ms: config.cycle_ms,
        })
    }

    pub fn curves(&self) -> &[ControlCurve] {
        &self.curves
    }

    pub fn curve(&self, name: &str) -> Option<&ControlCurve> {
        self.curves.iter().find(|c| c.name() == name)
    }

    pub fn bindings(&self) -> &[MotionBinding] {
        &self.bindings
    }

    pub fn spheres(&self) -> &[SphereConfig] {
        &self.spheres
    }

    pub fn samples_per_segment(&self) -> usize {
        self.samples_per_segment
    }

    pub fn cycle_ms(&self) -> u64 {
        self.cycle_ms
    }

    /// Pose every curve for `phase`. Points start from rest each time, so
    /// the result depends only on `phase`.
    pub fn update(&mut self, phase: AnimationPhase) {
        for curve in &mut self.curves {
            curve.reset();
        }
        for binding in &self.bindings {
            let motion = binding.motion_at(phase);
            let curve = &mut self.curves[binding.curve];
            for &index in &binding.points {
                if let Some(point) = curve.point_mut(index) {
                    point.apply(&motion);
                }
            }
        }
        log::trace!("scene posed at phase {:.4}", phase.value());
    }

    /// Stream the curve layers enabled in `options`: control polygons, then
    /// curves, then control points.
    pub fn draw(&self, options: &DisplayOptions, sink: &mut dyn VertexSink) {
        if options.control_polygon {
            for curve in &self.curves {
                curve.draw_control_polygon(sink);
            }
        }
        if options.curves {
            for curve in &self.curves {
                match options.tolerance {
                    Some(tolerance) => {
                        sink.color(curve.color());
                        for segment in curve.segments() {
                            emit_line_strip(&curve_to_polyline(&segment, tolerance), sink);
                        }
                    }
                    None => curve.draw(self.samples_per_segment, sink),
                }
            }
        }
        if options.control_points {
            for curve in &self.curves {
                curve.draw_control_points(sink);
            }
        }
    }

    /// Stream every sphere. Done once, when the scene is set up.
    pub fn build_static(&self, sink: &mut dyn VertexSink) {
        for sphere in &self.spheres {
            log::debug!(
                "tessellating sphere '{}' (r={}, {}x{})",
                sphere.name,
                sphere.radius,
                sphere.slices,
                sphere.stacks
            );
            tessellate_sphere(sphere.radius, sphere.slices, sphere.stacks, sink);
        }
    }

    /// Box around the current pose of every control point and every sphere.
    pub fn bounds(&self) -> Option<Aabb3> {
        let points = self
            .curves
            .iter()
            .flat_map(|c| c.points().iter().map(|p| p.current()));
        let spheres = self.spheres.iter().flat_map(|s| {
            let r = s.radius.abs();
            [Point3::splat(-r), Point3::splat(r)]
        });
        Aabb3::from_points(points.chain(spheres))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnimationConfig, CurveConfig};
    use approx::assert_abs_diff_eq;
    use glam::dvec3;
    use wingspan_geometry::{StreamRecorder, Topology};
    use wingspan_math::Axis;

    fn butterfly() -> Scene {
        Scene::from_config(&SceneConfig::butterfly()).unwrap()
    }

    #[test]
    fn test_flap_moves_bound_points_only() {
        let mut scene = butterfly();
        scene.update(AnimationPhase::new(0.125));
        let body = scene.curve("body").unwrap();
        assert_abs_diff_eq!(body.points()[0].current().z, 0.55, epsilon = 1e-12);
        assert_abs_diff_eq!(body.points()[5].current().z, 0.55, epsilon = 1e-12);
        assert_eq!(body.points()[1].current(), body.points()[1].rest());

        let wing = scene.curve("wing1").unwrap();
        assert_abs_diff_eq!(wing.points()[3].current().z, 0.95, epsilon = 1e-12);
        assert_eq!(wing.points()[5].current(), wing.points()[5].rest());
    }

    #[test]
    fn test_update_is_not_cumulative() {
        let mut scene = butterfly();
        scene.update(AnimationPhase::new(0.3));
        scene.update(AnimationPhase::new(0.3));
        let twice = scene.curve("innerwing2").unwrap().points()[2].current();

        let mut fresh = butterfly();
        fresh.update(AnimationPhase::new(0.3));
        assert_eq!(fresh.curve("innerwing2").unwrap().points()[2].current(), twice);

        scene.update(AnimationPhase::ZERO);
        for curve in scene.curves() {
            for p in curve.points() {
                assert_abs_diff_eq!(p.current(), p.rest(), epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_rotation_binding() {
        let config = SceneConfig {
            curves: vec![CurveConfig {
                name: "square".into(),
                color: [1.0, 1.0, 1.0],
                points: vec![dvec3(1.0, 0.0, 0.0), dvec3(0.0, 1.0, 0.0), dvec3(-1.0, 0.0, 0.0), dvec3(0.0, -1.0, 0.0)],
                windows: None,
            }],
            animations: vec![AnimationConfig {
                curve: "square".into(),
                points: vec![0],
                motion: MotionConfig::Rotate { axis: Axis::Z, pivot: Point3::ZERO },
                amplitude: -90.0,
                cycles: 1.0,
            }],
            ..SceneConfig::default()
        };
        let mut scene = Scene::from_config(&config).unwrap();
        // -(-90) * sin(PI/2) = 90 degrees
        scene.update(AnimationPhase::new(0.25));
        let p = scene.curves()[0].points()[0].current();
        assert_abs_diff_eq!(p, dvec3(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_draw_layers() {
        let scene = butterfly();
        let mut recorder = StreamRecorder::new();
        scene.draw(&DisplayOptions::default(), &mut recorder);

        let groups = recorder.groups();
        let count = |topology: Topology| groups.iter().filter(|g| g.topology == topology).count();
        assert_eq!(count(Topology::LineStrip), 22 + 22);
        assert_eq!(count(Topology::Points), 7);

        // Polygons come first and have four vertices; curves have samples + 1.
        assert!(groups[..22].iter().all(|g| g.vertices.len() == 4));
        assert!(groups[22..44].iter().all(|g| g.vertices.len() == 21));
        assert_eq!(groups[22].color, Some([0.0, 0.0, 1.0]));
        assert_eq!(groups[44].color, Some([1.0, 1.0, 1.0]));
    }

    #[test]
    fn test_draw_curves_only_adaptive() {
        let scene = butterfly();
        let mut recorder = StreamRecorder::new();
        scene.draw(&DisplayOptions::curves_only().with_tolerance(1e-3), &mut recorder);
        assert_eq!(recorder.groups().len(), 22);
        assert!(recorder.groups().iter().all(|g| g.vertices.len() >= 3));
    }

    #[test]
    fn test_build_static_streams_spheres() {
        let scene = Scene::from_config(&SceneConfig::globe()).unwrap();
        let mut recorder = StreamRecorder::new();
        scene.draw(&DisplayOptions::default(), &mut recorder);
        assert!(recorder.groups().is_empty());

        scene.build_static(&mut recorder);
        assert_eq!(recorder.groups().len(), 41);
        assert!(recorder.groups().iter().all(|g| g.topology == Topology::TriangleStrip));
    }

    #[test]
    fn test_bounds() {
        let globe = Scene::from_config(&SceneConfig::globe()).unwrap();
        let bounds = globe.bounds().unwrap();
        assert_eq!(bounds.min, Point3::splat(-1.5));
        assert_eq!(bounds.max, Point3::splat(1.5));

        assert!(Scene::from_config(&SceneConfig::default()).unwrap().bounds().is_none());

        let b = butterfly().bounds().unwrap();
        assert_abs_diff_eq!(b.min, dvec3(-1.2, 0.2, 0.8), epsilon = 1e-12);
        assert_abs_diff_eq!(b.max, dvec3(1.2, 2.0, 1.2), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SceneConfig::butterfly();
        config.animations[0].curve = "tail".into();
        assert!(matches!(
            Scene::from_config(&config),
            Err(WingspanError::InvalidScene(_))
        ));
    }
}
