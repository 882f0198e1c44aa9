//! Wingspan geometry: control curves, parametric surfaces, and the vertex
//! streams generated from them.

pub mod curve;
pub mod sink;
pub mod sphere;
pub mod surface;
pub mod tessellate;

pub use curve::{evaluate_curve, CatmullRomSegment, ControlCurve, Curve, DEFAULT_SAMPLES};
pub use sink::{RecordedGroup, RecordedVertex, StreamRecorder, Topology, VertexSink};
pub use sphere::{tessellate_sphere, SphereGrid, SurfacePoint};
pub use surface::{SphericalSurface, Surface};
