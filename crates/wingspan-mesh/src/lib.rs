pub mod gpu;
pub mod sink;
pub mod triangle_mesh;

pub use gpu::{GpuVertex, LineVertex};
pub use sink::{ColoredPoint, MeshSink, Polyline, RenderBatch};
pub use triangle_mesh::TriangleMesh;
