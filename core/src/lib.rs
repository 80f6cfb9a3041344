// core holds the noise field, color mapping, mesh building and host sinks
pub mod color;
pub mod error;
pub mod mesh;
pub mod noise_field;
pub mod params;
pub mod perlin2;
pub mod pipeline;
pub mod simplex2;
pub mod sink;
pub mod utils;

pub use color::{PixelBuffer, to_channel_pixel_buffer, to_pixel_buffer, to_vertex_color_ramp};
pub use error::TerrainError;
pub use mesh::{MeshBuffers, MeshUpdate, build_mesh};
pub use noise_field::{Channel, NoiseGrid, NoiseSample, generate};
pub use params::{MeshParameters, NoiseBasis, NoiseParameters, NormalMode, TerrainConfig};
pub use perlin2::Perlin2D;
pub use pipeline::{Construction, construct};
pub use simplex2::Simplex2D;
pub use sink::{
    InMemoryHost, MeshSink, SectionChange, TerrainHost, TextureHandle, TextureSink, apply_mesh,
    publish_texture,
};

// Stateless coherent noise sampled at 2D points
// The same (x, y) must always return the same value.
pub trait NoiseGenerator {
    // Sample 2D noise at (x, y), roughly in [-1, 1].
    fn get2(&self, x: f64, y: f64) -> f64;
}
