use std::time::Instant;

use tracing::info;

use crate::color::{PixelBuffer, to_pixel_buffer};
use crate::error::TerrainError;
use crate::mesh::{MeshBuffers, build_mesh};
use crate::noise_field::{NoiseGrid, generate};
use crate::params::TerrainConfig;
use crate::sink::{SectionChange, TerrainHost, TextureHandle, apply_mesh, publish_texture};

// Everything one construct pass produced
#[derive(Debug, Clone)]
pub struct Construction {
    pub grid: NoiseGrid,
    pub mesh: MeshBuffers,
    pub pixels: PixelBuffer,
    pub texture: TextureHandle,
    pub section: SectionChange,
}

// Runs the whole pipeline from scratch and pushes the results into `host`.
// Nothing is cached between calls; callers serialize triggers.
pub fn construct<H: TerrainHost + ?Sized>(
    config: &TerrainConfig,
    host: &mut H,
) -> Result<Construction, TerrainError> {
    let start = Instant::now();

    let grid = generate(&config.noise)?;
    let mesh = build_mesh(&grid, &config.mesh);
    let section = apply_mesh(host, &mesh)?;

    let pixels = to_pixel_buffer(&grid);
    let texture = publish_texture(
        host,
        &pixels,
        &config.texture.name,
        &config.texture.material_parameter,
    )?;

    info!(
        width = grid.width(),
        height = grid.height(),
        seed = config.noise.seed,
        triangles = mesh.triangle_count(),
        ?section,
        elapsed_ms = start.elapsed().as_secs_f32() * 1000.0,
        "terrain constructed"
    );

    Ok(Construction {
        grid,
        mesh,
        pixels,
        texture,
        section,
    })
}
