// Headless host for the terrain pipeline.
//
// Usage: terrain_app [config.json] [out_dir]
// The noise texture is written as `<texture name>.png` and a three-channel
// preview as `<texture name>_channels.png`. Mesh sections stay in memory.

mod host;

use std::path::PathBuf;

use anyhow::Context;
use terrain_core::{TerrainConfig, TextureSink, construct, to_channel_pixel_buffer};
use tracing_subscriber::EnvFilter;

use crate::host::PngHost;

fn load_config(path: Option<&str>) -> anyhow::Result<TerrainConfig> {
    let Some(path) = path else {
        tracing::info!("No config given, using defaults");
        return Ok(TerrainConfig::default());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = load_config(args.next().as_deref())?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut host = PngHost::new(out_dir);
    let built = construct(&config, &mut host).context("terrain construction failed")?;

    let preview = to_channel_pixel_buffer(&built.grid);
    let preview_name = format!("{}_channels", config.texture.name);
    host.create_texture(preview.width, preview.height, &preview, &preview_name)
        .context("writing channel preview")?;

    tracing::info!("Terrain ready");
    tracing::info!("  Grid: {}x{}", built.grid.width(), built.grid.height());
    tracing::info!("  Vertices: {}", built.mesh.vertices.len());
    tracing::info!("  Triangles: {}", built.mesh.triangle_count());
    for path in host.written() {
        tracing::info!("  Wrote {}", path.display());
    }

    Ok(())
}
