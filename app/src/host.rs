use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use terrain_core::mesh::{MeshBuffers, MeshUpdate};
use terrain_core::{InMemoryHost, MeshSink, PixelBuffer, TerrainError, TextureHandle, TextureSink};

// Keeps mesh sections in memory and writes every texture as a PNG
pub struct PngHost {
    out_dir: PathBuf,
    meshes: InMemoryHost,
    files: Vec<PathBuf>,
    bindings: BTreeMap<String, TextureHandle>,
}

impl PngHost {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            meshes: InMemoryHost::new(),
            files: Vec::new(),
            bindings: BTreeMap::new(),
        }
    }

    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }
}

impl MeshSink for PngHost {
    fn section_count(&self) -> usize {
        self.meshes.section_count()
    }

    fn set_async_cooking(&mut self, enabled: bool) {
        self.meshes.set_async_cooking(enabled);
    }

    fn create_mesh_section(
        &mut self,
        section: usize,
        mesh: &MeshBuffers,
        recalculate_collision: bool,
    ) -> Result<(), TerrainError> {
        self.meshes
            .create_mesh_section(section, mesh, recalculate_collision)
    }

    fn update_mesh_section(&mut self, section: usize, mesh: MeshUpdate<'_>) -> Result<(), TerrainError> {
        self.meshes.update_mesh_section(section, mesh)
    }
}

impl TextureSink for PngHost {
    fn create_texture(
        &mut self,
        width: usize,
        height: usize,
        pixels: &PixelBuffer,
        name: &str,
    ) -> Result<TextureHandle, TerrainError> {
        // Each run of `height` pixels is one grid column, so it becomes one image row
        let image = RgbaImage::from_raw(height as u32, width as u32, pixels.as_bytes())
            .ok_or_else(|| TerrainError::Host(format!("texture {name} has the wrong pixel count")))?;
        let path = self.out_dir.join(format!("{name}.png"));
        image
            .save(&path)
            .map_err(|e| TerrainError::Host(format!("saving {}: {e}", path.display())))?;

        // rewriting the same file keeps its handle
        let index = match self.files.iter().position(|f| *f == path) {
            Some(i) => i,
            None => {
                self.files.push(path);
                self.files.len() - 1
            }
        };
        Ok(TextureHandle(index as u64))
    }

    fn set_texture_parameter(&mut self, parameter: &str, texture: TextureHandle) -> Result<(), TerrainError> {
        if texture.0 as usize >= self.files.len() {
            return Err(TerrainError::Host(format!("unknown texture {:?}", texture)));
        }
        tracing::debug!(parameter, ?texture, "material parameter bound");
        self.bindings.insert(parameter.to_string(), texture);
        Ok(())
    }
}
