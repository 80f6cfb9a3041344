// Narrow host interface the pipeline emits into.
//
// The core never owns a renderable object or a texture asset. It hands
// buffers to a `MeshSink` and a `TextureSink`; whatever sits behind
// them (an engine component, an image writer, a test double) stays opaque.

use std::collections::BTreeMap;

use tracing::debug;

use crate::color::PixelBuffer;
use crate::error::TerrainError;
use crate::mesh::{MeshBuffers, MeshUpdate};

// The only section the pipeline writes to.
pub const TERRAIN_SECTION: usize = 0;

// Opaque id of a texture created by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(pub u64);

pub trait MeshSink {
    fn section_count(&self) -> usize;

    // Hint that collision cooking may run off the critical path.
    // Fire and forget: nothing waits on it.
    fn set_async_cooking(&mut self, enabled: bool);

    fn create_mesh_section(
        &mut self,
        section: usize,
        mesh: &MeshBuffers,
        recalculate_collision: bool,
    ) -> Result<(), TerrainError>;

    fn update_mesh_section(&mut self, section: usize, mesh: MeshUpdate<'_>) -> Result<(), TerrainError>;
}

pub trait TextureSink {
    fn create_texture(
        &mut self,
        width: usize,
        height: usize,
        pixels: &PixelBuffer,
        name: &str,
    ) -> Result<TextureHandle, TerrainError>;

    fn set_texture_parameter(&mut self, parameter: &str, texture: TextureHandle) -> Result<(), TerrainError>;
}

// Both halves of a host.
pub trait TerrainHost: MeshSink + TextureSink {}

impl<T: MeshSink + TextureSink + ?Sized> TerrainHost for T {}

// Which path `apply_mesh` took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionChange {
    Created,
    Updated,
}

// Creates the terrain section on first use and updates it in place after.
pub fn apply_mesh<S: MeshSink + ?Sized>(
    sink: &mut S,
    mesh: &MeshBuffers,
) -> Result<SectionChange, TerrainError> {
    sink.set_async_cooking(true);
    if sink.section_count() == 0 {
        sink.create_mesh_section(TERRAIN_SECTION, mesh, true)?;
        debug!(section = TERRAIN_SECTION, "mesh section created");
        Ok(SectionChange::Created)
    } else {
        sink.update_mesh_section(TERRAIN_SECTION, mesh.update_view())?;
        debug!(section = TERRAIN_SECTION, "mesh section updated");
        Ok(SectionChange::Updated)
    }
}

// Uploads the texture and binds it to the material parameter.
pub fn publish_texture<S: TextureSink + ?Sized>(
    sink: &mut S,
    pixels: &PixelBuffer,
    name: &str,
    parameter: &str,
) -> Result<TextureHandle, TerrainError> {
    let handle = sink.create_texture(pixels.width, pixels.height, pixels, name)?;
    sink.set_texture_parameter(parameter, handle)?;
    debug!(name, parameter, ?handle, "texture published");
    Ok(handle)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredSection {
    pub mesh: MeshBuffers,
    pub collision: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredTexture {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub pixels: PixelBuffer,
}

// Host that keeps everything in memory. Useful for tests and for adapters
// that post-process the buffers themselves.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    pub sections: Vec<StoredSection>,
    pub textures: Vec<StoredTexture>,
    pub parameters: BTreeMap<String, TextureHandle>,
    pub async_cooking: bool,
    pub creates: usize,
    pub updates: usize,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&StoredTexture> {
        self.textures.get(handle.0 as usize)
    }

    // Texture currently bound to `parameter`.
    pub fn bound_texture(&self, parameter: &str) -> Option<&StoredTexture> {
        self.parameters.get(parameter).and_then(|h| self.texture(*h))
    }
}

impl MeshSink for InMemoryHost {
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn set_async_cooking(&mut self, enabled: bool) {
        self.async_cooking = enabled;
    }

    fn create_mesh_section(
        &mut self,
        section: usize,
        mesh: &MeshBuffers,
        recalculate_collision: bool,
    ) -> Result<(), TerrainError> {
        let stored = StoredSection {
            mesh: mesh.clone(),
            collision: recalculate_collision,
        };
        match section {
            s if s < self.sections.len() => self.sections[s] = stored,
            s if s == self.sections.len() => self.sections.push(stored),
            s => return Err(TerrainError::UnknownSection(s)),
        }
        self.creates += 1;
        Ok(())
    }

    fn update_mesh_section(&mut self, section: usize, mesh: MeshUpdate<'_>) -> Result<(), TerrainError> {
        let stored = self
            .sections
            .get_mut(section)
            .ok_or(TerrainError::UnknownSection(section))?;
        if stored.mesh.vertices.len() != mesh.vertices.len() {
            return Err(TerrainError::TopologyMismatch {
                section,
                expected: stored.mesh.vertices.len(),
                found: mesh.vertices.len(),
            });
        }
        stored.mesh.vertices = mesh.vertices.to_vec();
        stored.mesh.normals = mesh.normals.to_vec();
        stored.mesh.uvs = mesh.uvs.to_vec();
        stored.mesh.colors = mesh.colors.to_vec();
        stored.mesh.tangents = mesh.tangents.to_vec();
        self.updates += 1;
        Ok(())
    }
}

impl TextureSink for InMemoryHost {
    fn create_texture(
        &mut self,
        width: usize,
        height: usize,
        pixels: &PixelBuffer,
        name: &str,
    ) -> Result<TextureHandle, TerrainError> {
        if pixels.pixels.len() != width * height {
            return Err(TerrainError::Host(format!(
                "texture {name} has {} pixels, expected {}",
                pixels.pixels.len(),
                width * height
            )));
        }
        let stored = StoredTexture {
            name: name.to_string(),
            width,
            height,
            pixels: pixels.clone(),
        };
        // a texture with the same name is replaced and keeps its handle
        match self.textures.iter().position(|t| t.name == name) {
            Some(i) => {
                self.textures[i] = stored;
                Ok(TextureHandle(i as u64))
            }
            None => {
                self.textures.push(stored);
                Ok(TextureHandle(self.textures.len() as u64 - 1))
            }
        }
    }

    fn set_texture_parameter(&mut self, parameter: &str, texture: TextureHandle) -> Result<(), TerrainError> {
        if self.texture(texture).is_none() {
            return Err(TerrainError::Host(format!("unknown texture {:?}", texture)));
        }
        self.parameters.insert(parameter.to_string(), texture);
        Ok(())
    }
}
