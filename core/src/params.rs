// Configuration records for a generation pass.
//
// Every field has a default, so a partial JSON document deserializes into a
// complete record.

use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

// Smallest usable noise scale. Non-positive scales are clamped to this.
pub const MIN_SCALE: f32 = 0.001;

// Which coherent-noise lattice the field generator samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoiseBasis {
    #[default]
    Perlin,
    Simplex,
}

// Inputs of the noise field generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParameters {
    pub seed: i32,
    pub width: usize,
    pub height: usize,
    // Divides sample coordinates. Clamped to `MIN_SCALE` when not positive.
    pub scale: f32,
    pub octaves: u32,
    // Amplitude multiplier applied after each octave.
    pub persistence: f32,
    // Frequency multiplier applied after each octave.
    pub lacunarity: f32,
    // Offset in units of whole grids.
    pub offset: [f32; 2],
    pub basis: NoiseBasis,
}

impl Default for NoiseParameters {
    fn default() -> Self {
        Self {
            seed: 1,
            width: 256,
            height: 256,
            scale: 100.0,
            octaves: 10,
            persistence: 0.3,
            lacunarity: 0.3,
            offset: [0.0, 0.0],
            basis: NoiseBasis::Perlin,
        }
    }
}

impl NoiseParameters {
    // Square grid of `size` cells per side with default noise settings.
    pub fn square(seed: i32, size: usize) -> Self {
        Self {
            seed,
            width: size,
            height: size,
            ..Self::default()
        }
    }

    // Rejects configurations that cannot produce a grid.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidOctaves);
        }
        // frequency must stay positive for every octave
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(TerrainError::InvalidParameter {
                name: "lacunarity",
                value: self.lacunarity,
            });
        }
        let finite = [
            ("persistence", self.persistence),
            ("offset.x", self.offset[0]),
            ("offset.y", self.offset[1]),
        ];
        if let Some(&(name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TerrainError::InvalidParameter { name, value });
        }
        Ok(())
    }

    // Scale actually used for sampling.
    pub fn effective_scale(&self) -> f32 {
        // also catches NaN
        if self.scale > 0.0 { self.scale } else { MIN_SCALE }
    }
}

// How the mesh builder fills the normal and tangent buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    // Three fixed entries, normal (1, 0, 0) and tangent (0, 1, 0),
    // whatever the vertex count.
    #[default]
    Placeholder,
    // One normal and tangent per vertex from the surface slope.
    PerVertex,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshParameters {
    pub height_factor: f32,
    // Uniform post-scale over the whole vertex, height included.
    pub width_factor: f32,
    pub normals: NormalMode,
}

impl Default for MeshParameters {
    fn default() -> Self {
        Self {
            height_factor: 25.0,
            width_factor: 100.0,
            normals: NormalMode::Placeholder,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureSettings {
    pub name: String,
    // Material parameter the texture is bound to.
    pub material_parameter: String,
}

impl Default for TextureSettings {
    fn default() -> Self {
        Self {
            name: "NoiseTexture".to_string(),
            material_parameter: "NoiseTexture".to_string(),
        }
    }
}

// Everything one construct pass needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub noise: NoiseParameters,
    pub mesh: MeshParameters,
    pub texture: TextureSettings,
}
