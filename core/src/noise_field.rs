// Multi-octave noise field: a grid of three independently normalized
// channels sampled from one stateless coherent-noise lattice.

use tracing::{debug, warn};

use crate::error::TerrainError;
use crate::params::{NoiseBasis, NoiseParameters};
use crate::perlin2::Perlin2D;
use crate::simplex2::Simplex2D;
use crate::utils::{channel_ranges, normalize_channels};
use crate::NoiseGenerator;

// Shift applied to both coordinates for the alternate lookup.
pub const ALTERNATE_SHIFT: f64 = 1.0;

// One of the three derived quantities stored per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    // Mostly the absolute value of the primary lookup. Drives height and color.
    Magnitude,
    // Mostly the signed primary lookup.
    Signed,
    // Absolute value of the shifted lookup, lightly mixed with the primary.
    Alternate,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Magnitude, Channel::Signed, Channel::Alternate];
}

// Three parallel noise channels of one grid cell, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NoiseSample {
    pub magnitude: f32,
    pub signed: f32,
    pub alternate: f32,
}

impl NoiseSample {
    pub fn channel(&self, channel: Channel) -> f32 {
        match channel {
            Channel::Magnitude => self.magnitude,
            Channel::Signed => self.signed,
            Channel::Alternate => self.alternate,
        }
    }
}

impl From<[f32; 3]> for NoiseSample {
    fn from(v: [f32; 3]) -> Self {
        Self {
            magnitude: v[0],
            signed: v[1],
            alternate: v[2],
        }
    }
}

// `width × height` samples stored column by column: flat index
// `x * height + y`. Pixel and vertex buffers use the same order.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseGrid {
    width: usize,
    height: usize,
    samples: Vec<NoiseSample>,
}

impl NoiseGrid {
    // Wraps already-normalized samples. `samples.len()` must be
    // `width * height`.
    pub fn from_samples(
        width: usize,
        height: usize,
        samples: Vec<NoiseSample>,
    ) -> Result<Self, TerrainError> {
        if width == 0 || height == 0 || samples.len() != width * height {
            return Err(TerrainError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    // Grid with the same sample in every cell.
    pub fn filled(width: usize, height: usize, sample: NoiseSample) -> Result<Self, TerrainError> {
        Self::from_samples(width, height, vec![sample; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    pub fn get(&self, x: usize, y: usize) -> NoiseSample {
        self.samples[self.index(x, y)]
    }

    pub fn samples(&self) -> &[NoiseSample] {
        &self.samples
    }

    // Values of one channel in traversal order.
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().map(move |s| s.channel(channel))
    }
}

// Blend the two lookups into the three channels
#[inline]
fn blend(primary: f64, alternate: f64) -> [f64; 3] {
    [
        primary.abs() * 0.8 + primary * 0.2,
        primary.abs() * 0.2 + primary * 0.8,
        alternate.abs() * 0.8 + primary * 0.2,
    ]
}

fn basis_generator(basis: NoiseBasis) -> Box<dyn NoiseGenerator> {
    match basis {
        NoiseBasis::Perlin => Box::new(Perlin2D::default()),
        NoiseBasis::Simplex => Box::new(Simplex2D::default()),
    }
}

// Accumulates every octave of one cell, before normalization.
pub fn sample_cell(
    noise: &dyn NoiseGenerator,
    params: &NoiseParameters,
    x: usize,
    y: usize,
) -> [f64; 3] {
    let scale = params.effective_scale() as f64;
    let seed_shift = (params.seed % i32::MAX) as f64;
    let origin_x = x as f64 + params.offset[0] as f64 * params.width as f64;
    let origin_y = y as f64 + params.offset[1] as f64 * params.height as f64;

    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut total = [0.0f64; 3];

    for _ in 0..params.octaves {
        let sx = origin_x / (scale * frequency) + seed_shift;
        let sy = origin_y / (scale * frequency) + seed_shift;

        let primary = noise.get2(sx, sy);
        let alternate = noise.get2(sx + ALTERNATE_SHIFT, sy + ALTERNATE_SHIFT);

        for (acc, v) in total.iter_mut().zip(blend(primary, alternate)) {
            *acc += amplitude * v;
        }

        amplitude *= params.persistence as f64;
        frequency *= params.lacunarity as f64;
    }
    total
}

// Builds a normalized noise grid. Deterministic for equal parameters.
pub fn generate(params: &NoiseParameters) -> Result<NoiseGrid, TerrainError> {
    params.validate()?;
    if params.effective_scale() != params.scale {
        warn!(scale = params.scale, "non-positive noise scale clamped");
    }

    let noise = basis_generator(params.basis);
    let (width, height) = (params.width, params.height);

    let mut raw = Vec::with_capacity(width * height);
    for x in 0..width {
        for y in 0..height {
            raw.push(sample_cell(noise.as_ref(), params, x, y));
        }
    }

    // amplitude can still overflow over many octaves with a large persistence
    if raw.iter().flatten().any(|v| !v.is_finite()) {
        return Err(TerrainError::InvalidParameter {
            name: "persistence",
            value: params.persistence,
        });
    }
    let ranges = channel_ranges(&raw);
    for (channel, range) in Channel::ALL.iter().zip(&ranges) {
        if range.is_degenerate() {
            warn!(?channel, value = range.min, "channel range is empty, using fallback value");
        }
    }
    debug!(width, height, ?ranges, "noise field accumulated");

    let samples = normalize_channels(&raw, &ranges)
        .into_iter()
        .map(NoiseSample::from)
        .collect();

    Ok(NoiseGrid {
        width,
        height,
        samples,
    })
}
