use palette::encoding::{Linear, Srgb as SrgbStandard};
use palette::{FromColor, Hsv, LinSrgb, LinSrgba, Mix, Srgb};

use crate::noise_field::{Channel, NoiseGrid};

// HSV over linear sRGB primaries
type LinHsv = Hsv<Linear<SrgbStandard>, f32>;

// RGBA8 pixels in grid traversal order (outer x, inner y).
// Each run of `height` pixels is one grid column, so the texture's rows
// follow x and its columns follow y, matching the mesh UVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 4]>,
}

impl PixelBuffer {
    // Flat RGBA bytes, e.g. for an image encoder
    pub fn as_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }
}

// Black→white interpolated in HSV over linear color, `t` in [0, 1]
pub fn ramp_color(t: f32) -> LinSrgb {
    let black = LinHsv::from_color(LinSrgb::new(0.0, 0.0, 0.0));
    let white = LinHsv::from_color(LinSrgb::new(1.0, 1.0, 1.0));
    LinSrgb::from_color(black.mix(&white, t.clamp(0.0, 1.0)))
}

// Linear color → sRGB-encoded 8-bit, opaque
fn encode_pixel(color: LinSrgb) -> [u8; 4] {
    let srgb: Srgb<u8> = Srgb::from_linear(color).into_format();
    [srgb.red, srgb.green, srgb.blue, 255]
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// Height-visualization texture from the magnitude channel
pub fn to_pixel_buffer(grid: &NoiseGrid) -> PixelBuffer {
    let pixels = grid
        .channel(Channel::Magnitude)
        .map(|t| encode_pixel(ramp_color(t)))
        .collect();
    PixelBuffer {
        width: grid.width(),
        height: grid.height(),
        pixels,
    }
}

// Per-vertex grayscale ramp, same interpolation as `to_pixel_buffer` but kept linear
pub fn to_vertex_color_ramp(grid: &NoiseGrid) -> Vec<LinSrgba> {
    grid.channel(Channel::Magnitude)
        .map(|t| {
            let c = ramp_color(t);
            LinSrgba::new(c.red, c.green, c.blue, 1.0)
        })
        .collect()
}

// All three channels packed as R, G, B without gamma, for inspecting the
// secondary channels
pub fn to_channel_pixel_buffer(grid: &NoiseGrid) -> PixelBuffer {
    let pixels = grid
        .samples()
        .iter()
        .map(|s| {
            [
                quantize(s.magnitude),
                quantize(s.signed),
                quantize(s.alternate),
                255,
            ]
        })
        .collect();
    PixelBuffer {
        width: grid.width(),
        height: grid.height(),
        pixels,
    }
}
