// Value a channel takes everywhere when its whole-grid range is empty
pub const DEGENERATE_CHANNEL_VALUE: f32 = 0.0;

// Running min/max of one channel across a grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ChannelRange {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl ChannelRange {
    pub fn observe(&mut self, v: f64) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
    }

    // True when every observed value was the same
    pub fn is_degenerate(&self) -> bool {
        (self.max - self.min).abs() < f64::EPSILON
    }

    // Linear remap into [0, 1]
    pub fn remap(&self, v: f64) -> f32 {
        if self.is_degenerate() {
            return DEGENERATE_CHANNEL_VALUE;
        }
        ((v - self.min) / (self.max - self.min)) as f32
    }
}

// Track each channel on its own so they never share a range
pub fn channel_ranges(values: &[[f64; 3]]) -> [ChannelRange; 3] {
    let mut ranges = [ChannelRange::default(); 3];
    for v in values {
        for (range, &c) in ranges.iter_mut().zip(v) {
            range.observe(c);
        }
    }
    ranges
}

// Normalize every channel of every cell into [0, 1] with its own range
pub fn normalize_channels(values: &[[f64; 3]], ranges: &[ChannelRange; 3]) -> Vec<[f32; 3]> {
    values
        .iter()
        .map(|v| {
            [
                ranges[0].remap(v[0]),
                ranges[1].remap(v[1]),
                ranges[2].remap(v[2]),
            ]
        })
        .collect()
}
