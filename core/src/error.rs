use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid grid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("octave count must be positive")]
    InvalidOctaves,

    #[error("noise parameter {name} is out of range: {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("mesh section {0} does not exist")]
    UnknownSection(usize),

    #[error("mesh section {section} topology changed: expected {expected} vertices, got {found}")]
    TopologyMismatch {
        section: usize,
        expected: usize,
        found: usize,
    },

    #[error("host error: {0}")]
    Host(String),
}
