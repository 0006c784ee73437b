//! Error types for cloth operations.

use core::fmt;

/// Errors reported for API misuse.
///
/// Numerical degeneracies (zero velocity, zero-length springs, vanishing error
/// estimates) are corrected inside the simulation and never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum ClothError {
    /// Grid width and height must both be at least 1.
    InvalidGridDimensions { width: usize, height: usize },
    /// Grid coordinate lies outside the cloth.
    ParticleOutOfBounds { x: usize, y: usize, width: usize, height: usize },
    /// Integrator index does not name a known integrator.
    UnknownIntegrator { index: usize },
}

impl fmt::Display for ClothError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClothError::InvalidGridDimensions { width, height } => {
                write!(f, "grid must be at least 1x1 (got {}x{})", width, height)
            }
            ClothError::ParticleOutOfBounds { x, y, width, height } => {
                write!(f, "particle ({}, {}) out of bounds (grid: {}x{})", x, y, width, height)
            }
            ClothError::UnknownIntegrator { index } => {
                write!(f, "unknown integrator index {}", index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_coordinates() {
        let err = ClothError::ParticleOutOfBounds { x: 4, y: 1, width: 4, height: 4 };
        assert_eq!(err.to_string(), "particle (4, 1) out of bounds (grid: 4x4)");
    }
}
