/// Error types for turning layers and parsing moves
use thiserror::Error;

use crate::engine::Axis;

/// Why a turn was refused. The cube is left untouched in every case.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TurnError {
    #[error("axis {axis:?} is not one of the X, Y or Z basis vectors")]
    InvalidAxis { axis: [f64; 3] },
    #[error("turn angle {angle} is not finite")]
    InvalidAngle { angle: f64 },
    #[error("layer {layer} along {axis} selected {selected} cubelets instead of {expected}")]
    LayerSelection {
        axis: Axis,
        layer: i8,
        selected: usize,
        expected: usize,
    },
}

/// Unparseable move notation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected {fragment:?} at offset {offset} in move sequence")]
pub struct NotationError {
    pub offset: usize,
    pub fragment: String,
}

/// Why `CubeState::snap` left the cube as it was
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapError {
    #[error("cubelet {grid_coordinate:?} is too far from an axis-aligned orientation to snap")]
    NotAxisAligned { grid_coordinate: [i8; 3] },
    #[error("cubelet {grid_coordinate:?} is too far from the slot its orientation implies")]
    Displaced { grid_coordinate: [i8; 3] },
}

/// Any failure a front end can hit while driving the cube
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CubeError {
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Snap(#[from] SnapError),
}

pub type TurnResult<T> = Result<T, TurnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TurnError::LayerSelection {
            axis: Axis::Y,
            layer: 1,
            selected: 8,
            expected: 9,
        };
        assert_eq!(
            err.to_string(),
            "layer 1 along Y selected 8 cubelets instead of 9"
        );

        let err = NotationError {
            offset: 3,
            fragment: "Q".to_string(),
        };
        assert_eq!(
            CubeError::from(err).to_string(),
            "unexpected \"Q\" at offset 3 in move sequence"
        );

        let err = TurnError::InvalidAngle { angle: f64::NAN };
        assert_eq!(err.to_string(), "turn angle NaN is not finite");
    }
}
