/// Layer selection and turn application
use std::fmt;

use log::{debug, warn};
use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::cube::CubeState;
use crate::error::{TurnError, TurnResult};

/// Cubelets in one layer of a 3x3x3 cube
pub const LAYER_SIZE: usize = 9;

const AXIS_EPSILON: f64 = 1e-9;

/// One of the three world basis axes a layer can turn about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Component index of this axis in a point or vector
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit_vector(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    /// Accepts only the positive X, Y and Z unit vectors
    pub fn from_vector(vector: &Vector3<f64>) -> TurnResult<Self> {
        Self::ALL
            .into_iter()
            .find(|axis| (vector - axis.unit_vector().into_inner()).amax() < AXIS_EPSILON)
            .ok_or(TurnError::InvalidAxis {
                axis: [vector.x, vector.y, vector.z],
            })
    }
}

impl TryFrom<&Vector3<f64>> for Axis {
    type Error = TurnError;

    fn try_from(vector: &Vector3<f64>) -> TurnResult<Self> {
        Self::from_vector(vector)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

/// A request to turn one layer: which axis, which slice along it, how far
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnCommand {
    pub axis: Axis,
    /// -1, 0 or 1
    pub layer: i8,
    /// Signed angle in radians, right-handed about `axis`
    pub angle: f64,
}

impl TurnCommand {
    pub fn new(axis: Axis, layer: i8, angle: f64) -> Self {
        Self { axis, layer, angle }
    }

    /// The same layer turned back the other way
    pub fn inverse(self) -> Self {
        Self {
            angle: -self.angle,
            ..self
        }
    }

    /// The same layer turned `times` as far (negative reverses it)
    pub fn repeated(self, times: i32) -> Self {
        Self {
            angle: self.angle * f64::from(times),
            ..self
        }
    }

    pub fn rotation(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&self.axis.unit_vector(), self.angle)
    }
}

/// Turns layers of a `CubeState`. Holds no state of its own.
pub struct LayerRotationEngine;

impl LayerRotationEngine {
    /// Indices of the cubelets whose live position lies in `layer` along `axis`
    pub fn select_layer(state: &CubeState, axis: Axis, layer: i8) -> Vec<usize> {
        let config = state.config();
        let target = f64::from(layer) * config.spacing();
        let tolerance = config.layer_tolerance();

        state
            .cubelets()
            .iter()
            .enumerate()
            .filter(|(_, cubelet)| (cubelet.position[axis.index()] - target).abs() < tolerance)
            .map(|(index, _)| index)
            .collect()
    }

    /// Rotate one layer by `angle` about a basis `axis` vector.
    ///
    /// Returns the number of cubelets moved, which is always 9.
    pub fn rotate_layer(
        state: &mut CubeState,
        axis: &Vector3<f64>,
        layer: i8,
        angle: f64,
    ) -> TurnResult<usize> {
        let axis = Axis::from_vector(axis).map_err(|err| {
            warn!("rejected turn: {}", err);
            err
        })?;
        Self::apply(state, &TurnCommand::new(axis, layer, angle))
    }

    /// Same as [`rotate_layer`](Self::rotate_layer) with an already validated axis
    pub fn apply(state: &mut CubeState, command: &TurnCommand) -> TurnResult<usize> {
        if !command.angle.is_finite() {
            let err = TurnError::InvalidAngle {
                angle: command.angle,
            };
            warn!("rejected turn: {}", err);
            return Err(err);
        }

        let selected = Self::select_layer(state, command.axis, command.layer);
        if selected.len() != LAYER_SIZE {
            let err = TurnError::LayerSelection {
                axis: command.axis,
                layer: command.layer,
                selected: selected.len(),
                expected: LAYER_SIZE,
            };
            warn!("rejected turn: {}", err);
            return Err(err);
        }

        let rotation = command.rotation();
        let cubelets = state.cubelets_mut();
        for &index in &selected {
            let cubelet = &mut cubelets[index];
            cubelet.position = rotation * cubelet.position;
            cubelet.orientation = rotation * cubelet.orientation;
        }

        debug!(
            "turned layer {} along {} by {:.4} rad",
            command.layer, command.axis, command.angle
        );
        Ok(selected.len())
    }
}
