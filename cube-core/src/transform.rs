/// Model matrices for cubelets and the orbiting view
use nalgebra::{Matrix4, Vector3};

use crate::cube::Cubelet;

/// Keeps the view from flipping over the poles
const MAX_PITCH: f32 = 1.48;

/// Orbit view around the cube (in radians).
///
/// View state only. Cubelet orientation is tracked by quaternions in
/// `Cubelet`, never by angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitState {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dyaw: f32, dpitch: f32) {
        self.yaw = (self.yaw + dyaw) % std::f32::consts::TAU;
        self.pitch = (self.pitch + dpitch).clamp(-MAX_PITCH, MAX_PITCH);
    }
}

impl Default for OrbitState {
    /// Up, Front and Right faces in view
    fn default() -> Self {
        Self::new(-3.0 * std::f32::consts::FRAC_PI_4, 0.5)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation applied to the whole cube for the orbit view: yaw, then pitch
    pub fn orbit_matrix(orbit: &OrbitState) -> Matrix4<f32> {
        let pitch = Matrix4::new_rotation(Vector3::new(orbit.pitch, 0.0, 0.0));
        let yaw = Matrix4::new_rotation(Vector3::new(0.0, orbit.yaw, 0.0));
        pitch * yaw
    }

    /// Place a cubelet mesh at the cubelet's current pose
    pub fn pose_matrix(cubelet: &Cubelet) -> Matrix4<f32> {
        let translation = Matrix4::new_translation(&cubelet.position.coords);
        (translation * cubelet.orientation.to_homogeneous()).cast()
    }

    /// Full model matrix of one cubelet under the orbit view
    pub fn model_matrix(orbit: &OrbitState, cubelet: &Cubelet) -> Matrix4<f32> {
        Self::orbit_matrix(orbit) * Self::pose_matrix(cubelet)
    }
}
