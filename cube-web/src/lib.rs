/// Cube Web - WASM binding for browser renderers
///
/// The browser owns the scene (e.g. three.js meshes); this crate owns the cube
/// state. Feed it `KeyboardEvent.code` values or move notation and read back
/// one pose per cubelet each frame.

use cube_core::{
    decode_turn, parse_moves, CubeError, CubeState, Face, TurnCommand, CUBELET_COUNT,
};
use wasm_bindgen::prelude::*;

/// Floats per cubelet in `poses()`: position xyz, then quaternion ijkw
pub const POSE_STRIDE: usize = 7;

#[wasm_bindgen]
pub struct WebCube {
    state: CubeState,
}

#[wasm_bindgen]
impl WebCube {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebCube {
        WebCube {
            state: CubeState::default(),
        }
    }

    /// Turn for a DOM key code such as `"KeyU"`. Returns whether a layer moved.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, code: &str, shift: bool) -> bool {
        match command_for_code(code, shift) {
            Some(command) => self.turn(&command).is_ok(),
            None => false,
        }
    }

    /// Apply a move sequence like `"R U R' U'"`; returns how many moves ran
    pub fn apply(&mut self, notation: &str) -> Result<u32, JsValue> {
        self.apply_notation(notation)
            .map(|applied| applied as u32)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn reset(&mut self) {
        self.state.initialize();
    }

    /// Round poses back onto the grid. Fails, leaving the cube alone, while a
    /// layer sits between quarter turns.
    pub fn snap(&mut self) -> Result<(), JsValue> {
        self.state
            .snap()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// `POSE_STRIDE` floats per cubelet, in `CubeState` order
    pub fn poses(&self) -> Vec<f32> {
        let mut poses = Vec::with_capacity(CUBELET_COUNT * POSE_STRIDE);
        for cubelet in self.state.cubelets() {
            let position = cubelet.position;
            let rotation = cubelet.orientation.quaternion();
            poses.extend(
                [
                    position.x, position.y, position.z, rotation.i, rotation.j, rotation.k,
                    rotation.w,
                ]
                .map(|v| v as f32),
            );
        }
        poses
    }

    /// Six 0xRRGGBB colours per cubelet, in Up, Down, Front, Back, Left, Right order
    #[wasm_bindgen(js_name = faceColors)]
    pub fn face_colors(&self) -> Vec<u32> {
        self.state
            .cubelets()
            .iter()
            .flat_map(|cubelet| Face::ALL.map(|face| cubelet.color_of(face).hex()))
            .collect()
    }

    #[wasm_bindgen(getter, js_name = turnsApplied)]
    pub fn turns_applied(&self) -> f64 {
        self.state.turns_applied() as f64
    }
}

impl WebCube {
    fn turn(&mut self, command: &TurnCommand) -> Result<usize, CubeError> {
        self.state.turn(command).map_err(|e| {
            log::warn!("dropping turn: {}", e);
            CubeError::from(e)
        })
    }

    fn apply_notation(&mut self, notation: &str) -> Result<usize, CubeError> {
        let moves = parse_moves(notation)?;
        Ok(self.state.apply_all(&moves)?)
    }

    pub fn state(&self) -> &CubeState {
        &self.state
    }
}

impl Default for WebCube {
    fn default() -> Self {
        Self::new()
    }
}

/// `"KeyU"` and friends; shift reverses the turn
fn command_for_code(code: &str, shift: bool) -> Option<TurnCommand> {
    let mut letters = code.strip_prefix("Key")?.chars();
    let letter = letters.next()?.to_ascii_lowercase();
    if letters.next().is_some() {
        return None;
    }
    let key = if shift {
        letter.to_ascii_uppercase()
    } else {
        letter
    };
    decode_turn(key)
}
