/// Cubelets, their sticker colours, and the cube state that owns them
use log::{debug, warn};
use nalgebra::{Matrix3, Point3, Rotation3, UnitQuaternion, Vector3};

use crate::config::CubeConfig;
use crate::engine::{LayerRotationEngine, TurnCommand};
use crate::error::{SnapError, TurnResult};

/// A 3x3x3 cube always holds this many cubelets
pub const CUBELET_COUNT: usize = 27;

const SOLVED_EPSILON: f64 = 1e-6;

/// `turn` only re-snaps while drift looks like float noise
const AUTO_SNAP_MAX_DRIFT: f64 = 1e-3;

/// The six faces of a cubelet, named after the cube face they show when solved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        match self {
            Face::Up => 0,
            Face::Down => 1,
            Face::Front => 2,
            Face::Back => 3,
            Face::Left => 4,
            Face::Right => 5,
        }
    }

    /// Outward unit normal in the cubelet's local frame.
    ///
    /// Front points down -Z so that the Front turn (z = -1 layer) carries the
    /// Front stickers.
    pub fn normal(self) -> Vector3<f64> {
        match self {
            Face::Up => Vector3::new(0.0, 1.0, 0.0),
            Face::Down => Vector3::new(0.0, -1.0, 0.0),
            Face::Front => Vector3::new(0.0, 0.0, -1.0),
            Face::Back => Vector3::new(0.0, 0.0, 1.0),
            Face::Left => Vector3::new(-1.0, 0.0, 0.0),
            Face::Right => Vector3::new(1.0, 0.0, 0.0),
        }
    }

    pub fn opposite(self) -> Face {
        match self {
            Face::Up => Face::Down,
            Face::Down => Face::Up,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    /// The face whose normal points closest to `direction`
    pub fn from_normal(direction: &Vector3<f64>) -> Face {
        Self::ALL.into_iter().fold(Face::Up, |best, face| {
            if face.normal().dot(direction) > best.normal().dot(direction) {
                face
            } else {
                best
            }
        })
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }
}

/// Sticker colours of the standard scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceColor {
    White,
    Yellow,
    Red,
    Blue,
    Orange,
    Green,
}

impl FaceColor {
    /// Colour printed on `face` of a solved cube
    pub fn for_face(face: Face) -> Self {
        match face {
            Face::Up => FaceColor::White,
            Face::Down => FaceColor::Yellow,
            Face::Front => FaceColor::Red,
            Face::Back => FaceColor::Blue,
            Face::Left => FaceColor::Orange,
            Face::Right => FaceColor::Green,
        }
    }

    /// 0xRRGGBB
    pub fn hex(self) -> u32 {
        match self {
            FaceColor::White => 0xffffff,
            FaceColor::Yellow => 0xffff00,
            FaceColor::Red => 0xff0000,
            FaceColor::Blue => 0x0000ff,
            FaceColor::Orange => 0xffa500,
            FaceColor::Green => 0x00ff00,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = self.hex();
        ((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

/// Colour of each local face of one cubelet. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceColors([FaceColor; 6]);

impl FaceColors {
    pub fn standard() -> Self {
        Self(Face::ALL.map(FaceColor::for_face))
    }

    pub fn get(&self, face: Face) -> FaceColor {
        self.0[face.index()]
    }

    /// Colours in `Face::ALL` order
    pub fn as_array(&self) -> [FaceColor; 6] {
        self.0
    }
}

impl Default for FaceColors {
    fn default() -> Self {
        Self::standard()
    }
}

/// One of the 27 sub-cubes
#[derive(Debug, Clone, PartialEq)]
pub struct Cubelet {
    grid_coordinate: [i8; 3],
    /// Live centre, rotated about the origin by every turn that moves it
    pub position: Point3<f64>,
    /// Accumulated rotation relative to the solved pose
    pub orientation: UnitQuaternion<f64>,
    face_colors: FaceColors,
}

impl Cubelet {
    pub fn new(grid_coordinate: [i8; 3], spacing: f64, face_colors: FaceColors) -> Self {
        Self {
            grid_coordinate,
            position: home_position(grid_coordinate, spacing),
            orientation: UnitQuaternion::identity(),
            face_colors,
        }
    }

    /// The solved-state slot this cubelet was created in. Never changes.
    pub fn grid_coordinate(&self) -> [i8; 3] {
        self.grid_coordinate
    }

    pub fn face_colors(&self) -> &FaceColors {
        &self.face_colors
    }

    pub fn color_of(&self, face: Face) -> FaceColor {
        self.face_colors.get(face)
    }

    /// Which local face currently points along `world_direction`
    pub fn facing(&self, world_direction: &Vector3<f64>) -> Face {
        Face::from_normal(&(self.orientation.inverse() * world_direction))
    }

    /// Colour currently showing towards `world_direction`
    pub fn color_facing(&self, world_direction: &Vector3<f64>) -> FaceColor {
        self.color_of(self.facing(world_direction))
    }
}

fn home_position(grid_coordinate: [i8; 3], spacing: f64) -> Point3<f64> {
    let [x, y, z] = grid_coordinate.map(|c| f64::from(c) * spacing);
    Point3::new(x, y, z)
}

/// The 27 cubelets of the puzzle. Single source of truth for cube geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeState {
    config: CubeConfig,
    cubelets: Vec<Cubelet>,
    turns_applied: u64,
}

impl CubeState {
    pub fn new(config: CubeConfig) -> Self {
        let mut state = Self {
            config,
            cubelets: Vec::with_capacity(CUBELET_COUNT),
            turns_applied: 0,
        };
        state.initialize();
        state
    }

    /// Put all 27 cubelets back at their solved poses.
    ///
    /// Existing cubelets are discarded first, so calling this again resets
    /// the cube rather than adding cubelets.
    pub fn initialize(&mut self) {
        let spacing = self.config.spacing();
        let colors = FaceColors::standard();

        self.cubelets.clear();
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    self.cubelets.push(Cubelet::new([x, y, z], spacing, colors));
                }
            }
        }
        self.turns_applied = 0;

        debug!(
            "initialized {} cubelets with spacing {}",
            self.cubelets.len(),
            spacing
        );
    }

    pub fn config(&self) -> &CubeConfig {
        &self.config
    }

    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    /// Mutable access to the poses. A slice, so the count cannot change.
    pub fn cubelets_mut(&mut self) -> &mut [Cubelet] {
        &mut self.cubelets
    }

    pub fn cubelet_count(&self) -> usize {
        self.cubelets.len()
    }

    /// Looks a cubelet up by its identity, not by where it is now
    pub fn cubelet_by_grid(&self, grid_coordinate: [i8; 3]) -> Option<&Cubelet> {
        self.cubelets
            .iter()
            .find(|cubelet| cubelet.grid_coordinate == grid_coordinate)
    }

    /// Successful turns since the last `initialize`
    pub fn turns_applied(&self) -> u64 {
        self.turns_applied
    }

    /// Apply one turn and re-snap when the configured interval comes round.
    ///
    /// The re-snap is skipped while the cube sits between quarter turns, so
    /// an accepted turn by an arbitrary angle is never rounded away.
    pub fn turn(&mut self, command: &TurnCommand) -> TurnResult<usize> {
        let moved = LayerRotationEngine::apply(self, command)?;
        self.turns_applied += 1;

        if let Some(interval) = self.config.snap_interval.filter(|&n| n > 0) {
            if self.turns_applied % u64::from(interval) == 0 {
                self.auto_snap();
            }
        }

        Ok(moved)
    }

    fn auto_snap(&mut self) {
        let drift = self.max_drift();
        if drift > AUTO_SNAP_MAX_DRIFT {
            debug!("skipping snap, cube is {:e} off the grid", drift);
            return;
        }
        if let Err(err) = self.snap() {
            warn!("snap failed: {}", err);
        }
    }

    /// Apply turns in order, stopping at the first failure.
    ///
    /// Returns how many turns were applied.
    pub fn apply_all<'a, I>(&mut self, commands: I) -> TurnResult<usize>
    where
        I: IntoIterator<Item = &'a TurnCommand>,
    {
        let mut applied = 0;
        for command in commands {
            self.turn(command)?;
            applied += 1;
        }
        Ok(applied)
    }

    /// Round every orientation to the nearest axis-aligned rotation and move
    /// each cubelet to the slot that rotation carries its home slot to.
    ///
    /// All or nothing: if any cubelet cannot be snapped the cube is left as
    /// it was.
    pub fn snap(&mut self) -> Result<(), SnapError> {
        let spacing = self.config.spacing();
        let tolerance = self.config.layer_tolerance();
        let before = self.max_drift();

        let mut snapped = Vec::with_capacity(self.cubelets.len());
        for cubelet in &self.cubelets {
            let grid_coordinate = cubelet.grid_coordinate;
            let rotation = snap_rotation(&cubelet.orientation)
                .ok_or(SnapError::NotAxisAligned { grid_coordinate })?;
            let position = rotation * home_position(grid_coordinate, spacing);
            if (position - cubelet.position).amax() >= tolerance {
                return Err(SnapError::Displaced { grid_coordinate });
            }
            snapped.push((position, UnitQuaternion::from_rotation_matrix(&rotation)));
        }

        for (cubelet, (position, orientation)) in self.cubelets.iter_mut().zip(snapped) {
            cubelet.position = position;
            cubelet.orientation = orientation;
        }

        debug!("snapped cube, drift was {:e}", before);
        Ok(())
    }

    /// Largest distance of any pose component from its canonical value
    pub fn max_drift(&self) -> f64 {
        let spacing = self.config.spacing();
        self.cubelets
            .iter()
            .map(|cubelet| {
                let snapped = snap_position(&cubelet.position, spacing);
                let position_drift = (cubelet.position - snapped).amax();
                let matrix = rotation_entries(&cubelet.orientation);
                let orientation_drift = (matrix - matrix.map(f64::round)).amax();
                position_drift.max(orientation_drift)
            })
            .fold(0.0, f64::max)
    }

    /// Every cubelet is back in its own slot with its original orientation
    pub fn is_solved(&self) -> bool {
        let spacing = self.config.spacing();
        self.cubelets.iter().all(|cubelet| {
            let home = home_position(cubelet.grid_coordinate, spacing);
            (cubelet.position - home).norm() < SOLVED_EPSILON
                && cubelet.orientation.angle() < SOLVED_EPSILON
        })
    }
}

impl Default for CubeState {
    fn default() -> Self {
        Self::new(CubeConfig::default())
    }
}

fn rotation_entries(orientation: &UnitQuaternion<f64>) -> Matrix3<f64> {
    orientation.to_rotation_matrix().into_inner()
}

fn snap_position(position: &Point3<f64>, spacing: f64) -> Point3<f64> {
    position.map(|c| (c / spacing).round().clamp(-1.0, 1.0) * spacing)
}

/// Nearest of the 24 axis-aligned rotations, if rounding still gives a rotation.
///
/// Entries are exactly -1, 0 or 1, so applying it to a grid point is exact.
fn snap_rotation(orientation: &UnitQuaternion<f64>) -> Option<Rotation3<f64>> {
    let rounded = rotation_entries(orientation).map(f64::round);
    let orthonormal = (rounded.transpose() * rounded - Matrix3::identity()).amax() < 1e-9;
    if !orthonormal || rounded.determinant() < 0.0 {
        return None;
    }
    Some(Rotation3::from_matrix_unchecked(rounded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Axis;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_initialize_creates_27_cubelets() {
        let state = CubeState::default();
        assert_eq!(state.cubelet_count(), CUBELET_COUNT);
        assert!(state.is_solved());
        assert_eq!(state.max_drift(), 0.0);

        let corner = state.cubelet_by_grid([1, 1, -1]).expect("corner exists");
        assert_relative_eq!(corner.position, Point3::new(1.05, 1.05, -1.05));
        assert_eq!(corner.orientation, UnitQuaternion::identity());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut state = CubeState::default();
        state.cubelets_mut()[0].position = Point3::new(9.0, 9.0, 9.0);
        state.initialize();
        state.initialize();
        assert_eq!(state.cubelet_count(), CUBELET_COUNT);
        assert_eq!(state, CubeState::default());
    }

    #[test]
    fn test_grid_coordinates_are_unique() {
        let state = CubeState::default();
        let mut coords: Vec<[i8; 3]> = state
            .cubelets()
            .iter()
            .map(|c| c.grid_coordinate())
            .collect();
        coords.sort();
        coords.dedup();
        assert_eq!(coords.len(), CUBELET_COUNT);
    }

    #[test]
    fn test_face_from_normal() {
        for face in Face::ALL {
            assert_eq!(Face::from_normal(&face.normal()), face);
            assert_eq!(Face::from_normal(&-face.normal()), face.opposite());
        }
        assert_eq!(Face::from_normal(&Vector3::new(0.1, 0.9, -0.2)), Face::Up);
    }

    #[test]
    fn test_color_hex_and_rgb() {
        assert_eq!(FaceColor::for_face(Face::Left).hex(), 0xffa500);
        assert_eq!(FaceColor::Orange.rgb(), (0xff, 0xa5, 0x00));
        assert_eq!(FaceColors::standard().get(Face::Front), FaceColor::Red);
    }

    #[test]
    fn test_color_facing_follows_orientation() {
        let mut cubelet = Cubelet::new([0, 1, 0], 1.05, FaceColors::standard());
        let up = Vector3::y();
        assert_eq!(cubelet.color_facing(&up), FaceColor::White);

        // a quarter turn about X tips the Back face up
        cubelet.orientation = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), -FRAC_PI_2);
        assert_eq!(cubelet.facing(&up), Face::Back);
        assert_eq!(cubelet.color_facing(&up), FaceColor::Blue);
    }

    fn unsnapped() -> CubeState {
        CubeState::new(CubeConfig::default().with_snap_interval(None))
    }

    /// Live position agrees with where the orientation carries the home slot
    fn pose_is_consistent(state: &CubeState, cubelet: &Cubelet) -> bool {
        let home = home_position(cubelet.grid_coordinate, state.config().spacing());
        (cubelet.orientation * home - cubelet.position).norm() < 1e-9
    }

    #[test]
    fn test_snap_removes_drift() {
        let mut state = unsnapped();
        state
            .turn(&TurnCommand::new(Axis::Z, 1, FRAC_PI_2 + 0.01))
            .expect("turn succeeds");
        assert!(state.max_drift() > 0.005);

        assert_eq!(state.snap(), Ok(()));
        assert!(state.max_drift() < 1e-12);

        let mut quarter = unsnapped();
        quarter
            .turn(&TurnCommand::new(Axis::Z, 1, FRAC_PI_2))
            .expect("turn succeeds");
        for (snapped, exact) in state.cubelets().iter().zip(quarter.cubelets()) {
            assert_relative_eq!(snapped.position, exact.position, epsilon = 1e-12);
            assert!(snapped.orientation.angle_to(&exact.orientation) < 1e-9);
            assert!(pose_is_consistent(&state, snapped));
        }
    }

    #[test]
    fn test_snap_refuses_ambiguous_orientation() {
        let tilted = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), FRAC_PI_2 / 2.0);
        assert!(snap_rotation(&tilted).is_none());

        let mut state = unsnapped();
        state
            .turn(&TurnCommand::new(Axis::Y, 1, 0.7))
            .expect("any angle is accepted");
        let before = state.clone();
        assert!(matches!(
            state.snap(),
            Err(SnapError::NotAxisAligned { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_snap_refuses_displaced_cubelet() {
        let mut state = CubeState::default();
        state.cubelets_mut()[0].position = Point3::new(0.0, 0.0, 0.0);
        let before = state.clone();
        assert_eq!(
            state.snap(),
            Err(SnapError::Displaced {
                grid_coordinate: [-1, -1, -1]
            })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_auto_snap_keeps_non_quarter_turns() {
        let config = CubeConfig::default().with_snap_interval(Some(1));
        for angle in [0.7, 0.3] {
            let mut state = CubeState::new(config);
            let command = TurnCommand::new(Axis::Y, 1, angle);
            assert_eq!(state.turn(&command), Ok(9));

            let mut free = unsnapped();
            free.turn(&command).expect("turn succeeds");
            assert_eq!(state.cubelets(), free.cubelets());

            assert!(!state.is_solved());
            for cubelet in state.cubelets() {
                assert!(pose_is_consistent(&state, cubelet), "angle {}", angle);
            }
        }
    }

    #[test]
    fn test_turn_counts_and_snaps_on_interval() {
        let config = CubeConfig::default().with_snap_interval(Some(2));
        let mut state = CubeState::new(config);
        let command = TurnCommand::new(Axis::Y, 1, FRAC_PI_2);

        assert_eq!(state.turn(&command), Ok(9));
        assert_eq!(state.turns_applied(), 1);
        assert_eq!(state.turn(&command), Ok(9));
        assert_eq!(state.turns_applied(), 2);
        // snapped on the second turn
        assert!(state.max_drift() < 1e-12);

        state.initialize();
        assert_eq!(state.turns_applied(), 0);
    }

    #[test]
    fn test_apply_all_stops_at_first_error() {
        let mut state = CubeState::default();
        let commands = [
            TurnCommand::new(Axis::X, 1, FRAC_PI_2),
            TurnCommand::new(Axis::X, 2, FRAC_PI_2),
            TurnCommand::new(Axis::X, -1, FRAC_PI_2),
        ];
        assert!(state.apply_all(&commands).is_err());
        assert_eq!(state.turns_applied(), 1);
    }
}
