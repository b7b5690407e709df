/// Named moves and single-key turn decoding
use std::f64::consts::FRAC_PI_2;

use crate::engine::{Axis, TurnCommand};

/// A quarter turn of one named layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    Front,
    Back,
    /// Slice between Left and Right, turning with Left
    Middle,
    /// Slice between Up and Down, turning with Down
    Equator,
    /// Slice between Front and Back, turning with Front
    Standing,
}

impl Move {
    pub const ALL: [Move; 9] = [
        Move::Up,
        Move::Down,
        Move::Left,
        Move::Right,
        Move::Front,
        Move::Back,
        Move::Middle,
        Move::Equator,
        Move::Standing,
    ];

    pub fn turn_command(self) -> TurnCommand {
        let (axis, layer, angle) = match self {
            Move::Up => (Axis::Y, 1, FRAC_PI_2),
            Move::Down => (Axis::Y, -1, -FRAC_PI_2),
            Move::Left => (Axis::X, -1, FRAC_PI_2),
            Move::Right => (Axis::X, 1, -FRAC_PI_2),
            Move::Front => (Axis::Z, -1, FRAC_PI_2),
            Move::Back => (Axis::Z, 1, -FRAC_PI_2),
            Move::Middle => (Axis::X, 0, FRAC_PI_2),
            Move::Equator => (Axis::Y, 0, -FRAC_PI_2),
            Move::Standing => (Axis::Z, 0, FRAC_PI_2),
        };
        TurnCommand::new(axis, layer, angle)
    }

    pub fn letter(self) -> char {
        match self {
            Move::Up => 'U',
            Move::Down => 'D',
            Move::Left => 'L',
            Move::Right => 'R',
            Move::Front => 'F',
            Move::Back => 'B',
            Move::Middle => 'M',
            Move::Equator => 'E',
            Move::Standing => 'S',
        }
    }

    /// Case-insensitive
    pub fn from_letter(letter: char) -> Option<Move> {
        let letter = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|m| m.letter() == letter)
    }
}

/// Decode a pressed key into a turn.
///
/// Lowercase letters turn the named layer, uppercase (shifted) letters turn it
/// back. Any other key is not a turn.
pub fn decode_turn(key: char) -> Option<TurnCommand> {
    let command = Move::from_letter(key)?.turn_command();
    if key.is_ascii_uppercase() {
        Some(command.inverse())
    } else {
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_turn_table() {
        let table = [
            ('u', Axis::Y, 1, FRAC_PI_2),
            ('d', Axis::Y, -1, -FRAC_PI_2),
            ('l', Axis::X, -1, FRAC_PI_2),
            ('r', Axis::X, 1, -FRAC_PI_2),
            ('f', Axis::Z, -1, FRAC_PI_2),
            ('b', Axis::Z, 1, -FRAC_PI_2),
        ];
        for (key, axis, layer, angle) in table {
            assert_eq!(
                decode_turn(key),
                Some(TurnCommand::new(axis, layer, angle)),
                "key {:?}",
                key
            );
        }
    }

    #[test]
    fn test_shift_reverses_turn() {
        assert_eq!(decode_turn('U'), decode_turn('u').map(TurnCommand::inverse));
        assert_eq!(
            decode_turn('M'),
            Some(TurnCommand::new(Axis::X, 0, -FRAC_PI_2))
        );
    }

    #[test]
    fn test_other_keys_ignored() {
        for key in ['q', 'x', ' ', '1', 'é'] {
            assert_eq!(decode_turn(key), None);
        }
    }

    #[test]
    fn test_letters_round_trip() {
        for m in Move::ALL {
            assert_eq!(Move::from_letter(m.letter()), Some(m));
        }
    }
}
