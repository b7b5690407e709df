/// Parser for move sequences such as `R U R' U' F2`
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{multispace0, one_of},
    combinator::{map_opt, opt, value},
    multi::many0,
    sequence::{preceded, terminated},
    IResult,
};

use crate::engine::TurnCommand;
use crate::error::NotationError;
use crate::moves::Move;

/// Parse whitespace-separated (or run-together) moves.
///
/// A letter from `UDLRFBMES` may be followed by `'` (reverse), `2` (half
/// turn) or `2'`.
pub fn parse_moves(input: &str) -> Result<Vec<TurnCommand>, NotationError> {
    match terminated(many0(preceded(multispace0, parse_move)), multispace0)(input) {
        Ok(("", commands)) => Ok(commands),
        Ok((rest, _)) => Err(error_at(input, rest)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(error_at(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(error_at(input, "")),
    }
}

fn error_at(input: &str, rest: &str) -> NotationError {
    NotationError {
        offset: input.len() - rest.len(),
        fragment: rest.split_whitespace().next().unwrap_or_default().to_string(),
    }
}

fn parse_move(input: &str) -> IResult<&str, TurnCommand> {
    let (input, m) = map_opt(one_of("UDLRFBMES"), Move::from_letter)(input)?;
    let (input, times) = opt(parse_suffix)(input)?;
    Ok((input, m.turn_command().repeated(times.unwrap_or(1))))
}

fn parse_suffix(input: &str) -> IResult<&str, i32> {
    alt((value(-2, tag("2'")), value(2, tag("2")), value(-1, tag("'"))))(input)
}
