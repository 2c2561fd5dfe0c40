//! Parsing of the free-text floor argument of a check command.
//!
//! Three shapes are understood, tried in this order:
//!
//! ```text
//! 7-10      range (anything containing '-')
//! 3, 5, 9   list  (anything containing ',')
//! 12        single floor
//! ```

use crate::error::ValidationError;

/// A parsed floor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FloorInput {
    /// Inclusive ascending range. `start > end` is kept as given and
    /// expands to nothing.
    Range { start: i32, end: i32 },
    /// Every token of a comma-separated list that parsed as an integer,
    /// in input order.
    List(Vec<i32>),
    Single(i32),
}

impl FloorInput {
    /// Parse user input.
    ///
    /// Whitespace around tokens is ignored. In a range only the first and last
    /// `-`-separated tokens count, so `3-5-9` means `3..=9`. A leading minus
    /// sign is always read as a range separator.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::EmptyInput);
        }

        if input.contains('-') {
            let mut tokens = input.split('-');
            let start = tokens.next().and_then(parse_floor);
            let end = tokens.last().and_then(parse_floor);
            return match (start, end) {
                (Some(start), Some(end)) => Ok(FloorInput::Range { start, end }),
                _ => Err(ValidationError::InvalidRange),
            };
        }

        if input.contains(',') {
            let floors: Vec<i32> = input.split(',').filter_map(parse_floor).collect();
            if floors.is_empty() {
                return Err(ValidationError::NoFloorsRecognised);
            }
            return Ok(FloorInput::List(floors));
        }

        parse_floor(input)
            .map(FloorInput::Single)
            .ok_or(ValidationError::InvalidFloor)
    }
}

fn parse_floor(token: &str) -> Option<i32> {
    token.trim().parse().ok()
}
