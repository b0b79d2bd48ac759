//! Stock validators for common argument shapes.
//!
//! These cover the groups most tables register: positional tokens joined
//! into one string, a bounded integer with a fallback, and a bare flag.
//! Anything else is a custom closure passed straight to
//! [`register`](crate::table::ArgumentTable::register).

use std::ops::RangeInclusive;

use crate::table::{ValidatorResult, Value};

/// Joins all value tokens into a single string with `separator`.
///
/// An empty group produces the empty string.
pub fn joined(separator: &str) -> impl Fn(&[String]) -> ValidatorResult {
    let separator = separator.to_string();
    move |tokens: &[String]| {
        let value: Value = Box::new(tokens.join(&separator));
        Ok(value)
    }
}

/// Accepts at most one token, parsed as an `i64` inside `range`.
///
/// An empty group produces `default`; more than one token, a token that is
/// not an integer, or a value outside `range` fail validation.
pub fn int_in_range(range: RangeInclusive<i64>, default: i64) -> impl Fn(&[String]) -> ValidatorResult {
    move |tokens: &[String]| {
        if tokens.len() > 1 {
            return Err(format!("only one value accepted (got {})", tokens.len()).into());
        }

        let Some(token) = tokens.first() else {
            let value: Value = Box::new(default);
            return Ok(value);
        };

        match token.parse::<i64>() {
            Ok(parsed) if range.contains(&parsed) => {
                let value: Value = Box::new(parsed);
                Ok(value)
            }
            _ => Err(format!(
                "expected integer in range {}-{} (got '{token}')",
                range.start(),
                range.end()
            )
            .into()),
        }
    }
}

/// A switch that takes no value tokens; its presence stores `true`.
pub fn flag() -> impl Fn(&[String]) -> ValidatorResult {
    |tokens: &[String]| {
        if !tokens.is_empty() {
            return Err(format!("no value accepted (got {})", tokens.len()).into());
        }
        let value: Value = Box::new(true);
        Ok(value)
    }
}
