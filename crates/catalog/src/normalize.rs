//! Transport normalization helpers.
//!
//! Stateless conversions from the store's representation to the view's:
//! - identifiers become strings (JSON consumers lose precision above 2^53)
//! - truthy flags (`SMALLINT` 0/1, `BOOLEAN`) become `bool`
//! - decimal text becomes `f64`, with 0 as the fallback for missing or bad input

use core::fmt::Display;

/// Grid column count used when a category leaves it unset (or zero).
pub const DEFAULT_GRID_COLUMNS: i32 = 4;

/// Render an identifier for transport.
pub fn id_string<T: Display>(id: T) -> String {
    id.to_string()
}

/// Store values that carry a truth value.
///
/// Integers follow the usual convention: zero is false, anything else true.
pub trait Truthy {
    fn truthy(&self) -> bool;
}

impl Truthy for bool {
    fn truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_int {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_truthy_int!(i16, i32, i64);

impl<T: Truthy> Truthy for Option<T> {
    fn truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::truthy)
    }
}

/// Parse a decimal amount, falling back to `0.0`.
///
/// Missing, unparsable and non-finite inputs all yield `0.0`; callers that
/// care about the difference use [`try_parse_amount`].
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(try_parse_amount).unwrap_or(0.0)
}

/// Parse a decimal amount, `None` when it is not a finite number.
pub fn try_parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Grid column count with the default applied for `NULL` and `0`.
pub fn grid_columns(raw: Option<i32>) -> i32 {
    match raw {
        None | Some(0) => DEFAULT_GRID_COLUMNS,
        Some(n) => n,
    }
}
