//! Status code validation.
//!
//! Status codes arrive from application code as integers or as numeric
//! strings. A token is valid iff it denotes an integer in `100..=699`: the five
//! standard classes plus a local `6xx` class for application errors.

use http::StatusCode;

const MIN_STATUS: i64 = 100;
const MAX_STATUS: i64 = 699;

/// A candidate status code as supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatusToken<'a> {
    Int(i64),
    Float(f64),
    Str(&'a str),
}

macro_rules! int_token {
    ($($int:ty),*) => {
        $(
            impl From<$int> for StatusToken<'_> {
                #[inline]
                fn from(value: $int) -> Self {
                    StatusToken::Int(i64::from(value))
                }
            }
        )*
    };
}

int_token!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for StatusToken<'_> {
    #[inline]
    fn from(value: f64) -> Self {
        StatusToken::Float(value)
    }
}

impl<'a> From<&'a str> for StatusToken<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        StatusToken::Str(value)
    }
}

impl<'a> From<&'a String> for StatusToken<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        StatusToken::Str(value.as_str())
    }
}

impl StatusToken<'_> {
    /// The integer value, if this token is integer-valued at all.
    ///
    /// A string must be the canonical decimal spelling of its value, so
    /// `"0200"`, `"+200"` and `" 200"` are not integers here.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, reason = "float range is checked before the cast")]
    fn integer(&self) -> Option<i64> {
        match *self {
            StatusToken::Int(value) => Some(value),
            StatusToken::Float(value) => (value.is_finite()
                && value.fract() == 0.0
                && (MIN_STATUS as f64..=MAX_STATUS as f64).contains(&value))
            .then_some(value as i64),
            StatusToken::Str(str) => str.parse::<i64>().ok().filter(|value| value.to_string() == str),
        }
    }
}

/// Returns whether `token` is an acceptable status code.
pub fn validate_status_code<'a>(token: impl Into<StatusToken<'a>>) -> bool {
    token.into().integer().is_some_and(|code| (MIN_STATUS..=MAX_STATUS).contains(&code))
}

/// Converts a valid token into a [`StatusCode`].
pub fn to_status_code<'a>(token: impl Into<StatusToken<'a>>) -> Option<StatusCode> {
    let code = token.into().integer().filter(|code| (MIN_STATUS..=MAX_STATUS).contains(code))?;
    u16::try_from(code).ok().and_then(|code| StatusCode::from_u16(code).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_tokens() {
        assert!(validate_status_code(200));
        assert!(validate_status_code(404));
        assert!(validate_status_code("301"));
        assert!(validate_status_code(100));
        assert!(validate_status_code(699));
        assert!(validate_status_code(200.0));
        assert!(validate_status_code(&"503".to_string()));
    }

    #[test]
    fn rejected_tokens() {
        assert!(!validate_status_code("99"));
        assert!(!validate_status_code(700));
        assert!(!validate_status_code("12a"));
        assert!(!validate_status_code(3.5));
        assert!(!validate_status_code(99));
        assert!(!validate_status_code(-200));
        assert!(!validate_status_code(""));
        assert!(!validate_status_code(" 200"));
        assert!(!validate_status_code("0200"));
        assert!(!validate_status_code("+200"));
        assert!(!validate_status_code("200.0"));
        assert!(!validate_status_code(f64::NAN));
        assert!(!validate_status_code(f64::INFINITY));
    }

    #[test]
    fn converts_to_status_code() {
        assert_eq!(to_status_code("404"), Some(StatusCode::NOT_FOUND));
        assert_eq!(to_status_code(201), Some(StatusCode::CREATED));
        assert_eq!(to_status_code(650).map(|code| code.as_u16()), Some(650));
        assert_eq!(to_status_code(700), None);
        assert_eq!(to_status_code("abc"), None);
    }
}
