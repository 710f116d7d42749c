use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    #[error("request target is empty")]
    Empty,

    #[error("invalid character {ch:?} at byte {position} of request target")]
    InvalidChar { ch: char, position: usize },

    #[error("invalid scheme: {reason}")]
    InvalidScheme { reason: String },

    #[error("invalid authority: {reason}")]
    InvalidAuthority { reason: String },

    #[error("unsupported request target form: {target}")]
    UnsupportedForm { target: String },
}

impl UrlError {
    pub fn invalid_scheme<S: ToString>(str: S) -> Self {
        Self::InvalidScheme { reason: str.to_string() }
    }

    pub fn invalid_authority<S: ToString>(str: S) -> Self {
        Self::InvalidAuthority { reason: str.to_string() }
    }

    pub fn unsupported_form<S: ToString>(str: S) -> Self {
        Self::UnsupportedForm { target: str.to_string() }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid request method: {token:?}")]
pub struct InvalidMethod {
    token: String,
}

impl InvalidMethod {
    pub fn new<S: ToString>(token: S) -> Self {
        Self { token: token.to_string() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{base}' is not a prefix of path '{path}'")]
pub struct NotAPrefix {
    pub path: String,
    pub base: String,
}

impl NotAPrefix {
    pub fn new<P: ToString, B: ToString>(path: P, base: B) -> Self {
        Self { path: path.to_string(), base: base.to_string() }
    }
}
