use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}

/// A well-formed HTTP response whose body does not match the expected
/// payload shape. Distinct from a request failure: the row stays "ok",
/// the scorer marks json_valid = 0.
#[derive(Debug)]
pub struct SchemaError(pub String);

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SchemaError: {}", self.0)
    }
}
impl std::error::Error for SchemaError {}
