use crate::flex::Direction;
use thiserror::Error;

/// Errors raised while configuring a style. None of them leave a style partially updated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Unknown style property '{0}'")]
    UnknownProperty(String),

    #[error("'{alias}' is only supported when (direction == {required})")]
    DirectionAlias {
        alias: &'static str,
        required: Direction,
    },

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue {
        property: &'static str,
        value: String,
    },

    #[error("'{property}' is missing its required {component}")]
    MissingComponent {
        property: &'static str,
        component: &'static str,
    },

    #[error("Parse error: {0}")]
    Parse(String),
}
