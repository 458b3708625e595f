//! Builder errors
//!
//! Builders never hand these to the caller: the public entry points log
//! them with `tracing::error!` and return an inert result instead.

use bsm_dom::DomError;

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A required item sequence was empty
    #[error("{builder} requires at least one {item} in the options.{field} array.")]
    Empty {
        builder: &'static str,
        item: &'static str,
        field: &'static str,
    },

    /// The attachment target could not be resolved
    #[error("{builder}: Target element \"{target}\" not found.")]
    TargetNotFound { builder: &'static str, target: String },

    /// The document has no `<body>` to hold the element
    #[error("{builder}: document has no <body> element")]
    MissingBody { builder: &'static str },

    #[error(transparent)]
    Dom(#[from] DomError),
}
