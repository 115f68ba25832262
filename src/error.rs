use thiserror::Error;

/// Errors surfaced by the transformation engine and the render layer.
///
/// Loading code (catalog files, ingredient sets, recipe JSON) reports through
/// `anyhow` instead, since those failures only need a readable context chain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RecipeError {
    /// The catalog has no sub-table for the requested category or cuisine.
    #[error("unknown transformation category: '{0}'")]
    UnknownCategory(String),

    #[error("invalid scale factor {0}: must be a finite number greater than zero")]
    InvalidScale(f64),

    /// A step template asked for a slot its ingredient references cannot fill.
    #[error("template '{template}' needs slot {{{slot}}} but only {available} ingredient reference(s) were given")]
    MissingTemplateSlot {
        slot: usize,
        available: usize,
        template: String,
    },

    #[error("malformed template '{template}': {reason}")]
    MalformedTemplate { template: String, reason: String },
}

pub type Result<T, E = RecipeError> = std::result::Result<T, E>;
