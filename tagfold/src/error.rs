use thiserror::Error;

#[allow(unused_imports)] // To link with documentation
use crate::{Fold, PartialFold};

/// The error returned when a complete [`Fold`] meets a value it has no handler for.
///
/// A [`PartialFold`] never fails: it hands such values to its default handler instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FoldError {
    /// No handler exists for the value's tag.
    #[error("no handler for case `{tag}`")]
    Unhandled {
        /// The tag of the unhandled value.
        tag: String,
    },
    /// [`Fold::exhaustive`] was given handlers which don't cover every case.
    #[error("fold is not exhaustive, missing handlers for: {}", .missing.join(", "))]
    MissingHandlers {
        /// The cases without a handler, in declaration order.
        missing: Vec<&'static str>,
    },
}

/// The error returned when constructing a record through [`Constructors`](crate::Constructors).
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// There is no constructor for the requested case.
    #[error("unknown case `{tag}`, expected one of: {}", .known.join(", "))]
    UnknownCase {
        /// The requested case.
        tag: String,
        /// Every case with a constructor, in the order they were given.
        known: Vec<String>,
    },
    /// The payload already has a field named like the tag field, which the constructor supplies.
    #[error("payload of case `{tag}` must not contain the tag field `{field}`")]
    ReservedField {
        /// The case being constructed.
        tag: String,
        /// The name of the tag field.
        field: &'static str,
    },
}

/// The error returned when a [`Record`](crate::Record) can't be read from JSON.
#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not a JSON object.
    #[error("expected an object, found {0}")]
    NotAnObject(&'static str),
    /// The object has no tag field.
    #[error("missing tag field `{0}`")]
    MissingTag(&'static str),
    /// The tag field is not a string.
    #[error("tag field `{field}` must be a string, found {found}")]
    InvalidTag {
        /// The name of the tag field.
        field: &'static str,
        /// The kind of JSON value found instead.
        found: &'static str,
    },
    /// A payload field has the name of a tag field, so the tag and the field can't both be kept.
    #[error("payload field `{0}` collides with a tag field")]
    ReservedField(&'static str),
    /// Converting between a record and a typed value failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_case() {
        let unhandled = FoldError::Unhandled {
            tag: "square".to_owned(),
        };
        assert_eq!(unhandled.to_string(), "no handler for case `square`");

        let missing = FoldError::MissingHandlers {
            missing: vec!["circle", "rectangle"],
        };
        assert_eq!(
            missing.to_string(),
            "fold is not exhaustive, missing handlers for: circle, rectangle"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn unknown_case_lists_known_cases() {
        let unknown = ConstructError::UnknownCase {
            tag: "square".to_owned(),
            known: vec!["circle".to_owned(), "rectangle".to_owned()],
        };
        assert_eq!(
            unknown.to_string(),
            "unknown case `square`, expected one of: circle, rectangle"
        );
    }
}
