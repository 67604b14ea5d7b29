//! The compiler behind the `adt!` macro of the `tagfold` crate.
//!
//! An invocation of `adt!` is a *case mapping*: an `enum`-like declaration whose cases are named
//! by their tag and carry a record of named fields. This crate parses that declaration into
//! [`Invocation`], checks it, and lowers it into a [`Target`], which knows how to emit the
//! discriminated union, one payload struct per case, and the trait implementations that connect
//! them to the `tagfold` runtime.
//!
//! Nothing here depends on running inside a procedural macro, so the whole pipeline can be tested
//! with [`syn::parse_str`].

use {proc_macro2::Span, std::ops, thiserror::Error};

pub mod names;
mod parse;
mod syntax;
mod target;

pub use syntax::{AdtDef, AdtOption, CaseDef, Invocation};
pub use target::{Target, Variant};

/// The name of the tag field used when an invocation doesn't choose one.
pub const DEFAULT_TAG_FIELD: &str = "type";

/// A value paired with the span of source code it was produced from.
#[derive(Debug, Clone, Copy)]
pub struct Spanned<T> {
    /// The inner value.
    pub inner: T,
    /// The span associated with the inner value.
    pub span: Span,
}

impl<T> From<T> for Spanned<T> {
    fn from(inner: T) -> Self {
        Spanned {
            inner,
            span: Span::call_site(),
        }
    }
}

impl<T> ops::Deref for Spanned<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> ops::DerefMut for Spanned<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// The errors which can be found in a well-formed (parseable) case mapping.
///
/// Errors are collected for the whole invocation before any of them is reported, so that a
/// single expansion of the macro points at every problem at once.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CompileError {
    /// The same case name appears twice.
    #[error("case `{0}` is declared more than once")]
    DuplicateCase(String),
    /// Two distinct case names would produce the same enum variant.
    #[error("cases `{first}` and `{second}` would both become the variant `{variant}`")]
    VariantCollision {
        /// The case declared first.
        first: String,
        /// The case declared second.
        second: String,
        /// The variant name they share.
        variant: String,
    },
    /// A case name has no usable variant name (e.g. `_` or `_1`).
    #[error("case `{0}` cannot be turned into an enum variant name")]
    InvalidCaseName(String),
    /// A payload field shadows the tag field.
    #[error("field `{field}` of case `{case}` has the same name as the tag field")]
    ReservedField {
        /// The case containing the offending field.
        case: String,
        /// The field name.
        field: String,
    },
    /// An `#[adt(...)]` option which doesn't exist.
    #[error("unknown option `{0}`, expected `tag` or `module`")]
    UnknownOption(String),
    /// An `#[adt(...)]` option given more than once.
    #[error("option `{0}` is given more than once")]
    DuplicateOption(String),
    /// An `#[adt(...)]` option whose value isn't a string literal.
    #[error("option `{0}` expects a string literal")]
    ExpectedString(String),
    /// `#[adt(tag = "")]`.
    #[error("the tag field name must not be empty")]
    EmptyTagField,
    /// The payload module name is not an identifier.
    #[error("`{0}` is not a valid module name, choose one with `#[adt(module = \"...\")]`")]
    InvalidModule(String),
}
