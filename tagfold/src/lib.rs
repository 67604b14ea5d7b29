/*!
> **tagfold:** tagged unions from case mappings, with constructors and folds.

A *tagged union* is a value that is exactly one of several *cases*, each carrying a *tag* (the
name of its case) and a *payload* (a record of fields specific to that case). This crate derives
such unions from a plain mapping of case names to payload shapes, and gives you the two things you
want to do with them: *construct* a value of a given case without spelling out its tag, and
*fold* over a value by dispatching on its tag to a handler for its case.

```
use tagfold::{adt, fold, partial_fold, Handlers, Tagged};

adt! {
    #[derive(Debug, Clone, PartialEq)]
    pub enum Shape {
        circle { r: f64 },
        rectangle { w: f64, h: f64 },
    }
}

# fn main() -> Result<(), tagfold::FoldError> {
// One constructor per case: the tag is supplied for you
let circle = Shape::circle(shape::Circle { r: 10.0 });
let rectangle = Shape::rectangle(shape::Rectangle { w: 10.0, h: 20.0 });
assert_eq!(circle.tag(), "circle");

// A complete fold has a handler for every case...
let area = fold(
    Handlers::new()
        .on(|c: &shape::Circle| c.r * c.r * std::f64::consts::PI)
        .on(|r: &shape::Rectangle| r.w * r.h),
);
assert_eq!(area.apply(&rectangle)?, 200.0);

// ...while a partial fold falls back to a default for the rest
let is_circle = partial_fold(
    Handlers::new().on(|_: &shape::Circle| true),
    |_: Option<&Shape>| false,
);
assert!(is_circle.apply(&circle));
assert!(!is_circle.apply(&rectangle));
# Ok(())
# }
```

## Quick reference

- The [`adt!`] macro derives a union from a case mapping: an `enum` with one variant per case, a
  module of payload structs, one constructor function per case, and implementations of
  [`Tagged`], [`Cases`] and [`Case`].
- [`Handlers`] maps tags to handlers. Turn it into a [`Fold`] with [`fold`], which fails with
  [`FoldError::Unhandled`] on a value it has no handler for, or into a [`PartialFold`] with
  [`partial_fold`], which calls a default handler instead. Both dispatch identically; only what
  happens to an unhandled value differs.
- With the `serde` feature (on by default), [`Record`] is a tagged value whose payload is only
  known at runtime, laid out as a flat JSON object such as `{"type": "circle", "r": 10}`, and
  [`Constructors`] builds records for a known set of cases, rejecting any other.

Folds and handlers are `Send + Sync` and never mutate anything, so they can be shared freely and
applied any number of times with the same result.
*/

#![allow(clippy::type_complexity)]
#![warn(missing_docs)]
#![warn(missing_copy_implementations, missing_debug_implementations)]
#![warn(unused_qualifications, unused_results)]
#![warn(future_incompatible)]
#![warn(unused)]
// Documentation configuration
#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
extern crate derivative;

mod error;
mod fold;
mod tagged;

#[cfg(feature = "serde")]
mod constructor;
#[cfg(feature = "serde")]
mod record;

pub use error::FoldError;
pub use fold::{fold, partial_fold, Fold, Handlers, PartialFold};
pub use tagfold_macro::adt;
pub use tagged::{construct, Case, Cases, Tagged};

#[cfg(feature = "serde")]
pub use constructor::{Constructor, Constructors};
#[cfg(feature = "serde")]
pub use error::{ConstructError, DecodeError};
#[cfg(feature = "serde")]
pub use record::Record;

/// The prelude module for quickly getting started with tagfold.
///
/// This module is designed to be imported as `use tagfold::prelude::*;`, which brings into scope
/// the traits needed to call methods on tagged values along with the fold builders.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{adt, fold, partial_fold, Case, Cases, Handlers, Tagged};
}
