use crate::{Fold, FoldError, PartialFold};

/// A value carrying a discriminant (its *tag*), naming which case of a union it belongs to.
///
/// The tag of a value is read-only: it is fixed when the value is constructed and there is no way
/// to change it afterwards except by constructing a new value. For unions generated by
/// [`adt!`](crate::adt) the tag is determined by the variant; for [`Record`](crate::Record) it is
/// a private field.
///
/// # Examples
///
/// ```
/// use tagfold::{adt, Tagged};
///
/// adt! {
///     enum Shape {
///         circle { r: f64 },
///         rectangle { w: f64, h: f64 },
///     }
/// }
///
/// let rectangle = Shape::rectangle(shape::Rectangle { w: 10.0, h: 20.0 });
/// assert_eq!(rectangle.tag(), "rectangle");
/// ```
pub trait Tagged {
    /// The name of the field holding the tag when the value is laid out as a flat record.
    const TAG_FIELD: &'static str = "type";

    /// The tag of this value.
    fn tag(&self) -> &str;

    /// Apply a complete [`Fold`] to this value: the value-first spelling of [`Fold::apply`].
    fn fold_with<R>(&self, fold: &Fold<'_, Self, R>) -> Result<R, FoldError>
    where
        Self: Sized,
    {
        fold.apply(self)
    }

    /// Apply a [`PartialFold`] to this value: the value-first spelling of [`PartialFold::apply`].
    fn partial_fold_with<R>(&self, fold: &PartialFold<'_, Self, R>) -> R
    where
        Self: Sized,
    {
        fold.apply(self)
    }
}

/// A tagged type whose complete set of cases is known statically.
///
/// This is implemented by [`adt!`](crate::adt) for every union it generates, listing the case
/// names in declaration order. A union with no cases has an empty list and no inhabitants.
pub trait Cases: Tagged {
    /// Every tag a value of this type may carry.
    const CASES: &'static [&'static str];

    /// Whether `tag` is one of this type's cases.
    fn is_case(tag: &str) -> bool {
        Self::CASES.contains(&tag)
    }
}

/// The payload of a single case of the union `T`.
///
/// A payload is the case's shape without its tag; the tag is supplied by [`Case::TAG`] when the
/// payload is injected into the union, and removed again by [`Case::project`] and
/// [`Case::extract`].
pub trait Case<T: Tagged>: Sized {
    /// The tag of this case.
    const TAG: &'static str;

    /// Tag this payload, producing a value of the union.
    fn inject(self) -> T;

    /// Select this case out of a union value, by reference.
    fn project(value: &T) -> Option<&Self>;

    /// Select this case out of a union value, returning the value untouched if it is of another
    /// case.
    fn extract(value: T) -> Result<Self, T>;
}

/// Construct a value of the union `T` from the payload of one of its cases.
///
/// This is the generic counterpart of the per-case constructors generated by
/// [`adt!`](crate::adt): `construct::<Shape, _>(payload)` is `Shape::circle(payload)` when
/// `payload` is a `shape::Circle`.
pub fn construct<T: Tagged, C: Case<T>>(payload: C) -> T {
    payload.inject()
}
