use std::{borrow::Cow, collections::HashMap, fmt};

use crate::{Case, Cases, FoldError, Tagged};

type Handler<'a, T, R> = Box<dyn Fn(&T) -> Option<R> + Send + Sync + 'a>;
type DefaultHandler<'a, T, R> = Box<dyn Fn(Option<&T>) -> R + Send + Sync + 'a>;

/// A mapping from case names to handlers, each turning a value of that case into an `R`.
///
/// A handler can be registered either for a typed payload with [`Handlers::on`], in which case it
/// receives the payload of its case, or for a bare tag with [`Handlers::on_tag`], in which case
/// it receives the whole tagged value. Registering a second handler for the same tag replaces the
/// first.
///
/// Handlers are turned into something that can be applied with [`fold`] (every case must be
/// handled) or [`partial_fold`] (unhandled cases go to a default).
///
/// # Examples
///
/// ```
/// use tagfold::{adt, Handlers};
///
/// adt! {
///     enum Shape {
///         circle { r: f64 },
///         rectangle { w: f64, h: f64 },
///     }
/// }
///
/// let area = Handlers::<Shape, f64>::new()
///     .on(|c: &shape::Circle| c.r * c.r * std::f64::consts::PI)
///     .on(|r: &shape::Rectangle| r.w * r.h);
///
/// assert!(area.handles("circle"));
/// assert!(area.missing().is_empty());
/// ```
pub struct Handlers<'a, T, R> {
    map: HashMap<Cow<'static, str>, Handler<'a, T, R>>,
}

impl<'a, T, R> Default for Handlers<'a, T, R> {
    fn default() -> Self {
        Handlers {
            map: HashMap::new(),
        }
    }
}

impl<'a, T, R> fmt::Debug for Handlers<'a, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut tags: Vec<&str> = self.map.keys().map(|tag| tag.as_ref()).collect();
        tags.sort_unstable();
        f.debug_struct("Handlers").field("tags", &tags).finish()
    }
}

impl<'a, T, R> Handlers<'a, T, R>
where
    T: Tagged + 'a,
    R: 'a,
{
    /// An empty set of handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle the case whose payload is `C`, by passing that payload to `handler`.
    pub fn on<C, F>(mut self, handler: F) -> Self
    where
        C: Case<T> + 'a,
        F: Fn(&C) -> R + Send + Sync + 'a,
    {
        let handler: Handler<'a, T, R> =
            Box::new(move |value: &T| C::project(value).map(&handler));
        let _ = self.map.insert(Cow::Borrowed(C::TAG), handler);
        self
    }

    /// Handle the case tagged `tag`, by passing the whole tagged value to `handler`.
    ///
    /// The tag is not checked against anything: registering a handler for a tag which no value
    /// ever carries is allowed, and the handler is simply never called.
    pub fn on_tag<F>(mut self, tag: impl Into<Cow<'static, str>>, handler: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'a,
    {
        let handler: Handler<'a, T, R> = Box::new(move |value: &T| Some(handler(value)));
        let _ = self.map.insert(tag.into(), handler);
        self
    }

    /// Whether a handler is registered for `tag`.
    pub fn handles(&self, tag: &str) -> bool {
        self.map.contains_key(tag)
    }

    /// The tags which have a handler, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.keys().map(|tag| tag.as_ref())
    }

    /// The number of handled tags.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no tag is handled.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// The cases of `T` which have no handler, in declaration order.
    pub fn missing(&self) -> Vec<&'static str>
    where
        T: Cases,
    {
        T::CASES
            .iter()
            .copied()
            .filter(|tag| !self.handles(tag))
            .collect()
    }

    /// Look up the handler for the value's tag and run it.
    ///
    /// Returns `None` if there is no handler for the tag, or if the handler's payload type doesn't
    /// match the value.
    fn dispatch(&self, value: &T) -> Option<R> {
        self.map.get(value.tag()).and_then(|handler| handler(value))
    }

    /// Run the handler for the value's tag, or `fallback` if there is none.
    ///
    /// Both folds dispatch through here: a [`PartialFold`] falls back to its default handler, a
    /// [`Fold`] to [`FoldError::Unhandled`].
    fn apply_or(&self, value: &T, fallback: impl FnOnce(&T) -> R) -> R {
        match self.dispatch(value) {
            Some(result) => result,
            None => fallback(value),
        }
    }

    fn fallible(self) -> Handlers<'a, T, Result<R, FoldError>> {
        let map = self
            .map
            .into_iter()
            .map(|(tag, handler)| {
                let handler: Handler<'a, T, Result<R, FoldError>> =
                    Box::new(move |value: &T| handler(value).map(Ok));
                (tag, handler)
            })
            .collect();
        Handlers { map }
    }
}

/// A fold with a fallback: applying it runs the handler for the value's tag if there is one, or
/// the default handler otherwise. It never fails.
///
/// The default handler receives the value as `Some(&value)` when called from
/// [`PartialFold::apply`], and `None` when called from [`PartialFold::apply_default`].
///
/// # Examples
///
/// ```
/// use tagfold::{adt, partial_fold, Handlers};
///
/// adt! {
///     enum Shape {
///         circle { r: f64 },
///         rectangle { w: f64, h: f64 },
///     }
/// }
///
/// let is_circle = partial_fold(
///     Handlers::new().on(|_: &shape::Circle| true),
///     |_: Option<&Shape>| false,
/// );
///
/// assert!(is_circle.apply(&Shape::circle(shape::Circle { r: 10.0 })));
/// assert!(!is_circle.apply(&Shape::rectangle(shape::Rectangle { w: 10.0, h: 20.0 })));
/// ```
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct PartialFold<'a, T, R> {
    handlers: Handlers<'a, T, R>,
    #[derivative(Debug = "ignore")]
    default: DefaultHandler<'a, T, R>,
}

impl<'a, T, R> PartialFold<'a, T, R>
where
    T: Tagged + 'a,
    R: 'a,
{
    /// Combine `handlers` with a `default` for every case they don't handle.
    pub fn new<D>(handlers: Handlers<'a, T, R>, default: D) -> Self
    where
        D: Fn(Option<&T>) -> R + Send + Sync + 'a,
    {
        PartialFold {
            handlers,
            default: Box::new(default),
        }
    }

    /// Run the handler for the value's tag, or the default handler if there is none.
    pub fn apply(&self, value: &T) -> R {
        self.handlers.apply_or(value, |value| {
            log::trace!("no handler for case `{}`, using the default", value.tag());
            (self.default)(Some(value))
        })
    }

    /// Run the default handler without any value.
    pub fn apply_default(&self) -> R {
        (self.default)(None)
    }

    /// The handlers this fold dispatches to.
    pub fn handlers(&self) -> &Handlers<'a, T, R> {
        &self.handlers
    }
}

/// A complete fold: applying it runs the handler for the value's tag, and fails with
/// [`FoldError::Unhandled`] if there is none.
///
/// A [`Fold`] dispatches exactly like a [`PartialFold`], with a fallback that always fails
/// instead of a default handler. Use [`Fold::exhaustive`] to check up front that every case of a union has a
/// handler.
///
/// # Examples
///
/// ```
/// use tagfold::{adt, fold, FoldError, Handlers, Tagged};
///
/// adt! {
///     #[derive(Debug)]
///     enum Shape {
///         circle { r: f64 },
///         rectangle { w: f64, h: f64 },
///     }
/// }
///
/// let area = fold(
///     Handlers::new()
///         .on(|c: &shape::Circle| c.r * c.r * std::f64::consts::PI)
///         .on(|r: &shape::Rectangle| r.w * r.h),
/// );
///
/// let rectangle = Shape::rectangle(shape::Rectangle { w: 10.0, h: 20.0 });
/// assert_eq!(area.apply(&rectangle)?, 200.0);
/// assert_eq!(rectangle.fold_with(&area)?, 200.0);
/// # Ok::<(), FoldError>(())
/// ```
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct Fold<'a, T, R> {
    handlers: Handlers<'a, T, Result<R, FoldError>>,
}

impl<'a, T, R> Fold<'a, T, R>
where
    T: Tagged + 'a,
    R: 'a,
{
    /// Make a fold out of `handlers`, without checking that they cover every case.
    pub fn new(handlers: Handlers<'a, T, R>) -> Self {
        Fold {
            handlers: handlers.fallible(),
        }
    }

    /// Make a fold out of `handlers`, failing with [`FoldError::MissingHandlers`] unless there is
    /// a handler for every case of `T`.
    pub fn exhaustive(handlers: Handlers<'a, T, R>) -> Result<Self, FoldError>
    where
        T: Cases,
    {
        let missing = handlers.missing();
        if missing.is_empty() {
            Ok(Self::new(handlers))
        } else {
            Err(FoldError::MissingHandlers { missing })
        }
    }

    /// Run the handler for the value's tag.
    ///
    /// # Errors
    ///
    /// [`FoldError::Unhandled`] if no handler exists for the value's tag.
    pub fn apply(&self, value: &T) -> Result<R, FoldError> {
        self.handlers.apply_or(value, |value| {
            Err(FoldError::Unhandled {
                tag: value.tag().to_owned(),
            })
        })
    }

    /// Whether a handler is registered for `tag`.
    pub fn handles(&self, tag: &str) -> bool {
        self.handlers.handles(tag)
    }
}

/// Build a complete [`Fold`] from a handler for every case.
pub fn fold<'a, T, R>(handlers: Handlers<'a, T, R>) -> Fold<'a, T, R>
where
    T: Tagged + 'a,
    R: 'a,
{
    Fold::new(handlers)
}

/// Build a [`PartialFold`] from handlers for some cases and a default for the rest.
pub fn partial_fold<'a, T, R, D>(handlers: Handlers<'a, T, R>, default: D) -> PartialFold<'a, T, R>
where
    T: Tagged + 'a,
    R: 'a,
    D: Fn(Option<&T>) -> R + Send + Sync + 'a,
{
    PartialFold::new(handlers, default)
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use static_assertions::assert_impl_all;

    use super::*;
    use crate::tagged::tests::{Circle, Rectangle, Shape};

    assert_impl_all!(Fold<'static, Shape, f64>: Send, Sync);
    assert_impl_all!(PartialFold<'static, Shape, bool>: Send, Sync);

    fn area() -> Fold<'static, Shape, f64> {
        fold(
            Handlers::new()
                .on(|c: &Circle| c.r * c.r * PI)
                .on(|r: &Rectangle| r.w * r.h),
        )
    }

    /// A value whose tag is outside of every handler set.
    struct Square;

    impl Tagged for Square {
        fn tag(&self) -> &str {
            "square"
        }
    }

    #[test]
    fn fold_dispatches_on_tag() {
        let area = area();
        let circle = Shape::Circle(Circle { r: 10.0 });
        let rectangle = Shape::Rectangle(Rectangle { w: 10.0, h: 20.0 });

        assert!((area.apply(&circle).unwrap() - 100.0 * PI).abs() < 1e-9);
        assert_eq!(area.apply(&rectangle).unwrap(), 200.0);
    }

    #[test]
    fn fold_is_idempotent() {
        let area = area();
        let rectangle = Shape::Rectangle(Rectangle { w: 3.0, h: 4.0 });
        let first = area.apply(&rectangle).unwrap();
        for _ in 0..3 {
            assert_eq!(area.apply(&rectangle).unwrap(), first);
        }
    }

    #[test]
    fn fold_fails_on_unhandled_tag() {
        let f = fold(Handlers::<Square, u32>::new().on_tag("circle", |_| 1));
        assert_eq!(
            f.apply(&Square).unwrap_err(),
            FoldError::Unhandled {
                tag: "square".to_owned()
            }
        );
    }

    #[test]
    fn empty_fold_reports_the_tag_of_every_value() {
        let nothing = fold(Handlers::<Shape, ()>::new());
        for shape in &[
            Shape::Circle(Circle { r: 1.0 }),
            Shape::Rectangle(Rectangle { w: 1.0, h: 1.0 }),
        ] {
            assert_eq!(
                nothing.apply(shape),
                Err(FoldError::Unhandled {
                    tag: shape.tag().to_owned()
                })
            );
        }
    }

    #[test]
    fn fold_with_missing_handler_fails_only_for_that_case() {
        let perimeter = fold(Handlers::new().on(|r: &Rectangle| 2.0 * (r.w + r.h)));
        let rectangle = Shape::Rectangle(Rectangle { w: 1.0, h: 2.0 });
        let circle = Shape::Circle(Circle { r: 1.0 });

        assert_eq!(perimeter.apply(&rectangle).unwrap(), 6.0);
        assert!(matches!(
            perimeter.apply(&circle),
            Err(FoldError::Unhandled { tag }) if tag == "circle"
        ));
    }

    #[test]
    fn exhaustive_fold_reports_missing_cases() {
        let handlers = Handlers::<Shape, f64>::new().on(|c: &Circle| c.r);
        assert_eq!(handlers.missing(), vec!["rectangle"]);
        assert_eq!(
            Fold::exhaustive(handlers).unwrap_err(),
            FoldError::MissingHandlers {
                missing: vec!["rectangle"]
            }
        );
        assert!(Fold::exhaustive(
            Handlers::<Shape, f64>::new()
                .on(|c: &Circle| c.r)
                .on(|r: &Rectangle| r.w)
        )
        .is_ok());
    }

    #[test]
    fn partial_fold_falls_back_to_default() {
        let is_circle = partial_fold(Handlers::new().on(|_: &Circle| true), |_: Option<&Shape>| {
            false
        });
        assert!(is_circle.apply(&Shape::Circle(Circle { r: 10.0 })));
        assert!(!is_circle.apply(&Shape::Rectangle(Rectangle { w: 10.0, h: 20.0 })));
    }

    #[test]
    fn partial_fold_default_sees_the_value() {
        let describe = partial_fold(
            Handlers::new().on(|c: &Circle| format!("circle of radius {}", c.r)),
            |value: Option<&Shape>| match value {
                Some(value) => format!("some {}", value.tag()),
                None => "nothing".to_owned(),
            },
        );
        let rectangle = Shape::Rectangle(Rectangle { w: 1.0, h: 1.0 });

        assert_eq!(describe.apply(&Shape::Circle(Circle { r: 2.0 })), "circle of radius 2");
        assert_eq!(describe.apply(&rectangle), "some rectangle");
        assert_eq!(describe.apply_default(), "nothing");
    }

    #[test]
    fn partial_fold_never_fails_on_unknown_tag() {
        let f = partial_fold(Handlers::<Square, bool>::new(), |_| false);
        assert!(!f.apply(&Square));
    }

    #[test]
    fn tag_handlers_receive_the_tagged_value() {
        let tags = fold(
            Handlers::<Shape, String>::new()
                .on_tag("circle", |s| s.tag().to_uppercase())
                .on_tag("rectangle", |s| s.tag().to_owned()),
        );
        let circle = Shape::Circle(Circle { r: 1.0 });
        assert_eq!(tags.apply(&circle).unwrap(), "CIRCLE");
        assert_eq!(circle.fold_with(&tags).unwrap(), "CIRCLE");
    }

    #[test]
    fn later_handler_replaces_earlier() {
        let f = fold(
            Handlers::<Shape, u8>::new()
                .on_tag("circle", |_| 1)
                .on(|_: &Circle| 2),
        );
        assert_eq!(f.apply(&Shape::Circle(Circle { r: 1.0 })).unwrap(), 2);
        assert!(f.handles("circle"));
        assert!(!f.handles("rectangle"));
    }

    #[test]
    fn fold_and_partial_fold_agree_on_handled_cases() {
        let handlers = || Handlers::<Shape, f64>::new().on(|r: &Rectangle| r.w * r.h);
        let complete = fold(handlers());
        let partial = partial_fold(handlers(), |_| -1.0);
        let rectangle = Shape::Rectangle(Rectangle { w: 2.0, h: 5.0 });
        let circle = Shape::Circle(Circle { r: 1.0 });

        assert_eq!(complete.apply(&rectangle).unwrap(), partial.apply(&rectangle));
        assert!(complete.apply(&circle).is_err());
        assert_eq!(partial.apply(&circle), -1.0);
        assert_eq!(circle.partial_fold_with(&partial), -1.0);
    }

    #[test]
    fn fold_collects_over_many_values() {
        let area = area();
        let shapes = vec![
            Shape::Rectangle(Rectangle { w: 1.0, h: 2.0 }),
            Shape::Rectangle(Rectangle { w: 3.0, h: 4.0 }),
        ];
        let areas: Result<Vec<f64>, FoldError> = shapes.iter().map(|shape| area.apply(shape)).collect();
        assert_eq!(areas.unwrap(), vec![2.0, 12.0]);
    }

    #[test]
    fn debug_lists_handled_tags() {
        let handlers = Handlers::<Shape, ()>::new()
            .on_tag("rectangle", |_| ())
            .on_tag("circle", |_| ());
        assert_eq!(
            format!("{:?}", handlers),
            r#"Handlers { tags: ["circle", "rectangle"] }"#
        );
    }
}
