use {
    serde_json::{Map, Value},
    std::{borrow::Cow, slice},
};

use crate::{Cases, ConstructError, Record, Tagged};

/// A constructor for one case of a record union: it stamps its tag onto a payload.
///
/// A constructor can be made for any tag at all; nothing checks that the tag belongs to some
/// union. To restrict construction to a known set of cases, look constructors up in a
/// [`Constructors`] table instead.
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    tag: Cow<'static, str>,
}

impl Constructor {
    /// A constructor for the case `tag`.
    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Constructor { tag: tag.into() }
    }

    /// The tag this constructor stamps.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Tag `payload` with this constructor's case.
    ///
    /// # Errors
    ///
    /// [`ConstructError::ReservedField`] if the payload already has a field named like the tag
    /// field: the tag is supplied by the constructor, never by the payload.
    pub fn construct(&self, payload: Map<String, Value>) -> Result<Record, ConstructError> {
        if payload.contains_key(Record::TAG_FIELD) {
            return Err(ConstructError::ReservedField {
                tag: self.tag.clone().into_owned(),
                field: Record::TAG_FIELD,
            });
        }
        Ok(Record::new(self.tag.clone().into_owned(), payload))
    }
}

/// A table of record constructors, one per case, built once from a list of case names.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tagfold::{Constructors, Tagged};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let shape = Constructors::new(vec!["circle", "rectangle"]);
///
/// let payload = json!({ "r": 10 }).as_object().cloned().unwrap_or_default();
/// let circle = shape.construct("circle", payload.clone())?;
/// assert_eq!(circle.tag(), "circle");
/// assert_eq!(circle.to_value(), json!({ "type": "circle", "r": 10 }));
///
/// assert!(shape.construct("square", payload).is_err());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constructors {
    constructors: Vec<Constructor>,
}

impl Constructors {
    /// A table with one constructor for each distinct name in `cases`, in order of first
    /// appearance.
    pub fn new<I, S>(cases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        let mut constructors: Vec<Constructor> = Vec::new();
        for tag in cases {
            let constructor = Constructor::new(tag);
            if !constructors.contains(&constructor) {
                constructors.push(constructor);
            }
        }
        log::trace!("built constructors for {} cases", constructors.len());
        Constructors { constructors }
    }

    /// A table with one constructor for each case of `T`.
    pub fn of<T: Cases>() -> Self {
        Constructors::new(T::CASES.iter().copied())
    }

    /// The constructor for `tag`.
    ///
    /// # Errors
    ///
    /// [`ConstructError::UnknownCase`] if the table has no constructor for `tag`.
    pub fn get(&self, tag: &str) -> Result<&Constructor, ConstructError> {
        self.constructors
            .iter()
            .find(|constructor| constructor.tag() == tag)
            .ok_or_else(|| ConstructError::UnknownCase {
                tag: tag.to_owned(),
                known: self.tags().map(str::to_owned).collect(),
            })
    }

    /// Tag `payload` with the case `tag`, which must be in the table.
    pub fn construct(&self, tag: &str, payload: Map<String, Value>) -> Result<Record, ConstructError> {
        self.get(tag)?.construct(payload)
    }

    /// Whether the table has a constructor for `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.get(tag).is_ok()
    }

    /// The tags of all constructors, in order.
    pub fn tags(&self) -> impl Iterator<Item = &str> + '_ {
        self.constructors.iter().map(Constructor::tag)
    }

    /// All constructors, in order.
    pub fn iter(&self) -> slice::Iter<'_, Constructor> {
        self.constructors.iter()
    }

    /// The number of constructors.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<'a> IntoIterator for &'a Constructors {
    type Item = &'a Constructor;
    type IntoIter = slice::Iter<'a, Constructor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
