use {
    serde_crate::{
        de::{self, DeserializeOwned},
        ser::SerializeMap,
        Deserialize, Deserializer, Serialize, Serializer,
    },
    serde_json::{Map, Value},
    std::convert::TryFrom,
};

use crate::{DecodeError, Tagged};

/// A tagged value whose payload shape is only known at runtime: a tag plus a JSON object of
/// fields.
///
/// A record is laid out as a flat object whose tag lives in the `"type"` field, e.g.
/// `{"type": "circle", "r": 10}`, which is also how it serializes and deserializes. The tag is
/// kept apart from the fields and can only be read.
///
/// Unions generated by [`adt!`](crate::adt) which derive serde's traits use the same layout, so
/// [`Record::encode`] and [`Record::decode`] move values between the two.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tagfold::{Record, Tagged};
///
/// # fn main() -> Result<(), tagfold::DecodeError> {
/// let circle = Record::from_value(json!({ "type": "circle", "r": 10 }))?;
/// assert_eq!(circle.tag(), "circle");
/// assert_eq!(circle.get("r"), Some(&json!(10)));
/// assert_eq!(circle.to_value(), json!({ "type": "circle", "r": 10 }));
/// # Ok(())
/// # }
/// ```
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    tag: String,
    fields: Map<String, Value>,
}

impl Tagged for Record {
    fn tag(&self) -> &str {
        &self.tag
    }
}

impl Record {
    /// A record tagged `tag` with the given payload.
    ///
    /// The tag always wins: a field named like the tag field is dropped from the payload.
    pub fn new(tag: impl Into<String>, mut fields: Map<String, Value>) -> Self {
        let _ = fields.remove(Record::TAG_FIELD);
        Record {
            tag: tag.into(),
            fields,
        }
    }

    /// A record tagged `tag` with an empty payload.
    pub fn unit(tag: impl Into<String>) -> Self {
        Record::new(tag, Map::new())
    }

    /// The payload fields, without the tag.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// A single payload field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Drop the tag, keeping the payload.
    pub fn into_payload(self) -> Map<String, Value> {
        self.fields
    }

    /// Split the record into its tag and its payload.
    pub fn into_parts(self) -> (String, Map<String, Value>) {
        (self.tag, self.fields)
    }

    /// The flat object representation, with the tag stored in the tag field.
    pub fn to_value(&self) -> Value {
        let mut object = self.fields.clone();
        let _ = object.insert(Record::TAG_FIELD.to_owned(), Value::String(self.tag.clone()));
        Value::Object(object)
    }

    /// Read a record from its flat object representation.
    ///
    /// # Errors
    ///
    /// Fails if `value` is not an object, or if its tag field is missing or isn't a string. The
    /// rest of the object is taken as the payload without any further checks.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        Record::from_value_tagged_by(Record::TAG_FIELD, value)
    }

    fn from_value_tagged_by(tag_field: &'static str, value: Value) -> Result<Self, DecodeError> {
        let mut fields = match value {
            Value::Object(fields) => fields,
            other => return Err(DecodeError::NotAnObject(kind(&other))),
        };
        let tag = match fields.remove(tag_field) {
            Some(Value::String(tag)) => tag,
            Some(other) => {
                return Err(DecodeError::InvalidTag {
                    field: tag_field,
                    found: kind(&other),
                })
            }
            None => return Err(DecodeError::MissingTag(tag_field)),
        };
        // A payload field named like the record's own tag field would be lost
        if fields.contains_key(Record::TAG_FIELD) {
            return Err(DecodeError::ReservedField(Record::TAG_FIELD));
        }
        Ok(Record { tag, fields })
    }

    /// Serialize a union value, such as one generated by [`adt!`](crate::adt) with serde's
    /// derives, into a record.
    ///
    /// The tag is read from the union's own tag field, [`Tagged::TAG_FIELD`], so unions declared
    /// with `#[adt(tag = "...")]` are supported.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`Record::from_value`], fails with [`DecodeError::ReservedField`] if
    /// the union uses another tag field and the payload has a field named `"type"`.
    pub fn encode<T: Tagged + Serialize>(value: &T) -> Result<Self, DecodeError> {
        Record::from_value_tagged_by(T::TAG_FIELD, serde_json::to_value(value)?)
    }

    /// Deserialize this record into a union value, writing the tag into the union's own tag field.
    ///
    /// # Errors
    ///
    /// [`DecodeError::ReservedField`] if the payload already has a field named like the union's
    /// tag field, or [`DecodeError::Json`] if the record doesn't match the union.
    pub fn decode<T: Tagged + DeserializeOwned>(&self) -> Result<T, DecodeError> {
        if self.fields.contains_key(T::TAG_FIELD) {
            return Err(DecodeError::ReservedField(T::TAG_FIELD));
        }
        let mut object = self.fields.clone();
        let _ = object.insert(T::TAG_FIELD.to_owned(), Value::String(self.tag.clone()));
        Ok(serde_json::from_value(Value::Object(object))?)
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        let (tag, mut object) = record.into_parts();
        let _ = object.insert(Record::TAG_FIELD.to_owned(), Value::String(tag));
        Value::Object(object)
    }
}

impl TryFrom<Value> for Record {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Record::from_value(value)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry(Record::TAG_FIELD, &self.tag)?;
        for (field, value) in &self.fields {
            map.serialize_entry(field, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Record::from_value(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn new_adds_tag_to_payload() {
        let circle = Record::new("circle", fields(json!({ "r": 10 })));
        assert_eq!(circle.tag(), "circle");
        assert_eq!(circle.to_value(), json!({ "type": "circle", "r": 10 }));
    }

    #[test]
    fn tag_overrides_payload_field() {
        let circle = Record::new("circle", fields(json!({ "type": "square", "r": 10 })));
        assert_eq!(circle.tag(), "circle");
        assert_eq!(circle.get("type"), None);
        assert_eq!(circle.fields().len(), 1);
    }

    #[test]
    fn from_value_separates_tag() {
        let rectangle = Record::from_value(json!({ "type": "rectangle", "w": 10, "h": 20 }))
            .unwrap();
        assert_eq!(rectangle.tag(), "rectangle");
        assert_eq!(
            rectangle.clone().into_payload(),
            fields(json!({ "w": 10, "h": 20 }))
        );
        assert_eq!(Value::from(rectangle), json!({ "type": "rectangle", "w": 10, "h": 20 }));
    }

    #[test]
    fn from_value_rejects_malformed_input() {
        assert!(matches!(
            Record::from_value(json!([1, 2])),
            Err(DecodeError::NotAnObject("an array"))
        ));
        assert!(matches!(
            Record::from_value(json!({ "r": 10 })),
            Err(DecodeError::MissingTag("type"))
        ));
        assert!(matches!(
            Record::from_value(json!({ "type": 3 })),
            Err(DecodeError::InvalidTag {
                field: "type",
                found: "a number"
            })
        ));
    }

    #[test]
    fn serializes_flat() {
        let record = Record::new("circle", fields(json!({ "r": 10 })));
        let text = serde_json::to_string(&record).unwrap();
        let back: Record = serde_json::from_str(&text).unwrap();
        assert_eq!(back, record);
        assert_eq!(
            serde_json::from_str::<Value>(&text).unwrap(),
            json!({ "type": "circle", "r": 10 })
        );
    }

    #[test]
    fn deserialize_reports_missing_tag() {
        let error = serde_json::from_str::<Record>(r#"{ "r": 10 }"#).unwrap_err();
        assert!(error.to_string().contains("missing tag field `type`"));
    }

    #[test]
    fn unit_records_have_no_fields() {
        let empty = Record::unit("empty");
        assert!(empty.fields().is_empty());
        assert_eq!(empty.to_value(), json!({ "type": "empty" }));
    }
}
