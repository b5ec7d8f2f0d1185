//! Structural matching against a model
//!
//! A [`Model`] names the keys an object must carry and, for each key, the
//! [`Schema`] its value must follow. Matching only classifies values along
//! two axes, "is a plain object" and "is an array"; scalar contents are not
//! inspected.
//!
//! # Examples
//!
//! ```
//! use allow::prelude::*;
//! use serde_json::json;
//!
//! let model = Model::new()
//!     .scalar("host")
//!     .object("tls", Model::new().scalar("cert").scalar("key"))
//!     .array("aliases");
//!
//! let allow = Allow::new();
//! let config = Value::from(json!({
//!     "host": "example.org",
//!     "tls": { "cert": "a.pem", "key": "a.key" },
//!     "aliases": ["www"],
//! }));
//! assert!(allow.an_instance_of(&config, &model).is_ok());
//! ```

use crate::engine::{Allow, Chain};
use crate::foundation::{Map, Value, Violation, ViolationKind};
use indexmap::IndexMap;

// ============================================================================
// SCHEMA
// ============================================================================

/// The expected shape of one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Anything that is neither a plain object nor an array.
    Scalar,
    /// Any array; elements are not inspected.
    Array,
    /// An array whose every element follows the inner schema.
    ArrayOf(Box<Schema>),
    /// A plain object matching the nested model.
    Object(Model),
}

impl Schema {
    /// Derives a schema from an example value.
    ///
    /// Objects become [`Schema::Object`], arrays become [`Schema::Array`],
    /// everything else is [`Schema::Scalar`].
    ///
    /// Every object counts as plain here; use [`Allow::model_of`] when the
    /// example holds opaque external objects.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::derive(value, &|_| false)
    }

    fn derive(value: &Value, is_opaque: &dyn Fn(&Value) -> bool) -> Self {
        match value {
            _ if is_opaque(value) => Schema::Scalar,
            Value::Object(map) => Schema::Object(Model::derive(map, is_opaque)),
            Value::Array(_) => Schema::Array,
            _ => Schema::Scalar,
        }
    }

    /// Shorthand for [`Schema::ArrayOf`].
    #[must_use]
    pub fn array_of(element: impl Into<Schema>) -> Self {
        Schema::ArrayOf(Box::new(element.into()))
    }

    fn is_object(&self) -> bool {
        matches!(self, Schema::Object(_))
    }

    fn is_array(&self) -> bool {
        matches!(self, Schema::Array | Schema::ArrayOf(_))
    }
}

impl From<Model> for Schema {
    fn from(model: Model) -> Self {
        Schema::Object(model)
    }
}

// ============================================================================
// MODEL
// ============================================================================

/// The required keys of an object and the shape of each.
///
/// Keys absent from the model are allowed on the supplied object and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    fields: IndexMap<String, Schema>,
}

impl Model {
    /// An empty model; every object matches it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a model from an example object, or `None` if `value` is not
    /// an object.
    ///
    /// ```
    /// use allow::prelude::*;
    /// use serde_json::json;
    ///
    /// let model = Model::from_value(&json!({ "a": 0, "b": { "c": [] } }).into());
    /// assert_eq!(
    ///     model,
    ///     Some(Model::new().scalar("a").object("b", Model::new().array("c"))),
    /// );
    /// ```
    ///
    /// Derived models cannot express opaque fields: an opaque external object
    /// in the example becomes [`Schema::Object`]. [`Allow::model_of`] derives
    /// with the validator's opaque predicate instead.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_object().map(|map| Self::derive(map, &|_| false))
    }

    fn derive(map: &Map, is_opaque: &dyn Fn(&Value) -> bool) -> Self {
        Self {
            fields: map
                .iter()
                .map(|(key, value)| (key.clone(), Schema::derive(value, is_opaque)))
                .collect(),
        }
    }

    /// Requires `name` with the given schema.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<Schema>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    /// Requires `name` holding a scalar.
    #[must_use = "builder methods must be chained or built"]
    pub fn scalar(self, name: impl Into<String>) -> Self {
        self.field(name, Schema::Scalar)
    }

    /// Requires `name` holding any array.
    #[must_use = "builder methods must be chained or built"]
    pub fn array(self, name: impl Into<String>) -> Self {
        self.field(name, Schema::Array)
    }

    /// Requires `name` holding an array of `element`.
    #[must_use = "builder methods must be chained or built"]
    pub fn array_of(self, name: impl Into<String>, element: impl Into<Schema>) -> Self {
        self.field(name, Schema::array_of(element))
    }

    /// Requires `name` holding an object matching `model`.
    #[must_use = "builder methods must be chained or built"]
    pub fn object(self, name: impl Into<String>, model: Model) -> Self {
        self.field(name, Schema::Object(model))
    }

    /// The required keys and their schemas, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.fields.iter().map(|(key, schema)| (key.as_str(), schema))
    }

    /// Number of required keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the model has no required keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// ============================================================================
// MATCHING
// ============================================================================

impl Allow {
    /// Derives a model from an example object, treating values this
    /// validator recognizes as opaque like scalars.
    ///
    /// Returns `None` if `example` is not a plain object.
    pub fn model_of(&self, example: &Value) -> Option<Model> {
        if !self.is_plain_object(example) {
            return None;
        }
        let is_opaque = |value: &Value| self.is_opaque(value);
        example.as_object().map(|map| Model::derive(map, &is_opaque))
    }

    /// Requires a plain object that follows `model`.
    ///
    /// Every model key is scanned. A key whose value disagrees with the model
    /// on object-ness or array-ness is reported immediately as
    /// [`ViolationKind::ShapeMismatch`]; nested objects are matched
    /// recursively. Absent keys are only recorded, and a single
    /// [`ViolationKind::MissingKey`] is reported once the scan completes.
    pub fn an_instance_of(&self, supplied: &Value, model: &Model) -> Chain<'_> {
        self.an_object(supplied, ..)?;
        let Some(fields) = supplied.as_object() else {
            return Ok(self);
        };

        let mut a_key_is_missing = false;
        for (key, schema) in model.fields() {
            match fields.get(key) {
                Some(value) => self.match_shape(supplied, value, schema)?,
                None => a_key_is_missing = true,
            }
        }

        if a_key_is_missing {
            self.fail(supplied, ViolationKind::MissingKey)?;
        }
        Ok(self)
    }

    /// Matches `value` (held by `holder`) against `schema`.
    fn match_shape(&self, holder: &Value, value: &Value, schema: &Schema) -> Result<(), Violation> {
        let same_object_axis = self.is_plain_object(value) == schema.is_object();
        let same_array_axis = value.is_array() == schema.is_array();
        if !(same_object_axis && same_array_axis) {
            self.fail(holder, ViolationKind::ShapeMismatch)?;
            return Ok(());
        }

        match (schema, value) {
            (Schema::Object(nested), _) => {
                self.an_instance_of(value, nested)?;
            }
            (Schema::ArrayOf(element), Value::Array(items)) => {
                for item in items {
                    self.match_shape(value, item, element)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}
