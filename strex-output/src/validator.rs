//! Post-decode validators.
//!
//! A validator turns decoded data into a stricter, application-defined
//! structure. Validators never fail as a whole: every problem is returned
//! alongside whatever could be cleaned. For repeatable data each item is
//! validated on its own, so some items may pass while others fail.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::marker::PhantomData;
use std::sync::Arc;
use strex_core::Object;

use crate::error::ValidationError;
use crate::shape::shape_by_schema;

/// Cleaned data (if any) plus every error encountered.
pub type CleanedData = (Option<JsonValue>, Vec<ValidationError>);

/// Validates and cleans decoded data.
pub trait Validator: Send + Sync {
    /// Clean `data`, the decoded value under the schema's root id.
    ///
    /// Must not panic on bad input; failures are reported in the returned
    /// error list.
    fn clean_data(&self, data: &JsonValue) -> CleanedData;
}

impl<T: Validator + ?Sized> Validator for Arc<T> {
    fn clean_data(&self, data: &JsonValue) -> CleanedData {
        (**self).clean_data(data)
    }
}

impl<T: Validator + ?Sized> Validator for Box<T> {
    fn clean_data(&self, data: &JsonValue) -> CleanedData {
        (**self).clean_data(data)
    }
}

/// Split data into the items to validate.
fn items(data: JsonValue) -> Vec<JsonValue> {
    match data {
        JsonValue::Array(items) => items,
        JsonValue::Null => Vec::new(),
        other => vec![other],
    }
}

/// Pick the single value to validate from data that may be list-wrapped.
fn single(data: JsonValue) -> Result<JsonValue, ValidationError> {
    match data {
        JsonValue::Array(mut items) if items.len() == 1 => Ok(items.remove(0)),
        JsonValue::Array(items) => Err(ValidationError::shape(format!(
            "expected a single value, got a list of {}",
            items.len()
        ))),
        JsonValue::Null => Err(ValidationError::shape("expected a value, got nothing")),
        other => Ok(other),
    }
}

/// Validates data by deserializing it into `T`.
///
/// With a schema attached, decoded data is first shaped by the schema (see
/// [`shape_by_schema`]) so that tag-decoded text lists deserialize into
/// plain scalar, number and bool fields.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use serde_json::json;
/// use strex_core::{Number, Object, Text};
/// use strex_output::SerdeValidator;
///
/// #[derive(Debug, Serialize, Deserialize, PartialEq)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// let schema = Object::new("person")
///     .unwrap()
///     .with_many(true)
///     .with_attribute(Text::new("name").unwrap())
///     .with_attribute(Number::new("age").unwrap());
///
/// let validator = SerdeValidator::<Person>::for_schema(schema);
/// let (people, errors) = validator.clean_typed(&json!([
///     {"name": ["Alice"], "age": ["30"]},
///     {"name": ["Bob"], "age": ["old"]},
/// ]));
///
/// assert_eq!(people, vec![Person { name: "Alice".into(), age: 30 }]);
/// assert_eq!(errors.len(), 1);
/// ```
pub struct SerdeValidator<T> {
    many: bool,
    schema: Option<Object>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for SerdeValidator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerdeValidator")
            .field("type", &std::any::type_name::<T>())
            .field("many", &self.many)
            .field("schema", &self.schema.as_ref().map(|s| s.id().as_str()))
            .finish()
    }
}

impl<T> Default for SerdeValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SerdeValidator<T> {
    /// Create a validator for a single value.
    #[must_use]
    pub fn new() -> Self {
        Self {
            many: false,
            schema: None,
            _marker: PhantomData,
        }
    }

    /// Create a validator that shapes data with `schema` first.
    ///
    /// Repetition follows the schema's `many` flag.
    #[must_use]
    pub fn for_schema(schema: Object) -> Self {
        Self {
            many: schema.is_many(),
            schema: Some(schema),
            _marker: PhantomData,
        }
    }

    /// Set whether the data is a list of items.
    #[must_use]
    pub fn many(mut self, many: bool) -> Self {
        self.many = many;
        self
    }

    /// Whether items are validated one by one.
    #[must_use]
    pub fn is_many(&self) -> bool {
        self.many
    }
}

impl<T: DeserializeOwned> SerdeValidator<T> {
    /// Validate into typed values.
    ///
    /// Returns every item that deserialized, and one error per item that
    /// did not.
    pub fn clean_typed(&self, data: &JsonValue) -> (Vec<T>, Vec<ValidationError>) {
        let shaped = match &self.schema {
            Some(schema) => shape_by_schema(schema, data),
            None => data.clone(),
        };

        let mut values = Vec::new();
        let mut errors = Vec::new();

        if self.many {
            for (index, item) in items(shaped).into_iter().enumerate() {
                match serde_json::from_value::<T>(item) {
                    Ok(value) => values.push(value),
                    Err(e) => errors.push(ValidationError::deserialize(Some(index), e)),
                }
            }
        } else {
            match single(shaped).and_then(|value| {
                serde_json::from_value::<T>(value).map_err(|e| ValidationError::deserialize(None, e))
            }) {
                Ok(value) => values.push(value),
                Err(e) => errors.push(e),
            }
        }

        (values, errors)
    }
}

impl<T> Validator for SerdeValidator<T>
where
    T: DeserializeOwned + Serialize,
{
    fn clean_data(&self, data: &JsonValue) -> CleanedData {
        let (values, mut errors) = self.clean_typed(data);
        let mut cleaned = Vec::with_capacity(values.len());
        for value in values {
            match serde_json::to_value(&value) {
                Ok(json) => cleaned.push(json),
                Err(e) => errors.push(ValidationError::failed(e.to_string())),
            }
        }

        let data = if self.many {
            Some(JsonValue::Array(cleaned))
        } else {
            cleaned.into_iter().next()
        };
        (data, errors)
    }
}

/// Validates data with a closure, item by item when `many` is set.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex_output::{FnValidator, ValidationError, Validator};
///
/// let validator = FnValidator::new(|item: &serde_json::Value| {
///     item.get("name")
///         .cloned()
///         .ok_or_else(|| ValidationError::failed("missing name"))
/// })
/// .many(true);
///
/// let (data, errors) = validator.clean_data(&json!([{"name": ["a"]}, {}]));
/// assert_eq!(data, Some(json!([["a"]])));
/// assert_eq!(errors.len(), 1);
/// ```
pub struct FnValidator<F> {
    func: F,
    many: bool,
}

impl<F> FnValidator<F>
where
    F: Fn(&JsonValue) -> Result<JsonValue, ValidationError> + Send + Sync,
{
    /// Create a validator for a single value.
    pub fn new(func: F) -> Self {
        Self { func, many: false }
    }

    /// Set whether the data is a list of items.
    #[must_use]
    pub fn many(mut self, many: bool) -> Self {
        self.many = many;
        self
    }
}

impl<F> std::fmt::Debug for FnValidator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValidator").field("many", &self.many).finish()
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&JsonValue) -> Result<JsonValue, ValidationError> + Send + Sync,
{
    fn clean_data(&self, data: &JsonValue) -> CleanedData {
        if !self.many {
            return match (self.func)(data) {
                Ok(value) => (Some(value), Vec::new()),
                Err(e) => (None, vec![e]),
            };
        }

        let mut cleaned = Vec::new();
        let mut errors = Vec::new();
        for item in items(data.clone()) {
            match (self.func)(&item) {
                Ok(value) => cleaned.push(value),
                Err(e) => errors.push(e),
            }
        }
        (Some(JsonValue::Array(cleaned)), errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use strex_core::{Number, Text};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Toy {
        name: String,
        price: f64,
    }

    fn toy_schema(many: bool) -> Object {
        Object::new("toy")
            .unwrap()
            .with_many(many)
            .with_attribute(Text::new("name").unwrap())
            .with_attribute(Number::new("price").unwrap())
    }

    #[test]
    fn test_serde_validator_single() {
        let validator = SerdeValidator::<Toy>::new();
        let (data, errors) = validator.clean_data(&json!({"name": "ball", "price": 2.5}));
        assert!(errors.is_empty());
        assert_eq!(data, Some(json!({"name": "ball", "price": 2.5})));
    }

    #[test]
    fn test_serde_validator_single_unwraps_one_element_list() {
        let validator = SerdeValidator::<Toy>::new();
        let (data, errors) = validator.clean_data(&json!([{"name": "ball", "price": 1.0}]));
        assert!(errors.is_empty());
        assert_eq!(data, Some(json!({"name": "ball", "price": 1.0})));
    }

    #[test]
    fn test_serde_validator_single_failure() {
        let validator = SerdeValidator::<Toy>::new();
        let (data, errors) = validator.clean_data(&json!({"name": "ball"}));
        assert_eq!(data, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].index(), None);
    }

    #[test]
    fn test_serde_validator_rejects_ambiguous_list() {
        let validator = SerdeValidator::<Toy>::new();
        let (data, errors) = validator.clean_data(&json!([{}, {}]));
        assert_eq!(data, None);
        assert!(matches!(errors[0], ValidationError::Shape(_)));
    }

    #[test]
    fn test_serde_validator_many_partial_success() {
        let validator = SerdeValidator::<Toy>::new().many(true);
        let (data, errors) = validator.clean_data(&json!([
            {"name": "ball", "price": 1.0},
            {"name": "kite"},
            {"name": "yo-yo", "price": 3.0}
        ]));
        assert_eq!(
            data,
            Some(json!([
                {"name": "ball", "price": 1.0},
                {"name": "yo-yo", "price": 3.0}
            ]))
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].index(), Some(1));
    }

    #[test]
    fn test_serde_validator_with_schema_shapes_tag_data() {
        let validator = SerdeValidator::<Toy>::for_schema(toy_schema(true));
        assert!(validator.is_many());
        let (toys, errors) = validator.clean_typed(&json!([
            {"name": ["ball"], "price": ["1.5"]},
            {"name": ["kite"], "price": ["cheap"]}
        ]));
        assert_eq!(toys, vec![Toy { name: "ball".into(), price: 1.5 }]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_serde_validator_with_single_schema() {
        let validator = SerdeValidator::<Toy>::for_schema(toy_schema(false));
        let (data, errors) = validator.clean_data(&json!([{"name": ["ball"], "price": ["2"]}]));
        assert!(errors.is_empty());
        assert_eq!(data, Some(json!({"name": "ball", "price": 2.0})));
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_single_schema_reports_extra_values() {
        let schema = Object::new("p")
            .unwrap()
            .with_attribute(Text::new("name").unwrap());
        let validator = SerdeValidator::<Named>::for_schema(schema);

        let (data, errors) =
            validator.clean_data(&json!([{"name": ["Ann", "Bob"]}, {"name": ["Tom"]}]));
        assert_eq!(data, None);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::Shape(_)));

        let (data, errors) = validator.clean_data(&json!([{"name": ["Ann", "Bob"]}]));
        assert_eq!(data, None);
        assert!(matches!(errors[0], ValidationError::Deserialize { .. }));
    }

    #[test]
    fn test_fn_validator_single() {
        let validator = FnValidator::new(|value: &JsonValue| {
            if value.is_object() {
                Ok(value.clone())
            } else {
                Err(ValidationError::failed("not an object"))
            }
        });
        assert_eq!(validator.clean_data(&json!({})).0, Some(json!({})));
        let (data, errors) = validator.clean_data(&json!(3));
        assert_eq!(data, None);
        assert_eq!(errors[0].to_string(), "Validation failed: not an object");
    }
}
