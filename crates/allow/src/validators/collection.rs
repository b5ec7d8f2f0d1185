//! Array predicates
//!
//! Every `an_array_of_*` predicate first requires an array, then applies an
//! element predicate to each item, then checks the array length. A null
//! collection under an enabled null-bypass skips the element scan entirely.

use crate::engine::{Allow, Chain};
use crate::foundation::{Expected, LengthBounds, Value, Violation, ViolationKind};
use crate::validators::structure::Model;
use std::ops::RangeBounds;

impl Allow {
    /// Requires an array whose length lies inside `length`.
    pub fn an_array(&self, value: &Value, length: impl RangeBounds<usize>) -> Chain<'_> {
        let bounds = self.length_bounds(&length)?;
        match value {
            Value::Array(items) => self.check_length(value, items.len(), bounds),
            _ => self.fail(value, ViolationKind::TypeMismatch(Expected::Array)),
        }
    }

    /// Requires an array of arrays.
    pub fn an_array_of_arrays(&self, value: &Value, length: impl RangeBounds<usize>) -> Chain<'_> {
        self.each_element(value, &length, |item| self.an_array(item, ..))
    }

    /// Requires an array of integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use allow::prelude::*;
    /// use serde_json::json;
    ///
    /// let allow = Allow::new();
    /// assert!(allow.an_array_of_integers(&json!([1, 2, 3]).into(), ..).is_ok());
    ///
    /// let err = allow.an_array_of_integers(&json!([1, 2, "x"]).into(), ..).unwrap_err();
    /// assert_eq!(err.to_string(), "[x] is not an integer");
    /// ```
    pub fn an_array_of_integers(
        &self,
        value: &Value,
        length: impl RangeBounds<usize>,
    ) -> Chain<'_> {
        self.each_element(value, &length, |item| self.an_integer(item, ..))
    }

    /// Requires an array of numbers.
    pub fn an_array_of_numbers(&self, value: &Value, length: impl RangeBounds<usize>) -> Chain<'_> {
        self.each_element(value, &length, |item| self.a_number(item, ..))
    }

    /// Requires an array of strings.
    pub fn an_array_of_strings(&self, value: &Value, length: impl RangeBounds<usize>) -> Chain<'_> {
        self.each_element(value, &length, |item| self.a_string(item, ..))
    }

    /// Requires an array of plain objects.
    ///
    /// The scan stops at the first opaque external object, which is reported
    /// as [`ViolationKind::ContainsOpaqueObject`].
    pub fn an_array_of_objects(&self, value: &Value, length: impl RangeBounds<usize>) -> Chain<'_> {
        let Some((items, bounds)) = self.elements(value, &length)? else {
            return Ok(self);
        };
        for item in items {
            if self.is_opaque(item) {
                self.fail(item, ViolationKind::ContainsOpaqueObject)?;
                break;
            }
            self.an_object(item, ..)?;
        }
        self.check_length(value, items.len(), bounds)
    }

    /// Requires an array whose every element matches `model`.
    pub fn an_array_of_instances(
        &self,
        value: &Value,
        model: &Model,
        length: impl RangeBounds<usize>,
    ) -> Chain<'_> {
        self.each_element(value, &length, |item| self.an_instance_of(item, model))
    }

    /// Requires an array of opaque external objects.
    pub fn an_array_of_opaque_objects(
        &self,
        value: &Value,
        length: impl RangeBounds<usize>,
    ) -> Chain<'_> {
        self.each_element(value, &length, |item| self.an_opaque_object(item))
    }

    // ------------------------------------------------------------------------
    // shared helpers
    // ------------------------------------------------------------------------

    fn each_element<'a, F>(
        &'a self,
        value: &Value,
        length: &impl RangeBounds<usize>,
        mut check: F,
    ) -> Chain<'a>
    where
        F: FnMut(&Value) -> Chain<'a>,
    {
        let Some((items, bounds)) = self.elements(value, length)? else {
            return Ok(self);
        };
        for item in items {
            check(item)?;
        }
        self.check_length(value, items.len(), bounds)
    }

    /// The items to scan, or `None` when there is nothing to scan: a null
    /// collection under the null-bypass, or a non-array whose violation the
    /// failure behavior swallowed.
    fn elements<'v>(
        &self,
        value: &'v Value,
        length: &impl RangeBounds<usize>,
    ) -> Result<Option<(&'v [Value], LengthBounds)>, Violation> {
        self.an_array(value, ..)?;
        let bounds = self.length_bounds(length)?;
        if self.bypasses(value) {
            return Ok(None);
        }
        Ok(value.as_array().map(|items| (items, bounds)))
    }
}
