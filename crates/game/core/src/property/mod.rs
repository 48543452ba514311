//! Typed property access consulting the compiled modification overrides.
//!
//! Base values come from an open-key [`PropertyMap`] supplied by content.
//! [`PropertyAccessor`] pairs one such map with the compiler of the object it
//! belongs to, so every read is `compiler(base)`:
//!
//! ```text
//! PropertyMap ── base ──▶ ModificationCompiler ──▶ effective value
//! ```
//!
//! Keys absent from the map read the caller's default, still passed through
//! the compiler. Keys are never validated against a closed set.

mod loader;

use std::collections::HashMap;

use crate::modification::{EnumRegistry, ModificationCompiler};

pub use loader::ValueLoader;

/// A base property value as written in content files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    Boolean(bool),
    Number(f64),
    Text(String),
}

impl PropertyValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Open-key mapping of base property values.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PropertyMap(HashMap<String, PropertyValue>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value (builder pattern).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, PropertyValue)> for PropertyMap {
    fn from_iter<T: IntoIterator<Item = (String, PropertyValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Read-side view of one object's properties through its compiler.
#[derive(Clone, Copy)]
pub struct PropertyAccessor<'a> {
    base: &'a PropertyMap,
    compiler: &'a ModificationCompiler,
}

impl<'a> PropertyAccessor<'a> {
    pub fn new(base: &'a PropertyMap, compiler: &'a ModificationCompiler) -> Self {
        Self { base, compiler }
    }

    pub fn number(&self, key: &str, default: f64) -> f64 {
        let base = self
            .base
            .get(key)
            .and_then(PropertyValue::as_number)
            .unwrap_or(default);
        self.compiler.modify_number(key, base)
    }

    pub fn text(&self, key: &str, default: &'a str) -> &'a str {
        let base = self
            .base
            .get(key)
            .and_then(PropertyValue::as_text)
            .unwrap_or(default);
        self.compiler.modify_string(key, base)
    }

    pub fn boolean(&self, key: &str, default: bool) -> bool {
        let base = self
            .base
            .get(key)
            .and_then(PropertyValue::as_boolean)
            .unwrap_or(default);
        self.compiler.modify_boolean(key, base)
    }

    /// Base text is resolved through the registry first; an unknown base name
    /// keeps `default`. The compiler override is applied on top.
    pub fn enumerated<E: 'static>(&self, registry: &EnumRegistry, key: &str, default: E) -> E {
        let base = self
            .base
            .get(key)
            .and_then(PropertyValue::as_text)
            .and_then(|name| registry.lookup::<E>(name))
            .unwrap_or(default);
        self.compiler.modify_enum(registry, key, base)
    }
}
