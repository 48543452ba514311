//! Load-time extraction of typed values from a [`PropertyMap`].
//!
//! Definitions built from content read their required settings through a
//! [`ValueLoader`], which turns a missing or malformed key into a
//! [`ConfigurationError`] naming that key.

use std::str::FromStr;

use super::{PropertyMap, PropertyValue};
use crate::error::ConfigurationError;

pub struct ValueLoader<'a> {
    map: &'a PropertyMap,
}

impl<'a> ValueLoader<'a> {
    pub fn new(map: &'a PropertyMap) -> Self {
        Self { map }
    }

    fn require(&self, key: &str) -> Result<&'a PropertyValue, ConfigurationError> {
        self.map
            .get(key)
            .ok_or_else(|| ConfigurationError::MissingProperty { key: key.into() })
    }

    pub fn number(&self, key: &str) -> Result<f64, ConfigurationError> {
        self.require(key)?
            .as_number()
            .ok_or_else(|| ConfigurationError::WrongType {
                key: key.into(),
                expected: "a number",
            })
    }

    pub fn number_or(&self, key: &str, default: f64) -> Result<f64, ConfigurationError> {
        if self.map.contains(key) {
            self.number(key)
        } else {
            Ok(default)
        }
    }

    pub fn positive_number(&self, key: &str) -> Result<f64, ConfigurationError> {
        let value = self.number(key)?;
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigurationError::OutOfRange {
                key: key.into(),
                constraint: "positive",
                value,
            })
        }
    }

    pub fn int(&self, key: &str) -> Result<i32, ConfigurationError> {
        let value = self.number(key)?;
        if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
            return Err(ConfigurationError::WrongType {
                key: key.into(),
                expected: "an integer",
            });
        }
        Ok(value as i32)
    }

    pub fn int_or(&self, key: &str, default: i32) -> Result<i32, ConfigurationError> {
        if self.map.contains(key) {
            self.int(key)
        } else {
            Ok(default)
        }
    }

    pub fn non_negative_int_or(&self, key: &str, default: u32) -> Result<u32, ConfigurationError> {
        if !self.map.contains(key) {
            return Ok(default);
        }
        let value = self.int(key)?;
        u32::try_from(value).map_err(|_| ConfigurationError::OutOfRange {
            key: key.into(),
            constraint: "non-negative",
            value: f64::from(value),
        })
    }

    pub fn positive_int(&self, key: &str) -> Result<u32, ConfigurationError> {
        let value = self.int(key)?;
        if value > 0 {
            Ok(value as u32)
        } else {
            Err(ConfigurationError::OutOfRange {
                key: key.into(),
                constraint: "positive",
                value: f64::from(value),
            })
        }
    }

    pub fn text(&self, key: &str) -> Result<&'a str, ConfigurationError> {
        self.require(key)?
            .as_text()
            .ok_or_else(|| ConfigurationError::WrongType {
                key: key.into(),
                expected: "text",
            })
    }

    pub fn boolean_or(&self, key: &str, default: bool) -> Result<bool, ConfigurationError> {
        match self.map.get(key) {
            None => Ok(default),
            Some(value) => value
                .as_boolean()
                .ok_or_else(|| ConfigurationError::WrongType {
                    key: key.into(),
                    expected: "true or false",
                }),
        }
    }

    /// Reads a text value naming a constant of `E`.
    pub fn enumerated<E: FromStr>(&self, key: &str) -> Result<E, ConfigurationError> {
        let name = self.text(key)?;
        name.parse::<E>()
            .map_err(|_| ConfigurationError::UnknownVariant {
                key: key.into(),
                value: name.into(),
            })
    }
}
