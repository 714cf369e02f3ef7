//! Resolution of property values from defaults and user configuration.

use super::definitions::ALL_PROPERTIES;
use super::types::{Property, PropertyDef};
use super::value::{FromPropertyValue, PropertyValue};
use crate::{ConfigError, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Look up a property definition by canonical name or alias.
pub fn find_property(name: &str) -> Option<&'static PropertyDef> {
    ALL_PROPERTIES.iter().find(|def| def.matches(name))
}

/// Property values resolved against their defaults.
///
/// Only explicitly set values are stored; everything else reads through to
/// the property default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedProperties {
    values: HashMap<&'static str, PropertyValue>,
}

impl ResolvedProperties {
    /// Create a set of properties where every value is its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a YAML document.
    ///
    /// The document is a mapping from property names (or aliases) to values.
    /// Nested mappings are joined with `/`, so `accretion: {fd: 0.4}` sets
    /// `accretion/fd`.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let mut props = Self::new();
        props.merge_yaml_str(yaml)?;
        Ok(props)
    }

    /// Read and parse a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!("Loading properties from {}", path.as_ref().display());
        Self::from_yaml_str(&content)
    }

    /// Overlay the values of a YAML document onto this set.
    pub fn merge_yaml_str(&mut self, yaml: &str) -> Result<()> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        match value {
            serde_yaml::Value::Null => Ok(()),
            serde_yaml::Value::Mapping(map) => self.merge_mapping("", &map),
            _ => Err(ConfigError::NotAMapping),
        }
    }

    /// Overlay a mapping of already-parsed values (e.g. from a sweep plan).
    pub fn merge_values<'a>(
        &mut self,
        values: impl IntoIterator<Item = (&'a String, &'a PropertyValue)>,
    ) -> Result<()> {
        for (name, value) in values {
            self.set(name, value.clone())?;
        }
        Ok(())
    }

    fn merge_mapping(&mut self, prefix: &str, map: &serde_yaml::Mapping) -> Result<()> {
        for (key, value) in map {
            let key = match key {
                serde_yaml::Value::String(s) => s.clone(),
                other => serde_yaml::to_string(other)?.trim().to_string(),
            };
            let name = if prefix.is_empty() {
                key
            } else {
                format!("{}/{}", prefix, key)
            };
            match value {
                serde_yaml::Value::Mapping(inner) => self.merge_mapping(&name, inner)?,
                _ => {
                    let parsed: PropertyValue =
                        serde_yaml::from_value(value.clone()).map_err(|_| {
                            type_mismatch(&name, &format!("{:?}", value))
                        })?;
                    self.set(&name, parsed)?;
                }
            }
        }
        Ok(())
    }

    /// Apply a `key=value` override.
    pub fn apply_override(&mut self, assignment: &str) -> Result<()> {
        let (name, raw) = assignment
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidOverride(assignment.to_string()))?;
        self.set(name.trim(), PropertyValue::parse_literal(raw))
    }

    /// Set a property by name or alias, checking the value type.
    pub fn set(&mut self, name: &str, value: PropertyValue) -> Result<()> {
        let def = find_property(name)
            .ok_or_else(|| ConfigError::UnknownProperty(name.to_string()))?;
        if !def.value_type.matches(&value) {
            return Err(ConfigError::TypeMismatch {
                name: def.name,
                expected: def.value_type.to_string(),
                found: value.to_string(),
            });
        }
        self.values.insert(def.name, def.value_type.coerce(value));
        Ok(())
    }

    /// Set a typed property.
    pub fn set_property<T: Into<PropertyValue>>(&mut self, prop: &Property<T>, value: T) -> Result<()> {
        self.set(prop.name(), value.into())
    }

    /// Get a typed property value, falling back to the default.
    pub fn get<T: FromPropertyValue + Default>(&self, prop: &Property<T>) -> T {
        self.values
            .get(prop.name())
            .and_then(T::from_property_value)
            .or_else(|| T::from_property_value(&prop.def().default_value()))
            .unwrap_or_default()
    }

    /// Raw value of a property (explicit or default) by name or alias.
    pub fn get_value(&self, name: &str) -> Option<PropertyValue> {
        let def = find_property(name)?;
        Some(
            self.values
                .get(def.name)
                .cloned()
                .unwrap_or_else(|| def.default_value()),
        )
    }

    /// Whether a property was explicitly set.
    pub fn is_set(&self, name: &str) -> bool {
        find_property(name).is_some_and(|def| self.values.contains_key(def.name))
    }

    /// Every property with its resolved value, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static PropertyDef, PropertyValue)> + '_ {
        ALL_PROPERTIES.iter().map(move |def| {
            let value = self
                .values
                .get(def.name)
                .cloned()
                .unwrap_or_else(|| def.default_value());
            (def, value)
        })
    }
}

fn type_mismatch(name: &str, found: &str) -> ConfigError {
    match find_property(name) {
        Some(def) => ConfigError::TypeMismatch {
            name: def.name,
            expected: def.value_type.to_string(),
            found: found.to_string(),
        },
        None => ConfigError::UnknownProperty(name.to_string()),
    }
}
