//! Property type definitions and metadata.
//!
//! This module provides:
//! - [`PropertyBaseType`] - The base type of a property value
//! - [`PropertyDefault`] - Default values usable in const contexts
//! - [`PropertyDef`] - Property metadata for runtime operations
//! - [`Property<T>`] - Type-safe property definition with compile-time type info

use super::value::PropertyValue;
use std::marker::PhantomData;

// ============================================================================
// Property Base Type
// ============================================================================

/// The base type of a property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyBaseType {
    /// Integer value (i64).
    Integer,
    /// Floating point value (f64).
    Float,
}

impl PropertyBaseType {
    /// Check if a PropertyValue can be stored under this type.
    pub fn matches(&self, value: &PropertyValue) -> bool {
        match (self, value) {
            (PropertyBaseType::Integer, PropertyValue::Integer(_)) => true,
            // Whole floats are accepted as integers ("nourishment_frequency: 5.0")
            (PropertyBaseType::Integer, PropertyValue::Float(f)) => f.fract() == 0.0,
            (PropertyBaseType::Float, PropertyValue::Float(_)) => true,
            (PropertyBaseType::Float, PropertyValue::Integer(_)) => true,
            _ => false,
        }
    }

    /// Normalize a matching value to the canonical variant for this type.
    pub(crate) fn coerce(&self, value: PropertyValue) -> PropertyValue {
        match (self, value) {
            (PropertyBaseType::Integer, PropertyValue::Float(f)) => PropertyValue::Integer(f as i64),
            (PropertyBaseType::Float, PropertyValue::Integer(i)) => PropertyValue::Float(i as f64),
            (_, v) => v,
        }
    }
}

impl std::fmt::Display for PropertyBaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyBaseType::Integer => write!(f, "integer"),
            PropertyBaseType::Float => write!(f, "float"),
        }
    }
}

// ============================================================================
// Property Default (const-compatible)
// ============================================================================

/// The default value for a property, usable in const contexts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyDefault {
    /// Integer value (i64).
    Integer(i64),
    /// Floating point value (f64).
    Float(f64),
}

impl PropertyDefault {
    /// Convert to a PropertyValue.
    pub fn to_value(self) -> PropertyValue {
        match self {
            PropertyDefault::Integer(v) => PropertyValue::Integer(v),
            PropertyDefault::Float(v) => PropertyValue::Float(v),
        }
    }

    const fn base_type(&self) -> PropertyBaseType {
        match self {
            PropertyDefault::Integer(_) => PropertyBaseType::Integer,
            PropertyDefault::Float(_) => PropertyBaseType::Float,
        }
    }
}

impl std::fmt::Display for PropertyDefault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyDefault::Integer(v) => write!(f, "{}", v),
            PropertyDefault::Float(v) => write!(f, "{}", v),
        }
    }
}

// ============================================================================
// Property Definition (Runtime Metadata)
// ============================================================================

/// Property metadata without type information.
///
/// Used for YAML parsing, override handling and the property listing.
#[derive(Debug, Clone, Copy)]
pub struct PropertyDef {
    /// Full property name including namespace (e.g., "accretion/c_flood").
    pub name: &'static str,
    /// Human-readable description of the property.
    pub description: &'static str,
    /// The base type of the property.
    pub value_type: PropertyBaseType,
    /// Default value for this property.
    pub default: PropertyDefault,
    /// Optional unit string (e.g., "m", "kg/m^3").
    pub unit: Option<&'static str>,
    /// Optional aliases for this property (e.g., "c_flood" for "accretion/c_flood").
    pub aliases: &'static [&'static str],
}

impl PartialEq for PropertyDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for PropertyDef {}

impl std::hash::Hash for PropertyDef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PropertyDef {
    /// Check if this property matches a given name (including aliases).
    pub fn matches(&self, name: &str) -> bool {
        if self.name == name {
            return true;
        }
        self.aliases.iter().any(|alias| *alias == name)
    }

    /// Get the namespace of this property (everything before the last '/').
    pub fn namespace(&self) -> Option<&str> {
        self.name.rfind('/').map(|idx| &self.name[..idx])
    }

    /// Get the short name of this property (everything after the last '/').
    pub fn short_name(&self) -> &str {
        self.name
            .rfind('/')
            .map(|idx| &self.name[idx + 1..])
            .unwrap_or(self.name)
    }

    /// Get the default value as a PropertyValue.
    pub fn default_value(&self) -> PropertyValue {
        self.default.to_value()
    }
}

// ============================================================================
// Type-Safe Property Definition
// ============================================================================

/// A type-safe property definition.
///
/// Combines the property metadata with compile-time type information for the
/// value type `T`, so that reading a property needs no unwrapping.
///
/// ```
/// use marsh_model::properties::{ResolvedProperties, ACCRETION_RHO_DEPOSIT};
///
/// let props = ResolvedProperties::new();
/// let rho: f64 = props.get(&ACCRETION_RHO_DEPOSIT);
/// assert!(rho > 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Property<T> {
    pub(crate) def: PropertyDef,
    _value_type: PhantomData<T>,
}

impl<T> Property<T> {
    /// Create a new property definition with type inferred from default.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        default: PropertyDefault,
    ) -> Self {
        Self {
            def: PropertyDef {
                name,
                description,
                value_type: default.base_type(),
                default,
                unit: None,
                aliases: &[],
            },
            _value_type: PhantomData,
        }
    }

    /// Set the unit for this property (const-compatible).
    pub const fn with_unit(mut self, unit: &'static str) -> Self {
        self.def.unit = Some(unit);
        self
    }

    /// Set aliases for this property (const-compatible).
    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.def.aliases = aliases;
        self
    }

    pub const fn name(&self) -> &'static str {
        self.def.name
    }

    pub const fn description(&self) -> &'static str {
        self.def.description
    }

    pub const fn unit(&self) -> Option<&'static str> {
        self.def.unit
    }

    /// Get the internal property definition.
    pub const fn def(&self) -> &PropertyDef {
        &self.def
    }
}

impl<T> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.def == other.def
    }
}

impl<T> Eq for Property<T> {}
