//! Typed model properties.
//!
//! This module provides:
//! - [`Property<T>`] - Type-safe property definition with compile-time type info
//! - [`PropertyValue`] - The dynamic value type stored by the registry
//! - [`ResolvedProperties`] - Defaults overlaid with user configuration
//! - The property definitions themselves (see [`ALL_PROPERTIES`])

mod definitions;
mod registry;
mod types;
mod value;

pub use definitions::*;
pub use registry::{find_property, ResolvedProperties};
pub use types::{Property, PropertyBaseType, PropertyDef, PropertyDefault};
pub use value::{FromPropertyValue, PropertyValue};
