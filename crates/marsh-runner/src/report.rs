//! Rendering reports and the property table.

use crate::Result;
use clap::ValueEnum;
use marsh_model::properties::ResolvedProperties;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Serialization format of reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Serialize a value in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

/// Write rendered output to a file, or to stdout when no path is given.
pub fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("Wrote {}", path.display());
        }
        None => println!("{}", rendered.trim_end()),
    }
    Ok(())
}

/// Table of every property with its resolved value, unit and description.
///
/// Values that differ from the default are marked with `*`.
pub fn property_table(props: &ResolvedProperties) -> String {
    let rows: Vec<(String, String, &str, &str)> = props
        .iter()
        .map(|(def, value)| {
            let marker = if props.is_set(def.name) { "*" } else { "" };
            (
                def.name.to_string(),
                format!("{}{}", value, marker),
                def.unit.unwrap_or(""),
                def.description,
            )
        })
        .collect();

    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(8);
    let value_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(5);
    let unit_width = rows.iter().map(|r| r.2.len()).max().unwrap_or(0).max(4);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name_width$}  {:<value_width$}  {:<unit_width$}  DESCRIPTION",
        "PROPERTY", "VALUE", "UNIT"
    );
    for (name, value, unit, description) in rows {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<value_width$}  {:<unit_width$}  {}",
            name, value, unit, description
        );
    }
    out
}
