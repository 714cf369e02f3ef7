//! Minimal delimited-text reader for the input tables.
//!
//! The first non-empty line is the header. Columns are located by name, so
//! column order is free and extra columns are ignored.

use crate::{LoadError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

pub(crate) struct DelimitedTable<'a> {
    path: &'a Path,
    delimiter: char,
    columns: HashMap<String, usize>,
    /// Data lines with their 1-based line number.
    lines: Vec<(usize, &'a str)>,
}

impl<'a> DelimitedTable<'a> {
    pub(crate) fn parse(path: &'a Path, content: &'a str, delimiter: char) -> Result<Self> {
        let mut lines = content
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
            .filter(|(_, line)| !line.trim().is_empty());

        let (_, header) = lines.next().ok_or_else(|| LoadError::Parse {
            path: path.to_path_buf(),
            line: 1,
            reason: "empty file".to_string(),
        })?;

        let columns = header
            .split(delimiter)
            .enumerate()
            .map(|(i, name)| (name.trim().trim_matches('"').to_string(), i))
            .collect();

        Ok(Self {
            path,
            delimiter,
            columns,
            lines: lines.collect(),
        })
    }

    pub(crate) fn column(&self, name: &'static str) -> Result<usize> {
        self.columns
            .get(name)
            .copied()
            .ok_or_else(|| LoadError::MissingColumn {
                path: self.path.to_path_buf(),
                column: name,
            })
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.lines.iter().map(move |&(line, text)| Row {
            path: self.path,
            line,
            fields: text.split(self.delimiter).map(str::trim).collect(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}

pub(crate) struct Row<'a> {
    path: &'a Path,
    line: usize,
    fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    pub(crate) fn field(&self, index: usize) -> Result<&'a str> {
        self.fields
            .get(index)
            .copied()
            .ok_or_else(|| self.error(format!("missing field {}", index + 1)))
    }

    pub(crate) fn parse<T: FromStr>(&self, index: usize, what: &str) -> Result<T> {
        let raw = self.field(index)?;
        raw.parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", what, raw)))
    }

    /// Parse a count that may have been written as a whole float ("12.0").
    pub(crate) fn parse_count(&self, index: usize, what: &str) -> Result<u32> {
        let raw = self.field(index)?;
        if let Ok(value) = raw.parse::<u32>() {
            return Ok(value);
        }
        match raw.parse::<f64>() {
            Ok(value) if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) => {
                Ok(value as u32)
            }
            _ => Err(self.error(format!("invalid {} '{}'", what, raw))),
        }
    }

    /// Parse a year, accepting whole floats.
    pub(crate) fn parse_year(&self, index: usize) -> Result<i32> {
        let raw = self.field(index)?;
        if let Ok(value) = raw.parse::<i32>() {
            return Ok(value);
        }
        match raw.parse::<f64>() {
            Ok(value) if value.fract() == 0.0 && value.abs() < f64::from(i32::MAX) => Ok(value as i32),
            _ => Err(self.error(format!("invalid year '{}'", raw))),
        }
    }

    pub(crate) fn error(&self, reason: String) -> LoadError {
        LoadError::Parse {
            path: self.path.to_path_buf(),
            line: self.line,
            reason,
        }
    }
}
