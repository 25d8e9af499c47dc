//! Fixture loading and management.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tinyprintf_core::{Argument, DataModel};

use crate::error::HarnessError;

/// Float payload. JSON has no literal for infinities or NaN, so those are
/// spelled as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FloatLiteral {
    Number(f64),
    Named(String),
}

impl FloatLiteral {
    /// Numeric value; unknown names read as NaN.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Named(name) => match name.to_ascii_lowercase().as_str() {
                "inf" | "+inf" | "infinity" => f64::INFINITY,
                "-inf" | "-infinity" => f64::NEG_INFINITY,
                _ => f64::NAN,
            },
        }
    }
}

/// One formatting argument of a fixture case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum FixtureArg {
    Int(i64),
    Uint(u64),
    Float(FloatLiteral),
    Char(char),
    Str(String),
    Ptr(u64),
}

impl FixtureArg {
    /// Engine argument borrowing this fixture's storage.
    #[must_use]
    pub fn to_argument(&self) -> Argument<'_> {
        match self {
            Self::Int(v) => Argument::Signed(*v),
            Self::Uint(v) => Argument::Unsigned(*v),
            Self::Float(v) => Argument::Float(v.value()),
            Self::Char(c) => Argument::from(*c),
            Self::Str(s) => Argument::Str(s.as_bytes()),
            Self::Ptr(p) => Argument::Pointer(usize::try_from(*p).unwrap_or(usize::MAX)),
        }
    }
}

/// `kind:value`, as accepted by the `render` subcommand.
impl FromStr for FixtureArg {
    type Err = HarnessError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (kind, value) = raw
            .split_once(':')
            .ok_or_else(|| HarnessError::InvalidArgument(format!("expected kind:value, got '{raw}'")))?;
        let bad = |what: &str| HarnessError::InvalidArgument(format!("bad {what} value '{value}'"));
        let arg = match kind {
            "int" => Self::Int(value.parse().map_err(|_| bad("int"))?),
            "uint" => Self::Uint(parse_unsigned(value).ok_or_else(|| bad("uint"))?),
            "float" => Self::Float(match value.parse::<f64>() {
                Ok(v) if v.is_finite() => FloatLiteral::Number(v),
                _ => FloatLiteral::Named(value.to_string()),
            }),
            "char" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Char(c),
                    _ => return Err(bad("char")),
                }
            }
            "str" => Self::Str(value.to_string()),
            "ptr" => Self::Ptr(parse_unsigned(value).ok_or_else(|| bad("ptr"))?),
            other => {
                return Err(HarnessError::InvalidArgument(format!(
                    "unknown argument kind '{other}', expected int|uint|float|char|str|ptr"
                )));
            }
        };
        Ok(arg)
    }
}

fn parse_unsigned(raw: &str) -> Option<u64> {
    let s = raw.trim().replace('_', "");
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Behavior or format feature under test.
    pub section: String,
    pub format: String,
    #[serde(default)]
    pub args: Vec<FixtureArg>,
    /// Bounded buffer size, terminator included.
    pub capacity: usize,
    /// Buffer content before the terminator.
    pub expected_output: String,
    /// Untruncated length the call must return.
    pub expected_len: usize,
    /// `native` (default) or `mos`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_model: Option<String>,
}

impl FixtureCase {
    /// Data model named by the case, defaulting to the native one.
    pub fn resolve_data_model(&self) -> Result<DataModel, HarnessError> {
        match self.data_model.as_deref() {
            None => Ok(DataModel::NATIVE),
            Some(name) => DataModel::from_name(name).ok_or_else(|| {
                HarnessError::InvalidArgument(format!(
                    "case '{}': unknown data model '{name}'",
                    self.name
                ))
            }),
        }
    }
}

/// A collection of fixture cases for one feature family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    pub family: String,
    /// UTC timestamp of capture.
    pub captured_at: String,
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_file(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&content)?)
    }
}

/// JSON fixture paths under `path` (sorted), or `path` itself if it is a file.
pub fn fixture_paths(path: &Path) -> Result<Vec<PathBuf>, HarnessError> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut paths: Vec<PathBuf> = std::fs::read_dir(path)?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    paths.sort();
    Ok(paths)
}
