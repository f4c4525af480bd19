use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString, VariantNames};
use tidyfig_layout::figure::PanelStyle;

use crate::error::TidyfigError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum Journal {
    #[default]
    Elsevier,
    Springer,
    Nature,
    Wiley,
}

impl Journal {
    /// Canvas width in points for a figure spanning `width` columns
    pub fn column_width(&self, width: ColumnWidth) -> f32 {
        use ColumnWidth::*;
        match (self, width) {
            (Journal::Elsevier, Single) => 252.0,
            (Journal::Elsevier, OneAndHalf) => 394.0,
            (Journal::Elsevier, Double) => 536.0,
            (Journal::Springer, Single) => 238.0,
            (Journal::Springer, OneAndHalf) => 366.0,
            (Journal::Springer, Double) => 493.0,
            (Journal::Nature, Single) => 252.0,
            (Journal::Nature, OneAndHalf) => 340.0,
            (Journal::Nature, Double) => 518.0,
            (Journal::Wiley, Single) => 227.0,
            (Journal::Wiley, OneAndHalf) => 354.0,
            (Journal::Wiley, Double) => 510.0,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, VariantNames,
)]
#[strum(ascii_case_insensitive)]
pub enum ColumnWidth {
    #[default]
    #[strum(serialize = "single")]
    Single,
    #[strum(serialize = "1.5")]
    OneAndHalf,
    #[strum(serialize = "double")]
    Double,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Interpreter {
    #[default]
    Tex,
    Latex,
    None,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumString, Display, VariantNames,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ToolBar {
    #[default]
    None,
    Figure,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn is_on(&self) -> bool {
        matches!(self, Toggle::On)
    }
}

/// Serde adapter for the enumerated options, going through their strum names
pub(crate) mod choice {
    use std::fmt::Display;
    use std::str::FromStr;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use strum::VariantNames;

    pub fn serialize<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Display,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr + VariantNames,
    {
        let name = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(true) => "on".to_string(),
            Value::Bool(false) => "off".to_string(),
            other => return Err(D::Error::custom(format!("unexpected value {other}"))),
        };
        name.parse().map_err(|_| {
            D::Error::custom(format!(
                "`{name}` is not one of {}",
                T::VARIANTS.join(", ")
            ))
        })
    }
}

/// Every setting that controls layout, styling and export of a figure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields, default)]
pub struct ExportOptions {
    #[serde(with = "choice")]
    pub journal: Journal,
    #[serde(with = "choice")]
    pub width: ColumnWidth,
    pub height: f32,
    pub spacing_offset: f32,
    /// Explicit `[rows, cols]`, checked against the panel count at layout time
    pub tiled_layout: Option<Vec<i64>>,
    pub font_name: String,
    pub font_size: f32,
    pub axis_font_size: f32,
    pub font_color: [f32; 3],
    pub axis_color: [f32; 3],
    #[serde(with = "choice")]
    pub interpreter: Interpreter,
    pub line_width: f32,
    pub marker_size: f32,
    pub axis_line_width: f32,
    pub tick_length: [f32; 2],
    pub box_color: [f32; 3],
    #[serde(with = "choice")]
    pub grid: Toggle,
    pub grid_line_width: f32,
    pub grid_color: [f32; 3],
    #[serde(with = "choice")]
    pub tool_bar: ToolBar,
    #[serde(with = "choice")]
    pub export_message: Toggle,
    pub filename: Option<PathBuf>,
    pub verbosity: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            journal: Journal::Elsevier,
            width: ColumnWidth::Single,
            height: 235.0,
            spacing_offset: 1.0,
            tiled_layout: None,
            font_name: "Helvetica".to_string(),
            font_size: 10.0,
            axis_font_size: 8.0,
            font_color: [0.0, 0.0, 0.0],
            axis_color: [0.0, 0.0, 0.0],
            interpreter: Interpreter::Tex,
            line_width: 1.0,
            marker_size: 4.0,
            axis_line_width: 0.5,
            tick_length: [3.0, 1.5],
            box_color: [1.0, 1.0, 1.0],
            grid: Toggle::Off,
            grid_line_width: 0.25,
            grid_color: [0.85, 0.85, 0.85],
            tool_bar: ToolBar::None,
            export_message: Toggle::On,
            filename: None,
            verbosity: 1,
        }
    }
}

impl ExportOptions {
    /// Option names as they appear in configuration files
    pub const KEYS: [&'static str; 23] = [
        "Journal",
        "Width",
        "Height",
        "SpacingOffset",
        "TiledLayout",
        "FontName",
        "FontSize",
        "AxisFontSize",
        "FontColor",
        "AxisColor",
        "Interpreter",
        "LineWidth",
        "MarkerSize",
        "AxisLineWidth",
        "TickLength",
        "BoxColor",
        "Grid",
        "GridLineWidth",
        "GridColor",
        "ToolBar",
        "ExportMessage",
        "Filename",
        "Verbosity",
    ];

    pub fn with_journal(mut self, journal: Journal, width: ColumnWidth) -> Self {
        self.journal = journal;
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn with_tiled_layout(mut self, rows: i64, cols: i64) -> Self {
        self.tiled_layout = Some(vec![rows, cols]);
        self
    }

    pub fn with_filename<P: Into<PathBuf>>(mut self, filename: P) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Parse a JSON object of options, starting from the defaults
    pub fn from_json(text: &str) -> Result<Self, TidyfigError> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| TidyfigError::invalid_option("configuration", e.to_string()))?;
        let Value::Object(entries) = value else {
            return Err(TidyfigError::invalid_option(
                "configuration",
                "expected a JSON object of options",
            ));
        };

        let mut options = Self::default();
        for (key, value) in entries {
            options.set_value(&key, value)?;
        }
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: &Path) -> Result<Self, TidyfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| TidyfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Set one option from its textual form, as given on a command line.
    ///
    /// Keys match case-insensitively. Values are read as JSON when they parse as such,
    /// as a list of numbers when whitespace or comma separated, and as a string otherwise.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), TidyfigError> {
        let canonical = Self::KEYS
            .iter()
            .find(|k| k.eq_ignore_ascii_case(key.trim()))
            .ok_or_else(|| unknown_key(key))?;
        let mut next = self.clone();
        next.set_value(canonical, parse_value(value))?;
        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Parse and apply a `Key=Value` pair
    pub fn apply_assignment(&mut self, assignment: &str) -> Result<(), TidyfigError> {
        let (key, value) = assignment.split_once('=').ok_or_else(|| {
            TidyfigError::invalid_option(assignment, "expected an assignment of the form Key=Value")
        })?;
        self.set(key, value)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), TidyfigError> {
        if !Self::KEYS.iter().any(|k| *k == key) {
            return Err(unknown_key(key));
        }
        let mut current = serde_json::to_value(&*self)
            .map_err(|e| TidyfigError::invalid_option(key, e.to_string()))?;
        if let Value::Object(entries) = &mut current {
            entries.insert(key.to_string(), value);
        }
        *self = serde_json::from_value(current)
            .map_err(|e| TidyfigError::invalid_option(key, e.to_string()))?;
        Ok(())
    }

    /// Reject values that are well typed but out of range
    pub fn validate(&self) -> Result<(), TidyfigError> {
        let check = |option: &str, ok: bool, reason: &str| {
            if ok {
                Ok(())
            } else {
                Err(TidyfigError::invalid_option(option, reason))
            }
        };
        let positive = |v: f32| v.is_finite() && v > 0.0;
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        let unit = |rgb: &[f32; 3]| rgb.iter().all(|c| (0.0..=1.0).contains(c));

        check("Height", positive(self.height), "must be a positive number of points")?;
        check("SpacingOffset", non_negative(self.spacing_offset), "must not be negative")?;
        check("FontName", !self.font_name.trim().is_empty(), "must not be empty")?;
        check("FontSize", positive(self.font_size), "must be positive")?;
        check("AxisFontSize", positive(self.axis_font_size), "must be positive")?;
        check("LineWidth", non_negative(self.line_width), "must not be negative")?;
        check("MarkerSize", non_negative(self.marker_size), "must not be negative")?;
        check("AxisLineWidth", non_negative(self.axis_line_width), "must not be negative")?;
        check(
            "TickLength",
            self.tick_length.iter().all(|v| non_negative(*v)),
            "both lengths must be non-negative",
        )?;
        check("GridLineWidth", non_negative(self.grid_line_width), "must not be negative")?;
        check("FontColor", unit(&self.font_color), "components must lie in [0, 1]")?;
        check("AxisColor", unit(&self.axis_color), "components must lie in [0, 1]")?;
        check("BoxColor", unit(&self.box_color), "components must lie in [0, 1]")?;
        check("GridColor", unit(&self.grid_color), "components must lie in [0, 1]")?;
        check("Verbosity", self.verbosity <= 4, "must be between 0 and 4")?;
        Ok(())
    }

    /// Canvas `[width, height]` in points
    pub fn canvas(&self) -> [f32; 2] {
        [self.journal.column_width(self.width), self.height]
    }

    pub fn panel_style(&self) -> PanelStyle {
        PanelStyle {
            font: self.font_name.clone(),
            font_size: self.font_size,
            axis_font_size: self.axis_font_size,
            axis_line_width: self.axis_line_width,
            spacing: self.spacing_offset,
            tick_length: self.tick_length,
        }
    }

    pub fn shows_export_message(&self) -> bool {
        self.export_message.is_on() && self.verbosity >= 1
    }
}

fn unknown_key(key: &str) -> TidyfigError {
    TidyfigError::invalid_option(
        key,
        format!("unknown option, expected one of {}", ExportOptions::KEYS.join(", ")),
    )
}

fn parse_value(text: &str) -> Value {
    let text = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return value;
    }
    let parts: Vec<&str> = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() > 1 {
        let numbers: Option<Vec<Value>> = parts
            .iter()
            .map(|p| serde_json::from_str::<serde_json::Number>(p).ok().map(Value::Number))
            .collect();
        if let Some(numbers) = numbers {
            return Value::Array(numbers);
        }
    }
    Value::String(text.to_string())
}
