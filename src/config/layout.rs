use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use crate::config::index_spec::deserialize_indices;
use crate::error::ConfigError;

/// Legend reference inside a group: which plot entry, and one id per sub-column.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LegendRef {
    pub key: String,
    #[serde(deserialize_with = "deserialize_indices")]
    pub id: Vec<usize>,
    /// Overrides the generated `<key>_<id>` label.
    #[serde(default)]
    pub label: Option<String>,
}

/// Decimation mode forwarded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleMode {
    Subsample,
    Mean,
    #[default]
    Peak,
}

fn default_ds() -> usize {
    100
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Downsampling {
    #[serde(default = "default_ds")]
    pub ds: usize,
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub mode: DownsampleMode,
}

impl Default for Downsampling {
    fn default() -> Self {
        Self {
            ds: default_ds(),
            auto: false,
            mode: DownsampleMode::default(),
        }
    }
}

/// Explicit axis range. Unset bounds are autoranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct AxisRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Shift the time axis so that `min` is drawn at 0. Only meaningful for xRange.
    #[serde(default)]
    pub zero: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Millimeter,
    Point,
    Pixel,
}

/// A width or height with its physical unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub value: f64,
    pub unit: SizeUnit,
}

impl Size {
    /// Parse `"50mm"`, `"36pt"`, `"120px"` or a bare number of pixels.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let t = text.trim();
        let (number, unit) = if let Some(n) = t.strip_suffix("mm") {
            (n, SizeUnit::Millimeter)
        } else if let Some(n) = t.strip_suffix("pt") {
            (n, SizeUnit::Point)
        } else if let Some(n) = t.strip_suffix("px") {
            (n, SizeUnit::Pixel)
        } else {
            (t, SizeUnit::Pixel)
        };
        let value: f64 = number
            .trim()
            .parse()
            .map_err(|_| ConfigError::Size(text.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Size(text.to_string()));
        }
        Ok(Self { value, unit })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSize {
    Number(f64),
    Text(String),
}

fn deserialize_size<'de, D>(deserializer: D) -> Result<Option<Size>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawSize>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawSize::Number(value)) => Ok(Some(Size {
            value,
            unit: SizeUnit::Pixel,
        })),
        Some(RawSize::Text(s)) => Size::parse(&s).map(Some).map_err(serde::de::Error::custom),
    }
}

fn default_bottom_label() -> String {
    "time [s]".to_string()
}

/// One named section of the grid. All cells of a group share these settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LayoutGroup {
    /// Group name; filled from the layout map key after loading.
    #[serde(skip)]
    pub name: String,
    /// Whether the cell title is shown.
    #[serde(default)]
    pub title: bool,
    pub legends: Vec<LegendRef>,
    #[serde(default)]
    pub newline: bool,
    #[serde(default)]
    pub downsampling: Option<Downsampling>,
    #[serde(default, rename = "xRange")]
    pub x_range: Option<AxisRange>,
    #[serde(default, rename = "yRange")]
    pub y_range: Option<AxisRange>,
    #[serde(default, deserialize_with = "deserialize_size")]
    pub width: Option<Size>,
    #[serde(default, deserialize_with = "deserialize_size")]
    pub height: Option<Size>,
    #[serde(default)]
    pub left_label: Option<String>,
    #[serde(default = "default_bottom_label")]
    pub bottom_label: String,
}

impl LayoutGroup {
    /// Number of grid cells this group spans: the longest legend id list.
    pub fn sub_columns(&self) -> usize {
        self.legends.iter().map(|l| l.id.len()).max().unwrap_or(0)
    }
}

/// Ordered layout: groups appear on screen in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutConfig {
    pub groups: Vec<LayoutGroup>,
}

impl<'de> Deserialize<'de> for LayoutConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = IndexMap::<String, LayoutGroup>::deserialize(deserializer)?;
        let groups = map
            .into_iter()
            .map(|(name, mut group)| {
                group.name = name;
                group
            })
            .collect();
        Ok(Self { groups })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_units() {
        assert_eq!(
            Size::parse("50mm").unwrap(),
            Size { value: 50.0, unit: SizeUnit::Millimeter }
        );
        assert_eq!(Size::parse(" 36pt").unwrap().unit, SizeUnit::Point);
        assert_eq!(Size::parse("120px").unwrap().unit, SizeUnit::Pixel);
        assert_eq!(Size::parse("80").unwrap().value, 80.0);
        assert!(Size::parse("wide").is_err());
        assert!(Size::parse("-3mm").is_err());
    }

    #[test]
    fn groups_keep_file_order_and_defaults() {
        let json = r#"{
            "joint_angle": {
                "title": true,
                "legends": [{"key": "rh_q", "id": ["0-2"]}, {"key": "st_q", "id": [0]}],
                "newline": true,
                "xRange": {"min": 1.0, "zero": true},
                "width": "50mm",
                "height": 200
            },
            "12V": {"legends": [{"key": "v", "id": [0]}], "downsampling": {"mode": "mean"}}
        }"#;
        let cfg: LayoutConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.groups.len(), 2);
        let first = &cfg.groups[0];
        assert_eq!(first.name, "joint_angle");
        assert_eq!(first.sub_columns(), 3);
        assert!(first.newline);
        assert_eq!(first.x_range.unwrap().min, Some(1.0));
        assert!(first.x_range.unwrap().zero);
        assert_eq!(first.width.unwrap().unit, SizeUnit::Millimeter);
        assert_eq!(first.height, Some(Size { value: 200.0, unit: SizeUnit::Pixel }));
        assert_eq!(first.bottom_label, "time [s]");

        let second = &cfg.groups[1];
        assert_eq!(second.name, "12V");
        assert!(!second.title);
        assert!(!second.newline);
        let ds = second.downsampling.unwrap();
        assert_eq!(ds.ds, 100);
        assert_eq!(ds.mode, DownsampleMode::Mean);
    }

    #[test]
    fn bad_size_is_rejected_at_load() {
        let json = r#"{"g": {"legends": [], "width": "3 inches"}}"#;
        assert!(serde_json::from_str::<LayoutConfig>(json).is_err());
    }
}
