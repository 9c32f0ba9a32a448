//! Widget options.
//!
//! Options deserialize from the same camelCase JSON a hosting widget passes
//! around, with every field defaulted. Enumerated strings are normalized
//! (lower-cased) once here, so the layout code only ever sees typed values.

use serde::Deserialize;

use crate::errors::OptionsError;
use crate::label::text::{CustomizeText, FontOptions, LabelFormat, MAX_PRECISION};
use crate::palette::PaletteOption;
use crate::types::Size;

/// Where labels sit relative to their figure
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum LabelPosition {
    Inside,
    Outside,
    #[default]
    Columns,
}

impl LabelPosition {
    /// Case-insensitive parse; anything that is not `inside` or `outside`
    /// lands in the columns layout.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "inside" => LabelPosition::Inside,
            "outside" => LabelPosition::Outside,
            "columns" => LabelPosition::Columns,
            _ => {
                crate::log::warn!(position = s, "unknown label position, using columns");
                LabelPosition::Columns
            }
        }
    }

    /// Outside and columns labels live next to the funnel and need room.
    pub fn reserves_space(self) -> bool {
        !matches!(self, LabelPosition::Inside)
    }
}

impl From<String> for LabelPosition {
    fn from(s: String) -> Self {
        LabelPosition::parse(&s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum HorizontalAlignment {
    Left,
    Center,
    #[default]
    Right,
}

impl From<String> for HorizontalAlignment {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => HorizontalAlignment::Left,
            "center" => HorizontalAlignment::Center,
            _ => HorizontalAlignment::Right,
        }
    }
}

/// The side of the funnel that outside/columns labels occupy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Right,
}

impl HorizontalAlignment {
    pub fn side(self) -> LabelSide {
        match self {
            HorizontalAlignment::Left => LabelSide::Left,
            HorizontalAlignment::Center | HorizontalAlignment::Right => LabelSide::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum SelectionMode {
    None,
    #[default]
    Single,
    Multiple,
}

impl From<String> for SelectionMode {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => SelectionMode::None,
            "multiple" => SelectionMode::Multiple,
            _ => SelectionMode::Single,
        }
    }
}

/// Explicit widget size; unset dimensions come from the container
#[derive(Clone, Copy, Debug, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SizeOptions {
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl SizeOptions {
    pub fn resolve(&self, container: Size) -> Size {
        Size::new(
            self.width.unwrap_or(container.w),
            self.height.unwrap_or(container.h),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdaptiveLayoutOptions {
    pub width: f64,
    pub height: f64,
    pub keep_labels: bool,
}

impl Default for AdaptiveLayoutOptions {
    fn default() -> Self {
        Self {
            width: 170.0,
            height: 170.0,
            keep_labels: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BorderOptions {
    pub visible: bool,
    pub width: f64,
    pub color: String,
}

impl Default for BorderOptions {
    fn default() -> Self {
        Self {
            visible: false,
            width: 2.0,
            color: "#ffffff".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum HatchingDirection {
    None,
    Left,
    #[default]
    Right,
}

impl From<String> for HatchingDirection {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => HatchingDirection::None,
            "left" => HatchingDirection::Left,
            _ => HatchingDirection::Right,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HatchingOptions {
    pub direction: HatchingDirection,
    pub opacity: f64,
    pub step: f64,
    pub width: f64,
}

impl HatchingOptions {
    fn with_opacity(opacity: f64) -> Self {
        Self {
            direction: HatchingDirection::Right,
            opacity,
            step: 6.0,
            width: 2.0,
        }
    }
}

impl Default for HatchingOptions {
    fn default() -> Self {
        Self::with_opacity(0.75)
    }
}

/// Appearance overrides for a hovered or selected item
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StateStyleOptions {
    pub border: Option<BorderOptions>,
    pub hatching: HatchingOptions,
}

impl Default for StateStyleOptions {
    fn default() -> Self {
        Self {
            border: None,
            hatching: HatchingOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemOptions {
    pub border: BorderOptions,
    pub hover_style: StateStyleOptions,
    pub selection_style: StateStyleOptions,
}

impl Default for ItemOptions {
    fn default() -> Self {
        Self {
            border: BorderOptions::default(),
            hover_style: StateStyleOptions::default(),
            selection_style: StateStyleOptions {
                border: None,
                hatching: HatchingOptions::with_opacity(0.5),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelBackgroundOptions {
    pub visible: bool,
    /// Background fill; the item color when unset
    pub fill: Option<String>,
    pub padding_x: f64,
    pub padding_y: f64,
}

impl Default for LabelBackgroundOptions {
    fn default() -> Self {
        Self {
            visible: true,
            fill: None,
            padding_x: 8.0,
            padding_y: 4.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConnectorOptions {
    pub visible: bool,
    pub width: f64,
    /// Connector stroke; the item color when unset
    pub color: Option<String>,
    pub opacity: f64,
}

impl Default for ConnectorOptions {
    fn default() -> Self {
        Self {
            visible: true,
            width: 1.0,
            color: None,
            opacity: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelOptions {
    pub visible: bool,
    pub position: LabelPosition,
    pub horizontal_alignment: HorizontalAlignment,
    pub horizontal_offset: f64,
    pub vertical_offset: f64,
    pub font: FontOptions,
    pub background: LabelBackgroundOptions,
    pub connector: ConnectorOptions,
    pub format: LabelFormat,
    #[serde(skip)]
    pub customize_text: Option<CustomizeText>,
    pub show_for_zero_values: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            visible: true,
            position: LabelPosition::Columns,
            horizontal_alignment: HorizontalAlignment::Right,
            horizontal_offset: 0.0,
            vertical_offset: 0.0,
            font: FontOptions::default(),
            background: LabelBackgroundOptions::default(),
            connector: ConnectorOptions::default(),
            format: LabelFormat::default(),
            customize_text: None,
            show_for_zero_values: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunnelOptions {
    /// Tiling algorithm name; unknown names fall back to the default
    pub algorithm: Option<String>,
    pub neck_width: f64,
    pub neck_height: f64,
    pub inverted: bool,
    pub sort_data: bool,
    pub palette: PaletteOption,
    pub rtl_enabled: bool,
    pub size: SizeOptions,
    pub adaptive_layout: AdaptiveLayoutOptions,
    pub value_field: String,
    pub argument_field: String,
    pub color_field: String,
    pub hover_enabled: bool,
    pub selection_mode: SelectionMode,
    pub item: ItemOptions,
    pub label: LabelOptions,
}

impl Default for FunnelOptions {
    fn default() -> Self {
        Self {
            algorithm: None,
            neck_width: 0.0,
            neck_height: 0.0,
            inverted: false,
            sort_data: true,
            palette: PaletteOption::default(),
            rtl_enabled: false,
            size: SizeOptions::default(),
            adaptive_layout: AdaptiveLayoutOptions::default(),
            value_field: "val".to_string(),
            argument_field: "arg".to_string(),
            color_field: "color".to_string(),
            hover_enabled: true,
            selection_mode: SelectionMode::Single,
            item: ItemOptions::default(),
            label: LabelOptions::default(),
        }
    }
}

impl FunnelOptions {
    /// Parse options from JSON text and validate them.
    pub fn from_json(source: &str) -> Result<Self, OptionsError> {
        let options: FunnelOptions = serde_json::from_str(source)
            .map_err(|e| OptionsError::from_json("options.json", source, &e))?;
        options.validate()?;
        Ok(options)
    }

    /// Check caller contracts once, before any layout pass runs.
    pub fn validate(&self) -> Result<(), OptionsError> {
        fraction("neckWidth", self.neck_width)?;
        fraction("neckHeight", self.neck_height)?;
        non_negative("adaptiveLayout.width", self.adaptive_layout.width)?;
        non_negative("adaptiveLayout.height", self.adaptive_layout.height)?;
        if let Some(w) = self.size.width {
            non_negative("size.width", w)?;
        }
        if let Some(h) = self.size.height {
            non_negative("size.height", h)?;
        }
        finite("label.horizontalOffset", self.label.horizontal_offset)?;
        finite("label.verticalOffset", self.label.vertical_offset)?;
        non_negative("label.font.size", self.label.font.size)?;
        if let Some(value) = self.label.format.precision.filter(|p| *p > MAX_PRECISION) {
            return Err(OptionsError::PrecisionOutOfRange { value, max: MAX_PRECISION });
        }
        Ok(())
    }
}

fn fraction(field: &'static str, value: f64) -> Result<(), OptionsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(OptionsError::FractionOutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), OptionsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(OptionsError::NegativeSize { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), OptionsError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OptionsError::NonFinite { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_object() {
        let options = FunnelOptions::from_json("{}").unwrap();
        assert_eq!(options, FunnelOptions::default());
        assert_eq!(options.label.position, LabelPosition::Columns);
        assert!(options.sort_data);
    }

    #[test]
    fn position_is_case_insensitive() {
        for (raw, expected) in [
            ("Outside", LabelPosition::Outside),
            ("outsiDe", LabelPosition::Outside),
            ("INSIDE", LabelPosition::Inside),
            ("Columns", LabelPosition::Columns),
            ("sideways", LabelPosition::Columns),
        ] {
            let json = format!(r#"{{ "label": {{ "position": "{raw}" }} }}"#);
            let options = FunnelOptions::from_json(&json).unwrap();
            assert_eq!(options.label.position, expected, "{raw}");
        }
    }

    #[test]
    fn camel_case_fields() {
        let options = FunnelOptions::from_json(
            r#"{
                "neckWidth": 0.2,
                "neckHeight": 0.3,
                "rtlEnabled": true,
                "valueField": "value",
                "adaptiveLayout": { "width": 150, "keepLabels": false },
                "label": {
                    "horizontalAlignment": "Left",
                    "horizontalOffset": 15,
                    "verticalOffset": 30
                }
            }"#,
        )
        .unwrap();
        assert_eq!(options.neck_width, 0.2);
        assert_eq!(options.neck_height, 0.3);
        assert!(options.rtl_enabled);
        assert_eq!(options.value_field, "value");
        assert_eq!(options.adaptive_layout.width, 150.0);
        assert_eq!(options.adaptive_layout.height, 170.0);
        assert!(!options.adaptive_layout.keep_labels);
        assert_eq!(options.label.horizontal_alignment, HorizontalAlignment::Left);
        assert_eq!(options.label.horizontal_offset, 15.0);
    }

    #[test]
    fn center_alignment_uses_the_right_side() {
        assert_eq!(HorizontalAlignment::Center.side(), LabelSide::Right);
        assert_eq!(HorizontalAlignment::Left.side(), LabelSide::Left);
    }

    #[test]
    fn negative_neck_is_rejected() {
        let err = FunnelOptions::from_json(r#"{ "neckWidth": -0.1 }"#).unwrap_err();
        assert!(matches!(
            err,
            OptionsError::FractionOutOfRange { field: "neckWidth", .. }
        ));
    }

    #[test]
    fn neck_above_one_is_rejected() {
        let options = FunnelOptions {
            neck_height: 1.5,
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn negative_size_is_rejected() {
        let err = FunnelOptions::from_json(r#"{ "size": { "width": -5 } }"#).unwrap_err();
        assert!(matches!(err, OptionsError::NegativeSize { field: "size.width", .. }));
    }

    #[test]
    fn malformed_json_points_at_the_error() {
        let err = FunnelOptions::from_json("{\n  \"inverted\": maybe\n}").unwrap_err();
        match err {
            // somewhere on the second line
            OptionsError::Parse { span, .. } => assert!((2..=22).contains(&span.offset())),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn huge_precision_is_rejected() {
        let err = FunnelOptions::from_json(
            r#"{ "label": { "format": { "type": "fixedPoint", "precision": 1000000000 } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, OptionsError::PrecisionOutOfRange { value: 1_000_000_000, max: 20 }));
        let ok = FunnelOptions::from_json(
            r#"{ "label": { "format": { "type": "fixedPoint", "precision": 20 } } }"#,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn only_inside_labels_skip_the_reservation() {
        assert!(!LabelPosition::Inside.reserves_space());
        assert!(LabelPosition::Outside.reserves_space());
        assert!(LabelPosition::Columns.reserves_space());
    }

    #[test]
    fn size_resolves_against_container() {
        let size = SizeOptions {
            width: Some(180.0),
            height: None,
        };
        assert_eq!(size.resolve(Size::new(800.0, 600.0)), Size::new(180.0, 600.0));
    }
}
