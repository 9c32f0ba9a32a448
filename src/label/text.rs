//! Label text: formatting, customization and measurement.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::options::LabelOptions;
use crate::types::Size;

/// Proportional character widths for printable ASCII, in hundredths of an
/// average advance.
#[rustfmt::skip]
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Average character advance as a fraction of the font size
const ADVANCE_PER_EM: f64 = 0.08 / 0.14;

/// Line box height as a multiple of the font size
const LINE_HEIGHT: f64 = 1.2;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontOptions {
    pub size: f64,
    pub weight: u32,
    pub family: String,
    pub color: String,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            size: 12.0,
            weight: 400,
            family: "'Segoe UI', 'Helvetica Neue', 'Trebuchet MS', Verdana".to_string(),
            color: "#ffffff".to_string(),
        }
    }
}

/// Largest number of fraction digits a format may ask for
pub const MAX_PRECISION: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormatKind {
    #[default]
    General,
    FixedPoint,
    Percent,
    Thousands,
    Millions,
}

impl FormatKind {
    fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixedpoint" => FormatKind::FixedPoint,
            "percent" => FormatKind::Percent,
            "thousands" => FormatKind::Thousands,
            "millions" => FormatKind::Millions,
            _ => FormatKind::General,
        }
    }
}

/// Number format for label values, written either as `"percent"` or as
/// `{ "type": "fixedPoint", "precision": 2 }`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "FormatSpec")]
pub struct LabelFormat {
    pub kind: FormatKind,
    pub precision: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FormatSpec {
    Kind(String),
    Full {
        #[serde(rename = "type", default)]
        kind: String,
        #[serde(default)]
        precision: Option<usize>,
    },
}

impl From<FormatSpec> for LabelFormat {
    fn from(spec: FormatSpec) -> Self {
        match spec {
            FormatSpec::Kind(kind) => LabelFormat {
                kind: FormatKind::parse(&kind),
                precision: None,
            },
            FormatSpec::Full { kind, precision } => LabelFormat {
                kind: FormatKind::parse(&kind),
                precision,
            },
        }
    }
}

impl LabelFormat {
    pub fn new(kind: FormatKind, precision: Option<usize>) -> Self {
        LabelFormat { kind, precision }
    }

    pub fn apply(&self, value: f64) -> String {
        let (scaled, suffix) = match self.kind {
            FormatKind::General | FormatKind::FixedPoint => (value, ""),
            FormatKind::Percent => (value * 100.0, "%"),
            FormatKind::Thousands => (value / 1e3, "K"),
            FormatKind::Millions => (value / 1e6, "M"),
        };
        let precision = match self.kind {
            FormatKind::General => self.precision,
            _ => Some(self.precision.unwrap_or(0)),
        }
        .map(|p| p.min(MAX_PRECISION));
        match precision {
            Some(p) => format!("{scaled:.p$}{suffix}"),
            None => format!("{scaled}{suffix}"),
        }
    }
}

/// What a text customizer gets to look at
#[derive(Clone, Debug, PartialEq)]
pub struct LabelTextInfo<'a> {
    pub argument: &'a str,
    pub value: f64,
    pub value_text: String,
    pub percent: f64,
    pub percent_text: String,
}

type CustomizeFn = dyn Fn(&LabelTextInfo<'_>) -> String + Send + Sync;

/// Host callback producing the label text
#[derive(Clone)]
pub struct CustomizeText(Arc<CustomizeFn>);

impl CustomizeText {
    pub fn new(f: impl Fn(&LabelTextInfo<'_>) -> String + Send + Sync + 'static) -> Self {
        CustomizeText(Arc::new(f))
    }

    pub fn call(&self, info: &LabelTextInfo<'_>) -> String {
        (self.0)(info)
    }
}

impl fmt::Debug for CustomizeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomizeText(..)")
    }
}

impl PartialEq for CustomizeText {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Build the label text for one item: `"<argument> <value>"` unless a
/// customizer is installed.
pub fn label_text(options: &LabelOptions, argument: &str, value: f64, percent: f64) -> String {
    let info = LabelTextInfo {
        argument,
        value,
        value_text: options.format.apply(value),
        percent,
        percent_text: LabelFormat::new(FormatKind::Percent, options.format.precision)
            .apply(percent),
    };
    match &options.customize_text {
        Some(customize) => customize.call(&info),
        None if argument.is_empty() => info.value_text,
        None => format!("{} {}", argument, info.value_text),
    }
}

/// Sizes label boxes. The size covers everything the renderer draws for the
/// label, background included.
pub trait TextMeasure {
    fn measure(&self, text: &str, options: &LabelOptions) -> Size;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, &LabelOptions) -> Size,
{
    fn measure(&self, text: &str, options: &LabelOptions) -> Size {
        self(text, options)
    }
}

/// Measures with a fixed proportional width table; good enough when no real
/// font shaping is available.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProportionalMeasure;

/// Width of `text` in hundredths of an average advance.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| {
            if (' '..='~').contains(&c) {
                AW_CHAR[(c as usize) - 0x20] as u32
            } else {
                100
            }
        })
        .sum()
}

impl TextMeasure for ProportionalMeasure {
    fn measure(&self, text: &str, options: &LabelOptions) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let em = options.font.size;
        let lines: Vec<&str> = text.lines().collect();
        let widest = lines.iter().map(|l| text_length(l)).max().unwrap_or(0);
        let mut size = Size::new(
            widest as f64 * 0.01 * em * ADVANCE_PER_EM,
            lines.len() as f64 * em * LINE_HEIGHT,
        );
        if options.background.visible {
            size.w += 2.0 * options.background.padding_x;
            size.h += 2.0 * options.background.padding_y;
        }
        size
    }
}
