//! Item colors.
//!
//! Items take their color from the data row when one is given, otherwise the
//! next color of the configured palette, cycling when it runs out.

use serde::Deserialize;

const OFFICE: &[&str] = &["#5f8b95", "#ba4d51", "#af8a53", "#955f71", "#859666", "#7e688c"];

const SOFT_PASTEL: &[&str] = &[
    "#60a69f", "#78b6d9", "#6682bb", "#a37182", "#eeba69", "#90ba58", "#456c68", "#7565a4",
];

const HARMONY_LIGHT: &[&str] = &[
    "#fcb65e", "#679ec5", "#ad79ce", "#7abd5c", "#e18e92", "#b6d623", "#b7abea", "#85dbd5",
];

const BRIGHT: &[&str] = &[
    "#70c92f", "#f8ca00", "#bd1550", "#e97f02", "#9d419c", "#7e4452", "#9ab57e", "#36a3a6",
];

const MATERIAL: &[&str] = &["#1db2f5", "#f5564a", "#97c95c", "#ffc720", "#eb3573", "#a63db8"];

/// Palette option: a built-in palette name or an explicit color list
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PaletteOption {
    Named(String),
    Custom(Vec<String>),
}

impl Default for PaletteOption {
    fn default() -> Self {
        PaletteOption::Named("Office".to_string())
    }
}

/// Resolved palette handing out colors in order
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<String>,
    next: usize,
}

impl Palette {
    pub fn new(option: &PaletteOption) -> Self {
        let colors = match option {
            PaletteOption::Custom(colors) if !colors.is_empty() => colors.clone(),
            PaletteOption::Custom(_) => named(OFFICE),
            PaletteOption::Named(name) => {
                let key = name.to_ascii_lowercase().replace(['_', '-'], " ");
                match key.as_str() {
                    "office" | "default" => named(OFFICE),
                    "soft pastel" => named(SOFT_PASTEL),
                    "harmony light" => named(HARMONY_LIGHT),
                    "bright" => named(BRIGHT),
                    "material" => named(MATERIAL),
                    _ => {
                        crate::log::debug!(palette = %name, "unknown palette, using Office");
                        named(OFFICE)
                    }
                }
            }
        };
        Palette { colors, next: 0 }
    }

    /// The next color, wrapping around at the end of the list.
    pub fn next_color(&mut self) -> String {
        let color = self.colors[self.next % self.colors.len()].clone();
        self.next += 1;
        color
    }
}

fn named(colors: &[&str]) -> Vec<String> {
    colors.iter().map(|c| c.to_string()).collect()
}
