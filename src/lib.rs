//! Funnel and pyramid chart layout.
//!
//! Turns a list of values into stacked, tapering polygons and places a label
//! next to (or on) each one. Drawing is left to the caller: the output is
//! screen coordinates, label boxes and connector geometry.
//!
//! ```
//! use funnel_layout::{Funnel, FunnelOptions, Size};
//! use funnel_layout::data::rows_from_json;
//!
//! let mut funnel = Funnel::new(FunnelOptions::default()).unwrap();
//! funnel.resize(Size::new(800.0, 600.0));
//! let rows = r#"[{ "arg": "Visits", "val": 120 }, { "arg": "Orders", "val": 30 }]"#;
//! funnel.set_data(rows_from_json(rows).unwrap());
//!
//! let items = funnel.items();
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].argument(), "Visits");
//! ```

pub mod data;
pub mod errors;
pub mod label;
pub mod layout;
pub mod log;
pub mod options;
pub mod palette;
pub mod tiling;
pub mod types;

pub use data::{DataPoint, FieldMapping, Row};
pub use errors::OptionsError;
pub use label::text::{CustomizeText, FontOptions, LabelTextInfo, ProportionalMeasure, TextMeasure};
pub use label::{ConnectorStyle, LabelDescriptor, TextAlign};
pub use layout::{Funnel, FunnelItem, ItemAppearance, ItemState, StateChange, Transaction};
pub use options::{FunnelOptions, HorizontalAlignment, LabelOptions, LabelPosition, SelectionMode};
pub use tiling::{Tiling, TilingAlgorithm, TilingRegistry};
pub use types::{Coords, Figure, Rect, Size};
