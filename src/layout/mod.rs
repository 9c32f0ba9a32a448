//! The funnel engine.
//!
//! [`Funnel`] owns the item list and the drawing rectangle. Every mutation
//! (data, options, size) requests the earliest [`Stage`] it invalidates; the
//! pending stages then run in order before the call returns:
//!
//! ```text
//! DataSource -> NodesCreate -> Labels -> Layout -> Tiling -> Tiles
//! ```
//!
//! A resize starts at `Layout`, so labels keep their text and measurement and
//! are only moved. Hover and selection changes run inside a
//! [`NotificationScope`] and reach observers as one [`StateChange`] per
//! outermost scope.

pub mod changes;
pub mod item;
pub mod mapper;
pub mod transaction;

use std::ops::{Deref, DerefMut};

use crate::data::{DataPoint, FieldMapping, Row, collect_points};
use crate::errors::OptionsError;
use crate::label::text::{ProportionalMeasure, TextMeasure};
use crate::label::{self, LabelDescriptor, Placement, adaptive};
use crate::options::{FunnelOptions, SelectionMode};
use crate::palette::Palette;
use crate::tiling::{Tiling, TilingRegistry};
use crate::types::{Coords, Rect, Size};

pub use changes::{ChangeSet, Stage};
pub use item::{FunnelItem, ItemAppearance, ItemState};
pub use transaction::{ItemStateChange, NotificationScope, StateChange};

/// Container size used until the host reports one
pub const DEFAULT_SIZE: Size = Size::new(400.0, 400.0);

type Observer = Box<dyn FnMut(&StateChange)>;

pub struct Funnel {
    options: FunnelOptions,
    measurer: Box<dyn TextMeasure>,
    registry: TilingRegistry,
    rows: Vec<Row>,
    points: Vec<DataPoint>,
    items: Vec<FunnelItem>,
    container: Size,
    rect: Rect,
    labels_hidden: bool,
    changes: ChangeSet,
    scope: NotificationScope,
    observers: Vec<Observer>,
}

impl Funnel {
    /// Engine with the proportional text measurer.
    pub fn new(options: FunnelOptions) -> Result<Self, OptionsError> {
        Self::with_measurer(options, ProportionalMeasure)
    }

    pub fn with_measurer(
        options: FunnelOptions,
        measurer: impl TextMeasure + 'static,
    ) -> Result<Self, OptionsError> {
        options.validate()?;
        let mut funnel = Funnel {
            options,
            measurer: Box::new(measurer),
            registry: TilingRegistry::default(),
            rows: Vec::new(),
            points: Vec::new(),
            items: Vec::new(),
            container: DEFAULT_SIZE,
            rect: Rect::from_size(DEFAULT_SIZE),
            labels_hidden: false,
            changes: ChangeSet::new(),
            scope: NotificationScope::new(),
            observers: Vec::new(),
        };
        funnel.changes.request(Stage::DataSource);
        funnel.update();
        Ok(funnel)
    }

    // ========================================================================
    // Inputs
    // ========================================================================

    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.rows = rows;
        self.changes.request(Stage::DataSource);
        self.update();
    }

    /// Install new options; only the stages they invalidate rerun.
    pub fn set_options(&mut self, options: FunnelOptions) -> Result<(), OptionsError> {
        options.validate()?;
        let stage = changes::stage_for_options(&self.options, &options);
        self.options = options;
        if let Some(stage) = stage {
            self.changes.request(stage);
            self.update();
        }
        Ok(())
    }

    /// The host container changed size.
    pub fn resize(&mut self, container: Size) {
        if self.container == container {
            return;
        }
        self.container = container;
        self.changes.request(Stage::Layout);
        self.update();
    }

    /// Register a host algorithm; it is picked up when `algorithm` names it.
    pub fn register_algorithm(&mut self, name: &str, tiling: impl Tiling + Send + Sync + 'static) {
        self.registry.register_custom(name, tiling);
        self.changes.request(Stage::NodesCreate);
        self.update();
    }

    pub fn registry(&self) -> &TilingRegistry {
        &self.registry
    }

    pub fn on_state_change(&mut self, observer: impl FnMut(&StateChange) + 'static) {
        self.observers.push(Box::new(observer));
    }

    // ========================================================================
    // Outputs
    // ========================================================================

    pub fn options(&self) -> &FunnelOptions {
        &self.options
    }

    /// Snapshot of every item
    pub fn items(&self) -> Vec<FunnelItem> {
        self.items.clone()
    }

    /// Snapshot of every created label, in item order
    pub fn labels(&self) -> Vec<LabelDescriptor> {
        self.items.iter().filter_map(|item| item.label.clone()).collect()
    }

    /// Where the figures are drawn
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The whole widget area
    pub fn container(&self) -> Rect {
        Rect::from_size(self.options.size.resolve(self.container))
    }

    /// The adaptive layout hid the labels on the last pass.
    pub fn labels_hidden(&self) -> bool {
        self.labels_hidden
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Set the hover flag of item `id`; hovering an item un-hovers the rest.
    /// Returns whether anything changed.
    pub fn hover_item(&mut self, id: usize, hovered: bool) -> bool {
        if id >= self.items.len() || (hovered && !self.options.hover_enabled) {
            return false;
        }
        self.batch(|funnel| {
            let mut changed = false;
            for item in &mut funnel.items {
                let want = if item.id == id {
                    hovered
                } else {
                    item.state.hovered && !hovered
                };
                changed |= item.state.hovered != want;
                item.state.hovered = want;
            }
            changed
        })
    }

    /// Set the selection flag of item `id`, honoring the selection mode.
    /// Returns whether anything changed.
    pub fn select_item(&mut self, id: usize, selected: bool) -> bool {
        let mode = self.options.selection_mode;
        if id >= self.items.len() || mode == SelectionMode::None {
            return false;
        }
        self.batch(|funnel| {
            let mut changed = false;
            for item in &mut funnel.items {
                let want = if item.id == id {
                    selected
                } else if selected && mode == SelectionMode::Single {
                    false
                } else {
                    item.state.selected
                };
                changed |= item.state.selected != want;
                item.state.selected = want;
            }
            changed
        })
    }

    pub fn clear_hover(&mut self) {
        self.batch(|funnel| funnel.items.iter_mut().for_each(|item| item.state.hovered = false));
    }

    pub fn clear_selection(&mut self) {
        self.batch(|funnel| funnel.items.iter_mut().for_each(|item| item.state.selected = false));
    }

    /// Run `f` inside one notification scope.
    pub fn batch<R>(&mut self, f: impl FnOnce(&mut Funnel) -> R) -> R {
        let mut tx = self.transaction();
        f(&mut tx)
    }

    /// Open a notification scope that closes when the guard drops.
    pub fn transaction(&mut self) -> Transaction<'_> {
        let items = &self.items;
        self.scope.enter(|| items.iter().map(|item| item.state).collect());
        Transaction { funnel: self }
    }

    fn leave_scope(&mut self) {
        let states: Vec<ItemState> = self.items.iter().map(|item| item.state).collect();
        let Some(change) = self.scope.exit(&states) else {
            return;
        };
        crate::log::debug!(changed = change.changes.len(), "item states changed");
        self.changes.request(Stage::Tiles);
        self.update();
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    // ========================================================================
    // Stages
    // ========================================================================

    fn update(&mut self) {
        for stage in self.changes.drain() {
            crate::log::trace!(?stage, "running stage");
            match stage {
                Stage::DataSource => self.update_data_source(),
                Stage::NodesCreate => self.build_nodes(),
                Stage::Labels => self.create_labels(),
                Stage::Layout => self.apply_layout(),
                Stage::Tiling => self.apply_tiling(),
                Stage::Tiles => self.apply_tiles_appearance(),
            }
        }
    }

    fn update_data_source(&mut self) {
        let fields = FieldMapping {
            value_field: self.options.value_field.clone(),
            argument_field: self.options.argument_field.clone(),
            color_field: self.options.color_field.clone(),
        };
        self.points = collect_points(&self.rows, &fields, self.options.sort_data);
        crate::log::debug!(
            rows = self.rows.len(),
            points = self.points.len(),
            "data source updated"
        );
    }

    fn build_nodes(&mut self) {
        let algorithm = self.registry.get(self.options.algorithm.as_deref());
        let percents = algorithm.normalize_values(&self.points);
        let figures =
            algorithm.figures(&percents, self.options.neck_width, self.options.neck_height);
        let mut palette = Palette::new(&self.options.palette);
        let inverted = self.options.inverted;

        self.items = figures
            .into_iter()
            .zip(&self.points)
            .enumerate()
            .map(|(id, (figure, data))| {
                let color = data.color.clone().unwrap_or_else(|| palette.next_color());
                let appearance =
                    ItemAppearance::resolve(&color, ItemState::default(), &self.options.item);
                FunnelItem {
                    id,
                    data: data.clone(),
                    percent: percents.get(id).copied().unwrap_or_default(),
                    figure: if inverted { figure.inverted() } else { figure },
                    coords: Coords::default(),
                    appearance,
                    color,
                    state: ItemState::default(),
                    label: None,
                }
            })
            .collect();
        crate::log::debug!(items = self.items.len(), "nodes created");
    }

    fn create_labels(&mut self) {
        let options = &self.options.label;
        let measurer = self.measurer.as_ref();
        for item in &mut self.items {
            item.label =
                label::create(options, measurer, item.id, &item.data, item.percent, &item.color);
        }
    }

    fn apply_layout(&mut self) {
        let container = self.container();
        let label_options = &self.options.label;
        let labels = self.items.iter().filter_map(|i| i.label.as_ref());
        let need = label::required_space(labels, label_options);
        let reservation = adaptive::reserve(
            container,
            need,
            label_options.horizontal_alignment.side(),
            &self.options.adaptive_layout,
        );

        self.rect = reservation.rect;
        self.labels_hidden = reservation.hide_labels;
        for label in self.items.iter_mut().filter_map(|i| i.label.as_mut()) {
            if reservation.hide_labels {
                label.hide();
            } else {
                label.clear_visibility();
                label.reset_ellipsis();
            }
        }
        crate::log::debug!(rect = %self.rect, need, hidden = self.labels_hidden, "layout settled");
    }

    fn apply_tiling(&mut self) {
        let placement = Placement {
            options: &self.options.label,
            container: self.container(),
            rect: self.rect,
            inverted: self.options.inverted,
            rtl: self.options.rtl_enabled,
        };
        for item in &mut self.items {
            item.coords = mapper::map_figure(&item.figure, &self.rect);
            if let Some(label) = item.label.as_mut().filter(|_| !self.labels_hidden) {
                placement.place(label, &item.coords);
            }
        }
    }

    fn apply_tiles_appearance(&mut self) {
        for item in &mut self.items {
            item.appearance = ItemAppearance::resolve(&item.color, item.state, &self.options.item);
        }
    }
}

/// Scope guard from [`Funnel::transaction`]; derefs to the funnel.
pub struct Transaction<'a> {
    funnel: &'a mut Funnel,
}

impl Deref for Transaction<'_> {
    type Target = Funnel;

    fn deref(&self) -> &Funnel {
        self.funnel
    }
}

impl DerefMut for Transaction<'_> {
    fn deref_mut(&mut self) -> &mut Funnel {
        self.funnel
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        self.funnel.leave_scope();
    }
}
