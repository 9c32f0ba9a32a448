use std::cell::{Cell, RefCell};
use std::rc::Rc;

use funnel_layout::data::rows_from_json;
use funnel_layout::{
    CustomizeText, Funnel, FunnelOptions, LabelOptions, LabelPosition, OptionsError, Rect, Size,
    StateChange,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Every label measures 100x10; the returned counter tracks measure calls.
fn counting_funnel(options: FunnelOptions) -> (Funnel, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let funnel = Funnel::with_measurer(options, move |_: &str, _: &LabelOptions| {
        counter.set(counter.get() + 1);
        Size::new(100.0, 10.0)
    })
    .unwrap();
    (funnel, calls)
}

#[test]
fn default_sort_puts_largest_first() {
    init_tracing();
    let options = FunnelOptions::from_json(r#"{ "valueField": "value" }"#).unwrap();
    let (mut funnel, _) = counting_funnel(options);
    funnel.set_data(rows_from_json(r#"[{ "value": 2 }, { "value": 5 }]"#).unwrap());
    let values: Vec<f64> = funnel.items().iter().map(|i| i.value()).collect();
    assert_eq!(values, vec![5.0, 2.0]);
}

#[test]
fn unsorted_data_keeps_source_order() {
    let options = FunnelOptions::from_json(r#"{ "sortData": false }"#).unwrap();
    let (mut funnel, _) = counting_funnel(options);
    funnel.set_data(rows_from_json(r#"[{ "val": 2 }, { "val": 5 }, { "val": "3" }]"#).unwrap());
    let values: Vec<f64> = funnel.items().iter().map(|i| i.value()).collect();
    assert_eq!(values, vec![2.0, 5.0, 3.0]);
}

#[test]
fn bad_rows_are_dropped() {
    let (mut funnel, _) = counting_funnel(FunnelOptions::default());
    let rows = r#"[
        { "val": -1 }, { "val": "abc" }, { "val": null }, { "arg": "x" }, { "val": 4 }
    ]"#;
    funnel.set_data(rows_from_json(rows).unwrap());
    assert_eq!(funnel.items().len(), 1);
}

#[test]
fn resize_repositions_without_remeasuring() {
    let (mut funnel, calls) = counting_funnel(FunnelOptions::default());
    funnel.resize(Size::new(800.0, 600.0));
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }, { "val": 2 }, { "val": 1 }]"#).unwrap());
    assert_eq!(calls.get(), 3);
    let before = funnel.labels();

    funnel.resize(Size::new(1000.0, 500.0));
    assert_eq!(calls.get(), 3);
    let after = funnel.labels();
    assert_eq!(before.len(), after.len());
    assert_eq!(before[0].text, after[0].text);
    assert_ne!(before[0].shift, after[0].shift);
    assert_eq!(funnel.rect(), Rect::new(0.0, 0.0, 880.0, 500.0));
}

#[test]
fn data_change_remeasures() {
    let (mut funnel, calls) = counting_funnel(FunnelOptions::default());
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }]"#).unwrap());
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }, { "val": 1 }]"#).unwrap());
    assert_eq!(calls.get(), 3);
}

#[test]
fn style_only_changes_keep_labels() {
    let (mut funnel, calls) = counting_funnel(FunnelOptions::default());
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }]"#).unwrap());
    let mut options = funnel.options().clone();
    options.item.border.visible = true;
    funnel.set_options(options).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(funnel.items()[0].appearance.stroke.as_deref(), Some("#ffffff"));
}

#[test]
fn zero_values_have_no_label_by_default() {
    let (mut funnel, calls) = counting_funnel(FunnelOptions::default());
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }, { "val": 0 }]"#).unwrap());
    assert_eq!(funnel.items().len(), 2);
    assert_eq!(funnel.labels().len(), 1);
    assert!(funnel.items()[1].label.is_none());
    assert_eq!(calls.get(), 1);
}

#[test]
fn labels_off_reserve_nothing() {
    let (mut funnel, calls) =
        counting_funnel(FunnelOptions::from_json(r#"{ "label": { "visible": false } }"#).unwrap());
    funnel.resize(Size::new(800.0, 600.0));
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }]"#).unwrap());
    assert!(funnel.labels().is_empty());
    assert_eq!(calls.get(), 0);
    assert_eq!(funnel.rect(), Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn customized_label_text() {
    let mut options = FunnelOptions::default();
    options.label.customize_text = Some(CustomizeText::new(|info| {
        format!("{} = {}", info.argument, info.value_text)
    }));
    let mut funnel = Funnel::new(options).unwrap();
    funnel.set_data(rows_from_json(r#"[{ "arg": "Leads", "val": 120 }]"#).unwrap());
    assert_eq!(funnel.labels()[0].text, "Leads = 120");
}

#[test]
fn default_text_joins_argument_and_value() {
    let mut funnel = Funnel::new(FunnelOptions::default()).unwrap();
    funnel.set_data(rows_from_json(r#"[{ "arg": "Two", "val": 5 }]"#).unwrap());
    let label = &funnel.labels()[0];
    assert_eq!(label.text, "Two 5");
    assert!(label.measured.w > 0.0 && label.measured.h > 0.0);
}

#[test]
fn row_colors_win_over_palette() {
    let mut funnel = Funnel::new(FunnelOptions::default()).unwrap();
    let rows = r##"[{ "val": 5, "color": "#121212" }, { "val": 2 }]"##;
    funnel.set_data(rows_from_json(rows).unwrap());
    let colors: Vec<String> = funnel.items().into_iter().map(|i| i.color).collect();
    assert_eq!(colors, vec!["#121212".to_string(), "#5f8b95".to_string()]);
}

#[test]
fn dynamic_height_fills_the_rect() {
    let json = r#"{ "algorithm": "dynamicHeight", "label": { "visible": false } }"#;
    let options = FunnelOptions::from_json(json).unwrap();
    let mut funnel = Funnel::new(options).unwrap();
    funnel.resize(Size::new(400.0, 400.0));
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }, { "val": 1 }]"#).unwrap());
    let items = funnel.items();
    assert_eq!(items[0].percent, 0.75);
    // first segment spans the top three quarters
    assert_eq!(items[0].coords.vertex(2).y, 300.0);
    assert_eq!(items[1].coords.vertex(2).y, 400.0);
}

#[test]
fn unknown_algorithm_falls_back_to_dynamic_slope() {
    let options = FunnelOptions::from_json(r#"{ "algorithm": "spiral" }"#).unwrap();
    let mut funnel = Funnel::new(options).unwrap();
    funnel.set_data(rows_from_json(r#"[{ "val": 4 }, { "val": 2 }]"#).unwrap());
    let items = funnel.items();
    assert_eq!(items[0].percent, 1.0);
    assert_eq!(items[1].percent, 0.5);
}

#[test]
fn inverted_funnel_puts_the_widest_segment_at_the_bottom() {
    let options =
        FunnelOptions::from_json(r#"{ "inverted": true, "label": { "visible": false } }"#).unwrap();
    let mut funnel = Funnel::new(options).unwrap();
    funnel.set_data(rows_from_json(r#"[{ "val": 4 }, { "val": 2 }]"#).unwrap());
    let first = &funnel.items()[0];
    assert_eq!(first.coords.vertex(0).y, 400.0);
    assert_eq!(first.coords.vertex(1).x - first.coords.vertex(0).x, 400.0);
}

#[test]
fn one_notification_per_clear() {
    let options = FunnelOptions::from_json(r#"{ "selectionMode": "multiple" }"#).unwrap();
    let mut funnel = Funnel::new(options).unwrap();
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }, { "val": 2 }, { "val": 1 }]"#).unwrap());
    for id in 0..3 {
        funnel.select_item(id, true);
    }

    let seen: Rc<RefCell<Vec<StateChange>>> = Rc::default();
    let sink = Rc::clone(&seen);
    funnel.on_state_change(move |change| sink.borrow_mut().push(change.clone()));

    funnel.clear_selection();
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].selection_changed().count(), 3);
    assert!(funnel.items().iter().all(|i| !i.is_selected()));
}

#[test]
fn snapshots_are_detached() {
    let mut funnel = Funnel::new(FunnelOptions::default()).unwrap();
    funnel.set_data(rows_from_json(r#"[{ "val": 3 }]"#).unwrap());
    let mut items = funnel.items();
    items[0].state.selected = true;
    items.clear();
    assert_eq!(funnel.items().len(), 1);
    assert!(!funnel.items()[0].is_selected());
}

#[test]
fn options_errors_carry_codes() {
    use miette::Diagnostic;

    let err = FunnelOptions::from_json(r#"{ "neckHeight": 2 }"#).unwrap_err();
    assert!(matches!(err, OptionsError::FractionOutOfRange { field: "neckHeight", .. }));
    assert_eq!(
        err.code().map(|c| c.to_string()).as_deref(),
        Some("funnel::options::fraction_out_of_range")
    );

    let err = Funnel::new(FunnelOptions { neck_width: -0.5, ..Default::default() }).err();
    assert!(err.is_some());
}

#[test]
fn position_is_normalized_at_parse_time() {
    let options = FunnelOptions::from_json(r#"{ "label": { "position": "OUTSIDE" } }"#).unwrap();
    assert_eq!(options.label.position, LabelPosition::Outside);
}
