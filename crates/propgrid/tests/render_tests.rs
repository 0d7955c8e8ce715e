//! Rendering tests: filtering, ordering, grouping, widget dispatch and the
//! host entry points. Providers are mocked, no real widget toolkit needed.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use propgrid::{
    CapabilityRegistry, Choice, FieldSettings, FieldStyle, GridConfig, HostContainer, Metadata,
    NativeFn, PropertyBag, PropertyGrid, PropertyMeta, PropertyType, Value, ValueMap, WidgetKind,
};
use propgrid_test_utils::{MockProviders, ProviderCall, render};

fn values(container: &HostContainer) -> ValueMap {
    container.get_values().expect("grid was rendered")
}

fn keys(values: &ValueMap) -> Vec<&str> {
    values.keys().map(String::as_str).collect()
}

#[test]
fn test_name_and_active_render_under_other() {
    propgrid_core::logging::try_init();
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let source = Value::from(PropertyBag::new().with("name", "Bob").with("active", true));
    let container = render(&mut grid, &source, None, None);

    let instance = container.grid().unwrap();
    assert_eq!(instance.groups().len(), 1);
    assert_eq!(instance.groups()[0].name, "Other");
    assert_eq!(instance.groups()[0].properties.len(), 2);
    assert_eq!(container.html().matches("class=\"pgRow\"").count(), 2);
    assert!(container.html().contains("type=\"checkbox\" id=\"pg0active\""));

    let expected: ValueMap = [
        ("name".to_string(), Value::from("Bob")),
        ("active".to_string(), Value::Bool(true)),
    ]
    .into_iter()
    .collect();
    assert_eq!(values(&container), expected);
}

#[test]
fn test_explicit_order_with_empty_metadata() {
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let source = Value::from(PropertyBag::new().with("name", "Bob").with("active", true));
    let order = ["name", "active"];
    let container = render(&mut grid, &source, Some(&Metadata::new()), Some(&order[..]));

    let instance = container.grid().unwrap();
    assert_eq!(instance.groups().len(), 1);
    assert_eq!(instance.groups()[0].name, "Other");
    assert_eq!(container.html().matches("class=\"pgRow\"").count(), 2);
    let collected = values(&container);
    assert_eq!(keys(&collected), vec!["name", "active"]);
    assert_eq!(collected["name"], Value::from("Bob"));
    assert_eq!(collected["active"], Value::Bool(true));
}

#[test]
fn test_array_source_renders_indices() {
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let source = Value::from(vec![Value::from("first"), Value::from(2)]);
    let container = render(&mut grid, &source, None, None);

    let collected = values(&container);
    assert_eq!(keys(&collected), vec!["0", "1"]);
    assert_eq!(collected["0"], Value::from("first"));
    assert_eq!(collected["1"], Value::Number(2.0));
    assert!(container.html().contains("id=\"pg00\""));
}

#[test]
fn test_round_trip_without_edits() {
    let mocks = MockProviders::new();
    let mut grid = mocks.property_grid();
    let source = PropertyBag::new()
        .with("title", "Report")
        .with("count", 3)
        .with("ratio", 0.25)
        .with("visible", false)
        .with("mode", "fast")
        .with("notes", "line one\nline two");
    let metadata = Metadata::new()
        .with(
            "mode",
            PropertyMeta::new()
                .of_type(PropertyType::Options)
                .choices(["slow", "fast"]),
        )
        .with("notes", PropertyMeta::new().of_type(PropertyType::TextArea));
    let container = render(&mut grid, &Value::from(source.clone()), Some(&metadata), None);

    let collected = values(&container);
    for (name, value) in source.iter() {
        assert_eq!(collected.get(name), Some(value), "{}", name);
    }
    assert_eq!(keys(&collected), source.keys().collect::<Vec<_>>());
}

#[test]
fn test_numbers_round_trip_without_spinner() {
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let source = Value::from(PropertyBag::new().with("count", 42));
    let container = render(&mut grid, &source, None, None);

    let widget = container.grid().unwrap().widget("count").unwrap();
    assert_eq!(widget.kind(), WidgetKind::TextInput);
    assert_eq!(values(&container)["count"], Value::Number(42.0));
}

#[test]
fn test_filters_inherited_functions_and_hidden() {
    let prototype = Arc::new(PropertyBag::new().with("inherited", "base"));
    let mut source = PropertyBag::with_prototype(prototype);
    source.insert("visible", "yes");
    source.insert("hidden", "no");
    source.insert("compute", NativeFn::new(|_| Value::Null));

    let metadata = Metadata::new().with("hidden", PropertyMeta::new().browsable(false));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let order = ["inherited", "compute", "hidden", "visible", "missing"];
    let container = render(&mut grid, &Value::from(source), Some(&metadata), Some(&order[..]));

    assert_eq!(keys(&values(&container)), vec!["visible"]);
    assert!(!container.html().contains("inherited"));
    assert!(!container.html().contains("compute"));
}

#[test]
fn test_explicit_order_and_duplicates() {
    let source = Value::from(PropertyBag::new().with("a", "1").with("b", "2").with("c", "3"));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let order = ["c", "a", "c"];
    let container = render(&mut grid, &source, None, Some(&order[..]));

    assert_eq!(keys(&values(&container)), vec!["c", "a"]);
    let html = container.html();
    assert!(html.find("pg0c").unwrap() < html.find("pg0a").unwrap());
}

#[test]
fn test_named_groups_first_seen_then_other() {
    let source = Value::from(
        PropertyBag::new()
            .with("plain", "x")
            .with("width", 10)
            .with("color", "red")
            .with("height", 20),
    );
    let metadata = Metadata::new()
        .with("width", PropertyMeta::new().group("Size"))
        .with("color", PropertyMeta::new().group("Look"))
        .with("height", PropertyMeta::new().group("Size"));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);

    let instance = container.grid().unwrap();
    let groups: Vec<(&str, Vec<&str>)> = instance
        .groups()
        .iter()
        .map(|g| {
            (
                g.name.as_str(),
                g.properties.iter().map(|p| p.name.as_str()).collect(),
            )
        })
        .collect();
    assert_eq!(
        groups,
        vec![
            ("Size", vec!["width", "height"]),
            ("Look", vec!["color"]),
            ("Other", vec!["plain"]),
        ]
    );
}

#[test]
fn test_empty_group_name_falls_back_to_default() {
    let source = Value::from(PropertyBag::new().with("a", "1"));
    let metadata = Metadata::new().with("a", PropertyMeta::new().group(""));
    let mut grid = PropertyGrid::with_config(
        CapabilityRegistry::new(),
        GridConfig::default().with_default_group("Misc"),
    );
    let container = render(&mut grid, &source, Some(&metadata), None);
    assert_eq!(container.grid().unwrap().groups()[0].name, "Misc");
}

#[test]
fn test_dropdown_preselects_matching_option() {
    let source = Value::from(PropertyBag::new().with("level", "b"));
    let metadata = Metadata::new().with(
        "level",
        PropertyMeta::new()
            .of_type(PropertyType::Options)
            .choices(["a", "b", "c"]),
    );
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);

    assert!(container.html().contains("<option value=\"b\" selected>b</option>"));
    assert_eq!(values(&container)["level"], Value::from("b"));
}

#[test]
fn test_dropdown_without_match_selects_first() {
    let source = Value::from(PropertyBag::new().with("size", 7));
    let metadata = Metadata::new().with(
        "size",
        PropertyMeta::new().of_type(PropertyType::Options).choices([
            Choice::new(1, "Small"),
            Choice::new(2, "Large"),
        ]),
    );
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);

    assert!(!container.html().contains(" selected"));
    assert!(container.html().contains("<option value=\"2\">Large</option>"));
    assert_eq!(values(&container)["size"], Value::Number(1.0));
}

#[test]
fn test_options_without_choices_fall_back() {
    let source = Value::from(PropertyBag::new().with("mode", "x"));
    let metadata = Metadata::new().with(
        "mode",
        PropertyMeta::new()
            .of_type(PropertyType::Options)
            .settings(FieldSettings::new()),
    );
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);
    let widget = container.grid().unwrap().widget("mode").unwrap();
    assert_eq!(widget.kind(), WidgetKind::TextInput);
}

#[test]
fn test_checkbox_follows_truthiness_when_declared() {
    let source = Value::from(PropertyBag::new().with("on", 1).with("off", ""));
    let metadata = Metadata::new()
        .with("on", PropertyMeta::new().of_type(PropertyType::Boolean))
        .with("off", PropertyMeta::new().type_name("boolean"));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);

    assert!(container.html().contains("id=\"pg0on\" value=\"on\" checked"));
    let collected = values(&container);
    assert_eq!(collected["on"], Value::Bool(true));
    assert_eq!(collected["off"], Value::Bool(false));
}

#[test]
fn test_unknown_type_name_infers_from_value() {
    let source = Value::from(PropertyBag::new().with("flag", true));
    let metadata = Metadata::new().with("flag", PropertyMeta::new().type_name("slider"));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);
    let widget = container.grid().unwrap().widget("flag").unwrap();
    assert_eq!(widget.kind(), WidgetKind::Checkbox);
}

#[test]
fn test_provider_kinds_with_and_without_providers() {
    let source = Value::from(
        PropertyBag::new()
            .with("count", 5)
            .with("tint", "#ff0000")
            .with("labels", "x,y"),
    );
    let metadata = Metadata::new()
        .with("tint", PropertyMeta::new().of_type(PropertyType::Color))
        .with("labels", PropertyMeta::new().of_type(PropertyType::Tags));

    let mocks = MockProviders::new();
    let mut with = mocks.property_grid();
    let container = render(&mut with, &source, Some(&metadata), None);
    let instance = container.grid().unwrap();
    assert_eq!(instance.widget("count").unwrap().kind(), WidgetKind::NumberSpinner);
    assert_eq!(instance.widget("tint").unwrap().kind(), WidgetKind::ColorPicker);
    assert_eq!(instance.widget("labels").unwrap().kind(), WidgetKind::TagsEditor);

    let mut without = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut without, &source, Some(&metadata), None);
    let instance = container.grid().unwrap();
    for name in ["count", "tint", "labels"] {
        assert_eq!(instance.widget(name).unwrap().kind(), WidgetKind::TextInput);
    }
    assert_eq!(values(&container)["tint"], Value::from("#ff0000"));
    assert_eq!(values(&container)["labels"], Value::from("x,y"));
}

#[test]
fn test_providers_attach_once_in_order() {
    let mocks = MockProviders::new();
    let mut grid = mocks.property_grid();
    let source = Value::from(
        PropertyBag::new()
            .with("labels", "a,b")
            .with("count", 2)
            .with("tint", "#00ff00"),
    );
    let metadata = Metadata::new()
        .with(
            "labels",
            PropertyMeta::new()
                .of_type(PropertyType::Tags)
                .standard_tags(["c"]),
        )
        .with(
            "count",
            PropertyMeta::new().settings(FieldSettings::new().extra("min", 0).extra("step", 2)),
        )
        .with("tint", PropertyMeta::new().of_type(PropertyType::Color));
    let container = render(&mut grid, &source, Some(&metadata), None);

    assert_eq!(
        mocks.log.attached_elements(),
        vec!["pg0labels", "pg0count", "pg0tint"]
    );
    assert_eq!(
        mocks.log.calls()[0],
        ProviderCall::AttachTagEditor {
            element: "pg0labels".to_string(),
            initial: vec!["a".to_string(), "b".to_string()],
            suggestions: vec!["c".to_string()],
        }
    );
    let options = mocks.spinner.options_for("pg0count").unwrap();
    assert_eq!(options.min, Some(0.0));
    assert_eq!(options.max, None);
    assert_eq!(options.step, Some(2.0));
    assert_eq!(mocks.color_picker.initial_for("pg0tint").as_deref(), Some("#00ff00"));

    assert!(container.grid().unwrap().is_bound("labels"));
    assert_eq!(values(&container)["tint"], Value::from("rgb(0, 255, 0)"));
}

#[test]
fn test_attach_counts_are_per_provider() {
    let mocks = MockProviders::new();
    let mut grid = mocks.property_grid();
    let source = Value::from(PropertyBag::new().with("count", 1).with("labels", "a"));
    let metadata = Metadata::new().with("labels", PropertyMeta::new().of_type(PropertyType::Tags));
    render(&mut grid, &source, Some(&metadata), None);

    assert_eq!(mocks.log.call_count(), 2);
    assert_eq!(mocks.spinner.count_attaches(), 1);
    assert_eq!(mocks.tag_editor.count_attaches(), 1);
    assert_eq!(mocks.color_picker.count_attaches(), 0);
}

#[test]
fn test_text_input_settings_and_labels() {
    let source = Value::from(PropertyBag::new().with("id", "A-1").with("title", "<b>"));
    let metadata = Metadata::new()
        .with(
            "id",
            PropertyMeta::new()
                .display_name("Identifier")
                .description("Read only key")
                .settings(FieldSettings::new().read_only().style(FieldStyle::Large)),
        )
        .with("title", PropertyMeta::new().description(""));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, Some(&metadata), None);
    let html = container.html();

    assert!(html.contains(
        "Identifier<span class=\"pgTooltip\" title=\"Read only key\">[?]</span>"
    ));
    assert!(html.contains(
        "<input type=\"text\" class=\"pgTextLarge\" readonly=\"readonly\" id=\"pg0id\""
    ));
    assert!(html.contains("value=\"&lt;b&gt;\""));
    assert_eq!(html.matches("pgTooltip").count(), 1);
}

#[test]
fn test_quotes_in_names_stay_inside_the_id_attribute() {
    let name = "x\"onclick=\"evil()";
    let source = Value::from(PropertyBag::new().with(name, "v"));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, None, None);
    let html = container.html();

    assert!(!html.contains("id=\"pg0x\"onclick"));
    assert!(html.contains("id=\"pg0x&quot;onclick=&quot;evil()\" value=\"v\""));
    assert_eq!(values(&container)[name], Value::from("v"));
}

#[test]
fn test_whitespace_in_names_is_normalized() {
    let source = Value::from(PropertyBag::new().with("first name", "Ann"));
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let container = render(&mut grid, &source, None, None);
    let widget = container.grid().unwrap().widget("first name").unwrap();
    assert_eq!(widget.element_id().as_str(), "pg0first_name");
    assert_eq!(values(&container)["first name"], Value::from("Ann"));
}

#[test]
fn test_rerender_supersedes_previous_grid() {
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let mut container = HostContainer::new();
    grid.render(
        &mut container,
        &Value::from(PropertyBag::new().with("old", "1")),
        None,
        None,
    );
    grid.render(
        &mut container,
        &Value::from(PropertyBag::new().with("new", "2")),
        None,
        None,
    );

    assert_eq!(container.grid().unwrap().id().as_str(), "pg1");
    assert_eq!(keys(&values(&container)), vec!["new"]);
    assert!(!container.html().contains("old"));
}

#[test]
fn test_two_containers_get_distinct_ids() {
    let mut grid = PropertyGrid::with_config(
        CapabilityRegistry::new(),
        GridConfig::default().with_id_prefix("grid"),
    );
    let source = Value::from(PropertyBag::new().with("x", "1"));
    let first = render(&mut grid, &source, None, None);
    let second = render(&mut grid, &source, None, None);

    assert!(first.html().contains("id=\"grid0x\""));
    assert!(second.html().contains("id=\"grid1x\""));
}

#[test]
fn test_invoke_modes() {
    let mut grid = PropertyGrid::new(CapabilityRegistry::new());
    let mut container = HostContainer::new();

    assert_eq!(grid.invoke(&mut container, &Value::from("get"), None, None), None);

    let source = Value::from(PropertyBag::new().with("x", "1"));
    assert_eq!(grid.invoke(&mut container, &source, None, None), None);
    assert!(container.grid().is_some());

    let got = grid.invoke(&mut container, &Value::from("get"), None, None);
    assert_eq!(got.unwrap()["x"], Value::from("1"));

    assert_eq!(grid.invoke(&mut container, &Value::from("reset"), None, None), None);
    assert_eq!(container.grid().unwrap().id().as_str(), "pg0");

    grid.invoke(&mut container, &Value::from(3), None, None);
    assert_eq!(container.grid().unwrap().id().as_str(), "pg0");
}

#[test]
fn test_get_values_before_render() {
    let container = HostContainer::new();
    assert_eq!(propgrid::get_values(&container), None);
}
