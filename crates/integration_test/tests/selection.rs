//! Tag selection, key resolution, and root validation.

use integration_test::{Example, NestedExample, example};
use pretty_assertions::assert_eq;
use serde_json::json;
use tagview::{Error, Project, Projection, Value};

fn to_json(projection: &Projection) -> serde_json::Value {
    serde_json::to_value(projection).unwrap()
}

#[test]
fn project_with_one() {
    let projection = tagview::project(&example(), ["one"]).unwrap();

    assert_eq!(
        to_json(&projection),
        json!({
            "One": "1",
            "tagged": "t",
            "NestedOne": {"A": "a"},
            "SliceOne": [{"A": "ab"}, {"A": "b"}],
        })
    );
}

#[test]
fn project_with_two() {
    let projection = tagview::project(&example(), ["two"]).unwrap();

    assert_eq!(
        to_json(&projection),
        json!({
            "Two": "2",
            "tagged": "t",
            "NestedTwo": {"A": "b", "B": "a"},
            "SliceTwo": [{"A": "ab", "B": "ba"}, {"A": "b", "B": "a"}],
        })
    );
}

#[test]
fn project_with_one_and_two() {
    let projection = tagview::project(&example(), ["one", "two"]).unwrap();

    assert_eq!(
        to_json(&projection),
        json!({
            "One": "1",
            "Two": "2",
            "tagged": "t",
            "NestedOne": {"A": "a", "B": "b"},
            "NestedTwo": {"A": "b", "B": "a"},
            "SliceOne": [{"A": "ab", "B": "ba"}, {"A": "b", "B": "a"}],
            "SliceTwo": [{"A": "ab", "B": "ba"}, {"A": "b", "B": "a"}],
        })
    );
}

#[test]
fn nested_structs_project_to_objects() {
    let projection = tagview::project(&example(), ["two"]).unwrap();

    let nested = projection["NestedTwo"].as_object().unwrap();
    assert_eq!(nested["A"], Value::from("b"));

    let slice = projection["SliceTwo"].as_objects().unwrap();
    assert_eq!(slice.len(), 2);
    assert_eq!(slice[1]["B"], Value::from("a"));
}

#[test]
fn unknown_tags_select_nothing() {
    let projection = tagview::project(&example(), ["three"]).unwrap();

    assert!(projection.is_empty());
}

#[test]
fn selection_is_monotonic() {
    let tag_sets: [&[&str]; 4] =
        [&["one"], &["two"], &["one", "two"], &["one", "two", "three"]];

    for (smaller, larger) in [(0, 2), (1, 2), (2, 3)] {
        let small = tagview::project(&example(), tag_sets[smaller]).unwrap();
        let large = tagview::project(&example(), tag_sets[larger]).unwrap();

        for key in small.keys() {
            assert!(
                large.contains_key(key),
                "`{key}` missing from {:?}",
                tag_sets[larger]
            );
        }
    }
}

#[test]
fn duplicate_and_unordered_tags_are_irrelevant() {
    let ordered = tagview::project(&example(), ["one", "two"]).unwrap();
    let shuffled =
        tagview::project(&example(), ["two", "one", "two"]).unwrap();

    assert_eq!(ordered, shuffled);
}

#[test]
fn untagged_field_is_excluded_by_default() {
    let projection =
        tagview::project(&example(), ["one", "two", "None"]).unwrap();

    assert!(!projection.contains_key("None"));
    assert!(!projection.contains_key("none"));
}

#[test]
fn keys_follow_naming_then_identifier() {
    let descriptor = example().descriptor();

    for field in descriptor.fields() {
        let expected = match field.ident() {
            "tagged" => "tagged",
            "nested_one" => "NestedOne",
            _ => continue,
        };
        assert_eq!(field.key(), expected);
    }

    let projection = tagview::project(&example(), ["one"]).unwrap();
    assert!(projection.contains_key("tagged"));
    assert!(!projection.contains_key("Tagged"));
}

#[derive(Project)]
struct Spacing {
    #[project(tags = " spaced , other ")]
    padded: u8,
    #[project(tags = ",,")]
    only_commas: u8,
    #[project(tags = "x", json = ",omitempty")]
    empty_override: u8,
}

#[test]
fn selector_tokens_are_trimmed() {
    let value = Spacing { padded: 1, only_commas: 2, empty_override: 3 };

    let projection = tagview::project(&value, ["spaced", "x"]).unwrap();

    assert_eq!(
        to_json(&projection),
        json!({"padded": 1, "empty_override": 3})
    );
}

#[test]
fn empty_tag_set_is_rejected() {
    let error = tagview::project(&example(), Vec::<String>::new()).unwrap_err();

    assert!(matches!(error, Error::NoTagsProvided));
    assert_eq!(error.to_string(), "no selector tags provided");
}

#[test]
fn non_struct_roots_are_rejected() {
    let error = tagview::project(&42, ["a"]).unwrap_err();
    assert!(matches!(error, Error::UnsupportedRootType { type_name: "i32" }));

    let list = vec![NestedExample::new("a", "b")];
    let error = tagview::project(&list, ["one"]).unwrap_err();
    assert!(matches!(error, Error::UnsupportedRootType { .. }));

    let nil: Option<&Example> = None;
    let error = tagview::project(&nil, ["one"]).unwrap_err();
    assert!(matches!(error, Error::UnsupportedRootType { .. }));
}

#[test]
fn references_are_unwrapped_at_the_root() {
    let value = example();
    let wrapped = std::sync::Arc::new(Some(Box::new(&value)));

    let direct = tagview::project(&value, ["one"]).unwrap();
    let through = tagview::project(&wrapped, ["one"]).unwrap();

    assert_eq!(direct, through);
}
