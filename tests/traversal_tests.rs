//! Tests for element traversals: `PathLens::map` and `PathLens::tap`.
//!
//! - `map` views a sequence focus with a function applied to each element
//! - `tap` focuses a path inside every element matching a predicate and
//!   writes values back at the positions the elements came from

use pathlens::optics::{OpticsError, lens, lens_of};
use pathlens::value::{Value, ValueKind};
use pathlens::{record, sequence};
use rstest::rstest;

fn staff() -> Value {
    record! {
        "staff" => sequence![
            record! { "name" => "John", "age" => 41 },
            record! { "name" => "Mary", "age" => 29 },
            record! { "name" => "Alan", "age" => 35 },
            record! { "name" => "Kate", "age" => 23 },
        ],
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn older_than(limit: i64) -> impl Fn(&Value) -> bool + Send + Sync + 'static {
    move |person: &Value| {
        lens_of(person.clone())
            .field("age")
            .get()
            .and_then(|age| age.as_i64())
            .is_some_and(|age| age > limit)
    }
}

fn double(value: Value) -> Value {
    Value::from(value.as_i64().unwrap_or_default() * 2)
}

// =============================================================================
// map
// =============================================================================

#[rstest]
fn test_map_reads_each_element() {
    let ages = lens_of(sequence![1, 2, 3]).map(double);
    assert_eq!(ages.get(), Some(sequence![2, 4, 6]));
}

#[rstest]
fn test_map_then_narrow_into_element() {
    let root = record! { "points" => sequence![record! { "x" => 1 }, record! { "x" => 2 }] };
    let first_x = lens().field("points").map(|point| point).at_path("0.x");
    assert_eq!(first_x.get_in(&root), Some(Value::from(1)));
    assert_eq!(
        first_x.set_in(&root, 9),
        record! { "points" => sequence![record! { "x" => 9 }, record! { "x" => 2 }] }
    );
}

#[rstest]
fn test_map_write_distributes_by_position() {
    let root = record! { "values" => sequence![1, 2, 3] };
    let doubled = lens().field("values").map(double);
    assert_eq!(
        doubled.set_in(&root, sequence![7, 8]),
        record! { "values" => sequence![7, 8, 3] }
    );
    assert_eq!(
        doubled.set_in(&root, sequence![7, 8, 9, 10]),
        record! { "values" => sequence![7, 8, 9, 10] }
    );
}

#[rstest]
fn test_map_on_non_sequence_reads_absent() {
    let root = record! { "values" => "not a sequence" };
    assert_eq!(lens().field("values").map(double).get_in(&root), None);
}

// =============================================================================
// tap: reads
// =============================================================================

#[rstest]
fn test_tap_all_reads_field_of_every_element() {
    let names = lens_of(staff()).field("staff").tap_all().field("name");
    assert_eq!(names.get().unwrap(), sequence!["John", "Mary", "Alan", "Kate"]);
    assert_eq!(names.count().unwrap(), 4);
}

#[rstest]
#[case(30, sequence!["John", "Alan"])]
#[case(40, sequence!["John"])]
#[case(50, sequence![])]
#[case(0, sequence!["John", "Mary", "Alan", "Kate"])]
fn test_tap_filters_by_predicate(#[case] limit: i64, #[case] expected: Value) {
    let names = lens_of(staff())
        .field("staff")
        .tap(older_than(limit))
        .field("name");
    assert_eq!(names.get().unwrap(), expected);
}

#[rstest]
fn test_tap_whole_elements() {
    let seniors = lens_of(staff()).field("staff").tap(older_than(40));
    assert_eq!(
        seniors.get().unwrap(),
        sequence![record! { "name" => "John", "age" => 41 }]
    );
}

// =============================================================================
// tap: writes
// =============================================================================

#[rstest]
fn test_tap_set_rezips_into_original_positions() {
    let names = lens_of(staff())
        .field("staff")
        .tap(older_than(30))
        .field("name");

    let updated = names.set(sequence!["Johnny", "Al"]).unwrap();
    assert_eq!(
        lens().field("staff").tap_all().field("name").get_in(&updated).unwrap(),
        sequence!["Johnny", "Mary", "Al", "Kate"]
    );
    assert_eq!(
        lens().field("staff").tap_all().field("age").get_in(&updated).unwrap(),
        sequence![41, 29, 35, 23]
    );
}

#[rstest]
#[case(sequence!["only one"], 1)]
#[case(sequence!["a", "b", "c"], 3)]
fn test_tap_set_rejects_length_mismatch(#[case] values: Value, #[case] received: usize) {
    init_tracing();
    let names = lens_of(staff())
        .field("staff")
        .tap(older_than(30))
        .field("name");

    assert_eq!(
        names.set(values).unwrap_err(),
        OpticsError::LengthMismatch {
            expected: 2,
            received,
        }
    );
}

#[rstest]
fn test_tap_set_synthesizes_element_paths() {
    let root = sequence![record! {}, record! { "tags" => sequence!["x"] }];
    let first_tags = lens().tap_all().at_path("tags.0");

    assert_eq!(first_tags.get_in(&root).unwrap(), sequence![Value::Null, "x"]);
    assert_eq!(
        first_tags.set_in(&root, sequence!["a", "b"]).unwrap(),
        sequence![
            record! { "tags" => sequence!["a"] },
            record! { "tags" => sequence!["b"] },
        ]
    );
}

#[rstest]
fn test_tap_put_continues_chain() {
    let updated = lens_of(staff())
        .field("staff")
        .tap(older_than(40))
        .field("age")
        .put(sequence![42])
        .unwrap()
        .field("company")
        .set("Microsoft");

    assert_eq!(lens_of(updated.clone()).at_path("staff.0.age").get(), Some(Value::from(42)));
    assert_eq!(lens_of(updated).field("company").get(), Some(Value::from("Microsoft")));
}

#[rstest]
fn test_tap_map_rewrites_matches_only() {
    let updated = lens_of(staff())
        .field("staff")
        .tap(older_than(30))
        .field("age")
        .map(|age| Value::from(age.and_then(|age| age.as_i64()).unwrap_or_default() + 1))
        .unwrap();

    assert_eq!(
        lens().field("staff").tap_all().field("age").get_in(updated.root()).unwrap(),
        sequence![42, 29, 36, 23]
    );
}

#[rstest]
fn test_tap_on_non_sequence_is_rejected() {
    let root = record! { "staff" => record! { "name" => "John" } };
    let names = lens().field("staff").tap_all().field("name");
    assert_eq!(
        names.get_in(&root).unwrap_err(),
        OpticsError::NotASequence {
            operation: "get",
            found: ValueKind::Record,
        }
    );
}

#[rstest]
fn test_tap_does_not_mutate_root() {
    let root = staff();
    let snapshot = root.clone();
    let _ = lens()
        .field("staff")
        .tap_all()
        .field("name")
        .set_in(&root, sequence!["a", "b", "c", "d"])
        .unwrap();
    assert_eq!(root, snapshot);
}
