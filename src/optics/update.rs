//! Copy-on-write edits of a single container level.
//!
//! Every lens setter is a chain of [`write_key`] calls, one per path step.
//! Each call shallow-copies exactly one container; the children it does not
//! replace are shared with the input by reference. Nothing here mutates a
//! value that is reachable from its arguments.

use crate::value::{Entries, PathKey, Value};

/// Reads the child `key` of `container`.
///
/// Missing containers, scalars, `Null` children and out-of-range indices all
/// read as `None`. A record answers index keys by their decimal spelling.
pub(crate) fn read_key(container: Option<&Value>, key: &PathKey) -> Option<Value> {
    let child = match (container?, key) {
        (Value::Sequence(items), PathKey::Index(position)) => items.get(*position),
        (Value::Record(entries), PathKey::Field(name)) => entries.get(name),
        (Value::Record(entries), PathKey::Index(position)) => entries.get(&position.to_string()),
        _ => None,
    };
    child.cloned().and_then(Value::present)
}

/// Gaps longer than this are not padded with `Null`; the sequence is
/// overlaid onto a record keyed by decimal position instead.
pub(crate) const PADDING_LIMIT: usize = 1024;

/// Returns a copy of `container` whose child `key` is `value`.
///
/// The container is overlaid onto the default container for `key`: an
/// existing record stays a record, an existing sequence stays a sequence
/// for index keys and becomes a record keyed by position for field keys, and
/// anything else (absent, `Null`, a scalar) is replaced by
/// [`PathKey::default_container`].
pub(crate) fn write_key(container: Option<&Value>, key: &PathKey, value: Value) -> Value {
    match (container, key) {
        (Some(Value::Sequence(items)), PathKey::Index(position)) => {
            write_position(items, *position, value)
        }
        (Some(Value::Record(entries)), _) => {
            let mut entries = Entries::clone(entries);
            entries.insert(key.record_key(), value);
            Value::record(entries)
        }
        (Some(Value::Sequence(items)), PathKey::Field(name)) => {
            tracing::trace!(field = %name, length = items.len(), "overlaying sequence onto record");
            let mut entries = positional_entries(items);
            entries.insert(name.clone(), value);
            Value::record(entries)
        }
        (existing, _) => {
            tracing::trace!(
                key = %key,
                replaced = ?existing.map(|replaced| replaced.kind()),
                "synthesizing empty container"
            );
            write_key(Some(&key.default_container()), key, value)
        }
    }
}

/// Writes `value` at `position`, padding a short gap with `Null`.
///
/// A position more than [`PADDING_LIMIT`] past the end turns the sequence
/// into a record keyed by decimal position, which [`read_key`] answers for
/// index keys.
fn write_position(items: &[Value], position: usize, value: Value) -> Value {
    let length = items.len();
    if position < length {
        let mut copy = items.to_vec();
        copy[position] = value;
        return Value::sequence(copy);
    }
    if position - length <= PADDING_LIMIT {
        let mut copy = Vec::with_capacity(position.saturating_add(1));
        copy.extend_from_slice(items);
        copy.resize(position, Value::Null);
        copy.push(value);
        return Value::sequence(copy);
    }
    tracing::debug!(position, length, "index far past the end, overlaying sequence onto record");
    let mut entries = positional_entries(items);
    entries.insert(position.to_string(), value);
    Value::record(entries)
}

fn positional_entries(items: &[Value]) -> Entries {
    items
        .iter()
        .enumerate()
        .map(|(position, item)| (position.to_string(), item.clone()))
        .collect()
}

/// Writes `items` over the leading positions of a sequence container.
///
/// Elements past the end of `items` are kept. A container that is not a
/// sequence is replaced by `items`.
pub(crate) fn overwrite_prefix(container: Option<&Value>, items: Vec<Value>) -> Value {
    let Some(Value::Sequence(current)) = container else {
        return Value::sequence(items);
    };
    let mut copy = Vec::clone(current);
    for (position, item) in items.into_iter().enumerate() {
        match copy.get_mut(position) {
            Some(slot) => *slot = item,
            None => copy.push(item),
        }
    }
    Value::sequence(copy)
}

/// The items to splice for an insertion: the elements of a sequence, or
/// the value itself.
pub(crate) fn spread(value: Value) -> Vec<Value> {
    match value {
        Value::Sequence(items) => Vec::clone(&items),
        single => vec![single],
    }
}

/// Resolves a removal index; negative indices count back from the end.
pub(crate) fn resolve_removal(index: isize, length: usize) -> Option<usize> {
    let resolved = if index < 0 {
        length.checked_sub(index.unsigned_abs())?
    } else {
        index.unsigned_abs()
    };
    (resolved < length).then_some(resolved)
}

/// Resolves an insertion index into `0..=length`; `-1` means "after the
/// last element", `-2` "before the last element", and so on.
pub(crate) fn resolve_insertion(index: isize, length: usize) -> usize {
    if index < 0 {
        (length + 1).saturating_sub(index.unsigned_abs())
    } else {
        index.unsigned_abs().min(length)
    }
}

/// A fresh copy of `items` without the element at `index`.
pub(crate) fn remove_at(items: &[Value], index: isize) -> Vec<Value> {
    let mut copy = items.to_vec();
    match resolve_removal(index, items.len()) {
        Some(position) => {
            tracing::trace!(index, position, length = items.len(), "removing element");
            copy.remove(position);
        }
        None => {
            tracing::debug!(index, length = items.len(), "removal index out of range");
        }
    }
    copy
}

/// A fresh copy of `items` with `inserted` spliced in at `index`.
pub(crate) fn insert_at(items: &[Value], index: isize, inserted: Vec<Value>) -> Vec<Value> {
    let position = resolve_insertion(index, items.len());
    tracing::trace!(index, position, count = inserted.len(), "inserting elements");
    let mut copy = Vec::with_capacity(items.len() + inserted.len());
    copy.extend_from_slice(&items[..position]);
    copy.extend(inserted);
    copy.extend_from_slice(&items[position..]);
    copy
}

/// A fresh copy of `items` followed by `appended`.
pub(crate) fn append(items: &[Value], appended: Vec<Value>) -> Vec<Value> {
    tracing::trace!(length = items.len(), count = appended.len(), "appending elements");
    let mut copy = Vec::with_capacity(items.len() + appended.len());
    copy.extend_from_slice(items);
    copy.extend(appended);
    copy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record, sequence};
    use rstest::rstest;

    fn field(name: &str) -> PathKey {
        PathKey::Field(name.to_string())
    }

    #[rstest]
    fn test_read_key_from_record() {
        let record = record! { "a" => 1 };
        assert_eq!(read_key(Some(&record), &field("a")), Some(Value::from(1)));
        assert_eq!(read_key(Some(&record), &field("b")), None);
    }

    #[rstest]
    fn test_read_key_treats_null_child_as_absent() {
        let record = record! { "a" => Value::Null };
        assert_eq!(read_key(Some(&record), &field("a")), None);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Value::Null))]
    #[case(Some(Value::from(5)))]
    #[case(Some(Value::from("text")))]
    fn test_read_key_through_non_container_is_absent(#[case] container: Option<Value>) {
        assert_eq!(read_key(container.as_ref(), &field("a")), None);
        assert_eq!(read_key(container.as_ref(), &PathKey::Index(0)), None);
    }

    #[rstest]
    fn test_read_key_index_on_record_uses_decimal_key() {
        let record = record! { "0" => "zero" };
        assert_eq!(
            read_key(Some(&record), &PathKey::Index(0)),
            Some(Value::from("zero"))
        );
    }

    #[rstest]
    fn test_write_key_shares_untouched_children() {
        let record = record! { "kept" => record! { "x" => 1 }, "replaced" => 1 };
        let updated = write_key(Some(&record), &field("replaced"), Value::from(2));

        let kept_before = read_key(Some(&record), &field("kept")).unwrap();
        let kept_after = read_key(Some(&updated), &field("kept")).unwrap();
        assert!(Value::ptr_eq(&kept_before, &kept_after));
        assert_eq!(record, record! { "kept" => record! { "x" => 1 }, "replaced" => 1 });
    }

    #[rstest]
    fn test_write_key_synthesizes_sequence_for_index() {
        assert_eq!(
            write_key(None, &PathKey::Index(2), Value::from(true)),
            sequence![Value::Null, Value::Null, true]
        );
    }

    #[rstest]
    fn test_write_key_replaces_scalar_with_record() {
        let scalar = Value::from(5);
        assert_eq!(
            write_key(Some(&scalar), &field("b"), Value::from(1)),
            record! { "b" => 1 }
        );
    }

    #[rstest]
    fn test_write_key_pads_sequence() {
        let items = sequence![1];
        assert_eq!(
            write_key(Some(&items), &PathKey::Index(2), Value::from(3)),
            sequence![1, Value::Null, 3]
        );
    }

    #[rstest]
    fn test_write_key_pads_up_to_limit() {
        let written = write_key(None, &PathKey::Index(PADDING_LIMIT), Value::from(1));
        let items = written.as_sequence().unwrap();
        assert_eq!(items.len(), PADDING_LIMIT + 1);
        assert_eq!(items[PADDING_LIMIT], Value::from(1));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(sequence![1, 2]))]
    fn test_write_key_far_index_overlays_record(#[case] container: Option<Value>) {
        let far = PathKey::Index(usize::MAX);
        let written = write_key(container.as_ref(), &far, Value::from(true));

        assert!(written.as_record().is_some());
        assert_eq!(read_key(Some(&written), &far), Some(Value::from(true)));
        let kept = container.as_ref().and_then(Value::as_sequence).map_or(0, <[Value]>::len);
        assert_eq!(written.as_record().map(|entries| entries.len()), Some(kept + 1));
    }

    #[rstest]
    fn test_write_key_field_on_sequence_overlays_record() {
        let items = sequence!["a", "b"];
        assert_eq!(
            write_key(Some(&items), &field("extra"), Value::from(true)),
            record! { "0" => "a", "1" => "b", "extra" => true }
        );
    }

    #[rstest]
    fn test_write_key_index_on_record_stays_record() {
        let record = record! { "name" => "x" };
        assert_eq!(
            write_key(Some(&record), &PathKey::Index(1), Value::from(2)),
            record! { "name" => "x", "1" => 2 }
        );
    }

    #[rstest]
    #[case(0, 3, Some(0))]
    #[case(2, 3, Some(2))]
    #[case(3, 3, None)]
    #[case(-1, 3, Some(2))]
    #[case(-3, 3, Some(0))]
    #[case(-4, 3, None)]
    #[case(0, 0, None)]
    #[case(-1, 0, None)]
    fn test_resolve_removal(
        #[case] index: isize,
        #[case] length: usize,
        #[case] expected: Option<usize>,
    ) {
        assert_eq!(resolve_removal(index, length), expected);
    }

    #[rstest]
    #[case(0, 3, 0)]
    #[case(3, 3, 3)]
    #[case(10, 3, 3)]
    #[case(-1, 3, 3)]
    #[case(-2, 3, 2)]
    #[case(-4, 3, 0)]
    #[case(-10, 3, 0)]
    #[case(-1, 0, 0)]
    fn test_resolve_insertion(#[case] index: isize, #[case] length: usize, #[case] expected: usize) {
        assert_eq!(resolve_insertion(index, length), expected);
    }

    #[rstest]
    #[case(sequence![1, 2, 3], vec![9], sequence![9, 2, 3])]
    #[case(sequence![1], vec![7, 8], sequence![7, 8])]
    #[case(Value::from("text"), vec![4], sequence![4])]
    fn test_overwrite_prefix(
        #[case] container: Value,
        #[case] items: Vec<i32>,
        #[case] expected: Value,
    ) {
        let items = items.into_iter().map(Value::from).collect();
        assert_eq!(overwrite_prefix(Some(&container), items), expected);
    }

    #[rstest]
    fn test_spread() {
        assert_eq!(spread(sequence![1, 2]), vec![Value::from(1), Value::from(2)]);
        assert_eq!(spread(Value::from(1)), vec![Value::from(1)]);
    }

    #[rstest]
    fn test_insert_at_leaves_input_untouched() {
        let items = vec![Value::from(1), Value::from(3)];
        let inserted = insert_at(&items, 1, vec![Value::from(2)]);
        assert_eq!(inserted, vec![Value::from(1), Value::from(2), Value::from(3)]);
        assert_eq!(items.len(), 2);
    }

    #[rstest]
    fn test_remove_at_out_of_range_is_copy() {
        let items = vec![Value::from(1)];
        assert_eq!(remove_at(&items, 5), items);
    }

    #[rstest]
    fn test_append() {
        assert_eq!(
            append(&[Value::from(1)], vec![Value::from(2)]),
            vec![Value::from(1), Value::from(2)]
        );
    }
}
