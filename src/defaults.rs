//! Overlaying default values onto a target mapping.
//!
//! Both functions take exclusive access to the target for the duration of
//! the call and return it. Sources are consumed: a default that lands in the
//! target is moved there, so the target ends up owning the very value the
//! source held. Defined target values are never overwritten; `null` and
//! absent keys count as undefined.

use indexmap::map::Entry;

use crate::value::{Kind, Map, Value, is_nullish};

/// Shallow defaults.
///
/// For every source, in order, and every key of that source: when the
/// target has no value (or `null`) at that key the source value is moved in
/// wholesale. A defined target value is left alone, nested maps included;
/// nothing is merged into them.
///
/// ```
/// use fetch_qs::{defaults, map_from_json};
/// use serde_json::json;
///
/// let mut target = map_from_json(json!({ "x": { "a": 1 } }));
/// defaults(&mut target, [map_from_json(json!({ "x": { "a": 1, "b": 2 }, "y": 3 }))]);
/// assert_eq!(target, map_from_json(json!({ "x": { "a": 1 }, "y": 3 })));
/// ```
pub fn defaults<I>(target: &mut Map, sources: I) -> &mut Map
where
    I: IntoIterator<Item = Map>,
{
    for source in sources {
        for (key, value) in source {
            fill_if_nullish(target, key, value);
        }
    }
    target
}

/// Recursive defaults.
///
/// For every source, in order, and every key of that source:
///
/// 1. target undefined: a map default is rebuilt into a fresh map through
///    `defaults_deep` on an empty target, anything else is moved in as-is;
/// 2. target and default both maps: recurse into the target's own map,
///    filling only its missing keys;
/// 3. otherwise the target value wins and the default subtree is dropped.
///
/// ```
/// use fetch_qs::{defaults_deep, map_from_json};
/// use serde_json::json;
///
/// let mut target = map_from_json(json!({ "a": 1, "d": { "f": 1 } }));
/// defaults_deep(
///     &mut target,
///     [
///         map_from_json(json!({ "b": 2 })),
///         map_from_json(json!({ "b": 3, "c": 4 })),
///         map_from_json(json!({ "d": { "e": 5, "f": 2 } })),
///     ],
/// );
/// assert_eq!(
///     target,
///     map_from_json(json!({ "a": 1, "d": { "f": 1, "e": 5 }, "b": 2, "c": 4 }))
/// );
/// ```
pub fn defaults_deep<I>(target: &mut Map, sources: I) -> &mut Map
where
    I: IntoIterator<Item = Map>,
{
    for source in sources {
        for (key, value) in source {
            merge_deep(target, key, value);
        }
    }
    target
}

fn fill_if_nullish(target: &mut Map, key: String, value: Value) {
    match target.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(mut entry) if entry.get().is_null() => {
            entry.insert(value);
        }
        Entry::Occupied(_) => {}
    }
}

fn merge_deep(target: &mut Map, key: String, value: Value) {
    if is_nullish(target.get(&key)) {
        let value = match value {
            Value::Map(nested) => {
                let mut fresh = Map::with_capacity(nested.len());
                defaults_deep(&mut fresh, [nested]);
                Value::Map(fresh)
            }
            other => other,
        };
        target.insert(key, value);
        return;
    }

    let Some(existing) = target.get_mut(&key) else {
        return;
    };
    match (existing.kind(), value) {
        (Kind::Map, Value::Map(nested)) => {
            if let Some(existing) = existing.as_map_mut() {
                defaults_deep(existing, [nested]);
            }
        }
        (_, discarded) => {
            if discarded.kind() == Kind::Map || existing.kind() == Kind::Map {
                tracing::trace!(key = %key, "default has a different shape than the target, keeping target");
            }
        }
    }
}
