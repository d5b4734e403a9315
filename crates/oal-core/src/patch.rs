use serde_json::{Map, Value};

use crate::path::{DocPath, Segment};

/// Set `value` at `path`, creating intermediate mappings and sequences as
/// needed. Scalars in the way are replaced by containers. Later writes to
/// the same path win; paths are not semantically validated.
pub fn set_value(doc: &mut Value, path: &DocPath, value: Value) {
    let mut node = doc;
    for segment in path.segments() {
        node = child(node, segment);
    }
    *node = value;
}

/// Descend one segment, coercing the node to the container kind the segment
/// requires and inserting a placeholder child when absent.
fn child<'a>(node: &'a mut Value, segment: &Segment) -> &'a mut Value {
    match segment {
        Segment::Key(key) => {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            match node {
                Value::Object(map) => map.entry(key.clone()).or_insert(Value::Null),
                _ => unreachable!("node was just coerced to a mapping"),
            }
        }
        Segment::Index(index) => {
            if !node.is_array() {
                *node = Value::Array(Vec::new());
            }
            match node {
                Value::Array(items) => {
                    if items.len() <= *index {
                        items.resize(*index + 1, Value::Null);
                    }
                    &mut items[*index]
                }
                _ => unreachable!("node was just coerced to a sequence"),
            }
        }
    }
}
