use serde_json::Value;

/// The closed set of shapes a document value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Scalar,
    Mapping,
    Sequence,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Mapping,
            Value::Array(_) => NodeKind::Sequence,
            _ => NodeKind::Scalar,
        }
    }

    pub fn is_structured(self) -> bool {
        !matches!(self, NodeKind::Scalar)
    }
}

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    /// Build the segment addressing `field` inside a node of the given kind.
    pub fn for_field(kind: NodeKind, field: &str) -> Option<Self> {
        match kind {
            NodeKind::Mapping => Some(PathSegment::Key(field.to_string())),
            NodeKind::Sequence => field.parse().ok().map(PathSegment::Index),
            NodeKind::Scalar => None,
        }
    }
}

pub fn child_mut<'v>(value: &'v mut Value, segment: &PathSegment) -> Option<&'v mut Value> {
    match (value, segment) {
        (Value::Object(map), PathSegment::Key(key)) => map.get_mut(key),
        (Value::Array(items), PathSegment::Index(index)) => items.get_mut(*index),
        _ => None,
    }
}

/// Walk `path` from `root`, returning the node it addresses.
pub fn node_mut<'v>(root: &'v mut Value, path: &[PathSegment]) -> Option<&'v mut Value> {
    path.iter()
        .try_fold(root, |current, segment| child_mut(current, segment))
}

/// Split a property path into segments: `a.b`, `a.0` and `a[0].b` are accepted.
pub fn split_property_path(path: &str) -> Vec<String> {
    path.replace('[', ".")
        .replace(']', "")
        .split('.')
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Look up a dotted property path inside `value`.
///
/// Numeric segments index into sequences; a numeric segment against a mapping
/// is treated as a plain key. Any miss yields `None`.
pub fn lookup_path<'v>(value: &'v Value, path: &str) -> Option<&'v Value> {
    let segments = split_property_path(path);
    if segments.is_empty() {
        return None;
    }

    let mut current = value;
    for seg in &segments {
        current = match current {
            Value::Object(map) => map.get(seg)?,
            Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}
