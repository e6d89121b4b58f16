use crate::change::{ChangeRecord, PathSnapshot};
use crate::error::OutlineError;
use crate::geometry::limits;
use crate::model::{LinkType, Point};
use crate::PathGraph;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const DOC_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Doc {
    version: u32,
    #[serde(flatten)]
    path: PathSnapshot,
}

fn in_bounds(p: Point) -> bool {
    limits::in_coord_bounds(p.x) && limits::in_coord_bounds(p.y)
}

impl PathGraph {
    /// Link types keyed by node index, e.g. `{"0": 1, "3": 2}`. Corner
    /// nodes are included so the sidecar fully describes the path.
    pub fn node_types_json(&self) -> Value {
        let mut map = Map::new();
        for n in &self.nodes {
            map.insert(n.index.to_string(), Value::from(n.link.code()));
        }
        Value::Object(map)
    }

    /// Restores link types from a sidecar produced by `node_types_json`.
    /// Geometry is not touched. Unknown keys and codes are skipped.
    pub fn apply_node_types(&mut self, types: &Value) -> ChangeRecord {
        let mut record = ChangeRecord::new();
        let Some(map) = types.as_object() else {
            tracing::debug!("node type sidecar is not an object");
            return record;
        };
        for (key, code) in map {
            let index = key.parse::<usize>().ok().filter(|i| *i < self.nodes.len());
            let link = code.as_u64().and_then(|c| u8::try_from(c).ok()).and_then(LinkType::from_code);
            match (index, link) {
                (Some(i), Some(link)) => self.set_link_recorded(i, link, &mut record),
                _ => tracing::debug!(key = key.as_str(), %code, "node type entry skipped"),
            }
        }
        self.init();
        record
    }

    /// Loads an outline and then its node-type sidecar, so the link types
    /// come through exactly instead of being guessed.
    pub fn from_outline_with_node_types(d: &str, types: &Value) -> Result<PathGraph, OutlineError> {
        let mut g = PathGraph::from_outline(d)?;
        g.apply_node_types(types);
        g.store_outline();
        Ok(g)
    }

    /// Versioned snapshot document carrying link types and handles.
    pub fn to_json_value(&self) -> Value {
        let doc = Doc { version: DOC_VERSION, path: self.snapshot() };
        serde_json::to_value(doc).unwrap_or(Value::Null)
    }

    pub fn from_json_value(v: Value) -> Result<PathGraph, OutlineError> {
        let doc: Doc = serde_json::from_value(v).map_err(|e| OutlineError::InvalidDocument(e.to_string()))?;
        if doc.version != DOC_VERSION {
            return Err(OutlineError::InvalidDocument(format!("unsupported version {}", doc.version)));
        }
        if doc.path.nodes.len() > limits::MAX_NODES {
            return Err(OutlineError::TooManyNodes(limits::MAX_NODES));
        }
        for (i, n) in doc.path.nodes.iter().enumerate() {
            let handles = [n.prev_handle, n.next_handle];
            if !in_bounds(Point::new(n.x, n.y)) || handles.iter().flatten().any(|h| !in_bounds(*h)) {
                return Err(OutlineError::InvalidDocument(format!("node {} is out of bounds", i)));
            }
        }
        Ok(PathGraph::from_snapshot(&doc.path))
    }
}
