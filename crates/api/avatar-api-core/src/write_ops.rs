//! Write operations produced by the engines each frame, describing values to
//! push into the host scene (bone transforms, morph-target influences).
//!
//! WriteOp serializes to JSON as:
//!   { "path": "Wolf3D_Head.morphTargetInfluences[viseme_PP]", "value": { "type": "float", "data": 0.4 } }
//!
//! WriteBatch is a simple Vec<WriteOp> with helpers.

use crate::{track_path::TrackPath, Value};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOp {
    pub path: TrackPath,
    pub value: Value,
}

impl WriteOp {
    pub fn new(path: TrackPath, value: Value) -> Self {
        Self { path, value }
    }
}

/// A batch of write operations. Engines can emit a WriteBatch each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch(pub Vec<WriteOp>);

impl WriteBatch {
    pub fn new() -> Self {
        WriteBatch(Vec::new())
    }

    pub fn push(&mut self, op: WriteOp) {
        self.0.push(op);
    }

    pub fn extend(&mut self, other: impl IntoIterator<Item = WriteOp>) {
        self.0.extend(other);
    }

    pub fn into_vec(self) -> Vec<WriteOp> {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &WriteOp> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Last value written to `path` in this batch, if any.
    pub fn get(&self, path: &TrackPath) -> Option<&Value> {
        self.0
            .iter()
            .rev()
            .find(|op| &op.path == path)
            .map(|op| &op.value)
    }

    /// Merge another batch in-place (append).
    pub fn append(&mut self, mut other: WriteBatch) {
        self.0.append(&mut other.0)
    }
}

impl fmt::Display for WriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let val = serde_json::to_string(&self.value).map_err(|_| fmt::Error)?;
        write!(f, "{{ path: {}, value: {} }}", self.path, val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writebatch_json_array() {
        let mut b = WriteBatch::new();
        b.push(WriteOp::new(
            TrackPath::morph_influence("Wolf3D_Head", "viseme_PP"),
            Value::Float(0.5),
        ));
        b.push(WriteOp::new(
            TrackPath::parse("LeftArm.rotation").unwrap(),
            Value::Vec3([0.9, 0.0, 0.0]),
        ));
        let s = serde_json::to_string(&b).unwrap();
        assert!(s.contains("Wolf3D_Head.morphTargetInfluences[viseme_PP]"));
        let parsed: WriteBatch = serde_json::from_str(&s).unwrap();
        assert_eq!(b, parsed);
    }

    #[test]
    fn get_returns_last_write() {
        let path = TrackPath::morph_influence("Wolf3D_Teeth", "viseme_O");
        let mut b = WriteBatch::new();
        b.push(WriteOp::new(path.clone(), Value::Float(0.1)));
        b.push(WriteOp::new(path.clone(), Value::Float(0.2)));
        assert_eq!(b.get(&path), Some(&Value::Float(0.2)));
        assert_eq!(b.len(), 2);
    }
}
