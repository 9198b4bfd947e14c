//! Writing channel weights into mesh morph-target slots.
//!
//! A mesh exposes a name → slot dictionary and an influence array. Meshes
//! without a dictionary, dictionaries without a viseme name, and indices past
//! the end of the influence array are skipped without error.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::blend::ChannelWeights;
use avatar_api_core::{TrackPath, Value, WriteBatch, WriteOp};

/// Surface a host mesh type implements to receive viseme weights.
pub trait MorphTargets {
    fn mesh_name(&self) -> &str;
    /// Slot for a morph-target name, if the mesh exposes it.
    fn morph_index(&self, target: &str) -> Option<usize>;
    /// Write one slot. Returns false when the slot does not exist.
    fn set_influence(&mut self, index: usize, weight: f32) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MorphMesh {
    pub name: String,
    #[serde(default)]
    pub dictionary: Option<HashMap<String, usize>>,
    #[serde(default)]
    pub influences: Vec<f32>,
}

impl MorphMesh {
    /// Mesh whose slots follow `targets` in order, all at 0.
    pub fn with_targets<I, S>(name: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dictionary: HashMap<String, usize> = targets
            .into_iter()
            .enumerate()
            .map(|(i, s)| (s.into(), i))
            .collect();
        let influences = vec![0.0; dictionary.len()];
        Self {
            name: name.into(),
            dictionary: Some(dictionary),
            influences,
        }
    }

    /// Mesh with no morph dictionary at all.
    pub fn without_targets(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dictionary: None,
            influences: Vec::new(),
        }
    }

    pub fn influence(&self, target: &str) -> Option<f32> {
        let idx = self.morph_index(target)?;
        self.influences.get(idx).copied()
    }
}

impl MorphTargets for MorphMesh {
    fn mesh_name(&self) -> &str {
        &self.name
    }

    fn morph_index(&self, target: &str) -> Option<usize> {
        self.dictionary.as_ref()?.get(target).copied()
    }

    fn set_influence(&mut self, index: usize, weight: f32) -> bool {
        match self.influences.get_mut(index) {
            Some(slot) => {
                *slot = weight;
                true
            }
            None => false,
        }
    }
}

/// Write every channel into every mesh exposing it. Returns the number of
/// slots written.
pub fn apply_weights<M: MorphTargets>(meshes: &mut [M], weights: &ChannelWeights) -> usize {
    write_meshes(meshes, weights, None)
}

/// As [`apply_weights`], also recording each write as a `WriteOp` addressed
/// `"<mesh>.morphTargetInfluences[<viseme>]"`.
pub fn apply_weights_recorded<M: MorphTargets>(
    meshes: &mut [M],
    weights: &ChannelWeights,
    out: &mut WriteBatch,
) -> usize {
    write_meshes(meshes, weights, Some(out))
}

fn write_meshes<M: MorphTargets>(
    meshes: &mut [M],
    weights: &ChannelWeights,
    mut out: Option<&mut WriteBatch>,
) -> usize {
    let mut written = 0;
    for mesh in meshes.iter_mut() {
        for (viseme, w) in weights.iter() {
            let name = viseme.morph_name();
            let Some(idx) = mesh.morph_index(name) else {
                continue;
            };
            if !mesh.set_influence(idx, w) {
                continue;
            }
            written += 1;
            if let Some(batch) = out.as_deref_mut() {
                batch.push(WriteOp::new(
                    TrackPath::morph_influence(mesh.mesh_name(), name),
                    Value::Float(w),
                ));
            }
        }
    }
    written
}
