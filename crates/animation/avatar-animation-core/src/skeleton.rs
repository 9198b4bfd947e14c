//! Skeleton surface: named bones with local transforms.
//!
//! A bone keeps its local rotation both as intrinsic XYZ Euler angles and as a
//! quaternion. Writers go through the setters so the two stay in sync; the
//! Euler form is what per-axis pose overrides address.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::SkeletonId;
use crate::interp::functions::{euler_xyz_from_quat, normalize4, quat_from_euler_xyz};
use crate::pose::Axis;

/// Local transform of a bone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneTransform {
    pub position: [f32; 3],
    /// Intrinsic XYZ Euler angles in radians.
    pub rotation: [f32; 3],
    /// Quaternion (x, y, z, w) matching `rotation`.
    pub quaternion: [f32; 4],
    pub scale: [f32; 3],
}

impl Default for BoneTransform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            quaternion: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone in the owning skeleton.
    #[serde(default)]
    pub parent: Option<usize>,
    /// Current local transform (written by the player and pose corrector).
    pub local: BoneTransform,
    /// Bind/rest transform the bone returns to on reset.
    pub rest: BoneTransform,
}

impl Bone {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rest(name, BoneTransform::default())
    }

    pub fn with_rest(name: impl Into<String>, rest: BoneTransform) -> Self {
        Self {
            name: name.into(),
            parent: None,
            local: rest,
            rest,
        }
    }

    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the rotation from a quaternion, refreshing the Euler angles.
    pub fn set_quaternion(&mut self, q: [f32; 4]) {
        let q = normalize4(q);
        self.local.quaternion = q;
        self.local.rotation = euler_xyz_from_quat(q);
    }

    /// Set the rotation from Euler angles, refreshing the quaternion.
    pub fn set_rotation(&mut self, e: [f32; 3]) {
        self.local.rotation = e;
        self.local.quaternion = quat_from_euler_xyz(e);
    }

    /// Overwrite a single Euler axis, leaving the other two as they are.
    pub fn set_rotation_axis(&mut self, axis: Axis, angle: f32) {
        let mut e = self.local.rotation;
        e[axis.index()] = angle;
        self.set_rotation(e);
    }

    pub fn reset_to_rest(&mut self) {
        self.local = self.rest;
    }
}

/// A named set of bones with lookup by name.
#[derive(Clone, Debug, Default)]
pub struct Skeleton {
    /// Identity assigned when the skeleton is registered with a library.
    pub id: Option<SkeletonId>,
    pub name: String,
    bones: Vec<Bone>,
    index: HashMap<String, usize>,
}

impl Skeleton {
    /// Build a skeleton. When two bones share a name the first one wins
    /// lookups, matching a depth-first `getObjectByName` search.
    pub fn new(name: impl Into<String>, bones: Vec<Bone>) -> Self {
        let mut index = HashMap::with_capacity(bones.len());
        for (i, b) in bones.iter().enumerate() {
            index.entry(b.name.clone()).or_insert(i);
        }
        Self {
            id: None,
            name: name.into(),
            bones,
            index,
        }
    }

    /// Convenience: flat skeleton of rest-pose bones with the given names.
    pub fn from_names<I, S>(name: impl Into<String>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bones = names.into_iter().map(Bone::new).collect();
        Self::new(name, bones)
    }

    pub fn with_id(mut self, id: SkeletonId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.index.get(name).map(|&i| &self.bones[i])
    }

    pub fn bone_mut(&mut self, name: &str) -> Option<&mut Bone> {
        match self.index.get(name) {
            Some(&i) => self.bones.get_mut(i),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    pub fn bone_names(&self) -> impl Iterator<Item = &str> {
        self.bones.iter().map(|b| b.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn reset_to_rest(&mut self) {
        for b in &mut self.bones {
            b.reset_to_rest();
        }
    }
}
