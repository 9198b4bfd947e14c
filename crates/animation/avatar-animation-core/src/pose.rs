//! Static pose corrections.
//!
//! A correction set pins individual Euler axes of named bones to fixed angles.
//! It runs every frame after the clip player has written its pose and wins
//! over whatever the player produced for those axes. Applying it is a pure
//! overwrite, so running it twice in one frame equals running it once.

use serde::{Deserialize, Serialize};

use crate::skeleton::Skeleton;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Fixed angle (radians) for one axis of one bone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoseCorrection {
    pub bone: String,
    pub axis: Axis,
    pub angle: f32,
}

/// Ordered list of per-bone axis overrides. Later entries for the same
/// bone/axis win.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseCorrectionSet {
    pub entries: Vec<PoseCorrection>,
}

impl PoseCorrectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, bone: impl Into<String>, axis: Axis, angle: f32) -> Self {
        self.push(bone, axis, angle);
        self
    }

    pub fn push(&mut self, bone: impl Into<String>, axis: Axis, angle: f32) {
        self.entries.push(PoseCorrection {
            bone: bone.into(),
            axis,
            angle,
        });
    }

    /// Shoulder/arm rest-pose fix used when driving a half-body avatar with a
    /// Mixamo clip.
    pub fn shoulder_fix() -> Self {
        Self::new()
            .with("LeftShoulder", Axis::Y, -0.3)
            .with("LeftShoulder", Axis::Z, -1.2)
            .with("RightShoulder", Axis::Y, 0.04)
            .with("RightShoulder", Axis::Z, 1.17)
            .with("LeftArm", Axis::X, 0.9)
            .with("RightArm", Axis::X, 1.22)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Overwrite the configured axes on `skeleton`. Bones the skeleton lacks
    /// are skipped. Returns the number of overrides applied.
    pub fn apply(&self, skeleton: &mut Skeleton) -> usize {
        let mut applied = 0;
        for c in &self.entries {
            match skeleton.bone_mut(&c.bone) {
                Some(bone) => {
                    bone.set_rotation_axis(c.axis, c.angle);
                    applied += 1;
                }
                None => log::debug!("pose correction skipped: no bone '{}'", c.bone),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::Skeleton;

    #[test]
    fn shoulder_fix_targets_four_bones() {
        let set = PoseCorrectionSet::shoulder_fix();
        assert_eq!(set.len(), 6);
        let mut bones: Vec<&str> = set.entries.iter().map(|c| c.bone.as_str()).collect();
        bones.dedup();
        assert_eq!(
            bones,
            vec!["LeftShoulder", "RightShoulder", "LeftArm", "RightArm"]
        );
    }

    #[test]
    fn missing_bones_are_skipped() {
        let mut sk = Skeleton::from_names("half", ["LeftArm"]);
        let applied = PoseCorrectionSet::shoulder_fix().apply(&mut sk);
        assert_eq!(applied, 1);
        assert_eq!(sk.bone("LeftArm").unwrap().local.rotation, [0.9, 0.0, 0.0]);
    }

    #[test]
    fn serde_axis_lowercase() {
        let c = PoseCorrection {
            bone: "LeftArm".into(),
            axis: Axis::X,
            angle: 0.9,
        };
        let s = serde_json::to_string(&c).unwrap();
        assert!(s.contains(r#""axis":"x""#));
    }
}
