//! TrackPath parsing and formatting.
//!
//! Grammar (the property-binding form used by glTF/FBX style animation clips):
//!   node.property[.subproperty...]
//! - the node name runs up to the first '.'
//! - everything after the first '.' is the property, kept verbatim
//!   Examples:
//!   "Hips.quaternion" -> node="Hips", property="quaternion"
//!   "Wolf3D_Head.morphTargetInfluences[viseme_PP]" -> node="Wolf3D_Head",
//!   property="morphTargetInfluences[viseme_PP]"
//!   "Hips" -> node="Hips", property=""

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty track path")]
    Empty,
    #[error("track path '{0}' has an empty node name")]
    EmptyNode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackPath {
    /// Bone or mesh name the track binds to.
    pub node: String,
    /// Property selector on the node (may be empty).
    pub property: String,
}

impl TrackPath {
    pub fn new(node: impl Into<String>, property: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            property: property.into(),
        }
    }

    /// Path addressing one morph-target influence slot on a mesh.
    pub fn morph_influence(mesh: &str, target: &str) -> Self {
        Self::new(mesh, format!("morphTargetInfluences[{target}]"))
    }

    /// Parse a path string according to the grammar described above.
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Err(PathError::Empty);
        }
        let (node, property) = match s.split_once('.') {
            Some((node, property)) => (node, property),
            None => (s, ""),
        };
        if node.is_empty() {
            return Err(PathError::EmptyNode(s.to_string()));
        }
        Ok(Self::new(node, property))
    }
}

impl fmt::Display for TrackPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property.is_empty() {
            f.write_str(&self.node)
        } else {
            write!(f, "{}.{}", self.node, self.property)
        }
    }
}

impl FromStr for TrackPath {
    type Err = PathError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackPath::parse(s)
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for TrackPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TrackPath {
    fn deserialize<D>(deserializer: D) -> Result<TrackPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TrackPath::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bone_track() {
        let p = TrackPath::parse("mixamorigHips.quaternion").unwrap();
        assert_eq!(p.node, "mixamorigHips");
        assert_eq!(p.property, "quaternion");
        assert_eq!(p.to_string(), "mixamorigHips.quaternion");
    }

    #[test]
    fn property_keeps_everything_after_first_dot() {
        let p = TrackPath::parse("Head.morphTargetInfluences.0").unwrap();
        assert_eq!(p.node, "Head");
        assert_eq!(p.property, "morphTargetInfluences.0");
    }

    #[test]
    fn parse_node_only() {
        let p = TrackPath::parse("Hips").unwrap();
        assert_eq!(p.node, "Hips");
        assert!(p.property.is_empty());
        assert_eq!(p.to_string(), "Hips");
    }

    #[test]
    fn parse_rejects_empty_node() {
        assert_eq!(TrackPath::parse(""), Err(PathError::Empty));
        assert!(matches!(
            TrackPath::parse(".position"),
            Err(PathError::EmptyNode(_))
        ));
    }

    #[test]
    fn morph_influence_path_format() {
        let p = TrackPath::morph_influence("Wolf3D_Teeth", "viseme_O");
        assert_eq!(p.to_string(), "Wolf3D_Teeth.morphTargetInfluences[viseme_O]");
    }
}
