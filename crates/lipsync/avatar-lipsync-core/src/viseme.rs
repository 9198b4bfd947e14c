//! Viseme channel identifiers.
//!
//! The set is the subset of the Oculus viseme blend shapes that the phoneme
//! table can produce. Each channel is addressed on a mesh by its morph-target
//! name (`viseme_PP`, ...).

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const VISEME_COUNT: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Viseme {
    PP,
    Kk,
    I,
    AA,
    O,
    U,
    FF,
    TH,
    S,
}

impl Viseme {
    pub const ALL: [Viseme; VISEME_COUNT] = [
        Viseme::PP,
        Viseme::Kk,
        Viseme::I,
        Viseme::AA,
        Viseme::O,
        Viseme::U,
        Viseme::FF,
        Viseme::TH,
        Viseme::S,
    ];

    /// Dense index into per-channel arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Morph-target name the channel drives on a mesh.
    pub fn morph_name(self) -> &'static str {
        match self {
            Viseme::PP => "viseme_PP",
            Viseme::Kk => "viseme_kk",
            Viseme::I => "viseme_I",
            Viseme::AA => "viseme_AA",
            Viseme::O => "viseme_O",
            Viseme::U => "viseme_U",
            Viseme::FF => "viseme_FF",
            Viseme::TH => "viseme_TH",
            Viseme::S => "viseme_S",
        }
    }
}

impl fmt::Display for Viseme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.morph_name())
    }
}

impl FromStr for Viseme {
    type Err = String;

    /// Accepts the morph name (`viseme_kk`) or the bare suffix (`kk`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let suffix = s.strip_prefix("viseme_").unwrap_or(s);
        Viseme::ALL
            .iter()
            .copied()
            .find(|v| &v.morph_name()["viseme_".len()..] == suffix)
            .ok_or_else(|| format!("unknown viseme '{s}'"))
    }
}

// Serde support: serialize as the morph name
impl Serialize for Viseme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.morph_name())
    }
}

impl<'de> Deserialize<'de> for Viseme {
    fn deserialize<D>(deserializer: D) -> Result<Viseme, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
