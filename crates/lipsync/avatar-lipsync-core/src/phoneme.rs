//! Phoneme symbol → viseme channel table.
//!
//! Read-only configuration injected into the blend engine. Symbols missing
//! from the table resolve to `None` and are treated as silence.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::viseme::Viseme;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhonemeMap {
    map: HashMap<String, Viseme>,
}

impl Default for PhonemeMap {
    fn default() -> Self {
        Self::rhubarb()
    }
}

impl PhonemeMap {
    /// Empty table: every symbol is silence.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Letter table for Rhubarb Lip Sync style cue values (A..Z).
    pub fn rhubarb() -> Self {
        use Viseme::*;
        let table: [(&str, Viseme); 26] = [
            ("A", PP),
            ("B", Kk),
            ("C", I),
            ("D", AA),
            ("E", O),
            ("F", U),
            ("G", FF),
            ("H", TH),
            ("I", S),
            ("J", Kk),
            ("K", Kk),
            ("L", TH),
            ("M", PP),
            ("N", Kk),
            ("O", O),
            ("P", PP),
            ("Q", Kk),
            ("R", O),
            ("S", S),
            ("T", Kk),
            ("U", U),
            ("V", FF),
            ("W", U),
            ("X", PP),
            ("Y", I),
            ("Z", S),
        ];
        table.into_iter().collect()
    }

    pub fn insert(&mut self, symbol: impl Into<String>, viseme: Viseme) {
        self.map.insert(symbol.into(), viseme);
    }

    pub fn with(mut self, symbol: impl Into<String>, viseme: Viseme) -> Self {
        self.insert(symbol, viseme);
        self
    }

    #[inline]
    pub fn resolve(&self, symbol: &str) -> Option<Viseme> {
        self.map.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Viseme)> for PhonemeMap {
    fn from_iter<I: IntoIterator<Item = (S, Viseme)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().map(|(s, v)| (s.into(), v)).collect(),
        }
    }
}
