use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Height used when no earlier entry can be repeated.
pub const DEFAULT_BUFFER_HEIGHT: f64 = 50.0;

/// Per-buffer heights, in placement order.
///
/// `None` marks an entry that was missing or unreadable; it resolves to the
/// previous buffer's height (or [`DEFAULT_BUFFER_HEIGHT`] for the first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HeightsRepr", into = "Vec<Option<f64>>")]
pub struct BufferHeights(pub Vec<Option<f64>>);

/// Accepts either the comma separated text form or a JSON array.
#[derive(Deserialize)]
#[serde(untagged)]
enum HeightsRepr {
    Text(String),
    List(Vec<Option<f64>>),
}

impl From<HeightsRepr> for BufferHeights {
    fn from(repr: HeightsRepr) -> Self {
        match repr {
            HeightsRepr::Text(text) => BufferHeights::parse(&text),
            HeightsRepr::List(list) => BufferHeights(list),
        }
    }
}

impl From<BufferHeights> for Vec<Option<f64>> {
    fn from(heights: BufferHeights) -> Self {
        heights.0
    }
}

impl BufferHeights {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }

    /// Parse "50, 60,abc" style text. Unreadable entries become `None`.
    pub fn parse(text: &str) -> Self {
        Self(text.split(',').map(|part| part.trim().parse::<f64>().ok()).collect())
    }

    /// Heights for `count` buffers, filling forward past the provided entries.
    pub fn resolve(&self, count: usize) -> Vec<f64> {
        let mut heights: Vec<f64> = Vec::with_capacity(count);
        for i in 0..count {
            let h = match self.0.get(i).copied().flatten() {
                Some(h) => h,
                None => heights.last().copied().unwrap_or(DEFAULT_BUFFER_HEIGHT),
            };
            heights.push(h);
        }
        heights
    }
}

impl Default for BufferHeights {
    fn default() -> Self {
        Self::new([50.0, 50.0, 50.0])
    }
}

impl FromStr for BufferHeights {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for BufferHeights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|h| h.map(|v| v.to_string()).unwrap_or_default())
            .collect();
        write!(f, "{}", parts.join(","))
    }
}
