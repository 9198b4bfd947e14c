use thiserror::Error;

/// Failures while reading a cue document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CueError {
    #[error("cue document parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cue {index} has non-finite bounds (start={start}, end={end})")]
    NonFinite { index: usize, start: f32, end: f32 },
}
