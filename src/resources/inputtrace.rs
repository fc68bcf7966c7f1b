//! Recorded input for headless replays.
//!
//! A trace is a JSON array of frames, each carrying the frame delta and the
//! held state of the gameplay keys:
//!
//! ```json
//! [
//!   { "dt": 0.016, "right": true },
//!   { "dt": 0.016, "right": true, "jump": true }
//! ]
//! ```
//!
//! Frames are fed to [`InputState`] the same way live polling does, so press
//! edges are derived from consecutive frames.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::input::InputState;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read input trace {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse input trace: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("frame {0} has a negative or non-finite dt")]
    BadDelta(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TraceFrame {
    pub dt: f32,
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub fire: bool,
}

impl TraceFrame {
    /// Write this frame's held keys into the input resource.
    pub fn apply(&self, input: &mut InputState) {
        input.move_left.update(self.left);
        input.move_right.update(self.right);
        input.jump.update(self.jump);
        input.fire.update(self.fire);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputTrace {
    pub frames: Vec<TraceFrame>,
}

impl InputTrace {
    pub fn from_json_str(text: &str) -> Result<Self, TraceError> {
        let frames: Vec<TraceFrame> = serde_json::from_str(text)?;
        if let Some(index) = frames
            .iter()
            .position(|f| !f.dt.is_finite() || f.dt < 0.0)
        {
            return Err(TraceError::BadDelta(index));
        }
        Ok(Self { frames })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Total simulated time covered by the trace.
    pub fn duration(&self) -> f32 {
        self.frames.iter().map(|f| f.dt).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let trace =
            InputTrace::from_json_str(r#"[{"dt": 0.5}, {"dt": 0.25, "right": true, "fire": true}]"#)
                .unwrap();
        assert_eq!(trace.frames.len(), 2);
        assert!(!trace.frames[0].right);
        assert!(trace.frames[1].right && trace.frames[1].fire);
        assert_eq!(trace.duration(), 0.75);
    }

    #[test]
    fn test_negative_dt_rejected() {
        let err = InputTrace::from_json_str(r#"[{"dt": 0.1}, {"dt": -0.1}]"#).unwrap_err();
        assert!(matches!(err, TraceError::BadDelta(1)));
    }

    #[test]
    fn test_apply_derives_jump_edge() {
        let mut input = InputState::default();
        let press = TraceFrame {
            dt: 0.016,
            left: false,
            right: false,
            jump: true,
            fire: false,
        };
        press.apply(&mut input);
        assert!(input.jump.just_pressed);
        press.apply(&mut input);
        assert!(input.jump.active && !input.jump.just_pressed);
    }
}
