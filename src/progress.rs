//! Progress indicator
//!
//! Maps the miss counter to a visual stage. Purely cosmetic: nothing here
//! feeds back into win/loss logic.

use serde::{Deserialize, Serialize};

/// Figure parts revealed one per miss, in order
pub const FIGURE_PARTS: [&str; 10] = [
    "hg-knot", "hg-head", "hg-body", "hg-armL", "hg-armR", "hg-legL", "hg-legR", "hg-eyeL",
    "hg-eyeR", "hg-mouth",
];

/// What the page should show for the current progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressView {
    /// Ids of the figure parts to show (the rest stay hidden)
    Figure { visible: Vec<&'static str> },
    /// Single image for the current stage
    Image { frame: u32, src: String },
}

/// Turns progress into a `ProgressView`
pub trait ProgressRenderer {
    /// `progress` is misses so far (`max_attempts` after giving up),
    /// `lost` is set once the game ended in a loss
    fn render(&self, progress: u32, max_attempts: u32, lost: bool) -> ProgressView;
}

/// Reveal figure parts one at a time; everything on a loss
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFigure;

impl ProgressRenderer for StagedFigure {
    fn render(&self, progress: u32, _max_attempts: u32, lost: bool) -> ProgressView {
        let shown = if lost {
            FIGURE_PARTS.len()
        } else {
            (progress as usize).min(FIGURE_PARTS.len())
        };
        ProgressView::Figure {
            visible: FIGURE_PARTS[..shown].to_vec(),
        }
    }
}

/// Swap through a numbered image sequence `{prefix}{frame}.{extension}`,
/// frames `0..=max_attempts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSequence {
    pub prefix: String,
    pub extension: String,
}

impl Default for ImageSequence {
    fn default() -> Self {
        Self {
            prefix: "img/hangman".to_string(),
            extension: "png".to_string(),
        }
    }
}

impl ImageSequence {
    pub fn frame_src(&self, frame: u32) -> String {
        format!("{}{}.{}", self.prefix, frame, self.extension)
    }
}

impl ProgressRenderer for ImageSequence {
    fn render(&self, progress: u32, max_attempts: u32, lost: bool) -> ProgressView {
        let frame = if lost {
            max_attempts
        } else {
            progress.min(max_attempts)
        };
        ProgressView::Image {
            frame,
            src: self.frame_src(frame),
        }
    }
}

/// Configurable choice of renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum ProgressStyle {
    Figure,
    Images(ImageSequence),
}

impl ProgressRenderer for ProgressStyle {
    fn render(&self, progress: u32, max_attempts: u32, lost: bool) -> ProgressView {
        match self {
            ProgressStyle::Figure => StagedFigure.render(progress, max_attempts, lost),
            ProgressStyle::Images(images) => images.render(progress, max_attempts, lost),
        }
    }
}
