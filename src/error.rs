use thiserror::Error;

use crate::width::Layout;

/// Failures of the layout engine and its data helpers.
///
/// Every variant points at bad input data or a caller bug; none of them is
/// worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimelineError {
    #[error("{layout} index {index} out of range (count {count})")]
    IndexOutOfRange {
        layout: Layout,
        index: usize,
        count: usize,
    },
    #[error("volume {volume} has no pages")]
    EmptyVolume { volume: usize },
    #[error("range {from}..{to:?} is outside chapters 1..={total}")]
    RangeOutOfBounds {
        from: u32,
        to: Option<u32>,
        total: usize,
    },
    #[error("chapter {chapter} is split at page {split} but only has {pages} pages")]
    SplitExceedsPages { chapter: u32, split: u32, pages: u32 },
    #[error("color interpolation needs at least 2 stops, got {0}")]
    TooFewColorStops(usize),
    #[error("could not parse date {0:?}")]
    InvalidDate(String),
    #[error("unknown title {0:?}")]
    UnknownTitle(String),
    #[error("invalid dataset: {0}")]
    Dataset(String),
}

pub type Result<T, E = TimelineError> = std::result::Result<T, E>;
