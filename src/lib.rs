//! Width and layout computations for a horizontally scrolling publication
//! timeline of a serialized story.
//!
//! A title's chapters are grouped into volumes, and independently into
//! seasons/episodes and sagas/arcs. [`timeline::Timeline`] answers "how wide
//! is entity N of this layout" consistently across all of these groupings,
//! in both [`width::WidthMode`]s.

pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod dates;
pub mod error;
pub mod index;
pub mod logging;
pub mod models;
pub mod report;
pub mod settings;
pub mod timeline;
pub mod validate;
pub mod width;

#[cfg(test)]
mod testing;

pub use error::{Result, TimelineError};
pub use timeline::Timeline;
pub use width::{Layout, WidthMode};
