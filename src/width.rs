use std::fmt;

use crate::error::{Result, TimelineError};
use crate::index::ChapterSpan;
use crate::models::Range;
use crate::timeline::Timeline;

/// Nominal width of one volume in bounded mode.
pub const VOLUME_WIDTH: f64 = 1000.0;

/// Page count of a "typical" volume, used to fix the unbounded page scale.
pub const NOMINAL_VOLUME_PAGES: f64 = 180.0;

pub const UNBOUNDED_PADDING: f64 = 1.05;

/// Width of a single page in unbounded mode.
pub const UNBOUNDED_PAGE_WIDTH: f64 = VOLUME_WIDTH / NOMINAL_VOLUME_PAGES * UNBOUNDED_PADDING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthMode {
    /// Every volume is `VOLUME_WIDTH` wide; chapters get their share of it.
    #[default]
    Bounded,
    /// Every page is `UNBOUNDED_PAGE_WIDTH` wide.
    Unbounded,
}

impl WidthMode {
    pub fn from_unbounded(unbounded: bool) -> Self {
        if unbounded {
            WidthMode::Unbounded
        } else {
            WidthMode::Bounded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Layout {
    Chapter,
    Volume,
    Arc,
    Saga,
    Episode,
    Season,
}

impl Layout {
    pub const ALL: [Layout; 6] = [
        Layout::Chapter,
        Layout::Volume,
        Layout::Arc,
        Layout::Saga,
        Layout::Episode,
        Layout::Season,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Layout::Chapter => "chapter",
            Layout::Volume => "volume",
            Layout::Arc => "arc",
            Layout::Saga => "saga",
            Layout::Episode => "episode",
            Layout::Season => "season",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which ends of a grouping's range it shares with its neighbouring siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SharedEnds {
    /// The previous sibling ends on this grouping's first chapter.
    pub start: bool,
    /// The next sibling starts on this grouping's last chapter.
    pub end: bool,
}

impl SharedEnds {
    pub fn between(previous: Option<Range>, range: Range, next: Option<Range>) -> Self {
        SharedEnds {
            start: previous.is_some_and(|p| p.to == Some(range.from)),
            end: next.is_some_and(|n| range.to == Some(n.from)),
        }
    }
}

impl Timeline {
    /// Width of entity `index` of the given layout.
    pub fn width(&self, layout: Layout, index: usize, mode: WidthMode) -> Result<f64> {
        match layout {
            Layout::Chapter => self.chapter_width(index, mode),
            Layout::Volume => self.volume_width(index, mode),
            Layout::Arc => self.arc_width(index, mode),
            Layout::Saga => self.saga_width(index, mode),
            Layout::Episode => self.episode_width(index, mode),
            Layout::Season => self.season_width(index, mode),
        }
    }

    /// Widths of every entity of `layout`, in order.
    pub fn widths(&self, layout: Layout, mode: WidthMode) -> Result<Vec<f64>> {
        (0..self.count(layout))
            .map(|i| self.width(layout, i, mode))
            .collect()
    }

    pub fn chapter_width(&self, chapter: usize, mode: WidthMode) -> Result<f64> {
        let pages = self.chapter(chapter)?.pages;
        let volume = self.volume_of(chapter)?;
        Ok(f64::from(pages) * self.page_width(volume, mode)?)
    }

    pub fn volume_width(&self, volume: usize, mode: WidthMode) -> Result<f64> {
        let span = self
            .index()
            .volume_span(volume)
            .ok_or_else(|| self.out_of_range(Layout::Volume, volume))?;
        // Also rejects volumes without pages.
        self.page_width(volume, mode)?;
        match mode {
            WidthMode::Bounded => Ok(VOLUME_WIDTH),
            WidthMode::Unbounded => self.sum_chapter_widths(span, mode),
        }
    }

    pub fn arc_width(&self, arc: usize, mode: WidthMode) -> Result<f64> {
        let span = self.span(self.arc(arc)?.range)?;
        self.sum_chapter_widths(span, mode)
    }

    pub fn saga_width(&self, saga: usize, mode: WidthMode) -> Result<f64> {
        let arcs = self
            .index()
            .saga_arcs(saga)
            .ok_or_else(|| self.out_of_range(Layout::Saga, saga))?;
        arcs.map(|arc| self.arc_width(arc, mode)).sum()
    }

    pub fn episode_width(&self, episode: usize, mode: WidthMode) -> Result<f64> {
        let span = self.span(self.episode(episode)?.range)?;
        self.split_span_width(span, self.episode_ends(episode)?, mode)
    }

    pub fn season_width(&self, season: usize, mode: WidthMode) -> Result<f64> {
        let span = self.span(self.season(season)?.range)?;
        self.split_span_width(span, self.season_ends(season)?, mode)
    }

    pub fn episode_ends(&self, episode: usize) -> Result<SharedEnds> {
        let range = self.episode(episode)?.range;
        let previous = episode.checked_sub(1).and_then(|p| self.episode(p).ok());
        let next = self.episode(episode + 1).ok();
        Ok(SharedEnds::between(
            previous.map(|e| e.range),
            range,
            next.map(|e| e.range),
        ))
    }

    pub fn season_ends(&self, season: usize) -> Result<SharedEnds> {
        let range = self.season(season)?.range;
        let previous = season.checked_sub(1).and_then(|p| self.season(p).ok());
        let next = self.season(season + 1).ok();
        Ok(SharedEnds::between(
            previous.map(|s| s.range),
            range,
            next.map(|s| s.range),
        ))
    }

    /// Pages of chapter `chapter` that belong to a grouping covering `span`.
    ///
    /// A split chapter gives its later pages (`rest`) to the grouping it
    /// opens and its earlier pages (`split`) to the grouping it closes. A
    /// grouping that is only that chapter closes on it, unless it shares the
    /// chapter with the previous sibling and not with the next one.
    pub fn attributed_pages(&self, chapter: usize, span: ChapterSpan, ends: SharedEnds) -> Result<u32> {
        let pages = self.chapter(chapter)?.pages;
        let number = chapter as u32 + 1;
        let Some(&split) = self.data().split_chapters.get(&number) else {
            return Ok(pages);
        };
        if split > pages {
            return Err(TimelineError::SplitExceedsPages {
                chapter: number,
                split,
                pages,
            });
        }
        let rest = pages - split;
        if rest == 0 {
            return Ok(pages);
        }
        Ok(match (chapter == span.start, Some(chapter) == span.last()) {
            (true, true) if ends.start && !ends.end => rest,
            (_, true) => split,
            (true, false) => rest,
            (false, false) => pages,
        })
    }

    /// Width of one page inside `volume`.
    fn page_width(&self, volume: usize, mode: WidthMode) -> Result<f64> {
        let pages = self
            .index()
            .volume_pages(volume)
            .ok_or_else(|| self.out_of_range(Layout::Volume, volume))?;
        if pages == 0 {
            return Err(TimelineError::EmptyVolume { volume });
        }
        Ok(match mode {
            WidthMode::Bounded => VOLUME_WIDTH / f64::from(pages),
            WidthMode::Unbounded => UNBOUNDED_PAGE_WIDTH,
        })
    }

    fn sum_chapter_widths(&self, span: ChapterSpan, mode: WidthMode) -> Result<f64> {
        span.iter().map(|c| self.chapter_width(c, mode)).sum()
    }

    fn split_span_width(&self, span: ChapterSpan, ends: SharedEnds, mode: WidthMode) -> Result<f64> {
        span.iter()
            .map(|c| {
                let pages = self.attributed_pages(c, span, ends)?;
                Ok(f64::from(pages) * self.page_width(self.volume_of(c)?, mode)?)
            })
            .sum()
    }
}
