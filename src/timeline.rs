use crate::error::{Result, TimelineError};
use crate::index::{ChapterIndex, ChapterSpan};
use crate::models::{Arc, Chapter, Episode, Range, Saga, Season, TimelineData, Volume};
use crate::width::Layout;

/// One title's dataset together with its derived lookup tables.
///
/// Built once when a title is loaded and only read afterwards, so it can be
/// shared freely between callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    data: TimelineData,
    index: ChapterIndex,
}

impl Timeline {
    pub fn new(data: TimelineData) -> Self {
        let index = ChapterIndex::build(&data);
        Self { data, index }
    }

    pub fn data(&self) -> &TimelineData {
        &self.data
    }

    pub fn index(&self) -> &ChapterIndex {
        &self.index
    }

    pub fn title(&self) -> &str {
        &self.data.title
    }

    pub fn chapter_count(&self) -> usize {
        self.index.chapter_count()
    }

    pub fn chapter(&self, chapter: usize) -> Result<&Chapter> {
        let out_of_range = || self.out_of_range(Layout::Chapter, chapter);
        let volume = self.index.volume_of(chapter).ok_or_else(out_of_range)?;
        let span = self.index.volume_span(volume).ok_or_else(out_of_range)?;
        self.data.volumes[volume]
            .chapters
            .get(chapter - span.start)
            .ok_or_else(out_of_range)
    }

    /// Volume holding the chapter at global index `chapter`.
    pub fn volume_of(&self, chapter: usize) -> Result<usize> {
        self.index
            .volume_of(chapter)
            .ok_or_else(|| self.out_of_range(Layout::Chapter, chapter))
    }

    pub fn volume(&self, volume: usize) -> Result<&Volume> {
        self.data
            .volumes
            .get(volume)
            .ok_or_else(|| self.out_of_range(Layout::Volume, volume))
    }

    pub fn arc(&self, arc: usize) -> Result<&Arc> {
        let member = self
            .index
            .arc(arc)
            .ok_or_else(|| self.out_of_range(Layout::Arc, arc))?;
        Ok(&self.data.sagas[member.group].arcs[member.offset])
    }

    pub fn saga(&self, saga: usize) -> Result<&Saga> {
        self.data
            .sagas
            .get(saga)
            .ok_or_else(|| self.out_of_range(Layout::Saga, saga))
    }

    pub fn episode(&self, episode: usize) -> Result<&Episode> {
        let member = self
            .index
            .episode(episode)
            .ok_or_else(|| self.out_of_range(Layout::Episode, episode))?;
        Ok(&self.data.seasons()[member.group].episodes[member.offset])
    }

    pub fn season(&self, season: usize) -> Result<&Season> {
        self.data
            .seasons()
            .get(season)
            .ok_or_else(|| self.out_of_range(Layout::Season, season))
    }

    /// Normalises a dataset range against this title's chapter count.
    pub fn span(&self, range: Range) -> Result<ChapterSpan> {
        ChapterSpan::from_range(range, self.chapter_count())
    }

    /// How many entities of `layout` this title has.
    pub fn count(&self, layout: Layout) -> usize {
        match layout {
            Layout::Chapter => self.index.chapter_count(),
            Layout::Volume => self.index.volume_count(),
            Layout::Arc => self.index.arc_count(),
            Layout::Saga => self.data.sagas.len(),
            Layout::Episode => self.index.episode_count(),
            Layout::Season => self.data.seasons().len(),
        }
    }

    /// Display title of an entity.
    pub fn label(&self, layout: Layout, index: usize) -> Result<&str> {
        let title = match layout {
            Layout::Chapter => &self.chapter(index)?.title,
            Layout::Volume => &self.volume(index)?.title,
            Layout::Arc => &self.arc(index)?.title,
            Layout::Saga => &self.saga(index)?.title,
            Layout::Episode => &self.episode(index)?.title,
            Layout::Season => &self.season(index)?.title,
        };
        Ok(title)
    }

    pub(crate) fn out_of_range(&self, layout: Layout, index: usize) -> TimelineError {
        TimelineError::IndexOutOfRange {
            layout,
            index,
            count: self.count(layout),
        }
    }
}

impl From<TimelineData> for Timeline {
    fn from(data: TimelineData) -> Self {
        Self::new(data)
    }
}
