use crate::error::{Result, TimelineError};
use crate::models::{Range, TimelineData};

/// A 0-based, half-open run of global chapter indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterSpan {
    pub start: usize,
    pub end: usize,
}

impl ChapterSpan {
    /// Converts a 1-based inclusive `Range` into a span over `total` chapters.
    pub fn from_range(range: Range, total: usize) -> Result<Self> {
        let out_of_bounds = || TimelineError::RangeOutOfBounds {
            from: range.from,
            to: range.to,
            total,
        };
        if range.from == 0 || range.to.is_some_and(|to| to < range.from) {
            return Err(out_of_bounds());
        }
        let start = range.from as usize - 1;
        let end = match range.to {
            Some(to) => to as usize,
            None => total,
        };
        if start > end || end > total {
            return Err(out_of_bounds());
        }
        Ok(Self { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, chapter: usize) -> bool {
        (self.start..self.end).contains(&chapter)
    }

    /// Index of the last chapter in the span, if any.
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Position of a flattened child inside its parent group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Member {
    pub group: usize,
    pub offset: usize,
}

/// Lookup tables derived once per dataset.
///
/// Chapters are addressed by their global 0-based position in the
/// concatenation of every volume's chapters; episodes and arcs likewise by
/// their position across all seasons and sagas.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterIndex {
    volume_of: Vec<usize>,
    volume_starts: Vec<usize>,
    volume_pages: Vec<u32>,
    episodes: Vec<Member>,
    arcs: Vec<Member>,
    season_episodes: Vec<std::ops::Range<usize>>,
    saga_arcs: Vec<std::ops::Range<usize>>,
}

impl ChapterIndex {
    pub fn build(data: &TimelineData) -> Self {
        let mut volume_of = Vec::new();
        let mut volume_starts = Vec::with_capacity(data.volumes.len() + 1);
        let mut volume_pages = Vec::with_capacity(data.volumes.len());

        for (v, volume) in data.volumes.iter().enumerate() {
            volume_starts.push(volume_of.len());
            volume_pages.push(volume.pages());
            volume_of.extend(std::iter::repeat_n(v, volume.chapters.len()));
        }
        volume_starts.push(volume_of.len());

        let (episodes, season_episodes) =
            flatten(data.seasons().iter().map(|s| s.episodes.len()));
        let (arcs, saga_arcs) = flatten(data.sagas.iter().map(|s| s.arcs.len()));

        Self {
            volume_of,
            volume_starts,
            volume_pages,
            episodes,
            arcs,
            season_episodes,
            saga_arcs,
        }
    }

    pub fn chapter_count(&self) -> usize {
        self.volume_of.len()
    }

    pub fn volume_count(&self) -> usize {
        self.volume_pages.len()
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn volume_of(&self, chapter: usize) -> Option<usize> {
        self.volume_of.get(chapter).copied()
    }

    /// Global chapter indices belonging to `volume`.
    pub fn volume_span(&self, volume: usize) -> Option<ChapterSpan> {
        let start = *self.volume_starts.get(volume)?;
        let end = *self.volume_starts.get(volume + 1)?;
        Some(ChapterSpan { start, end })
    }

    pub fn volume_pages(&self, volume: usize) -> Option<u32> {
        self.volume_pages.get(volume).copied()
    }

    pub fn episode(&self, episode: usize) -> Option<Member> {
        self.episodes.get(episode).copied()
    }

    pub fn arc(&self, arc: usize) -> Option<Member> {
        self.arcs.get(arc).copied()
    }

    /// Global episode indices belonging to `season`.
    pub fn season_episodes(&self, season: usize) -> Option<std::ops::Range<usize>> {
        self.season_episodes.get(season).cloned()
    }

    /// Global arc indices belonging to `saga`.
    pub fn saga_arcs(&self, saga: usize) -> Option<std::ops::Range<usize>> {
        self.saga_arcs.get(saga).cloned()
    }
}

fn flatten(sizes: impl Iterator<Item = usize>) -> (Vec<Member>, Vec<std::ops::Range<usize>>) {
    let mut members = Vec::new();
    let mut groups = Vec::new();
    for (group, size) in sizes.enumerate() {
        let start = members.len();
        members.extend((0..size).map(|offset| Member { group, offset }));
        groups.push(start..members.len());
    }
    (members, groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Arc, Chapter, Episode, Saga, Season, Volume};

    fn chapter(pages: u32) -> Chapter {
        Chapter {
            title: format!("{pages} pages"),
            date: "January 1, 2020".to_string(),
            pages,
            cover: None,
        }
    }

    fn volume(pages: &[u32]) -> Volume {
        Volume {
            title: "Volume".to_string(),
            cover: None,
            chapters: pages.iter().copied().map(chapter).collect(),
        }
    }

    fn dataset() -> TimelineData {
        TimelineData {
            title: "Index".to_string(),
            volumes: vec![volume(&[10, 20]), volume(&[5, 5, 5]), volume(&[30])],
            split_chapters: Default::default(),
            seasons: Some(vec![
                Season {
                    title: "S1".to_string(),
                    cover: None,
                    range: Range::new(1, 4),
                    episodes: vec![
                        Episode { title: "E1".to_string(), cover: None, range: Range::new(1, 2) },
                        Episode { title: "E2".to_string(), cover: None, range: Range::new(3, 4) },
                    ],
                },
                Season {
                    title: "S2".to_string(),
                    cover: None,
                    range: Range::open(5),
                    episodes: vec![Episode {
                        title: "E3".to_string(),
                        cover: None,
                        range: Range::open(5),
                    }],
                },
            ]),
            sagas: vec![Saga {
                title: "Saga".to_string(),
                cover: None,
                range: None,
                arcs: vec![Arc { title: "Arc".to_string(), cover: None, range: Range::open(1) }],
            }],
        }
    }

    #[test]
    fn test_volume_of_every_chapter() {
        let index = ChapterIndex::build(&dataset());
        assert_eq!(index.chapter_count(), 6);
        let owners: Vec<_> = (0..6).map(|c| index.volume_of(c).unwrap()).collect();
        assert_eq!(owners, vec![0, 0, 1, 1, 1, 2]);
        assert_eq!(index.volume_of(6), None);
    }

    #[test]
    fn test_volume_spans_and_pages() {
        let index = ChapterIndex::build(&dataset());
        assert_eq!(index.volume_span(1), Some(ChapterSpan { start: 2, end: 5 }));
        assert_eq!(index.volume_span(2), Some(ChapterSpan { start: 5, end: 6 }));
        assert_eq!(index.volume_span(3), None);
        assert_eq!(index.volume_pages(0), Some(30));
        assert_eq!(index.volume_pages(1), Some(15));
    }

    #[test]
    fn test_flattened_memberships() {
        let index = ChapterIndex::build(&dataset());
        assert_eq!(index.episode_count(), 3);
        assert_eq!(index.episode(2), Some(Member { group: 1, offset: 0 }));
        assert_eq!(index.season_episodes(0), Some(0..2));
        assert_eq!(index.season_episodes(1), Some(2..3));
        assert_eq!(index.arc_count(), 1);
        assert_eq!(index.saga_arcs(0), Some(0..1));
        assert_eq!(index.saga_arcs(1), None);
    }

    #[test]
    fn test_span_from_closed_range() {
        let span = ChapterSpan::from_range(Range::new(3, 5), 10).unwrap();
        assert_eq!(span, ChapterSpan { start: 2, end: 5 });
        assert_eq!(span.len(), 3);
        assert_eq!(span.last(), Some(4));
        assert!(span.contains(2));
        assert!(!span.contains(5));
    }

    #[test]
    fn test_span_open_range_runs_to_end() {
        let span = ChapterSpan::from_range(Range::open(7), 10).unwrap();
        assert_eq!(span, ChapterSpan { start: 6, end: 10 });
    }

    #[test]
    fn test_span_single_chapter() {
        let span = ChapterSpan::from_range(Range::new(4, 4), 10).unwrap();
        assert_eq!(span.len(), 1);
        assert_eq!(span.last(), Some(3));
    }

    #[test]
    fn test_span_rejects_bad_ranges() {
        assert!(ChapterSpan::from_range(Range::new(0, 3), 10).is_err());
        assert!(ChapterSpan::from_range(Range::new(5, 3), 10).is_err());
        assert!(ChapterSpan::from_range(Range::new(5, 4), 10).is_err());
        assert!(ChapterSpan::from_range(Range::new(5, 11), 10).is_err());
        assert!(ChapterSpan::from_range(Range::open(12), 10).is_err());
    }
}
