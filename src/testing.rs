//! Small hand-built datasets shared by the unit tests.

use crate::models::{Arc, Chapter, Episode, Range, Saga, Season, TimelineData, Volume};
use crate::timeline::Timeline;

pub fn chapter(number: usize, pages: u32, date: &str) -> Chapter {
    Chapter {
        title: format!("Chapter {number}"),
        date: date.to_string(),
        pages,
        cover: None,
    }
}

/// Volumes of consecutive chapters; `pages[v]` lists volume v's chapters.
pub fn volumes(pages: &[&[u32]]) -> Vec<Volume> {
    let mut number = 0;
    pages
        .iter()
        .enumerate()
        .map(|(v, chapters)| Volume {
            title: format!("Volume {}", v + 1),
            cover: None,
            chapters: chapters
                .iter()
                .map(|&p| {
                    number += 1;
                    chapter(number, p, "January 1, 2020")
                })
                .collect(),
        })
        .collect()
}

pub fn episode(number: usize, range: Range) -> Episode {
    Episode {
        title: format!("Episode {number}"),
        cover: None,
        range,
    }
}

pub fn arc(number: usize, range: Range) -> Arc {
    Arc {
        title: format!("Arc {number}"),
        cover: None,
        range,
    }
}

/// Eight chapters in three volumes of 100, 70 and 80 pages.
///
/// Chapter 3 (50 pages) is split at 10 between episodes 1 and 2, chapter 6
/// (20 pages) at 14 between episodes 2 and 3, which is also the boundary
/// between the two seasons.
pub fn sample_data() -> TimelineData {
    TimelineData {
        title: "Sample".to_string(),
        volumes: volumes(&[&[20, 30, 50], &[36, 14, 20], &[40, 40]]),
        split_chapters: [(3, 10), (6, 14)].into_iter().collect(),
        seasons: Some(vec![
            Season {
                title: "Season 1".to_string(),
                cover: None,
                range: Range::new(1, 6),
                episodes: vec![episode(1, Range::new(1, 3)), episode(2, Range::new(3, 6))],
            },
            Season {
                title: "Season 2".to_string(),
                cover: None,
                range: Range::open(6),
                episodes: vec![episode(3, Range::new(6, 7)), episode(4, Range::new(8, 8))],
            },
        ]),
        sagas: vec![
            Saga {
                title: "Saga 1".to_string(),
                cover: None,
                range: Some(Range::new(1, 6)),
                arcs: vec![arc(1, Range::new(1, 4)), arc(2, Range::new(5, 6))],
            },
            Saga {
                title: "Saga 2".to_string(),
                cover: None,
                range: None,
                arcs: vec![arc(3, Range::open(7))],
            },
        ],
    }
}

pub fn sample_timeline() -> Timeline {
    Timeline::new(sample_data())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
