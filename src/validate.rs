use std::fmt;

use crate::dates::parse_chapter_date;
use crate::index::ChapterSpan;
use crate::models::{Range, TimelineData};

/// One problem found in a dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub location: String,
    pub message: String,
}

impl Issue {
    fn new(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

/// Checks the invariants the width engine relies on. Meant to run once when
/// a title is loaded, not on every width computation.
pub fn validate(data: &TimelineData) -> Vec<Issue> {
    let mut issues = Vec::new();
    let total = data.chapters().count();

    check_volumes(data, &mut issues);
    check_dates(data, &mut issues);

    for (s, saga) in data.sagas.iter().enumerate() {
        let ranges: Vec<Range> = saga.arcs.iter().map(|a| a.range).collect();
        check_siblings(&format!("saga {}", s + 1), &ranges, total, &mut issues);
        if let Some(range) = saga.range {
            check_cover(&format!("saga {}", s + 1), range, &ranges, total, &mut issues);
        }
    }

    for (s, season) in data.seasons().iter().enumerate() {
        let location = format!("season {}", s + 1);
        let ranges: Vec<Range> = season.episodes.iter().map(|e| e.range).collect();
        check_siblings(&location, &ranges, total, &mut issues);
        check_cover(&location, season.range, &ranges, total, &mut issues);
    }
    let seasons: Vec<Range> = data.seasons().iter().map(|s| s.range).collect();
    check_siblings("seasons", &seasons, total, &mut issues);

    check_splits(data, &mut issues);
    issues
}

fn check_volumes(data: &TimelineData, issues: &mut Vec<Issue>) {
    if data.volumes.is_empty() {
        issues.push(Issue::new("volumes", "title has no volumes"));
    }
    for (v, volume) in data.volumes.iter().enumerate() {
        let location = format!("volume {}", v + 1);
        if volume.chapters.is_empty() {
            issues.push(Issue::new(location, "volume has no chapters"));
        } else if volume.pages() == 0 {
            issues.push(Issue::new(location, "volume has no pages"));
        }
    }
}

fn check_dates(data: &TimelineData, issues: &mut Vec<Issue>) {
    let mut previous = None;
    for (c, chapter) in data.chapters().enumerate() {
        let location = format!("chapter {}", c + 1);
        match parse_chapter_date(&chapter.date) {
            Ok(date) => {
                if previous.is_some_and(|p| date < p) {
                    issues.push(Issue::new(location, "published before the previous chapter"));
                }
                previous = Some(date);
            }
            Err(e) => issues.push(Issue::new(location, e.to_string())),
        }
    }
}

/// Consecutive ranges must either share their boundary chapter or meet
/// without a gap.
fn check_siblings(location: &str, ranges: &[Range], total: usize, issues: &mut Vec<Issue>) {
    for (i, range) in ranges.iter().enumerate() {
        if let Err(e) = ChapterSpan::from_range(*range, total) {
            issues.push(Issue::new(format!("{location}, entry {}", i + 1), e.to_string()));
        }
    }
    for (i, pair) in ranges.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let Some(to) = a.to else {
            issues.push(Issue::new(
                format!("{location}, entry {}", i + 1),
                "open-ended range is not the last one",
            ));
            continue;
        };
        if b.from != to && b.from != to + 1 {
            issues.push(Issue::new(
                format!("{location}, entry {}", i + 2),
                format!("starts at chapter {} after a range ending at {}", b.from, to),
            ));
        }
    }
}

/// A parent range should span exactly its children.
fn check_cover(location: &str, parent: Range, children: &[Range], total: usize, issues: &mut Vec<Issue>) {
    let (Some(first), Some(last)) = (children.first(), children.last()) else {
        issues.push(Issue::new(location, "has no entries"));
        return;
    };
    let end = |r: &Range| r.to.map_or(total, |t| t as usize);
    if parent.from != first.from || end(&parent) != end(last) {
        issues.push(Issue::new(location, "range does not match its entries"));
    }
}

/// Every split chapter must be the shared boundary of two consecutive
/// episodes, otherwise some of its pages are never attributed.
fn check_splits(data: &TimelineData, issues: &mut Vec<Issue>) {
    let pages: Vec<u32> = data.chapters().map(|c| c.pages).collect();
    let episodes: Vec<Range> = data.episodes().map(|e| e.range).collect();

    for (&number, &split) in &data.split_chapters {
        let location = format!("split chapter {number}");
        let Some(&chapter_pages) = (number as usize).checked_sub(1).and_then(|i| pages.get(i)) else {
            issues.push(Issue::new(location, "no such chapter"));
            continue;
        };
        if split > chapter_pages {
            issues.push(Issue::new(
                location,
                format!("split at page {split} of a {chapter_pages}-page chapter"),
            ));
            continue;
        }
        let shared = episodes
            .windows(2)
            .any(|pair| pair[0].to == Some(number) && pair[1].from == number);
        if !shared {
            issues.push(Issue::new(location, "not shared by two consecutive episodes"));
            continue;
        }
        let crowded = episodes.windows(3).any(|w| {
            w[0].to == Some(number) && w[1] == Range::new(number, number) && w[2].from == number
        });
        if crowded {
            issues.push(Issue::new(location, "shared by more than two episodes"));
        }
    }
}
