use chrono::{DateTime, Datelike, FixedOffset, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::{Result, TimelineError};
use crate::timeline::Timeline;

/// Publication dates are pinned to Japan Standard Time.
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%B %d %Y", "%d %B %Y", "%Y-%m-%d"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChapterDate {
    /// Global 0-based chapter index.
    pub chapter: usize,
    pub date: DateTime<FixedOffset>,
}

/// A run of consecutive chapters sharing the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateGroup {
    pub key: i32,
    pub dates: Vec<ChapterDate>,
}

impl DateGroup {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_chapter(&self) -> Option<usize> {
        self.dates.first().map(|d| d.chapter)
    }
}

/// Calendar bucket used for the timeline's date axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DateGrouping {
    #[default]
    Month,
    Year,
}

impl DateGrouping {
    pub fn group(self, timeline: &Timeline) -> Result<Vec<DateGroup>> {
        match self {
            DateGrouping::Month => chapter_dates_by_month(timeline),
            DateGrouping::Year => chapter_dates_by_year(timeline),
        }
    }

    /// Human-readable form of a group key, `2020-01` or `2020`.
    pub fn describe(self, key: i32) -> String {
        match self {
            DateGrouping::Month => format!("{}-{:02}", key.div_euclid(12), key.rem_euclid(12) + 1),
            DateGrouping::Year => key.to_string(),
        }
    }
}

fn jst() -> Option<FixedOffset> {
    FixedOffset::east_opt(JST_OFFSET_SECS)
}

fn ordinal_suffix() -> &'static Regex {
    static ORDINAL: OnceLock<Regex> = OnceLock::new();
    ORDINAL.get_or_init(|| Regex::new(r"(\d+)(?:st|nd|rd|th)\b").unwrap())
}

/// Parses a free-text publication date such as `"July 22nd, 1997"` into
/// midnight of that day in JST.
pub fn parse_chapter_date(text: &str) -> Result<DateTime<FixedOffset>> {
    let cleaned = ordinal_suffix().replace_all(text.trim(), "$1");
    let day = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&cleaned, fmt).ok())
        .ok_or_else(|| TimelineError::InvalidDate(text.to_string()))?;
    day.and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(jst()?).single())
        .ok_or_else(|| TimelineError::InvalidDate(text.to_string()))
}

/// Parsed dates of every chapter, in chapter order.
pub fn chapter_dates(timeline: &Timeline) -> impl Iterator<Item = Result<ChapterDate>> + '_ {
    timeline
        .data()
        .chapters()
        .enumerate()
        .map(|(chapter, c)| {
            parse_chapter_date(&c.date).map(|date| ChapterDate { chapter, date })
        })
}

/// Splits `items` into runs of consecutive elements with equal keys.
///
/// A key that comes back after a different one starts a new run.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.last_mut() {
            Some((last, run)) if *last == k => run.push(item),
            _ => groups.push((k, vec![item])),
        }
    }
    groups
}

pub fn month_key(date: &DateTime<FixedOffset>) -> i32 {
    date.year() * 12 + date.month0() as i32
}

pub fn year_key(date: &DateTime<FixedOffset>) -> i32 {
    date.year()
}

pub fn chapter_dates_by_month(timeline: &Timeline) -> Result<Vec<DateGroup>> {
    grouped(timeline, month_key)
}

pub fn chapter_dates_by_year(timeline: &Timeline) -> Result<Vec<DateGroup>> {
    grouped(timeline, year_key)
}

fn grouped(timeline: &Timeline, key: fn(&DateTime<FixedOffset>) -> i32) -> Result<Vec<DateGroup>> {
    let dates = chapter_dates(timeline).collect::<Result<Vec<_>>>()?;
    Ok(group_by(dates, |d| key(&d.date))
        .into_iter()
        .map(|(key, dates)| DateGroup { key, dates })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimelineData, Volume};
    use crate::testing::chapter;
    use chrono::{TimeZone, Utc};

    fn dated(dates: &[&str]) -> Timeline {
        Timeline::new(TimelineData {
            title: "Dates".to_string(),
            volumes: vec![Volume {
                title: "Volume 1".to_string(),
                cover: None,
                chapters: dates
                    .iter()
                    .enumerate()
                    .map(|(i, d)| chapter(i + 1, 10, d))
                    .collect(),
            }],
            split_chapters: Default::default(),
            seasons: None,
            sagas: Vec::new(),
        })
    }

    #[test]
    fn test_parse_long_month_with_ordinal() {
        let date = parse_chapter_date("July 22nd, 1997").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1997, 7, 22));
        assert_eq!(date.offset().local_minus_utc(), JST_OFFSET_SECS);
    }

    #[test]
    fn test_parse_all_ordinal_variants() {
        for (text, day) in [
            ("March 1st, 2001", 1),
            ("March 2nd, 2001", 2),
            ("March 3rd, 2001", 3),
            ("March 4th, 2001", 4),
            ("March 21st, 2001", 21),
        ] {
            assert_eq!(parse_chapter_date(text).unwrap().day(), day, "{text}");
        }
    }

    #[test]
    fn test_parse_other_formats() {
        let expected = parse_chapter_date("August 4, 1997").unwrap();
        assert_eq!(parse_chapter_date("Aug 4, 1997").unwrap(), expected);
        assert_eq!(parse_chapter_date("4 August 1997").unwrap(), expected);
        assert_eq!(parse_chapter_date("1997-08-04").unwrap(), expected);
        assert_eq!(parse_chapter_date("  August 4th 1997 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_is_midnight_jst() {
        let date = parse_chapter_date("January 1st, 2020").unwrap();
        // JST midnight is 15:00 UTC on the previous day.
        let utc = Utc.with_ymd_and_hms(2019, 12, 31, 15, 0, 0).unwrap();
        assert_eq!(date.with_timezone(&Utc), utc);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_chapter_date("sometime in spring").unwrap_err(),
            TimelineError::InvalidDate("sometime in spring".to_string())
        );
        assert!(parse_chapter_date("February 30, 2020").is_err());
    }

    #[test]
    fn test_group_by_contiguous_runs_only() {
        let groups = group_by([1, 1, 2, 1, 1, 1], |x| *x);
        let sizes: Vec<_> = groups.iter().map(|(_, run)| run.len()).collect();
        assert_eq!(sizes, vec![2, 1, 3]);
        assert!(group_by(Vec::<i32>::new(), |x| *x).is_empty());
    }

    #[test]
    fn test_chapter_dates_in_order() {
        let timeline = dated(&["May 1, 2020", "May 8, 2020"]);
        let dates: Vec<_> = chapter_dates(&timeline).map(|d| d.unwrap()).collect();
        assert_eq!(dates.len(), 2);
        assert_eq!(dates[1].chapter, 1);
        assert!(dates[0].date < dates[1].date);
    }

    #[test]
    fn test_group_by_month_keeps_repeats_apart() {
        let timeline = dated(&["January 6, 2020", "January 20, 2020", "February 3, 2020", "January 11, 2021"]);
        let groups = chapter_dates_by_month(&timeline).unwrap();
        let sizes: Vec<_> = groups.iter().map(DateGroup::len).collect();
        assert_eq!(sizes, vec![2, 1, 1]);
        assert_eq!(groups[0].key, 2020 * 12);
        assert_eq!(groups[1].key, 2020 * 12 + 1);
        assert_eq!(groups[2].first_chapter(), Some(3));
    }

    #[test]
    fn test_group_by_year() {
        let timeline = dated(&["January 6, 2020", "February 3, 2020", "January 11, 2021"]);
        let groups = chapter_dates_by_year(&timeline).unwrap();
        let keys: Vec<_> = groups.iter().map(|g| g.key).collect();
        assert_eq!(keys, vec![2020, 2021]);
        assert_eq!(groups[0].len(), 2);
    }

    #[test]
    fn test_grouping_dispatch_and_keys() {
        let timeline = dated(&["March 3, 2020", "March 9, 2020"]);
        let groups = DateGrouping::Month.group(&timeline).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(DateGrouping::Month.describe(groups[0].key), "2020-03");
        assert_eq!(DateGrouping::Year.describe(2020), "2020");
    }

    #[test]
    fn test_grouping_fails_on_bad_date() {
        let timeline = dated(&["January 6, 2020", "not a date"]);
        assert!(matches!(
            chapter_dates_by_month(&timeline),
            Err(TimelineError::InvalidDate(_))
        ));
    }
}
