use crate::color::{ColorScale, to_hex};
use crate::dates::DateGrouping;
use crate::error::Result;
use crate::timeline::Timeline;
use crate::width::{Layout, WidthMode};

/// Tab-separated `layout number, width, title` rows for one layout, or for a
/// single entity when `index` is given.
pub fn width_rows(
    timeline: &Timeline,
    layout: Layout,
    index: Option<usize>,
    mode: WidthMode,
) -> Result<Vec<String>> {
    let indices: Vec<usize> = match index {
        Some(i) => vec![i],
        None => (0..timeline.count(layout)).collect(),
    };
    indices
        .into_iter()
        .map(|i| {
            let width = timeline.width(layout, i, mode)?;
            let label = timeline.label(layout, i)?;
            Ok(format!("{} {}\t{:.3}\t{}", layout, i + 1, width, label))
        })
        .collect()
}

/// One row per calendar group: key, chapter count, chapter numbers and a
/// color picked by the group's position along the timeline.
pub fn date_rows(
    timeline: &Timeline,
    grouping: DateGrouping,
    stops: &[u32],
) -> Result<Vec<String>> {
    let groups = grouping.group(timeline)?;
    let last = groups.len().saturating_sub(1) as f64;
    let scale = ColorScale::new((0.0, last), stops.to_vec())?;
    Ok(groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let first = group.first_chapter().map_or(0, |c| c + 1);
            let end = first + group.len().saturating_sub(1);
            format!(
                "{}\t{}\t{}-{}\t{}",
                grouping.describe(group.key),
                group.len(),
                first,
                end,
                to_hex(scale.color(i as f64))
            )
        })
        .collect())
}
