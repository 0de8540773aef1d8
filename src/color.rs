use chrono::{DateTime, Datelike, FixedOffset};

use crate::error::{Result, TimelineError};

/// Packs 8-bit channels into a 24-bit `0xRRGGBB` value.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

pub fn channels(color: u32) -> [u8; 3] {
    [(color >> 16) as u8, (color >> 8) as u8, color as u8]
}

pub fn to_hex(color: u32) -> String {
    format!("#{:06x}", color & 0xff_ffff)
}

/// Maps `value` from `[min, max]` onto a piecewise-linear gradient through
/// `stops`, which are spaced evenly over the domain.
pub fn interpolate_color(value: f64, (min, max): (f64, f64), stops: &[u32]) -> Result<u32> {
    if stops.len() < 2 {
        return Err(TimelineError::TooFewColorStops(stops.len()));
    }
    if min == max || value.is_nan() {
        return Ok(stops[0]);
    }
    let clamped = value.clamp(min.min(max), min.max(max));
    let t = (clamped - min) / (max - min);

    let segments = stops.len() - 1;
    let scaled = t * segments as f64;
    let segment = (scaled.floor() as usize).min(segments - 1);
    let local = scaled - segment as f64;

    let from = channels(stops[segment]);
    let to = channels(stops[segment + 1]);
    let mixed: Vec<u8> = from
        .iter()
        .zip(to.iter())
        .map(|(&a, &b)| {
            let a = f64::from(a);
            (a + (f64::from(b) - a) * local).round() as u8
        })
        .collect();
    Ok(rgb(mixed[0], mixed[1], mixed[2]))
}

/// Which calendar component of a chapter date drives its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateChannel {
    Day,
    Month,
    Year,
}

/// A checked list of color stops over a fixed input domain.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    domain: (f64, f64),
    stops: Vec<u32>,
}

impl ColorScale {
    pub fn new(domain: (f64, f64), stops: Vec<u32>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(TimelineError::TooFewColorStops(stops.len()));
        }
        Ok(Self { domain, stops })
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn stops(&self) -> &[u32] {
        &self.stops
    }

    pub fn color(&self, value: f64) -> u32 {
        // Stops were checked in `new`.
        interpolate_color(value, self.domain, &self.stops).unwrap_or(self.stops[0])
    }

    /// Same stops over a new domain.
    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self {
            domain,
            stops: self.stops.clone(),
        }
    }

    /// Colors a date by one of its components. Day and month use their
    /// natural domains (1..=31, 1..=12); year uses this scale's domain.
    pub fn for_date(&self, date: &DateTime<FixedOffset>, channel: DateChannel) -> u32 {
        match channel {
            DateChannel::Day => self.with_domain((1.0, 31.0)).color(f64::from(date.day())),
            DateChannel::Month => self.with_domain((1.0, 12.0)).color(f64::from(date.month())),
            DateChannel::Year => self.color(f64::from(date.year())),
        }
    }
}
