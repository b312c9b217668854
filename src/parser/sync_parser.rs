use crate::timeline::interpolator::AnchorPoint;
use crate::TabSyncError;
use nom::character::complete::{char, multispace0};
use nom::combinator::{all_consuming, map};
use nom::multi::many0;
use nom::number::complete::double;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use serde::Deserialize;
use std::path::Path;

/// GoPlayAlong container: points to the score and carries the sync map.
///
/// ```xml
/// <track>
///   <scoreUrl>song.json</scoreUrl>
///   <mp3Url>song.mp3</mp3Url>
///   <sync>#0;0;0;0.5#2000;1;0;0.5</sync>
/// </track>
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct SyncDocument {
    #[serde(rename = "scoreUrl")]
    pub score_url: String,
    #[serde(rename = "mp3Url", default)]
    pub mp3_url: Option<String>,
    #[serde(default)]
    pub sync: String,
}

impl SyncDocument {
    pub fn points(&self) -> Result<Vec<SyncPoint>, TabSyncError> {
        parse_sync_points(&self.sync)
    }
}

/// One `time;bar;fraction;duration` entry of the sync map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncPoint {
    pub time_ms: f64,
    pub bar: f64,
    pub bar_fraction: f64,
    /// Beat duration hint in seconds, not used for timing
    pub beat_duration: f64,
}

impl SyncPoint {
    /// Every field finite, with no negative time or position.
    pub fn is_valid(&self) -> bool {
        let fields = [self.time_ms, self.bar, self.bar_fraction, self.beat_duration];
        fields.iter().all(|v| v.is_finite())
            && self.time_ms >= 0.0
            && self.bar >= 0.0
            && self.bar_fraction >= 0.0
    }

    pub fn anchor(&self) -> AnchorPoint {
        AnchorPoint::new(self.bar + self.bar_fraction, self.time_ms / 1000.0)
    }
}

fn parse_sync_point(i: &str) -> IResult<&str, SyncPoint> {
    map(
        (
            double,
            char(';'),
            double,
            char(';'),
            double,
            char(';'),
            double,
        ),
        |(time_ms, _, bar, _, bar_fraction, _, beat_duration)| SyncPoint {
            time_ms,
            bar,
            bar_fraction,
            beat_duration,
        },
    )
    .parse(i)
}

fn parse_sync_list(i: &str) -> IResult<&str, Vec<SyncPoint>> {
    all_consuming(delimited(
        multispace0,
        many0(preceded(char('#'), parse_sync_point)),
        multispace0,
    ))
    .parse(i)
}

/// Parse the `#time;bar;fraction;duration#...` sync field.
pub fn parse_sync_points(sync: &str) -> Result<Vec<SyncPoint>, TabSyncError> {
    let (_rest, points) = parse_sync_list(sync)
        .map_err(|err| TabSyncError::MissingAnchorData(format!("unparsable sync data: {err}")))?;
    if points.is_empty() {
        return Err(TabSyncError::MissingAnchorData(
            "sync data is empty".to_string(),
        ));
    }
    if let Some((index, point)) = points.iter().enumerate().find(|(_, p)| !p.is_valid()) {
        return Err(TabSyncError::MissingAnchorData(format!(
            "unparsable sync point #{index}: {point:?}"
        )));
    }
    log::debug!("Parsed {} sync points", points.len());
    Ok(points)
}

pub fn parse_sync_document(xml: &str) -> Result<SyncDocument, TabSyncError> {
    quick_xml::de::from_str(xml)
        .map_err(|err| TabSyncError::ParsingError(format!("invalid sync document: {err}")))
}

pub fn parse_sync_file(path: &Path) -> Result<SyncDocument, TabSyncError> {
    let xml = std::fs::read_to_string(path)?;
    parse_sync_document(&xml)
}
