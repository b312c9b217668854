use crate::TabSyncError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

// Tablature documents are the JSON rendition of a parsed Guitar Pro score:
// song metadata, one settings entry per bar, and tracks holding the bars themselves.

pub const QUARTER: u16 = 4;
pub const DEFAULT_TEMPO: u32 = 120;

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TabSong {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Copyright field, used as album year
    pub year: String,
    pub tempo: u32,
    pub bar_settings: Vec<BarSettings>,
    pub tracks: Vec<TabTrack>,
}

impl Default for TabSong {
    fn default() -> Self {
        TabSong {
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            year: String::new(),
            tempo: DEFAULT_TEMPO,
            bar_settings: vec![],
            tracks: vec![],
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BarSettings {
    pub time_signature: Option<TimeSignature>,
    pub marker: Option<String>,
    pub repeat_open: bool,
    /// Number of extra passes over the repeated section
    pub repeat_close: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimeSignature {
    pub numerator: u8,
    pub denominator: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        TimeSignature {
            numerator: 4,
            denominator: 4,
        }
    }
}

impl TimeSignature {
    /// Length of a bar in quarter notes.
    pub fn quarter_units(&self) -> Result<f64, TabSyncError> {
        if self.numerator == 0 || self.denominator == 0 {
            return Err(TabSyncError::StructuralInconsistency(format!(
                "invalid time signature {}/{}",
                self.numerator, self.denominator
            )));
        }
        Ok(4.0 * f64::from(self.numerator) / f64::from(self.denominator))
    }
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TabTrack {
    pub name: String,
    /// MIDI pitch of each open string, lowest string first
    pub tuning: Vec<i32>,
    pub capo: u8,
    pub bars: Vec<Bar>,
}

impl TabTrack {
    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Bar {
    pub beats: Vec<Beat>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Beat {
    pub duration: Duration,
    /// Notes keyed by tablature string, 1 being the highest pitched string
    pub notes: BTreeMap<u8, Note>,
    pub tone: Option<String>,
}

impl Beat {
    pub fn is_rest(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Note value as written in the score: 1 = whole, 4 = quarter, 64 = sixty-fourth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Duration {
    pub value: u16,
}

impl Default for Duration {
    fn default() -> Self {
        Duration { value: QUARTER }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HarmonicType {
    #[default]
    None,
    Natural,
    Pinch,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    #[default]
    Normal,
    Dead,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideType {
    IntoFromAbove,
    IntoFromBelow,
    ShiftSlideTo,
    LegatoSlideTo,
    OutDownwards,
    OutUpWards,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraceEffect {
    pub fret: i8,
    pub is_dead: bool,
    pub is_on_beat: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BendPoint {
    /// Offset from the note start in milliseconds
    pub time_ms: f64,
    /// Pitch alteration in hundredths of a semitone
    pub alteration: i32,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BendEffect {
    pub points: Vec<BendPoint>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Note {
    pub fret: u8,
    pub kind: NoteType,
    pub accentuated: bool,
    pub palm_mute: bool,
    pub tremolo: bool,
    pub harmonic: HarmonicType,
    pub bend: Option<BendEffect>,
    // not rendered yet
    pub slide: Option<SlideType>,
    pub hammer: bool,
    pub grace: Option<GraceEffect>,
}

pub fn parse_tab_data(data: &[u8]) -> Result<TabSong, TabSyncError> {
    let song: TabSong = serde_json::from_slice(data)
        .map_err(|err| TabSyncError::ParsingError(format!("invalid tablature: {err}")))?;
    log::debug!(
        "Parsed tablature '{}' with {} tracks and {} bars",
        song.title,
        song.tracks.len(),
        song.bar_settings.len()
    );
    Ok(song)
}

pub fn parse_tab_file(path: &Path) -> Result<TabSong, TabSyncError> {
    let data = std::fs::read(path)?;
    parse_tab_data(&data)
}
