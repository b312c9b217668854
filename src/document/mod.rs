//! In-memory arrangement document, shaped after the Rocksmith 2014 song XML.
//!
//! Field order is the element order of the written document; attributes are the
//! fields renamed with a leading `@` and always come before child elements.

pub mod assembler;
pub mod counted;
pub mod writer;

use crate::document::counted::{Counted, Unused};
use serde::Serialize;

pub const DOCUMENT_VERSION: u8 = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename = "song", rename_all = "camelCase")]
pub struct SongDocument {
    #[serde(rename = "@version")]
    pub version: u8,
    pub title: String,
    pub arrangement: String,
    #[serde(rename = "wavefilepath")]
    pub wave_file_path: String,
    pub part: u8,
    pub offset: f64,
    pub cent_offset: i32,
    pub song_length: f64,
    pub internal_name: String,
    pub song_name_sort: String,
    pub start_beat: f64,
    pub average_tempo: f64,
    pub tuning: Tuning,
    pub capo: u8,
    pub artist_name: String,
    pub artist_name_sort: String,
    pub album_name: String,
    pub album_name_sort: String,
    pub album_year: String,
    pub album_art: String,
    pub crowd_speed: u8,
    pub arrangement_properties: ArrangementProperties,
    pub last_conversion_date_time: String,
    pub tone_base: String,
    #[serde(rename = "toneA")]
    pub tone_a: String,
    #[serde(rename = "toneB")]
    pub tone_b: String,
    #[serde(rename = "toneC")]
    pub tone_c: String,
    #[serde(rename = "toneD")]
    pub tone_d: String,
    pub tones: Counted<ToneNode>,
    pub phrases: Counted<PhraseNode>,
    pub phrase_iterations: Counted<PhraseIterationNode>,
    pub new_linked_diffs: Counted<Unused>,
    pub linked_diffs: Counted<Unused>,
    pub phrase_properties: Counted<Unused>,
    pub chord_templates: Counted<ChordTemplateNode>,
    pub fret_hand_mute_templates: Counted<Unused>,
    pub ebeats: Counted<EbeatNode>,
    pub sections: Counted<SectionNode>,
    pub events: Counted<Unused>,
    pub transcription_track: LevelNode,
    pub levels: Counted<LevelNode>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Tuning {
    #[serde(rename = "@string0")]
    pub string0: i32,
    #[serde(rename = "@string1")]
    pub string1: i32,
    #[serde(rename = "@string2")]
    pub string2: i32,
    #[serde(rename = "@string3")]
    pub string3: i32,
    #[serde(rename = "@string4")]
    pub string4: i32,
    #[serde(rename = "@string5")]
    pub string5: i32,
}

/// Arrangement feature flags, 0 or 1.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ArrangementProperties {
    #[serde(rename = "@represent")]
    pub represent: u8,
    #[serde(rename = "@bonusArr")]
    pub bonus_arr: u8,
    #[serde(rename = "@standardTuning")]
    pub standard_tuning: u8,
    #[serde(rename = "@nonStandardChords")]
    pub non_standard_chords: u8,
    #[serde(rename = "@barreChords")]
    pub barre_chords: u8,
    #[serde(rename = "@powerChords")]
    pub power_chords: u8,
    #[serde(rename = "@dropDPower")]
    pub drop_d_power: u8,
    #[serde(rename = "@openChords")]
    pub open_chords: u8,
    #[serde(rename = "@fingerPicking")]
    pub finger_picking: u8,
    #[serde(rename = "@pickDirection")]
    pub pick_direction: u8,
    #[serde(rename = "@doubleStops")]
    pub double_stops: u8,
    #[serde(rename = "@palmMutes")]
    pub palm_mutes: u8,
    #[serde(rename = "@harmonics")]
    pub harmonics: u8,
    #[serde(rename = "@pinchHarmonics")]
    pub pinch_harmonics: u8,
    #[serde(rename = "@hopo")]
    pub hopo: u8,
    #[serde(rename = "@tremolo")]
    pub tremolo: u8,
    #[serde(rename = "@slides")]
    pub slides: u8,
    #[serde(rename = "@unpitchedSlides")]
    pub unpitched_slides: u8,
    #[serde(rename = "@bends")]
    pub bends: u8,
    #[serde(rename = "@tapping")]
    pub tapping: u8,
    #[serde(rename = "@vibrato")]
    pub vibrato: u8,
    #[serde(rename = "@fretHandMutes")]
    pub fret_hand_mutes: u8,
    #[serde(rename = "@slapPop")]
    pub slap_pop: u8,
    #[serde(rename = "@twoFingerPicking")]
    pub two_finger_picking: u8,
    #[serde(rename = "@fifthsAndOctaves")]
    pub fifths_and_octaves: u8,
    #[serde(rename = "@syncopation")]
    pub syncopation: u8,
    #[serde(rename = "@bassPick")]
    pub bass_pick: u8,
    #[serde(rename = "@sustain")]
    pub sustain: u8,
    #[serde(rename = "@pathLead")]
    pub path_lead: u8,
    #[serde(rename = "@pathRhythm")]
    pub path_rhythm: u8,
    #[serde(rename = "@pathBass")]
    pub path_bass: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@id")]
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseNode {
    #[serde(rename = "@disparity")]
    pub disparity: u8,
    #[serde(rename = "@ignore")]
    pub ignore: u8,
    #[serde(rename = "@maxDifficulty")]
    pub max_difficulty: u8,
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@solo")]
    pub solo: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseIterationNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@phraseId")]
    pub phrase_id: u32,
    #[serde(rename = "@variation")]
    pub variation: String,
}

/// Frets and fingers per string, -1 for unused strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChordTemplateNode {
    #[serde(rename = "@chordName")]
    pub chord_name: String,
    #[serde(rename = "@displayName")]
    pub display_name: String,
    #[serde(rename = "@finger0")]
    pub finger0: i8,
    #[serde(rename = "@finger1")]
    pub finger1: i8,
    #[serde(rename = "@finger2")]
    pub finger2: i8,
    #[serde(rename = "@finger3")]
    pub finger3: i8,
    #[serde(rename = "@finger4")]
    pub finger4: i8,
    #[serde(rename = "@finger5")]
    pub finger5: i8,
    #[serde(rename = "@fret0")]
    pub fret0: i8,
    #[serde(rename = "@fret1")]
    pub fret1: i8,
    #[serde(rename = "@fret2")]
    pub fret2: i8,
    #[serde(rename = "@fret3")]
    pub fret3: i8,
    #[serde(rename = "@fret4")]
    pub fret4: i8,
    #[serde(rename = "@fret5")]
    pub fret5: i8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EbeatNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@measure")]
    pub measure: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionNode {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@number")]
    pub number: u32,
    #[serde(rename = "@startTime")]
    pub start_time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelNode {
    #[serde(rename = "@difficulty")]
    pub difficulty: i32,
    pub notes: Counted<NoteNode>,
    pub chords: Counted<ChordNode>,
    pub fret_hand_mutes: Counted<Unused>,
    pub anchors: Counted<AnchorNode>,
    pub hand_shapes: Counted<HandShapeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BendValueNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@step")]
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@linkNext")]
    pub link_next: u8,
    #[serde(rename = "@accent")]
    pub accent: u8,
    #[serde(rename = "@bend")]
    pub bend: u8,
    #[serde(rename = "@fret")]
    pub fret: u8,
    #[serde(rename = "@hammerOn")]
    pub hammer_on: u8,
    #[serde(rename = "@harmonic")]
    pub harmonic: u8,
    #[serde(rename = "@hopo")]
    pub hopo: u8,
    #[serde(rename = "@ignore")]
    pub ignore: u8,
    #[serde(rename = "@leftHand")]
    pub left_hand: i8,
    #[serde(rename = "@mute")]
    pub mute: u8,
    #[serde(rename = "@palmMute")]
    pub palm_mute: u8,
    #[serde(rename = "@pluck")]
    pub pluck: i8,
    #[serde(rename = "@pullOff")]
    pub pull_off: u8,
    #[serde(rename = "@slap")]
    pub slap: i8,
    #[serde(rename = "@slideTo")]
    pub slide_to: i8,
    #[serde(rename = "@string")]
    pub string: u8,
    #[serde(rename = "@sustain")]
    pub sustain: f64,
    #[serde(rename = "@tremolo")]
    pub tremolo: u8,
    #[serde(rename = "@harmonicPinch")]
    pub harmonic_pinch: u8,
    #[serde(rename = "@pickDirection")]
    pub pick_direction: u8,
    #[serde(rename = "@rightHand")]
    pub right_hand: i8,
    #[serde(rename = "@slideUnpitchTo")]
    pub slide_unpitch_to: i8,
    #[serde(rename = "@tap")]
    pub tap: u8,
    #[serde(rename = "@vibrato")]
    pub vibrato: u8,
    /// Always present on single notes, absent on chord notes
    #[serde(rename = "bendValues", skip_serializing_if = "Option::is_none")]
    pub bend_values: Option<Counted<BendValueNode>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChordNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@linkNext")]
    pub link_next: u8,
    #[serde(rename = "@accent")]
    pub accent: u8,
    #[serde(rename = "@chordId")]
    pub chord_id: u32,
    #[serde(rename = "@fretHandMute")]
    pub fret_hand_mute: u8,
    #[serde(rename = "@highDensity")]
    pub high_density: u8,
    #[serde(rename = "@ignore")]
    pub ignore: u8,
    #[serde(rename = "@palmMute")]
    pub palm_mute: u8,
    #[serde(rename = "@hopo")]
    pub hopo: u8,
    #[serde(rename = "@strum")]
    pub strum: String,
    /// Written inline, without a counted wrapper
    #[serde(rename = "chordNote")]
    pub chord_notes: Vec<NoteNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnchorNode {
    #[serde(rename = "@time")]
    pub time: f64,
    #[serde(rename = "@fret")]
    pub fret: u8,
    #[serde(rename = "@width")]
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandShapeNode {
    #[serde(rename = "@chordId")]
    pub chord_id: u32,
    #[serde(rename = "@endTime")]
    pub end_time: f64,
    #[serde(rename = "@startTime")]
    pub start_time: f64,
}
