use crate::document::counted::Counted;
use crate::document::{
    AnchorNode, ArrangementProperties, BendValueNode, ChordNode, ChordTemplateNode, EbeatNode,
    HandShapeNode, LevelNode, NoteNode, PhraseIterationNode, PhraseNode, SectionNode,
    SongDocument, ToneNode, Tuning, DOCUMENT_VERSION,
};
use crate::parser::tab_parser::{TabSong, TabTrack};
use crate::timeline::builder::Timeline;
use crate::timeline::events::{ChordEvent, NoteEvent};
use crate::timeline::tuning::TuningOffset;

pub const DEFAULT_OFFSET: f64 = -10.0;
const TRANSCRIPTION_DIFFICULTY: i32 = -1;
const ANCHOR_WIDTH: f64 = 4.0;
const LEADING_ARTICLES: [&str; 3] = ["the", "a", "an"];

/// Per-run values that do not come from the tablature.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub offset: f64,
    pub base_tone: Option<String>,
    /// Written as `lastConversionDateTime`
    pub conversion_date: String,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            offset: DEFAULT_OFFSET,
            base_tone: None,
            conversion_date: String::new(),
        }
    }
}

/// Sort key for titles and names: leading article dropped, then capitalized.
pub fn sortable_name(name: &str) -> String {
    let trimmed = name.trim_start();
    let stripped = trimmed
        .split_once(char::is_whitespace)
        .filter(|(first, _)| {
            LEADING_ARTICLES
                .iter()
                .any(|article| first.eq_ignore_ascii_case(article))
        })
        .map_or(trimmed, |(_, rest)| rest.trim_start());
    capitalize(stripped)
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Alphanumeric characters of the artist followed by those of the title.
pub fn internal_name(artist: &str, title: &str) -> String {
    artist
        .chars()
        .chain(title.chars())
        .filter(|c| c.is_alphanumeric())
        .collect()
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

impl From<&NoteEvent> for NoteNode {
    fn from(note: &NoteEvent) -> Self {
        let bend_values = note
            .bend_values
            .iter()
            .map(|b| BendValueNode {
                time: b.time,
                step: b.step,
            })
            .collect();
        NoteNode {
            time: note.time,
            link_next: 0,
            accent: flag(note.accent),
            bend: flag(note.has_bend()),
            fret: note.fret,
            hammer_on: 0,
            harmonic: flag(note.harmonic),
            hopo: flag(note.hopo),
            ignore: flag(note.ignore),
            left_hand: -1,
            mute: flag(note.mute),
            palm_mute: flag(note.palm_mute),
            pluck: -1,
            pull_off: 0,
            slap: -1,
            slide_to: -1,
            string: note.string,
            sustain: 0.0,
            tremolo: flag(note.tremolo),
            harmonic_pinch: flag(note.harmonic_pinch),
            pick_direction: 0,
            right_hand: -1,
            slide_unpitch_to: -1,
            tap: 0,
            vibrato: 0,
            bend_values: Some(Counted::new("bendValue", bend_values)),
        }
    }
}

impl From<&ChordEvent> for ChordNode {
    fn from(chord: &ChordEvent) -> Self {
        ChordNode {
            time: chord.time,
            link_next: 0,
            accent: flag(chord.accent),
            chord_id: 0,
            fret_hand_mute: 0,
            high_density: 0,
            ignore: flag(chord.ignore),
            palm_mute: flag(chord.palm_mute),
            hopo: flag(chord.hopo),
            strum: "down".to_string(),
            chord_notes: chord
                .notes
                .iter()
                .map(|note| NoteNode {
                    bend_values: None,
                    ..NoteNode::from(note)
                })
                .collect(),
        }
    }
}

impl From<TuningOffset> for Tuning {
    fn from(offset: TuningOffset) -> Self {
        let [string0, string1, string2, string3, string4, string5] = offset.strings;
        Tuning {
            string0,
            string1,
            string2,
            string3,
            string4,
            string5,
        }
    }
}

fn arrangement_properties(timeline: &Timeline, tuning: &TuningOffset) -> ArrangementProperties {
    let notes = || {
        timeline
            .notes
            .iter()
            .chain(timeline.chords.iter().flat_map(|c| c.notes.iter()))
    };
    ArrangementProperties {
        represent: 1,
        standard_tuning: flag(tuning.is_standard()),
        double_stops: flag(timeline.chords.iter().any(|c| c.notes.len() == 2)),
        palm_mutes: flag(notes().any(|n| n.palm_mute)),
        harmonics: flag(notes().any(|n| n.harmonic && !n.harmonic_pinch)),
        pinch_harmonics: flag(notes().any(|n| n.harmonic_pinch)),
        tremolo: flag(notes().any(|n| n.tremolo)),
        bends: flag(timeline.notes.iter().any(NoteEvent::has_bend)),
        path_lead: 1,
        ..Default::default()
    }
}

// Placeholders until phrases, fingerings and anchors are inferred from the notes.

fn default_phrase() -> PhraseNode {
    PhraseNode {
        disparity: 0,
        ignore: 0,
        max_difficulty: 0,
        name: String::new(),
        solo: 0,
    }
}

fn default_chord_template() -> ChordTemplateNode {
    ChordTemplateNode {
        chord_name: String::new(),
        display_name: String::new(),
        finger0: -1,
        finger1: -1,
        finger2: -1,
        finger3: -1,
        finger4: -1,
        finger5: -1,
        fret0: -1,
        fret1: -1,
        fret2: -1,
        fret3: -1,
        fret4: -1,
        fret5: -1,
    }
}

fn empty_level(difficulty: i32) -> LevelNode {
    LevelNode {
        difficulty,
        notes: Counted::empty("note"),
        chords: Counted::empty("chord"),
        fret_hand_mutes: Counted::empty("fretHandMute"),
        anchors: Counted::empty("anchor"),
        hand_shapes: Counted::empty("handShape"),
    }
}

/// Packages a finished track timeline into the arrangement document.
pub fn assemble_document(
    song: &TabSong,
    track: &TabTrack,
    timeline: &Timeline,
    tuning: TuningOffset,
    settings: &ConversionSettings,
) -> SongDocument {
    let start_time = timeline.start_time();
    let internal_name = internal_name(&song.artist, &song.title);
    let tone_name = |index: usize| timeline.tones.get(index).cloned().unwrap_or_default();

    let level = LevelNode {
        difficulty: 0,
        notes: Counted::new("note", timeline.notes.iter().map(NoteNode::from).collect()),
        chords: Counted::new(
            "chord",
            timeline.chords.iter().map(ChordNode::from).collect(),
        ),
        fret_hand_mutes: Counted::empty("fretHandMute"),
        anchors: Counted::new(
            "anchor",
            vec![AnchorNode {
                time: start_time,
                fret: 1,
                width: ANCHOR_WIDTH,
            }],
        ),
        hand_shapes: Counted::new(
            "handShape",
            vec![HandShapeNode {
                chord_id: 0,
                end_time: start_time,
                start_time,
            }],
        ),
    };

    SongDocument {
        version: DOCUMENT_VERSION,
        title: song.title.clone(),
        arrangement: track.name.clone(),
        wave_file_path: String::new(),
        part: 1,
        offset: settings.offset,
        cent_offset: 0,
        song_length: timeline.end_time(),
        song_name_sort: sortable_name(&song.title),
        start_beat: start_time,
        average_tempo: f64::from(song.tempo),
        tuning: tuning.into(),
        capo: track.capo,
        artist_name: song.artist.clone(),
        artist_name_sort: sortable_name(&song.artist),
        album_name: song.album.clone(),
        album_name_sort: sortable_name(&song.album),
        album_year: song.year.clone(),
        album_art: internal_name.clone(),
        internal_name,
        crowd_speed: 1,
        arrangement_properties: arrangement_properties(timeline, &tuning),
        last_conversion_date_time: settings.conversion_date.clone(),
        tone_base: settings.base_tone.clone().unwrap_or_default(),
        tone_a: tone_name(0),
        tone_b: tone_name(1),
        tone_c: tone_name(2),
        tone_d: tone_name(3),
        tones: Counted::new(
            "tone",
            timeline
                .tone_changes
                .iter()
                .map(|t| ToneNode {
                    time: t.time,
                    id: t.tone_id,
                })
                .collect(),
        ),
        phrases: Counted::new("phrase", vec![default_phrase()]),
        phrase_iterations: Counted::new(
            "phraseIteration",
            vec![PhraseIterationNode {
                time: start_time,
                phrase_id: 0,
                variation: String::new(),
            }],
        ),
        new_linked_diffs: Counted::empty("newLinkedDiff"),
        linked_diffs: Counted::empty("linkedDiff"),
        phrase_properties: Counted::empty("phraseProperty"),
        chord_templates: Counted::new("chordTemplate", vec![default_chord_template()]),
        fret_hand_mute_templates: Counted::empty("fretHandMuteTemplate"),
        ebeats: Counted::new(
            "ebeat",
            timeline
                .beat_markers
                .iter()
                .map(|b| EbeatNode {
                    time: b.time,
                    measure: b.measure,
                })
                .collect(),
        ),
        sections: Counted::new(
            "section",
            timeline
                .sections
                .iter()
                .map(|s| SectionNode {
                    name: s.name.clone(),
                    number: s.number,
                    start_time: s.time,
                })
                .collect(),
        ),
        events: Counted::empty("event"),
        transcription_track: empty_level(TRANSCRIPTION_DIFFICULTY),
        levels: Counted::new("level", vec![level]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::events::{BeatMarkerEvent, BendValue, SectionEvent, ToneChangeEvent};

    fn note(string: u8, palm_mute: bool) -> NoteEvent {
        NoteEvent {
            time: 10.5,
            string,
            fret: 3,
            accent: false,
            mute: false,
            palm_mute,
            tremolo: false,
            harmonic: false,
            harmonic_pinch: false,
            hopo: false,
            ignore: false,
            bend_values: vec![],
        }
    }

    fn sample_timeline() -> Timeline {
        let mut bent = note(2, false);
        bent.bend_values.push(BendValue {
            time: 10.6,
            step: 1.0,
        });
        Timeline {
            notes: vec![note(0, true), bent],
            chords: vec![ChordEvent::from_notes(
                11.0,
                vec![note(0, true), note(1, true)],
            )],
            beat_markers: vec![
                BeatMarkerEvent::new_measure(10.0, 1),
                BeatMarkerEvent::new_beat(10.5),
                BeatMarkerEvent::new_measure(11.0, 2),
            ],
            sections: vec![SectionEvent {
                name: "intro".to_string(),
                number: 1,
                time: 10.0,
            }],
            tone_changes: vec![ToneChangeEvent {
                time: 10.0,
                tone_id: 1,
            }],
            tones: vec!["Clean".to_string()],
        }
    }

    fn sample_song() -> TabSong {
        TabSong {
            title: "The Trooper".to_string(),
            artist: "Iron Maiden".to_string(),
            album: "Piece of Mind".to_string(),
            year: "1983".to_string(),
            tempo: 160,
            ..Default::default()
        }
    }

    #[test]
    fn test_sortable_name() {
        assert_eq!(sortable_name("The Trooper"), "Trooper");
        assert_eq!(sortable_name("a day in the life"), "Day in the life");
        assert_eq!(sortable_name("AN Example"), "Example");
        assert_eq!(sortable_name("Anthrax"), "Anthrax");
        assert_eq!(sortable_name("Theory of a Deadman"), "Theory of a deadman");
        assert_eq!(sortable_name("A"), "A");
        assert_eq!(sortable_name(""), "");
    }

    #[test]
    fn test_internal_name() {
        assert_eq!(internal_name("Iron Maiden", "The Trooper"), "IronMaidenTheTrooper");
        assert_eq!(internal_name("AC/DC", "T.N.T."), "ACDCTNT");
    }

    #[test]
    fn test_assemble_document() {
        let song = sample_song();
        let track = TabTrack {
            name: "Lead".to_string(),
            capo: 2,
            ..Default::default()
        };
        let settings = ConversionSettings {
            conversion_date: "2024-01-01 10:00:00".to_string(),
            ..Default::default()
        };
        let timeline = sample_timeline();
        let doc = assemble_document(&song, &track, &timeline, TuningOffset::default(), &settings);

        assert_eq!(doc.version, 8);
        assert_eq!(doc.arrangement, "Lead");
        assert_eq!(doc.offset, DEFAULT_OFFSET);
        assert_eq!(doc.song_length, 11.0);
        assert_eq!(doc.start_beat, 10.0);
        assert_eq!(doc.average_tempo, 160.0);
        assert_eq!(doc.capo, 2);
        assert_eq!(doc.song_name_sort, "Trooper");
        assert_eq!(doc.artist_name_sort, "Iron maiden");
        assert_eq!(doc.internal_name, "IronMaidenTheTrooper");
        assert_eq!(doc.album_art, doc.internal_name);
        assert_eq!(doc.album_year, "1983");
        assert_eq!(doc.tone_a, "Clean");
        assert_eq!(doc.tone_b, "");
        assert_eq!(doc.tones.len(), 1);
        assert_eq!(doc.ebeats.len(), 3);
        assert_eq!(doc.ebeats.items()[1].measure, -1);
        assert_eq!(doc.sections.items()[0].start_time, 10.0);
        assert_eq!(doc.phrases.len(), 1);
        assert_eq!(doc.chord_templates.len(), 1);
        assert!(doc.events.is_empty());

        let properties = &doc.arrangement_properties;
        assert_eq!(properties.standard_tuning, 1);
        assert_eq!(properties.palm_mutes, 1);
        assert_eq!(properties.bends, 1);
        assert_eq!(properties.double_stops, 1);
        assert_eq!(properties.harmonics, 0);

        let level = &doc.levels.items()[0];
        assert_eq!(level.difficulty, 0);
        assert_eq!(level.notes.len(), 2);
        assert_eq!(level.chords.len(), 1);
        assert!(level.fret_hand_mutes.is_empty());
        assert_eq!(level.anchors.items()[0].time, 10.0);
        assert_eq!(doc.transcription_track.difficulty, -1);
    }

    #[test]
    fn test_note_and_chord_nodes() {
        let timeline = sample_timeline();
        let plain = NoteNode::from(&timeline.notes[0]);
        assert_eq!(plain.palm_mute, 1);
        assert_eq!(plain.bend, 0);
        assert!(plain.bend_values.as_ref().is_some_and(Counted::is_empty));
        let bent = NoteNode::from(&timeline.notes[1]);
        assert_eq!(bent.bend, 1);
        assert_eq!(bent.bend_values.unwrap().items()[0].step, 1.0);

        let chord = ChordNode::from(&timeline.chords[0]);
        assert_eq!(chord.palm_mute, 1);
        assert_eq!(chord.accent, 0);
        assert_eq!(chord.chord_notes.len(), 2);
        assert!(chord.chord_notes.iter().all(|n| n.bend_values.is_none()));
        assert_eq!(chord.strum, "down");
    }

    #[test]
    fn test_tuning_node() {
        let offset = TuningOffset {
            strings: [0, 0, 0, 0, 0, -2],
        };
        let tuning = Tuning::from(offset);
        assert_eq!(tuning.string0, 0);
        assert_eq!(tuning.string5, -2);
    }
}
