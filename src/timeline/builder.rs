use crate::parser::tab_parser::{Beat, HarmonicType, Note, NoteType};
use crate::timeline::events::{
    BeatMarkerEvent, BendValue, ChordEvent, NoteEvent, SectionEvent, ToneChangeEvent,
};
use crate::timeline::interpolator::{round_millis, Interpolator};
use crate::TabSyncError;
use std::collections::HashMap;

/// Tone id of the base tone, never emitted as a change.
pub const BASE_TONE_ID: u32 = 0;

/// Events accumulated while walking a track.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Timeline {
    pub notes: Vec<NoteEvent>,
    pub chords: Vec<ChordEvent>,
    pub beat_markers: Vec<BeatMarkerEvent>,
    pub sections: Vec<SectionEvent>,
    pub tone_changes: Vec<ToneChangeEvent>,
    /// Tone labels in id order, the label at index 0 has id 1
    pub tones: Vec<String>,
}

impl Timeline {
    pub fn start_time(&self) -> f64 {
        self.beat_markers.first().map_or(0.0, |b| b.time)
    }

    pub fn end_time(&self) -> f64 {
        self.beat_markers.last().map_or(0.0, |b| b.time)
    }
}

pub struct TimelineBuilder<'a> {
    interpolator: &'a Interpolator,
    string_count: usize,
    timeline: Timeline,
    tone_ids: HashMap<String, u32>,
    active_tone: u32,
}

impl<'a> TimelineBuilder<'a> {
    pub fn new(interpolator: &'a Interpolator, string_count: usize) -> Self {
        Self {
            interpolator,
            string_count,
            timeline: Timeline::default(),
            tone_ids: HashMap::new(),
            active_tone: BASE_TONE_ID,
        }
    }

    /// Absolute time of a musical position
    pub fn time_at(&self, position: f64) -> f64 {
        self.interpolator.query(position)
    }

    /// Bar start marker followed by one marker per beat of the bar.
    pub fn add_beat_markers(&mut self, measure: f64, signature: f64) {
        let start = self.time_at(measure);
        let measure_number = measure as i32 + 1;
        self.timeline
            .beat_markers
            .push(BeatMarkerEvent::new_measure(start, measure_number));
        let beat_count = signature.floor() as usize;
        for i in 1..beat_count {
            let time = self.time_at(measure + i as f64 / signature);
            self.timeline.beat_markers.push(BeatMarkerEvent::new_beat(time));
        }
    }

    pub fn add_section(&mut self, name: &str, measure: f64) {
        let number = self.timeline.sections.len() as u32 + 1;
        let time = self.time_at(measure);
        log::debug!("section '{name}' #{number} at {time}");
        self.timeline.sections.push(SectionEvent {
            name: name.to_string(),
            number,
            time,
        });
    }

    pub fn add_beat(&mut self, beat: &Beat, time: f64) -> Result<(), TabSyncError> {
        if let Some(label) = &beat.tone {
            self.add_tone_change(label, time);
        }
        if beat.is_rest() {
            return Ok(());
        }

        let mut notes = Vec::with_capacity(beat.notes.len());
        for (tab_string, note) in &beat.notes {
            let string = self.physical_string(*tab_string)?;
            notes.push(note_event(time, string, note));
        }

        if notes.len() == 1 {
            self.timeline.notes.append(&mut notes);
        } else {
            self.timeline.chords.push(ChordEvent::from_notes(time, notes));
        }
        Ok(())
    }

    fn add_tone_change(&mut self, label: &str, time: f64) {
        let tone_id = match self.tone_ids.get(label) {
            Some(id) => *id,
            None => {
                self.timeline.tones.push(label.to_string());
                let id = self.timeline.tones.len() as u32;
                self.tone_ids.insert(label.to_string(), id);
                id
            }
        };
        if tone_id != self.active_tone {
            log::debug!("tone change to '{label}' ({tone_id}) at {time}");
            self.active_tone = tone_id;
            self.timeline
                .tone_changes
                .push(ToneChangeEvent { time, tone_id });
        }
    }

    /// Tablature strings count from 1 (highest pitched) while physical strings count from 0 (lowest).
    fn physical_string(&self, tab_string: u8) -> Result<u8, TabSyncError> {
        let tab_string = usize::from(tab_string);
        if tab_string == 0 || tab_string > self.string_count {
            return Err(TabSyncError::StructuralInconsistency(format!(
                "string {tab_string} out of range for a {} string track",
                self.string_count
            )));
        }
        Ok((self.string_count - tab_string) as u8)
    }

    pub fn build(self) -> Timeline {
        self.timeline
    }
}

fn note_event(time: f64, string: u8, note: &Note) -> NoteEvent {
    let bend_values = note
        .bend
        .as_ref()
        .map(|bend| {
            bend.points
                .iter()
                .map(|point| BendValue {
                    time: round_millis(time + point.time_ms / 1000.0),
                    step: f64::from(point.alteration) / 100.0,
                })
                .collect()
        })
        .unwrap_or_default();
    NoteEvent {
        time,
        string,
        fret: note.fret,
        accent: note.accentuated,
        mute: note.kind == NoteType::Dead,
        palm_mute: note.palm_mute,
        tremolo: note.tremolo,
        harmonic: note.harmonic != HarmonicType::None,
        harmonic_pinch: note.harmonic == HarmonicType::Pinch,
        hopo: false,
        ignore: false,
        bend_values,
    }
}
