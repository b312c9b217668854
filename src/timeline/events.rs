/// Beat marker measure value for beats that do not start a bar.
pub const NOT_A_MEASURE: i32 = -1;

#[derive(Debug, Clone, PartialEq)]
pub struct BendValue {
    /// Absolute time in seconds
    pub time: f64,
    /// Pitch alteration in semitones
    pub step: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoteEvent {
    pub time: f64,
    /// Physical string, 0 being the lowest pitched string
    pub string: u8,
    pub fret: u8,
    pub accent: bool,
    pub mute: bool,
    pub palm_mute: bool,
    pub tremolo: bool,
    pub harmonic: bool,
    pub harmonic_pinch: bool,
    pub hopo: bool,
    pub ignore: bool,
    pub bend_values: Vec<BendValue>,
}

impl NoteEvent {
    pub fn has_bend(&self) -> bool {
        !self.bend_values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChordEvent {
    pub time: f64,
    pub notes: Vec<NoteEvent>,
    pub accent: bool,
    pub ignore: bool,
    pub palm_mute: bool,
    pub hopo: bool,
}

impl ChordEvent {
    /// Bends are dropped from the chord notes, flags are aggregated over all of them.
    pub fn from_notes(time: f64, mut notes: Vec<NoteEvent>) -> Self {
        for note in &mut notes {
            note.bend_values.clear();
        }
        let accent = notes.iter().any(|n| n.accent);
        let ignore = notes.iter().any(|n| n.ignore);
        let palm_mute = !notes.is_empty() && notes.iter().all(|n| n.palm_mute);
        let hopo = notes.iter().any(|n| n.hopo);
        Self {
            time,
            notes,
            accent,
            ignore,
            palm_mute,
            hopo,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToneChangeEvent {
    pub time: f64,
    pub tone_id: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionEvent {
    pub name: String,
    /// Starts at 1
    pub number: u32,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeatMarkerEvent {
    pub time: f64,
    /// Measure number, or `NOT_A_MEASURE` within a bar
    pub measure: i32,
}

impl BeatMarkerEvent {
    pub const fn new_measure(time: f64, measure: i32) -> Self {
        Self { time, measure }
    }

    pub const fn new_beat(time: f64) -> Self {
        Self {
            time,
            measure: NOT_A_MEASURE,
        }
    }

    pub const fn is_measure(&self) -> bool {
        self.measure != NOT_A_MEASURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(string: u8, accent: bool, palm_mute: bool) -> NoteEvent {
        NoteEvent {
            time: 1.0,
            string,
            fret: 5,
            accent,
            mute: false,
            palm_mute,
            tremolo: false,
            harmonic: false,
            harmonic_pinch: false,
            hopo: false,
            ignore: false,
            bend_values: vec![BendValue {
                time: 1.1,
                step: 1.0,
            }],
        }
    }

    #[test]
    fn test_chord_accent_is_any() {
        let chord = ChordEvent::from_notes(
            1.0,
            vec![note(0, true, false), note(1, false, false), note(2, false, false)],
        );
        assert!(chord.accent);
        let chord = ChordEvent::from_notes(1.0, vec![note(0, false, false), note(1, false, false)]);
        assert!(!chord.accent);
    }

    #[test]
    fn test_chord_palm_mute_is_all() {
        let chord = ChordEvent::from_notes(
            1.0,
            vec![note(0, false, true), note(1, false, true), note(2, false, true)],
        );
        assert!(chord.palm_mute);
        let chord = ChordEvent::from_notes(
            1.0,
            vec![note(0, false, true), note(1, false, false), note(2, false, true)],
        );
        assert!(!chord.palm_mute);
    }

    #[test]
    fn test_chord_strips_bends() {
        let chord = ChordEvent::from_notes(2.0, vec![note(0, false, false), note(3, false, false)]);
        assert_eq!(chord.notes.len(), 2);
        assert!(chord.notes.iter().all(|n| !n.has_bend()));
        assert!(!chord.hopo);
        assert!(!chord.ignore);
    }

    #[test]
    fn test_beat_marker_kinds() {
        assert!(BeatMarkerEvent::new_measure(0.0, 1).is_measure());
        assert!(!BeatMarkerEvent::new_beat(0.5).is_measure());
    }
}
