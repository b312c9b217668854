use crate::parser::tab_parser::Duration;
use crate::TabSyncError;

/// MIDI pitches of E2 A2 D3 G3 B3 E4, lowest string first.
pub const STANDARD_TUNING: [i32; 6] = [40, 45, 50, 55, 59, 64];

/// Note value to power-of-two exponent, relative to the quarter note.
pub const DURATION_EXPONENTS: [(u16, i32); 7] = [
    (1, -2),
    (2, -1),
    (4, 0),
    (8, 1),
    (16, 2),
    (32, 3),
    (64, 4),
];

/// Immutable lookup data shared by a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTables {
    pub standard_tuning: [i32; 6],
    pub durations: Vec<(u16, i32)>,
}

impl Default for ConversionTables {
    fn default() -> Self {
        Self {
            standard_tuning: STANDARD_TUNING,
            durations: DURATION_EXPONENTS.to_vec(),
        }
    }
}

impl ConversionTables {
    pub fn exponent(&self, duration: Duration) -> Result<i32, TabSyncError> {
        self.durations
            .iter()
            .find(|(value, _)| *value == duration.value)
            .map(|(_, exponent)| *exponent)
            .ok_or_else(|| {
                TabSyncError::StructuralInconsistency(format!(
                    "unsupported duration class {}",
                    duration.value
                ))
            })
    }

    /// Share of a bar covered by `duration` when the bar lasts `signature` quarter notes.
    pub fn fraction_of_bar(&self, duration: Duration, signature: f64) -> Result<f64, TabSyncError> {
        let exponent = self.exponent(duration)?;
        Ok(2f64.powi(-exponent) / signature)
    }
}
