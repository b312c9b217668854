use crate::timeline::tables::ConversionTables;
use crate::TabSyncError;

pub const STRING_COUNT: usize = 6;

/// Semitone offsets from standard tuning, index 0 being the highest pitched string.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TuningOffset {
    pub strings: [i32; STRING_COUNT],
}

impl TuningOffset {
    pub fn is_standard(&self) -> bool {
        self.strings.iter().all(|offset| *offset == 0)
    }
}

/// `actual` lists the open string pitches lowest string first.
pub fn tuning_offset(actual: &[i32], tables: &ConversionTables) -> Result<TuningOffset, TabSyncError> {
    if actual.len() != STRING_COUNT {
        return Err(TabSyncError::ConfigurationError(format!(
            "expected a {STRING_COUNT} string tuning, got {} strings",
            actual.len()
        )));
    }
    let mut strings = [0; STRING_COUNT];
    let deltas = actual
        .iter()
        .zip(tables.standard_tuning)
        .map(|(pitch, standard)| pitch - standard)
        .rev();
    for (slot, delta) in strings.iter_mut().zip(deltas) {
        *slot = delta;
    }
    Ok(TuningOffset { strings })
}
