use crate::parser::tab_parser::{Bar, BarSettings, TimeSignature};
use crate::timeline::builder::TimelineBuilder;
use crate::timeline::tables::ConversionTables;
use crate::TabSyncError;
use std::collections::BTreeSet;

/// Walks bars in performance order, expanding repeats, and feeds every beat to the builder.
pub struct BarWalker<'a> {
    tables: &'a ConversionTables,
    bars: &'a [Bar],
    settings: &'a [BarSettings],
    bar_index: usize,
    /// Performed bars so far, the integer part of every musical position
    measure: f64,
    /// Bar length in quarter notes
    signature: f64,
    repeat_start: Option<usize>,
    countdown: Option<u8>,
    exhausted_repeats: BTreeSet<usize>,
}

impl<'a> BarWalker<'a> {
    pub fn new(
        tables: &'a ConversionTables,
        bars: &'a [Bar],
        settings: &'a [BarSettings],
    ) -> Result<Self, TabSyncError> {
        if bars.len() != settings.len() {
            return Err(TabSyncError::StructuralInconsistency(format!(
                "track has {} bars but the song declares {} bar settings",
                bars.len(),
                settings.len()
            )));
        }
        let signature = TimeSignature::default().quarter_units()?;
        Ok(Self {
            tables,
            bars,
            settings,
            bar_index: 0,
            measure: 0.0,
            signature,
            repeat_start: None,
            countdown: None,
            exhausted_repeats: BTreeSet::new(),
        })
    }

    /// Returns the bar indexes in the order they were played.
    pub fn walk(mut self, builder: &mut TimelineBuilder) -> Result<Vec<usize>, TabSyncError> {
        let mut visited = Vec::new();
        while self.bar_index < self.bars.len() {
            let bar_index = self.bar_index;
            visited.push(bar_index);
            let bar = &self.bars[bar_index];
            let settings = &self.settings[bar_index];
            self.enter_bar(settings, builder)?;
            self.add_beats(bar, builder)?;
            self.leave_bar(settings);
        }
        log::debug!(
            "walked {} bars for {} declared bars",
            visited.len(),
            self.bars.len()
        );
        Ok(visited)
    }

    fn enter_bar(
        &mut self,
        settings: &BarSettings,
        builder: &mut TimelineBuilder,
    ) -> Result<(), TabSyncError> {
        if let Some(time_signature) = &settings.time_signature {
            self.signature = time_signature.quarter_units()?;
        }
        if settings.repeat_open {
            self.repeat_start = Some(self.bar_index);
        }
        if let Some(marker) = &settings.marker {
            builder.add_section(marker, self.measure);
        }
        builder.add_beat_markers(self.measure, self.signature);
        Ok(())
    }

    fn add_beats(&self, bar: &Bar, builder: &mut TimelineBuilder) -> Result<(), TabSyncError> {
        let mut offset = 0.0;
        for beat in &bar.beats {
            let fraction = self.tables.fraction_of_bar(beat.duration, self.signature)?;
            let time = builder.time_at(self.measure + offset);
            builder.add_beat(beat, time)?;
            offset += fraction;
        }
        Ok(())
    }

    fn leave_bar(&mut self, settings: &BarSettings) {
        self.measure += 1.0;
        let repeat_count = match settings.repeat_close {
            Some(count) if !self.exhausted_repeats.contains(&self.bar_index) => count,
            _ => {
                self.bar_index += 1;
                return;
            }
        };
        let Some(start) = self.repeat_start else {
            log::warn!(
                "repeat end without repeat start at bar {}, ignoring",
                self.bar_index + 1
            );
            self.bar_index += 1;
            return;
        };
        let remaining = self.countdown.get_or_insert(repeat_count);
        if *remaining > 0 {
            *remaining -= 1;
            log::debug!(
                "repeating bars {}..={} ({} left)",
                start + 1,
                self.bar_index + 1,
                remaining
            );
            self.bar_index = start;
        } else {
            self.countdown = None;
            self.repeat_start = None;
            self.exhausted_repeats.insert(self.bar_index);
            self.bar_index += 1;
        }
    }
}
