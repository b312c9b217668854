use crate::document::assembler::{assemble_document, ConversionSettings};
use crate::document::SongDocument;
use crate::parser::sync_parser::SyncPoint;
use crate::parser::tab_parser::{TabSong, TabTrack};
use crate::timeline::builder::{Timeline, TimelineBuilder};
use crate::timeline::interpolator::Interpolator;
use crate::timeline::tables::ConversionTables;
use crate::timeline::tuning::tuning_offset;
use crate::timeline::walker::BarWalker;
use crate::TabSyncError;

/// Time mapping of the whole song, shared read-only by every track.
pub fn build_interpolator(points: &[SyncPoint]) -> Result<Interpolator, TabSyncError> {
    if points.is_empty() {
        return Err(TabSyncError::MissingAnchorData(
            "no sync points available".to_string(),
        ));
    }
    Interpolator::build(points.iter().map(SyncPoint::anchor))
}

fn track_at(song: &TabSong, track_index: usize) -> Result<&TabTrack, TabSyncError> {
    song.tracks.get(track_index).ok_or_else(|| {
        TabSyncError::ConfigurationError(format!(
            "track {track_index} not found, the song has {} tracks",
            song.tracks.len()
        ))
    })
}

/// Walks one track and collects its events.
pub fn compile_track(
    song: &TabSong,
    track_index: usize,
    interpolator: &Interpolator,
    tables: &ConversionTables,
) -> Result<Timeline, TabSyncError> {
    let track = track_at(song, track_index)?;
    let mut builder = TimelineBuilder::new(interpolator, track.string_count());
    let walker = BarWalker::new(tables, &track.bars, &song.bar_settings)?;
    let visited = walker.walk(&mut builder)?;
    let timeline = builder.build();
    log::info!(
        "track {track_index} '{}': {} bars played, {} notes, {} chords, {} sections",
        track.name,
        visited.len(),
        timeline.notes.len(),
        timeline.chords.len(),
        timeline.sections.len()
    );
    Ok(timeline)
}

pub fn convert_track(
    song: &TabSong,
    track_index: usize,
    interpolator: &Interpolator,
    tables: &ConversionTables,
    settings: &ConversionSettings,
) -> Result<SongDocument, TabSyncError> {
    let track = track_at(song, track_index)?;
    let tuning = tuning_offset(&track.tuning, tables)?;
    let timeline = compile_track(song, track_index, interpolator, tables)?;
    Ok(assemble_document(song, track, &timeline, tuning, settings))
}

/// One result per track, a failing track does not stop the others.
pub fn convert_song(
    song: &TabSong,
    interpolator: &Interpolator,
    tables: &ConversionTables,
    settings: &ConversionSettings,
) -> Vec<Result<SongDocument, TabSyncError>> {
    (0..song.tracks.len())
        .map(|track_index| convert_track(song, track_index, interpolator, tables, settings))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::sync_parser::parse_sync_points;
    use crate::parser::tab_parser::parse_tab_data;

    const SONG: &str = r#"{
        "title": "Test",
        "artist": "Tester",
        "tempo": 120,
        "bar_settings": [
            {"marker": "intro", "repeat_open": true},
            {"repeat_close": 1},
            {}
        ],
        "tracks": [
            {
                "name": "Lead",
                "tuning": [40, 45, 50, 55, 59, 64],
                "bars": [
                    {"beats": [{"duration": 1, "notes": {"6": {"fret": 0}}}]},
                    {"beats": [{"duration": 1, "notes": {"6": {"fret": 3}, "5": {"fret": 5}}}]},
                    {"beats": [{"duration": 1}]}
                ]
            },
            {
                "name": "Seven",
                "tuning": [35, 40, 45, 50, 55, 59, 64],
                "bars": [{"beats": []}]
            }
        ]
    }"#;

    fn interpolator() -> Interpolator {
        let points = parse_sync_points("#0;0;0;0.5#2000;1;0;0.5").unwrap();
        build_interpolator(&points).unwrap()
    }

    #[test]
    fn test_compile_track() {
        let song = parse_tab_data(SONG.as_bytes()).unwrap();
        let tables = ConversionTables::default();
        let timeline = compile_track(&song, 0, &interpolator(), &tables).unwrap();
        // bars 1 2 1 2 3
        assert_eq!(timeline.beat_markers.len(), 20);
        assert_eq!(timeline.sections.len(), 2);
        let note_times: Vec<f64> = timeline.notes.iter().map(|n| n.time).collect();
        assert_eq!(note_times, vec![0.0, 4.0]);
        let chord_times: Vec<f64> = timeline.chords.iter().map(|c| c.time).collect();
        assert_eq!(chord_times, vec![2.0, 6.0]);
    }

    #[test]
    fn test_convert_song_isolates_failures() {
        let song = parse_tab_data(SONG.as_bytes()).unwrap();
        let results = convert_song(
            &song,
            &interpolator(),
            &ConversionTables::default(),
            &ConversionSettings::default(),
        );
        assert_eq!(results.len(), 2);
        let lead = results[0].as_ref().unwrap();
        assert_eq!(lead.arrangement, "Lead");
        assert_eq!(lead.song_length, 8.0 + 1.5);
        assert!(matches!(
            results[1],
            Err(TabSyncError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_tuning_is_checked_before_walking() {
        // the seven string track also has too few bars
        let song = parse_tab_data(SONG.as_bytes()).unwrap();
        let tables = ConversionTables::default();
        let err = compile_track(&song, 1, &interpolator(), &tables).unwrap_err();
        assert!(matches!(err, TabSyncError::StructuralInconsistency(_)));
        let err = convert_track(
            &song,
            1,
            &interpolator(),
            &tables,
            &ConversionSettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, TabSyncError::ConfigurationError(_)));
    }

    #[test]
    fn test_unknown_track() {
        let song = parse_tab_data(SONG.as_bytes()).unwrap();
        let err = compile_track(&song, 5, &interpolator(), &ConversionTables::default())
            .unwrap_err();
        assert!(matches!(err, TabSyncError::ConfigurationError(_)));
    }

    #[test]
    fn test_no_sync_points() {
        let err = build_interpolator(&[]).unwrap_err();
        assert!(matches!(err, TabSyncError::MissingAnchorData(_)));
    }
}
