//! Integration tests for tabsync library usage.
//!
//! These tests convert the demo song in `test-files` through the public API,
//! the same way the command line does.

use std::path::Path;
use tabsync::{
    build_interpolator, compile_track, convert_song, parse_sync_file, parse_tab_file,
    write_document, ConversionSettings, ConversionTables, Interpolator, OutputFormat,
    SongDocument, TabSong, TabSyncError,
};

fn load_demo() -> (TabSong, Interpolator) {
    let sync = parse_sync_file(Path::new("test-files/demo.xml")).expect("Failed to read sync file");
    assert_eq!(sync.score_url, "demo.json");
    let score_path = Path::new("test-files").join(&sync.score_url);
    let song = parse_tab_file(&score_path).expect("Failed to read tablature");
    let points = sync.points().expect("Failed to parse sync points");
    let interpolator = build_interpolator(&points).expect("Failed to build interpolator");
    (song, interpolator)
}

fn convert_demo() -> Vec<SongDocument> {
    let (song, interpolator) = load_demo();
    convert_song(
        &song,
        &interpolator,
        &ConversionTables::default(),
        &ConversionSettings::default(),
    )
    .into_iter()
    .collect::<Result<Vec<_>, TabSyncError>>()
    .expect("Failed to convert demo song")
}

/// Test that all major types are accessible from the library.
#[test]
fn test_types_accessible() {
    fn _assert_types() {
        let _: fn(&[u8]) -> Result<TabSong, TabSyncError> = tabsync::parse_tab_data;
        let _: [i32; 6] = tabsync::STANDARD_TUNING;
    }
}

#[test]
fn test_lead_timeline() {
    let (song, interpolator) = load_demo();
    let timeline = compile_track(&song, 0, &interpolator, &ConversionTables::default())
        .expect("Failed to compile lead track");

    assert_eq!(timeline.notes.len(), 14);
    assert_eq!(timeline.chords.len(), 3);
    // 6 bars in 4/4 once the verse is repeated, then 2 bars in 3/4
    assert_eq!(timeline.beat_markers.len(), 30);

    let sections: Vec<(&str, f64)> = timeline
        .sections
        .iter()
        .map(|s| (s.name.as_str(), s.time))
        .collect();
    assert_eq!(
        sections,
        vec![("Intro", 0.0), ("Verse", 4.0), ("Verse", 8.0), ("Outro", 12.0)]
    );

    let tone_ids: Vec<u32> = timeline.tone_changes.iter().map(|t| t.tone_id).collect();
    assert_eq!(tone_ids, vec![1, 2, 1, 2, 1]);

    let chord_times: Vec<f64> = timeline.chords.iter().map(|c| c.time).collect();
    assert_eq!(chord_times, vec![2.0, 3.0, 14.0]);
    assert!(timeline.chords[0].palm_mute);
    assert!(timeline.chords[1].accent);
    assert!(!timeline.chords[1].palm_mute);

    let dead_note = timeline.notes.last().unwrap();
    assert!(dead_note.mute);
    assert_eq!(dead_note.time, 15.333);
}

#[test]
fn test_convert_demo_song() {
    let documents = convert_demo();
    assert_eq!(documents.len(), 2);

    let lead = &documents[0];
    assert_eq!(lead.title, "The Demo Song");
    assert_eq!(lead.song_name_sort, "Demo song");
    assert_eq!(lead.album_name_sort, "Test album");
    assert_eq!(lead.internal_name, "TabsyncTheDemoSong");
    assert_eq!(lead.song_length, 15.333);
    assert_eq!(lead.tuning.string0, 0);
    assert_eq!(lead.tone_a, "Clean");
    assert_eq!(lead.tone_b, "Dist");
    assert_eq!(lead.arrangement_properties.standard_tuning, 1);
    assert_eq!(lead.arrangement_properties.pinch_harmonics, 1);

    let rhythm = &documents[1];
    assert_eq!(rhythm.capo, 2);
    assert_eq!(rhythm.tuning.string5, -2);
    assert_eq!(rhythm.arrangement_properties.standard_tuning, 0);
    let level = &rhythm.levels.items()[0];
    assert_eq!(level.chords.len(), 3);
    assert_eq!(level.notes.len(), 1);
}

#[test]
fn test_write_demo_documents() {
    for document in convert_demo() {
        let xml = write_document(&document, OutputFormat::Xml).expect("Failed to write XML");
        assert!(xml.contains("<ebeats count=\"30\">"));
        let json = write_document(&document, OutputFormat::Json).expect("Failed to write JSON");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "The Demo Song");
    }
}

#[test]
fn test_missing_sync_data() {
    let sync = tabsync::parse_sync_document("<track><scoreUrl>demo.json</scoreUrl><sync/></track>")
        .expect("Failed to parse sync document");
    let err = sync.points().unwrap_err();
    assert!(matches!(err, TabSyncError::MissingAnchorData(_)));
}
