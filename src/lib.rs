//! Tabsync - synchronized tablature to timed arrangement compiler
//!
//! This library provides:
//! - Loading of tablature documents and GoPlayAlong sync files
//! - A time mapping from bar positions to seconds built from the sync points
//! - A bar walker expanding repeats into note, chord, beat and section events
//! - Assembly and serialization of Rocksmith-style arrangement documents
//!
//! # Example
//!
//! ```no_run
//! use tabsync::{
//!     build_interpolator, convert_track, parse_sync_file, parse_tab_file, write_document,
//!     ConversionSettings, ConversionTables, OutputFormat,
//! };
//! use std::path::Path;
//!
//! let sync = parse_sync_file(Path::new("song.xml")).unwrap();
//! let song = parse_tab_file(Path::new(&sync.score_url)).unwrap();
//! let interpolator = build_interpolator(&sync.points().unwrap()).unwrap();
//! let tables = ConversionTables::default();
//! let document =
//!     convert_track(&song, 0, &interpolator, &tables, &ConversionSettings::default()).unwrap();
//! let xml = write_document(&document, OutputFormat::Xml).unwrap();
//! ```

pub mod convert;
pub mod document;
pub mod error;
pub mod parser;
pub mod timeline;

// Re-export main types for convenience
pub use convert::{build_interpolator, compile_track, convert_song, convert_track};
pub use document::{
    assembler::{assemble_document, sortable_name, ConversionSettings},
    counted::Counted,
    writer::{output_file_name, write_document, OutputFormat},
    SongDocument,
};
pub use error::TabSyncError;
pub use parser::{
    sync_parser::{parse_sync_document, parse_sync_file, parse_sync_points, SyncDocument, SyncPoint},
    tab_parser::{
        parse_tab_data, parse_tab_file, Bar, BarSettings, Beat, Duration, Note, TabSong, TabTrack,
        TimeSignature,
    },
};
pub use timeline::{
    builder::{Timeline, TimelineBuilder},
    interpolator::{AnchorPoint, Interpolator},
    tables::{ConversionTables, STANDARD_TUNING},
    tuning::{tuning_offset, TuningOffset},
    walker::BarWalker,
};
