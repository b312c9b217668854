use crate::AppError::ConfigError;
use clap::Parser;
use config::Config;
use std::io;
use std::path::{Path, PathBuf};
use tabsync::{
    build_interpolator, convert_track, output_file_name, parse_sync_file, parse_tab_file,
    write_document, ConversionSettings, ConversionTables, OutputFormat, TabSyncError,
};

mod config;

fn main() {
    let result = main_result();
    std::process::exit(match result {
        Ok(()) => 0,
        Err(err) => {
            // use Display instead of Debug for user friendly error messages
            log::error!("{err}");
            1
        }
    });
}

pub fn main_result() -> Result<(), AppError> {
    // setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("tabsync=info"))
        .init();

    // args
    let args = CliArgs::parse();
    let sync_file = PathBuf::from(&args.sync_file);
    if !sync_file.exists() {
        let err = ConfigError(format!("Sync file not found {sync_file:?}"));
        return Err(err);
    }

    // read local config, flags take precedence
    let local_config = Config::read_config()?;
    let format = args.format.unwrap_or_else(|| local_config.output_format());
    let settings = ConversionSettings {
        offset: args.offset.unwrap_or_else(|| local_config.offset()),
        base_tone: local_config.base_tone(),
        conversion_date: chrono::Local::now().format("%F %T").to_string(),
    };
    let sync_dir = sync_file
        .parent()
        .map_or_else(PathBuf::new, Path::to_path_buf);
    let output_dir = args
        .output_dir
        .map(PathBuf::from)
        .or_else(|| local_config.output_dir())
        .unwrap_or_else(|| sync_dir.clone());

    // inputs
    let sync = parse_sync_file(&sync_file)?;
    let score_path = sync_dir.join(&sync.score_url);
    if !score_path.exists() {
        let err = ConfigError(format!("Score file not found {score_path:?}"));
        return Err(err);
    }
    log::info!("Converting {score_path:?} synchronized by {sync_file:?}");
    let song = parse_tab_file(&score_path)?;
    let interpolator = build_interpolator(&sync.points()?)?;
    let tables = ConversionTables::default();

    let track_indexes: Vec<usize> = match args.track {
        Some(track) => vec![track],
        None => (0..song.tracks.len()).collect(),
    };
    let mut failures = 0;
    for track_index in track_indexes {
        let written = convert_track(&song, track_index, &interpolator, &tables, &settings)
            .and_then(|document| {
                let content = write_document(&document, format)?;
                let path = output_dir.join(output_file_name(&document, track_index, format));
                std::fs::write(&path, content)?;
                Ok(path)
            });
        match written {
            Ok(path) => log::info!("track {track_index} written to {path:?}"),
            Err(err) => {
                log::error!("track {track_index} failed: {err}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        return Err(AppError::ConversionError(format!(
            "{failures} track(s) could not be converted"
        )));
    }
    Ok(())
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the GoPlayAlong sync file referencing the tablature.
    sync_file: String,
    /// Only convert the track at this index.
    #[arg(long)]
    track: Option<usize>,
    /// Output format, defaults to the local configuration.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
    /// Offset in seconds written in the documents.
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<f64>,
    /// Directory receiving the documents, defaults to the sync file folder.
    #[arg(long)]
    output_dir: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("parsing error: {0}")]
    ParsingError(String),
    #[error("conversion error: {0}")]
    ConversionError(String),
    #[error("other error: {0}")]
    OtherError(String),
}

impl From<TabSyncError> for AppError {
    fn from(error: TabSyncError) -> Self {
        match error {
            TabSyncError::ConfigurationError(s) => Self::ConfigError(s),
            TabSyncError::ParsingError(s) => Self::ParsingError(s),
            TabSyncError::MissingAnchorData(_) | TabSyncError::StructuralInconsistency(_) => {
                Self::ConversionError(error.to_string())
            }
            TabSyncError::SerializationError(s) | TabSyncError::IoError(s) => Self::OtherError(s),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::OtherError(error.to_string())
    }
}
