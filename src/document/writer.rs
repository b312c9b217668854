use crate::document::SongDocument;
use crate::TabSyncError;
use serde::{Deserialize, Serialize};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Xml,
    Json,
}

impl OutputFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Xml => "xml",
            Self::Json => "json",
        }
    }
}

pub fn write_document(
    document: &SongDocument,
    format: OutputFormat,
) -> Result<String, TabSyncError> {
    match format {
        OutputFormat::Xml => write_xml(document),
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map_err(|err| TabSyncError::SerializationError(err.to_string())),
    }
}

fn write_xml(document: &SongDocument) -> Result<String, TabSyncError> {
    let mut body = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut body);
    serializer.indent(' ', 2);
    document
        .serialize(serializer)
        .map_err(|err| TabSyncError::SerializationError(err.to_string()))?;
    Ok(format!("{XML_DECLARATION}{body}\n"))
}

fn slug(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// `<internal name>_<arrangement>.<ext>`, lowercase ASCII only.
pub fn output_file_name(
    document: &SongDocument,
    track_index: usize,
    format: OutputFormat,
) -> String {
    let mut song = slug(&document.internal_name);
    if song.is_empty() {
        song = "song".to_string();
    }
    let mut arrangement = slug(&document.arrangement);
    if arrangement.is_empty() {
        arrangement = format!("track{track_index}");
    }
    format!("{song}_{arrangement}.{}", format.extension())
}
