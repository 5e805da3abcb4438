//! Record metadata resolution from the archive files list
//!
//! An item's `<identifier>_files.xml` lists every stored file. The record
//! audio is the first derivative MP3; the record photo follows the fixed
//! `<identifier>_itemimage.jpg` naming convention.

use crate::error::{Result, ShellacError};
use crate::types::RecordInfo;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

const DOWNLOAD_BASE: &str = "https://archive.org/download";

/// Characters percent-encoded in file-name URL segments
const FILE_NAME_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Item photo URL: `<base>/<id>/<id>_itemimage.jpg`
pub fn image_url(identifier: &str) -> String {
    format!("{DOWNLOAD_BASE}/{identifier}/{identifier}_itemimage.jpg")
}

/// Files-list URL: `<base>/<id>/<id>_files.xml`
pub fn files_xml_url(identifier: &str) -> String {
    format!("{DOWNLOAD_BASE}/{identifier}/{identifier}_files.xml")
}

fn mp3_url(identifier: &str, file_name: &str) -> String {
    let encoded = utf8_percent_encode(file_name, FILE_NAME_ENCODE_SET);
    format!("{DOWNLOAD_BASE}/{identifier}/{encoded}")
}

/// Resolve a `RecordInfo` from the raw `_files.xml` document.
///
/// Picks the first `<file source="derivative">` whose name ends in `.mp3`
/// (case-insensitive); the record title is that file name without its
/// extension.
pub fn resolve_record(identifier: &str, files_xml: &str) -> Result<RecordInfo> {
    let mp3_name = find_derivative_mp3(files_xml)?.ok_or_else(|| ShellacError::MetadataParse {
        reason: format!("no derivative MP3 file listed for '{identifier}'"),
    })?;

    let title = mp3_name
        .strip_suffix(".mp3")
        .or_else(|| mp3_name.strip_suffix(".MP3"))
        .unwrap_or(&mp3_name)
        .to_string();

    debug!(identifier, mp3 = %mp3_name, "resolved record metadata");

    Ok(RecordInfo {
        identifier: identifier.to_string(),
        title,
        image_url: image_url(identifier),
        mp3_url: mp3_url(identifier, &mp3_name),
    })
}

/// Scan the files list for the first derivative MP3 entry.
fn find_derivative_mp3(files_xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(files_xml);
    reader.config_mut().trim_text(true);

    loop {
        let event = reader.read_event().map_err(|e| ShellacError::MetadataParse {
            reason: format!("malformed files XML: {e}"),
        })?;
        let element = match &event {
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"file" => e,
            Event::Eof => return Ok(None),
            _ => continue,
        };

        let mut source = None;
        let mut name = None;
        for attr in element.attributes() {
            let attr = attr.map_err(|e| ShellacError::MetadataParse {
                reason: format!("malformed file attribute: {e}"),
            })?;
            let value = attr
                .unescape_value()
                .map_err(|e| ShellacError::MetadataParse {
                    reason: format!("malformed attribute value: {e}"),
                })?
                .into_owned();
            match attr.key.as_ref() {
                b"source" => source = Some(value),
                b"name" => name = Some(value),
                _ => {}
            }
        }

        if source.as_deref() == Some("derivative") {
            if let Some(name) = name {
                if name.to_lowercase().ends_with(".mp3") {
                    return Ok(Some(name));
                }
            }
        }
    }
}
