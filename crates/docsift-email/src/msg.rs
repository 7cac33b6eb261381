//! Outlook MSG (OLE/CFB) message parser.
//!
//! MSG files store MAPI properties in a Compound File Binary container.
//! Parsing is delegated to the `msg_parser` crate; this module reshapes its
//! output into one message struct with decoded attachment payloads.

use crate::error::{EmailError, Result};
use base64::Engine;
use msg_parser::Outlook;
use std::path::Path;

/// Parsed Outlook message.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ParsedMsg {
    /// Subject line
    pub subject: String,
    /// Sender, formatted as `Name <address>` when both are present
    pub sender: String,
    /// To recipients
    pub to: Vec<String>,
    /// Cc recipients
    pub cc: Vec<String>,
    /// Date header from the transport headers, when present
    pub date: Option<String>,
    /// Plain-text body
    pub body: String,
    /// Attachments with decoded payloads
    pub attachments: Vec<MsgAttachment>,
}

/// An MSG attachment with its payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MsgAttachment {
    /// Attachment filename (long name preferred over display name)
    pub filename: String,
    /// MIME type, when the container records one
    pub content_type: Option<String>,
    /// Decoded payload bytes; empty when the payload could not be decoded
    pub data: Vec<u8>,
}

/// Parse an MSG file from a file path.
///
/// # Errors
///
/// Returns an error if the file is not a valid OLE/CFB message.
#[must_use = "this function returns a parsed message that should be processed"]
pub fn parse_msg_from_path<P: AsRef<Path>>(path: P) -> Result<ParsedMsg> {
    let outlook = Outlook::from_path(path.as_ref())
        .map_err(|e| EmailError::MsgError(format!("failed to parse MSG file: {e}")))?;

    Ok(outlook_to_parsed_msg(outlook))
}

/// Parse an MSG file from raw bytes.
///
/// `msg_parser` only reads from paths, so the bytes take a round trip
/// through a temporary file.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or parsing
/// fails.
#[must_use = "this function returns a parsed message that should be processed"]
pub fn parse_msg(bytes: &[u8]) -> Result<ParsedMsg> {
    use std::io::Write;

    let mut temp_file = tempfile::NamedTempFile::new()?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;

    parse_msg_from_path(temp_file.path())
}

/// Reshape `msg_parser::Outlook` into [`ParsedMsg`]
fn outlook_to_parsed_msg(outlook: Outlook) -> ParsedMsg {
    let sender = format_person(&outlook.sender.name, &outlook.sender.email);

    let to = outlook
        .to
        .iter()
        .map(|person| format_person(&person.name, &person.email))
        .collect();

    let cc = outlook
        .cc
        .iter()
        .map(|person| format_person(&person.name, &person.email))
        .collect();

    let date = if outlook.headers.date.is_empty() {
        None
    } else {
        Some(outlook.headers.date)
    };

    let attachments = outlook
        .attachments
        .into_iter()
        .map(|att| {
            let filename = if att.file_name.is_empty() {
                att.display_name
            } else {
                att.file_name
            };
            let data = decode_payload(&att.payload).unwrap_or_else(|| {
                log::warn!("could not decode payload of MSG attachment {filename:?}");
                Vec::new()
            });

            MsgAttachment {
                filename,
                content_type: if att.mime_tag.is_empty() {
                    None
                } else {
                    Some(att.mime_tag)
                },
                data,
            }
        })
        .collect();

    ParsedMsg {
        subject: outlook.subject,
        sender,
        to,
        cc,
        date,
        body: outlook.body,
        attachments,
    }
}

/// Decode an attachment payload string.
///
/// `msg_parser` renders payload bytes as a hex string; some producers have
/// shipped base64 instead, so that is accepted as a fallback.
fn decode_payload(payload: &str) -> Option<Vec<u8>> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }

    if let Ok(bytes) = hex::decode(trimmed) {
        return Some(bytes);
    }

    base64::engine::general_purpose::STANDARD
        .decode(trimmed)
        .ok()
}

/// Format a name/address pair as `Name <address>`
fn format_person(name: &str, email: &str) -> String {
    match (name.is_empty(), email.is_empty()) {
        (false, false) => format!("{name} <{email}>"),
        (false, true) => name.to_string(),
        (true, _) => email.to_string(),
    }
}
