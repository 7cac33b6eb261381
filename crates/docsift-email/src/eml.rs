//! EML (RFC 5322) email parser.
//!
//! Parses email messages using the mail-parser crate and extracts headers,
//! a body text, and attachment payloads. Attachment bytes are kept in
//! memory so the converter can feed them straight into the per-format
//! backends; nothing is spooled to disk.

use crate::error::{EmailError, Result};
use mail_parser::{Message, MessageParser, MimeHeaders};
use scraper::Html;

/// Parsed email message.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailMessage {
    /// Subject header
    pub subject: String,
    /// From address
    pub from: String,
    /// To addresses
    pub to: Vec<String>,
    /// CC addresses
    pub cc: Vec<String>,
    /// Date header, verbatim when present
    pub date: Option<String>,
    /// Body text: the plain-text part, or the HTML part reduced to
    /// visible text when no plain part exists
    pub body: String,
    /// Attachments with payloads, in message order
    pub attachments: Vec<EmailAttachment>,
}

/// An email attachment with its payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailAttachment {
    /// Filename, when the message carries one
    pub name: Option<String>,
    /// Content-Type
    pub content_type: String,
    /// Decoded payload bytes
    pub data: Vec<u8>,
}

/// Parse an EML file from bytes.
///
/// # Errors
///
/// Returns an error if the content cannot be parsed as an email message.
#[must_use = "this function returns a parsed email that should be processed"]
pub fn parse_eml(content: &[u8]) -> Result<EmailMessage> {
    let parser = MessageParser::default();
    let message = parser
        .parse(content)
        .ok_or_else(|| EmailError::ParseError("not a parseable email message".to_string()))?;

    Ok(extract_message_data(&message))
}

/// Extract structured data from a parsed message
fn extract_message_data(message: &Message) -> EmailMessage {
    let subject = message.subject().unwrap_or("(No Subject)").to_string();

    let from = message
        .from()
        .and_then(|addrs| addrs.first())
        .map_or_else(|| "(Unknown)".to_string(), format_address);

    let to = message
        .to()
        .map(|addrs| addrs.iter().map(format_address).collect())
        .unwrap_or_default();

    let cc = message
        .cc()
        .map(|addrs| addrs.iter().map(format_address).collect())
        .unwrap_or_default();

    // Preserve the original header text; fall back to the parsed date.
    let date = message
        .header_raw("Date")
        .map(|raw| raw.trim().to_string())
        .or_else(|| message.date().map(mail_parser::DateTime::to_rfc3339));

    let body = extract_body(message);

    let attachments = message
        .attachments()
        .map(|att| EmailAttachment {
            name: att.attachment_name().map(std::string::ToString::to_string),
            content_type: att.content_type().map_or_else(
                || "application/octet-stream".to_string(),
                |ct| ct.ctype().to_string(),
            ),
            data: att.contents().to_vec(),
        })
        .collect();

    EmailMessage {
        subject,
        from,
        to,
        cc,
        date,
        body,
        attachments,
    }
}

/// Pick the message body: plain text preferred, HTML reduced to visible
/// text otherwise.
fn extract_body(message: &Message) -> String {
    if let Some(text) = message.body_text(0) {
        let text = text.trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }

    if let Some(html) = message.body_html(0) {
        let visible = html_to_text(&html);
        if !visible.is_empty() {
            return visible;
        }
    }

    String::new()
}

/// Reduce an HTML body to its visible text, one line per text node run.
/// Script, style and head content is dropped.
fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.tree.nodes() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| matches!(el.name(), "script" | "style" | "head"))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Format an address for display
#[inline]
fn format_address(addr: &mail_parser::Addr) -> String {
    match (addr.name(), addr.address()) {
        (Some(name), Some(address)) => format!("{name} <{address}>"),
        (Some(name), None) => name.to_string(),
        (None, address) => address.unwrap_or("").to_string(),
    }
}
