//! docsift-email - Email container walking for docsift
//!
//! This crate parses the two email container formats the ingestion surface
//! accepts and hands their attachment payloads to the converter:
//! - **EML** - Email message files (RFC 822/5322)
//! - **MSG** - Microsoft Outlook message format (OLE/CFB)
//!
//! ## Examples
//!
//! Parse an EML message:
//!
//! ```rust,no_run
//! use docsift_email::parse_eml;
//!
//! let eml_bytes = std::fs::read("message.eml")?;
//! let email = parse_eml(&eml_bytes)?;
//!
//! println!("From: {}", email.from);
//! println!("Subject: {}", email.subject);
//! for att in &email.attachments {
//!     println!("attachment: {:?} ({} bytes)", att.name, att.data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Parse an Outlook MSG file:
//!
//! ```rust,no_run
//! use docsift_email::parse_msg;
//!
//! let bytes = std::fs::read("message.msg")?;
//! let msg = parse_msg(&bytes)?;
//! println!("Subject: {}", msg.subject);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// EML (RFC 5322) email file parser
pub mod eml;
/// Error types for email parsing
pub mod error;
/// Microsoft Outlook MSG file parser
pub mod msg;

pub use eml::{parse_eml, EmailAttachment, EmailMessage};
pub use error::{EmailError, Result};
pub use msg::{parse_msg, parse_msg_from_path, MsgAttachment, ParsedMsg};
