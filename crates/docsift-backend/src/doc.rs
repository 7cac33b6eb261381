//! Microsoft Word 97-2003 (.doc) backend.
//!
//! Legacy .doc files are OLE/CFB containers storing text in a mix of
//! CP-1252 and UTF-16LE runs. Full fidelity needs a WordDocument stream
//! parser; this backend settles for a best-effort sieve that recovers the
//! readable text runs, which is enough for downstream search and review.

use crate::traits::{BackendOptions, DocumentBackend};
use docsift_core::{DocsiftError, ExtractedContent, InputFormat};

/// CFB (Compound File Binary) / OLE2 magic signature.
///
/// All OLE-based Microsoft Office formats (DOC, XLS, PPT) start with these
/// 8 bytes.
const CFB_MAGIC_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Minimum run length the sieve keeps; shorter printable runs are almost
/// always container noise.
const MIN_RUN_CHARS: usize = 5;

/// Legacy Word document backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocBackend;

impl DocBackend {
    /// Create a new DOC backend instance
    #[inline]
    #[must_use = "creates a backend instance that should be used for parsing"]
    pub const fn new() -> Self {
        Self
    }

    fn verify_cfb_signature(data: &[u8]) -> Result<(), DocsiftError> {
        if data.len() < CFB_MAGIC_SIGNATURE.len() || data[..8] != CFB_MAGIC_SIGNATURE {
            return Err(DocsiftError::BackendError(
                "not an OLE/CFB container".to_string(),
            ));
        }
        Ok(())
    }

    fn is_printable(c: char) -> bool {
        !c.is_control() || c == '\t'
    }

    /// Recover readable single-byte (CP-1252-ish) text runs.
    fn sieve_single_byte(data: &[u8]) -> Vec<String> {
        let mut runs = Vec::new();
        let mut current = String::new();

        for &byte in data {
            let c = char::from(byte);
            if byte >= 0x20 && byte != 0x7F && Self::is_printable(c) {
                current.push(c);
            } else {
                if current.chars().count() >= MIN_RUN_CHARS {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
        if current.chars().count() >= MIN_RUN_CHARS {
            runs.push(current);
        }

        runs
    }

    /// Recover readable UTF-16LE text runs (low byte printable, high byte
    /// zero, which covers the Latin text Word stores two-byte).
    fn sieve_utf16le(data: &[u8]) -> Vec<String> {
        let mut runs = Vec::new();
        let mut current = String::new();

        for pair in data.chunks_exact(2) {
            let (low, high) = (pair[0], pair[1]);
            if high == 0 && low >= 0x20 && low != 0x7F {
                current.push(char::from(low));
            } else {
                if current.chars().count() >= MIN_RUN_CHARS {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
        if current.chars().count() >= MIN_RUN_CHARS {
            runs.push(current);
        }

        runs
    }

    /// Sieve the container and keep whichever decoding recovered more text.
    fn sieve_text(data: &[u8]) -> String {
        let single = Self::sieve_single_byte(data);
        let wide = Self::sieve_utf16le(data);

        let single_len: usize = single.iter().map(String::len).sum();
        let wide_len: usize = wide.iter().map(String::len).sum();

        let runs = if wide_len > single_len { wide } else { single };
        runs.join("\n")
    }
}

impl DocumentBackend for DocBackend {
    fn format(&self) -> InputFormat {
        InputFormat::Doc
    }

    fn extract(
        &self,
        data: &[u8],
        _options: &BackendOptions,
    ) -> Result<ExtractedContent, DocsiftError> {
        Self::verify_cfb_signature(data)?;
        Ok(ExtractedContent::Text(Self::sieve_text(data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfb_prefixed(body: &[u8]) -> Vec<u8> {
        let mut data = CFB_MAGIC_SIGNATURE.to_vec();
        data.extend_from_slice(body);
        data
    }

    #[test]
    fn test_signature_is_required() {
        let result = DocBackend::new().extract(b"no signature here", &BackendOptions::default());
        assert!(matches!(result, Err(DocsiftError::BackendError(_))));
    }

    #[test]
    fn test_short_payload_is_rejected() {
        let result = DocBackend::new().extract(&[0xD0, 0xCF], &BackendOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_single_byte_runs_are_recovered() {
        let mut body = vec![0u8, 1, 2];
        body.extend_from_slice(b"Hello legacy world");
        body.extend_from_slice(&[0, 0, 3]);
        body.extend_from_slice(b"ab"); // below the run threshold, dropped

        let content = DocBackend::new()
            .extract(&cfb_prefixed(&body), &BackendOptions::default())
            .unwrap();
        let ExtractedContent::Text(text) = content else {
            panic!("expected text");
        };
        assert!(text.contains("Hello legacy world"));
        assert!(!text.contains("ab\n"));
    }

    #[test]
    fn test_utf16_runs_win_when_longer() {
        // "wide text here!!" encoded UTF-16LE
        let mut body = Vec::new();
        for b in b"wide text here!!" {
            body.push(*b);
            body.push(0);
        }

        let text = DocBackend::sieve_text(&body);
        assert!(text.contains("wide text here!!"));
    }
}
