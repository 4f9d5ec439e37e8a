//! Transport decoding of file payloads.

use super::DecodeError;
use crate::github::FileContent;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decodes a fetched file into text.
///
/// GitHub wraps base64 payloads at 60 columns, so ASCII whitespace is
/// stripped before decoding. A payload without an encoding is already text.
///
/// # Errors
///
/// Returns [`DecodeError`] for unknown encodings, bad base64 or non-UTF-8 content.
pub fn decode_content(file: &FileContent) -> Result<String, DecodeError> {
    match file.encoding.as_deref() {
        Some("base64") => decode_base64(&file.payload),
        None | Some("") | Some("utf-8") => Ok(file.payload.clone()),
        Some(other) => Err(DecodeError::UnsupportedEncoding {
            encoding: other.to_string(),
        }),
    }
}

fn decode_base64(payload: &str) -> Result<String, DecodeError> {
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = STANDARD.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(encoding: Option<&str>, payload: &str) -> FileContent {
        FileContent {
            path: ".github/workflows/deploy.yml".to_string(),
            sha: "abc123".to_string(),
            encoding: encoding.map(str::to_string),
            payload: payload.to_string(),
        }
    }

    #[test]
    fn decodes_wrapped_base64() {
        let encoded = STANDARD.encode("uses: actions/checkout@v4\nwith:\n  fetch-depth: 0\n");
        let (head, tail) = encoded.split_at(12);
        let wrapped = format!("{head}\n{tail}\n");

        let text = decode_content(&file(Some("base64"), &wrapped)).unwrap();
        assert_eq!(text, "uses: actions/checkout@v4\nwith:\n  fetch-depth: 0\n");
    }

    #[test]
    fn passes_plain_text_through() {
        let text = decode_content(&file(None, "name: ci\n")).unwrap();
        assert_eq!(text, "name: ci\n");
    }

    #[test]
    fn rejects_unknown_encoding() {
        let result = decode_content(&file(Some("none"), ""));
        assert!(matches!(
            result,
            Err(DecodeError::UnsupportedEncoding { encoding }) if encoding == "none"
        ));
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = decode_content(&file(Some("base64"), "not*base64!"));
        assert!(matches!(result, Err(DecodeError::Base64(_))));
    }

    #[test]
    fn rejects_binary_content() {
        let encoded = STANDARD.encode([0xff, 0xfe, 0x00, 0x80]);
        let result = decode_content(&file(Some("base64"), &encoded));
        assert!(matches!(result, Err(DecodeError::Utf8(_))));
    }
}
