//! Acceptance rules for uploaded text files.

use axum::body::Bytes;
use std::fmt;

const ACCEPTED_EXTENSION: &str = ".txt";

/// A file part received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(name: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name,
            bytes: bytes.into(),
        }
    }
}

/// Why an upload was turned away before any provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoFileProvided,
    UnsupportedType,
    BlankContent,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::NoFileProvided => "File is empty. Please select a .txt file to upload.",
            Rejection::UnsupportedType => "Invalid file type. Only .txt files are allowed.",
            Rejection::BlankContent => "File content is empty or whitespace only.",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(String),
    Rejected(Rejection),
}

/// Checks an upload in order: presence, extension, then content.
/// The first failing rule wins. Accepted text is returned untrimmed.
pub fn validate(file: Option<&UploadedFile>) -> ValidationOutcome {
    let file = match file {
        Some(file) if !file.bytes.is_empty() => file,
        _ => return ValidationOutcome::Rejected(Rejection::NoFileProvided),
    };

    if !file.name.as_deref().is_some_and(has_txt_extension) {
        return ValidationOutcome::Rejected(Rejection::UnsupportedType);
    }

    let text = String::from_utf8_lossy(&file.bytes).into_owned();
    if text.trim().is_empty() {
        return ValidationOutcome::Rejected(Rejection::BlankContent);
    }

    ValidationOutcome::Accepted(text)
}

fn has_txt_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(ACCEPTED_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content: &[u8]) -> UploadedFile {
        UploadedFile::new(Some(name.to_string()), content.to_vec())
    }

    #[test]
    fn missing_file_is_rejected() {
        assert_eq!(validate(None), ValidationOutcome::Rejected(Rejection::NoFileProvided));
    }

    #[test]
    fn zero_length_file_is_rejected_before_type_check() {
        for name in ["empty.txt", "image.png"] {
            assert_eq!(
                validate(Some(&file(name, b""))),
                ValidationOutcome::Rejected(Rejection::NoFileProvided)
            );
        }
    }

    #[test]
    fn non_txt_names_are_rejected_regardless_of_content() {
        for name in ["image.png", "notes.txt.bak", "txt", "report.md", "archive.tar"] {
            assert_eq!(
                validate(Some(&file(name, b"some readable text"))),
                ValidationOutcome::Rejected(Rejection::UnsupportedType),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn type_check_wins_over_blank_content() {
        assert_eq!(
            validate(Some(&file("image.png", b"   "))),
            ValidationOutcome::Rejected(Rejection::UnsupportedType)
        );
    }

    #[test]
    fn missing_name_is_unsupported() {
        let upload = UploadedFile::new(None, b"hello".to_vec());
        assert_eq!(
            validate(Some(&upload)),
            ValidationOutcome::Rejected(Rejection::UnsupportedType)
        );
    }

    #[test]
    fn extension_check_ignores_case() {
        assert_eq!(
            validate(Some(&file("NOTES.TXT", b"hello"))),
            ValidationOutcome::Accepted("hello".into())
        );
        assert_eq!(
            validate(Some(&file("Notes.Txt", b"hello"))),
            ValidationOutcome::Accepted("hello".into())
        );
    }

    #[test]
    fn whitespace_only_content_is_blank() {
        for content in ["   ", "\n\n", "\t \r\n "] {
            assert_eq!(
                validate(Some(&file("whitespace.txt", content.as_bytes()))),
                ValidationOutcome::Rejected(Rejection::BlankContent)
            );
        }
    }

    #[test]
    fn accepted_text_keeps_surrounding_whitespace() {
        assert_eq!(
            validate(Some(&file("test.txt", b"  padded text \n"))),
            ValidationOutcome::Accepted("  padded text \n".into())
        );
    }

    #[test]
    fn malformed_utf8_is_decoded_lossily() {
        let outcome = validate(Some(&file("bytes.txt", b"caf\xff ok")));
        assert_eq!(outcome, ValidationOutcome::Accepted("caf\u{FFFD} ok".into()));
    }

    #[test]
    fn rejection_messages_are_fixed() {
        assert_eq!(
            Rejection::NoFileProvided.to_string(),
            "File is empty. Please select a .txt file to upload."
        );
        assert_eq!(
            Rejection::BlankContent.to_string(),
            "File content is empty or whitespace only."
        );
    }
}
