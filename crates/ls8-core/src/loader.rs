//! Program source loading.
//!
//! An LS-8 program is text with one byte per meaningful line, written as a
//! base-2 literal. Everything from the first `#` onward is a comment, and
//! lines that are empty after trimming are skipped:
//!
//! ```text
//! # print8.ls8
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! 01000111 # PRN R0
//! 00000000
//! 00000001 # HLT
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::memory::MEMORY_BYTES;

/// Errors raised while turning program text into a memory image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line held something other than `0`/`1` digits.
    #[error("line {line}: `{text}` is not a binary literal")]
    InvalidBinaryLiteral {
        /// 1-indexed source line.
        line: usize,
        /// Offending text after comment stripping.
        text: String,
    },
    /// A literal did not fit in a byte.
    #[error("line {line}: `{text}` does not fit in a byte")]
    ByteOutOfRange {
        /// 1-indexed source line.
        line: usize,
        /// Offending text after comment stripping.
        text: String,
    },
    /// The program has more bytes than memory.
    #[error("line {line}: program exceeds 256 bytes of memory")]
    ProgramTooLarge {
        /// 1-indexed source line of the first byte that did not fit.
        line: usize,
    },
}

/// Strips the comment and surrounding whitespace from one source line.
///
/// Returns `None` for lines with nothing left.
#[must_use]
pub fn strip_line(line: &str) -> Option<&str> {
    let code = line.split_once('#').map_or(line, |(code, _)| code).trim();
    if code.is_empty() {
        None
    } else {
        Some(code)
    }
}

fn parse_byte(line: usize, text: &str) -> Result<u8, LoadError> {
    if !text.bytes().all(|b| b == b'0' || b == b'1') {
        return Err(LoadError::InvalidBinaryLiteral {
            line,
            text: text.to_string(),
        });
    }

    let significant = text.trim_start_matches('0');
    if significant.len() > 8 {
        return Err(LoadError::ByteOutOfRange {
            line,
            text: text.to_string(),
        });
    }

    if significant.is_empty() {
        return Ok(0);
    }

    u8::from_str_radix(significant, 2).map_err(|_| LoadError::InvalidBinaryLiteral {
        line,
        text: text.to_string(),
    })
}

/// Parses program text into the bytes to place at address 0 onward.
///
/// # Errors
///
/// Returns [`LoadError`] for malformed literals or a program longer than
/// memory.
pub fn parse_program(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut image = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let Some(text) = strip_line(raw) else {
            continue;
        };

        if image.len() == MEMORY_BYTES {
            return Err(LoadError::ProgramTooLarge { line });
        }
        image.push(parse_byte(line, text)?);
    }

    Ok(image)
}

/// Reads and parses a program file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read, otherwise any
/// [`parse_program`] error.
pub fn load_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = parse_program(&source)?;
    debug!("loaded {} bytes from {}", image.len(), path.display());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::{parse_program, strip_line, LoadError};
    use crate::memory::MEMORY_BYTES;
    use rstest::rstest;

    #[rstest]
    #[case("10000010", Some("10000010"))]
    #[case("  10000010  ", Some("10000010"))]
    #[case("10000010 # LDI R0,8", Some("10000010"))]
    #[case("# whole line comment", None)]
    #[case("   ", None)]
    #[case("", None)]
    #[case("01#a#b", Some("01"))]
    fn strip_line_drops_comments_and_whitespace(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(strip_line(line), expected);
    }

    #[test]
    fn comments_and_blank_lines_do_not_change_image() {
        let annotated = "\
# print8.ls8

10000010 # LDI R0,8
00000000
00001000   # 8

01000111 # PRN R0
00000000
00000001 # HLT
";
        let bare = "10000010\n00000000\n00001000\n01000111\n00000000\n00000001\n";

        let annotated = parse_program(annotated).expect("valid program");
        assert_eq!(annotated, parse_program(bare).expect("valid program"));
        assert_eq!(annotated, vec![0x82, 0x00, 0x08, 0x47, 0x00, 0x01]);
    }

    #[test]
    fn leading_zeros_beyond_eight_digits_are_accepted() {
        assert_eq!(parse_program("000000000001").expect("valid"), vec![1]);
        assert_eq!(parse_program("0").expect("valid"), vec![0]);
    }

    #[test]
    fn windows_line_endings_are_trimmed() {
        assert_eq!(
            parse_program("10000010\r\n00000001\r\n").expect("valid"),
            vec![0x82, 0x01]
        );
    }

    #[rstest]
    #[case("0b1010")]
    #[case("10201")]
    #[case("-1")]
    #[case("1 0")]
    fn non_binary_text_is_rejected(#[case] text: &str) {
        let source = format!("00000001\n{text}\n");
        match parse_program(&source) {
            Err(LoadError::InvalidBinaryLiteral { line, text: found }) => {
                assert_eq!(line, 2);
                assert_eq!(found, text);
            }
            other => panic!("expected invalid literal, got {other:?}"),
        }
    }

    #[test]
    fn nine_significant_bits_do_not_fit() {
        assert!(matches!(
            parse_program("100000000"),
            Err(LoadError::ByteOutOfRange { line: 1, .. })
        ));
    }

    #[test]
    fn memory_can_be_filled_exactly() {
        let source = "00000000\n".repeat(MEMORY_BYTES);
        assert_eq!(parse_program(&source).expect("fits").len(), MEMORY_BYTES);
    }

    #[test]
    fn overflowing_memory_is_rejected_with_line() {
        let source = format!("# header\n{}", "00000000\n".repeat(MEMORY_BYTES + 1));
        assert!(matches!(
            parse_program(&source),
            Err(LoadError::ProgramTooLarge { line }) if line == MEMORY_BYTES + 2
        ));
    }
}
