//! Cursor positions and conversion to byte offsets.
//!
//! Lines and columns are zero-based. Columns count characters, not bytes,
//! so a cursor after a multi-byte identifier still lands on a char boundary.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A cursor in a document, either as a byte offset or a line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    Offset(usize),
    LineColumn { line: usize, column: usize },
}

impl Cursor {
    /// Resolve the cursor to a byte offset into `text`.
    ///
    /// # Errors
    /// Returns `CoreError` if the position is outside the document or does not
    /// fall on a character boundary.
    pub fn to_offset(self, text: &str) -> Result<usize, CoreError> {
        match self {
            Self::Offset(offset) => {
                if offset <= text.len() && text.is_char_boundary(offset) {
                    Ok(offset)
                } else {
                    Err(CoreError::InvalidOffset {
                        offset,
                        len: text.len(),
                    })
                }
            }
            Self::LineColumn { line, column } => line_column_to_offset(text, line, column),
        }
    }
}

fn line_column_to_offset(text: &str, line: usize, column: usize) -> Result<usize, CoreError> {
    let invalid = CoreError::InvalidPosition { line, column };

    let mut line_start = 0;
    for _ in 0..line {
        let Some(newline) = text[line_start..].find('\n') else {
            return Err(invalid);
        };
        line_start += newline + 1;
    }

    let line_text = text[line_start..].split('\n').next().unwrap_or_default();
    let line_text = line_text.strip_suffix('\r').unwrap_or(line_text);

    let mut chars = line_text.char_indices();
    for _ in 0..column {
        if chars.next().is_none() {
            return Err(invalid);
        }
    }
    let byte_in_line = chars.next().map_or(line_text.len(), |(idx, _)| idx);
    Ok(line_start + byte_in_line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DOC: &str = "int x;\nstruct P p;\np.";

    #[rstest]
    #[case(0, 0, 0)]
    #[case(0, 6, 6)]
    #[case(1, 0, 7)]
    #[case(2, 2, 21)]
    fn line_column_maps_to_offset(
        #[case] line: usize,
        #[case] column: usize,
        #[case] expected: usize,
    ) {
        let offset = Cursor::LineColumn { line, column }
            .to_offset(DOC)
            .expect("valid position");
        assert_eq!(offset, expected);
    }

    #[test]
    fn column_past_line_end_is_rejected() {
        let err = Cursor::LineColumn { line: 0, column: 7 }
            .to_offset(DOC)
            .expect_err("column past end");
        assert_eq!(err, CoreError::InvalidPosition { line: 0, column: 7 });
    }

    #[test]
    fn line_past_document_end_is_rejected() {
        assert!(Cursor::LineColumn { line: 3, column: 0 }.to_offset(DOC).is_err());
    }

    #[test]
    fn columns_count_characters() {
        let doc = "/* é */ int y;";
        let offset = Cursor::LineColumn { line: 0, column: 4 }
            .to_offset(doc)
            .expect("valid position");
        assert_eq!(&doc[offset..offset + 2], " *");
    }

    #[test]
    fn offset_outside_document_is_rejected() {
        assert!(Cursor::Offset(DOC.len() + 1).to_offset(DOC).is_err());
        assert_eq!(Cursor::Offset(DOC.len()).to_offset(DOC), Ok(DOC.len()));
    }
}
