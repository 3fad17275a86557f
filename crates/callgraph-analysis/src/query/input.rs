//! Query line parsing.

use callgraph_core::errors::QueryError;

/// A position named by the user. `file` is a substring of a unit's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

/// Parse `<fileNameSubstring>:<line>:<column>`.
///
/// The file part runs up to the first colon. Accepted leniencies, matching a
/// `%d:%d` scan:
/// - whitespace around the line number and before the column number;
/// - a leading `+` on either number;
/// - any text after the column number's digits.
///
/// Negative numbers are malformed: no source position is negative.
pub fn parse_query(input: &str) -> Result<Location, QueryError> {
    let trimmed = input.trim_end_matches(['\n', '\r']);
    let malformed = || QueryError::Malformed {
        input: trimmed.to_string(),
    };

    let (file, rest) = trimmed.split_once(':').ok_or_else(malformed)?;
    let (line, column) = rest.split_once(':').ok_or_else(malformed)?;

    let line = line.trim().parse::<u32>().map_err(|_| malformed())?;
    let column = column.trim_start();
    let column = column.strip_prefix('+').unwrap_or(column);
    let digits = column
        .find(|c: char| !c.is_ascii_digit())
        .map_or(column, |end| &column[..end]);
    let column = digits.parse::<u32>().map_err(|_| malformed())?;

    Ok(Location {
        file: file.to_string(),
        line,
        column,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_lines() {
        assert_eq!(
            parse_query("src/main.c:12:5\n").unwrap(),
            Location {
                file: "src/main.c".into(),
                line: 12,
                column: 5
            }
        );
    }

    #[test]
    fn ignores_trailing_text_after_column() {
        let loc = parse_query("a.cc:3:7 trailing\r\n").unwrap();
        assert_eq!((loc.line, loc.column), (3, 7));
    }

    #[test]
    fn accepts_scanf_style_spacing_and_plus_signs() {
        let loc = parse_query("a.c: 4 : 9\n").unwrap();
        assert_eq!((loc.line, loc.column), (4, 9));
        let loc = parse_query("a.c:+4:+9").unwrap();
        assert_eq!((loc.line, loc.column), (4, 9));
    }

    #[test]
    fn rejects_negative_positions() {
        for bad in ["a.c:-4:9", "a.c:4:-9", "a.c:4:+-9"] {
            assert!(
                matches!(parse_query(bad), Err(QueryError::Malformed { .. })),
                "{bad:?} should be malformed"
            );
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        for bad in ["", "\n", "main.c", "main.c:12", "main.c:x:1", "main.c:1:", "main.c:1:y"] {
            assert!(
                matches!(parse_query(bad), Err(QueryError::Malformed { .. })),
                "{bad:?} should be malformed"
            );
        }
    }
}
