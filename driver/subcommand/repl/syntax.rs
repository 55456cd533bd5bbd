use marl_syntax::error::{Error, ErrorKind, ExpectedContent};
use marl_syntax::parser::datum_from_str;

/// Maximum line length we'll provide parser hints and error highlighting for
///
/// This requires parsing the whole line and we don't support incremental reparsing. Pasting a large
/// line character-by-character would otherwise reparse the line once per character.
pub const MAXIMUM_PARSED_LINE_LEN: usize = 512;

pub fn error_for_line(line: &str) -> Option<Error> {
    // Is this a command?
    if line.starts_with('/') ||
    // Or empty?
    line.chars().all(char::is_whitespace) ||
    // Or is too large to parse interactively?
    line.len() > MAXIMUM_PARSED_LINE_LEN
    {
        return None;
    }

    datum_from_str(line).err()
}

/// Returns the content we're waiting on if the line ends inside an unfinished form
pub fn expected_content_for_eol(line: &str) -> Option<ExpectedContent> {
    error_for_line(line).and_then(|error| {
        if let ErrorKind::Eof(expected_content) = error.kind() {
            Some(*expected_content)
        } else {
            None
        }
    })
}
