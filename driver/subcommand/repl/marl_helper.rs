use std::borrow::Cow;

use ansi_term::{Colour, Style};

use rustyline::validate::{ValidationContext, ValidationResult};

use marl_eval::special_form::SPECIAL_FORMS;
use marl_runtime::value::Text;
use marl_syntax::error::{ErrorKind, ExpectedContent};
use marl_syntax::token::is_symbolic_char;

use super::command::{HELP_COMMAND, QUIT_COMMAND};
use super::syntax::{error_for_line, expected_content_for_eol, MAXIMUM_PARSED_LINE_LEN};

/// Completions that don't map to a bound value in scope
const UNBOUND_COMPLETIONS: &[&str] = &[QUIT_COMMAND, HELP_COMMAND, "nil", "true", "false"];

/// Implementation of Rustyline's `Helper` trait
pub struct MarlHelper {
    all_names: Vec<String>,
}

fn sorted_strings_prefixed_by<'a, T: AsRef<str>>(
    haystack: &'a [T],
    prefix: &'a str,
) -> impl Iterator<Item = &'a T> + 'a {
    // Use a binary search to find the start of the strings
    let start_pos = match haystack.binary_search_by(|needle| needle.as_ref().cmp(prefix)) {
        Ok(found) => found,
        Err(insert_idx) => insert_idx,
    };

    haystack[start_pos..]
        .iter()
        // Once we stop matching prefixes we're done
        .take_while(move |needle| needle.as_ref().starts_with(prefix))
}

/// Returns the byte index where the symbol ending at `pos` starts
fn symbol_start(line: &str, pos: usize) -> usize {
    line[0..pos]
        .rfind(|c| !is_symbolic_char(c))
        .map(|i| i + 1)
        .unwrap_or(0)
}

impl MarlHelper {
    pub fn new(bound_names: &[Text]) -> MarlHelper {
        let mut all_names = bound_names
            .iter()
            .map(|name| name.as_str().to_owned())
            .chain(SPECIAL_FORMS.iter().map(|sf| sf.name().to_owned()))
            .chain(UNBOUND_COMPLETIONS.iter().map(|unbound| (*unbound).to_owned()))
            .collect::<Vec<String>>();

        all_names.sort();
        all_names.dedup();

        MarlHelper { all_names }
    }
}

impl rustyline::completion::Completer for MarlHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        let prefix_start = symbol_start(line, pos);
        let prefix = &line[prefix_start..pos];

        let suffix = if line.len() > pos {
            let suffix_end = line[pos..]
                .find(|c| !is_symbolic_char(c))
                .map(|i| i + pos)
                .unwrap_or_else(|| line.len());
            &line[pos..suffix_end]
        } else {
            ""
        };

        let is_command = prefix.starts_with('/');
        let is_first_symbol = pos == prefix.len();

        if is_command && !is_first_symbol {
            // Don't complete commands in illegal positions
            return Ok((0, vec![]));
        }

        let options = sorted_strings_prefixed_by(&self.all_names, prefix)
            .filter_map(|name| {
                if name.ends_with(suffix) {
                    Some((&name[0..name.len() - suffix.len()]).to_owned())
                } else {
                    None
                }
            })
            .collect();

        Ok((prefix_start, options))
    }
}

impl rustyline::hint::Hinter for MarlHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _: &rustyline::Context<'_>) -> Option<String> {
        let expected_content = expected_content_for_eol(line);

        // If we're inside a string we shouldn't try to hint symbols
        if let Some(ExpectedContent::String(_)) = expected_content {
            return Some("\"".to_owned());
        }

        let last_symbol = &line[symbol_start(line, line.len())..];

        let is_command = last_symbol.starts_with('/');
        let is_first_symbol = pos == last_symbol.len();

        // Make sure we have at least one character and we don't complete commands mid-line
        if !(last_symbol.is_empty() || (is_command && !is_first_symbol)) {
            for name in sorted_strings_prefixed_by(&self.all_names, last_symbol) {
                // Don't suggest ourselves
                if name.len() != last_symbol.len() {
                    return Some(name[last_symbol.len()..].to_owned());
                }
            }
        }

        expected_content
            .and_then(|ec| ec.expected_close_char())
            .map(|close_char| close_char.to_string())
    }
}

impl rustyline::highlight::Highlighter for MarlHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        // See if we have an error
        let error_span = error_for_line(line).and_then(|error| {
            if let ErrorKind::Eof(ec) = error.kind() {
                // We'll already be hinting at the end of the line so point to the opening char
                ec.open_char_span()
            } else {
                Some(error.span())
            }
        });

        let error_span = if let Some(error_span) = error_span {
            error_span
        } else {
            return line.into();
        };

        let error_start = error_span.start() as usize;
        let error_end = error_span.end() as usize;

        let prefix = &line[0..error_start];
        let error = &line[error_start..error_end];
        let suffix = &line[error_end..];

        let error_style = Colour::Red.bold();
        format!("{}{}{}", prefix, error_style.paint(error), suffix).into()
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        _default: bool,
    ) -> Cow<'b, str> {
        let prompt_style = Colour::Fixed(25); // DeepSkyBlue4 (#005faf)
        prompt_style.paint(prompt).to_string().into()
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        if hint.chars().next().map(is_symbolic_char) == Some(true) {
            // This is a name completion
            let name_style = Style::new().dimmed();
            name_style.paint(hint).to_string().into()
        } else {
            // This is an unexpected EOF hint
            let unexpected_eof_style = Colour::Red.bold();
            unexpected_eof_style.paint(hint).to_string().into()
        }
    }

    fn highlight_char(&self, line: &str, _pos: usize) -> bool {
        // Any character can change the structure of the input
        line.len() <= MAXIMUM_PARSED_LINE_LEN
    }
}

impl rustyline::validate::Validator for MarlHelper {
    fn validate(
        &self,
        ctx: &mut ValidationContext<'_>,
    ) -> Result<ValidationResult, rustyline::error::ReadlineError> {
        match expected_content_for_eol(ctx.input()) {
            Some(_) => Ok(ValidationResult::Incomplete),
            None => Ok(ValidationResult::Valid(None)),
        }
    }
}

impl rustyline::Helper for MarlHelper {}
