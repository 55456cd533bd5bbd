//! Conversion of errors to `codespan-reporting` diagnostics

use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use marl_syntax::error::{Error as SyntaxError, ErrorKind as SyntaxErrorKind};
use marl_syntax::span::Span;

use crate::error::Error;

pub type FileId = usize;

pub fn new_primary_label(file_id: FileId, span: Span, message: impl Into<String>) -> Label<FileId> {
    Label::primary(file_id, span).with_message(message)
}

pub fn diagnostic_for_syntax_error(file_id: FileId, error: &SyntaxError) -> Diagnostic<FileId> {
    let kind = error.kind();

    let primary_message = match kind {
        SyntaxErrorKind::Eof(_) => "input ends here",
        SyntaxErrorKind::IntegerOverflow => "integer literal",
        SyntaxErrorKind::UnexpectedChar(_) => "unexpected character",
        SyntaxErrorKind::UnevenMap => "map literal",
    };

    let mut labels = vec![new_primary_label(file_id, error.span(), primary_message)];
    let mut notes = vec![];

    if let SyntaxErrorKind::Eof(expected_content) = kind {
        if let Some(open_span) = expected_content.open_char_span() {
            labels.push(
                Label::secondary(file_id, open_span)
                    .with_message(format!("{} starts here", expected_content.description())),
            );
        }

        if let Some(close_char) = expected_content.expected_close_char() {
            notes.push(format!("expected `{}`", close_char));
        }
    }

    Diagnostic::error()
        .with_message(kind.message())
        .with_labels(labels)
        .with_notes(notes)
}

pub fn diagnostic_for_error(file_id: FileId, error: &Error) -> Diagnostic<FileId> {
    match error {
        Error::Syntax(syntax_err) => diagnostic_for_syntax_error(file_id, syntax_err),
        Error::Runtime { error, span } => Diagnostic::error()
            .with_message(error.to_string())
            .with_labels(vec![new_primary_label(
                file_id,
                *span,
                "error evaluating this form",
            )]),
    }
}

/// Prints an error to standard error labelled against the source it came from
pub fn emit_error_to_stderr(source_name: &str, source: &str, error: &Error) {
    let mut files = SimpleFiles::new();
    let file_id = files.add(source_name.to_owned(), source.to_owned());

    let diagnostic = diagnostic_for_error(file_id, error);
    let stderr = StandardStream::stderr(ColorChoice::Auto);
    let config = term::Config::default();

    if term::emit(&mut stderr.lock(), &config, &files, &diagnostic).is_err() {
        eprintln!("error: {}", error);
    }
}
