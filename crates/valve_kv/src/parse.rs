//! Tokenizer and tree builder for KeyValues text
//!

use tracing::{debug, instrument, trace};
use winnow::ascii::multispace0;
use winnow::combinator::{alt, cut_err, delimited, repeat};
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_till;

use crate::error::{Error, Result};
use crate::types::{Arena, NodeId, Span};

pub(crate) type Stream<'i> = &'i str;

/// Body of a quoted string. A quote directly after a backslash never
/// terminates the string, even when that backslash is itself escaped.
/// Nothing is unescaped.
fn quoted_body<'i>(input: &mut Stream<'i>) -> PResult<&'i str> {
    repeat::<_, _, (), _, _>(
        0..,
        alt((
            "\\\"".void(),
            '\\'.void(),
            take_till(1.., ['"', '\\']).void(),
        )),
    )
    .take()
    .parse_next(input)
}

/// `"..."`, possibly spanning several lines
pub(crate) fn quoted<'i>(input: &mut Stream<'i>) -> PResult<&'i str> {
    delimited('"', quoted_body, cut_err('"')).parse_next(input)
}

/// Everything up to, but not including, the next line break
pub(crate) fn rest_of_line<'i>(input: &mut Stream<'i>) -> PResult<&'i str> {
    take_till(0.., '\n').parse_next(input)
}

struct Tokenizer<'i> {
    source: &'i str,
    input: Stream<'i>,
}

impl<'i> Tokenizer<'i> {
    fn offset(&self) -> usize {
        self.source.len() - self.input.len()
    }

    fn line_at(&self, offset: usize) -> usize {
        self.source.as_bytes()[..offset]
            .iter()
            .filter(|b| **b == b'\n')
            .count()
            + 1
    }

    fn peek(&self) -> Option<char> {
        self.input.chars().next()
    }

    fn bump(&mut self, c: char) {
        self.input = &self.input[c.len_utf8()..];
    }

    fn skip_whitespace(&mut self) {
        let _ = multispace0::<_, ContextError>(&mut self.input);
    }

    /// Whitespace and `//` comments
    fn skip_trivia(&mut self) {
        loop {
            self.skip_whitespace();
            if !self.input.starts_with("//") {
                break;
            }
            self.skip_line();
        }
    }

    fn skip_line(&mut self) {
        if let Ok(rest) = rest_of_line(&mut self.input) {
            if !rest.trim().is_empty() {
                trace!(skipped = rest.trim(), "ignoring trailing tokens");
            }
        }
    }

    fn string(&mut self) -> Result<Span> {
        let start = self.offset();
        match quoted(&mut self.input) {
            Ok(body) => Ok(Span::new(start + 1, body.len())),
            Err(_) => {
                let line = self.line_at(start);
                debug!(line, "unterminated string");
                Err(Error::UnterminatedString {
                    line,
                    src: self.source.to_owned(),
                    span: (start, 1).into(),
                })
            }
        }
    }

    fn unexpected(&self, found: char) -> Error {
        let offset = self.offset();
        let line = self.line_at(offset);
        debug!(line, ?found, "unexpected character");
        Error::UnexpectedCharacter {
            found,
            line,
            src: self.source.to_owned(),
            span: (offset, found.len_utf8()).into(),
        }
    }

    fn unbalanced(&self) -> Error {
        let offset = self.offset();
        let line = self.line_at(offset);
        debug!(line, "closing brace without open block");
        Error::UnbalancedBlock {
            line,
            src: self.source.to_owned(),
            span: (offset, 1).into(),
        }
    }
}

/// Parse `source` into `arena`, which must be freshly cleared.
///
/// Scopes are kept on an explicit stack so nesting depth is not bound by
/// the call stack.
#[instrument(skip_all, fields(len = source.len()))]
pub(crate) fn parse_into(source: &str, arena: &mut Arena) -> Result<()> {
    let mut tokens = Tokenizer {
        source,
        input: source,
    };
    // Open blocks along with the offset of their `{`
    let mut scope: Vec<(NodeId, usize)> = vec![(NodeId::ROOT, 0)];

    loop {
        tokens.skip_whitespace();
        let Some(c) = tokens.peek() else {
            break;
        };
        let parent = scope.last().map_or(NodeId::ROOT, |(id, _)| *id);

        match c {
            '"' => {
                let key = tokens.string()?;
                tokens.skip_trivia();

                match tokens.peek() {
                    Some('"') => {
                        let value = tokens.string()?;
                        // Platform conditionals such as [$WIN32] are not evaluated
                        tokens.skip_line();

                        if !arena.insert_value(source, parent, key, value) {
                            trace!(key = key.as_str(source), "dropping duplicate value");
                        }
                    }
                    Some('{') => {
                        let opened_at = tokens.offset();
                        tokens.bump('{');
                        let block = arena.open_block(source, parent, key);
                        scope.push((block, opened_at));
                    }
                    _ => {
                        debug!(
                            line = tokens.line_at(key.start),
                            key = key.as_str(source),
                            "dropping key without value"
                        );
                    }
                }
            }
            '/' if tokens.input.starts_with("//") => tokens.skip_line(),
            '}' => {
                if scope.len() == 1 {
                    return Err(tokens.unbalanced());
                }
                tokens.bump('}');
                scope.pop();
            }
            other => return Err(tokens.unexpected(other)),
        }
    }

    if scope.len() > 1 {
        let opened_at = scope.last().map_or(0, |(_, offset)| *offset);
        debug!(open = scope.len() - 1, "input ended inside a block");
        return Err(Error::UnclosedBlock {
            open: scope.len() - 1,
            src: source.to_owned(),
            span: (opened_at, 1).into(),
        });
    }

    debug!(nodes = arena.len(), "parsed keyvalues");
    Ok(())
}

#[cfg(test)]
mod test {
    use winnow::prelude::*;

    use super::{quoted, rest_of_line};

    #[test]
    fn quoted_simple() {
        let mut input = "\"name\" \"value\"";
        assert_eq!(quoted.parse_next(&mut input).unwrap(), "name");
        assert_eq!(input, " \"value\"");
    }

    #[test]
    fn quoted_keeps_escaped_quote() {
        let mut input = r#""say \"hi\"" rest"#;
        assert_eq!(quoted.parse_next(&mut input).unwrap(), r#"say \"hi\""#);
        assert_eq!(input, " rest");
    }

    #[test]
    fn quoted_spans_lines() {
        let mut input = "\"line one\nline two\"";
        assert_eq!(quoted.parse_next(&mut input).unwrap(), "line one\nline two");
        assert!(input.is_empty());
    }

    #[test]
    fn quoted_empty() {
        let mut input = "\"\"";
        assert_eq!(quoted.parse_next(&mut input).unwrap(), "");
    }

    #[test]
    fn quoted_unterminated() {
        let mut input = "\"never closed";
        assert!(quoted.parse_next(&mut input).is_err());

        let mut input = "\"trailing backslash\\";
        assert!(quoted.parse_next(&mut input).is_err());
    }

    #[test]
    fn quoted_quote_after_backslash_never_terminates() {
        let mut input = "\"C:\\\\\"\n\"next\" \"1\"";
        assert_eq!(quoted.parse_next(&mut input).unwrap(), "C:\\\\\"\n");
        assert_eq!(input, "next\" \"1\"");

        let mut input = "\"ends with\\\"";
        assert!(quoted.parse_next(&mut input).is_err());
    }

    #[test]
    fn rest_of_line_stops_at_newline() {
        let mut input = " [$WIN32]\n\"next\"";
        assert_eq!(rest_of_line.parse_next(&mut input).unwrap(), " [$WIN32]");
        assert_eq!(input, "\n\"next\"");
    }
}
