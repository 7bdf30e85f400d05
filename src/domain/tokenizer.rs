//! Quote-aware tokenization of MEL statements.
//!
//! A statement such as
//!
//! ```text
//! createNode transform -s -n "persp";
//! ```
//!
//! is split into the command name (`createNode`) and its arguments
//! (`transform`, `-s`, `-n`, `persp`). Quoted arguments have their
//! delimiters stripped but their content is otherwise left untouched, so
//! escape sequences such as `\"` survive verbatim.

/// The statement terminator stripped from the end of a statement before it
/// is tokenized.
pub const TERMINATOR: char = ';';

/// Splits a statement into its command name and argument list.
///
/// Tokenization never fails. Malformed input (for example an unterminated
/// quoted string) yields a best-effort token list: an unterminated quote
/// swallows the remainder of the statement as a single argument.
///
/// A single trailing [`TERMINATOR`] (after any trailing whitespace) is
/// removed before tokenizing, so it never appears as part of the last
/// argument.
#[must_use]
pub fn tokenize_command(statement: &str) -> (String, Vec<String>) {
    let statement = strip_terminator(statement.trim_start());

    let (command, mut rest) = split_at_whitespace(statement);

    let mut args = Vec::new();
    loop {
        rest = rest.trim();
        if rest.is_empty() {
            break;
        }

        let (arg, remainder) = match rest.chars().next() {
            Some(delimiter @ ('"' | '\'')) => split_quoted(rest, delimiter),
            _ => split_at_whitespace(rest),
        };

        args.push(arg.to_string());
        rest = remainder;
    }

    (command.to_string(), args)
}

fn strip_terminator(statement: &str) -> &str {
    let trimmed = statement.trim_end();
    trimmed.strip_suffix(TERMINATOR).unwrap_or(trimmed)
}

/// Splits off everything up to the first whitespace character.
fn split_at_whitespace(text: &str) -> (&str, &str) {
    text.find(char::is_whitespace)
        .map_or((text, ""), |index| text.split_at(index))
}

/// Splits off a quoted argument, returning its content without delimiters
/// and the text following the closing delimiter.
///
/// `text` must begin with `delimiter`.
fn split_quoted(text: &str, delimiter: char) -> (&str, &str) {
    let body = &text[delimiter.len_utf8()..];

    let mut escaped = false;
    let mut end = body.len();
    for (index, c) in body.char_indices() {
        if !escaped && c == delimiter {
            end = index;
            break;
        } else if !escaped && c == '\\' {
            escaped = true;
        } else {
            escaped = false;
        }
    }

    let remainder = body.get(end + delimiter.len_utf8()..).unwrap_or("");
    (&body[..end], remainder)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn args(statement: &str) -> Vec<String> {
        tokenize_command(statement).1
    }

    #[test]
    fn splits_command_and_arguments() {
        let (command, args) = tokenize_command("createNode transform -s -n \"persp\";");
        assert_eq!(command, "createNode");
        assert_eq!(args, vec!["transform", "-s", "-n", "persp"]);
    }

    #[test]
    fn escaped_quote_does_not_terminate_string() {
        assert_eq!(
            args(r#"setAttr ".b" "a \"b\" c";"#),
            vec![".b", r#"a \"b\" c"#]
        );
    }

    #[test]
    fn escaped_backslash_before_quote_terminates_string() {
        // The second backslash is consumed as the escaped character, so the
        // following quote closes the string.
        assert_eq!(args(r#"fileInfo "a\\" "b";"#), vec![r"a\\", "b"]);
    }

    #[test]
    fn single_quotes_are_delimiters() {
        assert_eq!(args("cmd 'a b' c;"), vec!["a b", "c"]);
    }

    #[test]
    fn double_quote_inside_single_quotes_is_literal() {
        assert_eq!(args(r#"cmd 'say "hi"';"#), vec![r#"say "hi""#]);
    }

    #[test]
    fn unterminated_quote_takes_rest_of_statement() {
        assert_eq!(
            args("createNode transform -n \"unfinished name"),
            vec!["transform", "-n", "unfinished name"]
        );
    }

    #[test]
    fn empty_quoted_string_is_an_argument() {
        assert_eq!(args(r#"fileInfo "empty" "";"#), vec!["empty", ""]);
    }

    #[test]
    fn statement_spanning_continuation_lines() {
        let statement = "requires -nodeType \"HIK\" -dataType \"A\"\n\t\t-dataType \"B\" \"mayaHIK\" \"1.0\";\n";
        assert_eq!(
            args(statement),
            vec!["-nodeType", "HIK", "-dataType", "A", "-dataType", "B", "mayaHIK", "1.0"]
        );
    }

    #[test]
    fn terminator_inside_quotes_is_kept() {
        assert_eq!(
            args("file -op \"v=0;\" -typ \"mayaAscii\" \"C:/a.ma\";"),
            vec!["-op", "v=0;", "-typ", "mayaAscii", "C:/a.ma"]
        );
    }

    #[test_case("", "" ; "empty statement")]
    #[test_case("   ", "" ; "whitespace only")]
    #[test_case("currentUnit;", "currentUnit" ; "no arguments")]
    #[test_case("  \tcreateNode mesh;", "createNode" ; "leading whitespace")]
    fn command_name(statement: &str, expected: &str) {
        assert_eq!(tokenize_command(statement).0, expected);
    }

    #[test]
    fn trailing_terminator_separated_by_space() {
        assert_eq!(
            args("setAttr \".t\" -type \"double3\" 1 2 3 ;\n"),
            vec![".t", "-type", "double3", "1", "2", "3"]
        );
    }
}
