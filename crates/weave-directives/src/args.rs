//! Shell-style word splitting for directive arguments.
//!
//! Splits `.code "src/my file.go" "func main"` into
//! `[".code", "src/my file.go", "func main"]`.

/// Error produced when an argument string cannot be split.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    /// A quote was opened but never closed.
    #[error("unterminated {0} quote")]
    UnterminatedQuote(char),
    /// The string ended right after an escaping backslash.
    #[error("trailing backslash")]
    TrailingEscape,
}

/// Split an argument string into words.
///
/// Follows POSIX shell quoting:
/// - whitespace separates words
/// - `'...'` keeps everything literally
/// - `"..."` keeps whitespace; `\"`, `\\`, `` \` `` and `\$` are escapes
/// - an unquoted `\` escapes the next character
///
/// # Example
///
/// ```
/// use weave_directives::split_args;
///
/// let words = split_args(r#".run echo "hello world""#).unwrap();
/// assert_eq!(words, vec![".run", "echo", "hello world"]);
/// ```
pub fn split_args(input: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    // Distinguishes `""` (an empty word) from no word at all.
    let mut in_word = false;
    let mut chars = input.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(SplitError::UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_word = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\' | '`' | '$')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(SplitError::UnterminatedQuote('"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(SplitError::UnterminatedQuote('"')),
                    }
                }
            }
            '\\' => {
                in_word = true;
                current.push(chars.next().ok_or(SplitError::TrailingEscape)?);
            }
            c => {
                in_word = true;
                current.push(c);
            }
        }
    }

    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_words() {
        assert_eq!(
            split_args(".code src/main.go 3 10").unwrap(),
            vec![".code", "src/main.go", "3", "10"]
        );
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(
            split_args("  .import \t notes.md  ").unwrap(),
            vec![".import", "notes.md"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(split_args("").unwrap().is_empty());
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn test_double_quotes_keep_spaces() {
        assert_eq!(
            split_args(r#".code main.go "func main" "return nil""#).unwrap(),
            vec![".code", "main.go", "func main", "return nil"]
        );
    }

    #[test]
    fn test_single_quotes_are_literal() {
        assert_eq!(
            split_args(r#".run echo 'a "b" \c'"#).unwrap(),
            vec![".run", "echo", r#"a "b" \c"#]
        );
    }

    #[test]
    fn test_escapes_inside_double_quotes() {
        assert_eq!(
            split_args(r#"say "a \"quoted\" \\ \n""#).unwrap(),
            vec!["say", r#"a "quoted" \ \n"#]
        );
    }

    #[test]
    fn test_unquoted_backslash_escapes_space() {
        assert_eq!(
            split_args(r".import my\ notes.md").unwrap(),
            vec![".import", "my notes.md"]
        );
    }

    #[test]
    fn test_adjacent_quotes_join_word() {
        assert_eq!(split_args(r#"a"b c"'d'"#).unwrap(), vec!["ab cd"]);
    }

    #[test]
    fn test_empty_quoted_word() {
        assert_eq!(split_args(r#"echo """#).unwrap(), vec!["echo", ""]);
    }

    #[test]
    fn test_unterminated_double_quote() {
        assert_eq!(
            split_args(r#".code "main.go"#),
            Err(SplitError::UnterminatedQuote('"'))
        );
    }

    #[test]
    fn test_unterminated_single_quote() {
        assert_eq!(
            split_args("don't"),
            Err(SplitError::UnterminatedQuote('\''))
        );
    }

    #[test]
    fn test_trailing_backslash() {
        assert_eq!(split_args("a\\"), Err(SplitError::TrailingEscape));
    }
}
