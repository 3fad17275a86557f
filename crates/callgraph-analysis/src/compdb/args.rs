//! POSIX-style splitting of a `command` string into an argument vector.

/// Split a shell command line the way `sh` would tokenize it, without
/// expansion: whitespace separates words, single quotes are literal, double
/// quotes allow `\"`, `\\`, `` \` `` and `\$` escapes, and a backslash outside
/// quotes escapes the next character.
pub fn split_command(command: &str) -> Result<Vec<String>, String> {
    #[derive(Clone, Copy, PartialEq)]
    enum State {
        Between,
        Word,
        Single,
        Double,
    }

    let mut words = Vec::new();
    let mut current = String::new();
    let mut state = State::Between;
    let mut chars = command.chars();

    while let Some(c) = chars.next() {
        match state {
            State::Between | State::Word => match c {
                c if c.is_whitespace() => {
                    if state == State::Word {
                        words.push(std::mem::take(&mut current));
                        state = State::Between;
                    }
                }
                '\'' => state = State::Single,
                '"' => state = State::Double,
                '\\' => {
                    match chars.next() {
                        Some('\n') => {}
                        Some(escaped) => current.push(escaped),
                        None => return Err("trailing backslash".to_string()),
                    }
                    state = State::Word;
                }
                c => {
                    current.push(c);
                    state = State::Word;
                }
            },
            State::Single => match c {
                '\'' => state = State::Word,
                c => current.push(c),
            },
            State::Double => match c {
                '"' => state = State::Word,
                '\\' => match chars.next() {
                    Some(e @ ('"' | '\\' | '`' | '$')) => current.push(e),
                    Some('\n') => {}
                    Some(other) => {
                        current.push('\\');
                        current.push(other);
                    }
                    None => return Err("unterminated double quote".to_string()),
                },
                c => current.push(c),
            },
        }
    }

    match state {
        State::Single => Err("unterminated single quote".to_string()),
        State::Double => Err("unterminated double quote".to_string()),
        State::Word => {
            words.push(current);
            Ok(words)
        }
        State::Between => Ok(words),
    }
}

#[cfg(test)]
mod tests {
    use super::split_command;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(
            split_command("  cc -c  main.c\t-o main.o ").unwrap(),
            vec!["cc", "-c", "main.c", "-o", "main.o"]
        );
    }

    #[test]
    fn honors_quotes_and_escapes() {
        assert_eq!(
            split_command(r#"cc "-DNAME=\"x y\"" '-DQ=a b' a\ b.c"#).unwrap(),
            vec!["cc", r#"-DNAME="x y""#, "-DQ=a b", "a b.c"]
        );
    }

    #[test]
    fn empty_quotes_make_an_empty_word() {
        assert_eq!(split_command("cc '' x").unwrap(), vec!["cc", "", "x"]);
    }

    #[test]
    fn rejects_unterminated_quotes() {
        assert!(split_command("cc 'oops").is_err());
        assert!(split_command("cc \"oops").is_err());
        assert!(split_command("cc oops\\").is_err());
    }
}
