//! Syntactic classification of single argument tokens.

/// Syntactic class of one argument token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'t> {
    /// `-h` or `--help`.
    Help,
    /// Exactly `--`; ends option scanning.
    Terminator,
    /// One long name (`--name`) or a cluster of short names (`-xyz`).
    Names(Vec<String>),
    /// Anything else, consumed by the currently open option.
    Value(&'t str),
}

impl<'t> Token<'t> {
    /// Classifies a token.
    ///
    /// # Examples
    ///
    /// ```
    /// use argument_parser_core::Token;
    ///
    /// assert_eq!(Token::classify("--"), Token::Terminator);
    /// assert_eq!(Token::classify("-h"), Token::Help);
    /// assert_eq!(Token::classify("-ab"), Token::Names(vec!["a".into(), "b".into()]));
    /// assert_eq!(Token::classify("42"), Token::Value("42"));
    /// ```
    pub fn classify(token: &'t str) -> Self {
        match token {
            "-h" | "--help" => Self::Help,
            "--" => Self::Terminator,
            _ => {
                let names = argument_names(token);
                if names.is_empty() {
                    Self::Value(token)
                } else {
                    Self::Names(names)
                }
            }
        }
    }
}

/// Extracts option names from a token.
///
/// `--name` yields the single long name `name`; `-xyz` yields one short name
/// per character. Tokens that do not start with a dash (or are a bare dash)
/// yield nothing.
///
/// # Examples
///
/// ```
/// use argument_parser_core::argument_names;
///
/// assert_eq!(argument_names("--filename"), vec!["filename"]);
/// assert_eq!(argument_names("-yes"), vec!["y", "e", "s"]);
/// assert!(argument_names("nope-nope").is_empty());
/// ```
pub fn argument_names(token: &str) -> Vec<String> {
    if let Some(long) = token.strip_prefix("--") {
        if long.is_empty() {
            Vec::new()
        } else {
            vec![long.to_string()]
        }
    } else if let Some(shorts) = token.strip_prefix('-') {
        shorts.chars().map(String::from).collect()
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_names() {
        let cases: &[(&str, &[&str])] = &[
            ("", &[]),
            ("-n", &["n"]),
            ("--filename", &["filename"]),
            ("-yes", &["y", "e", "s"]),
            ("no", &[]),
            ("nope--nope", &[]),
            ("nope-nope", &[]),
            ("-", &[]),
            ("--", &[]),
            ("--dry-run", &["dry-run"]),
        ];

        for (input, want) in cases {
            assert_eq!(argument_names(input), *want, "input: {input:?}");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify("--help"), Token::Help);
        assert_eq!(Token::classify("--"), Token::Terminator);
        assert_eq!(Token::classify("--str"), Token::Names(vec!["str".into()]));
        assert_eq!(Token::classify("-"), Token::Value("-"));
        assert_eq!(Token::classify(""), Token::Value(""));
        assert_eq!(Token::classify("a-b"), Token::Value("a-b"));
    }

    #[test]
    fn test_classify_multibyte_cluster() {
        assert_eq!(
            Token::classify("-éx"),
            Token::Names(vec!["é".into(), "x".into()])
        );
    }
}
