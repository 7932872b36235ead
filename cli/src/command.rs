//! Classification of interactive input lines.

/// What one input line asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    /// Leave the session.
    Quit,
    /// Print usage help.
    Help,
    /// List every bound variable.
    List,
    /// Show one variable: `name?` or `?name`.
    Show(&'a str),
    /// Evaluate and bind: `name = expr`.
    Assign { name: &'a str, expr: &'a str },
    /// Evaluate an expression.
    Eval(&'a str),
}

/// Decide what an input line means.
///
/// Exit words and `help` are matched whole, case-insensitively. A line
/// containing `=` is an assignment with everything after the first `=` as
/// the expression. Question-mark forms inspect variables; a lone `?` lists
/// them all.
pub fn classify(line: &str) -> Command<'_> {
    let line = line.trim();

    if ["quit", "exit", "done"]
        .iter()
        .any(|word| line.eq_ignore_ascii_case(word))
    {
        return Command::Quit;
    }
    if line.eq_ignore_ascii_case("help") {
        return Command::Help;
    }
    if let Some((name, expr)) = line.split_once('=') {
        return Command::Assign {
            name: name.trim(),
            expr: expr.trim(),
        };
    }
    if line == "?" {
        return Command::List;
    }
    if let Some(name) = line.strip_prefix('?') {
        return Command::Show(name.trim());
    }
    if let Some(name) = line.strip_suffix('?') {
        return Command::Show(name.trim());
    }
    Command::Eval(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_words() {
        assert_eq!(classify("quit"), Command::Quit);
        assert_eq!(classify("EXIT"), Command::Quit);
        assert_eq!(classify(" Done "), Command::Quit);
    }

    #[test]
    fn test_help() {
        assert_eq!(classify("help"), Command::Help);
        assert_eq!(classify("Help"), Command::Help);
    }

    #[test]
    fn test_assignment_splits_at_first_equals() {
        assert_eq!(
            classify("x = 1 + 2"),
            Command::Assign {
                name: "x",
                expr: "1 + 2"
            }
        );
        assert_eq!(
            classify("x=y=3"),
            Command::Assign {
                name: "x",
                expr: "y=3"
            }
        );
    }

    #[test]
    fn test_question_forms() {
        assert_eq!(classify("?"), Command::List);
        assert_eq!(classify("?x"), Command::Show("x"));
        assert_eq!(classify("x?"), Command::Show("x"));
        assert_eq!(classify(" ? rate "), Command::Show("rate"));
    }

    #[test]
    fn test_everything_else_evaluates() {
        assert_eq!(classify("1 + 2"), Command::Eval("1 + 2"));
        assert_eq!(classify("quitter + 1"), Command::Eval("quitter + 1"));
        assert_eq!(classify("helped()"), Command::Eval("helped()"));
    }
}
