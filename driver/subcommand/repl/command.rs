pub const QUIT_COMMAND: &str = "/quit";
pub const HELP_COMMAND: &str = "/help";

#[derive(Debug, PartialEq)]
pub enum ParsedCommand {
    EvalValue(String),
    Quit,
    Other,
}

pub fn parse_command(line: String) -> ParsedCommand {
    match line.trim() {
        HELP_COMMAND => {
            println!("Available REPL commands:");
            println!();
            println!("/help                 Prints this summary");
            println!("/quit                 Exits the REPL");
            ParsedCommand::Other
        }
        QUIT_COMMAND => ParsedCommand::Quit,
        _ => ParsedCommand::EvalValue(line),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commands() {
        assert_eq!(ParsedCommand::Quit, parse_command("/quit".to_owned()));
        assert_eq!(ParsedCommand::Quit, parse_command(" /quit ".to_owned()));
        assert_eq!(ParsedCommand::Other, parse_command("/help".to_owned()));

        assert_eq!(
            ParsedCommand::EvalValue("(+ 1 2)".to_owned()),
            parse_command("(+ 1 2)".to_owned())
        );
    }
}
