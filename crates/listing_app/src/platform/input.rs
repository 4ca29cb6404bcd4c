//! Line commands standing in for clicks and control changes.

use thiserror::Error;

pub const HELP: &str = "commands: n | p | g <page> | size <n> | sort <key> | back | forward | \
                        scroll <y> | nav <index> | q";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    GoToPage(u32),
    PageSize(u32),
    Sort(String),
    Back,
    Forward,
    Scroll(u32),
    Nav(usize),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}")]
    Unknown(String),
    #[error("{command} expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let arg = words.next();

    let command = match head {
        "n" | "next" => Command::NextPage,
        "p" | "prev" => Command::PreviousPage,
        "g" | "go" => Command::GoToPage(number(arg, "go", "a page number")?),
        "size" => Command::PageSize(number(arg, "size", "a page size")?),
        "sort" => match arg {
            Some(key) => Command::Sort(key.to_string()),
            None => {
                return Err(CommandError::BadArgument {
                    command: "sort",
                    expected: "a sort key",
                })
            }
        },
        "back" | "b" => Command::Back,
        "forward" | "f" => Command::Forward,
        "scroll" => Command::Scroll(number(arg, "scroll", "a row offset")?),
        "nav" => Command::Nav(number::<usize>(arg, "nav", "a menu index")?),
        "q" | "quit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn number<T: std::str::FromStr>(
    arg: Option<&str>,
    command: &'static str,
    expected: &'static str,
) -> Result<T, CommandError> {
    arg.and_then(|raw| raw.parse().ok())
        .ok_or(CommandError::BadArgument { command, expected })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_commands() {
        assert_eq!(parse_command("n"), Ok(Command::NextPage));
        assert_eq!(parse_command("  p "), Ok(Command::PreviousPage));
        assert_eq!(parse_command("g 4"), Ok(Command::GoToPage(4)));
        assert_eq!(parse_command("back"), Ok(Command::Back));
        assert_eq!(parse_command("f"), Ok(Command::Forward));
    }

    #[test]
    fn parses_control_changes() {
        assert_eq!(parse_command("size 20"), Ok(Command::PageSize(20)));
        assert_eq!(
            parse_command("sort published_at"),
            Ok(Command::Sort("published_at".to_string()))
        );
        assert_eq!(parse_command("scroll 120"), Ok(Command::Scroll(120)));
        assert_eq!(parse_command("nav 2"), Ok(Command::Nav(2)));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(
            parse_command("jump"),
            Err(CommandError::Unknown("jump".to_string()))
        );
        assert!(matches!(
            parse_command("g two"),
            Err(CommandError::BadArgument { command: "go", .. })
        ));
        assert!(matches!(
            parse_command("sort"),
            Err(CommandError::BadArgument { command: "sort", .. })
        ));
    }
}
