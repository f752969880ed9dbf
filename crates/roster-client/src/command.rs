//! Line commands understood by `roster-console`.

use crate::console::UserField;
use roster_core::UserId;

pub const HELP: &str = "\
commands:
  list                     refetch users
  new <field> <value>      set a draft field (firstName, lastName, email)
  create                   submit the draft
  edit <id>                fetch a user and start editing it
  set <field> <value>      change a field of the user being edited
  save                     send the edit
  cancel                   drop the edit
  delete <id>              delete a user
  help                     show this text
  quit                     exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Draft(UserField, String),
    Create,
    Edit(UserId),
    Set(UserField, String),
    Save,
    Cancel,
    Delete(UserId),
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Field values keep their inner spaces.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match verb {
            "list" | "ls" => Ok(Self::List),
            "new" => field_value(rest).map(|(f, v)| Self::Draft(f, v)),
            "create" => Ok(Self::Create),
            "edit" => user_id(rest).map(Self::Edit),
            "set" => field_value(rest).map(|(f, v)| Self::Set(f, v)),
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "delete" | "rm" => user_id(rest).map(Self::Delete),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

fn field_value(rest: &str) -> Result<(UserField, String), String> {
    let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    Ok((field.parse()?, value.trim().to_string()))
}

fn user_id(rest: &str) -> Result<UserId, String> {
    UserId::parse(rest).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("list"), Ok(Command::List));
        assert_eq!(Command::parse("  save "), Ok(Command::Save));
        assert_eq!(Command::parse("edit 3"), Ok(Command::Edit(UserId(3))));
        assert_eq!(Command::parse("delete 7"), Ok(Command::Delete(UserId(7))));
    }

    #[test]
    fn test_parse_field_values() {
        assert_eq!(
            Command::parse("new lastName van Rossum"),
            Ok(Command::Draft(UserField::LastName, "van Rossum".to_string()))
        );
        assert_eq!(
            Command::parse("set email"),
            Ok(Command::Set(UserField::Email, String::new()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(Command::parse("edit abc").is_err());
        assert!(Command::parse("new age 3").is_err());
        assert!(Command::parse("launch").is_err());
        assert!(Command::parse("").is_err());
    }
}
