//! Parsing REPL input into commands.

use ordergate_client::Action;

pub const COMMANDS: &[&str] = &[
    "credentials",
    "register",
    "login",
    "whoami",
    "create",
    "update",
    "delete",
    "get",
    "list",
    "logs",
    "show",
    "help",
    "quit",
];

pub const HELP: &str = "\
credentials <user> <password>    set the username and password to use
register [<user> <password>]     register (optionally setting credentials first)
login [<user> <password>]        log in and keep the returned token
whoami                           ask the gateway who the token belongs to
create <id> <title...> <amount>  add an order
update <id> <title...> <amount>  replace an order
delete <id>                      delete an order
get <id>                         fetch one order
list                             fetch all orders
logs                             fetch the log feed
show                             print the last feedback, order, log and identity output
help                             this text
quit                             leave";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Credentials { username: String, password: String },
    Run {
        credentials: Option<(String, String)>,
        action: Action,
    },
    Show,
    Help,
    Quit,
}

impl Command {
    fn run(action: Action) -> Self {
        Self::Run {
            credentials: None,
            action,
        }
    }
}

/// Parses one input line. Errors are usage messages.
pub fn parse(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Err("empty command".to_string());
    };

    match (name, args) {
        ("quit" | "exit", []) => Ok(Command::Quit),
        ("help", []) => Ok(Command::Help),
        ("show", []) => Ok(Command::Show),
        ("credentials", [username, password]) => Ok(Command::Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }),
        ("register" | "login", rest) => {
            let credentials = match rest {
                [] => None,
                [username, password] => Some((username.to_string(), password.to_string())),
                _ => return Err(format!("usage: {} [<user> <password>]", name)),
            };
            let action = if name == "register" {
                Action::Register
            } else {
                Action::Login
            };
            Ok(Command::Run {
                credentials,
                action,
            })
        }
        ("whoami", []) => Ok(Command::run(Action::Whoami)),
        ("create" | "update", [id, title @ .., amount]) if !title.is_empty() => {
            let (id, title, amount) = (id.to_string(), title.join(" "), amount.to_string());
            let action = if name == "create" {
                Action::Create { id, title, amount }
            } else {
                Action::Update { id, title, amount }
            };
            Ok(Command::run(action))
        }
        ("create" | "update", _) => Err(format!("usage: {} <id> <title...> <amount>", name)),
        ("delete", [id]) => Ok(Command::run(Action::Delete { id: id.to_string() })),
        ("get", [id]) => Ok(Command::run(Action::GetOne { id: id.to_string() })),
        ("list", []) => Ok(Command::run(Action::GetAll)),
        ("logs", []) => Ok(Command::run(Action::GetLogs)),
        _ if COMMANDS.contains(&name) => Err(format!("wrong arguments for '{}', see 'help'", name)),
        _ => Err(format!("unknown command '{}', see 'help'", name)),
    }
}
