use adopta_users::PetId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Quit,
    Login { username: String, password: String },
    Register,
    Logout,
    Whoami,
    /// Navbar search box; the rest of the line is the term
    Search(String),
    /// Logo click
    Home,
    Wall { all: bool },
    Pet(PetId),
    Adopt(PetId),
    Publish,
    Mine,
    Admin,
    Delete(PetId),
    Profile,
    EditProfile,
    Open(String),
    Nav,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try /help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("not a pet id: {0}")]
    InvalidId(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim_start();
        let (name, rest) = match line.split_once(' ') {
            Some((name, rest)) => (name, rest),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();

        let command = match name {
            "/help" | "/h" => ConsoleCommand::Help,
            "/quit" | "/exit" | "/q" => ConsoleCommand::Quit,
            "/login" => match (args.next(), args.next()) {
                (Some(username), Some(password)) => ConsoleCommand::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                },
                _ => return Err(CommandError::Usage("/login <user> <password>")),
            },
            "/register" => ConsoleCommand::Register,
            "/logout" => ConsoleCommand::Logout,
            "/whoami" | "/me" => ConsoleCommand::Whoami,
            "/search" | "/s" => ConsoleCommand::Search(rest.to_string()),
            "/home" => ConsoleCommand::Home,
            "/wall" | "/muro" => ConsoleCommand::Wall {
                all: args.next() == Some("all"),
            },
            "/pet" => ConsoleCommand::Pet(pet_id(args.next(), "/pet <id>")?),
            "/adopt" => ConsoleCommand::Adopt(pet_id(args.next(), "/adopt <id>")?),
            "/publish" => ConsoleCommand::Publish,
            "/mine" => ConsoleCommand::Mine,
            "/admin" => ConsoleCommand::Admin,
            "/delete" => ConsoleCommand::Delete(pet_id(args.next(), "/delete <id>")?),
            "/profile" => ConsoleCommand::Profile,
            "/edit-profile" => ConsoleCommand::EditProfile,
            "/open" => match args.next() {
                Some(path) => ConsoleCommand::Open(path.to_string()),
                None => return Err(CommandError::Usage("/open <path>")),
            },
            "/nav" => ConsoleCommand::Nav,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn pet_id(arg: Option<&str>, usage: &'static str) -> Result<PetId, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

pub const HELP: &str = "\
Available commands:
  /help, /h                 - Show this help
  /login <user> <password>  - Sign in
  /register                 - Create an account
  /logout                   - Sign out
  /whoami                   - Show the current session
  /search <term>            - Filter the wall by species
  /home                     - Clear the search and go home
  /wall [all]               - Show the adoption wall
  /pet <id>                 - Show a pet
  /adopt <id>               - Adopt a pet
  /publish                  - Publish a pet
  /mine                     - Pets you published
  /admin                    - Admin dashboard
  /delete <id>              - Delete a listing
  /profile                  - Show your profile
  /edit-profile             - Edit your profile
  /open <path>              - Open a view by path
  /nav                      - Show the navbar links
  /quit, /exit, /q          - Exit console";
