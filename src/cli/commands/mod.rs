use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ArgAction, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 4 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

fn name_arg() -> Arg {
    Arg::new("name")
        .help("User name")
        .required(true)
}

fn groups_arg() -> Arg {
    Arg::new("groups")
        .long("groups")
        .help("Comma separated list of groups")
        .value_delimiter(',')
        .action(ArgAction::Append)
}

fn toggle_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .value_name("BOOL")
        .value_parser(clap::value_parser!(bool))
}

fn subcommand_create() -> Command {
    Command::new("create")
        .about("Create a user, failing if it already exists")
        .arg(name_arg())
        .arg(
            Arg::new("email")
                .long("email")
                .help("User email")
                .required(true),
        )
        .arg(
            Arg::new("user-password")
                .long("user-password")
                .help("Password of the new user")
                .env("ARTIFACTORY_USER_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
        .arg(
            Arg::new("admin")
                .long("admin")
                .help("Grant administrator privileges")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-profile-updatable")
                .long("no-profile-updatable")
                .help("Prevent the user from updating its profile")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("disable-ui-access")
                .long("disable-ui-access")
                .help("Disable access to the web UI")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("internal-password-disabled")
                .long("internal-password-disabled")
                .help("Disable the internal password")
                .action(ArgAction::SetTrue),
        )
        .arg(groups_arg())
}

fn subcommand_update() -> Command {
    Command::new("update")
        .about("Update an existing user")
        .arg(name_arg())
        .arg(Arg::new("email").long("email").help("User email"))
        .arg(toggle_arg("admin", "Administrator privileges"))
        .arg(toggle_arg(
            "profile-updatable",
            "Whether the user can update its profile",
        ))
        .arg(toggle_arg("disable-ui-access", "Disable access to the web UI"))
        .arg(toggle_arg(
            "internal-password-disabled",
            "Disable the internal password",
        ))
        .arg(groups_arg())
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("artifactory-users")
        .about("Manage Artifactory users")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("url")
                .short('u')
                .long("url")
                .help("Artifactory base URL, example: https://repo.tld/artifactory")
                .env("ARTIFACTORY_URL")
                .required(true),
        )
        .arg(
            Arg::new("username")
                .long("username")
                .help("Username for basic authentication")
                .env("ARTIFACTORY_USERNAME")
                .global(true)
                .requires("password")
                .conflicts_with_all(["api-key", "access-token"]),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password for basic authentication")
                .env("ARTIFACTORY_PASSWORD")
                .hide_env_values(true)
                .global(true)
                .requires("username"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .help("Artifactory API key")
                .env("ARTIFACTORY_API_KEY")
                .hide_env_values(true)
                .global(true)
                .conflicts_with("access-token"),
        )
        .arg(
            Arg::new("access-token")
                .long("access-token")
                .help("Artifactory access token")
                .env("ARTIFACTORY_ACCESS_TOKEN")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("30")
                .env("ARTIFACTORY_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new("insecure")
                .long("insecure")
                .help("Accept invalid TLS certificates")
                .env("ARTIFACTORY_INSECURE")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("Emit logs as JSON")
                .env("ARTIFACTORY_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("ARTIFACTORY_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .subcommand(Command::new("get").about("Show a user").arg(name_arg()))
        .subcommand(Command::new("list").about("List all users"))
        .subcommand(subcommand_create())
        .subcommand(subcommand_update())
        .subcommand(Command::new("delete").about("Delete a user").arg(name_arg()))
        .subcommand(
            Command::new("unlock")
                .about("Unlock a user locked out after failed logins")
                .arg(name_arg()),
        )
}
