use crate::cli::{
    actions::{Action, UserChanges},
    globals::GlobalArgs,
};
use crate::models::{NewUser, UserProfile};
use crate::transport::Credentials;
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;
use std::time::Duration;

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .map(ToString::to_string)
        .ok_or_else(|| anyhow!("missing required argument: --{id}"))
}

fn groups(matches: &ArgMatches) -> Option<Vec<String>> {
    matches
        .get_many::<String>("groups")
        .map(|groups| groups.map(ToString::to_string).collect())
}

fn credentials(matches: &ArgMatches) -> Credentials {
    let secret = |id: &str| {
        matches
            .get_one::<String>(id)
            .map(|s| SecretString::from(s.to_string()))
    };

    if let (Some(username), Some(password)) =
        (matches.get_one::<String>("username"), secret("password"))
    {
        return Credentials::Basic {
            username: username.to_string(),
            password,
        };
    }
    if let Some(key) = secret("api-key") {
        return Credentials::ApiKey(key);
    }
    if let Some(token) = secret("access-token") {
        return Credentials::AccessToken(token);
    }
    Credentials::Anonymous
}

/// Build the connection settings from the top level arguments.
/// # Errors
/// Returns an error if `--url` is missing.
pub fn globals(matches: &ArgMatches) -> Result<GlobalArgs> {
    let mut globals = GlobalArgs::new(required(matches, "url")?);
    globals.set_credentials(credentials(matches));
    globals.timeout = Duration::from_secs(matches.get_one::<u64>("timeout").copied().unwrap_or(30));
    globals.verify_tls = !matches.get_flag("insecure");
    Ok(globals)
}

/// Turn the parsed subcommand into an `Action`.
/// # Errors
/// Returns an error if the subcommand or one of its required arguments is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (subcommand, sub_m) = matches.subcommand().context("missing subcommand")?;

    let action = match subcommand {
        "get" => Action::Get {
            name: required(sub_m, "name")?,
        },
        "list" => Action::List,
        "create" => {
            let profile = UserProfile {
                admin: sub_m.get_flag("admin"),
                profile_updatable: !sub_m.get_flag("no-profile-updatable"),
                disable_ui_access: sub_m.get_flag("disable-ui-access"),
                internal_password_disabled: sub_m.get_flag("internal-password-disabled"),
                groups: groups(sub_m),
                ..UserProfile::default()
            };
            let user = NewUser::new(
                required(sub_m, "name")?,
                required(sub_m, "email")?,
                SecretString::from(required(sub_m, "user-password")?),
            )
            .with_profile(profile);
            Action::Create { user }
        }
        "update" => Action::Update {
            name: required(sub_m, "name")?,
            changes: UserChanges {
                email: sub_m.get_one::<String>("email").map(ToString::to_string),
                admin: sub_m.get_one::<bool>("admin").copied(),
                profile_updatable: sub_m.get_one::<bool>("profile-updatable").copied(),
                disable_ui_access: sub_m.get_one::<bool>("disable-ui-access").copied(),
                internal_password_disabled: sub_m
                    .get_one::<bool>("internal-password-disabled")
                    .copied(),
                groups: groups(sub_m),
            },
        },
        "delete" => Action::Delete {
            name: required(sub_m, "name")?,
        },
        "unlock" => Action::Unlock {
            name: required(sub_m, "name")?,
        },
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use secrecy::ExposeSecret;

    const URL: &str = "https://repo.tld/artifactory";

    fn matches(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["artifactory-users", "--url", URL];
        argv.extend_from_slice(args);
        temp_env::with_vars(
            [
                ("ARTIFACTORY_USERNAME", None::<&str>),
                ("ARTIFACTORY_PASSWORD", None),
                ("ARTIFACTORY_API_KEY", None),
                ("ARTIFACTORY_ACCESS_TOKEN", None),
            ],
            || commands::new().get_matches_from(argv),
        )
    }

    #[test]
    fn test_globals_basic_auth() {
        let m = matches(&["--username", "admin", "--password", "secret", "--insecure", "list"]);
        let globals = globals(&m).unwrap();
        assert_eq!(globals.url, URL);
        assert!(!globals.verify_tls);
        match globals.credentials {
            Credentials::Basic { username, password } => {
                assert_eq!(username, "admin");
                assert_eq!(password.expose_secret(), "secret");
            }
            other => panic!("unexpected credentials: {other:?}"),
        }
    }

    #[test]
    fn test_globals_access_token() {
        let m = matches(&["--access-token", "token", "--timeout", "7", "list"]);
        let globals = globals(&m).unwrap();
        assert_eq!(globals.timeout, Duration::from_secs(7));
        assert!(matches!(globals.credentials, Credentials::AccessToken(_)));
    }

    #[test]
    fn test_handler_create() {
        let m = matches(&[
            "create",
            "alice",
            "--email",
            "alice@example.com",
            "--user-password",
            "s3cret",
            "--no-profile-updatable",
            "--groups",
            "readers",
        ]);
        match handler(&m).unwrap() {
            Action::Create { user } => {
                assert_eq!(user.name, "alice");
                assert_eq!(user.email, "alice@example.com");
                assert_eq!(user.password.expose_secret(), "s3cret");
                assert!(!user.profile.profile_updatable);
                assert!(!user.profile.admin);
                assert_eq!(user.profile.groups, Some(vec!["readers".to_string()]));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_handler_update() {
        let m = matches(&["update", "alice", "--disable-ui-access", "true"]);
        match handler(&m).unwrap() {
            Action::Update { name, changes } => {
                assert_eq!(name, "alice");
                assert_eq!(
                    changes,
                    UserChanges {
                        disable_ui_access: Some(true),
                        ..UserChanges::default()
                    }
                );
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_handler_unlock() {
        let m = matches(&["unlock", "bob"]);
        assert!(matches!(handler(&m).unwrap(), Action::Unlock { name } if name == "bob"));
    }
}
