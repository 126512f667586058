use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::models::User;
use crate::users::ArtifactoryUser;
use anyhow::Result;
use serde::Serialize;
use tracing::info;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle a user action
/// # Errors
/// Returns an error if the transport cannot be built or the Artifactory call fails.
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let users = ArtifactoryUser::new(globals.transport()?);

    match action {
        Action::Get { name } => print_json(&users.get(&name).await?)?,
        Action::List => print_json(&users.list_all().await?)?,
        Action::Create { user } => {
            let created = users.create(&user).await?;
            info!("created user {}", created.name);
            print_json(&created)?;
        }
        Action::Update { name, changes } => {
            let mut user = User::from(users.get(&name).await?);
            changes.apply(&mut user);
            let updated = users.update(&user).await?;
            info!("updated user {}", updated.name);
            print_json(&updated)?;
        }
        Action::Delete { name } => {
            users.delete(&name).await?;
            info!("deleted user {}", name);
        }
        Action::Unlock { name } => {
            users.unlock(&name).await?;
            info!("unlocked user {}", name);
        }
    }

    Ok(())
}
