use anyhow::Result;
use artifactory_users::cli::{actions, start};

// Main function
#[tokio::main]
async fn main() -> Result<()> {
    // Start the program
    let (action, globals) = start()?;

    // Handle the action
    actions::users::handle(action, &globals).await?;

    Ok(())
}
