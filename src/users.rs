use crate::{
    error::{Error, Result},
    models::{decode_user_list, NewUser, SimpleUser, User, UserResponse},
    transport::ArtifactoryTransport,
};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, error};

const USERS: [&str; 3] = ["api", "security", "users"];
const UNLOCK_USERS: [&str; 3] = ["api", "security", "unlockUsers"];

fn users_path(name: &str) -> [&str; 4] {
    [USERS[0], USERS[1], USERS[2], name]
}

fn check_name(name: &str) -> Result<()> {
    if name.is_empty() {
        error!("User name must not be empty");
        return Err(Error::EmptyName);
    }
    // Dot segments would be resolved away by the URL and hit the collection.
    if matches!(name, "." | "..") {
        error!("Invalid user name {:?}", name);
        return Err(Error::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Client for the `api/security/users` resource.
#[derive(Debug, Clone)]
pub struct ArtifactoryUser {
    transport: ArtifactoryTransport,
}

impl ArtifactoryUser {
    #[must_use]
    pub fn new(transport: ArtifactoryTransport) -> Self {
        Self { transport }
    }

    /// Create a user; never overwrites an existing one.
    /// # Errors
    /// Returns `UserAlreadyExists` if the name resolves, or any error raised by the requests.
    pub async fn create(&self, user: &NewUser) -> Result<UserResponse> {
        let name = user.name.as_str();

        match self.get(name).await {
            Ok(_) => {
                error!("User {} already exists", name);
                return Err(Error::UserAlreadyExists {
                    name: name.to_string(),
                });
            }
            Err(Error::UserNotFound { .. }) => {}
            Err(err) => return Err(err),
        }

        self.transport
            .put_json(&users_path(name), &user.payload())
            .await
            .inspect_err(|err| error!("Failed to create user {}: {}", name, err))?;
        debug!("User {} successfully created", name);

        self.get(name).await
    }

    /// Fetch the canonical record of a user.
    /// # Errors
    /// Returns `UserNotFound` on HTTP 404/400, `Artifactory` on any other failure,
    /// and `Schema` if the body is not a user record.
    pub async fn get(&self, name: &str) -> Result<UserResponse> {
        check_name(name)?;

        match self.transport.get(&users_path(name)).await {
            Ok(response) => {
                debug!("User {} found", name);
                response
                    .json()
                    .map_err(|err| Error::schema("UserResponse", err))
            }
            Err(err)
                if matches!(
                    err.status(),
                    Some(StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST)
                ) =>
            {
                error!("User {} does not exist", name);
                Err(Error::UserNotFound {
                    name: name.to_string(),
                })
            }
            Err(err) => {
                error!("Failed to fetch user {}: {}", name, err);
                Err(Error::Artifactory(err))
            }
        }
    }

    /// List all users.
    /// # Errors
    /// Returns `Artifactory` if the request fails and `Schema` if the body is not a user list.
    pub async fn list_all(&self) -> Result<Vec<SimpleUser>> {
        let response = self.transport.get(&USERS).await.map_err(|err| {
            error!("Failed to list users: {}", err);
            Error::Artifactory(err)
        })?;
        debug!("List all users successful");

        response
            .json::<Value>()
            .and_then(decode_user_list)
            .map_err(|err| {
                error!("Unexpected user list payload: {}", err);
                Error::schema("SimpleUser list", err)
            })
    }

    /// Update an existing user; `lastLoggedIn` and `realm` are never sent.
    /// # Errors
    /// Returns `UserNotFound` if the user does not exist, or any error raised by the requests.
    pub async fn update(&self, user: &User) -> Result<UserResponse> {
        let name = user.name.as_str();
        self.get(name).await?;

        self.transport
            .post_json(&users_path(name), &user.payload())
            .await
            .inspect_err(|err| error!("Failed to update user {}: {}", name, err))?;
        debug!("User {} successfully updated", name);

        self.get(name).await
    }

    /// Delete a user after checking that it exists.
    /// # Errors
    /// Returns `UserNotFound` if the user does not exist, or any error raised by the requests.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.get(name).await?;

        self.transport
            .delete(&users_path(name))
            .await
            .inspect_err(|err| error!("Failed to delete user {}: {}", name, err))?;
        debug!("User {} successfully deleted", name);

        Ok(())
    }

    /// Unlock a user locked out after failed logins.
    ///
    /// Artifactory answers success even when the user does not exist, so no
    /// existence check is made.
    ///
    /// # Errors
    /// Returns `Artifactory` if the request fails.
    pub async fn unlock(&self, name: &str) -> Result<()> {
        check_name(name)?;

        self.transport
            .post(&[UNLOCK_USERS[0], UNLOCK_USERS[1], UNLOCK_USERS[2], name])
            .await
            .inspect_err(|err| error!("Failed to unlock user {}: {}", name, err))?;
        debug!("User {} successfully unlocked", name);

        Ok(())
    }
}
