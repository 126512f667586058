//! Typed client for the Artifactory user management API.
//!
//! ```no_run
//! use artifactory_users::{ArtifactoryTransport, ArtifactoryUser, Credentials};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), artifactory_users::Error> {
//! let transport = ArtifactoryTransport::new(
//!     "my-tool/1.0",
//!     "https://repo.example.com/artifactory",
//!     Credentials::AccessToken(SecretString::from("token".to_string())),
//! )?;
//! let users = ArtifactoryUser::new(transport);
//! for user in users.list_all().await? {
//!     println!("{}", user.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod error;
pub mod models;
pub mod transport;
pub mod users;

pub use error::{Error, Result, TransportError};
pub use models::{NewUser, SimpleUser, User, UserProfile, UserResponse};
pub use transport::{ArtifactoryResponse, ArtifactoryTransport, Credentials, TransportOptions};
pub use users::ArtifactoryUser;

pub static APP_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
