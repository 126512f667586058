use crate::transport::{ArtifactoryTransport, Credentials, TransportOptions};
use crate::APP_USER_AGENT;
use anyhow::Result;
use std::time::Duration;

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub url: String,
    pub credentials: Credentials,
    pub timeout: Duration,
    pub verify_tls: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(url: String) -> Self {
        Self {
            url,
            credentials: Credentials::Anonymous,
            timeout: TransportOptions::default().timeout,
            verify_tls: true,
        }
    }

    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Build the transport described by these settings.
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn transport(&self) -> Result<ArtifactoryTransport> {
        let options = TransportOptions {
            timeout: self.timeout,
            verify_tls: self.verify_tls,
            ..TransportOptions::default()
        };

        Ok(ArtifactoryTransport::with_options(
            APP_USER_AGENT,
            &self.url,
            self.credentials.clone(),
            &options,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_global_args() {
        let url = "https://repo.tld/artifactory".to_string();
        let args = GlobalArgs::new(url);
        assert_eq!(args.url, "https://repo.tld/artifactory");
        assert!(matches!(args.credentials, Credentials::Anonymous));
        assert_eq!(args.timeout, Duration::from_secs(30));
        assert!(args.verify_tls);
    }

    #[test]
    fn test_transport_keeps_base_url() {
        let mut args = GlobalArgs::new("https://repo.tld/artifactory".to_string());
        args.set_credentials(Credentials::ApiKey(SecretString::from("key".to_string())));

        let transport = args.transport().unwrap();
        assert_eq!(transport.base_url().as_str(), "https://repo.tld/artifactory");
    }

    #[test]
    fn test_transport_rejects_bad_url() {
        let args = GlobalArgs::new("repo.tld".to_string());
        assert!(args.transport().is_err());
    }
}
