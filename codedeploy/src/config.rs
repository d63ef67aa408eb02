use serde::{Deserialize, Serialize};

use aws_facts_core::{
    config::{SdkOptions, StaticCredentials, TimeoutConfig},
    impl_aws_config,
};

use crate::request::ConnectionArgs;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CodeDeployConfig {
    pub account_id:     Option<String>,
    pub endpoint_url:   Option<String>,
    pub region:         Option<String>,
    pub profile:        Option<String>,
    pub timeout_config: Option<TimeoutConfig>,
    pub sts_region:     String,
    pub verify_account: bool,
}

impl_aws_config!(CodeDeployConfig, "aws/codedeploy/config.ron");

impl CodeDeployConfig {
    /// Connection arguments given for this invocation take precedence over
    /// the config file.
    pub fn apply(mut self, connection: &ConnectionArgs) -> Self {
        if let Some(region) = &connection.region {
            self.region = Some(region.clone());
        }
        if let Some(profile) = &connection.profile {
            self.profile = Some(profile.clone());
        }
        if let Some(endpoint_url) = &connection.endpoint_url {
            self.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(account_id) = &connection.account_id {
            self.account_id = Some(account_id.clone());
        }
        self
    }

    /// Static credentials never come from the config file, only from the
    /// invocation.
    pub fn sdk_options(&self, credentials: Option<StaticCredentials>) -> SdkOptions {
        SdkOptions {
            region: self.region.clone(),
            profile: self.profile.clone(),
            endpoint_url: self.endpoint_url.clone(),
            credentials,
            timeouts: self.timeout_config.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_facts_core::config::AwsServiceConfig;

    use super::*;

    #[tokio::test]
    async fn service_file_wins_over_shared_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws/codedeploy")).unwrap();
        std::fs::write(dir.path().join("aws/config.ron"), r#"(region: "us-west-2")"#).unwrap();
        std::fs::write(dir.path().join("aws/codedeploy/config.ron"), r#"(region: "eu-west-2")"#).unwrap();

        let config = CodeDeployConfig::try_load(dir.path()).await.unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-2"));
    }

    #[tokio::test]
    async fn shared_file_is_the_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws")).unwrap();
        std::fs::write(
            dir.path().join("aws/config.ron"),
            r#"(region: "us-west-2", account_id: "123456789012", verify_account: true)"#,
        )
        .unwrap();

        let config = CodeDeployConfig::try_load(dir.path()).await.unwrap();
        assert_eq!(config.region.as_deref(), Some("us-west-2"));
        assert_eq!(config.account_id.as_deref(), Some("123456789012"));
        assert!(config.verify_account);
    }

    #[test]
    fn connection_args_override_file_values() {
        let config = CodeDeployConfig {
            region: Some(String::from("us-west-2")),
            profile: Some(String::from("ops")),
            ..Default::default()
        }
        .apply(&ConnectionArgs {
            region: Some(String::from("eu-central-1")),
            ..Default::default()
        });

        assert_eq!(config.region.as_deref(), Some("eu-central-1"));
        assert_eq!(config.profile.as_deref(), Some("ops"));
        assert_eq!(config.sts_region, "us-east-1");
    }

    #[test]
    fn sdk_options_carry_file_settings_and_invocation_credentials() {
        let config = CodeDeployConfig {
            region: Some(String::from("us-west-2")),
            endpoint_url: Some(String::from("http://localhost:4566")),
            ..Default::default()
        };
        let credentials = StaticCredentials {
            access_key_id:     String::from("AKID"),
            secret_access_key: String::from("secret"),
            session_token:     None,
        };

        let options = config.sdk_options(Some(credentials.clone()));
        assert_eq!(options.region.as_deref(), Some("us-west-2"));
        assert_eq!(options.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(options.credentials, Some(credentials));
        assert_eq!(options.timeouts, TimeoutConfig::default());
    }
}
