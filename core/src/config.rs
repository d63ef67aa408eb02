use std::{path::Path, time::Duration};

use anyhow::bail;
use aws_config::{BehaviorVersion, Region, meta::region::RegionProviderChain};
pub use aws_config::SdkConfig;
use aws_credential_types::Credentials;
use serde::{Deserialize, Serialize};

use crate::util::RON;

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TimeoutConfig {
    #[serde(default = "default_timeout_secs")]
    pub connect_secs:   u64,
    #[serde(default = "default_timeout_secs")]
    pub operation_secs: u64,
    #[serde(default = "default_timeout_secs")]
    pub read_secs:      u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs:   default_timeout_secs(),
            operation_secs: default_timeout_secs(),
            read_secs:      default_timeout_secs(),
        }
    }
}

impl TimeoutConfig {
    pub fn to_sdk(&self) -> aws_config::timeout::TimeoutConfig {
        aws_config::timeout::TimeoutConfig::builder()
            .connect_timeout(Duration::from_secs(self.connect_secs))
            .operation_timeout(Duration::from_secs(self.operation_secs))
            .operation_attempt_timeout(Duration::from_secs(self.operation_secs))
            .read_timeout(Duration::from_secs(self.read_secs))
            .build()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct AwsFactsConfig {
    pub account_id:     Option<String>,
    pub endpoint_url:   Option<String>,
    pub region:         Option<String>,
    pub profile:        Option<String>,
    pub timeout_config: Option<TimeoutConfig>,
    pub sts_region:     String,
    pub verify_account: bool,
}

impl Default for AwsFactsConfig {
    fn default() -> Self {
        Self {
            account_id:     Default::default(),
            endpoint_url:   Default::default(),
            region:         Default::default(),
            profile:        Default::default(),
            timeout_config: Default::default(),
            sts_region:     String::from("us-east-1"),
            verify_account: false,
        }
    }
}

impl AwsFactsConfig {
    pub fn try_load(prefix: &Path) -> anyhow::Result<AwsFactsConfig> {
        let config_path = prefix.join("aws/config.ron");
        if config_path.is_file() {
            tracing::info!("Loading aws-facts config file at {:?}", config_path);
            let config: AwsFactsConfig = RON.from_str(&std::fs::read_to_string(config_path)?)?;
            Ok(config)
        } else {
            tracing::info!("aws-facts config file at {:?} not present, skipping.", config_path);
            Ok(AwsFactsConfig::default())
        }
    }
}

/// Static keys handed over with the invocation, used in place of the
/// default credentials chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id:     String,
    pub secret_access_key: String,
    pub session_token:     Option<String>,
}

impl StaticCredentials {
    fn into_credentials(self) -> Credentials {
        Credentials::new(
            self.access_key_id,
            self.secret_access_key,
            self.session_token,
            None,
            "aws-facts-static",
        )
    }
}

/// Everything that decides how the SDK connects for one invocation.
#[derive(Debug, Clone, Default)]
pub struct SdkOptions {
    pub region:       Option<String>,
    pub profile:      Option<String>,
    pub endpoint_url: Option<String>,
    pub credentials:  Option<StaticCredentials>,
    pub timeouts:     TimeoutConfig,
}

/// Resolves an SDK config. An explicit region wins, otherwise the default
/// provider chain (env, profile, IMDS) decides. Static credentials replace
/// the default credentials chain.
pub async fn load_sdk_config(options: &SdkOptions) -> SdkConfig {
    let region = match options.region.clone() {
        Some(region) => RegionProviderChain::first_try(Region::new(region)).or_default_provider(),
        None => RegionProviderChain::default_provider(),
    };

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .timeout_config(options.timeouts.to_sdk());

    if let Some(profile) = &options.profile {
        loader = loader.profile_name(profile);
    }

    if let Some(endpoint_url) = &options.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    if let Some(credentials) = options.credentials.clone() {
        loader = loader.credentials_provider(credentials.into_credentials());
    }

    loader.load().await
}

// Only the region differs from the config the queries use.
fn sts_config(sdk_config: &SdkConfig, sts_region: String) -> aws_sdk_sts::Config {
    aws_sdk_sts::config::Builder::from(sdk_config)
        .region(Region::new(sts_region))
        .build()
}

/// Checks the identity behind `sdk_config` with sts:GetCallerIdentity, using
/// the same profile, endpoint, credentials and timeouts as the queries.
pub async fn verify_sts_account_id(
    sdk_config: &SdkConfig,
    sts_region: String,
    account_id: Option<String>,
) -> anyhow::Result<String> {
    let sts_client = aws_sdk_sts::Client::from_conf(sts_config(sdk_config, sts_region));
    let caller_identity = sts_client.get_caller_identity().send().await;

    match caller_identity {
        Ok(caller_identity) => {
            let Some(caller_account_id) = caller_identity.account else {
                bail!("Failed to get current account ID!");
            };

            if let Some(account_id) = account_id
                && caller_account_id != account_id {
                    bail!(
                        "AWS: Account ID mismatch. Configured to use account ID {account_id}, \nbut credentials provided are for account ID {caller_account_id}."
                    )
                }
            Ok(caller_account_id)
        }
        Err(e) => {
            tracing::error!("Failed to call sts:GetCallerIdentity: {}", e);
            Err(e.into())
        }
    }
}

pub trait AwsServiceConfig: From<AwsFactsConfig> {
    async fn try_load(prefix: &Path) -> anyhow::Result<Self>;
    async fn verify_sts(&self, sdk_config: &SdkConfig) -> anyhow::Result<String>;
}

/// Implements `From<AwsFactsConfig>`, `Default` and `AwsServiceConfig` for a
/// service config struct carrying the same fields as `AwsFactsConfig`.
/// `$path` is the service-specific file, relative to the config prefix.
#[macro_export]
macro_rules! impl_aws_config {
    ($type:ty, $path:expr) => {
        impl From<$crate::config::AwsFactsConfig> for $type {
            fn from(value: $crate::config::AwsFactsConfig) -> Self {
                Self {
                    account_id:     value.account_id,
                    endpoint_url:   value.endpoint_url,
                    region:         value.region,
                    profile:        value.profile,
                    timeout_config: value.timeout_config,
                    sts_region:     value.sts_region,
                    verify_account: value.verify_account,
                }
            }
        }

        impl Default for $type {
            fn default() -> Self {
                Self::from($crate::config::AwsFactsConfig::default())
            }
        }

        impl $crate::config::AwsServiceConfig for $type {
            async fn try_load(prefix: &std::path::Path) -> anyhow::Result<Self> {
                let config_path = prefix.join($path);
                if config_path.is_file() {
                    tracing::info!("Loading service config file at {:?}", config_path);
                    let config: $type = $crate::util::RON.from_str(&std::fs::read_to_string(config_path)?)?;
                    return Ok(config);
                } else {
                    return Ok(<$type>::from($crate::config::AwsFactsConfig::try_load(prefix)?));
                }
            }

            async fn verify_sts(&self, sdk_config: &$crate::config::SdkConfig) -> anyhow::Result<String> {
                $crate::config::verify_sts_account_id(sdk_config, self.sts_region.clone(), self.account_id.clone())
                    .await
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AwsFactsConfig::try_load(dir.path()).unwrap();
        assert_eq!(config, AwsFactsConfig::default());
        assert_eq!(config.sts_region, "us-east-1");
        assert!(!config.verify_account);
    }

    #[test]
    fn partial_file_keeps_defaults_for_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws")).unwrap();
        std::fs::write(
            dir.path().join("aws/config.ron"),
            r#"(region: "eu-west-1", timeout_config: (connect_secs: 5))"#,
        )
        .unwrap();

        let config = AwsFactsConfig::try_load(dir.path()).unwrap();
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert_eq!(config.sts_region, "us-east-1");

        let timeouts = config.timeout_config.unwrap();
        assert_eq!(timeouts.connect_secs, 5);
        assert_eq!(timeouts.operation_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws")).unwrap();
        std::fs::write(dir.path().join("aws/config.ron"), "(region: ").unwrap();

        assert!(AwsFactsConfig::try_load(dir.path()).is_err());
    }

    #[tokio::test]
    async fn static_credentials_and_endpoint_reach_the_sdk_config() {
        use aws_credential_types::provider::ProvideCredentials;

        let sdk_config = load_sdk_config(&SdkOptions {
            region: Some(String::from("eu-west-1")),
            endpoint_url: Some(String::from("http://localhost:4566")),
            credentials: Some(StaticCredentials {
                access_key_id:     String::from("AKIDEXAMPLE"),
                secret_access_key: String::from("secret"),
                session_token:     Some(String::from("token")),
            }),
            ..Default::default()
        })
        .await;

        assert_eq!(sdk_config.region().map(|r| r.as_ref()), Some("eu-west-1"));
        assert_eq!(sdk_config.endpoint_url(), Some("http://localhost:4566"));

        let credentials = sdk_config
            .credentials_provider()
            .expect("credentials provider must be set")
            .provide_credentials()
            .await
            .unwrap();
        assert_eq!(credentials.access_key_id(), "AKIDEXAMPLE");
        assert_eq!(credentials.secret_access_key(), "secret");
        assert_eq!(credentials.session_token(), Some("token"));
    }

    #[tokio::test]
    async fn sts_keeps_the_query_credentials_and_swaps_the_region() {
        use aws_credential_types::provider::ProvideCredentials;

        let sdk_config = load_sdk_config(&SdkOptions {
            region: Some(String::from("eu-west-1")),
            credentials: Some(StaticCredentials {
                access_key_id:     String::from("AKIDEXAMPLE"),
                secret_access_key: String::from("secret"),
                session_token:     None,
            }),
            ..Default::default()
        })
        .await;

        let sts = sts_config(&sdk_config, String::from("us-east-1"));
        assert_eq!(sts.region().map(|r| r.as_ref()), Some("us-east-1"));

        let credentials = sts
            .credentials_provider()
            .expect("credentials provider must be carried over")
            .provide_credentials()
            .await
            .unwrap();
        assert_eq!(credentials.access_key_id(), "AKIDEXAMPLE");
    }
}
