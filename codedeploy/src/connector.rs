use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_codedeploy::config::ProvideCredentials;
use serde_json::Value;

use crate::params::RemoteParams;

pub mod list;

/// The authenticated CodeDeploy surface the dispatcher talks to: one method
/// per query kind, each taking API-cased parameters and handing back the raw
/// response object.
#[async_trait]
pub trait CodeDeployApi: Send + Sync {
    async fn list_applications(&self, params: &RemoteParams) -> anyhow::Result<Value>;
    async fn list_deployment_configs(&self, params: &RemoteParams) -> anyhow::Result<Value>;
    async fn list_deployment_groups(&self, params: &RemoteParams) -> anyhow::Result<Value>;
    async fn list_deployment_instances(&self, params: &RemoteParams) -> anyhow::Result<Value>;
    async fn list_deployments(&self, params: &RemoteParams) -> anyhow::Result<Value>;
    async fn list_on_premises_instances(&self, params: &RemoteParams) -> anyhow::Result<Value>;
}

pub struct CodeDeployConnector {
    client: aws_sdk_codedeploy::Client,
}

impl CodeDeployConnector {
    pub fn new(config: &SdkConfig) -> Self {
        let client = aws_sdk_codedeploy::Client::new(config);
        CodeDeployConnector { client }
    }
}

/// Tries the configured credentials provider once. The answer is what the
/// dispatcher is built with; it is never rechecked per call.
pub async fn credentials_resolvable(config: &SdkConfig) -> bool {
    let Some(provider) = config.credentials_provider() else {
        tracing::warn!("No AWS credentials provider configured");
        return false;
    };

    match provider.provide_credentials().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!("Failed to resolve AWS credentials: {}", e);
            false
        }
    }
}
