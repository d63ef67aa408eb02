use serde_json::Value;

use aws_facts_core::config::{AwsServiceConfig, load_sdk_config};

use crate::{
    cli::Cli,
    config::CodeDeployConfig,
    connector::{CodeDeployConnector, credentials_resolvable},
    dispatch::QueryDispatcher,
};

/// One invocation end to end. Input is fully validated before config files,
/// STS or credentials are looked at.
pub async fn run(cli: &Cli) -> anyhow::Result<Value> {
    let args = cli.module_args()?;
    let connection = args.connection()?;
    let request = args.into_request()?;

    QueryDispatcher::validate(&request)?;

    let config = CodeDeployConfig::try_load(&cli.config_prefix).await?.apply(&connection);
    let sdk_config = load_sdk_config(&config.sdk_options(connection.credentials.clone())).await;

    if config.verify_account || config.account_id.is_some() {
        let account_id = config.verify_sts(&sdk_config).await?;
        tracing::info!("Verified credentials for account {}", account_id);
    }

    let dispatcher = QueryDispatcher::new(credentials_resolvable(&sdk_config).await);
    let connector = CodeDeployConnector::new(&sdk_config);

    Ok(dispatcher.execute(&request, &connector).await?)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::error::FactsError;

    async fn run_args(args: &[&str]) -> anyhow::Error {
        let cli = Cli::try_parse_from(std::iter::once("codedeploy-facts").chain(args.iter().copied())).unwrap();
        run(&cli).await.unwrap_err()
    }

    #[tokio::test]
    async fn validation_comes_before_account_verification() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_args(&[
            "--query",
            "list_deployment_groups",
            "--account-id",
            "123456789012",
            "--config-prefix",
            dir.path().to_str().unwrap(),
        ])
        .await;

        match err.downcast_ref::<FactsError>() {
            Some(FactsError::Validation(msg)) => assert_eq!(msg, "application_name is required"),
            other => panic!("expected a validation error, got {other:?} ({err:#})"),
        }
    }

    #[tokio::test]
    async fn validation_comes_before_config_driven_verification() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("aws")).unwrap();
        std::fs::write(dir.path().join("aws/config.ron"), "(verify_account: true)").unwrap();

        let err = run_args(&[
            "--query",
            "list_deployments",
            "--deployment-group-name",
            "Production",
            "--config-prefix",
            dir.path().to_str().unwrap(),
        ])
        .await;

        assert!(matches!(err.downcast_ref::<FactsError>(), Some(FactsError::Validation(_))));
        assert_eq!(err.to_string(), "application_name is required when deployment_group_name used");
    }

    #[tokio::test]
    async fn bad_connection_args_fail_before_anything_else() {
        let err = run_args(&["--query", "list_applications", "--aws-access-key", "AKID"]).await;
        assert!(matches!(err.downcast_ref::<FactsError>(), Some(FactsError::Config(_))));
    }
}
