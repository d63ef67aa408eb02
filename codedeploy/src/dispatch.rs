use serde_json::Value;

use crate::{
    connector::CodeDeployApi,
    error::FactsError,
    params::{RemoteParams, build_params},
    query::QueryKind,
    request::QueryRequest,
};

/// Picks the remote call for a query, validates and translates its
/// parameters, and passes the result through untouched.
#[derive(Debug, Clone, Copy)]
pub struct QueryDispatcher {
    client_available: bool,
}

impl QueryDispatcher {
    /// `client_available` is resolved once at startup by whoever builds the
    /// client.
    pub fn new(client_available: bool) -> Self {
        Self { client_available }
    }

    /// Checks `request` and builds its remote parameters without touching the
    /// client.
    pub fn validate(request: &QueryRequest) -> Result<RemoteParams, FactsError> {
        build_params(request.query, request)
    }

    pub async fn execute(&self, request: &QueryRequest, client: &dyn CodeDeployApi) -> Result<Value, FactsError> {
        if !self.client_available {
            return Err(FactsError::ClientUnavailable(String::from(
                "no AWS credentials could be resolved",
            )));
        }

        let kind = request.query;
        let params = Self::validate(request)?;

        tracing::debug!(
            "codedeploy:{} with params [{}]",
            kind.operation(),
            params.keys().collect::<Vec<_>>().join(", ")
        );

        let result = match kind {
            QueryKind::ListApplications => client.list_applications(&params).await,
            QueryKind::ListDeploymentConfigs => client.list_deployment_configs(&params).await,
            QueryKind::ListDeploymentGroups => client.list_deployment_groups(&params).await,
            QueryKind::ListDeploymentInstances => client.list_deployment_instances(&params).await,
            QueryKind::ListDeployments => client.list_deployments(&params).await,
            QueryKind::ListOnPremisesInstances => client.list_on_premises_instances(&params).await,
        };

        result.map_err(|e| {
            tracing::error!("Failed to call codedeploy:{}: {}", kind.operation(), e);
            FactsError::RemoteCall {
                operation: kind.operation(),
                message:   format!("{:#}", e),
            }
        })
    }
}
