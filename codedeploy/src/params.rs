use aws_facts_core::util::non_empty;
use indexmap::IndexMap;

use crate::{error::FactsError, query::QueryKind, request::QueryRequest};

pub const NEXT_TOKEN: &str = "nextToken";
pub const APPLICATION_NAME: &str = "applicationName";
pub const DEPLOYMENT_ID: &str = "deploymentId";
pub const DEPLOYMENT_GROUP_NAME: &str = "deploymentGroupName";
pub const INSTANCE_STATUS_FILTER: &str = "instanceStatusFilter";
pub const REGISTRATION_STATUS: &str = "registrationStatus";

/// Parameters for a single remote call, keyed by the CodeDeploy API's own
/// camelCase names. Built fresh for every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteParams(IndexMap<&'static str, String>);

impl RemoteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, value: impl Into<String>) {
        self.0.insert(key, value.into());
    }

    fn insert_opt(&mut self, key: &'static str, value: &Option<String>) {
        if let Some(value) = present(value) {
            self.insert(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Owned copy of a value, the shape the SDK's `set_*` builders take.
    pub fn cloned(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Empty strings count as missing, however the request was built.
fn present(value: &Option<String>) -> Option<String> {
    non_empty(value.clone())
}

fn require(value: &Option<String>, msg: &str) -> Result<String, FactsError> {
    present(value).ok_or_else(|| FactsError::validation(msg))
}

/// Validates `request` for `kind` and translates it into remote call
/// parameters. Nothing is sent when this fails.
pub fn build_params(kind: QueryKind, request: &QueryRequest) -> Result<RemoteParams, FactsError> {
    let mut params = RemoteParams::new();

    match kind {
        QueryKind::ListApplications | QueryKind::ListDeploymentConfigs => {}
        QueryKind::ListDeploymentGroups => {
            let application_name = require(&request.application_name, "application_name is required")?;
            params.insert(APPLICATION_NAME, application_name);
        }
        QueryKind::ListDeploymentInstances => {
            let deployment_id = require(&request.deployment_id, "deployment_id is required")?;
            params.insert(DEPLOYMENT_ID, deployment_id);
            params.insert_opt(INSTANCE_STATUS_FILTER, &request.instance_status_filter);
        }
        QueryKind::ListDeployments => match (present(&request.application_name), present(&request.deployment_group_name)) {
            (Some(application_name), Some(deployment_group_name)) => {
                params.insert(APPLICATION_NAME, application_name);
                params.insert(DEPLOYMENT_GROUP_NAME, deployment_group_name);
            }
            (None, Some(_)) => {
                return Err(FactsError::validation(
                    "application_name is required when deployment_group_name used",
                ));
            }
            (Some(_), None) => {
                return Err(FactsError::validation(
                    "deployment_group_name is required when application_name used",
                ));
            }
            (None, None) => {}
        },
        QueryKind::ListOnPremisesInstances => {
            params.insert_opt(REGISTRATION_STATUS, &request.registration_status);
        }
    }

    params.insert_opt(NEXT_TOKEN, &request.next_token);

    Ok(params)
}
