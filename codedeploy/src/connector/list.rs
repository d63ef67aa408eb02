use async_trait::async_trait;
use aws_sdk_codedeploy::{error::DisplayErrorContext, types::RegistrationStatus};
use serde_json::Value;

use crate::{
    params::{
        APPLICATION_NAME, DEPLOYMENT_GROUP_NAME, DEPLOYMENT_ID, INSTANCE_STATUS_FILTER, NEXT_TOKEN,
        REGISTRATION_STATUS, RemoteParams,
    },
    util::{page_output, split_list},
};

use super::{CodeDeployApi, CodeDeployConnector};

fn sdk_error<E: std::error::Error>(e: E) -> anyhow::Error {
    anyhow::anyhow!("{}", DisplayErrorContext(e))
}

// Single page per call. The continuation token is forwarded, never followed.
#[async_trait]
impl CodeDeployApi for CodeDeployConnector {
    async fn list_applications(&self, params: &RemoteParams) -> anyhow::Result<Value> {
        let list_result = self
            .client
            .list_applications()
            .set_next_token(params.cloned(NEXT_TOKEN))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Value::Object(page_output(
            "applications",
            list_result.applications(),
            list_result.next_token(),
        )))
    }

    async fn list_deployment_configs(&self, params: &RemoteParams) -> anyhow::Result<Value> {
        let list_result = self
            .client
            .list_deployment_configs()
            .set_next_token(params.cloned(NEXT_TOKEN))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Value::Object(page_output(
            "deploymentConfigsList",
            list_result.deployment_configs_list(),
            list_result.next_token(),
        )))
    }

    async fn list_deployment_groups(&self, params: &RemoteParams) -> anyhow::Result<Value> {
        let list_result = self
            .client
            .list_deployment_groups()
            .set_application_name(params.cloned(APPLICATION_NAME))
            .set_next_token(params.cloned(NEXT_TOKEN))
            .send()
            .await
            .map_err(sdk_error)?;

        let mut out = page_output(
            "deploymentGroups",
            list_result.deployment_groups(),
            list_result.next_token(),
        );
        if let Some(application_name) = list_result.application_name() {
            out.insert(String::from("applicationName"), Value::String(application_name.to_string()));
        }

        Ok(Value::Object(out))
    }

    // ListDeploymentInstances and InstanceStatus are deprecated upstream but
    // still served, and this query needs them.
    #[allow(deprecated)]
    async fn list_deployment_instances(&self, params: &RemoteParams) -> anyhow::Result<Value> {
        use aws_sdk_codedeploy::types::InstanceStatus;

        let status_filter = params.get(INSTANCE_STATUS_FILTER).map(|filter| {
            split_list(filter)
                .iter()
                .map(|status| InstanceStatus::from(status.as_str()))
                .collect::<Vec<_>>()
        });

        let list_result = self
            .client
            .list_deployment_instances()
            .set_deployment_id(params.cloned(DEPLOYMENT_ID))
            .set_instance_status_filter(status_filter)
            .set_next_token(params.cloned(NEXT_TOKEN))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Value::Object(page_output(
            "instancesList",
            list_result.instances_list(),
            list_result.next_token(),
        )))
    }

    async fn list_deployments(&self, params: &RemoteParams) -> anyhow::Result<Value> {
        let list_result = self
            .client
            .list_deployments()
            .set_application_name(params.cloned(APPLICATION_NAME))
            .set_deployment_group_name(params.cloned(DEPLOYMENT_GROUP_NAME))
            .set_next_token(params.cloned(NEXT_TOKEN))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Value::Object(page_output(
            "deployments",
            list_result.deployments(),
            list_result.next_token(),
        )))
    }

    async fn list_on_premises_instances(&self, params: &RemoteParams) -> anyhow::Result<Value> {
        let list_result = self
            .client
            .list_on_premises_instances()
            .set_registration_status(params.get(REGISTRATION_STATUS).map(RegistrationStatus::from))
            .set_next_token(params.cloned(NEXT_TOKEN))
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(Value::Object(page_output(
            "instanceNames",
            list_result.instance_names(),
            list_result.next_token(),
        )))
    }
}
