use std::path::Path;

use aws_facts_core::{config::StaticCredentials, util::non_empty};
use serde::Deserialize;

use crate::{error::FactsError, query::QueryKind};

/// The validated input of one invocation. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub query:                  QueryKind,
    pub next_token:             Option<String>,
    pub application_name:       Option<String>,
    pub deployment_id:          Option<String>,
    pub deployment_group_name:  Option<String>,
    pub instance_status_filter: Option<String>,
    pub registration_status:    Option<String>,
}

impl QueryRequest {
    pub fn new(query: QueryKind) -> Self {
        Self {
            query,
            next_token: None,
            application_name: None,
            deployment_id: None,
            deployment_group_name: None,
            instance_status_filter: None,
            registration_status: None,
        }
    }

    /// Empty strings are treated as not supplied.
    pub fn normalized(self) -> Self {
        Self {
            query:                  self.query,
            next_token:             non_empty(self.next_token),
            application_name:       non_empty(self.application_name),
            deployment_id:          non_empty(self.deployment_id),
            deployment_group_name:  non_empty(self.deployment_group_name),
            instance_status_filter: non_empty(self.instance_status_filter),
            registration_status:    non_empty(self.registration_status),
        }
    }
}

/// Where and as whom to connect. Anything left `None` falls through to the
/// config file and then to the SDK's default chains.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionArgs {
    pub region:       Option<String>,
    pub profile:      Option<String>,
    pub endpoint_url: Option<String>,
    pub account_id:   Option<String>,
    pub credentials:  Option<StaticCredentials>,
}

/// The flat, loosely-typed argument set an orchestration tool hands over,
/// either as an args file or as command line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleArgs {
    pub query: Option<String>,
    pub next_token: Option<String>,
    pub application_name: Option<String>,
    pub deployment_id: Option<String>,
    pub deployment_group_name: Option<String>,
    pub instance_status_filter: Option<String>,
    pub registration_status: Option<String>,

    #[serde(alias = "aws_region", alias = "ec2_region")]
    pub region: Option<String>,
    pub profile: Option<String>,
    #[serde(alias = "ec2_url")]
    pub endpoint_url: Option<String>,
    pub account_id: Option<String>,
    #[serde(alias = "ec2_access_key", alias = "access_key")]
    pub aws_access_key: Option<String>,
    #[serde(alias = "ec2_secret_key", alias = "secret_key")]
    pub aws_secret_key: Option<String>,
    #[serde(alias = "access_token")]
    pub security_token: Option<String>,
    pub validate_certs: Option<bool>,
}

impl ModuleArgs {
    /// Reads a JSON (`.json`) or YAML (anything else) argument file.
    pub fn from_file(path: &Path) -> Result<Self, FactsError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FactsError::Config(format!("failed to read {}: {}", path.display(), e)))?;

        let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&text)
        } else {
            Self::from_yaml(&text)
        }
    }

    pub fn from_json(text: &str) -> Result<Self, FactsError> {
        serde_json::from_str(text).map_err(|e| FactsError::Config(e.to_string()))
    }

    pub fn from_yaml(text: &str) -> Result<Self, FactsError> {
        serde_yaml::from_str(text).map_err(|e| FactsError::Config(e.to_string()))
    }

    /// Every value present in `overrides` replaces the one in `self`.
    pub fn merge(self, overrides: ModuleArgs) -> ModuleArgs {
        ModuleArgs {
            query:                  overrides.query.or(self.query),
            next_token:             overrides.next_token.or(self.next_token),
            application_name:       overrides.application_name.or(self.application_name),
            deployment_id:          overrides.deployment_id.or(self.deployment_id),
            deployment_group_name:  overrides.deployment_group_name.or(self.deployment_group_name),
            instance_status_filter: overrides.instance_status_filter.or(self.instance_status_filter),
            registration_status:    overrides.registration_status.or(self.registration_status),
            region:                 overrides.region.or(self.region),
            profile:                overrides.profile.or(self.profile),
            endpoint_url:           overrides.endpoint_url.or(self.endpoint_url),
            account_id:             overrides.account_id.or(self.account_id),
            aws_access_key:         overrides.aws_access_key.or(self.aws_access_key),
            aws_secret_key:         overrides.aws_secret_key.or(self.aws_secret_key),
            security_token:         overrides.security_token.or(self.security_token),
            validate_certs:         overrides.validate_certs.or(self.validate_certs),
        }
    }

    pub fn connection(&self) -> Result<ConnectionArgs, FactsError> {
        // The SDK's HTTPS client always verifies certificates.
        if self.validate_certs == Some(false) {
            return Err(FactsError::Config(String::from(
                "validate_certs=false is not supported",
            )));
        }

        let access_key = non_empty(self.aws_access_key.clone());
        let secret_key = non_empty(self.aws_secret_key.clone());
        let security_token = non_empty(self.security_token.clone());

        let credentials = match (access_key, secret_key) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
                session_token: security_token,
            }),
            (None, None) if security_token.is_none() => None,
            (None, None) => {
                return Err(FactsError::Config(String::from(
                    "security_token requires aws_access_key and aws_secret_key",
                )));
            }
            _ => {
                return Err(FactsError::Config(String::from(
                    "aws_access_key and aws_secret_key must be given together",
                )));
            }
        };

        Ok(ConnectionArgs {
            region: non_empty(self.region.clone()),
            profile: non_empty(self.profile.clone()),
            endpoint_url: non_empty(self.endpoint_url.clone()),
            account_id: non_empty(self.account_id.clone()),
            credentials,
        })
    }

    pub fn into_request(self) -> Result<QueryRequest, FactsError> {
        let Some(query) = non_empty(self.query) else {
            return Err(FactsError::Config(String::from("missing required arguments: query")));
        };

        let request = QueryRequest {
            query:                  query.parse()?,
            next_token:             self.next_token,
            application_name:       self.application_name,
            deployment_id:          self.deployment_id,
            deployment_group_name:  self.deployment_group_name,
            instance_status_filter: self.instance_status_filter,
            registration_status:    self.registration_status,
        };

        Ok(request.normalized())
    }
}
