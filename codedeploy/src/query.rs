use std::{fmt, str::FromStr};

use crate::error::FactsError;

/// The operation selector chosen by the caller. One per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    ListApplications,
    ListDeploymentConfigs,
    ListDeploymentGroups,
    ListDeploymentInstances,
    ListDeployments,
    ListOnPremisesInstances,
}

impl QueryKind {
    pub const ALL: [QueryKind; 6] = [
        QueryKind::ListApplications,
        QueryKind::ListDeploymentConfigs,
        QueryKind::ListDeploymentGroups,
        QueryKind::ListDeploymentInstances,
        QueryKind::ListDeployments,
        QueryKind::ListOnPremisesInstances,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::ListApplications => "list_applications",
            QueryKind::ListDeploymentConfigs => "list_deployment_configs",
            QueryKind::ListDeploymentGroups => "list_deployment_groups",
            QueryKind::ListDeploymentInstances => "list_deployment_instances",
            QueryKind::ListDeployments => "list_deployments",
            QueryKind::ListOnPremisesInstances => "list_on_premises_instances",
        }
    }

    /// Name of the CodeDeploy API action behind this query.
    pub fn operation(&self) -> &'static str {
        match self {
            QueryKind::ListApplications => "ListApplications",
            QueryKind::ListDeploymentConfigs => "ListDeploymentConfigs",
            QueryKind::ListDeploymentGroups => "ListDeploymentGroups",
            QueryKind::ListDeploymentInstances => "ListDeploymentInstances",
            QueryKind::ListDeployments => "ListDeployments",
            QueryKind::ListOnPremisesInstances => "ListOnPremisesInstances",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Exact match only: no case folding, no prefix matching.
impl FromStr for QueryKind {
    type Err = FactsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "list_applications" => Ok(QueryKind::ListApplications),
            "list_deployment_configs" => Ok(QueryKind::ListDeploymentConfigs),
            "list_deployment_groups" => Ok(QueryKind::ListDeploymentGroups),
            "list_deployment_instances" => Ok(QueryKind::ListDeploymentInstances),
            "list_deployments" => Ok(QueryKind::ListDeployments),
            "list_on_premises_instances" => Ok(QueryKind::ListOnPremisesInstances),
            _ => Err(FactsError::UnknownQueryKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_parses_from_its_own_name() {
        for kind in QueryKind::ALL {
            assert_eq!(kind.as_str().parse::<QueryKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        for name in ["list_foo", "LIST_APPLICATIONS", "list_applications ", "", "list_application"] {
            match name.parse::<QueryKind>() {
                Err(FactsError::UnknownQueryKind(got)) => assert_eq!(got, name),
                other => panic!("expected UnknownQueryKind for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn operation_names() {
        assert_eq!(QueryKind::ListOnPremisesInstances.operation(), "ListOnPremisesInstances");
        assert_eq!(QueryKind::ListDeployments.to_string(), "list_deployments");
    }
}
