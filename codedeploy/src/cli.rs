use std::path::PathBuf;

use clap::Parser;

use crate::{error::FactsError, query::QueryKind, request::ModuleArgs};

#[derive(Parser, Debug)]
#[command(name = "codedeploy-facts")]
#[command(about = "Query AWS CodeDeploy metadata and print it as JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Which list query to run
    #[arg(long)]
    pub query: Option<QueryKind>,

    /// Continuation token returned by a previous, truncated call
    #[arg(long)]
    pub next_token: Option<String>,

    /// Application name. Required for list_deployment_groups
    #[arg(long)]
    pub application_name: Option<String>,

    /// Deployment ID. Required for list_deployment_instances
    #[arg(long)]
    pub deployment_id: Option<String>,

    /// Deployment group name. Goes together with --application-name
    #[arg(long)]
    pub deployment_group_name: Option<String>,

    /// Instance statuses to keep, comma separated (e.g. Succeeded,Failed)
    #[arg(long)]
    pub instance_status_filter: Option<String>,

    /// On-premises registration status (Registered or Deregistered)
    #[arg(long)]
    pub registration_status: Option<String>,

    /// JSON or YAML file with module arguments. Flags override its values
    #[arg(long)]
    pub args_file: Option<PathBuf>,

    #[arg(long)]
    pub region: Option<String>,

    #[arg(long)]
    pub profile: Option<String>,

    #[arg(long, alias = "ec2-url")]
    pub endpoint_url: Option<String>,

    /// Static access key, used instead of the default credentials chain
    #[arg(long)]
    pub aws_access_key: Option<String>,

    #[arg(long)]
    pub aws_secret_key: Option<String>,

    /// Session token for temporary static credentials
    #[arg(long)]
    pub security_token: Option<String>,

    /// Only `true` is accepted
    #[arg(long)]
    pub validate_certs: Option<bool>,

    /// Fail unless the credentials belong to this account
    #[arg(long)]
    pub account_id: Option<String>,

    /// Directory holding aws/config.ron and aws/codedeploy/config.ron
    #[arg(long, default_value = ".")]
    pub config_prefix: PathBuf,

    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    fn flag_args(&self) -> ModuleArgs {
        ModuleArgs {
            query:                  self.query.map(|kind| kind.as_str().to_string()),
            next_token:             self.next_token.clone(),
            application_name:       self.application_name.clone(),
            deployment_id:          self.deployment_id.clone(),
            deployment_group_name:  self.deployment_group_name.clone(),
            instance_status_filter: self.instance_status_filter.clone(),
            registration_status:    self.registration_status.clone(),
            region:                 self.region.clone(),
            profile:                self.profile.clone(),
            endpoint_url:           self.endpoint_url.clone(),
            account_id:             self.account_id.clone(),
            aws_access_key:         self.aws_access_key.clone(),
            aws_secret_key:         self.aws_secret_key.clone(),
            security_token:         self.security_token.clone(),
            validate_certs:         self.validate_certs,
        }
    }

    /// The args file, if any, overlaid with whatever was given as flags.
    pub fn module_args(&self) -> Result<ModuleArgs, FactsError> {
        let base = match &self.args_file {
            Some(path) => ModuleArgs::from_file(path)?,
            None => ModuleArgs::default(),
        };

        Ok(base.merge(self.flag_args()))
    }
}
