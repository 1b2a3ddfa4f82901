//! DynamoDB infrastructure for the catalog tables.

mod client;
mod config;
mod deploy;
mod error;
mod planning;

pub use error::{DynamodbError, Result};

use crate::prelude::*;
use config::CatalogTable;
use dialoguer::Confirm;

#[derive(Debug, clap::Parser)]
pub struct DynamodbCommand {
    #[command(subcommand)]
    pub action: DynamodbAction,
}

#[derive(Debug, clap::Subcommand)]
pub enum DynamodbAction {
    /// Deploy or destroy the catalog tables.
    Deploy(DeployCommand),
}

#[derive(Debug, clap::Parser)]
#[command(long_about = "Deploy or destroy the catalog DynamoDB tables.

By default, this command creates or updates the categories and products
tables with the partition key `id` and the Global Secondary Indexes the
catalog repositories query.

The command shows a plan of changes before applying and asks for confirmation.

Environment variables:
  AWS_ENDPOINT_URL    - Use local DynamoDB (e.g., http://localhost:8000)
  AWS_REGION          - AWS region (defaults to us-east-1)
  AWS_PROFILE         - AWS profile to use for credentials")]
pub struct DeployCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,

    /// Destroy the tables instead of creating/updating.
    #[arg(long)]
    pub destroy: bool,

    /// Only act on one table.
    #[arg(long, value_enum)]
    pub only: Option<CatalogTable>,

    /// Categories table name.
    #[arg(long, env = "CATEGORIES_TABLE", default_value = "categories")]
    pub categories_table: String,

    /// Products table name.
    #[arg(long, env = "PRODUCTS_TABLE", default_value = "products")]
    pub products_table: String,
}

impl DeployCommand {
    fn selected_tables(&self) -> Vec<CatalogTable> {
        match self.only {
            Some(table) => vec![table],
            None => CatalogTable::ALL.to_vec(),
        }
    }

    fn table_name(&self, table: CatalogTable) -> &str {
        match table {
            CatalogTable::Categories => &self.categories_table,
            CatalogTable::Products => &self.products_table,
        }
    }
}

pub async fn run(command: DynamodbCommand, global: crate::Global) -> Result<()> {
    match command.action {
        DynamodbAction::Deploy(cmd) => {
            let aws_config = client::AwsConfig::default();

            if !global.is_silent() {
                aprintln!("{} {}", p_b("Target:"), aws_config.target_display());
                aprintln!();
            }

            let dynamo_client = client::create_client(&aws_config).await;

            if cmd.destroy {
                run_destroy(&dynamo_client, &cmd, &global).await
            } else {
                run_deploy(&dynamo_client, &cmd, &global).await
            }
        }
    }
}

fn confirm(prompt: &str, default: bool) -> Result<()> {
    if Confirm::new().with_prompt(prompt).default(default).interact()? {
        Ok(())
    } else {
        Err(DynamodbError::UserCancelled)
    }
}

async fn run_deploy(
    dynamo_client: &aws_sdk_dynamodb::Client,
    cmd: &DeployCommand,
    global: &crate::Global,
) -> Result<()> {
    let mut plans = Vec::new();
    for table in cmd.selected_tables() {
        let desired = config::table_config(table).with_table_name(cmd.table_name(table));
        let current = client::get_table_state(dynamo_client, &desired.table_name).await?;
        plans.push(planning::calculate_table_plan(current.as_ref(), &desired));
    }

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in plans.iter().flat_map(planning::format_table_plan) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else if line.starts_with('~') {
                aprintln!("  {}", p_y(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    if !plans.iter().any(planning::TablePlan::has_changes) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Infrastructure is up to date."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm("Apply these changes?", true)?;
    }

    for plan in &plans {
        if global.is_verbose() {
            aprintln!("{} {:?}", p_m("Applying:"), plan);
        }
        deploy::execute_table_plan(dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Infrastructure deployed successfully."));
    }

    Ok(())
}

async fn run_destroy(
    dynamo_client: &aws_sdk_dynamodb::Client,
    cmd: &DeployCommand,
    global: &crate::Global,
) -> Result<()> {
    let mut plans = Vec::new();
    for table in cmd.selected_tables() {
        let table_name = cmd.table_name(table);
        let current = client::get_table_state(dynamo_client, table_name).await?;
        plans.push(planning::calculate_destroy_plan(current.as_ref(), table_name));
    }

    if !global.is_silent() {
        aprintln!("{}", p_y("Destroy Plan:"));
        for line in plans.iter().flat_map(planning::format_destroy_plan) {
            aprintln!("  {}", p_r(&line));
        }
        aprintln!();
    }

    if !plans.iter().any(planning::DestroyPlan::has_changes) {
        if !global.is_silent() {
            aprintln!("{}", p_g("Nothing to destroy."));
        }
        return Ok(());
    }

    if !cmd.force {
        confirm(
            "Are you sure you want to delete these tables? ALL DATA WILL BE LOST",
            false,
        )?;
    }

    for plan in &plans {
        deploy::execute_destroy_plan(dynamo_client, plan).await?;
    }

    if !global.is_silent() {
        aprintln!("{}", p_g("Tables destroyed successfully."));
    }

    Ok(())
}
