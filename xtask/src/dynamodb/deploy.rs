//! Applies table plans against DynamoDB.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, CreateGlobalSecondaryIndexAction, GlobalSecondaryIndex,
    GlobalSecondaryIndexUpdate, KeySchemaElement, KeyType, Projection, ProjectionType,
    ScalarAttributeType,
};
use aws_sdk_dynamodb::Client;

use super::client;
use super::config::{GsiConfig, KeyAttribute, TableConfig};
use super::error::{DynamodbError, Result};
use super::planning::{DestroyPlan, TablePlan};

const ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_POLL: Duration = Duration::from_secs(2);

pub async fn execute_table_plan(client: &Client, plan: &TablePlan) -> Result<()> {
    match plan {
        TablePlan::Create { config } => {
            create_table(client, config).await?;
            wait_for_table_active(client, &config.table_name).await?;
        }
        TablePlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            // DynamoDB accepts one index creation per UpdateTable call.
            for gsi in gsis_to_add {
                add_gsi(client, table_name, gsi).await?;
                wait_for_table_active(client, table_name).await?;
            }
        }
        TablePlan::WaitForActive { table_name } => {
            wait_for_table_active(client, table_name).await?;
        }
        TablePlan::NoChanges { .. } => {}
    }
    Ok(())
}

pub async fn execute_destroy_plan(client: &Client, plan: &DestroyPlan) -> Result<()> {
    if let DestroyPlan::DeleteTable { table_name } = plan {
        client
            .delete_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(DynamodbError::sdk)?;
    }
    Ok(())
}

fn key_element(key: &KeyAttribute, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(key_type)
        .build()
        .map_err(DynamodbError::sdk)
}

fn string_attribute(name: &str) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(DynamodbError::sdk)
}

fn gsi_key_schema(gsi: &GsiConfig) -> Result<Vec<KeySchemaElement>> {
    let mut schema = vec![key_element(&gsi.partition_key, KeyType::Hash)?];
    if let Some(sk) = &gsi.sort_key {
        schema.push(key_element(sk, KeyType::Range)?);
    }
    Ok(schema)
}

fn projection_all() -> Projection {
    Projection::builder()
        .projection_type(ProjectionType::All)
        .build()
}

async fn create_table(client: &Client, config: &TableConfig) -> Result<()> {
    let attribute_definitions = config
        .key_attribute_names()
        .into_iter()
        .map(string_attribute)
        .collect::<Result<Vec<_>>>()?;

    let mut request = client
        .create_table()
        .table_name(&config.table_name)
        .key_schema(key_element(&config.partition_key, KeyType::Hash)?)
        .set_attribute_definitions(Some(attribute_definitions))
        .billing_mode(BillingMode::PayPerRequest);

    for gsi in &config.gsis {
        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(&gsi.name)
                .set_key_schema(Some(gsi_key_schema(gsi)?))
                .projection(projection_all())
                .build()
                .map_err(DynamodbError::sdk)?,
        );
    }

    request.send().await.map_err(DynamodbError::sdk)?;
    Ok(())
}

async fn add_gsi(client: &Client, table_name: &str, gsi: &GsiConfig) -> Result<()> {
    let attribute_definitions = std::iter::once(&gsi.partition_key)
        .chain(gsi.sort_key.as_ref())
        .map(|key| string_attribute(&key.name))
        .collect::<Result<Vec<_>>>()?;

    let create = CreateGlobalSecondaryIndexAction::builder()
        .index_name(&gsi.name)
        .set_key_schema(Some(gsi_key_schema(gsi)?))
        .projection(projection_all())
        .build()
        .map_err(DynamodbError::sdk)?;

    client
        .update_table()
        .table_name(table_name)
        .set_attribute_definitions(Some(attribute_definitions))
        .global_secondary_index_updates(GlobalSecondaryIndexUpdate::builder().create(create).build())
        .send()
        .await
        .map_err(DynamodbError::sdk)?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    for _ in 0..ACTIVATION_ATTEMPTS {
        if let Some(state) = client::get_table_state(client, table_name).await? {
            if state.is_settled() {
                return Ok(());
            }
        }
        tokio::time::sleep(ACTIVATION_POLL).await;
    }

    Err(DynamodbError::TableActivationTimeout {
        table_name: table_name.to_string(),
    })
}
