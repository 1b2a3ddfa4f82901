//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;

/// Creates a DynamoDB client from the default AWS configuration chain.
///
/// `endpoint_url` points the client at a local DynamoDB instead of AWS.
pub async fn create_client(endpoint_url: Option<&str>) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(endpoint) = endpoint_url {
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    tracing::debug!(endpoint = ?endpoint_url, "DynamoDB client configured");
    Client::new(&sdk_config)
}
