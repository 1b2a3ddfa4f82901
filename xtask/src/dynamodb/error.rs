//! Error types for the table deployment commands.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DynamodbError>;

#[derive(Error, Debug)]
pub enum DynamodbError {
    #[error("AWS SDK error: {0}")]
    AwsSdk(String),

    #[error("DescribeTable returned no table description for '{table_name}'")]
    MissingDescription { table_name: String },

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Timeout waiting for table '{table_name}' to become active")]
    TableActivationTimeout { table_name: String },

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl DynamodbError {
    pub(crate) fn sdk(err: impl std::fmt::Display) -> Self {
        DynamodbError::AwsSdk(err.to_string())
    }
}
