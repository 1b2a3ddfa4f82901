//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `catalog_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use catalog_core::storage::RepositoryError;

fn throughput_exceeded() -> RepositoryError {
    RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
}

fn request_limit_exceeded() -> RepositoryError {
    RepositoryError::QueryFailed("Request limit exceeded, please retry".to_string())
}

fn internal_server_error() -> RepositoryError {
    RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
}

fn table_not_found() -> RepositoryError {
    RepositoryError::QueryFailed("Table not found".to_string())
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(),
        GetItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        GetItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        GetItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a BatchGetItem SDK error to RepositoryError.
pub fn map_batch_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchGetItemError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        BatchGetItemError::ResourceNotFoundException(_) => table_not_found(),
        BatchGetItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        BatchGetItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        BatchGetItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("BatchGetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => table_not_found(),
        QueryError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        QueryError::RequestLimitExceeded(_) => request_limit_exceeded(),
        QueryError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Map a Scan SDK error to RepositoryError.
pub fn map_scan_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ScanError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        ScanError::ResourceNotFoundException(_) => table_not_found(),
        ScanError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        ScanError::RequestLimitExceeded(_) => request_limit_exceeded(),
        ScanError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("Scan failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to RepositoryError.
///
/// `on_conflict` builds the error returned when the put's condition fails:
/// `AlreadyExists` for inserts, `NotFound` for replacements.
pub fn map_put_item_error<R, F>(err: SdkError<PutItemError, R>, on_conflict: F) -> RepositoryError
where
    R: Debug + Send + Sync + 'static,
    F: FnOnce() -> RepositoryError,
{
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => on_conflict(),
        PutItemError::ResourceNotFoundException(_) => table_not_found(),
        PutItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        PutItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(),
        DeleteItemError::ProvisionedThroughputExceededException(_) => throughput_exceeded(),
        DeleteItemError::RequestLimitExceeded(_) => request_limit_exceeded(),
        DeleteItemError::ItemCollectionSizeLimitExceededException(_) => {
            RepositoryError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        DeleteItemError::TransactionConflictException(_) => {
            RepositoryError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => internal_server_error(),
        err => RepositoryError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}
