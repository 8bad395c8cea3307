use thiserror::Error;

use crate::{db_types::ExternalRef, traits::OrderStoreError};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("An order with reference {0} already exists")]
    DuplicateOrder(ExternalRef),
}

impl From<OrderStoreError> for OrderFlowError {
    fn from(e: OrderStoreError) -> Self {
        match e {
            OrderStoreError::DatabaseError(s) => OrderFlowError::DatabaseError(s),
            OrderStoreError::DuplicateOrder(external_ref) => OrderFlowError::DuplicateOrder(external_ref),
        }
    }
}
