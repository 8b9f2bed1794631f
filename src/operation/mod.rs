//! Operations, the financial transaction records kept by the application.
//!
//! This module contains the `Operation` model, the database functions for
//! storing and changing operations, and the JSON route handlers for them.

mod amount;
mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod list_endpoint;

pub use amount::coerce_amount;
pub use core::{
    DEFAULT_STATUS, DELETED_STATUS, NewOperation, Operation, OperationPayload, create_operation,
    create_operation_table, get_all_operations, soft_delete_operation, update_operation,
};
pub use create_endpoint::create_operation_endpoint;
pub use delete_endpoint::delete_operation_endpoint;
pub use edit_endpoint::edit_operation_endpoint;
pub use list_endpoint::list_operations_endpoint;

#[cfg(test)]
pub(crate) use core::count_operations;
