//! Layout approval workflow: status constants and transition guards.
//!
//! Layouts move through `draft -> submitted -> delivered`, with a withdrawal
//! path back from `submitted` to `draft`. Delivery is terminal: a delivered
//! layout is immutable and un-deletable for every actor, admins included.

use crate::error::CoreError;

/// Initial status of every layout.
pub const STATUS_DRAFT: &str = "draft";

/// The layout was handed in for review/production.
pub const STATUS_SUBMITTED: &str = "submitted";

/// Terminal status; the layout is hard-locked.
pub const STATUS_DELIVERED: &str = "delivered";

/// All valid status values.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_SUBMITTED, STATUS_DELIVERED];

/// Validate that a status string is one of the accepted values.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}

/// Guard for `draft -> submitted`. Returns the new status.
pub fn submit_transition(current: &str) -> Result<&'static str, CoreError> {
    if current == STATUS_DRAFT {
        Ok(STATUS_SUBMITTED)
    } else {
        Err(CoreError::Conflict(format!(
            "Only draft layouts can be submitted (current status: {current})"
        )))
    }
}

/// Guard for `submitted -> draft` (withdrawal). Returns the new status.
pub fn withdraw_transition(current: &str) -> Result<&'static str, CoreError> {
    if current == STATUS_SUBMITTED {
        Ok(STATUS_DRAFT)
    } else {
        Err(CoreError::Conflict(format!(
            "Only submitted layouts can be withdrawn (current status: {current})"
        )))
    }
}

/// Guard for `submitted -> delivered`. Returns the new status.
pub fn deliver_transition(current: &str) -> Result<&'static str, CoreError> {
    if current == STATUS_SUBMITTED {
        Ok(STATUS_DELIVERED)
    } else {
        Err(CoreError::Conflict(format!(
            "Only submitted layouts can be delivered (current status: {current})"
        )))
    }
}

/// Guard applied before any content mutation (update, meta patch, delete).
///
/// Delivered layouts are locked regardless of actor.
pub fn ensure_mutable(status: &str) -> Result<(), CoreError> {
    if status == STATUS_DELIVERED {
        Err(CoreError::Conflict(
            "Delivered layouts cannot be modified or deleted".into(),
        ))
    } else {
        Ok(())
    }
}
