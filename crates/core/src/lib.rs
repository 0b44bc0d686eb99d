//! Domain logic for the gridplan layout service.
//!
//! This crate has zero internal dependencies so it can be used by the
//! repository layer, the API layer, and any future CLI or worker tooling.

pub mod cursor;
pub mod error;
pub mod items;
pub mod quota;
pub mod roles;
pub mod share;
pub mod types;
pub mod validation;
pub mod workflow;
