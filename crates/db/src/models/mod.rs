//! Entity structs (database rows) and request DTOs.
//!
//! Wire JSON is camelCase; database columns stay snake_case.

pub mod layout;
pub mod page;
pub mod quota;
pub mod ref_image;
pub mod share;
pub mod user;
