//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod layout_repo;
pub mod quota_repo;
pub mod ref_image_repo;
pub mod share_repo;
pub mod user_repo;

pub use layout_repo::LayoutRepo;
pub use quota_repo::QuotaRepo;
pub use ref_image_repo::RefImageRepo;
pub use share_repo::ShareRepo;
pub use user_repo::UserRepo;
