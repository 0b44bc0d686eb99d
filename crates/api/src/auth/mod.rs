//! Token validation for authenticated requests.
//!
//! Credential issuance (login, refresh) lives outside this service; only
//! validation of externally minted access tokens happens here.

pub mod jwt;
