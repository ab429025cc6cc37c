//! Normalization of registry documents into flat records.
//!
//! - [`identity`] - `person` resource to [`IdentityRecord`]
//! - [`works`] - `works` resource to [`WorkRecord`]s
//!
//! Both extractors degrade to "no data" on any fetch failure and to an
//! absent field on any malformed nested value.

pub mod identity;
pub mod works;

pub use identity::{IdentityRecord, extract_identity, identity_from_person};
pub use works::{WorkRecord, extract_works, select_doi, work_from_summary, works_from_listing};
