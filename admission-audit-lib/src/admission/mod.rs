//! The admission request model
//!
//! An [`AdmissionOperation`] describes one intercepted request: what kind of change
//! it asks for ([`Operation`]), whether it is a dry run, which resource schema it
//! targets ([`GroupVersionKind`]), and the objects involved. A [`TargetResource`]
//! is a read-only view of the object the request acts upon.
//!
//! Requests are decoded from the JSON the API server sends to admission webhooks,
//! either as a bare `AdmissionRequest` or wrapped in an `AdmissionReview`. They
//! are immutable once decoded.

mod group_version_kind;
mod operation;
mod request;
mod target_resource;

pub use group_version_kind::{GroupKind, GroupVersionKind};
pub use operation::Operation;
pub use request::AdmissionOperation;
pub use target_resource::TargetResource;
