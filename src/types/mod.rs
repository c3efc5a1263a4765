//! Core data model for the register pipeline.
//!
//! Three layers, in processing order:
//!
//! 1. [`raw`]: records exactly as the upstream register publishes them
//! 2. [`record`]: normalized firm/office records (canonical field names)
//! 3. [`entity`]: JSON-LD graph entities with stable IRIs

pub mod entity;
pub mod raw;
pub mod record;

pub use entity::{FirmEntity, GraphDocument, GraphEntity, IriRef, OfficeEntity, PostalAddress};
pub use raw::{RawFirmRecord, RawOfficeRecord};
pub use record::{Address, NormalizedFirm, NormalizedOffice};
