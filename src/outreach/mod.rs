//! Outreach attribution and copy.
//!
//! `owners` decides who a lead belongs to from the inbound list-source label;
//! `templates` holds the email text the AI writer assembles from.

pub mod owners;
pub mod templates;

pub use owners::{ListSourcePolicy, Owner, SourceClassification};
pub use templates::{RegionBucket, TemplateStore, Vertical};
