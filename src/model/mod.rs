//! Core data model types for templates, addresses, and attachments.

pub mod address;
pub mod attachment;
pub mod template;
