//! `oft2eml`: convert Outlook template (`.oft`) files into `.eml` messages.
//!
//! The library reads the compound-file template, collects its message fields
//! and attachments, and serializes them as a MIME message. A terminal UI
//! drives batch conversions on a background worker.

pub mod config;
pub mod convert;
pub mod error;
pub mod i18n;
pub mod model;
pub mod parser;
pub mod tui;

pub use convert::batch::{convert_batch, BatchOptions, BatchReport, BatchSummary};
pub use convert::{convert_oft_to_eml, default_output_path};
pub use error::{ConvertError, Result};
