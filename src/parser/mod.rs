//! Parsers: Outlook template reader and MAPI property decoding.

pub mod oft;
pub mod props;
