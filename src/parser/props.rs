//! MAPI property tags and value decoding for `.msg`-style compound files.
//!
//! Variable-length values live in their own streams named
//! `__substg1.0_<ID><TYPE>`; fixed-width values (integers, times) are packed
//! into the `__properties_version1.0` stream of each storage.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use chrono::{DateTime, Utc};
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::error::{ConvertError, Result};

// ── Property types ──────────────────────────────────────────────

pub const PT_LONG: u16 = 0x0003;
pub const PT_STRING8: u16 = 0x001E;
pub const PT_UNICODE: u16 = 0x001F;
pub const PT_SYSTIME: u16 = 0x0040;
pub const PT_BINARY: u16 = 0x0102;

// ── Message properties ──────────────────────────────────────────

pub const PR_SUBJECT: u16 = 0x0037;
pub const PR_CLIENT_SUBMIT_TIME: u16 = 0x0039;
pub const PR_SENT_REPRESENTING_NAME: u16 = 0x0042;
pub const PR_SENT_REPRESENTING_EMAIL_ADDRESS: u16 = 0x0065;
pub const PR_SENDER_NAME: u16 = 0x0C1A;
pub const PR_SENDER_EMAIL_ADDRESS: u16 = 0x0C1F;
pub const PR_DISPLAY_CC: u16 = 0x0E03;
pub const PR_DISPLAY_TO: u16 = 0x0E04;
pub const PR_MESSAGE_DELIVERY_TIME: u16 = 0x0E06;
pub const PR_BODY: u16 = 0x1000;
pub const PR_HTML: u16 = 0x1013;
pub const PR_INTERNET_CPID: u16 = 0x3FDE;
pub const PR_MESSAGE_CODEPAGE: u16 = 0x3FFD;
pub const PR_SENDER_SMTP_ADDRESS: u16 = 0x5D01;
pub const PR_SENT_REPRESENTING_SMTP_ADDRESS: u16 = 0x5D02;

// ── Recipient properties ────────────────────────────────────────

pub const PR_RECIPIENT_TYPE: u16 = 0x0C15;
pub const PR_DISPLAY_NAME: u16 = 0x3001;
pub const PR_EMAIL_ADDRESS: u16 = 0x3003;
pub const PR_SMTP_ADDRESS: u16 = 0x39FE;

pub const MAPI_TO: i32 = 1;
pub const MAPI_CC: i32 = 2;

// ── Attachment properties ───────────────────────────────────────

pub const PR_ATTACH_DATA_BIN: u16 = 0x3701;
pub const PR_ATTACH_FILENAME: u16 = 0x3704;
pub const PR_ATTACH_METHOD: u16 = 0x3705;
pub const PR_ATTACH_LONG_FILENAME: u16 = 0x3707;
pub const PR_ATTACH_MIME_TAG: u16 = 0x370E;
pub const PR_ATTACH_CONTENT_ID: u16 = 0x3712;

pub const ATTACH_EMBEDDED_MSG: i32 = 5;

// ── Storage layout ──────────────────────────────────────────────

/// Name of the fixed-width property stream inside every storage.
pub const PROPERTIES_STREAM: &str = "__properties_version1.0";
/// Prefix of recipient sub-storages.
pub const RECIP_PREFIX: &str = "__recip_version1.0_#";
/// Prefix of attachment sub-storages.
pub const ATTACH_PREFIX: &str = "__attach_version1.0_#";

/// Header length of the root property stream.
pub const ROOT_HEADER_LEN: usize = 32;
/// Header length of recipient and attachment property streams.
pub const CHILD_HEADER_LEN: usize = 8;

/// Seconds between 1601-01-01 (FILETIME epoch) and 1970-01-01.
const FILETIME_UNIX_OFFSET: i64 = 11_644_473_600;

/// Build the stream name holding a variable-length property.
pub fn stream_name(id: u16, prop_type: u16) -> String {
    format!("__substg1.0_{id:04X}{prop_type:04X}")
}

/// Decode a UTF-16LE property value, dropping trailing NULs.
pub fn decode_unicode(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
        .trim_end_matches('\0')
        .to_string()
}

/// Decode an 8-bit property value using a Windows code page.
///
/// Unknown code pages fall back to windows-1252, the Outlook default.
pub fn decode_string8(bytes: &[u8], codepage: Option<u32>) -> String {
    let encoding = codepage
        .and_then(encoding_for_codepage)
        .unwrap_or(WINDOWS_1252);
    let (text, _, _) = encoding.decode(bytes);
    text.trim_end_matches('\0').to_string()
}

/// Decode an HTML body stored as bytes, using `PR_INTERNET_CPID` when known.
pub fn decode_html(bytes: &[u8], codepage: Option<u32>) -> String {
    let encoding = codepage.and_then(encoding_for_codepage).unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.trim_end_matches('\0').to_string()
}

/// Map a Windows code page identifier to an `encoding_rs` encoding.
pub fn encoding_for_codepage(codepage: u32) -> Option<&'static Encoding> {
    let label = match codepage {
        65001 => "utf-8",
        1200 => "utf-16le",
        1201 => "utf-16be",
        20127 | 1252 => "windows-1252",
        1250 => "windows-1250",
        1251 => "windows-1251",
        1253 => "windows-1253",
        1254 => "windows-1254",
        1255 => "windows-1255",
        1256 => "windows-1256",
        1257 => "windows-1257",
        1258 => "windows-1258",
        874 => "windows-874",
        866 => "ibm866",
        932 => "shift_jis",
        936 => "gbk",
        949 => "euc-kr",
        950 => "big5",
        20866 => "koi8-r",
        21866 => "koi8-u",
        28591 => "iso-8859-1",
        28592 => "iso-8859-2",
        28595 => "iso-8859-5",
        28597 => "iso-8859-7",
        28605 => "iso-8859-15",
        50220 => "iso-2022-jp",
        51932 => "euc-jp",
        54936 => "gb18030",
        _ => return None,
    };
    Encoding::for_label(label.as_bytes())
}

/// Convert a Windows FILETIME (100 ns ticks since 1601) to UTC.
///
/// Zero means "not set" and yields `None`.
pub fn filetime_to_datetime(ticks: u64) -> Option<DateTime<Utc>> {
    if ticks == 0 {
        return None;
    }
    let secs = (ticks / 10_000_000) as i64 - FILETIME_UNIX_OFFSET;
    let nanos = ((ticks % 10_000_000) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}

/// Fixed-width values parsed from a `__properties_version1.0` stream.
#[derive(Debug, Clone, Default)]
pub struct PropertyTable {
    values: HashMap<u16, (u16, [u8; 8])>,
}

impl PropertyTable {
    /// Parse a property stream, skipping the storage-specific header.
    ///
    /// Each entry is 16 bytes: tag (type | id << 16), flags, 8-byte value.
    pub fn parse(data: &[u8], header_len: usize) -> Result<Self> {
        if data.len() < header_len {
            return Err(ConvertError::Property {
                name: PROPERTIES_STREAM.to_string(),
                reason: format!("stream shorter than its {header_len}-byte header"),
            });
        }

        let mut values = HashMap::new();
        let mut cursor = Cursor::new(&data[header_len..]);
        let body_len = (data.len() - header_len) as u64;

        while body_len - cursor.position() >= 16 {
            let tag = cursor.read_u32::<LittleEndian>()?;
            let _flags = cursor.read_u32::<LittleEndian>()?;
            let mut value = [0u8; 8];
            cursor.read_exact(&mut value)?;

            let prop_type = (tag & 0xFFFF) as u16;
            let id = (tag >> 16) as u16;
            values.insert(id, (prop_type, value));
        }

        Ok(Self { values })
    }

    /// Read a 32-bit integer property.
    pub fn get_i32(&self, id: u16) -> Option<i32> {
        match self.values.get(&id) {
            Some((PT_LONG, value)) => {
                Some(i32::from_le_bytes([value[0], value[1], value[2], value[3]]))
            }
            _ => None,
        }
    }

    /// Read a time property.
    pub fn get_time(&self, id: u16) -> Option<DateTime<Utc>> {
        match self.values.get(&id) {
            Some((PT_SYSTIME, value)) => filetime_to_datetime(u64::from_le_bytes(*value)),
            _ => None,
        }
    }

    /// Number of fixed-width properties in the table.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` if the table holds no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
