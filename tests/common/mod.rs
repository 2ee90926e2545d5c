//! Builds `.oft` fixtures in memory with `cfb`'s writer.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::Path;

use cfb::CompoundFile;
use chrono::{DateTime, Utc};

use oft2eml::parser::props;

/// Recipient row of a fixture.
pub struct Recipient {
    pub kind: i32,
    pub name: Option<String>,
    pub address: Option<String>,
}

/// Attachment row of a fixture.
#[derive(Default)]
pub struct Attachment {
    pub long_filename: Option<String>,
    pub short_filename: Option<String>,
    pub content_id: Option<String>,
    pub mime_tag: Option<String>,
    pub method: Option<i32>,
    pub data: Option<Vec<u8>>,
}

/// Fluent builder for a template compound file.
#[derive(Default)]
pub struct OftBuilder {
    unicode: Vec<(u16, String)>,
    string8: Vec<(u16, Vec<u8>)>,
    binary: Vec<(u16, Vec<u8>)>,
    fixed: Vec<(u16, u16, [u8; 8])>,
    recipients: Vec<Recipient>,
    attachments: Vec<Attachment>,
}

impl OftBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string(mut self, id: u16, value: &str) -> Self {
        self.unicode.push((id, value.to_string()));
        self
    }

    pub fn string8(mut self, id: u16, value: &[u8]) -> Self {
        self.string8.push((id, value.to_vec()));
        self
    }

    pub fn binary(mut self, id: u16, value: &[u8]) -> Self {
        self.binary.push((id, value.to_vec()));
        self
    }

    pub fn long(mut self, id: u16, value: i32) -> Self {
        let mut bytes = [0u8; 8];
        bytes[..4].copy_from_slice(&value.to_le_bytes());
        self.fixed.push((id, props::PT_LONG, bytes));
        self
    }

    pub fn time(mut self, id: u16, value: DateTime<Utc>) -> Self {
        let ticks = (value.timestamp() + 11_644_473_600) as u64 * 10_000_000;
        self.fixed.push((id, props::PT_SYSTIME, ticks.to_le_bytes()));
        self
    }

    pub fn recipient(mut self, kind: i32, name: &str, address: &str) -> Self {
        self.recipients.push(Recipient {
            kind,
            name: Some(name.to_string()).filter(|s| !s.is_empty()),
            address: Some(address.to_string()).filter(|s| !s.is_empty()),
        });
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Serialize the compound file.
    pub fn build(&self) -> Vec<u8> {
        let mut comp = CompoundFile::create(Cursor::new(Vec::new())).expect("create cfb");

        put(
            &mut comp,
            &format!("/{}", props::PROPERTIES_STREAM),
            &property_stream(props::ROOT_HEADER_LEN, &self.fixed),
        );
        for (id, value) in &self.unicode {
            put(&mut comp, &sub("/", *id, props::PT_UNICODE), &utf16(value));
        }
        for (id, value) in &self.string8 {
            put(&mut comp, &sub("/", *id, props::PT_STRING8), value);
        }
        for (id, value) in &self.binary {
            put(&mut comp, &sub("/", *id, props::PT_BINARY), value);
        }

        for (i, recip) in self.recipients.iter().enumerate() {
            let storage = format!("/{}{i:08X}/", props::RECIP_PREFIX);
            comp.create_storage(storage.trim_end_matches('/')).expect("recip storage");
            let fixed = [(props::PR_RECIPIENT_TYPE, props::PT_LONG, long_bytes(recip.kind))];
            put(
                &mut comp,
                &format!("{storage}{}", props::PROPERTIES_STREAM),
                &property_stream(props::CHILD_HEADER_LEN, &fixed),
            );
            if let Some(name) = &recip.name {
                put(
                    &mut comp,
                    &sub(&storage, props::PR_DISPLAY_NAME, props::PT_UNICODE),
                    &utf16(name),
                );
            }
            if let Some(address) = &recip.address {
                put(
                    &mut comp,
                    &sub(&storage, props::PR_SMTP_ADDRESS, props::PT_UNICODE),
                    &utf16(address),
                );
            }
        }

        for (i, att) in self.attachments.iter().enumerate() {
            let storage = format!("/{}{i:08X}/", props::ATTACH_PREFIX);
            comp.create_storage(storage.trim_end_matches('/')).expect("attach storage");
            let fixed: Vec<(u16, u16, [u8; 8])> = att
                .method
                .map(|m| (props::PR_ATTACH_METHOD, props::PT_LONG, long_bytes(m)))
                .into_iter()
                .collect();
            put(
                &mut comp,
                &format!("{storage}{}", props::PROPERTIES_STREAM),
                &property_stream(props::CHILD_HEADER_LEN, &fixed),
            );
            let strings = [
                (props::PR_ATTACH_LONG_FILENAME, &att.long_filename),
                (props::PR_ATTACH_FILENAME, &att.short_filename),
                (props::PR_ATTACH_CONTENT_ID, &att.content_id),
                (props::PR_ATTACH_MIME_TAG, &att.mime_tag),
            ];
            for (id, value) in strings {
                if let Some(value) = value {
                    put(&mut comp, &sub(&storage, id, props::PT_UNICODE), &utf16(value));
                }
            }
            if let Some(data) = &att.data {
                put(
                    &mut comp,
                    &sub(&storage, props::PR_ATTACH_DATA_BIN, props::PT_BINARY),
                    data,
                );
            }
        }

        comp.flush().expect("flush cfb");
        comp.into_inner().into_inner()
    }

    /// Write the fixture to `path`.
    pub fn write_to(&self, path: &Path) {
        std::fs::write(path, self.build()).expect("write fixture");
    }
}

fn put(comp: &mut CompoundFile<Cursor<Vec<u8>>>, path: &str, data: &[u8]) {
    let mut stream = comp.create_stream(path).expect("create stream");
    stream.write_all(data).expect("write stream");
}

fn sub(storage: &str, id: u16, prop_type: u16) -> String {
    format!("{storage}{}", props::stream_name(id, prop_type))
}

fn utf16(value: &str) -> Vec<u8> {
    value
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_le_bytes)
        .collect()
}

fn long_bytes(value: i32) -> [u8; 8] {
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&value.to_le_bytes());
    bytes
}

fn property_stream(header_len: usize, entries: &[(u16, u16, [u8; 8])]) -> Vec<u8> {
    let mut out = vec![0u8; header_len];
    for (id, prop_type, value) in entries {
        out.extend_from_slice(&((u32::from(*id) << 16) | u32::from(*prop_type)).to_le_bytes());
        // PROPATTR_READABLE | PROPATTR_WRITABLE
        out.extend_from_slice(&6u32.to_le_bytes());
        out.extend_from_slice(value);
    }
    out
}

/// A realistic HTML template with one inline image and one PDF.
pub fn newsletter() -> OftBuilder {
    OftBuilder::new()
        .string(props::PR_SUBJECT, "Monthly Newsletter")
        .string(props::PR_BODY, "Plain text version")
        .binary(
            props::PR_HTML,
            b"<html><body><p>Hello</p><img src=\"cid:logo@example.com\"></body></html>",
        )
        .string(props::PR_SENDER_NAME, "News Desk")
        .string(props::PR_SENDER_SMTP_ADDRESS, "news@example.com")
        .recipient(props::MAPI_TO, "Ann Lee", "ann@example.com")
        .recipient(props::MAPI_CC, "", "boss@example.com")
        .attachment(Attachment {
            long_filename: Some("logo.png".into()),
            content_id: Some("logo@example.com".into()),
            data: Some(vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3]),
            ..Default::default()
        })
        .attachment(Attachment {
            long_filename: Some("report.pdf".into()),
            short_filename: Some("REPORT~1.PDF".into()),
            data: Some(b"%PDF-1.4 fake".to_vec()),
            ..Default::default()
        })
}
