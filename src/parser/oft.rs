//! Reader for Outlook template (`.oft`) files.
//!
//! An `.oft` file is an OLE compound file with the same layout as a `.msg`.
//! The container itself is handled by the `cfb` crate; this module only maps
//! the documented property streams onto a [`TemplateMessage`].

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use cfb::CompoundFile;
use tracing::{debug, warn};

use crate::error::{ConvertError, Result};
use crate::model::address::EmailAddress;
use crate::model::attachment::TemplateAttachment;
use crate::model::template::TemplateMessage;
use crate::parser::props::{self, PropertyTable};

/// Signature of every compound file.
pub const CFB_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Parse the template stored at `path`.
pub fn read_template_file(path: impl AsRef<Path>) -> Result<TemplateMessage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::FileNotFound(path.to_path_buf())
        } else {
            ConvertError::io(path, e)
        }
    })?;

    TemplateReader::new(BufReader::new(file), path)?.read()
}

/// Parse a template from any seekable reader (e.g. an in-memory buffer).
pub fn read_template<F: Read + Seek>(inner: F) -> Result<TemplateMessage> {
    TemplateReader::new(inner, "<memory>")?.read()
}

/// `true` if `bytes` start with the compound-file signature.
pub fn looks_like_template(bytes: &[u8]) -> bool {
    bytes.starts_with(&CFB_MAGIC)
}

/// Walks the storages of one compound file.
pub struct TemplateReader<F> {
    cfb: CompoundFile<F>,
    source: PathBuf,
    /// `PR_MESSAGE_CODEPAGE` of the root storage, used for 8-bit strings.
    codepage: Option<u32>,
}

impl<F: Read + Seek> TemplateReader<F> {
    /// Open the compound file. Fails with `InvalidTemplate` on a non-OLE file.
    pub fn new(inner: F, source: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let cfb = CompoundFile::open(inner).map_err(|e| ConvertError::invalid(&source, e))?;
        Ok(Self {
            cfb,
            source,
            codepage: None,
        })
    }

    /// Extract every field the converter needs.
    pub fn read(mut self) -> Result<TemplateMessage> {
        let root = PathBuf::from("/");
        let root_props = self.properties(&root, props::ROOT_HEADER_LEN)?;
        self.codepage = root_props
            .get_i32(props::PR_MESSAGE_CODEPAGE)
            .and_then(|cp| u32::try_from(cp).ok());

        let subject = self.string(&root, props::PR_SUBJECT)?;
        let body = self.string(&root, props::PR_BODY)?;
        let html_body = self.html(&root, &root_props)?;
        let sender = self.sender(&root)?;
        let (to, cc) = self.recipients(&root)?;
        let date = root_props
            .get_time(props::PR_CLIENT_SUBMIT_TIME)
            .or_else(|| root_props.get_time(props::PR_MESSAGE_DELIVERY_TIME));
        let attachments = self.attachments()?;

        debug!(
            source = %self.source.display(),
            attachments = attachments.len(),
            has_html = html_body.is_some(),
            "Read template"
        );

        Ok(TemplateMessage {
            sender,
            to,
            cc,
            subject,
            body,
            html_body,
            date,
            attachments,
        })
    }

    // ── Fields ──────────────────────────────────────────────────

    fn html(&mut self, storage: &Path, props_table: &PropertyTable) -> Result<Option<String>> {
        let cpid = props_table
            .get_i32(props::PR_INTERNET_CPID)
            .and_then(|cp| u32::try_from(cp).ok());
        if let Some(bytes) = self.binary(storage, props::PR_HTML)? {
            return Ok(Some(props::decode_html(&bytes, cpid)));
        }
        self.string(storage, props::PR_HTML)
    }

    fn sender(&mut self, root: &Path) -> Result<Option<String>> {
        let name = match self.string(root, props::PR_SENDER_NAME)? {
            Some(name) => Some(name),
            None => self.string(root, props::PR_SENT_REPRESENTING_NAME)?,
        };

        let mut address = None;
        for id in [
            props::PR_SENDER_SMTP_ADDRESS,
            props::PR_SENDER_EMAIL_ADDRESS,
            props::PR_SENT_REPRESENTING_SMTP_ADDRESS,
            props::PR_SENT_REPRESENTING_EMAIL_ADDRESS,
        ] {
            if let Some(value) = self.string(root, id)? {
                // Exchange DNs ("/O=ORG/OU=...") are not usable in a header
                if value.contains('@') {
                    address = Some(value);
                    break;
                }
            }
        }

        Ok(format_mailbox(name.as_deref(), address.as_deref()))
    }

    fn recipients(&mut self, root: &Path) -> Result<(Option<String>, Option<String>)> {
        let mut to = Vec::new();
        let mut cc = Vec::new();

        for storage in self.child_storages(props::RECIP_PREFIX) {
            let table = self.properties(&storage, props::CHILD_HEADER_LEN)?;
            let kind = table
                .get_i32(props::PR_RECIPIENT_TYPE)
                .unwrap_or(props::MAPI_TO);

            let name = self.string(&storage, props::PR_DISPLAY_NAME)?;
            let address = match self.string(&storage, props::PR_SMTP_ADDRESS)? {
                Some(smtp) => Some(smtp),
                None => self
                    .string(&storage, props::PR_EMAIL_ADDRESS)?
                    .filter(|a| a.contains('@')),
            };

            let Some(mailbox) = format_mailbox(name.as_deref(), address.as_deref()) else {
                continue;
            };
            match kind {
                props::MAPI_TO => to.push(mailbox),
                props::MAPI_CC => cc.push(mailbox),
                _ => debug!(kind, "Skipping blind-copy recipient"),
            }
        }

        let to = match join_recipients(to) {
            Some(list) => Some(list),
            None => self.string(root, props::PR_DISPLAY_TO)?,
        };
        let cc = match join_recipients(cc) {
            Some(list) => Some(list),
            None => self.string(root, props::PR_DISPLAY_CC)?,
        };
        Ok((to, cc))
    }

    fn attachments(&mut self) -> Result<Vec<TemplateAttachment>> {
        let mut attachments = Vec::new();

        for storage in self.child_storages(props::ATTACH_PREFIX) {
            let table = self.properties(&storage, props::CHILD_HEADER_LEN)?;
            let long_filename = self.string(&storage, props::PR_ATTACH_LONG_FILENAME)?;

            if table.get_i32(props::PR_ATTACH_METHOD) == Some(props::ATTACH_EMBEDDED_MSG) {
                warn!(
                    source = %self.source.display(),
                    storage = %storage.display(),
                    "Skipping embedded message attachment"
                );
                continue;
            }

            let Some(data) = self.binary(&storage, props::PR_ATTACH_DATA_BIN)? else {
                warn!(
                    source = %self.source.display(),
                    filename = long_filename.as_deref().unwrap_or(""),
                    "Skipping attachment without data"
                );
                continue;
            };

            attachments.push(TemplateAttachment {
                long_filename,
                short_filename: self.string(&storage, props::PR_ATTACH_FILENAME)?,
                content_id: self.string(&storage, props::PR_ATTACH_CONTENT_ID)?,
                mime_tag: self.string(&storage, props::PR_ATTACH_MIME_TAG)?,
                data,
            });
        }

        Ok(attachments)
    }

    // ── Raw access ──────────────────────────────────────────────

    /// Sub-storages of the root whose name starts with `prefix`, in index order.
    fn child_storages(&self, prefix: &str) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .cfb
            .read_root_storage()
            .filter(|entry| entry.is_storage() && entry.name().starts_with(prefix))
            .map(|entry| entry.path().to_path_buf())
            .collect();
        paths.sort();
        paths
    }

    fn properties(&mut self, storage: &Path, header_len: usize) -> Result<PropertyTable> {
        match self.stream(&storage.join(props::PROPERTIES_STREAM))? {
            Some(data) => PropertyTable::parse(&data, header_len),
            None => Ok(PropertyTable::default()),
        }
    }

    /// A string property, stored either as UTF-16 or as 8-bit text.
    fn string(&mut self, storage: &Path, id: u16) -> Result<Option<String>> {
        let unicode = storage.join(props::stream_name(id, props::PT_UNICODE));
        if let Some(bytes) = self.stream(&unicode)? {
            return Ok(non_empty(props::decode_unicode(&bytes)));
        }

        let ansi = storage.join(props::stream_name(id, props::PT_STRING8));
        if let Some(bytes) = self.stream(&ansi)? {
            return Ok(non_empty(props::decode_string8(&bytes, self.codepage)));
        }

        Ok(None)
    }

    fn binary(&mut self, storage: &Path, id: u16) -> Result<Option<Vec<u8>>> {
        self.stream(&storage.join(props::stream_name(id, props::PT_BINARY)))
    }

    fn stream(&mut self, path: &Path) -> Result<Option<Vec<u8>>> {
        if !self.cfb.is_stream(path) {
            return Ok(None);
        }
        let mut stream = self
            .cfb
            .open_stream(path)
            .map_err(|e| ConvertError::io(&self.source, e))?;
        let mut data = Vec::new();
        stream
            .read_to_end(&mut data)
            .map_err(|e| ConvertError::io(&self.source, e))?;
        Ok(Some(data))
    }
}

/// Format a display name and address as `Name <addr>`, or whichever is present.
///
/// Names such as `Doe, John` are quoted so the list separators stay unambiguous.
fn format_mailbox(name: Option<&str>, address: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty());
    let address = address.map(str::trim).filter(|a| !a.is_empty());
    match (name, address) {
        (Some(name), Some(addr)) if !name.eq_ignore_ascii_case(addr) => Some(
            EmailAddress {
                display_name: name.to_string(),
                address: addr.to_string(),
            }
            .to_string(),
        ),
        (_, Some(addr)) => Some(addr.to_string()),
        (Some(name), None) => Some(name.to_string()),
        (None, None) => None,
    }
}

fn join_recipients(list: Vec<String>) -> Option<String> {
    if list.is_empty() {
        None
    } else {
        Some(list.join("; "))
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mailbox() {
        assert_eq!(
            format_mailbox(Some("Ann Lee"), Some("ann@example.com")).as_deref(),
            Some("Ann Lee <ann@example.com>")
        );
        assert_eq!(
            format_mailbox(Some("ann@example.com"), Some("ann@example.com")).as_deref(),
            Some("ann@example.com")
        );
        assert_eq!(
            format_mailbox(Some("Sales"), None).as_deref(),
            Some("Sales")
        );
        assert_eq!(format_mailbox(Some("  "), None), None);
        assert_eq!(
            format_mailbox(Some("Doe, John"), Some("john@example.com")).as_deref(),
            Some("\"Doe, John\" <john@example.com>")
        );
    }

    #[test]
    fn test_join_recipients() {
        assert_eq!(join_recipients(Vec::new()), None);
        assert_eq!(
            join_recipients(vec!["a@b.com".into(), "c@d.com".into()]).as_deref(),
            Some("a@b.com; c@d.com")
        );
    }

    #[test]
    fn test_looks_like_template() {
        assert!(looks_like_template(&CFB_MAGIC));
        assert!(!looks_like_template(b"From: a@b.com\r\n"));
    }

    #[test]
    fn test_not_a_compound_file() {
        let data = std::io::Cursor::new(b"plain text, not OLE".repeat(64));
        let err = read_template(data).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidTemplate { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = read_template_file("/definitely/not/here.oft").unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound(_)));
    }
}
