//! Attachments carried by an Outlook template.

/// A single attachment extracted from a template.
///
/// Unlike a parsed mailbox message, template attachments are small and are
/// kept fully decoded in memory.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateAttachment {
    /// Long (display) filename, `PR_ATTACH_LONG_FILENAME`.
    pub long_filename: Option<String>,

    /// 8.3 filename, `PR_ATTACH_FILENAME`.
    pub short_filename: Option<String>,

    /// Content-ID used by the HTML body (`cid:` references).
    pub content_id: Option<String>,

    /// MIME type recorded by Outlook, if any (`PR_ATTACH_MIME_TAG`).
    pub mime_tag: Option<String>,

    /// Raw attachment bytes.
    #[serde(skip)]
    pub data: Vec<u8>,
}

impl TemplateAttachment {
    /// Filename to use in the output message.
    ///
    /// Prefers the long filename, then the short one. `index` is the
    /// zero-based position of the attachment and only feeds the generated
    /// fallback name.
    pub fn filename(&self, index: usize) -> String {
        non_blank(self.long_filename.as_deref())
            .or_else(|| non_blank(self.short_filename.as_deref()))
            .map(str::to_string)
            .unwrap_or_else(|| format!("attachment_{}.bin", index + 1))
    }

    /// Content-ID without angle brackets, if one is set.
    pub fn content_id(&self) -> Option<&str> {
        let cid = self.content_id.as_deref()?.trim();
        let cid = cid.strip_prefix('<').unwrap_or(cid);
        let cid = cid.strip_suffix('>').unwrap_or(cid).trim();
        if cid.is_empty() {
            None
        } else {
            Some(cid)
        }
    }

    /// `true` if the attachment is embedded in the HTML body.
    pub fn is_inline(&self) -> bool {
        self.content_id().is_some()
    }

    /// Size of the payload in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_prefers_long() {
        let att = TemplateAttachment {
            long_filename: Some("Quarterly Report.pdf".into()),
            short_filename: Some("QUARTE~1.PDF".into()),
            ..Default::default()
        };
        assert_eq!(att.filename(0), "Quarterly Report.pdf");
    }

    #[test]
    fn test_filename_falls_back() {
        let att = TemplateAttachment {
            long_filename: Some("   ".into()),
            short_filename: Some("LOGO.PNG".into()),
            ..Default::default()
        };
        assert_eq!(att.filename(0), "LOGO.PNG");
        assert_eq!(TemplateAttachment::default().filename(2), "attachment_3.bin");
    }

    #[test]
    fn test_content_id_strips_brackets() {
        let att = TemplateAttachment {
            content_id: Some(" <image001@test.com> ".into()),
            ..Default::default()
        };
        assert_eq!(att.content_id(), Some("image001@test.com"));
        assert!(att.is_inline());
    }

    #[test]
    fn test_empty_content_id_is_not_inline() {
        let att = TemplateAttachment {
            content_id: Some("<>".into()),
            ..Default::default()
        };
        assert_eq!(att.content_id(), None);
        assert!(!att.is_inline());
    }
}
