//! In-memory representation of a parsed Outlook template.

use chrono::{DateTime, Utc};

use super::attachment::TemplateAttachment;

/// The fields of an `.oft` document that survive conversion.
///
/// Every field is optional: templates are frequently saved without a sender,
/// recipients or a date.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateMessage {
    /// Sender as `"Name <addr>"` or a bare address.
    pub sender: Option<String>,

    /// Primary recipients, `;` separated.
    pub to: Option<String>,

    /// Carbon-copy recipients, `;` separated.
    pub cc: Option<String>,

    /// Subject line.
    pub subject: Option<String>,

    /// Plain-text body.
    pub body: Option<String>,

    /// HTML body.
    pub html_body: Option<String>,

    /// Submit or delivery time, when the template carries one.
    pub date: Option<DateTime<Utc>>,

    /// Attachments in storage order.
    pub attachments: Vec<TemplateAttachment>,
}

impl TemplateMessage {
    /// `true` if a non-blank HTML body is present.
    pub fn has_html(&self) -> bool {
        self.html_body
            .as_deref()
            .is_some_and(|html| !html.trim().is_empty())
    }

    /// `true` if a non-empty plain-text body is present.
    pub fn has_text(&self) -> bool {
        self.body.as_deref().is_some_and(|text| !text.is_empty())
    }

    /// Attachments referenced by Content-ID, with their position in the template.
    pub fn inline_attachments(&self) -> impl Iterator<Item = (usize, &TemplateAttachment)> {
        self.attachments.iter().enumerate().filter(|(_, a)| a.is_inline())
    }

    /// Attachments without a Content-ID, with their position in the template.
    pub fn regular_attachments(&self) -> impl Iterator<Item = (usize, &TemplateAttachment)> {
        self.attachments.iter().enumerate().filter(|(_, a)| !a.is_inline())
    }
}
