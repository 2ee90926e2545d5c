//! MIME assembly: turns a [`TemplateMessage`] into RFC 5322 message bytes.
//!
//! Tree shapes:
//! - text only: `text/plain`
//! - text + attachments: `multipart/mixed [text/plain, attachments…]`
//! - HTML: `multipart/related [multipart/alternative [text/plain?, text/html], inline…]`,
//!   wrapped in `multipart/mixed` when regular attachments exist.

use mail_builder::headers::address::Address;
use mail_builder::headers::content_type::ContentType;
use mail_builder::headers::text::Text;
use mail_builder::mime::MimePart;
use mail_builder::MessageBuilder;

use crate::convert::content_type::content_type_for;
use crate::error::{ConvertError, Result};
use crate::model::address::EmailAddress;
use crate::model::attachment::TemplateAttachment;
use crate::model::template::TemplateMessage;

/// Serialize a template as `.eml` bytes.
pub fn build_eml(template: &TemplateMessage) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new();

    if let Some(sender) = non_blank(&template.sender) {
        builder = match parse_addresses(sender) {
            Some(addr) => builder.from(addr),
            None => builder.header("From", Text::new(sender.trim().to_string())),
        };
    }
    if let Some(to) = non_blank(&template.to) {
        builder = match parse_addresses(to) {
            Some(addr) => builder.to(addr),
            None => builder.header("To", Text::new(to.trim().to_string())),
        };
    }
    if let Some(cc) = non_blank(&template.cc) {
        builder = match parse_addresses(cc) {
            Some(addr) => builder.cc(addr),
            None => builder.header("Cc", Text::new(cc.trim().to_string())),
        };
    }
    if let Some(subject) = non_blank(&template.subject) {
        builder = builder.subject(subject.to_string());
    }
    if let Some(date) = template.date {
        builder = builder.date(date.timestamp());
    }

    builder
        .body(body_tree(template))
        .write_to_vec()
        .map_err(|e| ConvertError::Mime(e.to_string()))
}

/// Build the body part tree for a template.
fn body_tree(template: &TemplateMessage) -> MimePart<'static> {
    let text = MimePart::new("text/plain", template.body.clone().unwrap_or_default());

    if !template.has_html() {
        if template.attachments.is_empty() {
            return text;
        }
        let mut parts = vec![text];
        parts.extend(
            template
                .attachments
                .iter()
                .enumerate()
                .map(|(i, att)| attachment_part(att, i)),
        );
        return MimePart::new("multipart/mixed", parts);
    }

    let mut alternative = Vec::with_capacity(2);
    if template.has_text() {
        alternative.push(text);
    }
    alternative.push(MimePart::new(
        "text/html",
        template.html_body.clone().unwrap_or_default(),
    ));

    let mut related = vec![MimePart::new("multipart/alternative", alternative)];
    related.extend(
        template
            .inline_attachments()
            .map(|(i, att)| attachment_part(att, i)),
    );
    let related = MimePart::new("multipart/related", related);

    let regular: Vec<_> = template
        .regular_attachments()
        .map(|(i, att)| attachment_part(att, i))
        .collect();
    if regular.is_empty() {
        related
    } else {
        let mut mixed = vec![related];
        mixed.extend(regular);
        MimePart::new("multipart/mixed", mixed)
    }
}

/// One attachment: inline with a Content-ID, or a regular download.
fn attachment_part(att: &TemplateAttachment, index: usize) -> MimePart<'static> {
    let filename = att.filename(index);
    let content_type = ContentType::new(content_type_for(&filename, att.mime_tag.as_deref()))
        .attribute("name", filename.clone());
    let part = MimePart::new(content_type, att.data.clone());

    match att.content_id() {
        Some(cid) => part.inline().cid(cid.to_string()),
        None => part.attachment(filename),
    }
}

/// Parse an address header value into a builder address.
///
/// Returns `None` when any entry is not a routable address (e.g. Outlook
/// display names such as `"Marketing Team"`), so the caller can emit the
/// original text instead of dropping it.
fn parse_addresses(raw: &str) -> Option<Address<'static>> {
    let parsed = EmailAddress::parse_list(raw);
    if parsed.is_empty() || !parsed.iter().all(EmailAddress::is_routable) {
        return None;
    }

    let mut list: Vec<Address<'static>> = parsed
        .into_iter()
        .map(|addr| {
            let name = if addr.display_name.is_empty() {
                None
            } else {
                Some(addr.display_name)
            };
            Address::new_address(name, addr.address)
        })
        .collect();

    if list.len() == 1 {
        list.pop()
    } else {
        Some(Address::new_list(list))
    }
}

/// The field as stored, unless it is missing or only whitespace.
fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}
