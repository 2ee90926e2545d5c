//! End-to-end conversion tests: generated `.oft` in, parsed `.eml` out.

mod common;

use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use mail_parser::{Message, MessageParser, MimeHeaders};

use common::{newsletter, Attachment, OftBuilder};
use oft2eml::convert::batch::{convert_batch, BatchEvent, BatchOptions, BatchSummary};
use oft2eml::convert::mime::build_eml;
use oft2eml::error::ConvertError;
use oft2eml::model::template::TemplateMessage;
use oft2eml::parser::props;
use oft2eml::{convert_oft_to_eml, default_output_path};

fn parse(bytes: &[u8]) -> Message<'_> {
    MessageParser::default()
        .parse(bytes)
        .expect("output parses as a message")
}

/// First text body, without the trailing line break the builder may add.
fn body_text(message: &Message<'_>) -> Option<String> {
    message.body_text(0).map(|b| b.trim_end().to_string())
}

fn write_fixture(dir: &Path, name: &str, builder: &OftBuilder) -> PathBuf {
    let path = dir.join(name);
    builder.write_to(&path);
    path
}

// ─── Single file ────────────────────────────────────────────────────

#[test]
fn test_convert_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "welcome.oft", &newsletter());
    let output = dir.path().join("nested").join("welcome.eml");

    let written = convert_oft_to_eml(&input, Some(&output)).unwrap();
    assert_eq!(written, output);

    let bytes = std::fs::read(&output).unwrap();
    let message = parse(&bytes);
    assert_eq!(message.subject(), Some("Monthly Newsletter"));

    let from = message.from().and_then(|a| a.first()).unwrap();
    assert_eq!(from.address(), Some("news@example.com"));
    assert_eq!(from.name(), Some("News Desk"));

    let to = message.to().and_then(|a| a.first()).unwrap();
    assert_eq!(to.address(), Some("ann@example.com"));
    let cc = message.cc().and_then(|a| a.first()).unwrap();
    assert_eq!(cc.address(), Some("boss@example.com"));
}

#[test]
fn test_html_inline_and_regular_attachments() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "news.oft", &newsletter());
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("news.eml"))).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("multipart/mixed"));
    assert!(text.contains("multipart/related"));
    assert!(text.contains("multipart/alternative"));

    let message = parse(&bytes);
    assert_eq!(body_text(&message).as_deref(), Some("Plain text version"));
    assert!(message
        .body_html(0)
        .is_some_and(|html| html.contains("cid:logo@example.com")));

    let parts: Vec<_> = message.attachments().collect();
    assert_eq!(parts.len(), 2);

    let logo = parts
        .iter()
        .find(|p| p.content_id() == Some("logo@example.com"))
        .expect("inline image present");
    assert_eq!(logo.contents(), &[0x89, b'P', b'N', b'G', 0, 1, 2, 3]);
    let ct = logo.content_type().unwrap();
    assert_eq!((ct.ctype(), ct.subtype()), ("image", Some("png")));

    let pdf = parts
        .iter()
        .find(|p| p.attachment_name() == Some("report.pdf"))
        .expect("pdf attachment present");
    assert_eq!(pdf.contents(), b"%PDF-1.4 fake");
    assert_eq!(pdf.content_type().unwrap().subtype(), Some("pdf"));
}

#[test]
fn test_plain_text_only_template() {
    let template = TemplateMessage {
        sender: Some("sender@example.com".into()),
        to: Some("recipient@example.com".into()),
        subject: Some("Test Subject".into()),
        body: Some("Test body content".into()),
        ..Default::default()
    };
    let bytes = build_eml(&template).unwrap();
    let message = parse(&bytes);

    assert_eq!(message.subject(), Some("Test Subject"));
    assert_eq!(body_text(&message).as_deref(), Some("Test body content"));
    assert_eq!(message.attachment_count(), 0);
    assert!(!String::from_utf8_lossy(&bytes).contains("multipart/"));
}

#[test]
fn test_unicode_survives_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "unicode.oft",
        &OftBuilder::new()
            .string(props::PR_SUBJECT, "Réunion – 会議 \u{1F4C5}")
            .string(props::PR_BODY, "Zażółć gęślą jaźń"),
    );
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("u.eml"))).unwrap();

    let bytes = std::fs::read(output).unwrap();
    let message = parse(&bytes);
    assert_eq!(message.subject(), Some("Réunion – 会議 \u{1F4C5}"));
    assert_eq!(body_text(&message).as_deref(), Some("Zażółć gęślą jaźń"));
}

#[test]
fn test_template_date_becomes_date_header() {
    let when = Utc.with_ymd_and_hms(2023, 11, 2, 14, 5, 9).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "dated.oft",
        &OftBuilder::new()
            .string(props::PR_SUBJECT, "Dated")
            .time(props::PR_CLIENT_SUBMIT_TIME, when),
    );
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("d.eml"))).unwrap();

    let bytes = std::fs::read(output).unwrap();
    let message = parse(&bytes);
    assert_eq!(message.date().map(|d| d.to_timestamp()), Some(when.timestamp()));
}

#[test]
fn test_display_name_recipients_preserved() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "team.oft",
        &OftBuilder::new()
            .string(props::PR_SUBJECT, "Hi team")
            .string(props::PR_DISPLAY_TO, "Marketing Team"),
    );
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("t.eml"))).unwrap();

    let text = std::fs::read_to_string(output).unwrap();
    assert!(text
        .lines()
        .any(|l| l.starts_with("To:") && l.contains("Marketing Team")));
}

#[test]
fn test_attachment_without_name_or_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "blob.oft",
        &OftBuilder::new()
            .string(props::PR_BODY, "see attached")
            .attachment(Attachment {
                data: Some(vec![1, 2, 3, 4]),
                ..Default::default()
            }),
    );
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("b.eml"))).unwrap();

    let bytes = std::fs::read(output).unwrap();
    let message = parse(&bytes);
    let part = message.attachment(0).expect("one attachment");
    assert_eq!(part.attachment_name(), Some("attachment_1.bin"));
    assert_eq!(part.contents(), &[1, 2, 3, 4]);
    assert_eq!(
        part.content_type().map(|ct| (ct.ctype(), ct.subtype())),
        Some(("application", Some("octet-stream")))
    );
}

#[test]
fn test_inline_attachment_without_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "signature.oft",
        &OftBuilder::new()
            .string(props::PR_SUBJECT, "Signature")
            .string(props::PR_BODY, "Regards")
            .attachment(Attachment {
                long_filename: Some("sig.png".into()),
                content_id: Some("<sig@example.com>".into()),
                data: Some(vec![0x89, b'P', b'N', b'G', 9, 9]),
                ..Default::default()
            }),
    );
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("s.eml"))).unwrap();

    let bytes = std::fs::read(output).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("multipart/mixed"));
    assert!(!text.contains("multipart/related"));
    assert!(!text.contains("text/html"));

    let message = parse(&bytes);
    assert_eq!(body_text(&message).as_deref(), Some("Regards"));
    let part = message
        .parts
        .iter()
        .find(|p| p.content_id() == Some("sig@example.com"))
        .expect("inline part keeps its content id");
    assert_eq!(part.contents(), &[0x89, b'P', b'N', b'G', 9, 9]);
    assert_eq!(
        part.content_disposition().map(|d| d.ctype()),
        Some("inline")
    );
}

#[test]
fn test_comma_display_names_stay_whole() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(
        dir.path(),
        "exchange.oft",
        &OftBuilder::new()
            .string(props::PR_SUBJECT, "Quarterly review")
            .string(props::PR_SENDER_NAME, "Smith, Pat")
            .string(props::PR_SENDER_SMTP_ADDRESS, "pat@example.com")
            .recipient(props::MAPI_TO, "Doe, John", "john@example.com")
            .recipient(props::MAPI_TO, "Roe, Jane", "jane@example.com"),
    );
    let output = convert_oft_to_eml(&input, Some(&dir.path().join("e.eml"))).unwrap();

    let bytes = std::fs::read(output).unwrap();
    let message = parse(&bytes);

    let from = message.from().and_then(|a| a.as_list()).unwrap();
    assert_eq!(from.len(), 1);
    assert_eq!(from[0].name(), Some("Smith, Pat"));
    assert_eq!(from[0].address(), Some("pat@example.com"));

    let to = message.to().and_then(|a| a.as_list()).unwrap();
    assert_eq!(to.len(), 2);
    assert_eq!(to[0].name(), Some("Doe, John"));
    assert_eq!(to[0].address(), Some("john@example.com"));
    assert_eq!(to[1].name(), Some("Roe, Jane"));
    assert_eq!(to[1].address(), Some("jane@example.com"));
}

#[test]
fn test_invalid_template_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.oft");
    std::fs::write(&input, b"this is not an OLE file").unwrap();

    let err = convert_oft_to_eml(&input, Some(&dir.path().join("x.eml"))).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidTemplate { .. }));
    assert!(!dir.path().join("x.eml").exists());
}

#[test]
fn test_default_output_path_uses_stem() {
    assert_eq!(
        default_output_path(Path::new("templates/Quarterly Update.oft")).unwrap(),
        PathBuf::from("Quarterly Update.eml")
    );
}

// ─── Batch ──────────────────────────────────────────────────────────

#[test]
fn test_batch_partial_success() {
    let dir = tempfile::tempdir().unwrap();
    let good_a = write_fixture(dir.path(), "a.oft", &newsletter());
    let good_b = write_fixture(
        dir.path(),
        "b.oft",
        &OftBuilder::new().string(props::PR_SUBJECT, "B"),
    );
    let bad = dir.path().join("c.oft");
    std::fs::write(&bad, b"garbage").unwrap();
    let out = dir.path().join("out");

    let events = std::cell::RefCell::new(Vec::new());
    let report = convert_batch(
        &[good_a, bad, good_b],
        &out,
        BatchOptions::default(),
        &|event| events.borrow_mut().push(event),
        None,
    )
    .unwrap();

    assert_eq!(report.summary(), BatchSummary::Partial);
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);
    assert!(out.join("a.eml").exists());
    assert!(out.join("b.eml").exists());
    assert!(!out.join("c.eml").exists());

    let events = events.into_inner();
    assert_eq!(events.len(), 6);
    assert!(matches!(
        &events[3],
        BatchEvent::Failed { index: 1, .. }
    ));
}

#[test]
fn test_batch_without_overwrite_keeps_existing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "same.oft", &newsletter());
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("same.eml"), b"keep me").unwrap();

    let report = convert_batch(
        std::slice::from_ref(&input),
        &out,
        BatchOptions { overwrite: false },
        &|_| {},
        None,
    )
    .unwrap();

    assert_eq!(report.summary(), BatchSummary::AllSucceeded);
    assert_eq!(std::fs::read(out.join("same.eml")).unwrap(), b"keep me");
    assert!(out.join("same_1.eml").exists());
}

#[test]
fn test_batch_overwrite_replaces() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "same.oft", &newsletter());
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();
    std::fs::write(out.join("same.eml"), b"old").unwrap();

    convert_batch(&[input], &out, BatchOptions::default(), &|_| {}, None).unwrap();

    let bytes = std::fs::read(out.join("same.eml")).unwrap();
    assert_eq!(parse(&bytes).subject(), Some("Monthly Newsletter"));
    assert!(!out.join("same_1.eml").exists());
}
