//! MIME assembly for outbound mail.
//!
//! The Gmail send endpoint takes one opaque `raw` field: the full RFC 2822
//! message, base64url encoded. Messages without attachments are a single
//! text/html part; attachments switch the message to multipart/mixed.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use shield_common::services::EmailMessage;

const CRLF: &str = "\r\n";

/// Render the message as an RFC 2822 string.
pub fn build_mime(from_name: &str, from_email: &str, message: &EmailMessage) -> String {
    let mut out = String::new();
    out.push_str(&format!("From: {} <{}>{}", from_name, from_email, CRLF));
    out.push_str(&format!("To: {}{}", message.to.join(", "), CRLF));
    out.push_str(&format!("Subject: {}{}", message.subject, CRLF));
    out.push_str(&format!("MIME-Version: 1.0{}", CRLF));

    if message.attachments.is_empty() {
        out.push_str(&format!(
            "Content-Type: text/html; charset=\"UTF-8\"{}{}",
            CRLF, CRLF
        ));
        out.push_str(&message.html);
        return out;
    }

    // Boundary only needs to not occur in the payload; a fixed marker with
    // an unusual prefix is enough for our own generated bodies.
    let boundary = "=_shield_mailer_boundary";
    out.push_str(&format!(
        "Content-Type: multipart/mixed; boundary=\"{}\"{}{}",
        boundary, CRLF, CRLF
    ));

    out.push_str(&format!("--{}{}", boundary, CRLF));
    out.push_str(&format!(
        "Content-Type: text/html; charset=\"UTF-8\"{}{}",
        CRLF, CRLF
    ));
    out.push_str(&message.html);
    out.push_str(CRLF);

    for attachment in &message.attachments {
        out.push_str(&format!("--{}{}", boundary, CRLF));
        out.push_str(&format!(
            "Content-Type: application/octet-stream; name=\"{}\"{}",
            attachment.filename, CRLF
        ));
        out.push_str(&format!(
            "Content-Disposition: attachment; filename=\"{}\"{}",
            attachment.filename, CRLF
        ));
        out.push_str(&format!("Content-Transfer-Encoding: base64{}{}", CRLF, CRLF));

        // 76-column wrapping per RFC 2045.
        let encoded = STANDARD.encode(&attachment.content);
        for chunk in encoded.as_bytes().chunks(76) {
            out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
            out.push_str(CRLF);
        }
    }

    out.push_str(&format!("--{}--{}", boundary, CRLF));
    out
}

/// Encode the rendered message the way the Gmail API expects it.
pub fn encode_raw(mime: &str) -> String {
    URL_SAFE.encode(mime.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shield_common::services::EmailAttachment;

    #[test]
    fn simple_message_is_single_part_html() {
        let message = EmailMessage::new("a@x.com", "Hello", "<p>Hi</p>");
        let mime = build_mime("Shield Support", "ops@shieldsupport.example", &message);
        assert!(mime.contains("From: Shield Support <ops@shieldsupport.example>"));
        assert!(mime.contains("To: a@x.com"));
        assert!(mime.contains("Subject: Hello"));
        assert!(mime.contains("Content-Type: text/html"));
        assert!(!mime.contains("multipart/mixed"));
        assert!(mime.ends_with("<p>Hi</p>"));
    }

    #[test]
    fn multiple_recipients_join_with_commas() {
        let mut message = EmailMessage::new("a@x.com", "Hello", "<p>Hi</p>");
        message.to.push("b@y.com".to_string());
        let mime = build_mime("Shield Support", "ops@shieldsupport.example", &message);
        assert!(mime.contains("To: a@x.com, b@y.com"));
    }

    #[test]
    fn attachments_switch_to_multipart() {
        let mut message = EmailMessage::new("a@x.com", "CV", "<p>attached</p>");
        message.attachments.push(EmailAttachment {
            filename: "resume.pdf".to_string(),
            content: vec![1, 2, 3, 4],
        });
        let mime = build_mime("Shield Support", "ops@shieldsupport.example", &message);
        assert!(mime.contains("multipart/mixed"));
        assert!(mime.contains("filename=\"resume.pdf\""));
        assert!(mime.contains("Content-Transfer-Encoding: base64"));
        assert!(mime.trim_end().ends_with("--=_shield_mailer_boundary--"));
    }

    #[test]
    fn raw_encoding_is_url_safe() {
        let encoded = encode_raw("a?b/c");
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }
}
