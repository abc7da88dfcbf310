//! Notice-only rewriting.

use crate::request::NotificationRequest;

/// Tag appended to every notice-only request.
pub const NOTICE_ONLY_TAG: &str = "notice_only";

/// Prefix of every notice-only message.
pub const NOTICE_ONLY_PREFIX: &str = "[Notice Only]";

/// Mark a request as informational.
///
/// Sets `error_message` to `[Notice Only] <class>: <message>` and appends
/// the `notice_only` tag. The dispatcher only calls this for requests with
/// `notice_only` set.
pub fn apply(mut request: NotificationRequest) -> NotificationRequest {
    let message = format!(
        "{} {}: {}",
        NOTICE_ONLY_PREFIX,
        request.error_class_label(),
        request.error_message_text()
    );
    request.error_message = Some(message);
    request.tags = Some(match request.tags.take() {
        Some(existing) if !existing.is_empty() => format!("{}, {}", existing, NOTICE_ONLY_TAG),
        _ => NOTICE_ONLY_TAG.to_string(),
    });
    request
}
