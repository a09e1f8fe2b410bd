//! SMS body composition.

use std::borrow::Cow;

use super::Submission;

/// Longest message text relayed verbatim.
pub const MAX_MESSAGE_CHARS: usize = 240;

const ELLIPSIS: &str = "...";

/// Shorten `message` to at most [`MAX_MESSAGE_CHARS`] characters.
///
/// Longer text keeps its first 237 characters followed by `...`.
pub fn truncate_message(message: &str) -> Cow<'_, str> {
    if message.chars().count() <= MAX_MESSAGE_CHARS {
        return Cow::Borrowed(message);
    }

    let keep = MAX_MESSAGE_CHARS - ELLIPSIS.len();
    let mut truncated: String = message.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

/// Build the text sent to the owner for one submission.
pub fn compose_sms(title: &str, submission: &Submission) -> String {
    let phone = if submission.phone.is_empty() {
        "N/A"
    } else {
        submission.phone.as_str()
    };

    let mut body = format!(
        "{}\nName: {}\nEmail: {}\nPhone: {}\nMessage: {}",
        title,
        submission.name,
        submission.email,
        phone,
        truncate_message(&submission.message),
    );

    if !submission.source.is_empty() {
        body.push_str("\nSource: ");
        body.push_str(&submission.source);
    }

    body
}
