//! Command stripping.

use crate::common::Segment;

/// Remove a matched command from the front of a message body.
///
/// Builds a new body; `message` is left as it was. The command is cut from
/// the first segment's text (after any leading whitespace) and the rest is
/// trimmed. A first segment left empty is dropped, and a body left empty
/// becomes a single `" "` text segment so transports never see a blank
/// broadcast.
///
/// Leading whitespace is skipped before the cut, unlike a plain slice of the
/// raw text at the command's length.
///
/// Callers must only pass a `command` the first segment is known to start
/// with. An empty `command` strips nothing.
pub fn strip_command(message: &[Segment], command: &str) -> Vec<Segment> {
    let mut result = Vec::with_capacity(message.len().max(1));

    match message.split_first() {
        Some((first, rest)) if !command.is_empty() && first.is_text() => {
            let text = first.as_text().unwrap_or("");
            let remainder: String = text
                .trim_start()
                .chars()
                .skip(command.chars().count())
                .collect();
            let remainder = remainder.trim();

            if !remainder.is_empty() {
                result.push(first.with_text(remainder));
            }
            result.extend(rest.iter().cloned());
        }
        _ => result.extend(message.iter().cloned()),
    }

    if result.is_empty() {
        result.push(Segment::text(" "));
    }
    result
}
