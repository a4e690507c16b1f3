//! Stripping of Markdown code fences from raw model output.

const FENCE: &str = "```";

/// Removes a Markdown code-fence wrapper from model output.
///
/// The text is trimmed. When it opens with a fence, the opening fence line
/// (language tag included) is dropped, and if a closing fence follows,
/// everything from the last fence onward is dropped too. Text without a
/// leading fence is returned trimmed. Stripping repeats while the result
/// still opens with a fence, so a second pass never changes the output.
///
/// ```
/// use param_extract::extraction::sanitize;
///
/// assert_eq!(sanitize("```json\n{\"parameters\": []}\n```"), "{\"parameters\": []}");
/// assert_eq!(sanitize("  {}  "), "{}");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    let mut current = text.trim();
    while let Some(after_open) = current.strip_prefix(FENCE) {
        current = strip_fence_body(after_open);
    }
    current.to_string()
}

fn strip_fence_body(after_open: &str) -> &str {
    // A single-line payload has no language tag to drop.
    let body = after_open
        .find('\n')
        .map_or(after_open, |newline| &after_open[newline + 1..]);

    body.rfind(FENCE).map_or(body, |close| &body[..close]).trim()
}
