//! HTML sanitizer for generated course content
//!
//! Upstream generation output is untrusted markup. Before a course fragment
//! is handed back to the browser it is reduced to a fixed allow-list of
//! inert tags, with script/style/iframe blocks and inline event handlers
//! removed outright. This is a filter, not a parser: no tag-balance
//! guarantee is made, only the absence of disallowed markup.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Tags permitted to survive sanitization (matched case-insensitively)
const ALLOWED_TAGS: &[&str] = &[
    "h3", "h4", "p", "strong", "em", "ul", "li", "ol", "button", "b", "i",
];

/// Call-to-action appended when the generator produced no button
const DEFAULT_BUTTON: &str =
    r#"<button class="btn btn-primary" style="margin-top: 15px;">Start Learning</button>"#;

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script>").expect("valid script-block pattern")
});

static STYLE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style>").expect("valid style-block pattern")
});

static IFRAME_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<iframe\b[^>]*>.*?</iframe>").expect("valid iframe-block pattern")
});

static EVENT_HANDLER_ATTR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)on\w+="[^"]*""#).expect("valid handler-attribute pattern"));

/// Matches any `<...>` span, tag-shaped or not; capture 1 is everything
/// between the angle brackets (after an optional `/`). Matching every span
/// matters: a filter that only recognizes letter-named tags leaves stray
/// `<` characters behind, and deleting an inner tag can then reconstruct
/// live markup (`<<script>script>` becoming `<script>`). Comments,
/// doctypes, and processing instructions are also `<...>` spans with no
/// allow-listed name, so they are deleted by the same rule. Allow-list
/// membership is decided per match in [`sanitize_html`], since the regex
/// engine has no negative lookahead.
static TAG_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</?([^>]+)>").expect("valid tag-span pattern"));

/// Leading tag name within a tag span, if the span has one
static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*").expect("valid tag-name pattern"));

/// Reduce untrusted generator output to a safe, embeddable HTML fragment.
///
/// Processing order:
/// 1. Delete whole `<script>`, `<style>` and `<iframe>` blocks (including
///    their content, spanning newlines).
/// 2. Strip inline `on*="..."` event-handler attributes.
/// 3. Delete every `<...>` span that does not open or close a tag in
///    [`ALLOWED_TAGS`] (comments, doctypes, and other non-tag markup
///    included); the text between deleted spans is kept.
/// 4. Prepend a `<h3>Learn About {topic}</h3>` heading if none survived.
/// 5. Append a call-to-action button if none survived.
///
/// The topic is trusted internal input and interpolated verbatim. The
/// injection checks in steps 4-5 inspect the current state of the fragment,
/// which makes the whole transform idempotent for a fixed topic.
pub fn sanitize_html(raw: &str, topic: &str) -> String {
    let stripped = SCRIPT_BLOCK.replace_all(raw, "");
    let stripped = STYLE_BLOCK.replace_all(&stripped, "");
    let stripped = IFRAME_BLOCK.replace_all(&stripped, "");
    let stripped = EVENT_HANDLER_ATTR.replace_all(&stripped, "");

    let filtered = TAG_SPAN.replace_all(&stripped, |caps: &Captures| {
        let allowed = TAG_NAME
            .find(&caps[1])
            .map(|name| ALLOWED_TAGS.contains(&name.as_str().to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if allowed {
            caps[0].to_string()
        } else {
            String::new()
        }
    });

    let mut sanitized = filtered.into_owned();

    if !sanitized.contains("<h3>") {
        sanitized = format!("<h3>Learn About {}</h3>{}", topic, sanitized);
    }

    if !sanitized.contains("<button") {
        sanitized.push_str(DEFAULT_BUTTON);
    }

    sanitized
}
