use std::collections::HashSet;

use ammonia::Builder;

/// Strips all markup from a single-line field such as a title or tag,
/// leaving decoded plain text with collapsed whitespace.
pub fn plain_text(input: &str) -> String {
    let mut builder = Builder::empty();
    builder.clean_content_tags(HashSet::from(["script", "style"]));
    let stripped = builder.clean(input).to_string();
    let decoded = html_escape::decode_html_entities(&stripped);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans rich post content down to ammonia's safe HTML subset.
/// Scripts, event handlers and `javascript:` URLs never survive.
pub fn post_html(input: &str) -> String {
    Builder::default()
        .link_rel(Some("noopener noreferrer ugc"))
        .clean(input)
        .to_string()
}
