use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Closed `<script>` spans, any case, content spanning lines, shortest match
static SCRIPT_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b.*?</script\s*>").expect("script pattern is valid")
});

/// Remove every `<script>...</script>` span, contents included.
///
/// Runs before segmentation so nothing inside a script can become text.
/// Removal repeats until no span is left, since dropping an inner span can
/// join the surrounding fragments into a new one. An opening `<script`
/// without a closing tag is left alone.
pub fn sanitize(markup: &str) -> Cow<'_, str> {
    let mut clean = match SCRIPT_SPAN.replace_all(markup, "") {
        Cow::Borrowed(_) => return Cow::Borrowed(markup),
        Cow::Owned(clean) => clean,
    };

    while SCRIPT_SPAN.is_match(&clean) {
        clean = SCRIPT_SPAN.replace_all(&clean, "").into_owned();
    }

    Cow::Owned(clean)
}

pub fn contains_script(markup: &str) -> bool {
    SCRIPT_SPAN.is_match(markup)
}
