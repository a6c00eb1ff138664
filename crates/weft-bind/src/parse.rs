//! Attribute micro-syntax parsers
//!
//! Two grammars ship: the action grammar (`eventSpec:tag#method`) and the
//! generic dot-delimited tag grammar. Both are total over arbitrary input:
//! malformed tokens are skipped, never fatal.

/// Method invoked when an action entry omits `#method`
pub const DEFAULT_METHOD: &str = "handle_event";

/// Parser function signature stored in the registry
pub type ParseFn = fn(&str) -> Vec<TagEntry>;

/// One parsed tag entry: the tag to match plus trailing fields.
///
/// For the action grammar the fields are `[event, method]`; for the generic
/// grammar they are whatever dot-separated tokens follow the tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub tag: String,
    pub fields: Vec<String>,
}

impl TagEntry {
    pub fn new(tag: &str, fields: Vec<String>) -> Self {
        Self {
            tag: tag.to_string(),
            fields,
        }
    }

    /// Field at position `i`, if present
    pub fn field(&self, i: usize) -> Option<&str> {
        self.fields.get(i).map(String::as_str)
    }
}

/// Parse a `data-action` value: whitespace/newline-separated tokens of
/// `eventSpec:tagName#methodName`, with `#methodName` optional.
pub fn parse_actions(value: &str) -> Vec<TagEntry> {
    let mut entries = Vec::new();
    for token in value.split_whitespace() {
        // The event spec may itself contain colons, so the tag starts after
        // the last one. Tokens without a colon are skipped.
        let Some(colon) = token.rfind(':') else {
            continue;
        };
        let event = &token[..colon];
        let rest = &token[colon + 1..];
        if event.is_empty() || rest.is_empty() {
            continue;
        }
        let (tag, method) = match rest.rfind('#') {
            Some(hash) => (&rest[..hash], &rest[hash + 1..]),
            None => (rest, DEFAULT_METHOD),
        };
        if tag.is_empty() {
            continue;
        }
        let method = if method.is_empty() { DEFAULT_METHOD } else { method };
        entries.push(TagEntry::new(
            tag,
            vec![event.to_string(), method.to_string()],
        ));
    }
    entries
}

/// Parse a generic registered-tag value: whitespace-separated tokens, each
/// split on `.` into a tag plus handler-defined fields.
pub fn parse_tags(value: &str) -> Vec<TagEntry> {
    value
        .split_whitespace()
        .filter_map(|token| {
            let mut parts = token.split('.');
            let tag = parts.next().unwrap_or("");
            if tag.is_empty() {
                return None;
            }
            Some(TagEntry::new(tag, parts.map(str::to_string).collect()))
        })
        .collect()
}
