//! Nested tag codec.
//!
//! The wire format is a constrained, HTML-like tag grammar:
//!
//! ```text
//! INPUT      := JUNK? VALUE*
//! JUNK       := (whitespace | ',')+
//! VALUE      := '<' NAME '>' DATA '</' NAME '>'
//!             | '<' NAME '>' VALUE+ '</' NAME '>'
//! NAME       := (letter | '_') (letter | digit | '_' | '-' | '.' | ':')*
//! ```
//!
//! A tag holding text is a leaf. A tag holding nested tags is a mapping.
//! Repeating a tag at one level is how lists are expressed, so decoding
//! always yields a list of values per tag name.

use std::borrow::Cow;

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::encoder::Encoder;
use crate::error::{EncodeError, EncodeResult, ParseError, ParseResult};
use crate::types::{json_type_name, tag_map_to_json, TagMap, TagValue};

const XML_INSTRUCTIONS: &str = "Please enclose the extracted information in HTML style tags with \
    the tag name corresponding to the corresponding component ID. Use angle style brackets for the \
    tags ('>' and '<'). Only output tags when you're confident about the information that was \
    extracted from the user's query. If you can extract several pieces of relevant information \
    from the query, then include all of them. If the type is an array, please repeat the \
    corresponding tag name multiple times once for each relevant extraction. Do NOT output \
    anything except for the extracted information. Only output information inside the HTML \
    style tags. Do not include any notes or any clarifications. ";

// ============================================================================
// Encoding
// ============================================================================

/// Write `value` under `tag`, appending to `out`.
///
/// - strings, numbers and booleans become `<tag>value</tag>`, with `&`, `<`
///   and `>` escaped
/// - lists repeat the tag once per element
/// - mappings become `<tag>` + children sorted by key + `</tag>`
///
/// # Errors
///
/// Returns [`EncodeError::UnsupportedType`] for `null`.
pub fn write_tag(tag: &str, value: &JsonValue, out: &mut String) -> EncodeResult<()> {
    match value {
        JsonValue::String(s) => write_literal(tag, s, out),
        JsonValue::Number(n) => write_literal(tag, &n.to_string(), out),
        JsonValue::Bool(b) => write_literal(tag, if *b { "true" } else { "false" }, out),
        JsonValue::Array(items) => {
            for item in items {
                write_tag(tag, item, out)?;
            }
        }
        JsonValue::Object(map) => {
            let mut entries: Vec<_> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('<');
            out.push_str(tag);
            out.push('>');
            for (key, child) in entries {
                write_tag(key, child, out)?;
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        JsonValue::Null => return Err(EncodeError::unsupported_type(tag, json_type_name(value))),
    }
    Ok(())
}

fn write_literal(tag: &str, text: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    escape_xml(text, out);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escape markup characters in text content.
fn escape_xml(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Encode a single value under a root tag.
///
/// # Errors
///
/// See [`write_tag`].
pub fn encode_tag(tag: &str, value: &JsonValue) -> EncodeResult<String> {
    let mut out = String::new();
    write_tag(tag, value, &mut out)?;
    Ok(out)
}

// ============================================================================
// Decoding
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Start { name: String, self_closing: bool },
    End { name: String },
    Comment,
    Text(&'a str),
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

/// Split a tag name off the front of `s`, returning the lowercased name
/// and the remainder.
fn read_name(s: &str) -> Option<(String, &str)> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if is_name_start(c) => {}
        _ => return None,
    }
    let end = chars
        .find(|(_, c)| !is_name_char(*c))
        .map_or(s.len(), |(i, _)| i);
    Some((s[..end].to_ascii_lowercase(), &s[end..]))
}

/// Outcome of reading markup at a `<`.
#[derive(Debug)]
enum Markup<'a> {
    /// A complete token and the number of bytes it spans.
    Token(Token<'a>, usize),
    /// The `<` does not open valid markup and is plain text.
    Literal,
    /// The markup may be valid but is cut off by the end of the input.
    Incomplete,
}

/// Read one markup token at the start of `s` (which begins with `<`).
fn read_markup(s: &str) -> Markup<'_> {
    if let Some(body) = s.strip_prefix("<!--") {
        return match body.find("-->") {
            Some(end) => Markup::Token(Token::Comment, 4 + end + 3),
            None => Markup::Incomplete,
        };
    }

    let Some(close) = s.find('>') else {
        return Markup::Incomplete;
    };
    let inner = &s[1..close];

    if let Some(rest) = inner.strip_prefix('/') {
        let Some((name, tail)) = read_name(rest.trim_start()) else {
            return Markup::Literal;
        };
        if !tail.is_empty() && !tail.starts_with(char::is_whitespace) {
            return Markup::Literal;
        }
        return Markup::Token(Token::End { name }, close + 1);
    }

    let Some((name, tail)) = read_name(inner) else {
        return Markup::Literal;
    };
    if !(tail.is_empty() || tail.starts_with(char::is_whitespace) || tail.starts_with('/')) {
        return Markup::Literal;
    }
    let self_closing = tail.trim_end().ends_with('/');
    Markup::Token(Token::Start { name, self_closing }, close + 1)
}

/// Decode the five predefined entities and numeric character references.
fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let entity = &rest[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, len)) => {
                out.push(c);
                rest = &rest[len..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[derive(Debug, Default)]
struct Frame {
    name: String,
    entries: TagMap,
    text: Option<String>,
}

/// Stack-based scanner for the nested tag grammar.
///
/// A parser is a single-use accumulator: create one per document with
/// [`TagParser::new`], [`feed`](TagParser::feed) it text, then call
/// [`finish`](TagParser::finish).
///
/// # Example
///
/// ```rust
/// use strex_output::xml::TagParser;
///
/// let mut parser = TagParser::new();
/// parser.feed("<a>1</a>, <a>2</a>");
/// let decoded = parser.finish().unwrap();
/// assert_eq!(decoded["a"].len(), 2);
/// ```
#[derive(Debug)]
pub struct TagParser {
    stack: Vec<Frame>,
    pending: String,
    failure: Option<&'static str>,
    saw_markup: bool,
}

impl Default for TagParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TagParser {
    /// Create a parser with an empty root frame.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![Frame::default()],
            pending: String::new(),
            failure: None,
            saw_markup: false,
        }
    }

    /// Current nesting depth; zero outside any tag.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Whether the input seen so far is malformed.
    #[must_use]
    pub fn has_failed(&self) -> bool {
        self.failure.is_some()
    }

    /// Whether any start or end tag has been seen.
    #[must_use]
    pub fn saw_markup(&self) -> bool {
        self.saw_markup
    }

    fn fail(&mut self, reason: &'static str) {
        self.failure.get_or_insert(reason);
    }

    /// Scan a chunk of input.
    ///
    /// Markup split across chunks is buffered until the next call.
    pub fn feed(&mut self, input: &str) {
        let buffered;
        let mut rest = if self.pending.is_empty() {
            input
        } else {
            buffered = std::mem::take(&mut self.pending) + input;
            buffered.as_str()
        };

        while !rest.is_empty() {
            match rest.find('<') {
                None => {
                    self.handle(Token::Text(rest));
                    break;
                }
                Some(0) => match read_markup(rest) {
                    Markup::Token(token, consumed) => {
                        self.handle(token);
                        rest = &rest[consumed..];
                    }
                    Markup::Literal => {
                        self.handle(Token::Text(&rest[..1]));
                        rest = &rest[1..];
                    }
                    Markup::Incomplete => {
                        self.pending = rest.to_string();
                        break;
                    }
                },
                Some(i) => {
                    self.handle(Token::Text(&rest[..i]));
                    rest = &rest[i..];
                }
            }
        }
    }

    fn handle(&mut self, token: Token<'_>) {
        if matches!(token, Token::Start { .. } | Token::End { .. }) {
            self.saw_markup = true;
        }
        match token {
            Token::Start { name, self_closing } => {
                self.stack.push(Frame {
                    name: name.clone(),
                    ..Frame::default()
                });
                if self_closing {
                    self.close(&name);
                }
            }
            Token::End { name } => self.close(&name),
            Token::Comment => {}
            Token::Text(text) => self.text(text),
        }
    }

    fn text(&mut self, text: &str) {
        if self.depth() == 0 {
            if !text.chars().all(|c| c.is_whitespace() || c == ',') {
                self.fail("text outside of any tag");
            }
            return;
        }
        if let Some(frame) = self.stack.last_mut() {
            frame.text.get_or_insert_with(String::new).push_str(&unescape(text));
        }
    }

    fn close(&mut self, name: &str) {
        if self.depth() == 0 {
            self.fail("closing tag without an open tag");
            return;
        }
        let Some(frame) = self.stack.pop() else {
            self.fail("closing tag without an open tag");
            return;
        };
        if frame.name != name {
            self.fail("mismatched closing tag");
        }
        let value = if frame.entries.is_empty() {
            TagValue::Text(frame.text.unwrap_or_default())
        } else {
            TagValue::Map(frame.entries)
        };
        if let Some(parent) = self.stack.last_mut() {
            parent.entries.entry(frame.name).or_default().push(value);
        }
    }

    /// Finish scanning and return the root mapping.
    ///
    /// Returns `None` if the input was malformed: bare text outside any tag,
    /// a close tag with no matching open tag, or mismatched tag names. Tags
    /// still open at the end of input are dropped.
    #[must_use]
    pub fn finish(self) -> Option<TagMap> {
        self.finish_with_reason().ok()
    }

    fn finish_with_reason(mut self) -> Result<TagMap, &'static str> {
        if !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            self.text(&pending);
        }
        if let Some(reason) = self.failure {
            return Err(reason);
        }
        self.stack.truncate(1);
        Ok(self.stack.pop().map(|root| root.entries).unwrap_or_default())
    }
}

/// Decode tagged text, reporting malformed markup.
///
/// Text with no tags at all means nothing was extracted and decodes to an
/// empty map. Once tags appear, a malformed document is an error and is
/// never partially salvaged.
///
/// # Errors
///
/// Returns [`ParseError::MalformedTags`] if the text holds tags but does not
/// follow the tag grammar.
pub fn try_decode_tags(text: &str) -> ParseResult<TagMap> {
    let mut parser = TagParser::new();
    parser.feed(text);
    let saw_markup = parser.saw_markup();
    match parser.finish_with_reason() {
        Ok(map) => Ok(map),
        Err(_) if !saw_markup => Ok(TagMap::new()),
        Err(reason) => Err(ParseError::malformed_tags(reason)),
    }
}

/// Decode tagged text into a tag map.
///
/// Malformed input decodes to an empty map.
#[must_use]
pub fn decode_tags(text: &str) -> TagMap {
    try_decode_tags(text).unwrap_or_else(|e| {
        debug!(len = text.len(), error = %e, "Discarding malformed tagged output");
        TagMap::new()
    })
}

// ============================================================================
// Encoder
// ============================================================================

/// Encoder for the nested tag format.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use strex_output::{Encoder, XmlEncoder};
///
/// let encoder = XmlEncoder::new();
/// let text = encoder.encode(&json!({"obj": {"name": ["Eugene", "Vadym"]}})).unwrap();
/// assert_eq!(text, "<obj><name>Eugene</name><name>Vadym</name></obj>");
///
/// let decoded = encoder.decode(&text).unwrap();
/// assert_eq!(decoded, json!({"obj": [{"name": ["Eugene", "Vadym"]}]}));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl XmlEncoder {
    /// Create a new tag encoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for XmlEncoder {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn encode(&self, data: &JsonValue) -> EncodeResult<String> {
        let JsonValue::Object(map) = data else {
            return Err(EncodeError::NotAMapping {
                type_name: json_type_name(data),
            });
        };
        let mut out = String::new();
        for (key, value) in map {
            write_tag(key, value, &mut out)?;
        }
        Ok(out)
    }

    fn decode(&self, text: &str) -> ParseResult<JsonValue> {
        try_decode_tags(text).map(|map| tag_map_to_json(&map))
    }

    fn instruction_segment(&self) -> &str {
        XML_INSTRUCTIONS
    }
}
