use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::DecoderConfig;

/// Returned when the payload column does not hold bytes at all.
pub const BINARY_DATA_SENTINEL: &str = "[Binary Data]";

/// Returned when the marker pair is missing from the payload.
pub const NO_MESSAGE_SENTINEL: &str = "[No Message Found]";

/// The HTML fragment sits between `DataRawText` and `MimeType`. Lazy and
/// newline-spanning; trailing whitespace before `MimeType` is not captured.
/// The information separators 0x1C..0x1F count as whitespace here.
static INNER_PAYLOAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)DataRawText*(.*?)[\s\x1C-\x1F]*MimeType").expect("marker regex")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").expect("tag regex"));

/// Turns raw message blobs into display text.
#[derive(Debug, Clone)]
pub struct PayloadDecoder {
    stripped: Vec<char>,
}

impl Default for PayloadDecoder {
    fn default() -> Self {
        Self::new(&DecoderConfig::default())
    }
}

impl PayloadDecoder {
    pub fn new(config: &DecoderConfig) -> Self {
        Self {
            stripped: config.stripped_bytes.iter().copied().map(char::from).collect(),
        }
    }

    /// Decode a payload column that may be NULL or a non-byte value.
    pub fn decode_value(&self, payload: Option<&[u8]>) -> String {
        match payload {
            Some(bytes) => self.decode(bytes),
            None => BINARY_DATA_SENTINEL.to_string(),
        }
    }

    pub fn decode(&self, payload: &[u8]) -> String {
        let text = recover_text(payload);
        let text = self.strip_control(&text);

        let Some(inner) = extract_inner(&text) else {
            return NO_MESSAGE_SENTINEL.to_string();
        };

        clean_markup(trim_leading_noise(inner))
    }

    fn strip_control(&self, text: &str) -> String {
        text.chars().filter(|c| !self.stripped.contains(c)).collect()
    }
}

/// Decode with the default strip list.
pub fn decode(payload: &[u8]) -> String {
    PayloadDecoder::default().decode(payload)
}

/// UTF-8 when valid, Latin-1 otherwise. Latin-1 maps every byte to the code
/// point of the same value, so the fallback always succeeds.
fn recover_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => Cow::Owned(bytes.iter().copied().map(char::from).collect()),
    }
}

fn extract_inner(text: &str) -> Option<&str> {
    INNER_PAYLOAD
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(is_separator_space))
}

fn is_separator_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

/// Some fragments start with stray encoded bytes before the first tag.
/// Everything before the first `<` goes; no `<` at all leaves nothing.
fn trim_leading_noise(text: &str) -> &str {
    match text.find('<') {
        Some(idx) => &text[idx..],
        None => "",
    }
}

/// Character references follow HTML5: legacy names without `;` expand and
/// C1 numeric references remap through Windows-1252.
fn clean_markup(fragment: &str) -> String {
    let unescaped = htmlize::unescape(fragment);
    TAG.replace_all(&unescaped, "").into_owned()
}
