//! Media types, charsets and `Accept` negotiation.
//!
//! # Design Decisions
//! - Parsing is lenient: malformed entries are skipped, never fatal
//! - Type, subtype and charset names are compared case-insensitively
//! - No regex; a single pass over `;`-separated parameters

use std::fmt;
use std::str::FromStr;

/// A parsed media type such as `text/plain; charset=utf-16le`.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    type_: String,
    subtype: String,
    charset: Option<String>,
    quality: f32,
}

impl MediaType {
    /// Build a media type without parameters.
    pub fn new(type_: &str, subtype: &str) -> Self {
        Self {
            type_: type_.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
            charset: None,
            quality: 1.0,
        }
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// The `charset` parameter, lower-cased.
    pub fn charset(&self) -> Option<&str> {
        self.charset.as_deref()
    }

    /// The `q` parameter; 1.0 when absent.
    pub fn quality(&self) -> f32 {
        self.quality
    }

    /// `*/*`
    pub fn is_wildcard(&self) -> bool {
        self.type_ == "*" && self.subtype == "*"
    }

    /// Whether content of this type is textual.
    pub fn is_text_family(&self) -> bool {
        if self.type_ == "text" {
            return true;
        }
        if self.type_ != "application" {
            return false;
        }
        matches!(self.subtype.as_str(), "json" | "xml" | "javascript")
            || self.subtype.ends_with("+json")
            || self.subtype.ends_with("+xml")
    }
}

impl FromStr for MediaType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';');
        let essence = parts.next().unwrap_or_default().trim();
        let (type_, subtype) = essence.split_once('/').ok_or(())?;
        let (type_, subtype) = (type_.trim(), subtype.trim());
        if type_.is_empty() || subtype.is_empty() {
            return Err(());
        }

        let mut media = MediaType::new(type_, subtype);
        for param in parts {
            let Some((name, value)) = param.split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            match name.trim().to_ascii_lowercase().as_str() {
                "charset" => media.charset = Some(value.to_ascii_lowercase()),
                "q" => media.quality = value.parse().unwrap_or(0.0),
                _ => {}
            }
        }
        Ok(media)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        if let Some(charset) = &self.charset {
            write!(f, "; charset={charset}")?;
        }
        Ok(())
    }
}

/// Negotiate a response media type from an `Accept` header value.
///
/// Highest quality wins; ties go to the earliest entry. `*/*`, entries with
/// `q=0` and an empty header negotiate to `None`.
pub fn negotiate(accept: &str) -> Option<MediaType> {
    let mut best: Option<MediaType> = None;
    for entry in accept.split(',') {
        let Ok(media) = entry.parse::<MediaType>() else {
            continue;
        };
        if media.quality <= 0.0 {
            continue;
        }
        if best.as_ref().map_or(true, |b| media.quality > b.quality) {
            best = Some(media);
        }
    }
    best.filter(|m| !m.is_wildcard())
}

/// Character encodings the text writer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Latin1,
    Ascii,
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Utf16Le => "utf-16le",
            Charset::Utf16Be => "utf-16be",
            Charset::Latin1 => "iso-8859-1",
            Charset::Ascii => "us-ascii",
        }
    }

    /// Encode `text`. Characters the charset cannot represent become `?`.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Charset::Utf8 => text.as_bytes().to_vec(),
            Charset::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Charset::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Charset::Latin1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Charset::Ascii => text
                .chars()
                .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
                .collect(),
        }
    }
}

impl FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Charset::Utf8),
            "utf-16" | "utf-16le" => Ok(Charset::Utf16Le),
            "utf-16be" => Ok(Charset::Utf16Be),
            "iso-8859-1" | "latin1" | "latin-1" => Ok(Charset::Latin1),
            "us-ascii" | "ascii" => Ok(Charset::Ascii),
            other => Err(format!("unsupported charset: {other}")),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
