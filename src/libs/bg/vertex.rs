use serde::Serialize;
use std::fmt;

pub const INFINITY_SUFFIX: &str = "__infinity";

/// Which end of a repeat an infinity vertex stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RepeatEnd {
    Head,
    Tail,
}

impl RepeatEnd {
    pub fn suffix(self) -> char {
        match self {
            RepeatEnd::Head => 'h',
            RepeatEnd::Tail => 't',
        }
    }
}

/// A repeat name plus the orientation it is entered from, written `<name>h` / `<name>t`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RepeatTag {
    pub name: String,
    pub end: RepeatEnd,
}

impl RepeatTag {
    pub fn new(name: impl Into<String>, end: RepeatEnd) -> Self {
        Self {
            name: name.into(),
            end,
        }
    }

    /// Parse the `<name>h` / `<name>t` notation.
    pub fn parse(s: &str) -> Option<Self> {
        let dir = s.chars().last()?;
        let name = &s[..s.len() - dir.len_utf8()];
        if name.is_empty() {
            return None;
        }
        let end = match dir {
            'h' => RepeatEnd::Head,
            't' => RepeatEnd::Tail,
            _ => return None,
        };
        Some(Self::new(name, end))
    }
}

impl fmt::Display for RepeatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.end.suffix())
    }
}

/// A genomic extremity, or the infinity vertex marking an open fragment end at one.
///
/// Infinity vertices are identified by the extremity they are anchored at and their
/// optional repeat tag, so one extremity can carry one untagged and any number of
/// differently tagged infinity vertices.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Vertex {
    Block(String),
    Infinity {
        anchor: String,
        repeat: Option<RepeatTag>,
    },
}

impl Vertex {
    pub fn block(name: impl Into<String>) -> Self {
        Vertex::Block(name.into())
    }

    pub fn infinity(anchor: impl Into<String>) -> Self {
        Vertex::Infinity {
            anchor: anchor.into(),
            repeat: None,
        }
    }

    pub fn tagged_infinity(anchor: impl Into<String>, tag: RepeatTag) -> Self {
        Vertex::Infinity {
            anchor: anchor.into(),
            repeat: Some(tag),
        }
    }

    pub fn is_irregular(&self) -> bool {
        matches!(self, Vertex::Infinity { .. })
    }

    pub fn is_regular(&self) -> bool {
        !self.is_irregular()
    }

    /// Extremity name; for infinity vertices the anchor's name.
    pub fn anchor(&self) -> &str {
        match self {
            Vertex::Block(name) => name,
            Vertex::Infinity { anchor, .. } => anchor,
        }
    }

    pub fn repeat(&self) -> Option<&RepeatTag> {
        match self {
            Vertex::Block(_) => None,
            Vertex::Infinity { repeat, .. } => repeat.as_ref(),
        }
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Block(name) => write!(f, "{}", name),
            Vertex::Infinity { anchor, repeat } => match repeat {
                Some(tag) => write!(f, "{}{}[repeat={}]", anchor, INFINITY_SUFFIX, tag),
                None => write!(f, "{}{}", anchor, INFINITY_SUFFIX),
            },
        }
    }
}

impl Serialize for Vertex {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_tag_parse() {
        let tag = RepeatTag::parse("L1h").unwrap();
        assert_eq!(tag.name, "L1");
        assert_eq!(tag.end, RepeatEnd::Head);
        assert_eq!(tag.to_string(), "L1h");

        assert!(RepeatTag::parse("h").is_none());
        assert!(RepeatTag::parse("L1x").is_none());
        assert!(RepeatTag::parse("").is_none());
    }

    #[test]
    fn test_vertex_kinds() {
        let v = Vertex::block("1h");
        let iv = Vertex::infinity("1h");
        let tv = Vertex::tagged_infinity("1h", RepeatTag::new("L1", RepeatEnd::Tail));

        assert!(v.is_regular());
        assert!(iv.is_irregular());
        assert_eq!(iv.anchor(), "1h");
        assert_eq!(iv.to_string(), "1h__infinity");
        assert_ne!(iv, tv);
        assert_eq!(tv.to_string(), "1h__infinity[repeat=L1t]");
    }
}
