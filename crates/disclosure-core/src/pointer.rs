//! Pointers locating a node inside a document.
//!
//! A pointer is a list of segments, each either a map key or a sequence index.
//! The segment kind is kept explicitly: the key `"0"` of a map and the index
//! `0` of a sequence are different segments even though both render as `/0`.
//!
//! The canonical string form is an RFC 6901 JSON Pointer. It is part of the
//! signed wire format and must not change.

use std::fmt;

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Segment {
    Key(String),
    Index(usize),
}

impl Segment {
    pub fn is_index(&self) -> bool {
        matches!(self, Segment::Index(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => {
                for c in k.chars() {
                    match c {
                        '~' => f.write_str("~0")?,
                        '/' => f.write_str("~1")?,
                        c => write!(f, "{c}")?,
                    }
                }
                Ok(())
            }
            Segment::Index(i) => write!(f, "{i}"),
        }
    }
}

/// Path from the document root to a node. The empty pointer is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pointer {
    segments: Vec<Segment>,
}

impl Pointer {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Return a new pointer extended by one segment.
    pub fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn key(&self, key: &str) -> Self {
        self.child(Segment::Key(key.to_string()))
    }

    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the first `n` segments, used for error messages.
    pub fn prefix_string(&self, n: usize) -> String {
        Pointer::from_segments(self.segments[..n.min(self.segments.len())].to_vec()).to_string()
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.segments {
            write!(f, "/{s}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_empty() {
        assert_eq!(Pointer::root().to_string(), "");
    }

    #[test]
    fn nested_pointer_renders_rfc6901() {
        let p = Pointer::root().key("phoneNumbers").index(1).key("type");
        assert_eq!(p.to_string(), "/phoneNumbers/1/type");
    }

    #[test]
    fn special_characters_are_escaped() {
        let p = Pointer::root().key("a/b").key("m~n");
        assert_eq!(p.to_string(), "/a~1b/m~0n");
    }

    #[test]
    fn key_and_index_segments_differ() {
        let k = Pointer::root().key("0");
        let i = Pointer::root().index(0);
        assert_eq!(k.to_string(), i.to_string());
        assert_ne!(k, i);
    }
}
