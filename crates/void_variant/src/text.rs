//! Owned byte buffer shared by the String and PackedByteArray kinds
//!
//! Both kinds carry a [`TextBuffer`], which is what lets the text accessors
//! accept either one. Text views are UTF-8 validated on every access, so a
//! byte array holding arbitrary binary data is reported as an error rather
//! than reinterpreted.

use core::fmt;
use core::str::Utf8Error;
use std::borrow::Cow;

#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextBuffer {
    bytes: Vec<u8>,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding a copy of the given text
    pub fn from_text(text: &str) -> Self {
        Self {
            bytes: text.as_bytes().to_vec(),
        }
    }

    /// Buffer holding arbitrary bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Byte-level write access. Only reachable through the byte-array
    /// accessor, which keeps string payloads valid UTF-8.
    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut Vec<u8> {
        &mut self.bytes
    }

    /// Zero-copy text view
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(&self.bytes)
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn push_str(&mut self, text: &str) {
        self.bytes.extend_from_slice(text.as_bytes());
    }

    pub fn push(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.push_str(ch.encode_utf8(&mut buf));
    }

    /// Replace the whole contents
    pub fn set(&mut self, text: &str) {
        self.bytes.clear();
        self.push_str(text);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// New buffer holding `self` followed by `other`
    pub fn concat(&self, other: &TextBuffer) -> TextBuffer {
        let mut bytes = Vec::with_capacity(self.len() + other.len());
        bytes.extend_from_slice(&self.bytes);
        bytes.extend_from_slice(&other.bytes);
        TextBuffer { bytes }
    }

    /// Byte-wise substring search; the empty needle is always found
    pub fn contains(&self, needle: &TextBuffer) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.bytes
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self {
            bytes: text.into_bytes(),
        }
    }
}

impl From<Vec<u8>> for TextBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl PartialEq<str> for TextBuffer {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for TextBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_string_lossy())
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_view() {
        let mut buf = TextBuffer::from("hello");
        assert_eq!(buf.to_str(), Ok("hello"));
        buf.push_str(" world");
        buf.push('!');
        assert_eq!(buf, "hello world!");
        buf.set("bye");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_binary_payload_is_not_text() {
        let buf = TextBuffer::from_bytes(vec![0xff, 0xfe, 0x00]);
        assert!(buf.to_str().is_err());
        assert_eq!(buf.as_bytes(), &[0xff, 0xfe, 0x00]);
    }

    #[test]
    fn test_from_text_copies() {
        let source = String::from("copy me");
        let buf = TextBuffer::from_text(&source);
        drop(source);
        assert_eq!(buf, TextBuffer::from("copy me"));
        assert_eq!(buf.to_str(), Ok("copy me"));
    }

    #[test]
    fn test_contains_and_concat() {
        let a = TextBuffer::from("void");
        let b = TextBuffer::from("engine");
        let joined = a.concat(&b);
        assert_eq!(joined, "voidengine");
        assert!(joined.contains(&TextBuffer::from("den")));
        assert!(joined.contains(&TextBuffer::new()));
        assert!(!a.contains(&b));
    }
}
