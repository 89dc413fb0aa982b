//! Message type identifiers
//!
//! A [`MessageType`] names the protobuf message schema behind a method's
//! request or response. It is an identifier only: encoding and decoding of
//! actual payloads belongs to the message library that owns the schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fully-qualified protobuf message type name
///
/// Example: `helloworld.HelloRequest`. Descriptor-proto type references
/// carry a leading dot (`.helloworld.HelloRequest`); it is stripped on
/// construction so the two spellings compare equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageType(String);

impl MessageType {
    /// Create a message type identifier from a fully-qualified name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        match name.strip_prefix('.') {
            Some(stripped) => Self(stripped.to_string()),
            None => Self(name),
        }
    }

    /// The fully-qualified name without a leading dot
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The package portion of the name (empty for an unpackaged type)
    pub fn package(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((package, _)) => package,
            None => "",
        }
    }

    /// The unqualified message name
    pub fn simple_name(&self) -> &str {
        match self.0.rsplit_once('.') {
            Some((_, name)) => name,
            None => &self.0,
        }
    }
}

impl From<&str> for MessageType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MessageType {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Debug for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageType({})", self.0)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_dot_normalized() {
        let plain = MessageType::new("helloworld.HelloRequest");
        let dotted = MessageType::new(".helloworld.HelloRequest");
        assert_eq!(plain, dotted);
        assert_eq!(dotted.as_str(), "helloworld.HelloRequest");
    }

    #[test]
    fn test_package_and_simple_name() {
        let ty = MessageType::new("google.protobuf.Empty");
        assert_eq!(ty.package(), "google.protobuf");
        assert_eq!(ty.simple_name(), "Empty");

        let bare = MessageType::new("HelloRequest");
        assert_eq!(bare.package(), "");
        assert_eq!(bare.simple_name(), "HelloRequest");
    }

    #[test]
    fn test_display() {
        let ty = MessageType::new("helloworld.HelloReply");
        assert_eq!(ty.to_string(), "helloworld.HelloReply");
    }
}
