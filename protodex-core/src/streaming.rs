//! Streaming shape classification for RPC methods
//!
//! Every protobuf RPC method has one of four interaction shapes, determined
//! by whether the request and response sides carry a single message or a
//! sequence. Stub generators branch on this to pick one of four call
//! signatures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RPC method streaming shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamingKind {
    /// Single request, single response
    Unary,
    /// Sequence of requests, single response
    ClientStreaming,
    /// Single request, sequence of responses
    ServerStreaming,
    /// Sequences on both sides, independently driven
    Bidirectional,
}

impl StreamingKind {
    /// Whether the request side is a stream
    pub fn client_streaming(self) -> bool {
        matches!(
            self,
            StreamingKind::ClientStreaming | StreamingKind::Bidirectional
        )
    }

    /// Whether the response side is a stream
    pub fn server_streaming(self) -> bool {
        matches!(
            self,
            StreamingKind::ServerStreaming | StreamingKind::Bidirectional
        )
    }

    /// Build from the `client_streaming` / `server_streaming` flag pair
    /// carried by a `MethodDescriptorProto`.
    pub fn from_flags(client_streaming: bool, server_streaming: bool) -> Self {
        match (client_streaming, server_streaming) {
            (false, false) => StreamingKind::Unary,
            (true, false) => StreamingKind::ClientStreaming,
            (false, true) => StreamingKind::ServerStreaming,
            (true, true) => StreamingKind::Bidirectional,
        }
    }

    /// Stable lowercase name (for logs and tooling output)
    pub fn as_str(self) -> &'static str {
        match self {
            StreamingKind::Unary => "unary",
            StreamingKind::ClientStreaming => "client_streaming",
            StreamingKind::ServerStreaming => "server_streaming",
            StreamingKind::Bidirectional => "bidirectional",
        }
    }
}

impl fmt::Display for StreamingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
