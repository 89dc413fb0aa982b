//! Protodex Core Library
//!
//! Metadata model for describing protobuf RPC services.
//! This crate provides:
//! - Service and method descriptors (names, message types, descriptor blob)
//! - Streaming shape classification (unary, client/server/bidirectional)
//! - Construction-time validation of the declared method set
//! - Structured diagnostics for failed method lookups
//!
//! Descriptors are built once from generated service definitions, are
//! immutable afterwards, and can be cloned and shared across threads
//! freely. No wire encoding or transport happens here: consumers (stub
//! generators, RPC bindings) read the metadata and build typed call
//! surfaces from it.

pub mod descriptor;
pub mod error;
pub mod message;
pub mod streaming;

pub use descriptor::{MethodDescriptor, ServiceDescriptor, ServiceDescriptorBuilder};
pub use error::{DescriptorError, Result, UnknownMethod};
pub use message::MessageType;
pub use streaming::StreamingKind;
