//! Protodex Service Registry
//!
//! Holds the descriptor graph for a set of protobuf RPC services and
//! answers method-lookup queries against it. Consumers (stub generators,
//! RPC bindings) register the descriptors their code generator emitted,
//! then resolve methods to obtain message types and streaming shapes.
//!
//! # Usage
//!
//! ```ignore
//! use protodex_registry::ServiceRegistry;
//!
//! let mut registry = ServiceRegistry::new();
//! registry.register(greeter_descriptor)?;
//!
//! let method = registry.resolve_method("helloworld.Greeter", "SayHello")?;
//! match method.streaming() {
//!     StreamingKind::Unary => { /* emit a unary stub */ }
//!     // ...
//! }
//! ```
//!
//! Registration fails fast when a descriptor's declared method list and
//! its method set disagree: that is a code-generation bug, never a
//! recoverable runtime condition. A missed lookup, by contrast, is an
//! ordinary error value carrying the full valid method list.

pub mod reflection;
pub mod registry;

pub use reflection::{decode_service_proto, verify_against_proto};
pub use registry::ServiceRegistry;

use protodex_core::{DescriptorError, UnknownMethod};
use thiserror::Error;

/// Registry error types
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("Service '{0}' is not registered")]
    UnknownService(String),

    #[error("Service '{0}' is already registered")]
    DuplicateService(String),

    #[error("Failed to decode serialized descriptor for '{service}': {detail}")]
    DescriptorDecode { service: String, detail: String },

    #[error("Serialized descriptor for '{service}' disagrees with registered metadata: {detail}")]
    DescriptorMismatch { service: String, detail: String },
}

impl From<UnknownMethod> for RegistryError {
    fn from(err: UnknownMethod) -> Self {
        RegistryError::Descriptor(err.into())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
