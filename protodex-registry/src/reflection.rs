//! Serialized descriptor cross-checks
//!
//! The descriptor blob attached to a service is a serialized
//! `ServiceDescriptorProto`, passed through opaquely for consumers that
//! want reflection. The generator emits the blob and the in-memory
//! metadata from the same source, so the two must agree; the checks here
//! catch drift between them. Any disagreement is a generation bug and is
//! reported as a fatal consistency error.

use crate::{RegistryError, Result};
use prost::Message;
use prost_types::ServiceDescriptorProto;
use protodex_core::{MessageType, ServiceDescriptor, StreamingKind};
use tracing::debug;

/// Decode the service's descriptor blob
pub fn decode_service_proto(service: &ServiceDescriptor) -> Result<ServiceDescriptorProto> {
    ServiceDescriptorProto::decode(service.descriptor_bytes().as_ref()).map_err(|e| {
        RegistryError::DescriptorDecode {
            service: service.name().to_string(),
            detail: e.to_string(),
        }
    })
}

/// Check that the descriptor blob agrees with the registered metadata.
///
/// Compares the service name, the ordered method list, each method's
/// input/output type names, and the streaming flag pair.
pub fn verify_against_proto(service: &ServiceDescriptor) -> Result<()> {
    let proto = decode_service_proto(service)?;

    let mismatch = |detail: String| RegistryError::DescriptorMismatch {
        service: service.name().to_string(),
        detail,
    };

    if proto.name() != service.name() {
        return Err(mismatch(format!("blob names service {:?}", proto.name())));
    }

    let declared = service.method_names();
    if proto.method.len() != declared.len() {
        return Err(mismatch(format!(
            "blob has {} methods, metadata declares {}",
            proto.method.len(),
            declared.len()
        )));
    }

    for (entry, declared_name) in proto.method.iter().zip(declared) {
        if entry.name() != declared_name {
            return Err(mismatch(format!(
                "blob lists method {:?} where {:?} is declared",
                entry.name(),
                declared_name
            )));
        }

        let method = service.method(declared_name)?;

        let input = MessageType::new(entry.input_type());
        if &input != method.input() {
            return Err(mismatch(format!(
                "method {:?} has input type {} in blob, {} in metadata",
                declared_name,
                input,
                method.input()
            )));
        }

        let output = MessageType::new(entry.output_type());
        if &output != method.output() {
            return Err(mismatch(format!(
                "method {:?} has output type {} in blob, {} in metadata",
                declared_name,
                output,
                method.output()
            )));
        }

        let kind = StreamingKind::from_flags(entry.client_streaming(), entry.server_streaming());
        if kind != method.streaming() {
            return Err(mismatch(format!(
                "method {:?} is {} in blob, {} in metadata",
                declared_name,
                kind,
                method.streaming()
            )));
        }
    }

    debug!(service = %service.full_name(), "serialized descriptor agrees with metadata");
    Ok(())
}
