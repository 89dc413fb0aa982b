//! Service lookup registry
//!
//! A read-mostly collection of service descriptors keyed by fully-qualified
//! name. Built once during process initialization; every query afterwards
//! is a pure in-memory lookup.

use crate::{RegistryError, Result};
use protodex_core::{MethodDescriptor, ServiceDescriptor};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Registry of service descriptors
///
/// Services are kept in registration order; lookups go through a
/// full-name index.
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
    index: HashMap<String, usize>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            services: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a service descriptor.
    ///
    /// Re-runs the descriptor's completeness check and fails fast on a
    /// violated invariant or a duplicate fully-qualified name.
    pub fn register(&mut self, service: ServiceDescriptor) -> Result<()> {
        service.verify()?;

        let full_name = service.full_name();
        if self.index.contains_key(&full_name) {
            return Err(RegistryError::DuplicateService(full_name));
        }

        debug!(
            service = %full_name,
            methods = service.methods().len(),
            "service registered"
        );
        self.index.insert(full_name, self.services.len());
        self.services.push(service);
        Ok(())
    }

    /// Look up a service by fully-qualified name (e.g. `helloworld.Greeter`)
    pub fn service(&self, full_name: &str) -> Result<&ServiceDescriptor> {
        self.index
            .get(full_name)
            .map(|&idx| &self.services[idx])
            .ok_or_else(|| RegistryError::UnknownService(full_name.to_string()))
    }

    /// Resolve one method of one service.
    ///
    /// On a miss the error carries the service's full valid method set in
    /// declaration order.
    pub fn resolve_method(&self, service: &str, method: &str) -> Result<&MethodDescriptor> {
        let descriptor = self.service(service)?;
        match descriptor.method(method) {
            Ok(found) => Ok(found),
            Err(diag) => {
                warn!(service = %service, method = %method, "method lookup failed");
                Err(diag.into())
            }
        }
    }

    /// Registered services, in registration order
    pub fn services(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.iter()
    }

    /// Number of registered services
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Run the completeness check over every registered service.
    ///
    /// Intended for startup or a validation test against generated
    /// descriptors; a failure is a generator bug.
    pub fn verify(&self) -> Result<()> {
        for service in &self.services {
            service.verify()?;
        }
        Ok(())
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
