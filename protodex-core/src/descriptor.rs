//! Service and method descriptors
//!
//! A [`ServiceDescriptor`] captures one protobuf `service` definition: its
//! name, package, declared method list, and the opaque serialized
//! descriptor blob emitted by the code generator. Each declared method has
//! exactly one [`MethodDescriptor`] carrying its message types and
//! streaming shape; the declared name list and the descriptor set are
//! cross-checked at construction so they cannot drift.
//!
//! Descriptors are immutable once built. Methods hold a non-owning
//! back-reference to their service, never the reverse.

use crate::error::{DescriptorError, Result, UnknownMethod};
use crate::message::MessageType;
use crate::streaming::StreamingKind;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, Weak};

struct ServiceInner {
    package: String,
    name: String,
    method_names: Vec<String>,
    methods: Vec<MethodDescriptor>,
    descriptor: Bytes,
}

/// Metadata for one protobuf RPC service
///
/// Cheap to clone (shared immutable state) and safe to share across
/// threads without synchronization. Built via [`ServiceDescriptor::builder`].
#[derive(Clone)]
pub struct ServiceDescriptor {
    inner: Arc<ServiceInner>,
}

impl ServiceDescriptor {
    /// Start building a descriptor for `package.name`
    pub fn builder(
        package: impl Into<String>,
        name: impl Into<String>,
    ) -> ServiceDescriptorBuilder {
        ServiceDescriptorBuilder {
            package: package.into(),
            name: name.into(),
            declared: None,
            methods: Vec::new(),
            descriptor: Bytes::new(),
        }
    }

    /// Service name (e.g. `Greeter`)
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Dotted package namespace (e.g. `helloworld`)
    pub fn package(&self) -> &str {
        &self.inner.package
    }

    /// Fully-qualified service name (e.g. `helloworld.Greeter`)
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.inner.package, self.inner.name)
    }

    /// Declared method names, in declaration order
    pub fn method_names(&self) -> &[String] {
        &self.inner.method_names
    }

    /// Method descriptors, in declaration order
    pub fn methods(&self) -> &[MethodDescriptor] {
        &self.inner.methods
    }

    /// The opaque serialized descriptor blob (a `ServiceDescriptorProto`)
    pub fn descriptor_bytes(&self) -> &Bytes {
        &self.inner.descriptor
    }

    /// Look up a method by name.
    ///
    /// Returns the method's descriptor, or an [`UnknownMethod`] diagnostic
    /// listing the declared method set in declaration order.
    pub fn method(&self, name: &str) -> std::result::Result<&MethodDescriptor, UnknownMethod> {
        self.inner
            .methods
            .iter()
            .find(|m| m.name() == name)
            .ok_or_else(|| UnknownMethod {
                service: self.inner.name.clone(),
                method: name.to_string(),
                available: self.inner.method_names.clone(),
            })
    }

    /// Re-check the completeness invariant: every declared name has a
    /// descriptor and every descriptor is declared.
    ///
    /// The builder enforces this, so a failure indicates a generator bug.
    /// Intended to run once at startup or from a validation test.
    pub fn verify(&self) -> Result<()> {
        let described: HashSet<&str> = self.inner.methods.iter().map(|m| m.name()).collect();
        let missing: Vec<String> = self
            .inner
            .method_names
            .iter()
            .filter(|n| !described.contains(n.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(DescriptorError::MissingMethods {
                service: self.inner.name.clone(),
                missing,
            });
        }

        let declared: HashSet<&str> = self
            .inner
            .method_names
            .iter()
            .map(String::as_str)
            .collect();
        let extra: Vec<String> = self
            .inner
            .methods
            .iter()
            .map(|m| m.name().to_string())
            .filter(|n| !declared.contains(n.as_str()))
            .collect();
        if !extra.is_empty() {
            return Err(DescriptorError::UndeclaredMethods {
                service: self.inner.name.clone(),
                extra,
            });
        }

        Ok(())
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("package", &self.inner.package)
            .field("name", &self.inner.name)
            .field("methods", &self.inner.method_names)
            .finish()
    }
}

/// Metadata for one method of one service
#[derive(Clone)]
pub struct MethodDescriptor {
    service: Weak<ServiceInner>,
    name: String,
    path: String,
    input: MessageType,
    output: MessageType,
    streaming: StreamingKind,
}

impl MethodDescriptor {
    /// Method name (e.g. `SayHello`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full route path (e.g. `/helloworld.Greeter/SayHello`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request message type
    pub fn input(&self) -> &MessageType {
        &self.input
    }

    /// Response message type
    pub fn output(&self) -> &MessageType {
        &self.output
    }

    /// Streaming shape of this method
    pub fn streaming(&self) -> StreamingKind {
        self.streaming
    }

    /// The owning service (non-owning back-reference).
    ///
    /// Returns `None` only if every clone of the owning descriptor has
    /// been dropped.
    pub fn service(&self) -> Option<ServiceDescriptor> {
        self.service.upgrade().map(|inner| ServiceDescriptor { inner })
    }
}

impl PartialEq for MethodDescriptor {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.service, &other.service)
            && self.name == other.name
            && self.input == other.input
            && self.output == other.output
            && self.streaming == other.streaming
    }
}

impl Eq for MethodDescriptor {}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("path", &self.path)
            .field("input", &self.input)
            .field("output", &self.output)
            .field("streaming", &self.streaming)
            .finish()
    }
}

struct MethodSpec {
    name: String,
    input: MessageType,
    output: MessageType,
    streaming: StreamingKind,
}

/// Builder for [`ServiceDescriptor`]
///
/// Collects the declared method name list, the per-method metadata, and
/// the serialized descriptor blob; `build` validates all of it together.
pub struct ServiceDescriptorBuilder {
    package: String,
    name: String,
    declared: Option<Vec<String>>,
    methods: Vec<MethodSpec>,
    descriptor: Bytes,
}

impl ServiceDescriptorBuilder {
    /// Set the declared method name list.
    ///
    /// This is the closed world: `build` rejects a method registered
    /// outside it and a declared name with no method. When not called, the
    /// list is derived from the registered methods.
    pub fn declare<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Attach the serialized descriptor blob
    pub fn descriptor(mut self, bytes: impl Into<Bytes>) -> Self {
        self.descriptor = bytes.into();
        self
    }

    /// Register one method
    pub fn method(
        mut self,
        name: impl Into<String>,
        input: impl Into<MessageType>,
        output: impl Into<MessageType>,
        streaming: StreamingKind,
    ) -> Self {
        self.methods.push(MethodSpec {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            streaming,
        });
        self
    }

    /// Validate and build the descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The service or package name is empty
    /// - A method name is empty or duplicated
    /// - The declared name list and the registered methods disagree in
    ///   either direction
    pub fn build(self) -> Result<ServiceDescriptor> {
        let ServiceDescriptorBuilder {
            package,
            name,
            declared,
            methods,
            descriptor,
        } = self;

        if name.is_empty() {
            return Err(DescriptorError::EmptyServiceName);
        }
        if package.is_empty() {
            return Err(DescriptorError::EmptyPackageName);
        }

        let declared = match declared {
            Some(names) => names,
            None => methods.iter().map(|m| m.name.clone()).collect(),
        };

        let mut seen = HashSet::new();
        for method_name in &declared {
            if method_name.is_empty() {
                return Err(DescriptorError::EmptyMethodName {
                    service: name.clone(),
                });
            }
            if !seen.insert(method_name.as_str()) {
                return Err(DescriptorError::DuplicateMethod {
                    service: name.clone(),
                    method: method_name.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for spec in &methods {
            if spec.name.is_empty() {
                return Err(DescriptorError::EmptyMethodName {
                    service: name.clone(),
                });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(DescriptorError::DuplicateMethod {
                    service: name.clone(),
                    method: spec.name.clone(),
                });
            }
        }

        // Closed-world check, both directions
        let described: HashSet<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        let missing: Vec<String> = declared
            .iter()
            .filter(|n| !described.contains(n.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(DescriptorError::MissingMethods {
                service: name.clone(),
                missing,
            });
        }

        let declared_set: HashSet<&str> = declared.iter().map(String::as_str).collect();
        let extra: Vec<String> = methods
            .iter()
            .map(|m| m.name.clone())
            .filter(|n| !declared_set.contains(n.as_str()))
            .collect();
        if !extra.is_empty() {
            return Err(DescriptorError::UndeclaredMethods {
                service: name.clone(),
                extra,
            });
        }

        let full_name = format!("{}.{}", package, name);
        let mut by_name: HashMap<String, MethodSpec> = methods
            .into_iter()
            .map(|m| (m.name.clone(), m))
            .collect();

        let inner = Arc::new_cyclic(|weak| {
            // Methods are stored in declaration order
            let methods: Vec<MethodDescriptor> = declared
                .iter()
                .filter_map(|method_name| by_name.remove(method_name))
                .map(|spec| MethodDescriptor {
                    service: weak.clone(),
                    path: format!("/{}/{}", full_name, spec.name),
                    name: spec.name,
                    input: spec.input,
                    output: spec.output,
                    streaming: spec.streaming,
                })
                .collect();

            ServiceInner {
                package,
                name,
                method_names: declared,
                methods,
                descriptor,
            }
        });

        Ok(ServiceDescriptor { inner })
    }
}
