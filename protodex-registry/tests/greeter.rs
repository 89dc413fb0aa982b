//! Integration tests for the service registry
//!
//! Exercises the full flow a stub generator goes through: build the
//! descriptors a code generator would emit (including the serialized
//! descriptor blob), register them, resolve methods, and validate the
//! blob against the registered metadata.

use prost::Message;
use prost_types::{MethodDescriptorProto, ServiceDescriptorProto};
use protodex_core::{ServiceDescriptor, StreamingKind};
use protodex_registry::{verify_against_proto, RegistryError, ServiceRegistry};

fn greeter_blob() -> Vec<u8> {
    ServiceDescriptorProto {
        name: Some("Greeter".to_string()),
        method: vec![MethodDescriptorProto {
            name: Some("SayHello".to_string()),
            input_type: Some(".helloworld.HelloRequest".to_string()),
            output_type: Some(".helloworld.HelloReply".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    }
    .encode_to_vec()
}

fn greeter() -> ServiceDescriptor {
    ServiceDescriptor::builder("helloworld", "Greeter")
        .declare(["SayHello"])
        .method(
            "SayHello",
            "helloworld.HelloRequest",
            "helloworld.HelloReply",
            StreamingKind::Unary,
        )
        .descriptor(greeter_blob())
        .build()
        .unwrap()
}

fn router() -> ServiceDescriptor {
    ServiceDescriptor::builder("routeguide", "RouteGuide")
        .declare(["GetFeature", "ListFeatures", "RecordRoute", "RouteChat"])
        .method(
            "GetFeature",
            "routeguide.Point",
            "routeguide.Feature",
            StreamingKind::Unary,
        )
        .method(
            "ListFeatures",
            "routeguide.Rectangle",
            "routeguide.Feature",
            StreamingKind::ServerStreaming,
        )
        .method(
            "RecordRoute",
            "routeguide.Point",
            "routeguide.RouteSummary",
            StreamingKind::ClientStreaming,
        )
        .method(
            "RouteChat",
            "routeguide.RouteNote",
            "routeguide.RouteNote",
            StreamingKind::Bidirectional,
        )
        .build()
        .unwrap()
}

#[test]
fn test_greeter_scenario() {
    let mut registry = ServiceRegistry::new();
    registry.register(greeter()).unwrap();
    registry.verify().unwrap();

    let method = registry
        .resolve_method("helloworld.Greeter", "SayHello")
        .unwrap();
    assert_eq!(method.input().as_str(), "helloworld.HelloRequest");
    assert_eq!(method.output().as_str(), "helloworld.HelloReply");
    assert_eq!(method.streaming(), StreamingKind::Unary);
    assert_eq!(method.path(), "/helloworld.Greeter/SayHello");

    let err = registry
        .resolve_method("helloworld.Greeter", "SayGoodbye")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "No method \"SayGoodbye\" available for service 'Greeter'. Available methods are: SayHello"
    );
}

#[test]
fn test_blob_validates_against_metadata() {
    let service = greeter();
    verify_against_proto(&service).unwrap();
}

#[test]
fn test_stub_shape_selection() {
    // A binding generator branches on the streaming shape of each method;
    // every registered method must land in exactly one of the four arms.
    let mut registry = ServiceRegistry::new();
    registry.register(greeter()).unwrap();
    registry.register(router()).unwrap();

    let mut shapes = Vec::new();
    for service in registry.services() {
        for method in service.methods() {
            let shape = match method.streaming() {
                StreamingKind::Unary => "request_response",
                StreamingKind::ClientStreaming => "client_stream",
                StreamingKind::ServerStreaming => "server_stream",
                StreamingKind::Bidirectional => "duplex_stream",
            };
            shapes.push((method.path().to_string(), shape));
        }
    }

    assert_eq!(
        shapes,
        [
            ("/helloworld.Greeter/SayHello".to_string(), "request_response"),
            ("/routeguide.RouteGuide/GetFeature".to_string(), "request_response"),
            ("/routeguide.RouteGuide/ListFeatures".to_string(), "server_stream"),
            ("/routeguide.RouteGuide/RecordRoute".to_string(), "client_stream"),
            ("/routeguide.RouteGuide/RouteChat".to_string(), "duplex_stream"),
        ]
    );
}

#[test]
fn test_method_back_reference_reaches_registry_entry() {
    let mut registry = ServiceRegistry::new();
    registry.register(router()).unwrap();

    let method = registry
        .resolve_method("routeguide.RouteGuide", "RouteChat")
        .unwrap();
    let owner = method.service().unwrap();
    assert_eq!(owner.full_name(), "routeguide.RouteGuide");
    assert_eq!(
        owner.method_names(),
        ["GetFeature", "ListFeatures", "RecordRoute", "RouteChat"]
    );
}

#[test]
fn test_unknown_service_is_usage_error() {
    let registry = ServiceRegistry::new();
    let err = registry
        .resolve_method("helloworld.Greeter", "SayHello")
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnknownService(_)));
}
