// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 13 October 2026

/*!
Self-description of the server. Generic clients can list the services
behind an address and fetch the method and message layout of each one,
without a function specific stub.
*/

use serde::{Deserialize, Serialize};

pub const FUNCTION_SERVICE: &str = "fnbench.Function";
pub const REFLECTION_SERVICE: &str = "fnbench.reflection.ServerReflection";

pub const INVOKE: &str = "Invoke";
pub const LIST_SERVICES: &str = "ListServices";
pub const DESCRIBE_SERVICE: &str = "DescribeService";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub number: u32,
    /// Scalar type, or the full name of a nested message.
    pub kind: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub repeated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDescriptor {
    pub name: String,
    pub fields: Vec<FieldDescriptor>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    pub name: String,
    pub input: MessageDescriptor,
    pub output: MessageDescriptor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    /// Free text, the function identity for the function service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl ServiceDescriptor {
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

fn field(name: &str, number: u32, kind: &str) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_owned(),
        number,
        kind: kind.to_owned(),
        optional: false,
        repeated: false,
    }
}

fn message(name: &str, fields: Vec<FieldDescriptor>) -> MessageDescriptor {
    MessageDescriptor {
        name: format!("fnbench.{}", name),
        fields,
    }
}

/// The business service: one unary `Invoke` method.
pub fn function_service(identity: &str) -> ServiceDescriptor {
    let name = FieldDescriptor {
        optional: true,
        ..field("name", 1, "string")
    };

    ServiceDescriptor {
        name: FUNCTION_SERVICE.to_owned(),
        description: Some(identity.to_owned()),
        methods: vec![MethodDescriptor {
            name: INVOKE.to_owned(),
            input: message("InvokeRequest", vec![name]),
            output: message("InvokeReply", vec![field("message", 1, "string")]),
        }],
    }
}

/// The reflection service itself, so it is discoverable like any other.
pub fn reflection_service() -> ServiceDescriptor {
    let services = FieldDescriptor {
        repeated: true,
        ..field("services", 1, "string")
    };

    ServiceDescriptor {
        name: REFLECTION_SERVICE.to_owned(),
        description: None,
        methods: vec![
            MethodDescriptor {
                name: LIST_SERVICES.to_owned(),
                input: message("ListServicesRequest", vec![]),
                output: message("ListServicesReply", vec![services]),
            },
            MethodDescriptor {
                name: DESCRIBE_SERVICE.to_owned(),
                input: message("DescribeServiceRequest", vec![field("name", 1, "string")]),
                output: message(
                    "ServiceDescriptor",
                    vec![
                        field("name", 1, "string"),
                        FieldDescriptor {
                            optional: true,
                            ..field("description", 2, "string")
                        },
                        FieldDescriptor {
                            repeated: true,
                            ..field("methods", 3, "fnbench.MethodDescriptor")
                        },
                    ],
                ),
            },
        ],
    }
}

/// All services exposed on one address.
#[derive(Clone, Debug)]
pub struct Registry {
    services: Vec<ServiceDescriptor>,
}

impl Registry {
    pub fn new(identity: &str) -> Self {
        Self {
            services: vec![function_service(identity), reflection_service()],
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.services.iter().map(|s| s.name.clone()).collect()
    }

    pub fn describe(&self, name: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Whether `service/method` is a known route.
    pub fn has_method(&self, service: &str, method: &str) -> bool {
        self.describe(service)
            .and_then(|s| s.method(method))
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{Registry, FUNCTION_SERVICE, INVOKE, REFLECTION_SERVICE};

    #[test]
    fn lists_both_services() {
        let registry = Registry::new("Model Serving CNN");
        assert_eq!(
            registry.list(),
            vec![FUNCTION_SERVICE.to_owned(), REFLECTION_SERVICE.to_owned()]
        );
    }

    #[test]
    fn function_service_shape() {
        let registry = Registry::new("Model Serving CNN");
        let service = registry.describe(FUNCTION_SERVICE).unwrap();
        assert_eq!(service.description.as_deref(), Some("Model Serving CNN"));

        let invoke = service.method(INVOKE).unwrap();
        assert_eq!(invoke.input.name, "fnbench.InvokeRequest");
        assert!(invoke.input.fields[0].optional);
        assert_eq!(invoke.output.fields[0].name, "message");
    }

    #[test]
    fn unknown_routes() {
        let registry = Registry::new("x");
        assert!(registry.has_method(FUNCTION_SERVICE, INVOKE));
        assert!(!registry.has_method(FUNCTION_SERVICE, "SayHello"));
        assert!(!registry.has_method("helloworld.Greeter", INVOKE));
    }
}
