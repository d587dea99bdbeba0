// Author: fnbench contributors
// Copyright © 2026, the fnbench authors, all rights reserved.
// Created: 9 October 2026

use crate::{
    reflection::{
        Registry, DESCRIBE_SERVICE, FUNCTION_SERVICE, INVOKE, LIST_SERVICES, REFLECTION_SERVICE,
    },
    wire::{Code, DescribeServiceRequest, InvokeReply, InvokeRequest, ListServicesReply, Status},
};
use fnbench_core::{Executor, InvocationError};
use serde::{de::DeserializeOwned, Serialize};
use std::{
    io::Read,
    panic::{catch_unwind, AssertUnwindSafe},
    sync::Arc,
};
use tiny_http::{Header, Method, Response};

/// Largest accepted request body.
const MAX_BODY: u64 = 64 * 1024;

/// An HTTP status and a JSON body, ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn ok(message: &impl Serialize) -> Self {
        match serde_json::to_string(message) {
            Ok(body) => Self { status: 200, body },
            Err(e) => Self::error(Status::internal(format!("failed encoding reply: {}", e))),
        }
    }

    fn error(status: Status) -> Self {
        Self::error_with(status.code.http_status(), status)
    }

    fn error_with(http_status: u16, status: Status) -> Self {
        // Status only holds strings, encoding cannot fail.
        let body = serde_json::to_string(&status).unwrap_or_default();
        Self {
            status: http_status,
            body,
        }
    }

    fn into_response(self) -> Response<std::io::Cursor<Vec<u8>>> {
        let mut response = Response::from_string(self.body).with_status_code(self.status);
        if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
            response.add_header(header);
        }
        response
    }
}

/// Routes calls to the function and to the reflection service.
pub struct Endpoint {
    executor: Arc<Executor>,
    registry: Registry,
}

impl Endpoint {
    pub fn new(executor: Arc<Executor>) -> Self {
        let registry = Registry::new(executor.identity());
        Self { executor, registry }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Read, handle and answer one request. Never fails: problems are
    /// reported to the client or logged.
    pub(crate) fn serve(&self, mut request: tiny_http::Request) {
        let mut body = vec![];
        let read = request
            .as_reader()
            .take(MAX_BODY + 1)
            .read_to_end(&mut body);

        let reply = match read {
            Err(e) => Reply::error(Status::invalid_argument(format!(
                "failed reading request body: {}",
                e
            ))),
            Ok(len) if len as u64 > MAX_BODY => Reply::error(Status::invalid_argument(format!(
                "request body larger than {} bytes",
                MAX_BODY
            ))),
            Ok(_) => self.handle(request.method(), request.url(), &body),
        };

        if let Err(e) = request.respond(reply.into_response()) {
            log::warn!("failed sending reply: {}", e);
        }
    }

    /// Handle one call given its HTTP verb, path and body.
    pub fn handle(&self, method: &Method, url: &str, body: &[u8]) -> Reply {
        let path = url.split('?').next().unwrap_or_default();
        let Some((service, rpc)) = path.trim_start_matches('/').split_once('/') else {
            return Reply::error(Status::unimplemented(format!("no such method {:?}", path)));
        };

        if !self.registry.has_method(service, rpc) {
            return Reply::error(Status::unimplemented(format!(
                "no such method {}/{}",
                service, rpc
            )));
        }

        if *method != Method::Post {
            return Reply::error_with(
                405,
                Status::unimplemented(format!("{}/{} only accepts POST", service, rpc)),
            );
        }

        match (service, rpc) {
            (FUNCTION_SERVICE, INVOKE) => self.invoke(body),
            (REFLECTION_SERVICE, LIST_SERVICES) => Reply::ok(&ListServicesReply {
                services: self.registry.list(),
            }),
            (REFLECTION_SERVICE, DESCRIBE_SERVICE) => self.describe(body),
            _ => Reply::error(Status::unimplemented(format!(
                "no handler for {}/{}",
                service, rpc
            ))),
        }
    }

    fn invoke(&self, body: &[u8]) -> Reply {
        let request: InvokeRequest = match decode(body) {
            Ok(request) => request,
            Err(status) => return Reply::error(status),
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.executor.invoke(request.name.as_deref())
        }));

        match outcome {
            Ok(Ok(invocation)) => {
                let message = self.executor.reply(&invocation);
                log::debug!("{}", message);
                Reply::ok(&InvokeReply { message })
            }
            Ok(Err(err)) => {
                log::warn!("{}", err);
                let code = match err {
                    InvocationError::DeadlineExceeded { .. } => Code::DeadlineExceeded,
                    InvocationError::Failed { .. } => Code::Internal,
                };
                Reply::error(Status::new(code, err.to_string()))
            }
            Err(_) => {
                log::error!("{} panicked", self.executor.identity());
                Reply::error(Status::internal(format!(
                    "{} panicked",
                    self.executor.identity()
                )))
            }
        }
    }

    fn describe(&self, body: &[u8]) -> Reply {
        let request: DescribeServiceRequest = match decode(body) {
            Ok(request) => request,
            Err(status) => return Reply::error(status),
        };

        match self.registry.describe(&request.name) {
            Some(service) => Reply::ok(service),
            None => Reply::error(Status::not_found(format!(
                "unknown service {:?}",
                request.name
            ))),
        }
    }
}

/// Decode a request message. An empty body is the default message, as an
/// all-defaults message is empty on the wire.
fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, Status> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        &b"{}"[..]
    } else {
        body
    };

    serde_json::from_slice(body)
        .map_err(|e| Status::invalid_argument(format!("malformed request: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, Reply};
    use crate::wire::{Code, InvokeReply, Status};
    use fnbench_core::{Call, Executor, InputCatalog, Workload};
    use std::sync::Arc;
    use tiny_http::Method;

    struct Flaky(InputCatalog);

    impl Workload for Flaky {
        fn identity(&self) -> &str {
            "Flaky"
        }

        fn catalog(&self) -> &InputCatalog {
            &self.0
        }

        fn invoke(&self, call: &Call<'_>) -> anyhow::Result<String> {
            match call.input {
                "bad" => anyhow::bail!("bad input"),
                "panic" => panic!("worker blew up"),
                input => Ok(input.len().to_string()),
            }
        }
    }

    fn endpoint(inputs: &[&str]) -> Endpoint {
        let catalog = InputCatalog::new(inputs.iter().copied()).unwrap();
        Endpoint::new(Arc::new(Executor::new(Arc::new(Flaky(catalog)))))
    }

    fn status(reply: &Reply) -> Status {
        serde_json::from_str(&reply.body).unwrap()
    }

    #[test]
    fn invoke_with_empty_body() {
        let endpoint = endpoint(&["abc"]);
        let reply = endpoint.handle(&Method::Post, "/fnbench.Function/Invoke", b"");
        assert_eq!(reply.status, 200);

        let reply: InvokeReply = serde_json::from_str(&reply.body).unwrap();
        assert!(reply
            .message
            .starts_with("fn: Flaky | input: abc, result: 3, lat: "));
    }

    #[test]
    fn malformed_body() {
        let endpoint = endpoint(&["abc"]);
        let reply = endpoint.handle(&Method::Post, "/fnbench.Function/Invoke", b"{name");
        assert_eq!(reply.status, 400);
        assert_eq!(status(&reply).code, Code::InvalidArgument);
        assert_eq!(endpoint.executor().selector().position(), 0);
    }

    #[test]
    fn unknown_method_and_verb() {
        let endpoint = endpoint(&["abc"]);

        let reply = endpoint.handle(&Method::Post, "/helloworld.Greeter/SayHello", b"");
        assert_eq!(reply.status, 404);
        assert_eq!(status(&reply).code, Code::Unimplemented);

        let reply = endpoint.handle(&Method::Get, "/fnbench.Function/Invoke", b"");
        assert_eq!(reply.status, 405);

        let reply = endpoint.handle(&Method::Post, "/", b"");
        assert_eq!(reply.status, 404);
    }

    #[test]
    fn failures_become_statuses() {
        let endpoint = endpoint(&["bad", "panic", "ok"]);

        let reply = endpoint.handle(&Method::Post, "/fnbench.Function/Invoke", b"{}");
        assert_eq!(reply.status, 500);
        assert!(status(&reply).message.contains("bad input"));

        let reply = endpoint.handle(&Method::Post, "/fnbench.Function/Invoke", b"{}");
        assert_eq!(reply.status, 500);
        assert!(status(&reply).message.contains("panicked"));

        let reply = endpoint.handle(&Method::Post, "/fnbench.Function/Invoke", b"{}");
        assert_eq!(reply.status, 200);
    }

    #[test]
    fn describe_unknown_service() {
        let endpoint = endpoint(&["abc"]);
        let reply = endpoint.handle(
            &Method::Post,
            "/fnbench.reflection.ServerReflection/DescribeService",
            br#"{"name": "nope"}"#,
        );
        assert_eq!(reply.status, 404);
        assert_eq!(status(&reply).code, Code::NotFound);
    }
}
