use anyhow::{Context, Result};
use fnbench::server::{
    reflection::{
        ServiceDescriptor, DESCRIBE_SERVICE, FUNCTION_SERVICE, INVOKE, LIST_SERVICES,
        REFLECTION_SERVICE,
    },
    wire::{DescribeServiceRequest, InvokeReply, InvokeRequest, ListServicesReply, Status},
};
use serde::{de::DeserializeOwned, Serialize};

/// Blocking client for a running fnbench server.
pub(super) struct Client {
    base: String,
    http: reqwest::blocking::Client,
}

impl Client {
    pub(super) fn new(addr: &str) -> Self {
        let addr = addr.trim_end_matches('/');
        let base = if addr.starts_with("http://") || addr.starts_with("https://") {
            addr.to_owned()
        } else {
            format!("http://{}", addr)
        };

        Self {
            base,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// The outer result carries transport failures, the inner one the
    /// status of a call the server answered.
    pub(super) fn invoke(&self, name: Option<&str>) -> Result<Result<String, Status>> {
        let request = InvokeRequest {
            name: name.map(str::to_owned),
        };

        Ok(self
            .call::<_, InvokeReply>(FUNCTION_SERVICE, INVOKE, &request)?
            .map(|reply| reply.message))
    }

    pub(super) fn list_services(&self) -> Result<Vec<String>> {
        let reply = self
            .call::<_, ListServicesReply>(
                REFLECTION_SERVICE,
                LIST_SERVICES,
                &serde_json::json!({}),
            )?
            .map_err(anyhow::Error::new)?;
        Ok(reply.services)
    }

    pub(super) fn describe_service(&self, name: &str) -> Result<ServiceDescriptor> {
        let request = DescribeServiceRequest {
            name: name.to_owned(),
        };

        self.call::<_, ServiceDescriptor>(REFLECTION_SERVICE, DESCRIBE_SERVICE, &request)?
            .map_err(anyhow::Error::new)
    }

    fn call<Req, Rep>(
        &self,
        service: &str,
        method: &str,
        request: &Req,
    ) -> Result<Result<Rep, Status>>
    where
        Req: Serialize,
        Rep: DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base, service, method);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .with_context(|| format!("failed calling {}", url))?;

        if response.status().is_success() {
            Ok(Ok(response.json()?))
        } else {
            let code = response.status();
            let text = response.text()?;
            let status = serde_json::from_str::<Status>(&text)
                .with_context(|| format!("unexpected {} reply from {}: {}", code, url, text))?;
            Ok(Err(status))
        }
    }
}
