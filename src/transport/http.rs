use super::{RawResponse, Transport, TransportError};
use crate::config::ClientConfig;
use crate::protocol::{ApiRequest, HttpMethod};
use crate::{Error, ErrorContext, Result};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::Proxy;
use tracing::{debug, warn};

/// Blocking HTTP transport built on `reqwest`.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(!config.verify_tls);

        if !config.verify_tls {
            warn!("TLS certificate verification is disabled");
        }

        if let Some(proxy_url) = &config.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("Invalid proxy: {}", e),
                    ErrorContext::new()
                        .with_field_path("proxy")
                        .with_details(proxy_url.clone())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(TransportError::from)?;

        Ok(Self { client })
    }

    fn multipart_form(request: &ApiRequest) -> std::result::Result<Option<Form>, TransportError> {
        let Some(attachment) = &request.attachment else {
            return Ok(None);
        };
        let mut form = Form::new();
        for (key, value) in &request.params {
            form = form.text(key.clone(), value.clone());
        }
        let part = Part::bytes(attachment.bytes.clone())
            .file_name(attachment.file_name.clone())
            .mime_str(attachment.mime)?;
        Ok(Some(form.part(attachment.field, part)))
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &ApiRequest) -> std::result::Result<RawResponse, TransportError> {
        let url = request.url();
        debug!(
            operation = %request.operation,
            method = %request.method,
            url = %url,
            params = ?request.redacted_params(),
            "sending request"
        );

        let builder = match request.method {
            HttpMethod::Get => self.client.get(&url).query(&request.params),
            HttpMethod::Post => match Self::multipart_form(request)? {
                Some(form) => self.client.post(&url).multipart(form),
                None => self.client.post(&url).form(&request.params),
            },
        };

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(operation = %request.operation, status, "Response: \n{}", body);

        Ok(RawResponse { status, body })
    }
}
