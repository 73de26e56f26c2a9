//! Remote-service validation: upload the group's files as multipart
//! form data and relay the service's verdict.

use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use tracing::{debug, warn};

use crate::error::{Result, ValidateError};
use crate::request::ValidationRequest;
use crate::strategy::{ServiceConfig, ValidationStrategy};

pub struct ServiceValidator {
    config: ServiceConfig,
    client: Client,
}

impl ServiceValidator {
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    fn endpoint_url(&self) -> String {
        format!("{}{}", self.config.base_url, self.config.endpoint)
    }

    /// Assemble the multipart form. All four parts are required here;
    /// the check runs before any bytes leave the machine.
    fn build_form(&self, request: &ValidationRequest) -> Result<Form> {
        let missing = request.missing_slots();
        if !missing.is_empty() {
            return Err(ValidateError::MissingInput { missing });
        }

        let mut form = Form::new();
        for (slot, file) in request.filled() {
            let bytes = std::fs::read(&file.path).map_err(|e| ValidateError::PayloadRead {
                path: file.path.clone(),
                source: e,
            })?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str("text/csv")?;
            form = form.part(slot.part_name(), part);
        }
        Ok(form)
    }
}

impl ValidationStrategy for ServiceValidator {
    fn name(&self) -> &'static str {
        "service"
    }

    fn validate(&self, request: &ValidationRequest, correlation_id: &str) -> Result<String> {
        request.ensure_not_empty()?;
        let form = self.build_form(request)?;
        let url = self.endpoint_url();
        debug!("[{}] Uploading group {} to {}", correlation_id, request.group(), url);

        let started = Instant::now();
        let response = self.client.post(&url).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(
            "[{}] Service answered {} in {} ms",
            correlation_id,
            status,
            started.elapsed().as_millis()
        );

        if !status.is_success() {
            warn!(
                "[{}] Validation service rejected group {}: HTTP {}",
                correlation_id,
                request.group(),
                status
            );
            return Err(ValidateError::ServiceStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}
