// Copyright (c) 2026 The pixseal-core Authors
// SPDX-License-Identifier: GPL-3.0-only

//! Request dispatch.
//!
//! [`Processor`] is the core's side of the transport boundary: it takes a
//! JSON request body, validates it into a typed request, runs the matching
//! pipeline and returns a wire [`Response`]. Failures become
//! `{ "success": false, "error": ... }` and never escape as panics.
//!
//! Two entry points mirror the service endpoints:
//! - `process`: `algorithm` selects watermark embedding or forensics
//! - `verify`: watermark extraction
//!
//! A processor holds no per-request state and is `Send + Sync`; share one
//! behind an `Arc` across worker threads.

pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod stats;

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{error, info};

use crate::forensics;
use crate::raster::codec::{FileCodec, ImageCodec};
use crate::stego;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ErrorKind, ServiceError};
pub use request::{ProcessRequest, RequestError, VerifyRequest};
pub use response::Response;
pub use stats::{NoopObserver, Operation, RequestObserver, RequestOutcome, ServiceStats, StatsSnapshot};

/// Validates requests and runs them against an [`ImageCodec`].
pub struct Processor<C: ImageCodec = FileCodec> {
    codec: C,
    config: ServiceConfig,
    observer: Arc<dyn RequestObserver>,
}

impl Processor<FileCodec> {
    /// Processor over the filesystem codec.
    pub fn with_file_codec(config: ServiceConfig) -> Result<Self, ConfigError> {
        Self::new(FileCodec, config)
    }
}

impl<C: ImageCodec> Processor<C> {
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` fails validation.
    pub fn new(codec: C, config: ServiceConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { codec, config, observer: Arc::new(NoopObserver) })
    }

    /// Report every request to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Handle a `process` body (watermark embed or forensics).
    pub fn handle_process(&self, body: &Value) -> Response {
        self.dispatch(|| self.process_value(body))
    }

    /// Handle a `verify` body.
    pub fn handle_verify(&self, body: &Value) -> Response {
        self.dispatch(|| self.verify_value(body))
    }

    /// [`Processor::handle_process`] on raw JSON text.
    pub fn handle_process_json(&self, raw: &str) -> String {
        self.dispatch(|| match request::parse_body(raw) {
            Ok(body) => self.process_value(&body),
            Err(e) => (Operation::Unknown, Err(e.into())),
        })
        .to_json()
    }

    /// [`Processor::handle_verify`] on raw JSON text.
    pub fn handle_verify_json(&self, raw: &str) -> String {
        self.dispatch(|| match request::parse_body(raw) {
            Ok(body) => self.verify_value(&body),
            Err(e) => (Operation::Unknown, Err(e.into())),
        })
        .to_json()
    }

    fn process_value(&self, body: &Value) -> (Operation, Result<Response, ServiceError>) {
        // Attribute the request as soon as the algorithm is known, even if
        // the remaining fields fail validation.
        let operation = request::requested_algorithm(body)
            .map(request::Algorithm::operation)
            .unwrap_or(Operation::Unknown);
        let result = ProcessRequest::from_value(body)
            .map_err(ServiceError::from)
            .and_then(|req| self.run_process(req));
        (operation, result)
    }

    fn verify_value(&self, body: &Value) -> (Operation, Result<Response, ServiceError>) {
        let result = VerifyRequest::from_value(body)
            .map_err(ServiceError::from)
            .and_then(|req| self.run_verify(req));
        (Operation::Verify, result)
    }

    /// Run a validated process request.
    pub fn run_process(&self, req: ProcessRequest) -> Result<Response, ServiceError> {
        info!(
            algorithm = req.algorithm().as_str(),
            input = %req.input_path().display(),
            "processing request"
        );
        match req {
            ProcessRequest::Embed(r) => {
                let result = stego::watermark_encode(&self.codec, &r.input_path, &r.output_path, &r.watermark_data)?;
                Ok(result.into())
            }
            ProcessRequest::Analyze(r) => {
                let result = forensics::forensics_analyze(
                    &self.codec,
                    &r.input_path,
                    &r.output_path,
                    &self.config.forensics,
                )?;
                Ok(result.into())
            }
        }
    }

    /// Run a validated verify request.
    pub fn run_verify(&self, req: VerifyRequest) -> Result<Response, ServiceError> {
        let result = stego::watermark_verify(&self.codec, &req.input_path)?;
        Ok(result.into())
    }

    fn dispatch(&self, run: impl FnOnce() -> (Operation, Result<Response, ServiceError>)) -> Response {
        let started = Instant::now();
        self.observer.request_started();

        let (operation, result) = run();
        let elapsed = started.elapsed();

        let (response, error_kind) = match result {
            Ok(response) => {
                info!(%operation, elapsed_ms = elapsed.as_millis() as u64, "request completed");
                (response, None)
            }
            Err(e) => {
                error!(%operation, kind = %e.kind(), error = %e, "request failed");
                (Response::error(&e), Some(e.kind()))
            }
        };

        self.observer.request_finished(&RequestOutcome {
            operation,
            success: error_kind.is_none(),
            elapsed,
            error_kind,
        });
        response
    }
}
