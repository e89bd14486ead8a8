use std::fmt::Display;

use tracing::{error, info};
use uuid::Uuid;

/// Identity stamped on every lifecycle event of a process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessContext {
    pub service: &'static str,
    pub service_id: Uuid,
    pub pid: u32,
    pub version: &'static str,
}

impl ProcessContext {
    pub fn new(service: &'static str, version: &'static str) -> Self {
        Self { service, service_id: Uuid::new_v4(), pid: std::process::id(), version }
    }

    pub fn info(&self, event: &str, message: &str) {
        info!(
            service = self.service,
            event,
            service_id = %self.service_id,
            pid = self.pid,
            version = self.version,
            "{message}"
        );
    }

    pub fn error(&self, event: &str, error: &dyn Display, message: &str) {
        error!(
            service = self.service,
            event,
            service_id = %self.service_id,
            pid = self.pid,
            version = self.version,
            error = %error,
            "{message}"
        );
    }
}
