//! Values the embedded templates are rendered with.

use crate::constants::SECONDARY_PORT_OFFSET;
use crate::error::{Error, Result};

/// Template context for one generated API project.
///
/// Rendering is a pure function of this value: the same project name and
/// port always produce byte-identical files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_name: String,
    pub port: u16,
    pub secondary_port: u16,
}

impl ProjectContext {
    /// # Errors
    /// * `Error::ValidationError` if the name is blank or `port` leaves no
    ///   room for the secondary http port
    pub fn new<S: Into<String>>(project_name: S, port: u16) -> Result<Self> {
        let project_name = project_name.into();
        if project_name.trim().is_empty() {
            return Err(Error::ValidationError("project name must not be empty".to_string()));
        }
        let secondary_port = port.checked_add(SECONDARY_PORT_OFFSET).ok_or_else(|| {
            Error::ValidationError(format!(
                "port {port} is too high, it must be at most {}",
                u16::MAX - SECONDARY_PORT_OFFSET
            ))
        })?;
        Ok(Self { project_name, port, secondary_port })
    }

    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "project_name": self.project_name,
            "port": self.port,
            "secondary_port": self.secondary_port,
        })
    }
}
