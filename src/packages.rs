//! NuGet packages installed into the generated API project.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::runner::{CommandRunner, ToolCommand};

/// A NuGet package reference, optionally pinned to a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub version: Option<&'static str>,
}

impl Package {
    const fn pinned(name: &'static str, version: &'static str) -> Self {
        Self { name, version: Some(version) }
    }

    const fn latest(name: &'static str) -> Self {
        Self { name, version: None }
    }

    /// `dotnet add package <name> [--version <version>]`
    pub fn install_command(&self) -> ToolCommand {
        let cmd = ToolCommand::dotnet(["add", "package", self.name]);
        match self.version {
            Some(version) => cmd.args(["--version", version]),
            None => cmd,
        }
    }
}

/// Packages installed in order. The second Swashbuckle entry upgrades the
/// 6.x reference to 7.x.
pub const API_PACKAGES: [Package; 7] = [
    Package::pinned("Microsoft.EntityFrameworkCore", "7.0.0"),
    Package::pinned("Microsoft.EntityFrameworkCore.InMemory", "7.0.0"),
    Package::pinned("Swashbuckle.AspNetCore", "6.0.0"),
    Package::latest("Microsoft.AspNetCore.Authentication.JwtBearer"),
    Package::pinned("Microsoft.EntityFrameworkCore.Sqlite", "7.0.0"),
    Package::pinned("Microsoft.EntityFrameworkCore.Design", "7.0.0"),
    Package::pinned("Swashbuckle.AspNetCore", "7.0.0"),
];

/// Installs [`API_PACKAGES`] into the project at `api_path`, stopping at the first failure.
pub fn install_packages(runner: &dyn CommandRunner, api_path: &Path) -> Result<()> {
    info!("Installing required packages...");
    for package in &API_PACKAGES {
        runner.run(&package.install_command(), Some(api_path))?;
    }
    info!("Packages installed");
    Ok(())
}
