//! Configuration files of the generated API project.
//!
//! Every writer deletes the previous file and writes a fresh one; nothing is
//! merged. `launchSettings.json` and the `Dockerfile` need the project's
//! `.csproj` to learn its name and quietly do nothing when it is missing.

use std::path::{Path, PathBuf};

use globset::Glob;
use log::{info, warn};
use walkdir::WalkDir;

use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use crate::sources::write_file;

const APPSETTINGS_TEMPLATE: &str = include_str!("../templates/config/appsettings.json.j2");
const LAUNCH_SETTINGS_TEMPLATE: &str = include_str!("../templates/config/launchSettings.json.j2");
const DOCKERFILE_TEMPLATE: &str = include_str!("../templates/config/Dockerfile.j2");

pub const APPSETTINGS_FILE: &str = "appsettings.json";
pub const LAUNCH_SETTINGS_FILE: &str = "launchSettings.json";
pub const PROPERTIES_DIR: &str = "Properties";
pub const DOCKERFILE: &str = "Dockerfile";

/// Returns the stem of the first `*.csproj` directly inside `api_path`, in
/// file name order, or `None` when there is none.
pub fn find_project_name<P: AsRef<Path>>(api_path: P) -> Result<Option<String>> {
    let api_path = api_path.as_ref();
    if !api_path.is_dir() {
        return Ok(None);
    }

    let matcher = Glob::new("*.csproj")
        .map_err(|e| Error::ConfigError(e.to_string()))?
        .compile_matcher();

    for entry in WalkDir::new(api_path).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        if entry.file_type().is_file() && matcher.is_match(entry.file_name()) {
            let stem = entry.path().file_stem().and_then(|s| s.to_str()).map(str::to_string);
            if stem.is_some() {
                return Ok(stem);
            }
        }
    }

    Ok(None)
}

/// Replaces `appsettings.json` with the generated one.
pub fn write_appsettings(renderer: &dyn TemplateRenderer, api_path: &Path) -> Result<PathBuf> {
    let target = api_path.join(APPSETTINGS_FILE);
    let content = renderer.render(APPSETTINGS_TEMPLATE, &serde_json::json!({}))?;
    write_file(&target, &content)?;
    info!("New {APPSETTINGS_FILE} created");
    Ok(target)
}

/// Replaces `Properties/launchSettings.json` with `http` and `https` profiles on `port`.
///
/// # Returns
/// * `Ok(None)` when no `.csproj` is found in `api_path`
pub fn write_launch_settings(
    renderer: &dyn TemplateRenderer,
    api_path: &Path,
    port: u16,
) -> Result<Option<PathBuf>> {
    let Some(project_name) = find_project_name(api_path)? else {
        warn!("No .csproj file found in {}", api_path.display());
        return Ok(None);
    };

    let context = ProjectContext::new(project_name, port)?;
    let target = api_path.join(PROPERTIES_DIR).join(LAUNCH_SETTINGS_FILE);
    let content = renderer.render(LAUNCH_SETTINGS_TEMPLATE, &context.to_value())?;
    write_file(&target, &content)?;
    info!("New {LAUNCH_SETTINGS_FILE} created");
    Ok(Some(target))
}

/// Writes a multi-stage `Dockerfile` for the project found in `api_path`.
///
/// # Returns
/// * `Ok(None)` when no `.csproj` is found in `api_path`
pub fn write_dockerfile(renderer: &dyn TemplateRenderer, api_path: &Path) -> Result<Option<PathBuf>> {
    let Some(project_name) = find_project_name(api_path)? else {
        warn!("No .csproj file found in {}", api_path.display());
        return Ok(None);
    };

    let target = api_path.join(DOCKERFILE);
    let content = renderer.render(
        DOCKERFILE_TEMPLATE,
        &serde_json::json!({ "project_name": project_name }),
    )?;
    write_file(&target, &content)?;
    info!("{DOCKERFILE} updated for project {project_name}");
    Ok(Some(target))
}
