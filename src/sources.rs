//! Source files written into the generated API project.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// A file written relative to the API project directory.
#[derive(Debug, Clone, Copy)]
pub struct SourceFile {
    pub path: &'static str,
    pub template: &'static str,
}

/// Entity, DTO, context, repository interface and implementation, helper,
/// controller and the application entry point.
pub const SOURCE_FILES: [SourceFile; 8] = [
    SourceFile {
        path: "Entities/Producto.cs",
        template: include_str!("../templates/api/Producto.cs.j2"),
    },
    SourceFile {
        path: "Dto/ProductoDto.cs",
        template: include_str!("../templates/api/ProductoDto.cs.j2"),
    },
    SourceFile {
        path: "Data/AppDbContext.cs",
        template: include_str!("../templates/api/AppDbContext.cs.j2"),
    },
    SourceFile {
        path: "Interfaces/IProductoRepository.cs",
        template: include_str!("../templates/api/IProductoRepository.cs.j2"),
    },
    SourceFile {
        path: "Repositories/ProductoRepository.cs",
        template: include_str!("../templates/api/ProductoRepository.cs.j2"),
    },
    SourceFile {
        path: "Helpers/FormatoHelper.cs",
        template: include_str!("../templates/api/FormatoHelper.cs.j2"),
    },
    SourceFile {
        path: "Controllers/ProductosController.cs",
        template: include_str!("../templates/api/ProductosController.cs.j2"),
    },
    SourceFile {
        path: "Program.cs",
        template: include_str!("../templates/api/Program.cs.j2"),
    },
];

/// Writes `content` to `path`, creating parent directories and replacing any
/// existing file.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    if path.exists() {
        debug!("Replacing {}", path.display());
        fs::remove_file(path).map_err(Error::IoError)?;
    }
    fs::write(path, content).map_err(Error::IoError)
}

/// Renders every entry of [`SOURCE_FILES`] into `api_path`.
///
/// The `Program.cs` generated by `dotnet new webapi` is replaced, as is any
/// file left by a previous run.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - Paths of the written files
pub fn write_sources(
    renderer: &dyn TemplateRenderer,
    api_path: &Path,
    context: &ProjectContext,
) -> Result<Vec<PathBuf>> {
    let value = context.to_value();
    let mut written = Vec::with_capacity(SOURCE_FILES.len());

    for source in &SOURCE_FILES {
        let content = renderer.render(source.template, &value)?;
        let target = api_path.join(source.path);
        write_file(&target, &content)?;
        debug!("Wrote {}", target.display());
        written.push(target);
    }

    info!("Entity, DTO, Context, Repository, Helper, Controller and Program.cs created");
    Ok(written)
}
