//! Scaffold flow: bootstraps a .NET web API solution.
//!
//! Steps run strictly in order and the first failure aborts the flow. Files
//! and directories created before the failure are left in place.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::info;

use crate::constants::{API_FOLDERS, DEFAULT_MIGRATION, DEFAULT_PORT};
use crate::context::ProjectContext;
use crate::error::{Error, Result};
use crate::layout::create_folders;
use crate::packages::install_packages;
use crate::renderer::TemplateRenderer;
use crate::runner::{CommandRunner, ToolCommand};
use crate::settings::{write_appsettings, write_dockerfile, write_launch_settings};
use crate::sources::write_sources;

/// Parameters of one scaffold run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    pub solution: String,
    pub api: String,
    pub path: PathBuf,
    pub port: u16,
    pub create_tests: bool,
    pub run_server: bool,
    pub skip_migrations: bool,
    pub migration: String,
}

impl ScaffoldOptions {
    pub fn new<S: Into<String>>(solution: S, api: S) -> Self {
        Self {
            solution: solution.into(),
            api: api.into(),
            path: PathBuf::from("."),
            port: DEFAULT_PORT,
            create_tests: false,
            run_server: false,
            skip_migrations: false,
            migration: DEFAULT_MIGRATION.to_string(),
        }
    }

    /// Names end up in file names, namespaces and command arguments, so they
    /// must be non-empty and free of whitespace and path separators. The API
    /// name becomes the root C# namespace and must be a dotted identifier.
    pub fn validate(&self) -> Result<()> {
        validate_name("solution", &self.solution)?;
        validate_name("API project", &self.api)?;
        validate_namespace("API project", &self.api)?;
        validate_name("migration", &self.migration)?;
        ProjectContext::new(self.api.as_str(), self.port).map(|_| ())
    }

    fn test_project(&self) -> String {
        format!("{}.Tests", self.api)
    }

    fn solution_file(&self) -> String {
        format!("{}.sln", self.solution)
    }
}

fn validate_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ValidationError(format!("{what} name must not be empty")));
    }
    if name.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return Err(Error::ValidationError(format!(
            "{what} name '{name}' must not contain whitespace or path separators"
        )));
    }
    Ok(())
}

fn validate_namespace(what: &str, name: &str) -> Result<()> {
    let is_identifier = |segment: &str| {
        let mut chars = segment.chars();
        chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
            && chars.all(|c| c.is_alphanumeric() || c == '_')
    };
    if !name.split('.').all(is_identifier) {
        return Err(Error::ValidationError(format!(
            "{what} name '{name}' must be a valid C# namespace (letters, digits, '_' and '.')"
        )));
    }
    Ok(())
}

/// Summary of a finished scaffold run.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub base_path: PathBuf,
    pub api_path: PathBuf,
    pub test_project: Option<String>,
    pub elapsed: Duration,
    pub swagger_url: String,
}

/// Runs the scaffold flow against a command runner and a template renderer.
pub struct Scaffolder<'a> {
    runner: &'a dyn CommandRunner,
    renderer: &'a dyn TemplateRenderer,
    options: ScaffoldOptions,
}

impl<'a> Scaffolder<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        renderer: &'a dyn TemplateRenderer,
        options: ScaffoldOptions,
    ) -> Self {
        Self { runner, renderer, options }
    }

    /// Executes every step of the flow.
    ///
    /// # Flow
    /// 1. Creates the base directory
    /// 2. Creates the solution and the web API project, checks the project
    ///    folder exists, links them
    /// 3. Creates the folder tree and installs NuGet packages
    /// 4. Writes the source files
    /// 5. Creates the xUnit test project when requested
    /// 6. Writes appsettings, launch settings and the Dockerfile
    /// 7. Applies EF Core migrations unless skipped
    ///
    /// Starting the server is left to [`Scaffolder::serve`] so the caller can
    /// report the result before the server blocks.
    pub fn run(&self) -> Result<ScaffoldReport> {
        let started = Instant::now();
        let opts = &self.options;
        opts.validate()?;

        fs::create_dir_all(&opts.path).map_err(Error::IoError)?;
        let base_path = fs::canonicalize(&opts.path).map_err(Error::IoError)?;
        info!("Base path: {}", base_path.display());

        self.create_solution(&base_path)?;

        let api_path = base_path.join(&opts.api);
        create_folders(&api_path, &API_FOLDERS)?;
        install_packages(self.runner, &api_path)?;

        let context = ProjectContext::new(opts.api.as_str(), opts.port)?;
        write_sources(self.renderer, &api_path, &context)?;

        let test_project = if opts.create_tests {
            Some(self.create_test_project(&base_path)?)
        } else {
            None
        };

        write_appsettings(self.renderer, &api_path)?;
        write_launch_settings(self.renderer, &api_path, opts.port)?;
        write_dockerfile(self.renderer, &api_path)?;

        if opts.skip_migrations {
            info!("Skipping database migrations");
        } else {
            self.apply_migrations(&api_path)?;
        }

        Ok(ScaffoldReport {
            base_path,
            api_path,
            test_project,
            elapsed: started.elapsed(),
            swagger_url: format!("http://localhost:{}/index.html", opts.port),
        })
    }

    /// Runs `dotnet run --open` in the API project when `run_server` is set.
    /// Blocks until the server exits.
    pub fn serve(&self, report: &ScaffoldReport) -> Result<()> {
        if !self.options.run_server {
            return Ok(());
        }
        info!("Starting server...");
        self.run_in(ToolCommand::dotnet(["run", "--open"]).inherit_output(), &report.api_path)?;
        info!("Server stopped");
        Ok(())
    }

    fn run_in(&self, command: ToolCommand, cwd: &Path) -> Result<()> {
        self.runner.run(&command, Some(cwd)).map(|_| ())
    }

    fn create_solution(&self, base_path: &Path) -> Result<()> {
        let opts = &self.options;
        self.run_in(ToolCommand::dotnet(["new", "sln", "-n", opts.solution.as_str()]), base_path)?;
        self.run_in(ToolCommand::dotnet(["new", "webapi", "-n", opts.api.as_str()]), base_path)?;

        let api_path = base_path.join(&opts.api);
        if !api_path.is_dir() {
            return Err(Error::ProjectNotFound { path: api_path.display().to_string() });
        }
        info!("Project found: {}", api_path.display());

        self.run_in(
            ToolCommand::dotnet(["sln", opts.solution_file().as_str(), "add"])
                .arg(format!("{0}/{0}.csproj", opts.api)),
            base_path,
        )
    }

    fn create_test_project(&self, base_path: &Path) -> Result<String> {
        let opts = &self.options;
        let test_name = opts.test_project();
        self.run_in(ToolCommand::dotnet(["new", "xunit", "-n", test_name.as_str()]), base_path)?;
        self.run_in(
            ToolCommand::dotnet(["sln", opts.solution_file().as_str(), "add"])
                .arg(format!("{0}/{0}.csproj", test_name)),
            base_path,
        )?;
        info!("Test project created: {test_name}");
        Ok(test_name)
    }

    fn apply_migrations(&self, api_path: &Path) -> Result<()> {
        self.run_in(
            ToolCommand::dotnet(["ef", "migrations", "add", self.options.migration.as_str()]),
            api_path,
        )?;
        self.run_in(ToolCommand::dotnet(["ef", "database", "update"]), api_path)
    }
}
