use netbake::error::{Error, Result};
use netbake::renderer::MiniJinjaRenderer;
use netbake::runner::{CommandOutput, CommandRunner, ToolCommand};
use netbake::scaffold::{ScaffoldOptions, Scaffolder};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Records every command and emulates the parts of `dotnet new` the flow
/// depends on. Fails the command whose line contains `fail_on`; with
/// `no_project_output` set, `dotnet new` succeeds without creating anything.
#[derive(Default)]
struct MockRunner {
    calls: RefCell<Vec<(String, Option<PathBuf>)>>,
    fail_on: Option<&'static str>,
    no_project_output: bool,
}

impl MockRunner {
    fn failing_on(pattern: &'static str) -> Self {
        Self { fail_on: Some(pattern), ..Default::default() }
    }

    fn without_project_output() -> Self {
        Self { no_project_output: true, ..Default::default() }
    }

    fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(cmd, _)| cmd.clone()).collect()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &ToolCommand, cwd: Option<&Path>) -> Result<CommandOutput> {
        let line = command.to_string();
        self.calls.borrow_mut().push((line.clone(), cwd.map(Path::to_path_buf)));

        if self.fail_on.is_some_and(|pattern| line.contains(pattern)) {
            return Err(Error::CommandFailed { command: line, stderr: "mock failure".to_string() });
        }

        if self.no_project_output {
            return Ok(CommandOutput::default());
        }

        if let (["new", "webapi" | "xunit", "-n", name], Some(cwd)) =
            (command.args.iter().map(String::as_str).collect::<Vec<_>>().as_slice(), cwd)
        {
            let project = cwd.join(name);
            fs::create_dir_all(&project).unwrap();
            fs::write(project.join(format!("{name}.csproj")), "<Project />").unwrap();
            fs::write(project.join("Program.cs"), "// generated by dotnet new").unwrap();
        }
        Ok(CommandOutput::default())
    }
}

fn options(path: &Path) -> ScaffoldOptions {
    let mut options = ScaffoldOptions::new("Store", "Shop");
    options.path = path.to_path_buf();
    options.port = 5100;
    options
}

#[test_log::test]
fn test_full_flow_command_sequence() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::default();
    let renderer = MiniJinjaRenderer::new();
    let scaffolder = Scaffolder::new(&runner, &renderer, options(temp_dir.path()));

    let report = scaffolder.run().unwrap();

    let commands = runner.commands();
    assert_eq!(
        commands,
        vec![
            "dotnet new sln -n Store",
            "dotnet new webapi -n Shop",
            "dotnet sln Store.sln add Shop/Shop.csproj",
            "dotnet add package Microsoft.EntityFrameworkCore --version 7.0.0",
            "dotnet add package Microsoft.EntityFrameworkCore.InMemory --version 7.0.0",
            "dotnet add package Swashbuckle.AspNetCore --version 6.0.0",
            "dotnet add package Microsoft.AspNetCore.Authentication.JwtBearer",
            "dotnet add package Microsoft.EntityFrameworkCore.Sqlite --version 7.0.0",
            "dotnet add package Microsoft.EntityFrameworkCore.Design --version 7.0.0",
            "dotnet add package Swashbuckle.AspNetCore --version 7.0.0",
            "dotnet ef migrations add InitialCreate",
            "dotnet ef database update",
        ]
    );

    let base = fs::canonicalize(temp_dir.path()).unwrap();
    let api = base.join("Shop");
    let calls = runner.calls.borrow();
    assert_eq!(calls[0].1.as_deref(), Some(base.as_path()));
    assert_eq!(calls[3].1.as_deref(), Some(api.as_path()));
    assert_eq!(calls[11].1.as_deref(), Some(api.as_path()));

    assert_eq!(report.api_path, api);
    assert_eq!(report.test_project, None);
    assert_eq!(report.swagger_url, "http://localhost:5100/index.html");

    assert!(api.join("Controllers/.gitkeep").exists());
    assert!(api.join("Middleware/.gitkeep").exists());
    assert!(api.join("Controllers/ProductosController.cs").exists());
    assert!(api.join("appsettings.json").exists());
    assert!(api.join("Properties/launchSettings.json").exists());
    assert!(api.join("Dockerfile").exists());

    let program = fs::read_to_string(api.join("Program.cs")).unwrap();
    assert!(program.contains("using Shop.Repositories;"));
}

#[test]
fn test_test_project_and_server() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::default();
    let renderer = MiniJinjaRenderer::new();
    let mut opts = options(temp_dir.path());
    opts.create_tests = true;
    opts.run_server = true;
    opts.skip_migrations = true;
    let scaffolder = Scaffolder::new(&runner, &renderer, opts);

    let report = scaffolder.run().unwrap();
    assert_eq!(report.test_project.as_deref(), Some("Shop.Tests"));

    let commands = runner.commands();
    assert!(commands.contains(&"dotnet new xunit -n Shop.Tests".to_string()));
    assert!(commands.contains(&"dotnet sln Store.sln add Shop.Tests/Shop.Tests.csproj".to_string()));
    assert!(!commands.iter().any(|c| c.starts_with("dotnet ef")));
    assert!(!commands.iter().any(|c| c == "dotnet run --open"));

    scaffolder.serve(&report).unwrap();
    assert_eq!(runner.commands().last().map(String::as_str), Some("dotnet run --open"));
}

#[test]
fn test_serve_without_run_flag_does_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::default();
    let renderer = MiniJinjaRenderer::new();
    let mut opts = options(temp_dir.path());
    opts.skip_migrations = true;
    let scaffolder = Scaffolder::new(&runner, &renderer, opts);

    let report = scaffolder.run().unwrap();
    let before = runner.commands().len();
    scaffolder.serve(&report).unwrap();
    assert_eq!(runner.commands().len(), before);
}

#[test_log::test]
fn test_failure_halts_subsequent_steps() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::failing_on("Swashbuckle.AspNetCore --version 6.0.0");
    let renderer = MiniJinjaRenderer::new();
    let scaffolder = Scaffolder::new(&runner, &renderer, options(temp_dir.path()));

    let err = scaffolder.run().unwrap_err();
    match err {
        Error::CommandFailed { command, stderr } => {
            assert_eq!(command, "dotnet add package Swashbuckle.AspNetCore --version 6.0.0");
            assert_eq!(stderr, "mock failure");
        }
        other => panic!("Expected CommandFailed, got {other:?}"),
    }

    let commands = runner.commands();
    assert_eq!(commands.len(), 6);
    assert_eq!(commands.last().unwrap(), "dotnet add package Swashbuckle.AspNetCore --version 6.0.0");

    // Folders created before the failure stay, nothing after it is written.
    let api = temp_dir.path().join("Shop");
    assert!(api.join("Entities/.gitkeep").exists());
    assert!(!api.join("Entities/Producto.cs").exists());
    assert!(!api.join("Dockerfile").exists());
    assert_eq!(fs::read_to_string(api.join("Program.cs")).unwrap(), "// generated by dotnet new");
}

#[test]
fn test_first_command_failure_stops_everything() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::failing_on("new sln");
    let renderer = MiniJinjaRenderer::new();
    let scaffolder = Scaffolder::new(&runner, &renderer, options(temp_dir.path()));

    assert!(matches!(scaffolder.run(), Err(Error::CommandFailed { .. })));
    assert_eq!(runner.commands(), vec!["dotnet new sln -n Store"]);
    assert!(!temp_dir.path().join("Shop").exists());
}

#[test]
fn test_interrupt_propagates() {
    struct InterruptingRunner;
    impl CommandRunner for InterruptingRunner {
        fn run(&self, _command: &ToolCommand, _cwd: Option<&Path>) -> Result<CommandOutput> {
            Err(Error::Interrupted)
        }
    }

    let temp_dir = TempDir::new().unwrap();
    let renderer = MiniJinjaRenderer::new();
    let scaffolder = Scaffolder::new(&InterruptingRunner, &renderer, options(temp_dir.path()));

    let err = scaffolder.run().unwrap_err();
    assert!(matches!(err, Error::Interrupted));
    assert_eq!(err.exit_code(), 0);
}

#[test]
fn test_invalid_options_run_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::default();
    let renderer = MiniJinjaRenderer::new();

    let mut opts = options(temp_dir.path());
    opts.api = "My Api".to_string();
    let scaffolder = Scaffolder::new(&runner, &renderer, opts);
    assert!(matches!(scaffolder.run(), Err(Error::ValidationError(_))));

    for api in ["my-api", "1Shop", "Shop..Api", "Shop.Api-v2"] {
        let mut opts = options(temp_dir.path());
        opts.api = api.to_string();
        let scaffolder = Scaffolder::new(&runner, &renderer, opts);
        assert!(matches!(scaffolder.run(), Err(Error::ValidationError(_))), "{api}");
    }

    let mut opts = options(temp_dir.path());
    opts.port = 65000;
    let scaffolder = Scaffolder::new(&runner, &renderer, opts);
    assert!(matches!(scaffolder.run(), Err(Error::ValidationError(_))));

    assert!(runner.commands().is_empty());
}

#[test]
fn test_custom_migration_name() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::default();
    let renderer = MiniJinjaRenderer::new();
    let mut opts = options(temp_dir.path());
    opts.migration = "AddProductos".to_string();

    Scaffolder::new(&runner, &renderer, opts).run().unwrap();

    assert!(runner.commands().contains(&"dotnet ef migrations add AddProductos".to_string()));
}

#[test]
fn test_dotted_api_name_is_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::default();
    let renderer = MiniJinjaRenderer::new();
    let mut opts = options(temp_dir.path());
    opts.api = "Shop.Api_2".to_string();

    let report = Scaffolder::new(&runner, &renderer, opts).run().unwrap();

    assert!(report.api_path.ends_with("Shop.Api_2"));
    let entity = fs::read_to_string(report.api_path.join("Entities/Producto.cs")).unwrap();
    assert!(entity.contains("namespace Shop.Api_2.Entities"));
}

#[test_log::test]
fn test_missing_project_after_dotnet_new_stops_the_flow() {
    let temp_dir = TempDir::new().unwrap();
    let runner = MockRunner::without_project_output();
    let renderer = MiniJinjaRenderer::new();
    let scaffolder = Scaffolder::new(&runner, &renderer, options(temp_dir.path()));

    let err = scaffolder.run().unwrap_err();

    match &err {
        Error::ProjectNotFound { path } => assert!(path.ends_with("Shop"), "{path}"),
        other => panic!("Expected ProjectNotFound, got {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
    assert_eq!(runner.commands(), vec!["dotnet new sln -n Store", "dotnet new webapi -n Shop"]);
    assert!(!temp_dir.path().join("Shop").exists());
}
