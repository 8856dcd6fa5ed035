//! netbake bootstraps .NET web API solutions by driving the `dotnet` SDK and
//! writing a fixed set of template files. It also carries `cif-extract`, a
//! small regex-based field extractor for tax-status certificates.

/// Command-line interfaces of both binaries
pub mod cli;

/// Shared constants (folder names, default port, sentinel values)
pub mod constants;

/// Template context for the generated project
pub mod context;

/// Error types and handling
pub mod error;

/// Labeled regex field extraction from PDF or text documents
pub mod extract;

/// Folder tree of the generated project
pub mod layout;

pub mod logger;

/// NuGet package installation
pub mod packages;

/// Interactive prompts for missing parameters
pub mod prompt;

/// Template rendering engine
pub mod renderer;

/// External command execution
pub mod runner;

/// Orchestration of the scaffold flow
pub mod scaffold;

/// appsettings.json, launchSettings.json and Dockerfile writers
pub mod settings;

/// C# source file writers
pub mod sources;
