//! Command-line interfaces of the `netbake` and `cif-extract` binaries.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser};
use std::io;
use std::path::PathBuf;

use crate::constants::{DEFAULT_MIGRATION, DEFAULT_PORT};
use crate::error::Result;
use crate::prompt::{value_or_prompt, Prompter};
use crate::scaffold::ScaffoldOptions;

/// Command-line arguments of `netbake`.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "netbake: scaffolds a .NET web API solution with Swagger, EF Core and a sample repository",
    long_about = None
)]
pub struct Args {
    /// Solution name (prompted for when omitted)
    #[arg(long = "sln", value_name = "NAME")]
    pub solution: Option<String>,

    /// Web API project name (prompted for when omitted)
    #[arg(long, value_name = "NAME")]
    pub api: Option<String>,

    /// Directory where the solution is created
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Create an xUnit test project and add it to the solution
    #[arg(long)]
    pub test: bool,

    /// Start the server once the project is ready
    #[arg(long)]
    pub run: bool,

    /// Port of the http launch profile; https uses the same port and
    /// plain http moves to port + 1000
    #[arg(long = "puerto", visible_alias = "port", value_name = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Name of the initial EF Core migration
    #[arg(long, value_name = "NAME", default_value = DEFAULT_MIGRATION)]
    pub migration: String,

    /// Do not run `dotnet ef migrations add` and `dotnet ef database update`
    #[arg(long)]
    pub skip_migrations: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the scaffold parameters, prompting for names not given as flags.
    pub fn into_options(self, prompter: &dyn Prompter) -> Result<ScaffoldOptions> {
        let solution = value_or_prompt(prompter, self.solution, "Solution name")?;
        let api = value_or_prompt(prompter, self.api, "Web API project name")?;

        Ok(ScaffoldOptions {
            solution,
            api,
            path: self.path,
            port: self.port,
            create_tests: self.test,
            run_server: self.run,
            skip_migrations: self.skip_migrations,
            migration: self.migration,
        })
    }
}

/// Command-line arguments of `cif-extract`.
#[derive(Parser, Debug)]
#[command(
    name = "cif-extract",
    author,
    version,
    about = "Extracts labeled fields from a tax-status certificate (PDF or text)",
    long_about = None
)]
pub struct ExtractArgs {
    /// PDF or plain text document to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON or YAML file with labeled patterns replacing the built-in set
    #[arg(short, long, value_name = "FILE")]
    pub patterns: Option<PathBuf>,

    /// Print the fields as a JSON object instead of `label: value` lines
    #[arg(short, long)]
    pub json: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Writes the usage text shown when a required argument is missing.
pub fn write_usage<T: CommandFactory>(out: &mut impl io::Write) -> io::Result<()> {
    T::command()
        .help_template(
            r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
        )
        .write_help(out)
}

fn parse_or_help<T: Parser + CommandFactory>() -> T {
    match T::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                if let Err(err) = write_usage::<T>(&mut io::stdout()) {
                    eprintln!("Could not print usage: {err}");
                }
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}

/// Parses `netbake` arguments, exiting on invalid input.
pub fn get_args() -> Args {
    parse_or_help::<Args>()
}

/// Parses `cif-extract` arguments, printing the help and exiting with status 1
/// when the input is missing.
pub fn get_extract_args() -> ExtractArgs {
    parse_or_help::<ExtractArgs>()
}
