//! netbake entry point: parses arguments and drives the scaffold flow.

use log::{info, warn};
use netbake::{
    cli::{get_args, Args},
    error::{default_error_handler, Error, Result},
    logger::init_logger,
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
    runner::SystemRunner,
    scaffold::Scaffolder,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    // Ctrl-C reaches the whole foreground group, netbake included.
    if let Err(err) = ctrlc::set_handler(|| {
        info!("{}", Error::Interrupted);
        std::process::exit(Error::Interrupted.exit_code());
    }) {
        warn!("Could not install the interrupt handler: {err}");
    }

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Resolves solution and API names (flags or prompts)
/// 2. Scaffolds the solution through the `dotnet` SDK
/// 3. Prints the summary
/// 4. Starts the server when `--run` is given
fn run(args: Args) -> Result<()> {
    let prompter = DialoguerPrompter::new();
    let options = args.into_options(&prompter)?;

    let runner = SystemRunner::new();
    let renderer = MiniJinjaRenderer::new();
    let scaffolder = Scaffolder::new(&runner, &renderer, options);

    let report = scaffolder.run()?;

    println!(
        "Project ready in {:.2}s: '{}'",
        report.elapsed.as_secs_f64(),
        report.api_path.display()
    );
    if let Some(test_project) = &report.test_project {
        println!("Test project: '{test_project}'");
    }
    println!("Swagger: {}", report.swagger_url);

    scaffolder.serve(&report)
}
