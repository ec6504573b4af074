use crate::cli::EvaluateArgs;
use crate::config;
use crate::display::render_report;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use energize::core::units::Unit;
use energize::engine::invocation::SystemRunner;
use energize::engine::progress::ProgressReporter;
use energize::workflows::evaluate;
use tracing::{debug, info};

pub fn run(args: EvaluateArgs, cli_units: Option<Unit>) -> Result<()> {
    info!("Resolving evaluation settings.");
    let settings = config::resolve(&args, cli_units)?;
    debug!("Resolved settings: {:?}", settings);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let evaluation = evaluate::run_request(
        settings.request,
        &settings.engine,
        &SystemRunner::new(),
        &reporter,
    )?;

    let text = render_report(
        &evaluation.report_path,
        &evaluation.report,
        settings.display_units,
    )?;
    print!("{}", text);
    Ok(())
}
