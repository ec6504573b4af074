use super::{Backend, absolute, engine_binary, parent_dir, run_stage};
use crate::engine::config::DesmondConfig;
use crate::engine::error::EngineError;
use crate::engine::invocation::{BackendInvocation, ProcessRunner};
use crate::engine::progress::{Progress, ProgressReporter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const BINARY: &str = "desmond";
pub const JOB_NAME: &str = "system";
/// Scratch trajectory directory DESMOND refuses to overwrite.
pub const TRAJECTORY_DIR: &str = "trj";

/// Where DESMOND leaves the energy-group report for a job started next to
/// `system`.
pub fn report_path(system_dir: &Path) -> PathBuf {
    system_dir.join(format!("{}.enegrp.dat", JOB_NAME))
}

/// The single DESMOND run: `desmond -WAIT -P 1 -in <cms> -JOBNAME system -c <cfg>`.
pub fn build_invocation(
    binary: &Path,
    system: &Path,
    run_config: &Path,
    system_dir: &Path,
) -> BackendInvocation {
    BackendInvocation::new("run", binary, system_dir, report_path(system_dir))
        .arg("-WAIT")
        .arg("-P")
        .arg("1")
        .flag_path("-in", system)
        .arg("-JOBNAME")
        .arg(JOB_NAME)
        .flag_path("-c", run_config)
}

/// Evaluates `system` with DESMOND and returns the report artifact path.
///
/// An existing `system.enegrp.dat` beside the input is reused without
/// starting the engine.
#[instrument(skip_all, name = "desmond_invoker", fields(system = %system.display()))]
pub fn run(
    system: &Path,
    config: &DesmondConfig,
    runner: &dyn ProcessRunner,
    reporter: &ProgressReporter,
) -> Result<PathBuf, EngineError> {
    let system = absolute(system)?;
    let run_config = absolute(&config.run_config)?;
    let system_dir = parent_dir(&system)?;
    let report = report_path(&system_dir);

    if report.exists() {
        info!("{} already exists, not running DESMOND", report.display());
        reporter.report(Progress::CacheHit {
            path: report.clone(),
        });
        return Ok(report);
    }

    let trajectory = system_dir.join(TRAJECTORY_DIR);
    if trajectory.exists() {
        info!("Removing stale trajectory directory {:?}", trajectory);
        fs::remove_dir_all(&trajectory).map_err(|e| EngineError::io(&trajectory, e))?;
    }

    let binary = engine_binary(&config.bin_dir, BINARY)?;
    let invocation = build_invocation(&binary, &system, &run_config, &system_dir);
    run_stage(runner, reporter, Backend::Desmond, &system, &invocation)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::ScriptedRunner;
    use std::env;

    struct Fixture {
        dir: tempfile::TempDir,
        system: PathBuf,
        config: DesmondConfig,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let system = dir.path().join("water.cms");
        let cfg = dir.path().join("onepoint.cfg");
        fs::write(&system, "cms").unwrap();
        fs::write(&cfg, "cfg").unwrap();
        let config = DesmondConfig {
            bin_dir: PathBuf::from("/opt/schrodinger"),
            run_config: cfg,
        };
        Fixture {
            dir,
            system,
            config,
        }
    }

    #[test]
    fn invocation_uses_fixed_flag_order() {
        let inv = build_invocation(
            Path::new("/opt/d/desmond"),
            Path::new("/w/a.cms"),
            Path::new("/w/one.cfg"),
            Path::new("/w"),
        );
        assert_eq!(
            inv.args_lossy(),
            vec![
                "-WAIT", "-P", "1", "-in", "/w/a.cms", "-JOBNAME", "system", "-c", "/w/one.cfg"
            ]
        );
        assert_eq!(inv.working_dir, PathBuf::from("/w"));
        assert_eq!(inv.artifact, PathBuf::from("/w/system.enegrp.dat"));
    }

    #[test]
    fn successful_run_returns_report_beside_input() {
        let fx = fixture();
        let runner = ScriptedRunner::writing_artifacts("Total Energy -1.0\n");
        let path = run(&fx.system, &fx.config, &runner, &ProgressReporter::new()).unwrap();

        assert_eq!(path, fx.dir.path().join("system.enegrp.dat"));
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from("/opt/schrodinger/desmond"));
        assert_eq!(calls[0].working_dir, fx.dir.path());
    }

    #[test]
    fn existing_report_skips_the_engine() {
        let fx = fixture();
        fs::write(fx.dir.path().join("system.enegrp.dat"), "Total 1.0\n").unwrap();
        let runner = ScriptedRunner::exiting_with(0);

        let path = run(&fx.system, &fx.config, &runner, &ProgressReporter::new()).unwrap();
        assert!(path.exists());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn stale_trajectory_directory_is_removed_before_running() {
        let fx = fixture();
        let trj = fx.dir.path().join("trj");
        fs::create_dir(&trj).unwrap();
        fs::write(trj.join("frame0"), "x").unwrap();

        let runner = ScriptedRunner::writing_artifacts("Total 0.0\n");
        run(&fx.system, &fx.config, &runner, &ProgressReporter::new()).unwrap();
        assert!(!trj.exists());
    }

    #[test]
    fn nonzero_exit_is_an_invocation_error_naming_the_input() {
        let fx = fixture();
        let runner = ScriptedRunner::exiting_with(2);
        let cwd_before = env::current_dir().unwrap();

        let err = run(&fx.system, &fx.config, &runner, &ProgressReporter::new()).unwrap_err();

        assert_eq!(env::current_dir().unwrap(), cwd_before);
        match err {
            EngineError::Invocation {
                backend,
                input,
                status,
                ..
            } => {
                assert_eq!(backend, Backend::Desmond);
                assert_eq!(input, fx.system);
                assert_eq!(status, Some(2));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!fx.dir.path().join("system.enegrp.dat").exists());
    }
}
