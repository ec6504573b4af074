use crate::engine::backends::Backend;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Progress {
    StageStart {
        backend: Backend,
        stage: &'static str,
    },
    StageFinish {
        success: bool,
    },

    /// A report artifact from an earlier run was found and reused.
    CacheHit {
        path: PathBuf,
    },
    ReportParsed {
        terms: usize,
    },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::ReportParsed { terms: 0 });
    }

    #[test]
    fn reporter_forwards_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::StageStart { backend, stage } => format!("start {backend} {stage}"),
                Progress::StageFinish { success } => format!("finish {success}"),
                Progress::CacheHit { .. } => "cache".to_string(),
                Progress::ReportParsed { terms } => format!("parsed {terms}"),
            };
            seen.lock().unwrap().push(label);
        }));

        reporter.report(Progress::StageStart {
            backend: Backend::Desmond,
            stage: "run",
        });
        reporter.report(Progress::StageFinish { success: true });
        reporter.report(Progress::ReportParsed { terms: 1 });
        drop(reporter);

        assert_eq!(
            seen.into_inner().unwrap(),
            vec!["start DESMOND run", "finish true", "parsed 1"]
        );
    }
}
