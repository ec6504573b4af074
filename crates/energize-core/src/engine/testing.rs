use crate::engine::invocation::{BackendInvocation, ExitOutcome, ProcessRunner};
use std::cell::RefCell;
use std::io;

type Behaviour = Box<dyn Fn(&BackendInvocation) -> ExitOutcome>;

/// Records every invocation and answers with a scripted outcome instead of
/// starting a process.
pub(crate) struct ScriptedRunner {
    calls: RefCell<Vec<BackendInvocation>>,
    behaviour: Behaviour,
}

impl ScriptedRunner {
    pub(crate) fn new(behaviour: impl Fn(&BackendInvocation) -> ExitOutcome + 'static) -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            behaviour: Box::new(behaviour),
        }
    }

    /// Every stage exits with `code` without touching the filesystem.
    pub(crate) fn exiting_with(code: i32) -> Self {
        Self::new(move |_| ExitOutcome::from_code(code))
    }

    /// Writes `content` to each stage's artifact, then succeeds.
    pub(crate) fn writing_artifacts(content: &'static str) -> Self {
        Self::new(move |inv| {
            std::fs::write(&inv.artifact, content).unwrap();
            ExitOutcome::from_code(0)
        })
    }

    pub(crate) fn calls(&self) -> Vec<BackendInvocation> {
        self.calls.borrow().clone()
    }

    pub(crate) fn stages(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|c| c.stage).collect()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, invocation: &BackendInvocation) -> io::Result<ExitOutcome> {
        self.calls.borrow_mut().push(invocation.clone());
        Ok((self.behaviour)(invocation))
    }
}
