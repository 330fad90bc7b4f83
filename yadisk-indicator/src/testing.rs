//! In-memory doubles for the process and rendering seams.

use std::collections::{HashMap, VecDeque};
use std::io::ErrorKind;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use yadisk_core::{IndicatorViewModel, ProcessResult};

use crate::error::{spawn_err, IndicatorError};
use crate::invoker::ProcessInvoker;
use crate::render::Renderer;

/// One scripted answer to one invocation.
pub(crate) enum Reply {
    Stderr(String),
    SpawnFails,
    /// Panics inside the invocation.
    Panics,
    /// Completes with the sent stderr once the test releases it.
    Gated(oneshot::Receiver<String>),
}

/// Answers per subcommand (`argv[1]`). Queued replies are used once each;
/// when a queue is empty, `status` answers with the default status text and
/// everything else answers with empty output.
pub(crate) struct ScriptedInvoker {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    default_status: Mutex<Option<String>>,
}

impl ScriptedInvoker {
    pub(crate) fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            queued: Mutex::new(HashMap::new()),
            default_status: Mutex::new(None),
        }
    }

    /// `None` makes unscripted `status` calls fail to spawn.
    pub(crate) fn with_status(self, stderr: Option<&str>) -> Self {
        *self.default_status.lock().expect("lock") = stderr.map(str::to_string);
        self
    }

    pub(crate) fn push(&self, verb: &str, reply: Reply) {
        self.queued
            .lock()
            .expect("lock")
            .entry(verb.to_string())
            .or_default()
            .push_back(reply);
    }

    /// Queue a gated `verb` reply and return the sender that releases it.
    pub(crate) fn gate(&self, verb: &str) -> oneshot::Sender<String> {
        let (tx, rx) = oneshot::channel();
        self.push(verb, Reply::Gated(rx));
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().expect("lock").clone()
    }

    pub(crate) fn verbs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|argv| argv.get(1).cloned().unwrap_or_default())
            .collect()
    }

    fn next_reply(&self, verb: &str) -> Reply {
        let queued = self
            .queued
            .lock()
            .expect("lock")
            .get_mut(verb)
            .and_then(VecDeque::pop_front);
        match queued {
            Some(reply) => reply,
            None if verb == "status" => match self.default_status.lock().expect("lock").clone() {
                Some(text) => Reply::Stderr(text),
                None => Reply::SpawnFails,
            },
            None => Reply::Stderr(String::new()),
        }
    }
}

impl ProcessInvoker for ScriptedInvoker {
    async fn run(&self, argv: &[String]) -> Result<ProcessResult, IndicatorError> {
        self.calls.lock().expect("lock").push(argv.to_vec());
        let program = argv.first().cloned().unwrap_or_default();
        let verb = argv.get(1).cloned().unwrap_or_default();

        let stderr = match self.next_reply(&verb) {
            Reply::Stderr(text) => text,
            Reply::SpawnFails => {
                return Err(spawn_err(program, std::io::Error::from(ErrorKind::NotFound)));
            }
            Reply::Panics => panic!("scripted `{verb}` panic"),
            Reply::Gated(rx) => rx.await.expect("gate sender dropped"),
        };

        Ok(ProcessResult {
            stdout: String::new(),
            stderr,
            exit_code: Some(0),
        })
    }
}

/// Records every delivered view.
#[derive(Default)]
pub(crate) struct RecordingRenderer {
    views: Mutex<Vec<IndicatorViewModel>>,
    released: Mutex<bool>,
}

impl RecordingRenderer {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn views(&self) -> Vec<IndicatorViewModel> {
        self.views.lock().expect("lock").clone()
    }

    pub(crate) fn last(&self) -> Option<IndicatorViewModel> {
        self.views.lock().expect("lock").last().cloned()
    }

    pub(crate) fn released(&self) -> bool {
        *self.released.lock().expect("lock")
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, view: &IndicatorViewModel) {
        self.views.lock().expect("lock").push(view.clone());
    }

    fn release(&self) {
        *self.released.lock().expect("lock") = true;
    }
}
