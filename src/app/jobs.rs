use std::{collections::HashMap, future::Future, io};

use std::sync::mpsc;

use tokio::task::JoinHandle;

use crate::app;

const MAX_TASKS_PER_TICK: u16 = 10;

pub type JobId = usize;

type StateAction = dyn (FnOnce(&mut app::State) -> io::Result<()>) + Send + Sync;

pub enum MainThreadAction {
    OnState(Box<StateAction>),

    JobComplete(JobId),
    Err(io::Error),
}

#[derive(Clone)]
pub struct JobContext {
    to_main: mpsc::Sender<MainThreadAction>,
}

impl JobContext {
    pub fn run<F>(&self, on_state: F) -> io::Result<()>
    where
        F: (FnOnce(&mut app::State) -> io::Result<()>) + Send + Sync + 'static,
    {
        self.send(MainThreadAction::OnState(Box::new(on_state)))
    }

    pub fn send(&self, action: MainThreadAction) -> io::Result<()> {
        match self.to_main.send(action) {
            Ok(_) => Ok(()),
            Err(e) => Err(io::Error::new(io::ErrorKind::BrokenPipe, e.to_string())),
        }
    }
}

struct JobRecord {
    handle: JoinHandle<()>,
}

pub struct Jobs {
    next_id: JobId,
    to_main: mpsc::Sender<MainThreadAction>,
    from_job: mpsc::Receiver<MainThreadAction>,
    jobs: HashMap<JobId, JobRecord>,
}

impl Default for Jobs {
    fn default() -> Self {
        let (tx, rx) = mpsc::channel::<MainThreadAction>();
        Self {
            next_id: 0,
            to_main: tx,
            from_job: rx,
            jobs: HashMap::new(),
        }
    }
}

impl Jobs {
    /// Apply pending results from jobs to the state. Returns true if
    /// anything was processed (and so a redraw is probably in order)
    pub fn process(state: &mut app::State) -> io::Result<bool> {
        let mut processed = false;
        for _ in 0..MAX_TASKS_PER_TICK {
            let action = match state.jobs.process_once()? {
                None => return Ok(processed),
                Some(action) => action,
            };
            processed = true;

            match action {
                MainThreadAction::OnState(closure) => closure(state)?,

                MainThreadAction::JobComplete(id) => state.jobs.clear(id),
                MainThreadAction::Err(e) => state.echo_error(e.to_string()),
            };
        }

        Ok(processed)
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn cancel_all(&mut self) {
        for record in self.jobs.values_mut() {
            record.handle.abort();
        }
        self.jobs.clear();
    }

    fn process_once(&mut self) -> io::Result<Option<MainThreadAction>> {
        match self.from_job.try_recv() {
            Ok(action) => Ok(Some(action)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(e) => Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }

    /// Spawn a job onto the current tokio runtime. This must be called from
    /// within a runtime context.
    pub fn spawn<T, F>(&mut self, task: T) -> JobId
    where
        T: Send + 'static + FnOnce(JobContext) -> F,
        F: Future<Output = io::Result<()>> + Send + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        let to_main = self.to_main.clone();
        let context = JobContext {
            to_main: to_main.clone(),
        };

        let handle = tokio::spawn(async move {
            if let Err(e) = task(context).await {
                let _ = to_main.send(MainThreadAction::Err(e));
            }
            let _ = to_main.send(MainThreadAction::JobComplete(id));
        });

        self.jobs.insert(id, JobRecord { handle });

        id
    }

    /// Used by process when a Job completes
    fn clear(&mut self, id: JobId) {
        self.jobs.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::tests::{process_until_idle, test_state};

    #[tokio::test]
    async fn runs_state_actions_on_process() {
        let mut state = test_state(vec![], &[]);
        state.jobs.spawn(|ctx| async move {
            ctx.run(|state| {
                state.echo("from the job".to_string());
                Ok(())
            })
        });
        assert!(!state.jobs.is_empty());

        process_until_idle(&mut state).await;

        assert_eq!(state.echo_line(), Some("from the job"));
    }

    #[tokio::test]
    async fn errors_are_echoed() {
        let mut state = test_state(vec![], &[]);
        state
            .jobs
            .spawn(|_| async move { Err::<(), _>(io::Error::new(io::ErrorKind::Other, "kaboom")) });

        process_until_idle(&mut state).await;

        assert_eq!(state.echo_line(), Some("ERR: kaboom"));
    }

    #[tokio::test]
    async fn cancel_all_forgets_jobs() {
        let mut state = test_state(vec![], &[]);
        state.jobs.spawn(|_| async move {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Ok::<(), io::Error>(())
        });

        state.jobs.cancel_all();
        assert!(state.jobs.is_empty());
    }
}
