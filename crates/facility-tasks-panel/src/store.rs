/*
[INPUT]:  Mutations dispatched by page, wizard and task actions
[OUTPUT]: Shared panel state snapshots + mutation event stream
[POS]:    State layer - the single writable store for the panel
[UPDATE]: When new state fields or mutation kinds are needed
*/

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{broadcast, watch};

use crate::routes::PageName;
use crate::transform::Task;

const MUTATION_CHANNEL_CAPACITY: usize = 256;

/// Import/export wizard UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    /// A trigger is in flight
    pub busy: bool,
    pub shown: bool,
    pub error: Option<String>,
}

/// State owned by the current page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub task_list: Vec<Task>,
    pub wizard_state: WizardState,
}

/// Full store snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub page_name: Option<PageName>,
    pub page_params: BTreeMap<String, String>,
    /// Bumped on every page transition
    pub page_generation: u64,
    pub page_state: PageState,
    /// Sequence number of the last task-list write that was applied
    pub applied_request: u64,
}

/// Monotonic sequence number attached to task-list writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Whether a write with this sequence is newer than everything applied so far
    pub fn is_newer_than_applied(self, state: &PanelState) -> bool {
        self.0 > state.applied_request
    }
}

/// Identity of the page that was active when an async operation was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageToken {
    generation: u64,
}

impl PageToken {
    pub fn is_current(&self, state: &PanelState) -> bool {
        state.page_generation == self.generation
    }
}

/// State mutations. Every write to the store goes through one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetPage {
        page: PageName,
        params: BTreeMap<String, String>,
    },
    SetContentPageTasks {
        tasks: Vec<Task>,
        request: RequestSeq,
    },
    SetContentPageWizardBusy(bool),
    SetContentPageWizardError(Option<String>),
    SetContentPageWizardState(WizardState),
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SetPage { .. } => "SET_PAGE",
            Mutation::SetContentPageTasks { .. } => "SET_CONTENT_PAGE_TASKS",
            Mutation::SetContentPageWizardBusy(_) => "SET_CONTENT_PAGE_WIZARD_BUSY",
            Mutation::SetContentPageWizardError(_) => "SET_CONTENT_PAGE_WIZARD_ERROR",
            Mutation::SetContentPageWizardState(_) => "SET_CONTENT_PAGE_WIZARD_STATE",
        }
    }

    fn apply(&self, state: &mut PanelState) {
        match self {
            Mutation::SetPage { page, params } => {
                state.page_name = Some(*page);
                state.page_params = params.clone();
                state.page_generation += 1;
                state.page_state = PageState::default();
            }
            Mutation::SetContentPageTasks { tasks, request } => {
                state.page_state.task_list = tasks.clone();
                state.applied_request = state.applied_request.max(request.value());
            }
            Mutation::SetContentPageWizardBusy(busy) => {
                state.page_state.wizard_state.busy = *busy;
            }
            Mutation::SetContentPageWizardError(error) => {
                state.page_state.wizard_state.error = error.clone();
            }
            Mutation::SetContentPageWizardState(wizard) => {
                state.page_state.wizard_state = wizard.clone();
            }
        }
    }
}

#[derive(Debug)]
struct StoreInner {
    state: watch::Sender<PanelState>,
    mutations: broadcast::Sender<Mutation>,
    request_seq: AtomicU64,
}

/// Explicit state container handed to every action.
///
/// Cloning is cheap and yields a handle to the same store. Mutations are
/// serialized by the underlying `watch` sender, so a guarded write checks and
/// applies against one consistent snapshot.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    pub fn new() -> Self {
        let (state, _) = watch::channel(PanelState::default());
        let (mutations, _) = broadcast::channel(MUTATION_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                state,
                mutations,
                request_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Clone of the current state
    pub fn snapshot(&self) -> PanelState {
        self.inner.state.borrow().clone()
    }

    /// Run `f` against the current state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&PanelState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn task_list(&self) -> Vec<Task> {
        self.read(|state| state.page_state.task_list.clone())
    }

    pub fn wizard_state(&self) -> WizardState {
        self.read(|state| state.page_state.wizard_state.clone())
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<PanelState> {
        self.inner.state.subscribe()
    }

    /// Stream of applied mutations, one event per dispatch
    pub fn subscribe_mutations(&self) -> broadcast::Receiver<Mutation> {
        self.inner.mutations.subscribe()
    }

    /// Token identifying the page that is active right now
    pub fn page_token(&self) -> PageToken {
        PageToken {
            generation: self.read(|state| state.page_generation),
        }
    }

    /// Reserve the next request sequence number
    pub fn issue_request(&self) -> RequestSeq {
        RequestSeq(self.inner.request_seq.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Apply `mutation` and publish it.
    ///
    /// The event is sent while the state lock is held, so the mutation stream
    /// sees writes in the order they were applied.
    pub fn dispatch(&self, mutation: Mutation) {
        self.inner.state.send_modify(|state| {
            mutation.apply(state);
            self.publish(mutation);
        });
    }

    /// Apply `mutation` only if `guard` accepts the current state.
    ///
    /// The check, the write and the event happen under the same lock.
    pub fn dispatch_if<E>(
        &self,
        guard: impl FnOnce(&PanelState) -> Result<(), E>,
        mutation: Mutation,
    ) -> Result<(), E> {
        let mut verdict = Ok(());
        self.inner.state.send_if_modified(|state| match guard(state) {
            Ok(()) => {
                mutation.apply(state);
                self.publish(mutation);
                true
            }
            Err(reason) => {
                verdict = Err(reason);
                false
            }
        });
        verdict
    }

    fn publish(&self, mutation: Mutation) {
        tracing::trace!(mutation = mutation.name(), "store mutation");
        // no subscribers is fine
        let _ = self.inner.mutations.send(mutation);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
