//! Submission controller: binds the calculate action to one remote call and
//! renders every outcome.

use std::sync::Arc;

use shared::domain::CalculationResult;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, info_span, Instrument};

use crate::{
    config::Settings,
    error::ClientError,
    loading::{LoadingMessages, RandomSelector},
    render::{self, Fragments},
    transport::{CalculatorService, HttpCalculatorService},
    types::{CompletionPolicy, FailureInfo, SubmissionId, UiState},
    view::{FormSource, ResultView, SubmitEvent},
};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    StateChanged {
        submission: SubmissionId,
        state: UiState,
    },
    /// A superseded submission completed and was not rendered.
    CompletionDiscarded {
        submission: SubmissionId,
        latest: SubmissionId,
    },
}

struct ControllerInner {
    state: UiState,
    next_id: u64,
    latest: Option<SubmissionId>,
    /// Submission whose completion produced the current terminal state.
    settled_by: Option<SubmissionId>,
    loading: LoadingMessages,
    view: Box<dyn ResultView>,
    rendered: Fragments,
}

#[derive(Clone)]
pub struct SubmissionController {
    service: Arc<dyn CalculatorService>,
    policy: CompletionPolicy,
    inner: Arc<Mutex<ControllerInner>>,
    events: broadcast::Sender<ControllerEvent>,
}

impl SubmissionController {
    pub fn new(
        service: Arc<dyn CalculatorService>,
        view: impl ResultView + 'static,
        loading: LoadingMessages,
        policy: CompletionPolicy,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            service,
            policy,
            inner: Arc::new(Mutex::new(ControllerInner {
                state: UiState::Idle,
                next_id: 1,
                latest: None,
                settled_by: None,
                loading,
                view: Box::new(view),
                rendered: Fragments::default(),
            })),
            events,
        }
    }

    pub fn from_settings(
        settings: &Settings,
        view: impl ResultView + 'static,
    ) -> Result<Self, ClientError> {
        let service = HttpCalculatorService::with_timeout(
            settings.server_url.as_str(),
            settings.request_timeout(),
        )?;
        let loading = LoadingMessages::new(
            settings.loading_messages.clone(),
            RandomSelector::from_entropy(),
        )?;
        Ok(Self::new(
            Arc::new(service),
            view,
            loading,
            settings.completion_policy,
        ))
    }

    pub fn policy(&self) -> CompletionPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    pub async fn state(&self) -> UiState {
        self.inner.lock().await.state.clone()
    }

    pub async fn rendered(&self) -> Fragments {
        self.inner.lock().await.rendered.clone()
    }

    pub async fn latest_submission(&self) -> Option<SubmissionId> {
        self.inner.lock().await.latest
    }

    /// Handles a submit action: enters `Loading` and schedules the request.
    ///
    /// Returns as soon as the request task is spawned; the outcome arrives
    /// through [`Self::on_success`] or [`Self::on_failure`].
    pub async fn on_submit<E, F>(&self, event: &mut E, form: &F) -> SubmissionId
    where
        E: SubmitEvent + ?Sized,
        F: FormSource + ?Sized,
    {
        event.prevent_default();
        let request = form.read_request();

        let submission = {
            let mut inner = self.inner.lock().await;
            let submission = SubmissionId(inner.next_id);
            inner.next_id += 1;
            inner.latest = Some(submission);
            inner.state = UiState::Loading;

            let fragments = render::loading(inner.loading.next_message());
            inner.view.show(&fragments);
            inner.rendered = fragments;
            self.publish(ControllerEvent::StateChanged {
                submission,
                state: UiState::Loading,
            });
            submission
        };

        info!(%submission, fcn = %request.fcn, "submitting calculation");
        let controller = self.clone();
        tokio::spawn(
            async move {
                match controller.service.calculate(&request).await {
                    Ok(result) => controller.on_success(submission, result).await,
                    Err(failure) => controller.on_failure(submission, failure).await,
                }
            }
            .instrument(info_span!("submission", id = submission.0)),
        );

        submission
    }

    /// Returns whether the outcome was rendered.
    pub async fn on_success(&self, submission: SubmissionId, result: CalculationResult) -> bool {
        let fragments = render::success(&result);
        self.settle(submission, UiState::Success(result), fragments)
            .await
    }

    /// Returns whether the outcome was rendered.
    pub async fn on_failure(&self, submission: SubmissionId, failure: FailureInfo) -> bool {
        let fragments = render::failure(&failure);
        self.settle(submission, UiState::Error(failure), fragments)
            .await
    }

    async fn settle(&self, submission: SubmissionId, state: UiState, fragments: Fragments) -> bool {
        let mut inner = self.inner.lock().await;

        if self.policy == CompletionPolicy::LatestOnly {
            if let Some(latest) = inner.latest.filter(|latest| *latest != submission) {
                debug!(%submission, %latest, "discarding superseded completion");
                self.publish(ControllerEvent::CompletionDiscarded { submission, latest });
                return false;
            }
        }

        debug!(%submission, outcome = state.name(), "rendering completion");
        inner.view.show(&fragments);
        inner.rendered = fragments;
        inner.state = state.clone();
        inner.settled_by = Some(submission);
        self.publish(ControllerEvent::StateChanged { submission, state });
        true
    }

    /// Waits for `submission` to settle. `None` when its completion was
    /// discarded or the controller is gone.
    ///
    /// If `events` lagged, the current state is consulted instead of waiting
    /// for an event that may have been dropped.
    pub async fn wait_until_settled(
        &self,
        events: &mut broadcast::Receiver<ControllerEvent>,
        submission: SubmissionId,
    ) -> Option<UiState> {
        loop {
            match events.recv().await {
                Ok(ControllerEvent::StateChanged { submission: id, state })
                    if id == submission && state.is_terminal() =>
                {
                    return Some(state);
                }
                Ok(ControllerEvent::CompletionDiscarded { submission: id, .. })
                    if id == submission =>
                {
                    return None;
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(%submission, skipped, "controller events lagged");
                    let inner = self.inner.lock().await;
                    if inner.settled_by == Some(submission) && inner.state.is_terminal() {
                        return Some(inner.state.clone());
                    }
                    if self.policy == CompletionPolicy::LatestOnly
                        && inner.latest != Some(submission)
                    {
                        return None;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    fn publish(&self, event: ControllerEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
