//! Survey engine — ties the session store, the page flow, and the
//! submission adapter together.
//!
//! The engine owns every step a respondent can take: it creates sessions
//! with a freshly generated design, renders the current page as a view the
//! frontend can draw, and applies events through the transition function.
//! Submission failures are logged and never surface to the respondent.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::design::{DesignGenerator, Profile};
use crate::error::SessionError;
use crate::flow::{Effect, Event, FlowContext, Page, Transition, transition};
use crate::session::{Session, SessionStore};
use crate::submit::SubmissionAdapter;

/// What the frontend needs to render the current page.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Intro,
    Instructions,
    Survey {
        /// 1-based task number.
        task: u32,
        task_count: u32,
        /// Attribute names, row labels of the comparison table.
        attributes: Vec<String>,
        profiles: Vec<Profile>,
    },
    Demographics,
    VehicleOwnership,
    VehicleType,
    #[serde(rename = "thankyou")]
    ThankYou,
}

/// Result of applying one event to a session.
#[derive(Debug)]
pub enum EventOutcome {
    Advanced(PageView),
    /// Guard failed: page unchanged, `message` is shown to the respondent.
    Rejected { message: &'static str },
}

pub struct SurveyEngine {
    sessions: Arc<SessionStore>,
    generator: DesignGenerator,
    adapter: SubmissionAdapter,
    catalog: Arc<Catalog>,
}

impl SurveyEngine {
    pub fn new(
        sessions: Arc<SessionStore>,
        generator: DesignGenerator,
        adapter: SubmissionAdapter,
        catalog: Arc<Catalog>,
    ) -> Arc<Self> {
        Arc::new(Self {
            sessions,
            generator,
            adapter,
            catalog,
        })
    }

    /// Generate a design and open a session for a new respondent.
    pub async fn create_session(&self) -> (Uuid, PageView) {
        let session = Session::new(self.generator.generate());
        let view = self.view_of(&session);
        let id = self.sessions.insert(session).await;
        (id, view)
    }

    /// Current page of a session; refreshes its idle clock.
    pub async fn current_view(&self, id: Uuid) -> Result<PageView, SessionError> {
        let handle = self
            .sessions
            .get(id)
            .await
            .ok_or(SessionError::NotFound { id })?;
        let mut session = handle.lock().await;
        session.touch();
        Ok(self.view_of(&session))
    }

    /// Apply one respondent event. A rejected event leaves the session
    /// untouched apart from its idle clock.
    pub async fn handle_event(
        &self,
        id: Uuid,
        event: Event,
    ) -> Result<EventOutcome, SessionError> {
        let handle = self
            .sessions
            .get(id)
            .await
            .ok_or(SessionError::NotFound { id })?;
        let mut session = handle.lock().await;
        session.touch();

        let ctx = FlowContext {
            task_count: session.design.task_count(),
            profiles_per_task: session.design.profiles_per_task(),
        };

        match transition(&session.page, event, &ctx) {
            Transition::Advance { next, effects } => {
                debug_assert!(session.page.can_transition_to(next));

                let mut submit = false;
                for effect in effects {
                    match effect {
                        Effect::RecordResponse { task, choice } => {
                            session.record_response(task, choice)
                        }
                        Effect::SetDemographics(demographics) => {
                            session.set_demographics(demographics)
                        }
                        Effect::SetVehicleInfo(info) => session.set_vehicle_info(info),
                        Effect::SubmitResponses => submit = true,
                    }
                }

                // Submit before the page flips, so an evicting sweep can
                // never see a thankyou page with the write still pending.
                if submit {
                    if let Err(e) = self.adapter.submit(&session).await {
                        error!(
                            respondent_id = %session.respondent_id,
                            "Submission failed: {e}"
                        );
                    }
                }

                session.page = next;
                debug!(respondent_id = %session.respondent_id, page = %next, "Page advanced");
                Ok(EventOutcome::Advanced(self.view_of(&session)))
            }
            Transition::Rejected { message } => Ok(EventOutcome::Rejected { message }),
        }
    }

    fn view_of(&self, session: &Session) -> PageView {
        match session.page {
            Page::Intro => PageView::Intro,
            Page::Instructions => PageView::Instructions,
            Page::Survey { task_index } => {
                let task = task_index + 1;
                PageView::Survey {
                    task,
                    task_count: session.design.task_count(),
                    attributes: self
                        .catalog
                        .attribute_names()
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    profiles: session.design.task(task).to_vec(),
                }
            }
            Page::Demographics => PageView::Demographics,
            Page::VehicleOwnership => PageView::VehicleOwnership,
            Page::VehicleType => PageView::VehicleType,
            Page::ThankYou => PageView::ThankYou,
        }
    }
}
