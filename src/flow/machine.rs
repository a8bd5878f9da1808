//! Pure page transition function.
//!
//! `transition` maps `(page, event)` to either the next page plus a list of
//! effects, or a rejection with the message to show. It never touches the
//! session itself; the engine applies the effects. That keeps every
//! transition, guard, and branch testable without a store or a server.

use super::event::{Demographics, Event, OwnershipAnswer, VehicleInfo};
use super::page::Page;
use crate::design::ProfileLabel;

pub const MSG_CHOOSE_OPTION: &str = "Please select an option to proceed.";
pub const MSG_DEMOGRAPHICS_INCOMPLETE: &str =
    "Please fill in all the fields and exactly 3 add ons to continue.";
pub const MSG_OWNERSHIP_REQUIRED: &str = "Please select whether you own a vehicle to proceed.";
pub const MSG_VEHICLE_INCOMPLETE: &str = "Please complete all vehicle details before submitting.";
/// Shown when an event does not belong to the current page, e.g. a stale
/// or replayed post from the frontend.
pub const MSG_WRONG_PAGE: &str = "That action is not available on the current page.";

/// What the transition function needs to know about the session's design.
#[derive(Debug, Clone, Copy)]
pub struct FlowContext {
    pub task_count: u32,
    pub profiles_per_task: usize,
}

/// Session mutations the engine applies when a transition advances.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RecordResponse { task: u32, choice: ProfileLabel },
    SetDemographics(Demographics),
    SetVehicleInfo(VehicleInfo),
    /// Hand the accumulated answers to the submission adapter.
    SubmitResponses,
}

/// Outcome of applying one event to a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Advance { next: Page, effects: Vec<Effect> },
    /// Guard failed: the page stays as it is and `message` is shown.
    /// No previously entered answer is cleared.
    Rejected { message: &'static str },
}

/// Apply one event to the current page.
pub fn transition(page: &Page, event: Event, ctx: &FlowContext) -> Transition {
    match (page, event) {
        (Page::Intro, Event::Consent) => advance(Page::Instructions, vec![]),

        (Page::Instructions, Event::StartSurvey) => {
            advance(Page::Survey { task_index: 0 }, vec![])
        }

        (Page::Survey { task_index }, Event::ChooseProfile { label }) => {
            let Some(choice) = label.filter(|l| l.index() < ctx.profiles_per_task) else {
                return reject(MSG_CHOOSE_OPTION);
            };
            let task = task_index + 1;
            let next = if task < ctx.task_count {
                Page::Survey { task_index: task }
            } else {
                Page::Demographics
            };
            advance(next, vec![Effect::RecordResponse { task, choice }])
        }

        (Page::Demographics, Event::SubmitDemographics { form }) => match form.validate() {
            Some(demographics) => advance(
                Page::VehicleOwnership,
                vec![Effect::SetDemographics(demographics)],
            ),
            None => reject(MSG_DEMOGRAPHICS_INCOMPLETE),
        },

        (Page::VehicleOwnership, Event::SubmitOwnership { answer }) => match answer {
            Some(OwnershipAnswer::Yes) => advance(Page::VehicleType, vec![]),
            Some(OwnershipAnswer::No) => advance(
                Page::ThankYou,
                vec![
                    Effect::SetVehicleInfo(VehicleInfo::NoVehicle),
                    Effect::SubmitResponses,
                ],
            ),
            None => reject(MSG_OWNERSHIP_REQUIRED),
        },

        (Page::VehicleType, Event::SubmitVehicle { form }) => match form.validate() {
            Some(info) => advance(
                Page::ThankYou,
                vec![Effect::SetVehicleInfo(info), Effect::SubmitResponses],
            ),
            None => reject(MSG_VEHICLE_INCOMPLETE),
        },

        _ => reject(MSG_WRONG_PAGE),
    }
}

fn advance(next: Page, effects: Vec<Effect>) -> Transition {
    Transition::Advance { next, effects }
}

fn reject(message: &'static str) -> Transition {
    Transition::Rejected { message }
}
