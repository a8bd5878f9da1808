//! Session model — one respondent's progress and answers.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::design::{Design, ProfileLabel};
use crate::flow::{Demographics, Page, VehicleInfo};

/// One answered choice task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    /// 1-based task number.
    pub task: u32,
    pub choice: ProfileLabel,
}

/// One respondent's survey visit: their generated design, current page, and
/// everything they have answered so far.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque respondent token; also the respondent key in the response log.
    pub respondent_id: Uuid,
    pub page: Page,
    /// Generated once at session creation, immutable afterwards.
    pub design: Design,
    pub responses: Vec<Response>,
    pub demographics: Option<Demographics>,
    pub vehicle_info: Option<VehicleInfo>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    pub fn new(design: Design) -> Self {
        let now = Utc::now();
        Self {
            respondent_id: Uuid::new_v4(),
            page: Page::Intro,
            design,
            responses: Vec::new(),
            demographics: None,
            vehicle_info: None,
            created_at: now,
            last_seen: now,
        }
    }

    /// Refresh the idle clock.
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    /// Time since the session was last touched.
    pub fn idle_for(&self) -> std::time::Duration {
        (Utc::now() - self.last_seen).to_std().unwrap_or_default()
    }

    pub fn record_response(&mut self, task: u32, choice: ProfileLabel) {
        self.responses.push(Response { task, choice });
    }

    pub fn set_demographics(&mut self, demographics: Demographics) {
        self.demographics = Some(demographics);
    }

    pub fn set_vehicle_info(&mut self, info: VehicleInfo) {
        self.vehicle_info = Some(info);
    }
}
