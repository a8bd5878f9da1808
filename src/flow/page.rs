//! Survey pages — the states a respondent moves through.

use serde::{Deserialize, Serialize};

/// The pages of the survey, in visit order.
///
/// Progression is forward-only: intro → instructions → one survey page per
/// task → demographics → vehicle_ownership → (vehicle_type) → thankyou.
/// The current task rides inside `Survey` instead of a separate counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Intro,
    Instructions,
    Survey {
        /// 0-based task position; the visible task number is `task_index + 1`.
        task_index: u32,
    },
    Demographics,
    VehicleOwnership,
    VehicleType,
    #[serde(rename = "thankyou")]
    ThankYou,
}

impl Page {
    /// Check if a transition from `self` to `target` is valid.
    ///
    /// `Survey → Demographics` is allowed from any task here; the transition
    /// function is what enforces that only the last task leaves the survey.
    pub fn can_transition_to(&self, target: Page) -> bool {
        use Page::*;
        match (self, target) {
            (Intro, Instructions) => true,
            (Instructions, Survey { task_index: 0 }) => true,
            (Survey { task_index: i }, Survey { task_index: j }) => j == i + 1,
            (Survey { .. }, Demographics) => true,
            (Demographics, VehicleOwnership) => true,
            (VehicleOwnership, VehicleType) => true,
            (VehicleOwnership, ThankYou) => true,
            (VehicleType, ThankYou) => true,
            _ => false,
        }
    }

    /// Whether this page is terminal (the survey is done).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::ThankYou)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::Intro
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Intro => "intro",
            Self::Instructions => "instructions",
            Self::Survey { .. } => "survey",
            Self::Demographics => "demographics",
            Self::VehicleOwnership => "vehicle_ownership",
            Self::VehicleType => "vehicle_type",
            Self::ThankYou => "thankyou",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use Page::*;
        let transitions = [
            (Intro, Instructions),
            (Instructions, Survey { task_index: 0 }),
            (Survey { task_index: 0 }, Survey { task_index: 1 }),
            (Survey { task_index: 6 }, Survey { task_index: 7 }),
            (Survey { task_index: 7 }, Demographics),
            (Demographics, VehicleOwnership),
            (VehicleOwnership, VehicleType),
            (VehicleOwnership, ThankYou),
            (VehicleType, ThankYou),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use Page::*;
        // Skip pages
        assert!(!Intro.can_transition_to(Survey { task_index: 0 }));
        assert!(!Instructions.can_transition_to(Demographics));
        // Skip tasks
        assert!(!Survey { task_index: 0 }.can_transition_to(Survey { task_index: 2 }));
        // Instructions lands on the first task only
        assert!(!Instructions.can_transition_to(Survey { task_index: 1 }));
        // Go backward
        assert!(!Demographics.can_transition_to(Survey { task_index: 7 }));
        assert!(!Survey { task_index: 1 }.can_transition_to(Survey { task_index: 0 }));
        // Terminal
        assert!(!ThankYou.can_transition_to(Intro));
        // Self-transition
        assert!(!Demographics.can_transition_to(Demographics));
    }

    #[test]
    fn is_terminal() {
        assert!(Page::ThankYou.is_terminal());
        assert!(!Page::Intro.is_terminal());
        assert!(!Page::Survey { task_index: 3 }.is_terminal());
    }

    #[test]
    fn display_matches_serde_tag() {
        let pages = [
            Page::Intro,
            Page::Instructions,
            Page::Survey { task_index: 2 },
            Page::Demographics,
            Page::VehicleOwnership,
            Page::VehicleType,
            Page::ThankYou,
        ];
        for page in pages {
            let json = serde_json::to_value(page).unwrap();
            assert_eq!(
                json["page"],
                format!("{page}"),
                "Display and serde tag should match for {page:?}"
            );
        }
    }

    #[test]
    fn survey_serializes_task_index() {
        let json = serde_json::to_value(Page::Survey { task_index: 4 }).unwrap();
        assert_eq!(json["task_index"], 4);

        let parsed: Page = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, Page::Survey { task_index: 4 });
    }

    #[test]
    fn default_is_intro() {
        assert_eq!(Page::default(), Page::Intro);
    }
}
