//! Design model — labeled profiles grouped into choice tasks.

use serde::{Deserialize, Serialize};

/// Position of a profile within its task, displayed as a letter (`A`, `B`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProfileLabel(u8);

/// Size of the label alphabet (`A` through `Z`).
pub const LABEL_ALPHABET_SIZE: usize = 26;

impl ProfileLabel {
    /// Label for a 0-based position within a task. `None` past `Z`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < LABEL_ALPHABET_SIZE {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// 0-based position within the task.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn as_char(&self) -> char {
        (b'A' + self.0) as char
    }
}

impl std::fmt::Display for ProfileLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl std::str::FromStr for ProfileLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c @ 'A'..='Z'), None) => Ok(Self(c as u8 - b'A')),
            _ => Err(format!("invalid profile label: {s:?}")),
        }
    }
}

impl TryFrom<String> for ProfileLabel {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ProfileLabel> for String {
    fn from(label: ProfileLabel) -> Self {
        label.as_char().to_string()
    }
}

/// One sampled factorial row: a level for every attribute, plus its task
/// number and label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// 1-based task number.
    pub task: u32,
    pub label: ProfileLabel,
    /// One level per attribute, in catalog order.
    pub levels: Vec<String>,
}

/// A generated design: `task_count × profiles_per_task` profiles in task
/// order. Built once per session by the generator and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Design {
    profiles: Vec<Profile>,
    profiles_per_task: usize,
}

impl Design {
    pub(crate) fn new(profiles: Vec<Profile>, profiles_per_task: usize) -> Self {
        debug_assert!(profiles_per_task > 0);
        debug_assert_eq!(profiles.len() % profiles_per_task, 0);
        Self {
            profiles,
            profiles_per_task,
        }
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profiles_per_task(&self) -> usize {
        self.profiles_per_task
    }

    pub fn task_count(&self) -> u32 {
        (self.profiles.len() / self.profiles_per_task) as u32
    }

    /// Profiles of one 1-based task, in label order.
    pub fn task(&self, task: u32) -> &[Profile] {
        let start = (task as usize - 1) * self.profiles_per_task;
        &self.profiles[start..start + self.profiles_per_task]
    }

    /// Look up one profile of a task by label.
    pub fn profile(&self, task: u32, label: ProfileLabel) -> Option<&Profile> {
        self.task(task).iter().find(|p| p.label == label)
    }
}
