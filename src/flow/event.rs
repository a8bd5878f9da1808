//! Survey events and their form payloads.
//!
//! Events arrive as JSON from the frontend with unvalidated, optional form
//! fields. `validate` turns a complete form into its typed counterpart; the
//! transition function rejects the event when validation fails, leaving the
//! page as it is.

use serde::{Deserialize, Serialize};

use crate::design::ProfileLabel;

/// One respondent action, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Intro page consent button.
    Consent,
    /// Instructions page start button.
    StartSurvey,
    /// Choice made on a survey task (`None` when nothing was selected).
    ChooseProfile {
        #[serde(default)]
        label: Option<ProfileLabel>,
    },
    SubmitDemographics { form: DemographicsForm },
    SubmitOwnership {
        #[serde(default)]
        answer: Option<OwnershipAnswer>,
    },
    SubmitVehicle { form: VehicleForm },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipAnswer {
    Yes,
    No,
}

// ── Demographics ────────────────────────────────────────────────────────

/// Raw demographics form as posted by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsForm {
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub education: Option<String>,
    pub location: Option<String>,
    pub family_status: Option<String>,
    pub family_income: Option<String>,
    pub addons: Vec<String>,
}

impl DemographicsForm {
    /// All fields answered and exactly three add-ons picked.
    /// Age 0 counts as unanswered.
    pub fn validate(&self) -> Option<Demographics> {
        let age = self.age.filter(|&a| a > 0)?;
        let gender = self.gender.clone()?;
        let education = self.education.clone()?;
        let location = self.location.clone()?;
        let family_status = self.family_status.clone()?;
        let family_income = self.family_income.clone()?;
        if self.addons.len() != 3 {
            return None;
        }
        Some(Demographics {
            age,
            gender,
            education,
            location,
            family_status,
            family_income,
            top_addons: self.addons.clone(),
        })
    }
}

/// Validated demographics, immutable once set on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    pub age: u32,
    pub gender: String,
    pub education: String,
    pub location: String,
    pub family_status: String,
    pub family_income: String,
    /// Exactly three add-ons, in selection order.
    pub top_addons: Vec<String>,
}

impl Demographics {
    /// Add-ons joined for the single spreadsheet cell.
    pub fn top_addons_joined(&self) -> String {
        self.top_addons.join(", ")
    }
}

// ── Vehicle details ─────────────────────────────────────────────────────

/// Raw vehicle details form, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleForm {
    Private {
        #[serde(default)]
        vehicle_type: Option<String>,
        #[serde(default)]
        vehicle_age: Option<String>,
        #[serde(default)]
        vehicle_cost: Option<String>,
        #[serde(default)]
        usage: Option<String>,
        #[serde(default)]
        driven_by: Option<String>,
        #[serde(default)]
        insurance: Option<String>,
        #[serde(default)]
        trust_factor: Option<String>,
    },
    Commercial {
        #[serde(default)]
        business_type: Option<String>,
        #[serde(default)]
        fleet_size: Option<String>,
        #[serde(default)]
        vehicle_type: Option<String>,
        #[serde(default)]
        driven_by: Option<String>,
        #[serde(default)]
        insurance_type: Option<String>,
        #[serde(default)]
        trust_factor: Option<String>,
    },
}

impl VehicleForm {
    /// Every field answered; the free-text fields must be non-empty.
    pub fn validate(&self) -> Option<VehicleInfo> {
        match self {
            Self::Private {
                vehicle_type,
                vehicle_age,
                vehicle_cost,
                usage,
                driven_by,
                insurance,
                trust_factor,
            } => Some(VehicleInfo::Private(PrivateVehicle {
                vehicle_type: vehicle_type.clone()?,
                vehicle_age: filled(vehicle_age)?,
                vehicle_cost: vehicle_cost.clone()?,
                usage: usage.clone()?,
                driven_by: driven_by.clone()?,
                insurance: insurance.clone()?,
                trust_factor: trust_factor.clone()?,
            })),
            Self::Commercial {
                business_type,
                fleet_size,
                vehicle_type,
                driven_by,
                insurance_type,
                trust_factor,
            } => Some(VehicleInfo::Commercial(CommercialVehicle {
                business_type: business_type.clone()?,
                fleet_size: filled(fleet_size)?,
                vehicle_type: vehicle_type.clone()?,
                driven_by: driven_by.clone()?,
                insurance_type: insurance_type.clone()?,
                trust_factor: trust_factor.clone()?,
            })),
        }
    }
}

/// Text input: present and non-empty.
fn filled(field: &Option<String>) -> Option<String> {
    field.as_ref().filter(|s| !s.is_empty()).cloned()
}

/// Validated vehicle answers, immutable once set on the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VehicleInfo {
    NoVehicle,
    Private(PrivateVehicle),
    Commercial(CommercialVehicle),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateVehicle {
    pub vehicle_type: String,
    pub vehicle_age: String,
    pub vehicle_cost: String,
    pub usage: String,
    pub driven_by: String,
    pub insurance: String,
    pub trust_factor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommercialVehicle {
    pub business_type: String,
    pub fleet_size: String,
    pub vehicle_type: String,
    pub driven_by: String,
    pub insurance_type: String,
    pub trust_factor: String,
}

impl VehicleInfo {
    /// Flat cells for the response row, in sheet column order.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Self::NoVehicle => vec!["No Vehicle".into()],
            Self::Private(v) => vec![
                "Own Vehicle".into(),
                "Private".into(),
                v.vehicle_type.clone(),
                v.vehicle_age.clone(),
                v.vehicle_cost.clone(),
                v.usage.clone(),
                v.driven_by.clone(),
                v.insurance.clone(),
                v.trust_factor.clone(),
            ],
            Self::Commercial(v) => vec![
                "Own Vehicle".into(),
                "Commercial".into(),
                v.business_type.clone(),
                v.fleet_size.clone(),
                v.vehicle_type.clone(),
                v.driven_by.clone(),
                v.insurance_type.clone(),
                v.trust_factor.clone(),
            ],
        }
    }
}
