//! Attribute catalog and questionnaire content.
//!
//! The catalog is the fixed set of conjoint attributes and their discrete
//! levels. It is built once at startup and never mutated; the design
//! generator, the row serializer, and the questionnaire endpoint all read
//! from the same instance.

use serde::{Deserialize, Serialize};

/// One conjoint attribute with its ordered levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub levels: Vec<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, levels: &[&str]) -> Self {
        Self {
            name: name.into(),
            levels: levels.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered, immutable set of attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    attributes: Vec<Attribute>,
}

impl Catalog {
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter().map(|a| a.name.as_str()).collect()
    }

    /// Level count per attribute, in attribute order.
    pub fn level_counts(&self) -> Vec<usize> {
        self.attributes.iter().map(|a| a.levels.len()).collect()
    }

    /// Size of the full factorial (product of all level counts).
    pub fn factorial_size(&self) -> usize {
        self.attributes.iter().map(|a| a.levels.len()).product()
    }

    /// The motor insurance catalog this service was built for.
    pub fn motor_insurance() -> Self {
        Self::new(vec![
            Attribute::new("Annual Premium Price", &["₹500", "₹1000", "₹2000", "₹3000"]),
            Attribute::new("Voluntary Deductible", &["0", "₹1000", "₹2000", "₹5000"]),
            Attribute::new(
                "Key Coverage Feature",
                &[
                    "Covers all repair costs",
                    "Daily compensation or transport if vehicle in repair",
                    "Emergency Roadside assistance",
                    "Support for theft/damage of belongings in vehicle",
                    "Medical expense coverage for vehicle occupants",
                ],
            ),
            Attribute::new(
                "Spare parts used during repairs",
                &[
                    "Only OEM (original) parts",
                    "Mix of OEM (original) & Non-OEM (aftermarket) parts",
                    "Non – OEM (aftermarket) parts",
                ],
            ),
            Attribute::new(
                "Claims Experience",
                &[
                    "Quick return of vehicle",
                    "Regular updates & transparency",
                    "Cashless claims at garage",
                    "Convenient pick-up and drop of vehicle",
                    "Repair at home for minor damages",
                ],
            ),
        ])
    }
}

// ── Demographics options ────────────────────────────────────────────────

pub const GENDERS: &[&str] = &["Male", "Female", "Others"];

pub const EDUCATION_LEVELS: &[&str] = &[
    "Below 10th",
    "10th Pass",
    "12th Pass",
    "Graduate",
    "Post Graduate",
];

pub const LOCATIONS: &[&str] = &["Tier 1 City", "Tier 2 City", "Tier 3 City", "Rural"];

pub const FAMILY_STATUSES: &[&str] = &["Unmarried", "Married", "Married with children"];

pub const INCOME_BANDS: &[&str] = &[
    "Less than ₹5 Lakhs",
    "₹5 Lakhs – ₹9.99 Lakhs",
    "₹10 Lakhs – ₹19.99 Lakhs",
    "₹20 Lakhs – ₹50 Lakhs",
    "More than 50 Lakhs",
    "Prefer not to say",
];

/// The add-on list respondents pick their top 3 from.
pub const ADDONS: &[&str] = &[
    "Zero Depreciation Cover : Ensures that the insurance company will pay the full cost to repair or replace damaged parts of your car, without reducing the amount based on how old the parts are",
    "Roadside Assistance : Emergency help if your car breaks down — towing, fuel delivery, flat tire fix, emergency hotel accommodation etc.",
    "Engine Protection : Covers damage to the engine due to water ingress, oil leakage, etc. — not usually included in base policies",
    "Personal Accident Cover (for Driver & Occupants) : Covers injuries or death of the driver and passengers in an accident",
    "Consumables Cover : Covers small but essential items like engine oil, nuts & bolts, AC gas, etc., used during repairs",
    "No Claim Bonus (NCB) Protection : Lets you keep your No Claim Bonus (a discount of 20% to 50% on your premium for not making claims) even if you file a claim during the policy year",
    "Tyre Protection : Covers repair or replacement costs of tyres damaged by accidents, cuts, or bursts",
    "Key Replacement : Covers the cost of replacing lost, stolen, or damaged car keys, including reprogramming if needed",
    "Loss of personal belongings : Covers the loss or damage of personal items inside the car, such as electronics, bags, or valuables, due to theft or an accident",
    "Battery Protection : Covers the cost of repairing or replacing your car’s battery if it gets damaged due to electrical faults or accidents",
    "Garage Cash : Provides a daily allowance to cover your transportation costs if your car is being repaired at a garage after an accident or breakdown",
    "Misfueling : Covers the costs associated with repairing damage caused by putting the wrong type of fuel in a vehicle",
];

// ── Private vehicle options ─────────────────────────────────────────────

pub const PRIVATE_VEHICLE_TYPES: &[&str] =
    &["2 wheeler", "4 wheeler", "EV 2 Wheeler", "EV 4 Wheeler"];

pub const PRIVATE_VEHICLE_COSTS: &[&str] = &[
    "Less than ₹1 Lakh",
    "₹1 Lakh – ₹2.99 Lakhs",
    "₹3 Lakhs – ₹4.99 Lakhs",
    "₹5 Lakhs – ₹9.99 Lakhs",
    "₹10 Lakhs – ₹20 Lakhs",
    "More than 20 Lakhs",
];

pub const PRIVATE_USAGE_LEVELS: &[&str] = &[
    "Heavy (daily use)",
    "Moderate (3-5 times/week)",
    "Light (1-2 times/week)",
    "Minimal (Emergency use only)",
];

pub const PRIVATE_DRIVERS: &[&str] = &["Self", "Family Members", "Driver", "Others"];

pub const PRIVATE_INSURANCE_PLANS: &[&str] = &[
    "Third Party Liability Plan Only",
    "Comprehensive Plan",
    "Comprehensive Plan + Add-ons",
    "Don't remember",
    "No Insurance",
];

pub const PRIVATE_TRUST_FACTORS: &[&str] = &[
    "Brand Value",
    "Helpful/Known Agent",
    "Family/Friend Recommendation",
    "Transparency in Terms and Conditions",
    "Simple/Clear Communication",
];

// ── Commercial vehicle options ──────────────────────────────────────────

pub const COMMERCIAL_BUSINESS_TYPES: &[&str] = &[
    "Goods transport",
    "Passenger transport",
    "Construction or heavy equipment transport",
    "Others",
];

pub const COMMERCIAL_VEHICLE_TYPES: &[&str] = &[
    "3-wheeler",
    "Light Commercial Vehicle",
    "Taxi/Cab",
    "Minibus/Bus",
    "Trucks",
    "Others",
];

pub const COMMERCIAL_DRIVERS: &[&str] = &["Self", "Driver", "Others"];

pub const COMMERCIAL_INSURANCE_PLANS: &[&str] = &[
    "Third Party Liability Plan Only",
    "Comprehensive Plan",
    "Comprehensive Plan + Add ons",
    "Don't Know/ Don't Remember",
];

pub const COMMERCIAL_TRUST_FACTORS: &[&str] = &[
    "Brand Value",
    "Helpful/Known agent",
    "Friend/family recommendation",
    "Transparency in Terms and Conditions",
    "Simple/Clear communication",
];
