//! Response-log row layout.
//!
//! Every answered task becomes one row per profile the respondent saw, with
//! the chosen profile flagged. Demographics and vehicle details repeat on
//! every row so the log stays self-contained per line.

use serde_json::Value;

use crate::catalog::Catalog;
use crate::session::{Response, Session};
use crate::sheets::Row;

/// Demographic cells per row, after the choice flag.
const DEMOGRAPHIC_CELLS: usize = 7;

/// Column headers of the response log, in row cell order. The vehicle
/// columns follow the private layout; commercial rows are narrower and
/// no-vehicle rows stop after `Ownership`.
pub fn log_headers(catalog: &Catalog) -> Vec<String> {
    let mut headers: Vec<String> = ["Respondent_id", "Task", "Profile"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    headers.extend(catalog.attribute_names().iter().map(|s| s.to_string()));
    headers.extend(
        [
            "Chosen",
            "Age",
            "Gender",
            "Education",
            "Location",
            "Family_Status",
            "Family_Income",
            "Top_Addons",
            "Ownership",
            "Ownership_Type",
            "Vehicle_Type",
            "Vehicle_Age",
            "Vehicle_Cost",
            "Usage",
            "Driven_By",
            "Insurance",
            "Trust_Factor",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    headers
}

/// Build the append batch for a session, answered tasks in task order.
/// Unanswered parts produce blanks rather than errors.
pub fn build_rows(session: &Session) -> Vec<Row> {
    let mut responses = session.responses.clone();
    responses.sort_by_key(|r| r.task);

    let respondent_id = session.respondent_id.to_string();
    let mut rows = Vec::with_capacity(responses.len() * session.design.profiles_per_task());

    for Response { task, choice } in responses {
        for profile in session.design.task(task) {
            let chosen = u8::from(profile.label == choice);

            let mut row: Row = vec![
                Value::from(respondent_id.clone()),
                Value::from(task),
                Value::from(profile.label.to_string()),
            ];
            row.extend(profile.levels.iter().cloned().map(Value::from));
            row.push(Value::from(chosen));

            match &session.demographics {
                Some(d) => row.extend([
                    Value::from(d.age),
                    Value::from(d.gender.clone()),
                    Value::from(d.education.clone()),
                    Value::from(d.location.clone()),
                    Value::from(d.family_status.clone()),
                    Value::from(d.family_income.clone()),
                    Value::from(d.top_addons_joined()),
                ]),
                None => row.extend(std::iter::repeat_n(Value::from(""), DEMOGRAPHIC_CELLS)),
            }

            if let Some(info) = &session.vehicle_info {
                row.extend(info.fields().into_iter().map(Value::from));
            }

            rows.push(row);
        }
    }
    rows
}
