// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Conversion from a Strava activity to a FHIR exercise-duration Observation.

use crate::models::{
    Activity, CodeableConcept, Coding, Identifier, Meta, Narrative, Observation, Quantity,
    Reference,
};

/// Profile the produced Observation claims conformance to.
const EXERCISE_TRACKING_PROFILE: &str =
    "http://phr.kanta.fi/StructureDefinition/fiphr-sd-exercisetracking-stu3";

/// Fixed identifiers marking dataset provenance; the repository keys
/// duplicate detection on these when the same event is redelivered.
const DATASET_IDENTIFIER: &str = "urn:uuid:6288f477-90ef-424a-b6e3-da4ff18a058e";
const RECORD_IDENTIFIER: &str = "urn:uuid:00000000-5cb1-fef8-16b6-835409677fb6";

const FITNESS_CATEGORY_SYSTEM: &str = "http://phr.kanta.fi/fiphr-cs-fitnesscategory";
const LOINC_SYSTEM: &str = "http://loinc.org";
const EXERCISE_DURATION_CODE: &str = "55411-3";
const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// Map an activity to an exercise-duration Observation.
///
/// Pure and total: no I/O, no error path. An activity without an athlete
/// still maps, with an empty patient reference suffix. Duration is whole
/// minutes of elapsed time, truncating.
pub fn activity_to_observation(activity: &Activity) -> Observation {
    let patient_ref = format!(
        "Patient/{}",
        activity
            .athlete
            .as_ref()
            .map(|a| a.id.to_string())
            .unwrap_or_default()
    );
    let minutes = activity.elapsed_time / 60;

    Observation {
        resource_type: "Observation".to_string(),
        id: None,
        meta: Some(Meta {
            profile: vec![EXERCISE_TRACKING_PROFILE.to_string()],
        }),
        language: Some("en".to_string()),
        text: Some(Narrative {
            status: "generated".to_string(),
            div: format!(
                "<div>Time: {} Result: {} min</div>",
                activity.start_date_local.to_rfc3339(),
                minutes
            ),
        }),
        identifier: vec![
            usual_identifier(DATASET_IDENTIFIER),
            usual_identifier(RECORD_IDENTIFIER),
        ],
        status: "final".to_string(),
        category: vec![CodeableConcept {
            coding: vec![Coding {
                system: FITNESS_CATEGORY_SYSTEM.to_string(),
                code: "fitness".to_string(),
                display: Some("Fitness".to_string()),
            }],
        }],
        code: CodeableConcept {
            coding: vec![Coding {
                system: LOINC_SYSTEM.to_string(),
                code: EXERCISE_DURATION_CODE.to_string(),
                display: Some("Exercise duration".to_string()),
            }],
        },
        subject: Some(Reference {
            reference: patient_ref.clone(),
        }),
        issued: Some(activity.start_date_local),
        performer: vec![Reference {
            reference: patient_ref,
        }],
        value_quantity: Some(Quantity {
            value: minutes,
            unit: "min".to_string(),
            system: UCUM_SYSTEM.to_string(),
            code: "min".to_string(),
        }),
    }
}

fn usual_identifier(value: &str) -> Identifier {
    Identifier {
        use_: "usual".to_string(),
        system: "urn:ietf:rfc:3986".to_string(),
        value: value.to_string(),
    }
}
