//! Personalised advice derived from a record's symptoms and visit count.

const OPENING: &str = "Based on your symptoms and medical history, we recommend: ";
const FIRST_VISIT: &str = "An initial consultation, ";
const FOLLOW_UP: &str = "Regular follow-ups, ";
const CLOSING: &str = "and a healthy lifestyle.";

/// Symptom to advice fragment, in the order fragments appear in the output.
///
/// Symptoms not listed here contribute nothing.
pub const SYMPTOM_ADVICE: [(&str, &str); 3] = [
    ("fever", "plenty of rest, "),
    ("cough", "warm fluids, "),
    ("sore throat", "throat lozenges, "),
];

/// Builds the advice text for a record.
///
/// A `visit_count` of 0 or 1 counts as a first visit. Fragment order follows
/// [`SYMPTOM_ADVICE`], not the order of `symptoms`, and duplicate symptoms add a fragment once.
pub fn generate_advice<S: AsRef<str>>(symptoms: &[S], visit_count: u32) -> String {
    let mut advice = String::from(OPENING);
    advice.push_str(if visit_count > 1 { FOLLOW_UP } else { FIRST_VISIT });

    for (symptom, fragment) in SYMPTOM_ADVICE {
        if symptoms.iter().any(|s| s.as_ref() == symptom) {
            advice.push_str(fragment);
        }
    }

    advice.push_str(CLOSING);
    advice
}
