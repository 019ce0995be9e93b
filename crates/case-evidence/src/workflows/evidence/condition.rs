use super::domain::{ConditionOperator, FormCondition, FormResponses, FormValue};

/// Evaluate a visibility condition against intake answers.
///
/// Never fails. An unanswered question compares as absent, `contains` only
/// matches array answers, and an unknown operator evaluates to `false`.
pub fn evaluate(condition: &FormCondition, responses: &FormResponses) -> bool {
    let response = responses.get(&condition.question_id);

    match condition.operator {
        ConditionOperator::Equals => values_equal(response, &condition.value),
        ConditionOperator::NotEquals => !values_equal(response, &condition.value),
        ConditionOperator::Contains => match (response, &condition.value) {
            (Some(FormValue::StringArray(items)), FormValue::String(target)) => {
                items.iter().any(|item| item == target)
            }
            _ => false,
        },
        ConditionOperator::Unknown => false,
    }
}

fn values_equal(response: Option<&FormValue>, target: &FormValue) -> bool {
    match (response, target) {
        (Some(FormValue::Bool(left)), FormValue::Bool(right)) => left == right,
        (Some(FormValue::String(left)), FormValue::String(right)) => left == right,
        (Some(FormValue::Number(left)), FormValue::Number(right)) => left == right,
        (Some(FormValue::StringArray(left)), FormValue::StringArray(right)) => left == right,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition(question: &str, operator: ConditionOperator, value: FormValue) -> FormCondition {
        FormCondition {
            question_id: question.to_string(),
            operator,
            value,
        }
    }

    fn responses(entries: &[(&str, FormValue)]) -> FormResponses {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn equals_matches_same_kind_and_value() {
        let answers = responses(&[("maritalStatus", FormValue::from("married"))]);
        let married = condition("maritalStatus", ConditionOperator::Equals, "married".into());
        let single = condition("maritalStatus", ConditionOperator::Equals, "single".into());

        assert!(evaluate(&married, &answers));
        assert!(!evaluate(&single, &answers));
    }

    #[test]
    fn equals_does_not_coerce_across_kinds() {
        let answers = responses(&[
            ("hasChildren", FormValue::from("true")),
            ("priorPetitions", FormValue::Number(1.0)),
        ]);

        assert!(!evaluate(
            &condition("hasChildren", ConditionOperator::Equals, true.into()),
            &answers
        ));
        assert!(!evaluate(
            &condition("priorPetitions", ConditionOperator::Equals, "1".into()),
            &answers
        ));
    }

    #[test]
    fn unanswered_question_is_absent() {
        let answers = FormResponses::new();

        assert!(!evaluate(
            &condition("hasChildren", ConditionOperator::Equals, true.into()),
            &answers
        ));
        assert!(evaluate(
            &condition("hasChildren", ConditionOperator::NotEquals, true.into()),
            &answers
        ));
        assert!(!evaluate(
            &condition("countries", ConditionOperator::Contains, "CA".into()),
            &answers
        ));
    }

    #[test]
    fn not_equals_negates_equals() {
        let answers = responses(&[("priorMarriage", FormValue::Bool(false))]);

        assert!(evaluate(
            &condition("priorMarriage", ConditionOperator::NotEquals, true.into()),
            &answers
        ));
        assert!(!evaluate(
            &condition("priorMarriage", ConditionOperator::NotEquals, false.into()),
            &answers
        ));
    }

    #[test]
    fn contains_requires_array_response() {
        let answers = responses(&[
            (
                "residenceCountries",
                FormValue::StringArray(vec!["MX".to_string(), "CA".to_string()]),
            ),
            ("birthCountry", FormValue::from("CA")),
        ]);

        assert!(evaluate(
            &condition("residenceCountries", ConditionOperator::Contains, "CA".into()),
            &answers
        ));
        assert!(!evaluate(
            &condition("residenceCountries", ConditionOperator::Contains, "FR".into()),
            &answers
        ));
        assert!(!evaluate(
            &condition("birthCountry", ConditionOperator::Contains, "CA".into()),
            &answers
        ));
    }

    #[test]
    fn unknown_operator_fails_closed() {
        let answers = responses(&[("maritalStatus", FormValue::from("married"))]);
        let unknown = condition("maritalStatus", ConditionOperator::Unknown, "married".into());

        assert!(!evaluate(&unknown, &answers));
    }

    #[test]
    fn unrecognised_operator_string_deserialises_as_unknown() {
        let raw = r#"{"questionId":"maritalStatus","operator":"greater_than","value":{"kind":"string","value":"married"}}"#;
        let parsed: FormCondition = serde_json::from_str(raw).expect("condition parses");

        assert_eq!(parsed.operator, ConditionOperator::Unknown);
    }
}
