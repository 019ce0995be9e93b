use super::common::*;
use crate::workflows::evidence::catalog::SlotCatalog;
use crate::workflows::evidence::domain::{
    DocumentStatus, FormResponses, SlotPriority, SlotStatus, VisaType,
};
use crate::workflows::evidence::focus::next_focus_slot;

#[test]
fn issue_outranks_empty_regardless_of_order() {
    let templates = vec![
        template("a_empty", SlotPriority::Required, "letter"),
        template("b_issue", SlotPriority::Required, "letter"),
    ];
    let catalog = SlotCatalog::new(VisaType::FianceK1, templates).expect("valid");
    let documents = vec![document(
        "b-1",
        "letter",
        DocumentStatus::Approved,
        failed("unsigned"),
        "b_issue",
    )];

    let evidence = resolve(&catalog, &state(documents, FormResponses::new()));
    let focus = evidence.next_focus_slot().expect("focus slot");

    assert_eq!(focus.template_id, "b_issue");

    let mut reversed = evidence.slots().to_vec();
    reversed.reverse();
    let focus = next_focus_slot(&reversed).expect("focus slot");
    assert_eq!(focus.template_id, "b_issue");
}

#[test]
fn follows_tier_order_for_required_slots() {
    let templates = vec![
        template("partial", SlotPriority::Required, "letter"),
        template("empty", SlotPriority::Required, "letter"),
        template("optional_issue", SlotPriority::Optional, "letter"),
    ];
    let catalog = SlotCatalog::new(VisaType::FianceK1, templates).expect("valid");
    let documents = vec![
        document("p-1", "letter", DocumentStatus::Pending, passed(), "partial"),
        document(
            "o-1",
            "letter",
            DocumentStatus::Pending,
            failed("blurry"),
            "optional_issue",
        ),
    ];

    let evidence = resolve(&catalog, &state(documents, FormResponses::new()));

    assert_eq!(
        evidence.next_focus_slot().map(|slot| slot.template_id.as_str()),
        Some("empty")
    );
}

#[test]
fn optional_issue_is_last_resort() {
    let templates = vec![
        template("done", SlotPriority::Required, "letter"),
        template("optional_empty", SlotPriority::Optional, "letter"),
        template("optional_issue", SlotPriority::Optional, "letter"),
    ];
    let catalog = SlotCatalog::new(VisaType::FianceK1, templates).expect("valid");
    let documents = vec![
        approved("d-1", "letter", "done"),
        document(
            "o-1",
            "letter",
            DocumentStatus::Approved,
            failed("expired"),
            "optional_issue",
        ),
    ];

    let evidence = resolve(&catalog, &state(documents, FormResponses::new()));
    let focus = evidence.next_focus_slot().expect("focus slot");

    assert_eq!(focus.template_id, "optional_issue");
    assert_eq!(focus.status, SlotStatus::Issue);
}

#[test]
fn returns_none_when_all_clear() {
    let catalog = sample_catalog();
    let mut documents = vec![approved("p-1", "passport", "passport")];
    documents.extend(
        (1..=3).map(|index| approved(&format!("bs-{index}"), "bank_statement", "bank_statements")),
    );

    let evidence = resolve(&catalog, &state(documents, single()));

    assert!(evidence.next_focus_slot().is_none());
    assert!(evidence.is_ready_for_submission());
}

#[test]
fn hidden_slots_are_never_focused() {
    let catalog = sample_catalog();
    let documents = vec![
        approved("p-1", "passport", "passport"),
        document(
            "mc-1",
            "marriage_certificate",
            DocumentStatus::Approved,
            failed("illegible seal"),
            "marriage_certificate",
        ),
    ];

    let evidence = resolve(&catalog, &state(documents, single()));

    assert_eq!(
        evidence.next_focus_slot().map(|slot| slot.template_id.as_str()),
        Some("bank_statements")
    );
}
