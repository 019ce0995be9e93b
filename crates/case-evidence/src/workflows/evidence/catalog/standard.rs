use super::super::domain::{
    AcceptableDocumentType, ConditionOperator, DependencyCondition, FormCondition, FormValue,
    SlotDependency, SlotPriority, SlotTemplate, VisaType,
};

pub(super) fn templates(visa_type: VisaType) -> Vec<SlotTemplate> {
    match visa_type {
        VisaType::MarriageGreenCard => marriage_green_card(),
        VisaType::FianceK1 => fiance_k1(),
        VisaType::H1bSpecialty => h1b_specialty(),
    }
}

fn slot(
    id: &str,
    name: &str,
    category_id: &str,
    priority: SlotPriority,
    acceptable_types: Vec<AcceptableDocumentType>,
) -> SlotTemplate {
    SlotTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        category_id: category_id.to_string(),
        priority,
        acceptable_types,
        min_count: 1,
        max_count: None,
        depends_on: None,
        form_condition: None,
    }
}

fn doc(type_id: &str, label: &str, is_preferred: bool, requirements: &[&str]) -> AcceptableDocumentType {
    AcceptableDocumentType {
        type_id: type_id.to_string(),
        label: label.to_string(),
        requirements: requirements.iter().map(|line| line.to_string()).collect(),
        is_preferred,
    }
}

fn after(slot_id: &str, condition: DependencyCondition) -> Option<SlotDependency> {
    Some(SlotDependency {
        slot_id: slot_id.to_string(),
        condition,
    })
}

fn when(question_id: &str, operator: ConditionOperator, value: FormValue) -> Option<FormCondition> {
    Some(FormCondition {
        question_id: question_id.to_string(),
        operator,
        value,
    })
}

fn passport() -> SlotTemplate {
    SlotTemplate {
        description: Some("Biographic page of the beneficiary's current passport.".to_string()),
        ..slot(
            "passport",
            "Passport",
            "identity",
            SlotPriority::Required,
            vec![doc(
                "passport",
                "Passport Biographic Page",
                true,
                &[
                    "Valid for at least six months past the intended entry date",
                    "Full page scan with machine-readable zone visible",
                ],
            )],
        )
    }
}

fn birth_certificate() -> SlotTemplate {
    slot(
        "birth_certificate",
        "Birth Certificate",
        "identity",
        SlotPriority::Required,
        vec![
            doc(
                "birth_certificate",
                "Long-Form Birth Certificate",
                true,
                &["Lists both parents", "Certified English translation if not in English"],
            ),
            doc(
                "secondary_birth_evidence",
                "Secondary Birth Evidence",
                false,
                &["Include a statement of non-availability"],
            ),
        ],
    )
}

fn prior_marriage_termination() -> SlotTemplate {
    SlotTemplate {
        max_count: Some(3),
        form_condition: when("priorMarriage", ConditionOperator::Equals, FormValue::Bool(true)),
        ..slot(
            "prior_marriage_termination",
            "Prior Marriage Termination",
            "relationship",
            SlotPriority::Conditional,
            vec![
                doc("divorce_decree", "Final Divorce Decree", true, &["Certified court copy"]),
                doc("death_certificate", "Spouse Death Certificate", false, &[]),
                doc("annulment_decree", "Annulment Decree", false, &[]),
            ],
        )
    }
}

fn marriage_green_card() -> Vec<SlotTemplate> {
    vec![
        passport(),
        birth_certificate(),
        slot(
            "petitioner_status",
            "Petitioner Citizenship or Residence",
            "identity",
            SlotPriority::Required,
            vec![
                doc("us_passport", "U.S. Passport", true, &[]),
                doc("naturalization_certificate", "Naturalization Certificate", false, &[]),
                doc("permanent_resident_card", "Permanent Resident Card", false, &["Front and back"]),
            ],
        ),
        SlotTemplate {
            form_condition: when(
                "maritalStatus",
                ConditionOperator::Equals,
                FormValue::String("married".to_string()),
            ),
            ..slot(
                "marriage_certificate",
                "Marriage Certificate",
                "relationship",
                SlotPriority::Required,
                vec![doc(
                    "marriage_certificate",
                    "Civil Marriage Certificate",
                    true,
                    &["Issued by the civil registrar, not the religious officiant"],
                )],
            )
        },
        prior_marriage_termination(),
        SlotTemplate {
            description: Some(
                "Evidence that the marriage was entered in good faith.".to_string(),
            ),
            min_count: 3,
            max_count: Some(10),
            depends_on: after("marriage_certificate", DependencyCondition::Satisfied),
            ..slot(
                "bona_fide_marriage",
                "Bona Fide Marriage Evidence",
                "relationship",
                SlotPriority::Required,
                vec![
                    doc("joint_lease", "Joint Lease or Deed", true, &["Both spouses named"]),
                    doc("joint_bank_statement", "Joint Bank Statement", false, &[]),
                    doc("relationship_photos", "Photos Together", false, &["Dated, with captions"]),
                    doc("affidavit_third_party", "Third-Party Affidavit", false, &[]),
                ],
            )
        },
        slot(
            "affidavit_of_support",
            "Affidavit of Support",
            "financial",
            SlotPriority::Required,
            vec![doc("form_i864", "Form I-864", true, &["Signed by the petitioner"])],
        ),
        SlotTemplate {
            min_count: 3,
            max_count: Some(3),
            depends_on: after("affidavit_of_support", DependencyCondition::Any),
            ..slot(
                "tax_returns",
                "Sponsor Tax Returns",
                "financial",
                SlotPriority::Required,
                vec![
                    doc("irs_transcript", "IRS Tax Transcript", true, &["Most recent three years"]),
                    doc("tax_return", "Federal Tax Return", false, &["Include W-2s and 1099s"]),
                ],
            )
        },
        SlotTemplate {
            min_count: 3,
            max_count: Some(6),
            ..slot(
                "bank_statements",
                "Bank Statements",
                "financial",
                SlotPriority::Optional,
                vec![doc("bank_statement", "Bank Statement", true, &["Last three months"])],
            )
        },
        SlotTemplate {
            max_count: Some(2),
            form_condition: when("needsJointSponsor", ConditionOperator::Equals, FormValue::Bool(true)),
            depends_on: after("affidavit_of_support", DependencyCondition::Any),
            ..slot(
                "joint_sponsor",
                "Joint Sponsor Documents",
                "financial",
                SlotPriority::Conditional,
                vec![
                    doc("form_i864", "Form I-864 (Joint Sponsor)", true, &[]),
                    doc("irs_transcript", "Joint Sponsor IRS Transcript", false, &[]),
                ],
            )
        },
        slot(
            "medical_exam",
            "Medical Examination",
            "medical",
            SlotPriority::Required,
            vec![doc(
                "form_i693",
                "Form I-693",
                true,
                &["Sealed envelope from a civil surgeon"],
            )],
        ),
        SlotTemplate {
            max_count: Some(5),
            form_condition: when("hasChildren", ConditionOperator::Equals, FormValue::Bool(true)),
            ..slot(
                "children_birth_certificates",
                "Children's Birth Certificates",
                "relationship",
                SlotPriority::Conditional,
                vec![doc("birth_certificate", "Child Birth Certificate", true, &[])],
            )
        },
        SlotTemplate {
            max_count: Some(10),
            form_condition: when("arrestHistory", ConditionOperator::Equals, FormValue::Bool(true)),
            ..slot(
                "court_dispositions",
                "Certified Court Dispositions",
                "immigration_history",
                SlotPriority::Conditional,
                vec![doc("court_disposition", "Certified Disposition", true, &[])],
            )
        },
    ]
}

fn fiance_k1() -> Vec<SlotTemplate> {
    vec![
        passport(),
        birth_certificate(),
        slot(
            "petitioner_citizenship",
            "Petitioner U.S. Citizenship",
            "identity",
            SlotPriority::Required,
            vec![
                doc("us_passport", "U.S. Passport", true, &[]),
                doc("naturalization_certificate", "Naturalization Certificate", false, &[]),
            ],
        ),
        SlotTemplate {
            min_count: 2,
            max_count: Some(2),
            ..slot(
                "intent_to_marry",
                "Statements of Intent to Marry",
                "relationship",
                SlotPriority::Required,
                vec![doc(
                    "intent_statement",
                    "Signed Statement of Intent",
                    true,
                    &["One from each partner", "Signed within the last 120 days"],
                )],
            )
        },
        SlotTemplate {
            min_count: 2,
            max_count: Some(10),
            form_condition: when("metInPerson", ConditionOperator::NotEquals, FormValue::Bool(false)),
            ..slot(
                "proof_of_meeting",
                "Proof of In-Person Meeting",
                "relationship",
                SlotPriority::Required,
                vec![
                    doc("relationship_photos", "Photos Together", true, &[]),
                    doc("travel_itinerary", "Travel Itinerary or Boarding Pass", false, &[]),
                ],
            )
        },
        SlotTemplate {
            form_condition: when("metInPerson", ConditionOperator::Equals, FormValue::Bool(false)),
            ..slot(
                "meeting_waiver",
                "Meeting Requirement Waiver Request",
                "relationship",
                SlotPriority::Conditional,
                vec![doc("waiver_statement", "Hardship Statement", true, &[])],
            )
        },
        prior_marriage_termination(),
        SlotTemplate {
            max_count: Some(5),
            form_condition: when(
                "residenceCountries",
                ConditionOperator::Contains,
                FormValue::String("other".to_string()),
            ),
            depends_on: after("passport", DependencyCondition::Any),
            ..slot(
                "police_certificates",
                "Police Certificates",
                "immigration_history",
                SlotPriority::Conditional,
                vec![doc(
                    "police_certificate",
                    "Police Clearance Certificate",
                    true,
                    &["One per country of residence over six months"],
                )],
            )
        },
    ]
}

fn h1b_specialty() -> Vec<SlotTemplate> {
    vec![
        passport(),
        slot(
            "degree",
            "Degree Diploma",
            "education",
            SlotPriority::Required,
            vec![doc("diploma", "Diploma", true, &["Bachelor's degree or higher"])],
        ),
        SlotTemplate {
            depends_on: after("degree", DependencyCondition::Satisfied),
            ..slot(
                "transcripts",
                "Academic Transcripts",
                "education",
                SlotPriority::Required,
                vec![doc("transcript", "Official Transcript", true, &[])],
            )
        },
        SlotTemplate {
            form_condition: when(
                "educationLocations",
                ConditionOperator::Contains,
                FormValue::String("outside_us".to_string()),
            ),
            depends_on: after("transcripts", DependencyCondition::Any),
            ..slot(
                "credential_evaluation",
                "Foreign Credential Evaluation",
                "education",
                SlotPriority::Conditional,
                vec![doc(
                    "credential_evaluation",
                    "Credential Evaluation Report",
                    true,
                    &["Course-by-course evaluation from a NACES member"],
                )],
            )
        },
        slot(
            "offer_letter",
            "Employment Offer Letter",
            "employment",
            SlotPriority::Required,
            vec![doc("offer_letter", "Signed Offer Letter", true, &["States job title and wage"])],
        ),
        SlotTemplate {
            depends_on: after("offer_letter", DependencyCondition::Any),
            ..slot(
                "labor_condition_application",
                "Certified Labor Condition Application",
                "employment",
                SlotPriority::Required,
                vec![doc("form_eta9035", "Form ETA-9035", true, &["Certified by the DOL"])],
            )
        },
        SlotTemplate {
            max_count: Some(3),
            form_condition: when("priorH1b", ConditionOperator::Equals, FormValue::Bool(true)),
            ..slot(
                "prior_approvals",
                "Prior H-1B Approval Notices",
                "immigration_history",
                SlotPriority::Conditional,
                vec![doc("form_i797", "Form I-797 Approval Notice", true, &[])],
            )
        },
        SlotTemplate {
            min_count: 3,
            max_count: Some(6),
            depends_on: after("prior_approvals", DependencyCondition::Any),
            ..slot(
                "pay_stubs",
                "Recent Pay Stubs",
                "employment",
                SlotPriority::Optional,
                vec![doc("pay_stub", "Pay Stub", true, &[])],
            )
        },
        slot(
            "resume",
            "Resume",
            "employment",
            SlotPriority::Optional,
            vec![doc("resume", "Resume or CV", true, &[])],
        ),
    ]
}
