use crate::infra::{parse_visa_type, InMemoryDocumentStore, InMemoryResponseStore};
use case_evidence::config::AppConfig;
use case_evidence::error::AppError;
use case_evidence::workflows::evidence::{
    CaseEvidence, CaseId, CaseState, CatalogRegistry, Document, DocumentStatus,
    EvidenceService, EvidenceServiceError, FormResponses, FormValue, QualityCheck,
    ReadinessReport, ResolutionPolicy, VisaType,
};
use chrono::Local;
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub(crate) const DEMO_CASE_ID: &str = "DEMO-2041";

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Treat documents without a quality check as needing correction.
    #[arg(long)]
    pub(crate) strict: bool,
    /// Print the final readiness report as JSON after the walkthrough.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct EvidenceReportArgs {
    /// JSON case snapshot (caseId, visaType, documents, responses)
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Resolve against a different visa catalog than the snapshot names
    #[arg(long, value_parser = parse_visa_type)]
    pub(crate) visa_type: Option<VisaType>,
    /// Treat documents without a quality check as needing correction
    #[arg(long)]
    pub(crate) strict: bool,
    /// Include every visible slot in the output
    #[arg(long)]
    pub(crate) list_slots: bool,
    /// Emit the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evidence_report(args: EvidenceReportArgs) -> Result<(), AppError> {
    let EvidenceReportArgs {
        snapshot,
        visa_type,
        strict,
        list_slots,
        json,
    } = args;

    let config = AppConfig::load()?;
    let registry = config.evidence.registry()?;
    let policy = if strict {
        ResolutionPolicy::strict()
    } else {
        config.evidence.policy()
    };

    let mut state = load_snapshot(&snapshot)?;
    if let Some(visa_type) = visa_type {
        state.visa_type = visa_type;
    }

    let catalog = registry
        .catalog(state.visa_type)
        .ok_or(EvidenceServiceError::UnsupportedVisaType(state.visa_type))?;
    let report = CaseEvidence::resolve(catalog, &state, &policy).report();

    if json {
        print_json(&report);
    } else {
        render_readiness_report(&report, list_slots);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { strict, json } = args;

    let policy = if strict {
        ResolutionPolicy::strict()
    } else {
        ResolutionPolicy::default()
    };
    let documents = InMemoryDocumentStore::default();
    let responses = InMemoryResponseStore::default();
    let service = EvidenceService::new(
        Arc::new(CatalogRegistry::standard()?),
        Arc::new(documents.clone()),
        Arc::new(responses.clone()),
        policy,
    );

    let case_id = CaseId::new(DEMO_CASE_ID);
    let visa_type = VisaType::MarriageGreenCard;

    println!("Evidence checklist demo");
    println!(
        "Case {} | {} | evaluated {}",
        case_id,
        visa_type.label(),
        Local::now().format("%Y-%m-%d %H:%M")
    );

    responses.replace(&case_id, demo_responses());
    println!("\n== Intake questionnaire submitted");
    render_readiness_report(&service.report(&case_id, visa_type)?, false);

    let mut uploads = demo_identity_uploads();
    documents.replace(&case_id, uploads.clone());
    println!("\n== Identity and marriage documents approved");
    render_readiness_report(&service.report(&case_id, visa_type)?, false);

    println!("\nAssignment checks");
    let bona_fide = format!("{}-bona_fide_marriage", case_id);
    let passport = format!("{}-passport", case_id);
    for (doc_type_id, slot_id) in [("joint_lease", &bona_fide), ("form_i693", &passport)] {
        let check = service.check_assignment(&case_id, visa_type, doc_type_id, slot_id)?;
        match check.rejection {
            None => println!("- {doc_type_id} -> {slot_id}: allowed"),
            Some(rejection) => println!("- {doc_type_id} -> {slot_id}: rejected ({rejection})"),
        }
    }

    uploads.extend(demo_follow_up_uploads());
    documents.replace(&case_id, uploads);
    println!("\n== Sponsor paperwork uploaded");
    let report = service.report(&case_id, visa_type)?;
    render_readiness_report(&report, true);

    if json {
        print_json(&report);
    }

    Ok(())
}

/// Intake answers for a married applicant with no prior marriages or joint sponsor.
pub(crate) fn demo_responses() -> FormResponses {
    let mut responses = FormResponses::new();
    responses.insert("maritalStatus".to_string(), FormValue::from("married"));
    responses.insert("priorMarriage".to_string(), FormValue::Bool(false));
    responses.insert("needsJointSponsor".to_string(), FormValue::Bool(false));
    responses.insert("hasChildren".to_string(), FormValue::Bool(false));
    responses.insert("arrestHistory".to_string(), FormValue::Bool(false));
    responses
}

/// Documents for the demo case after every walkthrough step.
pub(crate) fn demo_documents() -> Vec<Document> {
    let mut documents = demo_identity_uploads();
    documents.extend(demo_follow_up_uploads());
    documents
}

fn demo_identity_uploads() -> Vec<Document> {
    vec![
        upload("doc-101", "passport", DocumentStatus::Approved, Some(clean()), "passport"),
        upload(
            "doc-102",
            "birth_certificate",
            DocumentStatus::Approved,
            Some(clean()),
            "birth_certificate",
        ),
        upload(
            "doc-103",
            "marriage_certificate",
            DocumentStatus::Approved,
            Some(clean()),
            "marriage_certificate",
        ),
    ]
}

fn demo_follow_up_uploads() -> Vec<Document> {
    vec![
        upload(
            "doc-104",
            "form_i864",
            DocumentStatus::Approved,
            Some(QualityCheck {
                passed: false,
                issues: vec!["Petitioner signature missing on page 9".to_string()],
            }),
            "affidavit_of_support",
        ),
        upload(
            "doc-105",
            "joint_lease",
            DocumentStatus::Approved,
            Some(clean()),
            "bona_fide_marriage",
        ),
        upload(
            "doc-106",
            "relationship_photos",
            DocumentStatus::Processing,
            None,
            "bona_fide_marriage",
        ),
    ]
}

fn upload(
    id: &str,
    document_type_id: &str,
    status: DocumentStatus,
    quality_check: Option<QualityCheck>,
    template_id: &str,
) -> Document {
    Document {
        id: id.to_string(),
        document_type_id: document_type_id.to_string(),
        status,
        quality_check,
        assigned_to_slots: vec![template_id.to_string()],
    }
}

fn clean() -> QualityCheck {
    QualityCheck {
        passed: true,
        issues: Vec::new(),
    }
}

fn load_snapshot(path: &Path) -> Result<CaseState, AppError> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|err| {
        AppError::Input(format!(
            "failed to parse case snapshot {}: {err}",
            path.display()
        ))
    })
}

fn print_json(report: &ReadinessReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Readiness payload unavailable: {err}"),
    }
}

pub(crate) fn render_readiness_report(report: &ReadinessReport, list_slots: bool) {
    println!(
        "Evidence readiness for case {} ({})",
        report.case_id, report.visa_label
    );
    println!(
        "{} | {:.0}% overall ({}/{}) | {:.0}% required ({}/{})",
        report.readiness_label,
        report.completion_pct,
        report.progress.satisfied,
        report.progress.total,
        report.required_completion_pct,
        report.progress.required_satisfied,
        report.progress.required
    );

    println!("Categories");
    for category in &report.categories {
        println!(
            "- {}: {}/{} complete, {} need attention",
            category.category_id, category.satisfied, category.total, category.needs_attention
        );
    }

    match &report.focus {
        Some(focus) => {
            println!(
                "Next focus: {} [{}] {}/{}",
                focus.name, focus.status_label, focus.current, focus.required
            );
            if let Some(preferred) = &focus.preferred_document {
                println!("  Preferred document: {preferred}");
            }
            for issue in &focus.quality_issues {
                println!("  Issue: {issue}");
            }
        }
        None => println!("Next focus: none"),
    }

    if list_slots {
        println!("Slots");
        for slot in &report.slots {
            println!(
                "- {} | {} | {} | {}/{} (capacity {})",
                slot.slot_id,
                slot.priority_label,
                slot.status_label,
                slot.current,
                slot.required,
                slot.capacity
            );
        }
    }

    if !report.hidden_slot_ids.is_empty() {
        println!("Hidden requirements: {}", report.hidden_slot_ids.len());
    }
}
