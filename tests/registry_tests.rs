//! Registry integration tests over the file backend.

use chrono::NaiveDate;
use riskledger::model::{
    ControlVerdict, NewRiskAnalysis, NewRiskAssessment, NewRiskContext, NewRiskIdentification,
    RiskCategory, RiskCause, RiskControl, RiskImpact, RiskNature,
};
use riskledger::scoring::ScoringPolicy;
use riskledger::store::{Registry, RegistryError};
use tempfile::tempdir;

fn context_payload() -> NewRiskContext {
    NewRiskContext {
        organization: "Direktorat Jenderal Bina Marga".into(),
        assessment_year: 2024,
        period: "Triwulan I".into(),
        data_source: Some("Laporan kinerja".into()),
        assessor: Some("Inspektorat".into()),
        strategic_objective: "Konektivitas jalan nasional".into(),
        business_process: "Preservasi jalan".into(),
    }
}

fn identification_payload(context_id: &str, code: &str) -> NewRiskIdentification {
    NewRiskIdentification {
        context_id: context_id.into(),
        code: code.into(),
        owner: "Balai Besar".into(),
        nature: RiskNature::Uncontrollable,
        category: RiskCategory::Performance,
        description: "Kerusakan jalan akibat banjir".into(),
        cause: RiskCause {
            source: "Faktor eksternal".into(),
            description: "Curah hujan ekstrem".into(),
        },
        impact: RiskImpact {
            affected_party: "Pengguna jalan".into(),
            description: "Gangguan mobilitas".into(),
        },
    }
}

fn analysis_payload(identification_id: &str, likelihood: u8, impact: u8) -> NewRiskAnalysis {
    NewRiskAnalysis {
        identification_id: identification_id.into(),
        likelihood,
        impact,
        control: RiskControl {
            description: "Inspeksi drainase berkala".into(),
            verdict: ControlVerdict::Inadequate,
        },
    }
}

#[test]
fn full_workflow_persists_across_reopen() {
    let temp = tempdir().unwrap();

    let (ctx_id, analysis_id) = {
        let registry = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();
        let ctx = registry.add_context(context_payload()).unwrap();
        let ident = registry
            .add_identification(identification_payload(&ctx.id, "R-001"))
            .unwrap();
        let analysis = registry.add_analysis(analysis_payload(&ident.id, 3, 5)).unwrap();
        // Matrix row L=3: [4, 8, 14, 17, 22]
        assert_eq!(analysis.score, 22);

        let assessment = registry
            .add_assessment(NewRiskAssessment {
                analysis_id: analysis.id.clone(),
                response: "mitigate".into(),
                existing_controls: Some("Inspeksi berkala".into()),
                action_plan: Some("Perbaikan drainase".into()),
                owner: "Kepala Balai".into(),
                target_date: NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
                output_indicator: Some("Laporan perbaikan".into()),
                expected_likelihood: 2,
                expected_impact: 3,
            })
            .unwrap();
        assert_eq!(assessment.expected_score, 10);
        (ctx.id, analysis.id)
    };

    // Fresh registry over the same directory sees everything.
    let reopened = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();
    assert_eq!(reopened.contexts.count().unwrap(), 1);
    assert_eq!(reopened.identifications_in(Some(&ctx_id)).unwrap().len(), 1);
    let analyses = reopened.analyses_in(Some(&ctx_id)).unwrap();
    assert_eq!(analyses.len(), 1);
    assert_eq!(analyses[0].id, analysis_id);
    assert_eq!(analyses[0].score, 22);
    assert_eq!(reopened.assessments_in(Some(&ctx_id)).unwrap().len(), 1);
}

#[test]
fn missing_parents_are_rejected() {
    let temp = tempdir().unwrap();
    let registry = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();

    let err = registry
        .add_identification(identification_payload("no-such-context", "R-001"))
        .unwrap_err();
    assert!(matches!(err, RegistryError::MissingParent { kind: "context", .. }));

    let err = registry
        .add_analysis(analysis_payload("no-such-identification", 2, 2))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::MissingParent { kind: "identification", .. }
    ));
}

#[test]
fn dependent_records_block_removal_until_gone() {
    let temp = tempdir().unwrap();
    let registry = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();

    let ctx = registry.add_context(context_payload()).unwrap();
    let ident = registry
        .add_identification(identification_payload(&ctx.id, "R-001"))
        .unwrap();
    let analysis = registry.add_analysis(analysis_payload(&ident.id, 2, 2)).unwrap();

    assert!(matches!(
        registry.remove_identification(&ident.id),
        Err(RegistryError::HasDependents { .. })
    ));

    assert!(registry.remove_analysis(&analysis.id).unwrap());
    assert!(registry.remove_identification(&ident.id).unwrap());
    assert!(registry.remove_context(&ctx.id).unwrap());
    assert_eq!(registry.contexts.count().unwrap(), 0);
}

#[test]
fn updated_scales_restamp_and_persist() {
    let temp = tempdir().unwrap();

    let analysis_id = {
        let registry = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();
        let ctx = registry.add_context(context_payload()).unwrap();
        let ident = registry
            .add_identification(identification_payload(&ctx.id, "R-001"))
            .unwrap();
        let analysis = registry.add_analysis(analysis_payload(&ident.id, 2, 2)).unwrap();
        // Matrix row L=2: [2, 7, 10, 13, 21]
        assert_eq!(analysis.score, 7);

        let updated = registry
            .update_analysis(&analysis.id, analysis_payload(&ident.id, 4, 3))
            .unwrap();
        // Matrix row L=4: [6, 12, 16, 19, 24]
        assert_eq!(updated.score, 16);
        assert_eq!(updated.id, analysis.id);
        assert_eq!(updated.created_at, analysis.created_at);
        analysis.id
    };

    let reopened = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();
    let stored = reopened.analyses.get(&analysis_id).unwrap().unwrap();
    assert_eq!(stored.score, 16);
    assert_eq!((stored.likelihood, stored.impact), (4, 3));
}

#[test]
fn product_policy_changes_stamped_scores_only() {
    let temp = tempdir().unwrap();
    let registry = Registry::open(temp.path(), ScoringPolicy::Product).unwrap();

    let ctx = registry.add_context(context_payload()).unwrap();
    let ident = registry
        .add_identification(identification_payload(&ctx.id, "R-001"))
        .unwrap();
    let analysis = registry.add_analysis(analysis_payload(&ident.id, 3, 5)).unwrap();
    assert_eq!(analysis.score, 15);
}

#[test]
fn validation_failures_leave_the_register_untouched() {
    let temp = tempdir().unwrap();
    let registry = Registry::open(temp.path(), ScoringPolicy::Matrix).unwrap();
    let ctx = registry.add_context(context_payload()).unwrap();
    let ident = registry
        .add_identification(identification_payload(&ctx.id, "R-001"))
        .unwrap();

    let err = registry.add_analysis(analysis_payload(&ident.id, 0, 3)).unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));
    let err = registry.add_analysis(analysis_payload(&ident.id, 3, 6)).unwrap_err();
    assert!(matches!(err, RegistryError::Validation(_)));

    assert!(registry.analyses_in(None).unwrap().is_empty());
}
