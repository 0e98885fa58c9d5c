//! Registry: the four record repositories plus the rules that tie them
//! together.
//!
//! Creation flows validate payloads, require parents to exist, and stamp
//! computed scores server-side. Removal refuses to orphan dependents.

use super::{Backend, FileBackend, MemoryBackend, Record, Repository, StoreError};
use crate::model::{
    NewRiskAnalysis, NewRiskAssessment, NewRiskContext, NewRiskIdentification, RiskAnalysis,
    RiskAssessment, RiskContext, RiskIdentification, ValidationError,
};
use crate::scoring::ScoringPolicy;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

impl Record for RiskContext {
    const COLLECTION: &'static str = "contexts";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for RiskIdentification {
    const COLLECTION: &'static str = "identifications";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for RiskAnalysis {
    const COLLECTION: &'static str = "analyses";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for RiskAssessment {
    const COLLECTION: &'static str = "assessments";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Failures from registry operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{kind} `{id}` does not exist")]
    MissingParent { kind: &'static str, id: String },

    #[error("{kind} `{id}` still has {dependents} dependent record(s)")]
    HasDependents {
        kind: &'static str,
        id: String,
        dependents: usize,
    },
}

/// All record collections behind one storage backend.
pub struct Registry {
    pub contexts: Repository<RiskContext>,
    pub identifications: Repository<RiskIdentification>,
    pub analyses: Repository<RiskAnalysis>,
    pub assessments: Repository<RiskAssessment>,
    policy: ScoringPolicy,
}

impl Registry {
    /// Open a registry over a file-backed data directory.
    pub fn open(data_dir: impl Into<PathBuf>, policy: ScoringPolicy) -> Result<Self, StoreError> {
        let backend = Arc::new(FileBackend::open(data_dir)?);
        Ok(Self::with_backend(backend, policy))
    }

    /// Registry over an in-memory backend. Nothing survives the process.
    pub fn in_memory(policy: ScoringPolicy) -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()), policy)
    }

    pub fn with_backend(backend: Arc<dyn Backend>, policy: ScoringPolicy) -> Self {
        Self {
            contexts: Repository::new(Arc::clone(&backend)),
            identifications: Repository::new(Arc::clone(&backend)),
            analyses: Repository::new(Arc::clone(&backend)),
            assessments: Repository::new(backend),
            policy,
        }
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    pub fn add_context(&self, payload: NewRiskContext) -> Result<RiskContext, RegistryError> {
        payload.validate()?;
        let record = self.contexts.insert(payload.into_record())?;
        info!(context_id = %record.id, organization = %record.organization, "Context created");
        Ok(record)
    }

    pub fn add_identification(
        &self,
        payload: NewRiskIdentification,
    ) -> Result<RiskIdentification, RegistryError> {
        payload.validate()?;
        self.require_context(&payload.context_id)?;
        let record = self.identifications.insert(payload.into_record())?;
        info!(identification_id = %record.id, code = %record.code, "Risk identified");
        Ok(record)
    }

    /// Create an analysis, stamping the score from the configured policy.
    pub fn add_analysis(&self, payload: NewRiskAnalysis) -> Result<RiskAnalysis, RegistryError> {
        payload.validate()?;
        let identification = self
            .identifications
            .get(&payload.identification_id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "identification",
                id: payload.identification_id.clone(),
            })?;

        let score = self.policy.score(payload.likelihood, payload.impact);
        debug!(
            likelihood = payload.likelihood,
            impact = payload.impact,
            score,
            policy = self.policy.as_str(),
            "Score stamped"
        );
        let record = self
            .analyses
            .insert(payload.into_record(identification.context_id, score))?;
        info!(analysis_id = %record.id, score = record.score, "Analysis recorded");
        Ok(record)
    }

    /// Create an assessment; the residual score is recomputed here, never
    /// taken from the payload.
    pub fn add_assessment(
        &self,
        payload: NewRiskAssessment,
    ) -> Result<RiskAssessment, RegistryError> {
        payload.validate()?;
        let analysis = self
            .analyses
            .get(&payload.analysis_id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "analysis",
                id: payload.analysis_id.clone(),
            })?;

        let expected_score = self
            .policy
            .score(payload.expected_likelihood, payload.expected_impact);
        let record = self.assessments.insert(payload.into_record(
            analysis.context_id,
            analysis.identification_id,
            expected_score,
        ))?;
        info!(assessment_id = %record.id, expected_score = record.expected_score, "Assessment recorded");
        Ok(record)
    }

    /// Replace a context's fields; the id and creation time are kept.
    pub fn update_context(
        &self,
        id: &str,
        payload: NewRiskContext,
    ) -> Result<RiskContext, RegistryError> {
        payload.validate()?;
        let existing = self.require_context(id)?;
        let record = self.contexts.update(payload.apply_to(existing))?;
        info!(context_id = %record.id, "Context updated");
        Ok(record)
    }

    /// Replace an identification's fields. Moving it to another context is
    /// refused while analyses still reference it.
    pub fn update_identification(
        &self,
        id: &str,
        payload: NewRiskIdentification,
    ) -> Result<RiskIdentification, RegistryError> {
        payload.validate()?;
        let existing = self.identifications.get(id)?.ok_or_else(|| {
            RegistryError::MissingParent {
                kind: "identification",
                id: id.to_string(),
            }
        })?;
        self.require_context(&payload.context_id)?;
        if payload.context_id != existing.context_id {
            let dependents = self.analyses.find(|r| r.identification_id == id)?.len();
            if dependents > 0 {
                return Err(RegistryError::HasDependents {
                    kind: "identification",
                    id: id.to_string(),
                    dependents,
                });
            }
        }
        let record = self.identifications.update(payload.apply_to(existing))?;
        info!(identification_id = %record.id, code = %record.code, "Identification updated");
        Ok(record)
    }

    /// Replace an analysis's scales and control; the score is re-stamped from
    /// the configured policy. Moving it to another identification is refused
    /// while assessments still reference it.
    pub fn update_analysis(
        &self,
        id: &str,
        payload: NewRiskAnalysis,
    ) -> Result<RiskAnalysis, RegistryError> {
        payload.validate()?;
        let existing = self
            .analyses
            .get(id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "analysis",
                id: id.to_string(),
            })?;
        let identification = self
            .identifications
            .get(&payload.identification_id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "identification",
                id: payload.identification_id.clone(),
            })?;
        if payload.identification_id != existing.identification_id {
            let dependents = self.assessments.find(|r| r.analysis_id == id)?.len();
            if dependents > 0 {
                return Err(RegistryError::HasDependents {
                    kind: "analysis",
                    id: id.to_string(),
                    dependents,
                });
            }
        }

        let score = self.policy.score(payload.likelihood, payload.impact);
        debug!(
            likelihood = payload.likelihood,
            impact = payload.impact,
            score,
            policy = self.policy.as_str(),
            "Score re-stamped"
        );
        let record = self
            .analyses
            .update(payload.apply_to(existing, identification.context_id, score))?;
        info!(analysis_id = %record.id, score = record.score, "Analysis updated");
        Ok(record)
    }

    /// Replace an assessment's plan; the residual score is recomputed here,
    /// never taken from the payload.
    pub fn update_assessment(
        &self,
        id: &str,
        payload: NewRiskAssessment,
    ) -> Result<RiskAssessment, RegistryError> {
        payload.validate()?;
        let existing = self
            .assessments
            .get(id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "assessment",
                id: id.to_string(),
            })?;
        let analysis = self
            .analyses
            .get(&payload.analysis_id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "analysis",
                id: payload.analysis_id.clone(),
            })?;

        let expected_score = self
            .policy
            .score(payload.expected_likelihood, payload.expected_impact);
        let record = self.assessments.update(payload.apply_to(
            existing,
            analysis.context_id,
            analysis.identification_id,
            expected_score,
        ))?;
        info!(assessment_id = %record.id, expected_score = record.expected_score, "Assessment updated");
        Ok(record)
    }

    /// Remove a context; fails while identifications still reference it.
    pub fn remove_context(&self, id: &str) -> Result<bool, RegistryError> {
        let dependents = self
            .identifications
            .find(|r| r.context_id == id)?
            .len();
        if dependents > 0 {
            return Err(RegistryError::HasDependents {
                kind: "context",
                id: id.to_string(),
                dependents,
            });
        }
        Ok(self.contexts.remove(id)?)
    }

    /// Remove an identification; fails while analyses reference it.
    pub fn remove_identification(&self, id: &str) -> Result<bool, RegistryError> {
        let dependents = self
            .analyses
            .find(|r| r.identification_id == id)?
            .len();
        if dependents > 0 {
            return Err(RegistryError::HasDependents {
                kind: "identification",
                id: id.to_string(),
                dependents,
            });
        }
        Ok(self.identifications.remove(id)?)
    }

    /// Remove an analysis; fails while assessments reference it.
    pub fn remove_analysis(&self, id: &str) -> Result<bool, RegistryError> {
        let dependents = self.assessments.find(|r| r.analysis_id == id)?.len();
        if dependents > 0 {
            return Err(RegistryError::HasDependents {
                kind: "analysis",
                id: id.to_string(),
                dependents,
            });
        }
        Ok(self.analyses.remove(id)?)
    }

    pub fn remove_assessment(&self, id: &str) -> Result<bool, RegistryError> {
        Ok(self.assessments.remove(id)?)
    }

    /// Identifications, optionally narrowed to one context.
    pub fn identifications_in(
        &self,
        context_id: Option<&str>,
    ) -> Result<Vec<RiskIdentification>, StoreError> {
        match context_id {
            Some(ctx) => self.identifications.find(|r| r.context_id == ctx),
            None => self.identifications.list(),
        }
    }

    /// Analyses, optionally narrowed to one context.
    pub fn analyses_in(&self, context_id: Option<&str>) -> Result<Vec<RiskAnalysis>, StoreError> {
        match context_id {
            Some(ctx) => self.analyses.find(|r| r.context_id == ctx),
            None => self.analyses.list(),
        }
    }

    /// Assessments, optionally narrowed to one context.
    pub fn assessments_in(
        &self,
        context_id: Option<&str>,
    ) -> Result<Vec<RiskAssessment>, StoreError> {
        match context_id {
            Some(ctx) => self.assessments.find(|r| r.context_id == ctx),
            None => self.assessments.list(),
        }
    }

    fn require_context(&self, id: &str) -> Result<RiskContext, RegistryError> {
        self.contexts
            .get(id)?
            .ok_or_else(|| RegistryError::MissingParent {
                kind: "context",
                id: id.to_string(),
            })
    }
}
