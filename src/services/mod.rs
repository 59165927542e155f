pub mod candidate_service;
pub mod company_service;
pub mod recruiter_service;
pub mod result_decoding;

use std::sync::Arc;

use async_trait::async_trait;

use crate::database::Store;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, CandidateUpdate};
use crate::models::company::{Company, CompanyUpdate, NewCompany};
use crate::models::interview::InterviewResults;
use crate::models::pagination::{CandidateFilter, Page, PageArgs};
use crate::models::recruiter::Recruiter;

use candidate_service::CandidateService;
use company_service::CompanyService;
use recruiter_service::RecruiterService;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CandidateAccess: Send + Sync {
    async fn search(&self, filter: &CandidateFilter) -> Result<Page<Candidate>>;
    async fn get_by_public_id(&self, public_id: &str) -> Result<Candidate>;
    async fn update(&self, public_id: &str, update: &CandidateUpdate) -> Result<()>;
    async fn delete(&self, public_id: &str) -> Result<()>;
    async fn add_skills(&self, public_id: &str, skills: &[String]) -> Result<()>;
    async fn remove_skills(&self, public_id: &str, skills: &[String]) -> Result<()>;
    async fn exists(&self, public_id: &str) -> Result<bool>;
    async fn interviews(&self, public_id: &str, page: PageArgs) -> Result<Page<InterviewResults>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecruiterAccess: Send + Sync {
    async fn get_by_public_id(&self, public_id: &str) -> Result<Recruiter>;
    async fn exists(&self, public_id: &str) -> Result<bool>;
    async fn interviews(&self, public_id: &str, page: PageArgs) -> Result<Page<InterviewResults>>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyAccess: Send + Sync {
    async fn create(&self, company: &NewCompany) -> Result<String>;
    async fn update(&self, public_id: &str, update: &CompanyUpdate) -> Result<()>;
    async fn get_by_public_id(&self, public_id: &str) -> Result<Company>;
    async fn search(&self, search: &str, page: PageArgs) -> Result<Page<Company>>;
    async fn exists(&self, public_id: &str) -> Result<bool>;
}

/// Entry point for the HTTP layer: one component per capability, each call forwarded.
#[derive(Clone)]
pub struct Directory {
    candidates: Arc<dyn CandidateAccess>,
    recruiters: Arc<dyn RecruiterAccess>,
    companies: Arc<dyn CompanyAccess>,
}

impl Directory {
    pub fn new(
        candidates: Arc<dyn CandidateAccess>,
        recruiters: Arc<dyn RecruiterAccess>,
        companies: Arc<dyn CompanyAccess>,
    ) -> Self {
        Self {
            candidates,
            recruiters,
            companies,
        }
    }

    pub fn from_store(store: Store) -> Self {
        Self::new(
            Arc::new(CandidateService::new(store.clone())),
            Arc::new(RecruiterService::new(store.clone())),
            Arc::new(CompanyService::new(store)),
        )
    }

    pub async fn search_candidates(&self, filter: &CandidateFilter) -> Result<Page<Candidate>> {
        self.candidates.search(filter).await
    }

    pub async fn candidate(&self, public_id: &str) -> Result<Candidate> {
        self.candidates.get_by_public_id(public_id).await
    }

    pub async fn update_candidate(&self, public_id: &str, update: &CandidateUpdate) -> Result<()> {
        self.candidates.update(public_id, update).await
    }

    pub async fn delete_candidate(&self, public_id: &str) -> Result<()> {
        self.candidates.delete(public_id).await
    }

    pub async fn add_skills(&self, public_id: &str, skills: &[String]) -> Result<()> {
        self.candidates.add_skills(public_id, skills).await
    }

    pub async fn remove_skills(&self, public_id: &str, skills: &[String]) -> Result<()> {
        self.candidates.remove_skills(public_id, skills).await
    }

    pub async fn candidate_interviews(
        &self,
        public_id: &str,
        page: PageArgs,
    ) -> Result<Page<InterviewResults>> {
        self.candidates.interviews(public_id, page).await
    }

    /// `PermissionDenied` unless the candidate exists.
    pub async fn ensure_candidate(&self, public_id: &str) -> Result<()> {
        ensure(self.candidates.exists(public_id).await?, "candidate", public_id)
    }

    pub async fn recruiter(&self, public_id: &str) -> Result<Recruiter> {
        self.recruiters.get_by_public_id(public_id).await
    }

    pub async fn recruiter_interviews(
        &self,
        public_id: &str,
        page: PageArgs,
    ) -> Result<Page<InterviewResults>> {
        self.recruiters.interviews(public_id, page).await
    }

    pub async fn ensure_recruiter(&self, public_id: &str) -> Result<()> {
        ensure(self.recruiters.exists(public_id).await?, "recruiter", public_id)
    }

    pub async fn create_company(&self, company: &NewCompany) -> Result<String> {
        self.companies.create(company).await
    }

    pub async fn update_company(&self, public_id: &str, update: &CompanyUpdate) -> Result<()> {
        self.companies.update(public_id, update).await
    }

    pub async fn company(&self, public_id: &str) -> Result<Company> {
        self.companies.get_by_public_id(public_id).await
    }

    pub async fn search_companies(&self, search: &str, page: PageArgs) -> Result<Page<Company>> {
        self.companies.search(search, page).await
    }

    pub async fn ensure_company(&self, public_id: &str) -> Result<()> {
        ensure(self.companies.exists(public_id).await?, "company", public_id)
    }
}

fn ensure(exists: bool, entity: &str, public_id: &str) -> Result<()> {
    if exists {
        Ok(())
    } else {
        Err(Error::PermissionDenied(format!(
            "{} {} does not exist",
            entity, public_id
        )))
    }
}
