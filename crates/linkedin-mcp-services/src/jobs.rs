//! Job search and job details.

use std::sync::Arc;

use linkedin_mcp_core::{Envelope, Failure, JobPayload, JobSearchParams, JobsPayload};
use linkedin_mcp_session::Session;

use crate::finish;

#[derive(Clone)]
pub struct JobsService {
    session: Arc<Session>,
}

impl JobsService {
    #[must_use]
    pub const fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Search job postings.
    ///
    /// The parameters sent to the remote are echoed back as `search_params`;
    /// `location` only appears there when one was given.
    pub async fn search_jobs(
        &self,
        keywords: &str,
        location: Option<&str>,
        limit: u32,
    ) -> Envelope<JobsPayload> {
        let params = JobSearchParams::new(keywords, location.map(ToString::to_string), limit);
        finish("searching jobs", self.search(params).await)
    }

    /// Fetch one job posting by id.
    pub async fn get_job_details(&self, job_id: &str) -> Envelope<JobPayload> {
        finish("retrieving job details", self.details(job_id).await)
    }

    async fn search(&self, params: JobSearchParams) -> Result<JobsPayload, Failure> {
        let client = self.session.client().await?;
        let jobs = client.search_jobs(&params).await?;
        Ok(JobsPayload::new(jobs, params))
    }

    async fn details(&self, job_id: &str) -> Result<JobPayload, Failure> {
        let client = self.session.client().await?;
        let job = client.get_job(job_id).await?;
        Ok(JobPayload::new(job))
    }
}
