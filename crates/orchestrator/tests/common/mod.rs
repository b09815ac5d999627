#![allow(dead_code)]

//! Scripted stand-in for the remote generation service.
//!
//! Each endpoint pops its next scripted response; an unscripted status
//! query panics so tests catch extra polls, while unscripted details
//! queries answer "no result yet" and unscripted uploads succeed with a
//! URL derived from the path.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use stylepanel_client::api::ApiError;
use stylepanel_client::service::GenerationService;
use stylepanel_client::wire::{DetailsData, StatusData, SubmitData};
use stylepanel_core::params::SubmissionParams;

pub struct FakeService {
    authenticated: bool,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    status_script: VecDeque<Result<StatusData, ApiError>>,
    details_script: VecDeque<Result<DetailsData, ApiError>>,
    upload_script: VecDeque<Result<String, ApiError>>,
    submitted: Vec<(SubmissionParams, String)>,
    status_calls: u32,
    cancel_calls: u32,
    jobs_created: u32,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            authenticated: true,
            state: Mutex::new(State::default()),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            state: Mutex::new(State::default()),
        }
    }

    fn transport_error() -> ApiError {
        ApiError::Http {
            status: 502,
            body: "bad gateway".into(),
        }
    }

    pub fn push_status(&self, code: i32, progress: i32) {
        self.state
            .lock()
            .unwrap()
            .status_script
            .push_back(Ok(StatusData {
                status: code,
                progress,
            }));
    }

    pub fn fail_status(&self) {
        self.state
            .lock()
            .unwrap()
            .status_script
            .push_back(Err(Self::transport_error()));
    }

    pub fn push_details(&self, result: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .details_script
            .push_back(Ok(DetailsData {
                result: result.map(str::to_string),
            }));
    }

    pub fn fail_details(&self) {
        self.state
            .lock()
            .unwrap()
            .details_script
            .push_back(Err(Self::transport_error()));
    }

    pub fn push_upload(&self, url: &str) {
        self.state
            .lock()
            .unwrap()
            .upload_script
            .push_back(Ok(url.to_string()));
    }

    pub fn fail_upload(&self) {
        self.state
            .lock()
            .unwrap()
            .upload_script
            .push_back(Err(Self::transport_error()));
    }

    pub fn status_calls(&self) -> u32 {
        self.state.lock().unwrap().status_calls
    }

    pub fn cancel_calls(&self) -> u32 {
        self.state.lock().unwrap().cancel_calls
    }

    pub fn submissions(&self) -> Vec<(SubmissionParams, String)> {
        self.state.lock().unwrap().submitted.clone()
    }
}

#[async_trait]
impl GenerationService for FakeService {
    fn authenticated(&self) -> bool {
        self.authenticated
    }

    async fn upload_asset(&self, path: &Path) -> Result<String, ApiError> {
        let scripted = self.state.lock().unwrap().upload_script.pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(format!(
                "https://cdn.test/{}",
                path.file_name().unwrap().to_string_lossy()
            )),
        }
    }

    async fn submit_job(
        &self,
        params: &SubmissionParams,
        request_id: &str,
    ) -> Result<SubmitData, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.jobs_created += 1;
        state
            .submitted
            .push((params.clone(), request_id.to_string()));
        Ok(SubmitData {
            job_id: format!("job-{}", state.jobs_created),
            flow_id: Some(format!("flow-{}", state.jobs_created)),
        })
    }

    async fn query_status(
        &self,
        job_id: &str,
        _flow_id: Option<&str>,
    ) -> Result<StatusData, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.status_calls += 1;
        state
            .status_script
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected status query for {job_id}"))
    }

    async fn task_details(&self, _job_id: &str) -> Result<DetailsData, ApiError> {
        let scripted = self.state.lock().unwrap().details_script.pop_front();
        scripted.unwrap_or(Ok(DetailsData { result: None }))
    }

    async fn cancel_job(&self, _job_id: &str) -> Result<(), ApiError> {
        self.state.lock().unwrap().cancel_calls += 1;
        Ok(())
    }
}
