// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Mock ClientApi implementation for testing
//!
//! Simulates the investigation backend without network calls. Snapshot
//! streams are scripted per investigation id, submissions can be made
//! to fail or omit the identifier, and fetches are counted so tests
//! can assert that polling stopped.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use oc_api_contract::*;
use oc_client_api::{ClientApi, ClientApiError, ClientApiResult};
use tokio::sync::Mutex;

/// One scripted response to `get_investigation`
#[derive(Debug, Clone)]
pub enum ScriptedPoll {
    /// Return this snapshot
    Snapshot(Investigation),
    /// Fail this fetch with a transport error
    FetchFailure,
}

/// How scripted submissions behave
#[derive(Debug, Clone)]
enum SubmitBehavior {
    /// Assign the next id and answer `{ investigation_id, status }`
    Accept,
    /// Answer 200 with a body lacking `investigation_id`
    OmitId,
    /// Answer with a server error
    Reject { status: u16, detail: Option<String> },
}

#[derive(Default)]
struct MockState {
    repositories: Vec<Repository>,
    documents: HashMap<i64, Vec<DocumentUpload>>,
    scripts: HashMap<i64, VecDeque<ScriptedPoll>>,
    last_snapshot: HashMap<i64, Investigation>,
    fetch_counts: HashMap<i64, usize>,
    submissions: Vec<InvestigationRequest>,
    next_id: i64,
}

/// Mock backend client with scripted behavior
#[derive(Clone)]
pub struct MockClient {
    state: Arc<Mutex<MockState>>,
    submit_behavior: SubmitBehavior,
    /// Artificial latency per fetch, for cancellation tests
    fetch_delay: Option<Duration>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                next_id: 1,
                ..MockState::default()
            })),
            submit_behavior: SubmitBehavior::Accept,
            fetch_delay: None,
        }
    }

    /// Make every fetch take the given time before resolving
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    /// Make submissions answer without an `investigation_id`
    pub fn with_missing_investigation_id(mut self) -> Self {
        self.submit_behavior = SubmitBehavior::OmitId;
        self
    }

    /// Make submissions fail with the given status and optional detail
    pub fn with_failing_submission(mut self, status: u16, detail: Option<&str>) -> Self {
        self.submit_behavior = SubmitBehavior::Reject {
            status,
            detail: detail.map(str::to_string),
        };
        self
    }

    /// Script the snapshot stream for an investigation id.
    ///
    /// Once the script is exhausted the last returned snapshot repeats,
    /// mirroring a backend whose state stopped changing.
    pub async fn script_investigation(&self, investigation_id: i64, polls: Vec<ScriptedPoll>) {
        let mut state = self.state.lock().await;
        state.scripts.insert(investigation_id, polls.into());
    }

    /// Seed a registered repository
    pub async fn seed_repository(&self, owner: &str, name: &str) -> Repository {
        let mut state = self.state.lock().await;
        let id = state.next_id;
        state.next_id += 1;
        let repo = Repository {
            id,
            owner: owner.to_string(),
            name: name.to_string(),
            default_branch: "main".to_string(),
            railway_project_name: None,
            created_at: Some(Utc::now()),
        };
        state.repositories.push(repo.clone());
        repo
    }

    /// Number of `get_investigation` calls issued for an id
    pub async fn fetch_count(&self, investigation_id: i64) -> usize {
        self.state.lock().await.fetch_counts.get(&investigation_id).copied().unwrap_or(0)
    }

    /// Submissions received, in order
    pub async fn submissions(&self) -> Vec<InvestigationRequest> {
        self.state.lock().await.submissions.clone()
    }

    /// Build a snapshot for scripting
    pub fn snapshot(
        investigation_id: i64,
        status: InvestigationStatus,
        root_cause: Option<&str>,
    ) -> Investigation {
        Investigation {
            id: investigation_id,
            status,
            error_message: "Deployment failed: simulated incident".to_string(),
            root_cause: root_cause.map(str::to_string),
            suggested_fix: None,
            created_at: Some(Utc::now()),
            completed_at: status.is_terminal().then(Utc::now),
        }
    }

    async fn delay(&self) {
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ClientApi for MockClient {
    async fn list_repositories(&self) -> ClientApiResult<Vec<Repository>> {
        self.delay().await;
        Ok(self.state.lock().await.repositories.clone())
    }

    async fn create_repository(
        &self,
        request: &CreateRepositoryRequest,
    ) -> ClientApiResult<Repository> {
        self.delay().await;
        let mut state = self.state.lock().await;

        // The backend is get-or-create on owner/name
        if let Some(existing) = state
            .repositories
            .iter()
            .find(|r| r.owner == request.owner && r.name == request.name)
        {
            return Ok(existing.clone());
        }

        let id = state.next_id;
        state.next_id += 1;
        let repo = Repository {
            id,
            owner: request.owner.clone(),
            name: request.name.clone(),
            default_branch: request.default_branch.clone(),
            railway_project_name: request.railway_project_name.clone(),
            created_at: Some(Utc::now()),
        };
        state.repositories.push(repo.clone());
        Ok(repo)
    }

    async fn get_repository(&self, repository_id: i64) -> ClientApiResult<Repository> {
        self.delay().await;
        self.state
            .lock()
            .await
            .repositories
            .iter()
            .find(|r| r.id == repository_id)
            .cloned()
            .ok_or_else(|| ClientApiError::server(404, Some("Repository not found".to_string())))
    }

    async fn upload_document(
        &self,
        repository_id: i64,
        filename: &str,
        _content: Vec<u8>,
    ) -> ClientApiResult<DocumentUpload> {
        self.delay().await;
        let mut state = self.state.lock().await;
        if !state.repositories.iter().any(|r| r.id == repository_id) {
            return Err(ClientApiError::server(404, Some("Repository not found".to_string())));
        }
        let id = state.next_id;
        state.next_id += 1;
        let doc = DocumentUpload {
            id,
            filename: filename.to_string(),
            file_type: filename.rsplit('.').next().map(str::to_string),
            uploaded_at: Some(Utc::now()),
        };
        state.documents.entry(repository_id).or_default().push(doc.clone());
        Ok(doc)
    }

    async fn list_documents(&self, repository_id: i64) -> ClientApiResult<Vec<DocumentUpload>> {
        self.delay().await;
        Ok(self
            .state
            .lock()
            .await
            .documents
            .get(&repository_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn start_investigation(
        &self,
        request: &InvestigationRequest,
    ) -> ClientApiResult<StartInvestigationResponse> {
        self.delay().await;
        let mut state = self.state.lock().await;
        state.submissions.push(request.clone());

        match &self.submit_behavior {
            SubmitBehavior::Accept => {
                let id = state.next_id;
                state.next_id += 1;
                Ok(StartInvestigationResponse {
                    investigation_id: Some(id),
                    status: Some(InvestigationStatus::Investigating),
                })
            }
            SubmitBehavior::OmitId => Ok(StartInvestigationResponse {
                investigation_id: None,
                status: Some(InvestigationStatus::Investigating),
            }),
            SubmitBehavior::Reject { status, detail } => {
                Err(ClientApiError::server(*status, detail.clone()))
            }
        }
    }

    async fn list_investigations(&self) -> ClientApiResult<Vec<InvestigationSummary>> {
        self.delay().await;
        let state = self.state.lock().await;
        Ok(state
            .last_snapshot
            .values()
            .map(|inv| InvestigationSummary {
                id: inv.id,
                status: inv.status,
                error_message: inv.error_message.clone(),
                repository_id: None,
                created_at: inv.created_at,
                completed_at: inv.completed_at,
            })
            .collect())
    }

    async fn get_investigation(&self, investigation_id: i64) -> ClientApiResult<Investigation> {
        // Count the fetch up front so a request cancelled mid-flight is
        // still visible to assertions.
        {
            let mut state = self.state.lock().await;
            *state.fetch_counts.entry(investigation_id).or_insert(0) += 1;
        }
        self.delay().await;
        let mut state = self.state.lock().await;

        let next = state.scripts.get_mut(&investigation_id).and_then(VecDeque::pop_front);
        match next {
            Some(ScriptedPoll::Snapshot(snapshot)) => {
                state.last_snapshot.insert(investigation_id, snapshot.clone());
                Ok(snapshot)
            }
            Some(ScriptedPoll::FetchFailure) => {
                Err(ClientApiError::Transport("injected fetch failure".to_string()))
            }
            None => state
                .last_snapshot
                .get(&investigation_id)
                .cloned()
                .ok_or_else(|| {
                    ClientApiError::server(404, Some("Investigation not found".to_string()))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_snapshots_are_served_in_order_then_repeat() {
        let mock = MockClient::new();
        mock.script_investigation(
            5,
            vec![
                ScriptedPoll::Snapshot(MockClient::snapshot(
                    5,
                    InvestigationStatus::Pending,
                    None,
                )),
                ScriptedPoll::Snapshot(MockClient::snapshot(
                    5,
                    InvestigationStatus::Completed,
                    Some("done"),
                )),
            ],
        )
        .await;

        assert_eq!(
            mock.get_investigation(5).await.unwrap().status,
            InvestigationStatus::Pending
        );
        assert_eq!(
            mock.get_investigation(5).await.unwrap().status,
            InvestigationStatus::Completed
        );
        // Script exhausted: last snapshot repeats
        assert_eq!(
            mock.get_investigation(5).await.unwrap().status,
            InvestigationStatus::Completed
        );
        assert_eq!(mock.fetch_count(5).await, 3);
    }

    #[tokio::test]
    async fn unknown_investigation_is_a_server_error() {
        let mock = MockClient::new();
        let err = mock.get_investigation(404).await.unwrap_err();
        assert!(matches!(err, ClientApiError::Server { status: 404, .. }));
    }

    #[tokio::test]
    async fn documents_attach_to_seeded_repository() {
        let mock = MockClient::new();
        let repo = mock.seed_repository("acme", "payments-api").await;

        let doc = mock
            .upload_document(repo.id, "runbook.md", b"# Runbook".to_vec())
            .await
            .unwrap();
        assert_eq!(doc.file_type.as_deref(), Some("md"));

        let docs = mock.list_documents(repo.id).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "runbook.md");

        // Unknown repository rejects the upload
        let err = mock.upload_document(999, "notes.md", Vec::new()).await.unwrap_err();
        assert!(matches!(err, ClientApiError::Server { status: 404, .. }));
    }

    #[tokio::test]
    async fn create_repository_is_get_or_create() {
        let mock = MockClient::new();
        let request = CreateRepositoryRequest {
            owner: "acme".to_string(),
            name: "api".to_string(),
            default_branch: "main".to_string(),
            railway_project_name: None,
        };
        let first = mock.create_repository(&request).await.unwrap();
        let second = mock.create_repository(&request).await.unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(mock.list_repositories().await.unwrap().len(), 1);
    }
}
