//! In-memory GitHub used by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use workflow_pin_updater::{
    ApiError, ContentEntry, EntryKind, FileContent, FileUpdate, GitHubApi, PullRequestDraft,
    PullRequestRef, RateLimitInfo, RepositoryRef,
};

pub const ECS_V1: &str = "aws-actions/amazon-ecs-deploy-task-definition@v1";
pub const ECS_V2: &str = "aws-actions/amazon-ecs-deploy-task-definition@v2";

pub fn deploy_workflow(action: &str) -> String {
    format!(
        "name: deploy\non: push\njobs:\n  deploy:\n    runs-on: ubuntu-latest\n    steps:\n      \
         - uses: actions/checkout@v4\n      - name: Deploy\n        uses: {action}\n        \
         with:\n          cluster: prod\n"
    )
}

/// A write or branch operation observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    UpdateFile { repo: String, update: FileUpdate },
    CreateBranch { repo: String, branch: String, sha: String },
    CreatePullRequest { repo: String, draft: PullRequestDraft },
}

#[derive(Debug, Clone)]
struct StoredFile {
    content: String,
    sha: String,
}

#[derive(Default)]
struct State {
    org_repos: Option<Result<Vec<RepositoryRef>, u16>>,
    user_repos: Option<Result<Vec<RepositoryRef>, u16>>,
    // (repo full name, branch) -> path -> file
    files: HashMap<(String, String), BTreeMap<String, StoredFile>>,
    heads: HashMap<(String, String), String>,
    failing_directories: HashMap<(String, String), u16>,
    stale_files: HashSet<(String, String)>,
    // (repo full name, path) -> base64 payload served instead of the stored text
    raw_payloads: HashMap<(String, String), String>,
    rate_limit: Option<RateLimitInfo>,
    calls: Vec<Call>,
    next_sha: u64,
    next_pr: u64,
}

impl State {
    fn fresh_sha(&mut self) -> String {
        self.next_sha += 1;
        format!("{:040x}", self.next_sha)
    }
}

/// Cloneable handle to a shared in-memory GitHub.
#[derive(Clone, Default)]
pub struct FakeGitHub {
    state: Arc<Mutex<State>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org_repos(self, repos: Vec<RepositoryRef>) -> Self {
        self.state.lock().unwrap().org_repos = Some(Ok(repos));
        self
    }

    pub fn with_org_error(self, status: u16) -> Self {
        self.state.lock().unwrap().org_repos = Some(Err(status));
        self
    }

    pub fn with_user_repos(self, repos: Vec<RepositoryRef>) -> Self {
        self.state.lock().unwrap().user_repos = Some(Ok(repos));
        self
    }

    pub fn with_user_error(self, status: u16) -> Self {
        self.state.lock().unwrap().user_repos = Some(Err(status));
        self
    }

    pub fn with_file(self, repo: &str, branch: &str, path: &str, content: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let sha = state.fresh_sha();
            let head = state.fresh_sha();
            state
                .heads
                .entry((repo.to_string(), branch.to_string()))
                .or_insert(head);
            state
                .files
                .entry((repo.to_string(), branch.to_string()))
                .or_default()
                .insert(
                    path.to_string(),
                    StoredFile {
                        content: content.to_string(),
                        sha,
                    },
                );
        }
        self
    }

    pub fn with_branch(self, repo: &str, branch: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let head = state.fresh_sha();
            state
                .heads
                .entry((repo.to_string(), branch.to_string()))
                .or_insert(head);
        }
        self
    }

    pub fn with_failing_directory(self, repo: &str, path: &str, status: u16) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_directories
            .insert((repo.to_string(), path.to_string()), status);
        self
    }

    /// Every update of `path` in `repo` fails the SHA precondition.
    pub fn with_stale_file(self, repo: &str, path: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .stale_files
            .insert((repo.to_string(), path.to_string()));
        self
    }

    /// Serves `bytes` as the payload of `path`, on every branch of `repo`.
    pub fn with_binary_payload(self, repo: &str, path: &str, bytes: &[u8]) -> Self {
        self.state
            .lock()
            .unwrap()
            .raw_payloads
            .insert((repo.to_string(), path.to_string()), STANDARD.encode(bytes));
        self
    }

    pub fn with_rate_limit(self, info: RateLimitInfo) -> Self {
        self.state.lock().unwrap().rate_limit = Some(info);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn updates(&self) -> Vec<(String, FileUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::UpdateFile { repo, update } => Some((repo, update)),
                _ => None,
            })
            .collect()
    }

    pub fn file_content(&self, repo: &str, branch: &str, path: &str) -> Option<String> {
        self.stored(repo, branch, path).map(|f| f.content)
    }

    pub fn file_sha(&self, repo: &str, branch: &str, path: &str) -> Option<String> {
        self.stored(repo, branch, path).map(|f| f.sha)
    }

    pub fn head(&self, repo: &str, branch: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .heads
            .get(&(repo.to_string(), branch.to_string()))
            .cloned()
    }

    pub fn branches(&self, repo: &str) -> Vec<String> {
        let state = self.state.lock().unwrap();
        let mut branches: Vec<_> = state
            .heads
            .keys()
            .filter(|(r, _)| r == repo)
            .map(|(_, b)| b.clone())
            .collect();
        branches.sort();
        branches
    }

    fn stored(&self, repo: &str, branch: &str, path: &str) -> Option<StoredFile> {
        self.state
            .lock()
            .unwrap()
            .files
            .get(&(repo.to_string(), branch.to_string()))
            .and_then(|files| files.get(path))
            .cloned()
    }
}

fn error(status: u16, message: &str) -> ApiError {
    ApiError::from_status(status, message.to_string())
}

/// Wraps base64 at 60 columns the way the contents API does.
fn wrapped_base64(content: &str) -> String {
    let encoded = STANDARD.encode(content);
    encoded
        .as_bytes()
        .chunks(60)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn list_org_repositories(&self, _org: &str) -> Result<Vec<RepositoryRef>, ApiError> {
        match self.state.lock().unwrap().org_repos.clone() {
            Some(Ok(repos)) => Ok(repos),
            Some(Err(status)) => Err(error(status, "organization listing failed")),
            None => Err(error(404, "Not Found")),
        }
    }

    async fn list_user_repositories(&self) -> Result<Vec<RepositoryRef>, ApiError> {
        match self.state.lock().unwrap().user_repos.clone() {
            Some(Ok(repos)) => Ok(repos),
            Some(Err(status)) => Err(error(status, "user listing failed")),
            None => Ok(Vec::new()),
        }
    }

    async fn list_directory(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: &str,
    ) -> Result<Vec<ContentEntry>, ApiError> {
        let state = self.state.lock().unwrap();
        let repo = repository.full_name.clone();

        if let Some(status) = state.failing_directories.get(&(repo.clone(), path.to_string())) {
            return Err(error(*status, "listing failed"));
        }

        let Some(files) = state.files.get(&(repo, reference.to_string())) else {
            return Err(error(404, "Not Found"));
        };

        if files.contains_key(path) {
            return Ok(vec![ContentEntry {
                path: path.to_string(),
                kind: EntryKind::File,
            }]);
        }

        let prefix = format!("{}/", path.trim_end_matches('/'));
        let mut entries = Vec::new();
        let mut directories = HashSet::new();
        for file_path in files.keys() {
            let Some(rest) = file_path.strip_prefix(&prefix) else {
                continue;
            };
            match rest.split_once('/') {
                Some((directory, _)) => {
                    if directories.insert(directory.to_string()) {
                        entries.push(ContentEntry {
                            path: format!("{prefix}{directory}"),
                            kind: EntryKind::Dir,
                        });
                    }
                }
                None => entries.push(ContentEntry {
                    path: file_path.clone(),
                    kind: EntryKind::File,
                }),
            }
        }

        if entries.is_empty() {
            return Err(error(404, "Not Found"));
        }
        Ok(entries)
    }

    async fn get_file(
        &self,
        repository: &RepositoryRef,
        path: &str,
        reference: &str,
    ) -> Result<FileContent, ApiError> {
        let file = self
            .stored(&repository.full_name, reference, path)
            .ok_or_else(|| error(404, "Not Found"))?;
        let payload = self
            .state
            .lock()
            .unwrap()
            .raw_payloads
            .get(&(repository.full_name.clone(), path.to_string()))
            .cloned()
            .unwrap_or_else(|| wrapped_base64(&file.content));

        Ok(FileContent {
            path: path.to_string(),
            sha: file.sha,
            encoding: Some("base64".to_string()),
            payload,
        })
    }

    async fn update_file(
        &self,
        repository: &RepositoryRef,
        update: &FileUpdate,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let repo = repository.full_name.clone();
        state.calls.push(Call::UpdateFile {
            repo: repo.clone(),
            update: update.clone(),
        });

        if state.stale_files.contains(&(repo.clone(), update.path.clone())) {
            return Err(error(409, "sha does not match"));
        }

        let new_sha = state.fresh_sha();
        let new_head = state.fresh_sha();
        let key = (repo, update.branch.clone());
        let files = state
            .files
            .get_mut(&key)
            .ok_or_else(|| error(404, "Branch not found"))?;
        let file = files
            .get_mut(&update.path)
            .ok_or_else(|| error(404, "Not Found"))?;
        if file.sha != update.sha {
            return Err(error(409, "sha does not match"));
        }

        file.content = update.content.clone();
        file.sha = new_sha;
        state.heads.insert(key, new_head);
        Ok(())
    }

    async fn branch_head(
        &self,
        repository: &RepositoryRef,
        branch: &str,
    ) -> Result<String, ApiError> {
        self.head(&repository.full_name, branch)
            .ok_or_else(|| error(404, "Not Found"))
    }

    async fn create_branch(
        &self,
        repository: &RepositoryRef,
        branch: &str,
        sha: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        let repo = repository.full_name.clone();
        state.calls.push(Call::CreateBranch {
            repo: repo.clone(),
            branch: branch.to_string(),
            sha: sha.to_string(),
        });

        if state.heads.contains_key(&(repo.clone(), branch.to_string())) {
            return Err(error(422, "Reference already exists"));
        }

        let source = state
            .heads
            .iter()
            .find(|((r, _), head)| *r == repo && head.as_str() == sha)
            .map(|((_, b), _)| b.clone())
            .ok_or_else(|| error(422, "Object does not exist"))?;

        let files = state
            .files
            .get(&(repo.clone(), source))
            .cloned()
            .unwrap_or_default();
        state.files.insert((repo.clone(), branch.to_string()), files);
        state
            .heads
            .insert((repo, branch.to_string()), sha.to_string());
        Ok(())
    }

    async fn create_pull_request(
        &self,
        repository: &RepositoryRef,
        draft: &PullRequestDraft,
    ) -> Result<PullRequestRef, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::CreatePullRequest {
            repo: repository.full_name.clone(),
            draft: draft.clone(),
        });

        state.next_pr += 1;
        let number = state.next_pr;
        Ok(PullRequestRef {
            number,
            url: format!("https://github.com/{}/pull/{number}", repository.full_name),
        })
    }

    async fn core_rate_limit(&self) -> Result<RateLimitInfo, ApiError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .rate_limit
            .clone()
            .unwrap_or(RateLimitInfo {
                remaining: 5000,
                reset: 0,
                limit: 5000,
            }))
    }
}
