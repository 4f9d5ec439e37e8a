#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod commits;
pub mod config;
pub mod discovery;
pub mod github;
pub mod pull_requests;
pub mod rate_limit;
pub mod runner;
pub mod substitution;
pub mod summary;
pub mod templates;

pub use commits::{commit_change, commit_changes, CommitReport, WriteError};
pub use config::{
    is_valid_branch_name, load_config, resolve_token, ConfigError, TemplateFormats, UpdateConfig,
    WriteMode,
};
pub use discovery::{discover_repositories, discover_workflow_files, DiscoveryError};
pub use github::{
    ApiError, ContentEntry, EntryKind, FileContent, FileUpdate, GitHubApi, OctocrabClient,
    PullRequestDraft, PullRequestRef, RepositoryRef,
};
pub use pull_requests::{open_pull_request, PrError, PrStatus, UpdatePullRequest};
pub use rate_limit::{
    ensure_core_rate_limit, guard_core_rate_limit, wait_duration, wait_if_needed, RateLimitInfo,
};
pub use runner::{FileError, Runner, RunnerConfig, RunnerError};
pub use substitution::{
    decode_content, prepare_change, ChangeError, DecodeError, PendingChange, ReplacementRule, Substitution,
};
pub use summary::{ProcessingResult, RepositoryOutcome, RunSummary};
pub use templates::{
    branch_timestamp, create_handlebars_registry, generate_branch_suffix, TemplateError,
    TemplateRenderer,
};
