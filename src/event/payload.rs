use serde::Deserialize;
use std::fmt;

use crate::{
    event::EventType,
    render::{SUMMARY_LEN, truncate},
};

/// Number of characters of a commit hash shown in the feed.
pub const SHORT_SHA_LEN: usize = 8;

/// The decoded payload of an event. Each variant only carries the fields the
/// API sends for that event type.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    CommitComment(CommitCommentPayload),
    Create(CreatePayload),
    Delete(DeletePayload),
    Fork(ForkPayload),
    Gollum(GollumPayload),
    IssueComment(IssueCommentPayload),
    Issues(IssuesPayload),
    Member(MemberPayload),
    Public,
    PullRequest(PullRequestPayload),
    PullRequestReview(PullRequestReviewPayload),
    PullRequestReviewComment(PullRequestReviewCommentPayload),
    PullRequestReviewThread(PullRequestReviewThreadPayload),
    Push(PushPayload),
    Release(ReleasePayload),
    Sponsorship,
    Watch,
}

impl Payload {
    pub fn event_type(&self) -> EventType {
        match self {
            Payload::CommitComment(_) => EventType::CommitComment,
            Payload::Create(_) => EventType::Create,
            Payload::Delete(_) => EventType::Delete,
            Payload::Fork(_) => EventType::Fork,
            Payload::Gollum(_) => EventType::Gollum,
            Payload::IssueComment(_) => EventType::IssueComment,
            Payload::Issues(_) => EventType::Issues,
            Payload::Member(_) => EventType::Member,
            Payload::Public => EventType::Public,
            Payload::PullRequest(_) => EventType::PullRequest,
            Payload::PullRequestReview(_) => EventType::PullRequestReview,
            Payload::PullRequestReviewComment(_) => EventType::PullRequestReviewComment,
            Payload::PullRequestReviewThread(_) => EventType::PullRequestReviewThread,
            Payload::Push(_) => EventType::Push,
            Payload::Release(_) => EventType::Release,
            Payload::Sponsorship => EventType::Sponsorship,
            Payload::Watch => EventType::Watch,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CommitCommentPayload {
    pub comment: Comment,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CreatePayload {
    /// Null when a whole repository was created.
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
    pub ref_type: RefType,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DeletePayload {
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub ref_type: RefType,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ForkPayload {
    pub forkee: ForkTarget,
}

/// Wiki pages touched in one go.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GollumPayload {
    #[serde(default)]
    pub pages: Vec<WikiPage>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IssueCommentPayload {
    pub action: Action,
    pub issue: Issue,
    pub comment: Comment,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IssuesPayload {
    pub action: Action,
    pub issue: Issue,
    /// Only sent for `assigned` and `unassigned`.
    #[serde(default)]
    pub assignee: Option<User>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct MemberPayload {
    pub action: Action,
    pub member: User,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PullRequestPayload {
    pub action: Action,
    pub pull_request: PullRequest,
    /// Only sent for `dequeued`.
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PullRequestReviewPayload {
    pub action: Action,
    pub pull_request: PullRequest,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PullRequestReviewCommentPayload {
    pub action: Action,
    pub pull_request: PullRequest,
    pub comment: Comment,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PullRequestReviewThreadPayload {
    pub action: Action,
    pub pull_request: PullRequest,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PushPayload {
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl PushPayload {
    /// Number of commits in the push. Newer feeds may omit `size`, in which
    /// case the listed commits are counted instead.
    pub fn commit_count(&self) -> u64 {
        self.size.unwrap_or(self.commits.len() as u64)
    }

    /// Commits that are new to the repository, in push order.
    pub fn distinct_commits(&self) -> impl Iterator<Item = &Commit> {
        self.commits.iter().filter(|commit| commit.distinct)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ReleasePayload {
    pub action: Action,
    pub release: Release,
}

/// What happened to the subject of an event.
///
/// Values the API may add later are kept verbatim in [`Action::Other`].
#[derive(Debug, Deserialize, Clone, PartialEq, Eq, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Added,
    Assigned,
    Closed,
    Created,
    Deleted,
    Dequeued,
    Edited,
    Labeled,
    Opened,
    Published,
    Reopened,
    Resolved,
    ReviewRequested,
    ReviewRequestRemoved,
    #[serde(alias = "synchronized")]
    Synchronize,
    Unassigned,
    Unlabeled,
    Unresolved,
    #[serde(untagged)]
    Other(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ReviewRequested => f.write_str("requested review"),
            Action::ReviewRequestRemoved => f.write_str("removed review request"),
            Action::Synchronize => f.write_str("synchronized"),
            Action::Other(raw) => f.write_str(raw),
            known => f.write_str(known.as_ref()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RefType {
    Branch,
    Tag,
    Repository,
}

/// A comment on a commit, issue or pull request.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Comment {
    #[serde(default)]
    pub body: String,
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate(&self.body, SUMMARY_LEN))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
}

impl fmt::Display for PullRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PR #{}: '{}'", self.number, truncate(&self.title, SUMMARY_LEN))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Issue #{}: '{}'", self.number, truncate(&self.title, SUMMARY_LEN))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub message: String,
    pub author: Author,
    /// False when the commit was already present in the repository. Only
    /// commits flagged as distinct are listed in the feed.
    #[serde(default)]
    pub distinct: bool,
}

impl Commit {
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(SHORT_SHA_LEN) {
            Some((ix, _)) => &self.sha[..ix],
            None => &self.sha,
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commit {} ({}): '{}'",
            self.short_sha(),
            self.author,
            truncate(&self.message, SUMMARY_LEN)
        )
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct User {
    pub login: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.login)
    }
}

/// The repository created by a fork.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ForkTarget {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl fmt::Display for ForkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name.as_deref().unwrap_or(&self.name))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct WikiPage {
    pub page_name: String,
    pub action: Action,
    pub html_url: String,
}

impl fmt::Display for WikiPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            Action::Created => "Created",
            _ => "Edited",
        };
        write!(f, "{verb} page '{}' @ '{}'", self.page_name, self.html_url)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tag_name: String,
}

impl Release {
    /// The release name, or its tag when the release was left unnamed.
    pub fn title(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&truncate(self.title(), SUMMARY_LEN))
    }
}
