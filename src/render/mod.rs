mod truncate;

use tracing::debug;

use crate::event::{Action, Event, EventRecord, EventType, Payload, RefType};

pub use truncate::{SUMMARY_LEN, truncate};

/// Closes the last item of a bulleted list, which carries its own punctuation.
pub const LIST_END: &str = ". ";

/// Separates the items of a bulleted list.
const LIST_SEPARATOR: &str = "; \n";

/// Error type for rendering a single feed record.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unknown event type: '{0}'")]
    UnknownEventType(String),

    #[error("Malformed {event_type} payload: {source}")]
    MalformedPayload {
        event_type: EventType,
        source: serde_json::Error,
    },
}

/// Decodes a raw record and renders it as a single summary.
pub fn render_record(record: &EventRecord) -> Result<String, RenderError> {
    let event = Event::try_from(record)?;
    debug!("Rendering {}", event.event_type());
    Ok(render(&event))
}

/// Renders an event as one summary.
///
/// Summaries may span several lines; continuation lines are indented or
/// prefixed with a connector so they read as part of the same entry. Only
/// bulleted lists end with punctuation of their own ([`LIST_END`]).
pub fn render(event: &Event) -> String {
    let repo = &event.repo.name;
    match &event.payload {
        Payload::CommitComment(p) => {
            format!("commented on a commit on repo {repo}:\n  '{}'", p.comment)
        }
        Payload::Create(p) => match (&p.git_ref, p.ref_type) {
            (Some(git_ref), ref_type) if ref_type != RefType::Repository => {
                format!("created a new {ref_type} '{git_ref}' on '{repo}'")
            }
            (_, ref_type) => format!("created a new {ref_type} '{repo}'"),
        },
        Payload::Delete(p) => format!("deleted the '{}' {}", p.git_ref, p.ref_type),
        Payload::Fork(p) => format!("forked the '{}' repo", p.forkee),
        Payload::Gollum(p) => {
            let header = if p.pages.len() == 1 {
                "interacted with the following page:"
            } else {
                "interacted with the following pages:"
            };
            let pages: Vec<String> = p.pages.iter().map(|page| format!("• {page}")).collect();
            if pages.is_empty() {
                header.to_string()
            } else {
                format!("{header}\n{}{LIST_END}", pages.join(LIST_SEPARATOR))
            }
        }
        Payload::IssueComment(p) => format!(
            "{} comment under {} on repo '{repo}':\n  '{}'",
            p.action, p.issue, p.comment
        ),
        Payload::Issues(p) => {
            let detail = match (&p.action, &p.assignee) {
                (Action::Labeled | Action::Unlabeled, _) => "label from ".to_string(),
                (Action::Assigned | Action::Unassigned, Some(assignee)) => {
                    format!("user {assignee} from ")
                }
                _ => String::new(),
            };
            format!("{} {detail}{}", p.action, p.issue)
        }
        Payload::Member(p) => match p.action {
            Action::Assigned | Action::Added => {
                format!("Assigned user '{}' to repo '{repo}'", p.member)
            }
            _ => format!("Edited user '{}''s permissions on repo '{repo}'", p.member),
        },
        Payload::Public => format!("Made repo '{repo}' public"),
        Payload::PullRequest(p) => {
            let mut line = format!("{} {} in repo '{repo}'", p.action, p.pull_request);
            if p.action == Action::Dequeued {
                let reason = p.reason.as_deref().unwrap_or_default();
                line.push_str(&format!("\n  reason: '{}'", truncate(reason, SUMMARY_LEN)));
            }
            line
        }
        Payload::PullRequestReview(p) => {
            format!("{} review under {}", p.action, p.pull_request)
        }
        Payload::PullRequestReviewComment(p) => format!(
            "{} review comment under {}:\n  '{}'",
            p.action, p.pull_request, p.comment
        ),
        Payload::PullRequestReviewThread(p) => {
            format!("marked review thread under {} as {}", p.pull_request, p.action)
        }
        Payload::Push(p) => {
            let commits: Vec<_> = p.distinct_commits().collect();
            let mut header = match p.commit_count() {
                1 => format!("pushed 1 commit to repo '{repo}'"),
                n => format!("pushed {n} commits to repo '{repo}'"),
            };
            // The colon introduces the commit tree, so it goes when nothing follows.
            if !commits.is_empty() {
                header.push(':');
            }
            let mut lines = vec![header];
            for (ix, commit) in commits.iter().enumerate() {
                let connector = if ix + 1 == commits.len() { "└─" } else { "├─" };
                lines.push(format!("{connector} {commit}"));
            }
            lines.join("\n")
        }
        Payload::Release(p) => format!("{} release '{}'", p.action, p.release),
        Payload::Sponsorship => format!("something related to the sponsors of repo '{repo}'"),
        Payload::Watch => format!("starred repo '{repo}'"),
    }
}
