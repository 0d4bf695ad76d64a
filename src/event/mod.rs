mod payload;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::str::FromStr;

use crate::render::RenderError;

pub use payload::{Action, Payload, RefType};

/// The repository an event happened in.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Repo {
    pub name: String,
}

/// One record of a user's activity feed, as received from the API.
///
/// The payload stays untyped until the record is rendered, because its shape
/// depends entirely on `event_type`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EventRecord {
    #[serde(rename = "type")]
    pub event_type: String,
    pub repo: Repo,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Every event type the renderer knows about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::AsRefStr,
    strum::Display,
    strum::EnumIter,
)]
pub enum EventType {
    #[strum(serialize = "CommitCommentEvent")]
    CommitComment,
    #[strum(serialize = "CreateEvent")]
    Create,
    #[strum(serialize = "DeleteEvent")]
    Delete,
    #[strum(serialize = "ForkEvent")]
    Fork,
    #[strum(serialize = "GollumEvent")]
    Gollum,
    #[strum(serialize = "IssueCommentEvent")]
    IssueComment,
    #[strum(serialize = "IssuesEvent")]
    Issues,
    #[strum(serialize = "MemberEvent")]
    Member,
    #[strum(serialize = "PublicEvent")]
    Public,
    #[strum(serialize = "PullRequestEvent")]
    PullRequest,
    #[strum(serialize = "PullRequestReviewEvent")]
    PullRequestReview,
    #[strum(serialize = "PullRequestReviewCommentEvent")]
    PullRequestReviewComment,
    #[strum(serialize = "PullRequestReviewThreadEvent")]
    PullRequestReviewThread,
    #[strum(serialize = "PushEvent")]
    Push,
    #[strum(serialize = "ReleaseEvent")]
    Release,
    #[strum(serialize = "SponsorshipEvent")]
    Sponsorship,
    #[strum(serialize = "WatchEvent")]
    Watch,
}

/// A record whose payload has been decoded according to its type.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub repo: Repo,
    pub payload: Payload,
}

impl Event {
    pub fn event_type(&self) -> EventType {
        self.payload.event_type()
    }
}

impl TryFrom<&EventRecord> for Event {
    type Error = RenderError;

    fn try_from(record: &EventRecord) -> Result<Self, Self::Error> {
        let event_type = EventType::from_str(&record.event_type)
            .map_err(|_| RenderError::UnknownEventType(record.event_type.clone()))?;
        let raw = &record.payload;

        let payload = match event_type {
            EventType::CommitComment => Payload::CommitComment(decode(event_type, raw)?),
            EventType::Create => Payload::Create(decode(event_type, raw)?),
            EventType::Delete => Payload::Delete(decode(event_type, raw)?),
            EventType::Fork => Payload::Fork(decode(event_type, raw)?),
            EventType::Gollum => Payload::Gollum(decode(event_type, raw)?),
            EventType::IssueComment => Payload::IssueComment(decode(event_type, raw)?),
            EventType::Issues => Payload::Issues(decode(event_type, raw)?),
            EventType::Member => Payload::Member(decode(event_type, raw)?),
            EventType::Public => Payload::Public,
            EventType::PullRequest => Payload::PullRequest(decode(event_type, raw)?),
            EventType::PullRequestReview => Payload::PullRequestReview(decode(event_type, raw)?),
            EventType::PullRequestReviewComment => {
                Payload::PullRequestReviewComment(decode(event_type, raw)?)
            }
            EventType::PullRequestReviewThread => {
                Payload::PullRequestReviewThread(decode(event_type, raw)?)
            }
            EventType::Push => Payload::Push(decode(event_type, raw)?),
            EventType::Release => Payload::Release(decode(event_type, raw)?),
            EventType::Sponsorship => Payload::Sponsorship,
            EventType::Watch => Payload::Watch,
        };

        Ok(Event {
            repo: record.repo.clone(),
            payload,
        })
    }
}

fn decode<T: DeserializeOwned>(
    event_type: EventType,
    raw: &serde_json::Value,
) -> Result<T, RenderError> {
    T::deserialize(raw).map_err(|source| RenderError::MalformedPayload { event_type, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn record(event_type: &str, payload: serde_json::Value) -> EventRecord {
        EventRecord {
            event_type: event_type.to_string(),
            repo: Repo {
                name: "acme/widgets".to_string(),
            },
            payload,
        }
    }

    #[test]
    fn test_event_type_wire_names() {
        for event_type in EventType::iter() {
            let wire = event_type.as_ref();
            assert!(wire.ends_with("Event"), "{wire}");
            assert_eq!(EventType::from_str(wire).unwrap(), event_type);
        }
        assert_eq!(EventType::iter().count(), 17);
        assert!(EventType::from_str("DiscussionEvent").is_err());
    }

    #[test]
    fn test_record_from_api_json() {
        let json = serde_json::json!([{
            "id": "1234",
            "type": "WatchEvent",
            "actor": { "login": "alice" },
            "repo": { "id": 1, "name": "acme/widgets", "url": "https://api.github.com/repos/acme/widgets" },
            "payload": { "action": "started" },
            "public": true
        }]);
        let records: Vec<EventRecord> = serde_json::from_value(json).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].event_type, "WatchEvent");
        assert_eq!(records[0].repo.name, "acme/widgets");

        let event = Event::try_from(&records[0]).unwrap();
        assert_eq!(event.event_type(), EventType::Watch);
        assert_eq!(event.payload, Payload::Watch);
    }

    #[test]
    fn test_decode_push_payload() {
        let raw = record(
            "PushEvent",
            serde_json::json!({
                "ref": "refs/heads/main",
                "size": 2,
                "commits": [
                    {
                        "sha": "0123456789abcdef",
                        "message": "Fix things",
                        "author": { "name": "Alice", "email": "alice@example.com" },
                        "distinct": true
                    },
                    {
                        "sha": "fedcba9876543210",
                        "message": "Merge branch",
                        "author": { "name": "Bob", "email": "bob@example.com" },
                        "distinct": false
                    }
                ]
            }),
        );
        let Payload::Push(push) = Event::try_from(&raw).unwrap().payload else {
            panic!("expected a push payload");
        };
        assert_eq!(push.commit_count(), 2);
        assert_eq!(push.commits[0].author.name, "Alice");
        assert!(!push.commits[1].distinct);
    }

    #[test]
    fn test_push_count_falls_back_to_commit_list() {
        let raw = record(
            "PushEvent",
            serde_json::json!({
                "commits": [{
                    "sha": "0123456789abcdef",
                    "message": "Fix things",
                    "author": { "name": "Alice", "email": "alice@example.com" }
                }]
            }),
        );
        let Payload::Push(push) = Event::try_from(&raw).unwrap().payload else {
            panic!("expected a push payload");
        };
        assert_eq!(push.commit_count(), 1);
        assert!(!push.commits[0].distinct);
        assert_eq!(push.distinct_commits().count(), 0);
    }

    #[test]
    fn test_decode_actions() {
        let raw = record(
            "PullRequestEvent",
            serde_json::json!({
                "action": "review_requested",
                "number": 7,
                "pull_request": { "number": 7, "title": "Add widgets" }
            }),
        );
        let Payload::PullRequest(pr) = Event::try_from(&raw).unwrap().payload else {
            panic!("expected a pull request payload");
        };
        assert_eq!(pr.action, Action::ReviewRequested);
        assert_eq!(pr.reason, None);

        let action: Action = serde_json::from_value(serde_json::json!("synchronized")).unwrap();
        assert_eq!(action, Action::Synchronize);
        let action: Action = serde_json::from_value(serde_json::json!("merged")).unwrap();
        assert_eq!(action, Action::Other("merged".to_string()));
    }

    #[test]
    fn test_create_repository_has_no_ref() {
        let raw = record(
            "CreateEvent",
            serde_json::json!({ "ref": null, "ref_type": "repository", "master_branch": "main" }),
        );
        let Payload::Create(create) = Event::try_from(&raw).unwrap().payload else {
            panic!("expected a create payload");
        };
        assert_eq!(create.ref_type, RefType::Repository);
        assert_eq!(create.git_ref, None);
    }

    #[test]
    fn test_unknown_event_type() {
        let raw = record("DiscussionEvent", serde_json::json!({}));
        match Event::try_from(&raw) {
            Err(RenderError::UnknownEventType(tag)) => assert_eq!(tag, "DiscussionEvent"),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload() {
        let raw = record("ForkEvent", serde_json::json!({ "forkee": 42 }));
        match Event::try_from(&raw) {
            Err(RenderError::MalformedPayload { event_type, .. }) => {
                assert_eq!(event_type, EventType::Fork)
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
