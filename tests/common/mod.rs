//! Fakes and fixtures shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use docket_watch::clients::{CaseSearch, EmailError, Mailer, SearchError, SearchResponse};
use docket_watch::db::Store;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

pub async fn temp_store(prefix: &str) -> Store {
    let db_path =
        std::env::temp_dir().join(format!("docket-watch-{prefix}-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to open test database")
}

enum Reply {
    Sources(Vec<Map<String, Value>>),
    Fail,
}

/// Search double keyed by `(tribunal_alias, case_number)`. Unknown cases
/// return an empty hit list.
#[derive(Default)]
pub struct FakeSearch {
    replies: Mutex<HashMap<(String, String), Reply>>,
    calls: Mutex<usize>,
}

impl FakeSearch {
    pub fn respond(&self, alias: &str, number: &str, source: Value) {
        let source = source.as_object().cloned().expect("source must be an object");
        self.replies.lock().unwrap().insert(
            (alias.to_string(), number.to_string()),
            Reply::Sources(vec![source]),
        );
    }

    pub fn fail(&self, alias: &str, number: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert((alias.to_string(), number.to_string()), Reply::Fail);
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl CaseSearch for FakeSearch {
    async fn search(
        &self,
        tribunal_alias: &str,
        case_number: &str,
    ) -> Result<SearchResponse, SearchError> {
        *self.calls.lock().unwrap() += 1;
        let replies = self.replies.lock().unwrap();
        match replies.get(&(tribunal_alias.to_string(), case_number.to_string())) {
            Some(Reply::Sources(sources)) => Ok(SearchResponse::from_sources(sources.clone())),
            Some(Reply::Fail) => Err(SearchError::Status {
                status: 503,
                body: "unavailable".to_string(),
            }),
            None => Ok(SearchResponse::from_sources(Vec::new())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

type FailRule = Box<dyn Fn(&str, &str) -> bool + Send + Sync>;

/// Mailer double that records accepted messages and rejects those matching
/// the current fail rule.
#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<SentEmail>>,
    fail_rule: Mutex<Option<FailRule>>,
}

impl FakeMailer {
    pub fn fail_when(&self, rule: impl Fn(&str, &str) -> bool + Send + Sync + 'static) {
        *self.fail_rule.lock().unwrap() = Some(Box::new(rule));
    }

    pub fn succeed(&self) {
        *self.fail_rule.lock().unwrap() = None;
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_with_prefix(&self, prefix: &str) -> Vec<SentEmail> {
        self.sent()
            .into_iter()
            .filter(|m| m.subject.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        let rejected = self
            .fail_rule
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|rule| rule(to, subject));
        if rejected {
            return Err(EmailError::Rejected {
                status: 500,
                body: "rejected by test".to_string(),
            });
        }

        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}
