#![allow(dead_code)]

use async_trait::async_trait;
use checkout_kit::domain::payment::{ChargeRequest, GatewayResponse};
use checkout_kit::domain::ports::{PaymentGateway, QueryExecutor};
use checkout_kit::domain::query::Query;
use checkout_kit::domain::user::Row;
use checkout_kit::error::{CheckoutError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Storage double that records every query and answers with a fixed row.
#[derive(Clone, Default)]
pub struct RecordingExecutor {
    pub queries: Arc<Mutex<Vec<Query>>>,
    pub answer: Option<Row>,
    pub fail_with: Option<String>,
}

impl RecordingExecutor {
    pub fn answering(row: Row) -> Self {
        Self {
            answer: Some(row),
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn fetch_optional(&self, query: &Query) -> Result<Option<Row>> {
        self.queries.lock().unwrap().push(query.clone());
        match &self.fail_with {
            Some(message) => Err(CheckoutError::collaborator(message.clone())),
            None => Ok(self.answer.clone()),
        }
    }
}

/// One scripted gateway reply.
#[derive(Clone)]
pub enum Reply {
    Respond(GatewayResponse),
    Fail(String),
    Hang(Duration),
}

/// Payment double that replays scripted replies and records each request it sees.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    pub requests: Arc<Mutex<Vec<ChargeRequest>>>,
}

impl ScriptedGateway {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into_iter().collect())),
            requests: Arc::default(),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<GatewayResponse> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");

        match reply {
            Reply::Respond(response) => Ok(response),
            Reply::Fail(message) => Err(CheckoutError::collaborator(message)),
            Reply::Hang(duration) => {
                tokio::time::sleep(duration).await;
                Ok(GatewayResponse::approved("too_late"))
            }
        }
    }
}
