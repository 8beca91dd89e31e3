//! Test doubles shared by the view tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cm_contacts::ContactService;
use cm_core::ClientConfig;
use wiremock::MockServer;

use crate::confirm::Confirm;
use crate::route::{Navigator, Route};

pub fn service_for(server: &MockServer) -> ContactService {
    ContactService::new(&ClientConfig::new(server.uri())).unwrap()
}

/// Service for tests that must never reach the network
pub fn offline_service() -> ContactService {
    ContactService::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap()
}

/// Answers confirmations from a script and records every prompt
#[derive(Default)]
pub struct ScriptedConfirm {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirm {
    pub fn answering(answers: &[bool]) -> Arc<Self> {
        Arc::new(Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::default(),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirm for ScriptedConfirm {
    async fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected confirmation prompt")
    }
}

/// Records every navigation request
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
