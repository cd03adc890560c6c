//! Scripted strategies for exercising the retry loop without a network.

use super::{FetchError, FetchResult, Fetcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Returns `responses[i]` on call i, repeating the last entry; None is a failure
///
/// A panicking fetcher counts the call and then panics.
pub(crate) struct ScriptedFetcher {
    name: &'static str,
    responses: Vec<Option<String>>,
    calls: Arc<AtomicUsize>,
    panics: bool,
}

impl ScriptedFetcher {
    pub(crate) fn new(name: &'static str, responses: Vec<Option<&str>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let fetcher = Self {
            name,
            responses: responses.into_iter().map(|r| r.map(str::to_string)).collect(),
            calls: Arc::clone(&calls),
            panics: false,
        };
        (fetcher, calls)
    }

    pub(crate) fn failing(name: &'static str) -> (Self, Arc<AtomicUsize>) {
        Self::new(name, vec![None])
    }

    pub(crate) fn panicking(name: &'static str) -> (Self, Arc<AtomicUsize>) {
        let (mut fetcher, calls) = Self::new(name, vec![None]);
        fetcher.panics = true;
        (fetcher, calls)
    }
}

impl Fetcher for ScriptedFetcher {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(&self, _url: &Url) -> FetchResult<String> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.panics {
            panic!("{} blew up on call {}", self.name, call);
        }
        let index = call.min(self.responses.len().saturating_sub(1));
        match self.responses.get(index).cloned().flatten() {
            Some(content) => Ok(content),
            None => Err(FetchError::Status { status: 503 }),
        }
    }
}
