use crate::fetch::error::FetchError;
use crate::fetch::page_source::PageSource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves a fixed body and remembers every URL it was asked for.
pub(crate) struct FakeSource {
    body: Mutex<Option<String>>,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub(crate) fn serving(body: &str) -> Self {
        Self {
            body: Mutex::new(Some(body.to_string())),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    /// Every request fails to decode.
    pub(crate) fn failing() -> Self {
        Self {
            body: Mutex::new(None),
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn set_body(&self, body: &str) {
        *self.body.lock().unwrap() = Some(body.to_string());
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl PageSource for FakeSource {
    async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.to_string());
        let body = self.body.lock().unwrap().clone();
        body.ok_or_else(|| {
            let invalid = String::from_utf8(vec![0xff, 0xfe]).unwrap_err();
            FetchError::Decode(url.to_string(), invalid)
        })
    }
}
