//! Page handle shared by every page object
//!
//! `Page` wraps one browser tab with default timeouts, per-actor logging, and
//! assertion helpers, so page objects read as UI workflows instead of driver
//! plumbing. It is a thin pass-through; retries only happen where a call site
//! opts in via [`to_pass`].

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tracing::debug;

use crate::driver::{ContextId, PageId, PlaywrightDriver};
use crate::error::{E2eError, E2eResult};
use crate::spec::WaitState;

/// One browser tab, labeled with the actor it belongs to.
#[derive(Clone)]
pub struct Page {
    driver: Arc<PlaywrightDriver>,
    context_id: ContextId,
    page_id: PageId,
    label: String,
    default_timeout: Duration,
}

impl Page {
    pub fn new(
        driver: Arc<PlaywrightDriver>,
        context_id: ContextId,
        page_id: PageId,
        label: impl Into<String>,
    ) -> Self {
        let default_timeout = driver.action_timeout();
        Self {
            driver,
            context_id,
            page_id,
            label: label.into(),
            default_timeout,
        }
    }

    /// Actor label used in logs ("agent-65", "supervisor", ...).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn context_id(&self) -> &ContextId {
        &self.context_id
    }

    pub fn driver(&self) -> &Arc<PlaywrightDriver> {
        &self.driver
    }

    /// Per-action timeout used when a call site passes none.
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    // ---- navigation -----------------------------------------------------

    pub async fn goto(&self, url: &str) -> E2eResult<()> {
        debug!("[{}] goto {}", self.label, url);
        self.driver
            .goto(&self.page_id, url, self.default_timeout)
            .await
    }

    pub async fn current_url(&self) -> E2eResult<String> {
        self.driver.current_url(&self.page_id).await
    }

    pub async fn bring_to_front(&self) -> E2eResult<()> {
        debug!("[{}] bring_to_front", self.label);
        self.driver.bring_to_front(&self.page_id).await
    }

    // ---- interactions ---------------------------------------------------

    pub async fn click(&self, selector: &str) -> E2eResult<()> {
        self.click_with_timeout(selector, self.default_timeout).await
    }

    pub async fn click_with_timeout(&self, selector: &str, timeout: Duration) -> E2eResult<()> {
        debug!("[{}] click {}", self.label, selector);
        self.driver.click(&self.page_id, selector, timeout).await
    }

    pub async fn fill(&self, selector: &str, value: &str) -> E2eResult<()> {
        debug!("[{}] fill {}", self.label, selector);
        self.driver
            .fill(&self.page_id, selector, value, self.default_timeout)
            .await
    }

    pub async fn type_text(&self, selector: &str, text: &str, delay: Duration) -> E2eResult<()> {
        debug!("[{}] type {}", self.label, selector);
        self.driver
            .type_text(&self.page_id, selector, text, delay, self.default_timeout)
            .await
    }

    pub async fn press(&self, selector: Option<&str>, key: &str) -> E2eResult<()> {
        debug!("[{}] press {}", self.label, key);
        self.driver
            .press(&self.page_id, selector, key, self.default_timeout)
            .await
    }

    pub async fn hover(&self, selector: &str) -> E2eResult<()> {
        debug!("[{}] hover {}", self.label, selector);
        self.driver
            .hover(&self.page_id, selector, self.default_timeout)
            .await
    }

    pub async fn focus(&self, selector: &str) -> E2eResult<()> {
        self.driver
            .focus(&self.page_id, selector, self.default_timeout)
            .await
    }

    pub async fn check(&self, selector: &str) -> E2eResult<()> {
        debug!("[{}] check {}", self.label, selector);
        self.driver
            .check(&self.page_id, selector, self.default_timeout)
            .await
    }

    pub async fn uncheck(&self, selector: &str) -> E2eResult<()> {
        debug!("[{}] uncheck {}", self.label, selector);
        self.driver
            .uncheck(&self.page_id, selector, self.default_timeout)
            .await
    }

    pub async fn select_option(&self, selector: &str, value: &str) -> E2eResult<()> {
        debug!("[{}] select {} = {}", self.label, selector, value);
        self.driver
            .select_option(&self.page_id, selector, value, self.default_timeout)
            .await
    }

    // ---- reads ----------------------------------------------------------

    pub async fn inner_text(&self, selector: &str) -> E2eResult<String> {
        self.driver
            .inner_text(&self.page_id, selector, self.default_timeout)
            .await
    }

    pub async fn get_attribute(&self, selector: &str, name: &str) -> E2eResult<Option<String>> {
        self.driver
            .get_attribute(&self.page_id, selector, name, self.default_timeout)
            .await
    }

    pub async fn input_value(&self, selector: &str) -> E2eResult<String> {
        self.driver
            .input_value(&self.page_id, selector, self.default_timeout)
            .await
    }

    pub async fn is_visible(&self, selector: &str) -> E2eResult<bool> {
        self.driver.is_visible(&self.page_id, selector).await
    }

    pub async fn is_enabled(&self, selector: &str) -> E2eResult<bool> {
        self.driver.is_enabled(&self.page_id, selector).await
    }

    pub async fn count(&self, selector: &str) -> E2eResult<usize> {
        self.driver.count(&self.page_id, selector).await
    }

    pub async fn evaluate(&self, script: &str) -> E2eResult<Value> {
        self.driver.evaluate(&self.page_id, script).await
    }

    pub async fn screenshot(&self, path: &Path, selector: Option<&str>, full_page: bool) -> E2eResult<()> {
        debug!("[{}] screenshot -> {}", self.label, path.display());
        self.driver
            .screenshot(&self.page_id, path, selector, full_page)
            .await
    }

    // ---- waits ----------------------------------------------------------

    pub async fn wait_for(&self, selector: &str) -> E2eResult<()> {
        self.wait_for_with_timeout(selector, self.default_timeout).await
    }

    pub async fn wait_for_with_timeout(&self, selector: &str, timeout: Duration) -> E2eResult<()> {
        debug!("[{}] wait_for {}", self.label, selector);
        self.driver
            .wait_for_selector(&self.page_id, selector, WaitState::Visible, timeout)
            .await
    }

    pub async fn wait_for_state(
        &self,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> E2eResult<()> {
        debug!("[{}] wait_for {} ({:?})", self.label, selector, state);
        self.driver
            .wait_for_selector(&self.page_id, selector, state, timeout)
            .await
    }

    pub async fn wait_hidden(&self, selector: &str) -> E2eResult<()> {
        debug!("[{}] wait_hidden {}", self.label, selector);
        self.driver
            .wait_for_selector(&self.page_id, selector, WaitState::Hidden, self.default_timeout)
            .await
    }

    // ---- assertions ------------------------------------------------------

    pub async fn expect_visible(&self, selector: &str) -> E2eResult<()> {
        self.wait_for(selector).await.map_err(|e| match e {
            E2eError::Timeout(_) | E2eError::Driver(_) => E2eError::AssertionFailed(format!(
                "expected {selector} to be visible on [{}]",
                self.label
            )),
            other => other,
        })
    }

    pub async fn expect_hidden(&self, selector: &str) -> E2eResult<()> {
        self.wait_hidden(selector).await.map_err(|e| match e {
            E2eError::Timeout(_) | E2eError::Driver(_) => E2eError::AssertionFailed(format!(
                "expected {selector} to be hidden on [{}]",
                self.label
            )),
            other => other,
        })
    }

    pub async fn expect_text(&self, selector: &str, expected: &str) -> E2eResult<()> {
        let actual = self.inner_text(selector).await?;
        if actual.trim() == expected {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "{selector}: expected text {expected:?}, got {actual:?}"
            )))
        }
    }

    pub async fn expect_text_contains(&self, selector: &str, needle: &str) -> E2eResult<()> {
        let actual = self.inner_text(selector).await?;
        if actual.contains(needle) {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "{selector}: expected text containing {needle:?}, got {actual:?}"
            )))
        }
    }

    pub async fn expect_attribute(&self, selector: &str, name: &str, expected: &str) -> E2eResult<()> {
        let actual = self.get_attribute(selector, name).await?;
        match actual.as_deref() {
            Some(v) if v == expected => Ok(()),
            other => Err(E2eError::AssertionFailed(format!(
                "{selector}: expected {name}={expected:?}, got {other:?}"
            ))),
        }
    }

    pub async fn expect_count(&self, selector: &str, expected: usize) -> E2eResult<()> {
        let actual = self.count(selector).await?;
        if actual == expected {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "{selector}: expected {expected} element(s), found {actual}"
            )))
        }
    }

    pub async fn expect_url_contains(&self, fragment: &str) -> E2eResult<()> {
        let url = self.current_url().await?;
        if url.contains(fragment) {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "expected URL containing {fragment:?}, got {url:?}"
            )))
        }
    }

    pub async fn expect_enabled(&self, selector: &str) -> E2eResult<()> {
        if self.is_enabled(selector).await? {
            Ok(())
        } else {
            Err(E2eError::AssertionFailed(format!(
                "expected {selector} to be enabled"
            )))
        }
    }

    pub async fn expect_disabled(&self, selector: &str) -> E2eResult<()> {
        if self.is_enabled(selector).await? {
            Err(E2eError::AssertionFailed(format!(
                "expected {selector} to be disabled"
            )))
        } else {
            Ok(())
        }
    }
}

/// Re-run an async assertion block until it passes or the window elapses.
///
/// This is the suite's only sanctioned mechanism for eventually-consistent UI
/// state (realtime dashboards, extension registration, call routing). The
/// last failure is preserved in the timeout error so the report shows what
/// never settled.
pub async fn to_pass<T, F, Fut>(window: Duration, interval: Duration, mut attempt: F) -> E2eResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = E2eResult<T>>,
{
    let deadline = Instant::now() + window;
    let mut last_err: Option<E2eError> = None;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => last_err = Some(e),
        }

        if Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(interval).await;
    }

    let reason = last_err
        .map(|e| e.to_string())
        .unwrap_or_else(|| "condition never attempted".to_string());
    Err(E2eError::Timeout(format!(
        "condition did not pass within {:?}: {reason}",
        window
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn to_pass_returns_once_condition_holds() {
        let attempts = AtomicU32::new(0);
        let result = to_pass(Duration::from_secs(2), Duration::from_millis(1), || async {
            if attempts.fetch_add(1, Ordering::SeqCst) >= 3 {
                Ok(42)
            } else {
                Err(E2eError::AssertionFailed("not yet".to_string()))
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert!(attempts.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test]
    async fn to_pass_surfaces_last_failure_on_timeout() {
        let result: E2eResult<()> =
            to_pass(Duration::from_millis(20), Duration::from_millis(5), || async {
                Err(E2eError::AssertionFailed("queue count still 0".to_string()))
            })
            .await;

        let err = result.unwrap_err().to_string();
        assert!(err.contains("queue count still 0"), "got: {err}");
    }
}
