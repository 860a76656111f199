//! Playwright browser automation
//!
//! A persistent Node sidecar owns the browser; Rust talks to it over a
//! newline-delimited JSON protocol on stdin/stdout. One sidecar serves every
//! browser context a test opens, so multi-actor scenarios (agent, supervisor,
//! UC webphone tab) share a single browser instance the way the suite shares
//! one test process.

use std::collections::HashMap;
use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, Command as TokioCommand};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::spec::WaitState;

/// Margin added on top of the per-action Playwright timeout before the Rust
/// side gives up on a response.
const PROTOCOL_MARGIN: Duration = Duration::from_secs(10);

/// Response wait for commands that carry no element timeout.
const DEFAULT_PROTOCOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Identifier of a browser context inside the sidecar
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextId(String);

impl ContextId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Identifier of a page (tab) inside the sidecar
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageId(String);

impl PageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s {
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            _ => Ok(Browser::Chromium),
        }
    }
}

/// Configuration for the Playwright sidecar
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Default per-action timeout used when a call site passes none.
    pub action_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            action_timeout: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriverResponse {
    id: u64,
    ok: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Handle to the running Playwright sidecar
pub struct PlaywrightDriver {
    child: Mutex<Child>,
    stdin: tokio::sync::Mutex<ChildStdin>,
    pending: Arc<Mutex<HashMap<u64, oneshot::Sender<DriverResponse>>>>,
    next_id: AtomicU64,
    config: DriverConfig,

    // Keeps the driver script on disk for the lifetime of the sidecar.
    _script_dir: tempfile::TempDir,
}

impl PlaywrightDriver {
    /// Spawn the sidecar and launch the browser.
    pub async fn launch(config: DriverConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;

        let script_dir = tempfile::tempdir()?;
        let script_path = script_dir.path().join("driver.js");
        std::fs::write(&script_path, DRIVER_JS)?;

        debug!("Spawning Playwright sidecar: {}", script_path.display());

        let mut child = TokioCommand::new("node")
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| E2eError::Driver(format!("failed to spawn node: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| E2eError::Driver("sidecar stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| E2eError::Driver("sidecar stdout unavailable".to_string()))?;

        let pending: Arc<Mutex<HashMap<u64, oneshot::Sender<DriverResponse>>>> =
            Arc::new(Mutex::new(HashMap::new()));

        // Reader task: route each response line to the waiting caller.
        let reader_pending = Arc::clone(&pending);
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<DriverResponse>(&line) {
                    Ok(resp) => {
                        if let Some(tx) = reader_pending.lock().remove(&resp.id) {
                            let _ = tx.send(resp);
                        } else {
                            warn!("Driver response for unknown id {}", resp.id);
                        }
                    }
                    Err(e) => warn!("Unparseable driver output: {} ({})", line, e),
                }
            }
            // Sidecar is gone; wake every waiter with a closed channel.
            reader_pending.lock().clear();
        });

        let driver = Self {
            child: Mutex::new(child),
            stdin: tokio::sync::Mutex::new(stdin),
            pending,
            next_id: AtomicU64::new(1),
            config: config.clone(),
            _script_dir: script_dir,
        };

        driver
            .call(
                json!({
                    "cmd": "launch",
                    "browser": config.browser.as_str(),
                    "headless": config.headless,
                }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;

        info!("Playwright sidecar ready ({})", config.browser.as_str());
        Ok(driver)
    }

    /// Check if Playwright is installed
    fn check_playwright_installed() -> E2eResult<()> {
        let output = std::process::Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    /// Default per-action timeout for this driver.
    pub fn action_timeout(&self) -> Duration {
        self.config.action_timeout
    }

    /// Send one command and wait for its response.
    async fn call(&self, mut cmd: Value, wait: Duration) -> E2eResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        cmd["id"] = json!(id);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let line = serde_json::to_string(&cmd)?;
        {
            let mut stdin = self.stdin.lock().await;
            stdin.write_all(line.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.flush().await?;
        }

        match tokio::time::timeout(wait, rx).await {
            Ok(Ok(resp)) if resp.ok => Ok(resp.data.unwrap_or(Value::Null)),
            Ok(Ok(resp)) => Err(E2eError::Driver(
                resp.error.unwrap_or_else(|| "unknown driver error".to_string()),
            )),
            Ok(Err(_)) => Err(E2eError::DriverClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(E2eError::Timeout(format!(
                    "driver response for {}",
                    cmd["cmd"].as_str().unwrap_or("command")
                )))
            }
        }
    }

    fn wait_for(&self, timeout: Duration) -> Duration {
        timeout + PROTOCOL_MARGIN
    }

    /// Open a fresh browser context (own cookies, storage, viewport).
    pub async fn new_context(&self) -> E2eResult<ContextId> {
        self.new_context_sized(self.config.viewport_width, self.config.viewport_height)
            .await
    }

    /// Open a context with an explicit viewport (smoke specs override it).
    pub async fn new_context_sized(&self, width: u32, height: u32) -> E2eResult<ContextId> {
        let data = self
            .call(
                json!({
                    "cmd": "new_context",
                    "width": width,
                    "height": height,
                }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        let id = data["contextId"]
            .as_str()
            .ok_or_else(|| E2eError::Driver("missing contextId".to_string()))?;
        Ok(ContextId(id.to_string()))
    }

    /// Open a new page (tab) in a context.
    pub async fn new_page(&self, context: &ContextId) -> E2eResult<PageId> {
        let data = self
            .call(
                json!({ "cmd": "new_page", "context": context.0 }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        let id = data["pageId"]
            .as_str()
            .ok_or_else(|| E2eError::Driver("missing pageId".to_string()))?;
        Ok(PageId(id.to_string()))
    }

    pub async fn goto(&self, page: &PageId, url: &str, timeout: Duration) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "goto",
                "page": page.0,
                "url": url,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn click(&self, page: &PageId, selector: &str, timeout: Duration) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "click",
                "page": page.0,
                "selector": selector,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn fill(
        &self,
        page: &PageId,
        selector: &str,
        value: &str,
        timeout: Duration,
    ) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "fill",
                "page": page.0,
                "selector": selector,
                "value": value,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    /// Type text with keyboard simulation (per-keystroke delay).
    pub async fn type_text(
        &self,
        page: &PageId,
        selector: &str,
        text: &str,
        delay: Duration,
        timeout: Duration,
    ) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "type",
                "page": page.0,
                "selector": selector,
                "text": text,
                "delayMs": delay.as_millis() as u64,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    /// Press a key, either into a specific element or the focused one.
    pub async fn press(
        &self,
        page: &PageId,
        selector: Option<&str>,
        key: &str,
        timeout: Duration,
    ) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "press",
                "page": page.0,
                "selector": selector,
                "key": key,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn hover(&self, page: &PageId, selector: &str, timeout: Duration) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "hover",
                "page": page.0,
                "selector": selector,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn focus(&self, page: &PageId, selector: &str, timeout: Duration) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "focus",
                "page": page.0,
                "selector": selector,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn check(&self, page: &PageId, selector: &str, timeout: Duration) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "check",
                "page": page.0,
                "selector": selector,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn uncheck(&self, page: &PageId, selector: &str, timeout: Duration) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "uncheck",
                "page": page.0,
                "selector": selector,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn select_option(
        &self,
        page: &PageId,
        selector: &str,
        value: &str,
        timeout: Duration,
    ) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "select",
                "page": page.0,
                "selector": selector,
                "value": value,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    pub async fn wait_for_selector(
        &self,
        page: &PageId,
        selector: &str,
        state: WaitState,
        timeout: Duration,
    ) -> E2eResult<()> {
        let state_str = match state {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        };
        self.call(
            json!({
                "cmd": "wait_for_selector",
                "page": page.0,
                "selector": selector,
                "state": state_str,
                "timeoutMs": timeout.as_millis() as u64,
            }),
            self.wait_for(timeout),
        )
        .await?;
        Ok(())
    }

    /// Visible text of the first element matching the selector.
    pub async fn inner_text(
        &self,
        page: &PageId,
        selector: &str,
        timeout: Duration,
    ) -> E2eResult<String> {
        let data = self
            .call(
                json!({
                    "cmd": "inner_text",
                    "page": page.0,
                    "selector": selector,
                    "timeoutMs": timeout.as_millis() as u64,
                }),
                self.wait_for(timeout),
            )
            .await?;
        Ok(data["text"].as_str().unwrap_or_default().to_string())
    }

    pub async fn get_attribute(
        &self,
        page: &PageId,
        selector: &str,
        name: &str,
        timeout: Duration,
    ) -> E2eResult<Option<String>> {
        let data = self
            .call(
                json!({
                    "cmd": "get_attribute",
                    "page": page.0,
                    "selector": selector,
                    "name": name,
                    "timeoutMs": timeout.as_millis() as u64,
                }),
                self.wait_for(timeout),
            )
            .await?;
        Ok(data["value"].as_str().map(String::from))
    }

    pub async fn input_value(
        &self,
        page: &PageId,
        selector: &str,
        timeout: Duration,
    ) -> E2eResult<String> {
        let data = self
            .call(
                json!({
                    "cmd": "input_value",
                    "page": page.0,
                    "selector": selector,
                    "timeoutMs": timeout.as_millis() as u64,
                }),
                self.wait_for(timeout),
            )
            .await?;
        Ok(data["value"].as_str().unwrap_or_default().to_string())
    }

    /// Non-waiting visibility probe.
    pub async fn is_visible(&self, page: &PageId, selector: &str) -> E2eResult<bool> {
        let data = self
            .call(
                json!({ "cmd": "is_visible", "page": page.0, "selector": selector }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        Ok(data["visible"].as_bool().unwrap_or(false))
    }

    pub async fn is_enabled(&self, page: &PageId, selector: &str) -> E2eResult<bool> {
        let data = self
            .call(
                json!({ "cmd": "is_enabled", "page": page.0, "selector": selector }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        Ok(data["enabled"].as_bool().unwrap_or(false))
    }

    pub async fn count(&self, page: &PageId, selector: &str) -> E2eResult<usize> {
        let data = self
            .call(
                json!({ "cmd": "count", "page": page.0, "selector": selector }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        Ok(data["count"].as_u64().unwrap_or(0) as usize)
    }

    pub async fn current_url(&self, page: &PageId) -> E2eResult<String> {
        let data = self
            .call(
                json!({ "cmd": "url", "page": page.0 }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        Ok(data["url"].as_str().unwrap_or_default().to_string())
    }

    /// Evaluate a JavaScript expression in the page.
    pub async fn evaluate(&self, page: &PageId, script: &str) -> E2eResult<Value> {
        let data = self
            .call(
                json!({ "cmd": "evaluate", "page": page.0, "script": script }),
                DEFAULT_PROTOCOL_TIMEOUT,
            )
            .await?;
        Ok(data["value"].clone())
    }

    /// Screenshot the page (or one element) to a PNG on disk.
    pub async fn screenshot(
        &self,
        page: &PageId,
        path: &Path,
        selector: Option<&str>,
        full_page: bool,
    ) -> E2eResult<()> {
        self.call(
            json!({
                "cmd": "screenshot",
                "page": page.0,
                "path": path.to_string_lossy(),
                "selector": selector,
                "fullPage": full_page,
            }),
            DEFAULT_PROTOCOL_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    /// Raise this page's window; actor switching in multi-context tests.
    pub async fn bring_to_front(&self, page: &PageId) -> E2eResult<()> {
        self.call(
            json!({ "cmd": "bring_to_front", "page": page.0 }),
            DEFAULT_PROTOCOL_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    /// Close a context and every page it owns.
    pub async fn close_context(&self, context: &ContextId) -> E2eResult<()> {
        self.call(
            json!({ "cmd": "close_context", "context": context.0 }),
            DEFAULT_PROTOCOL_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    /// Graceful shutdown: ask the sidecar to close the browser and exit.
    pub async fn shutdown(&self) -> E2eResult<()> {
        // The sidecar exits without replying; ignore the closed channel.
        match self
            .call(json!({ "cmd": "shutdown" }), Duration::from_secs(5))
            .await
        {
            Ok(_) | Err(E2eError::DriverClosed) | Err(E2eError::Timeout(_)) => {}
            Err(e) => return Err(e),
        }

        let mut child = self.child.lock();
        let _ = child.start_kill();
        Ok(())
    }
}

impl Drop for PlaywrightDriver {
    fn drop(&mut self) {
        let mut child = self.child.lock();
        if let Some(pid) = child.id() {
            #[cfg(unix)]
            {
                use nix::sys::signal::{kill, Signal};
                use nix::unistd::Pid;
                let _ = kill(Pid::from_raw(pid as i32), Signal::SIGTERM);
            }
        }
        let _ = child.start_kill();
    }
}

/// The Node sidecar. Reads one JSON command per stdin line, answers with one
/// JSON line on stdout. Commands are serialized onto a promise chain so they
/// execute in arrival order.
const DRIVER_JS: &str = r##"
'use strict';
const readline = require('readline');
const { chromium, firefox, webkit } = require('playwright');

const engines = { chromium, firefox, webkit };

let browser = null;
const contexts = new Map();
const pages = new Map();
const pageContext = new Map();
let nextContext = 1;
let nextPage = 1;

function getContext(id) {
  const context = contexts.get(id);
  if (!context) throw new Error('unknown context: ' + id);
  return context;
}

function getPage(id) {
  const page = pages.get(id);
  if (!page) throw new Error('unknown page: ' + id);
  return page;
}

async function handle(msg) {
  switch (msg.cmd) {
    case 'launch': {
      const engine = engines[msg.browser] || chromium;
      browser = await engine.launch({ headless: msg.headless !== false });
      return {};
    }
    case 'new_context': {
      const context = await browser.newContext({
        viewport: { width: msg.width, height: msg.height },
        permissions: ['microphone'],
      });
      const id = 'c' + nextContext++;
      contexts.set(id, context);
      return { contextId: id };
    }
    case 'new_page': {
      const page = await getContext(msg.context).newPage();
      const id = 'p' + nextPage++;
      pages.set(id, page);
      pageContext.set(id, msg.context);
      return { pageId: id };
    }
    case 'goto': {
      await getPage(msg.page).goto(msg.url, { timeout: msg.timeoutMs, waitUntil: 'load' });
      return {};
    }
    case 'click': {
      await getPage(msg.page).click(msg.selector, { timeout: msg.timeoutMs });
      return {};
    }
    case 'fill': {
      await getPage(msg.page).fill(msg.selector, msg.value, { timeout: msg.timeoutMs });
      return {};
    }
    case 'type': {
      await getPage(msg.page).type(msg.selector, msg.text, {
        delay: msg.delayMs,
        timeout: msg.timeoutMs,
      });
      return {};
    }
    case 'press': {
      const page = getPage(msg.page);
      if (msg.selector) {
        await page.press(msg.selector, msg.key, { timeout: msg.timeoutMs });
      } else {
        await page.keyboard.press(msg.key);
      }
      return {};
    }
    case 'hover': {
      await getPage(msg.page).hover(msg.selector, { timeout: msg.timeoutMs });
      return {};
    }
    case 'focus': {
      await getPage(msg.page).focus(msg.selector, { timeout: msg.timeoutMs });
      return {};
    }
    case 'check': {
      await getPage(msg.page).check(msg.selector, { timeout: msg.timeoutMs });
      return {};
    }
    case 'uncheck': {
      await getPage(msg.page).uncheck(msg.selector, { timeout: msg.timeoutMs });
      return {};
    }
    case 'select': {
      await getPage(msg.page).selectOption(msg.selector, msg.value, { timeout: msg.timeoutMs });
      return {};
    }
    case 'wait_for_selector': {
      await getPage(msg.page).waitForSelector(msg.selector, {
        state: msg.state,
        timeout: msg.timeoutMs,
      });
      return {};
    }
    case 'inner_text': {
      const page = getPage(msg.page);
      await page.waitForSelector(msg.selector, { state: 'visible', timeout: msg.timeoutMs });
      return { text: await page.innerText(msg.selector) };
    }
    case 'get_attribute': {
      const page = getPage(msg.page);
      await page.waitForSelector(msg.selector, { state: 'attached', timeout: msg.timeoutMs });
      return { value: await page.getAttribute(msg.selector, msg.name) };
    }
    case 'input_value': {
      return { value: await getPage(msg.page).inputValue(msg.selector, { timeout: msg.timeoutMs }) };
    }
    case 'is_visible': {
      return { visible: await getPage(msg.page).isVisible(msg.selector) };
    }
    case 'is_enabled': {
      return { enabled: await getPage(msg.page).isEnabled(msg.selector) };
    }
    case 'count': {
      return { count: await getPage(msg.page).locator(msg.selector).count() };
    }
    case 'url': {
      return { url: getPage(msg.page).url() };
    }
    case 'evaluate': {
      return { value: await getPage(msg.page).evaluate(msg.script) };
    }
    case 'screenshot': {
      const page = getPage(msg.page);
      if (msg.selector) {
        await page.locator(msg.selector).screenshot({ path: msg.path });
      } else {
        await page.screenshot({ path: msg.path, fullPage: msg.fullPage === true });
      }
      return { path: msg.path };
    }
    case 'bring_to_front': {
      await getPage(msg.page).bringToFront();
      return {};
    }
    case 'close_context': {
      const context = getContext(msg.context);
      for (const [pageId, owner] of pageContext) {
        if (owner === msg.context) {
          pages.delete(pageId);
          pageContext.delete(pageId);
        }
      }
      contexts.delete(msg.context);
      await context.close();
      return {};
    }
    case 'shutdown': {
      if (browser) await browser.close();
      process.exit(0);
    }
    default:
      throw new Error('unknown command: ' + msg.cmd);
  }
}

const rl = readline.createInterface({ input: process.stdin });
let chain = Promise.resolve();

rl.on('line', (line) => {
  if (!line.trim()) return;
  let msg;
  try {
    msg = JSON.parse(line);
  } catch (err) {
    process.stdout.write(JSON.stringify({ id: 0, ok: false, error: 'bad request: ' + err }) + '\n');
    return;
  }
  chain = chain.then(async () => {
    try {
      const data = await handle(msg);
      process.stdout.write(JSON.stringify({ id: msg.id, ok: true, data }) + '\n');
    } catch (err) {
      const message = err && err.message ? err.message : String(err);
      process.stdout.write(JSON.stringify({ id: msg.id, ok: false, error: message }) + '\n');
    }
  });
});

rl.on('close', async () => {
  if (browser) await browser.close();
  process.exit(0);
});
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_from_str_defaults_to_chromium() {
        assert!(matches!("nonsense".parse::<Browser>(), Ok(Browser::Chromium)));
        assert!(matches!("firefox".parse::<Browser>(), Ok(Browser::Firefox)));
    }

    #[test]
    fn driver_config_defaults() {
        let config = DriverConfig::default();
        assert!(config.headless);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.action_timeout, Duration::from_secs(15));
    }
}
