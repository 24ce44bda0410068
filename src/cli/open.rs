//! cli::open
//!
//! Hands URLs to a browser.

use std::cell::RefCell;

use anyhow::{Context as _, Result};

/// Something that can show a URL to the user.
pub trait UrlOpener {
    fn open_url(&self, url: &str) -> Result<()>;
}

/// Opens URLs with the system handler, or with a configured browser.
#[derive(Debug, Default)]
pub struct SystemOpener {
    browser: Option<String>,
}

impl SystemOpener {
    pub fn new(browser: Option<&str>) -> Self {
        Self {
            browser: browser.map(String::from),
        }
    }
}

impl UrlOpener for SystemOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        match &self.browser {
            Some(browser) => open::with(url, browser)
                .with_context(|| format!("Failed to open {} with {}", url, browser)),
            None => open::that(url).with_context(|| format!("Failed to open {}", url)),
        }
    }
}

/// Records URLs instead of opening them.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}
