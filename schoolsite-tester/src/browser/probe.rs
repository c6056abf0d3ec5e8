//! Reads and drives the widgets on a loaded page through injected scripts.
use anyhow::{Context, Result, bail};
use schoolsite_core::{AccessibilityPreference, Mode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thirtyfour::prelude::*;

/// Observable widget state, also dumped into failure artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub active_slides: Vec<usize>,
    pub active_dots: Vec<usize>,
    pub root_classes: Vec<String>,
    pub panel_hidden: bool,
    pub stored_preference: Option<String>,
}

impl PageState {
    pub fn applied_modes(&self) -> Vec<Mode> {
        self.root_classes
            .iter()
            .filter_map(|class| class.parse().ok())
            .collect()
    }

    pub fn preference(&self) -> Option<AccessibilityPreference> {
        self.stored_preference
            .as_deref()
            .and_then(AccessibilityPreference::from_json)
    }
}

const STATE_SCRIPT: &str = r"
const active = (sel) => Array.from(document.querySelectorAll(sel))
  .map((el, i) => el.classList.contains('active') ? i : -1)
  .filter((i) => i >= 0);
const panel = document.querySelector('.accessibility-panel');
return {
  active_slides: active('.slide'),
  active_dots: active('.slider-dots .dot'),
  root_classes: Array.from(document.documentElement.classList),
  panel_hidden: !panel || panel.hasAttribute('hidden'),
  stored_preference: localStorage.getItem(arguments[0]),
};
";

#[derive(Debug, Clone)]
pub struct PageProbe<'a> {
    driver: &'a WebDriver,
    storage_key: String,
}

impl<'a> PageProbe<'a> {
    pub fn new(driver: &'a WebDriver, storage_key: impl Into<String>) -> Self {
        Self {
            driver,
            storage_key: storage_key.into(),
        }
    }

    pub const fn driver(&self) -> &'a WebDriver {
        self.driver
    }

    /// Load `url` and wait until the accessibility panel has rendered.
    pub async fn open(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        self.driver
            .find(By::Css(".accessibility-toggle"))
            .await
            .context("accessibility panel never rendered; is the wasm bundle loaded?")?;
        Ok(())
    }

    pub async fn reload(&self) -> Result<()> {
        self.driver.refresh().await?;
        self.driver
            .find(By::Css(".accessibility-toggle"))
            .await
            .context("accessibility panel missing after reload")?;
        Ok(())
    }

    pub async fn state(&self) -> Result<PageState> {
        let ret = self
            .driver
            .execute(STATE_SCRIPT, vec![Value::from(self.storage_key.as_str())])
            .await?;
        serde_json::from_value(ret.json().clone()).context("decoding page state")
    }

    pub async fn click(&self, selector: &str) -> Result<()> {
        self.driver
            .find(By::Css(selector))
            .await
            .with_context(|| format!("no element matches {selector}"))?
            .click()
            .await?;
        Ok(())
    }

    pub async fn click_nth(&self, selector: &str, index: usize) -> Result<()> {
        let elements = self.driver.find_all(By::Css(selector)).await?;
        let Some(element) = elements.get(index) else {
            bail!("{selector} has {} matches, wanted #{index}", elements.len());
        };
        element.click().await?;
        Ok(())
    }

    pub async fn choose_mode(&self, mode: Mode) -> Result<()> {
        self.click(".accessibility-toggle").await?;
        self.click(&format!(
            ".accessibility-option[data-mode='{}']",
            mode.class_name()
        ))
        .await
    }

    /// Dispatch an Alt+`key` keydown, optionally from inside a text field.
    pub async fn press_alt(&self, key: &str, from_text_field: bool) -> Result<()> {
        self.driver
            .execute(
                r"
let target = document;
if (arguments[1]) {
  target = document.createElement('input');
  document.body.appendChild(target);
  target.focus();
}
target.dispatchEvent(new KeyboardEvent('keydown', { key: arguments[0], altKey: true, bubbles: true }));
if (arguments[1]) { target.remove(); }
",
                vec![Value::from(key), Value::from(from_text_field)],
            )
            .await?;
        Ok(())
    }

    pub async fn hover_hero(&self, inside: bool) -> Result<()> {
        let event = if inside { "mouseenter" } else { "mouseleave" };
        self.driver
            .execute(
                "const hero = document.querySelector('.hero'); if (hero) hero.dispatchEvent(new MouseEvent(arguments[0]));",
                vec![Value::from(event)],
            )
            .await?;
        Ok(())
    }

    pub async fn set_stored(&self, raw: &str) -> Result<()> {
        self.driver
            .execute(
                "localStorage.setItem(arguments[0], arguments[1]);",
                vec![Value::from(self.storage_key.as_str()), Value::from(raw)],
            )
            .await?;
        Ok(())
    }

    pub async fn clear_stored(&self) -> Result<()> {
        self.driver
            .execute(
                "localStorage.removeItem(arguments[0]);",
                vec![Value::from(self.storage_key.as_str())],
            )
            .await?;
        Ok(())
    }

    pub async fn settle(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
