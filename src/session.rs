//! Raw menu text, the current pick, and the submit transition between them.

use anyhow::{Context, Result};

use crate::menu::MenuFormat;
use crate::pick::{RandomSource, pick};
use crate::store::KeyValueStore;

/// Storage key holding the last submitted menu text.
pub const RAW_TEXT_KEY: &str = "textareaStr";

/// Shown on a fresh install so the first press has something to pick from.
pub const DEFAULT_MENU: &str = "餐厅： 今晚小馆
宫保鸡丁\t1\t32\t0\t订餐
鱼香肉丝\t1\t28\t0\t订餐
麻婆豆腐\t1\t22\t0\t订餐
番茄炒蛋\t1\t18\t0\t订餐
餐厅： 街角面馆
牛肉拉面\t1\t26\t0\t订餐
炸酱面\t1\t20\t0\t订餐
酸辣粉\t1\t16\t0\t订餐
";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ResultShown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    Picked {
        item: String,
        candidates: usize,
        generation: u64,
    },
    /// Extraction came back empty; the session is untouched.
    NoItems,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    raw_text: String,
    result: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// Start a session from stored text, or the built-in menu if none is stored.
    pub fn restore<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let mut session = Self::default();
        session.restore_from(store)?;
        Ok(session)
    }

    /// Text already typed in this session wins over anything stored.
    pub fn restore_from<S: KeyValueStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        if !self.raw_text.is_empty() {
            return Ok(());
        }
        let stored = store.get(RAW_TEXT_KEY).context("read stored menu text")?;
        self.raw_text = match stored {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_MENU.to_string(),
        };
        Ok(())
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn set_raw_text(&mut self, text: impl Into<String>) {
        self.raw_text = text.into();
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Bumped on every pick, even when the same item comes up twice.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::ResultShown
        } else {
            Phase::Idle
        }
    }

    /// Persist the raw text, then pick a new result from it.
    ///
    /// A failed write aborts before anything else changes.
    pub fn submit<S, R>(
        &mut self,
        store: &S,
        rng: &mut R,
        format: &MenuFormat,
    ) -> Result<Submission>
    where
        S: KeyValueStore + ?Sized,
        R: RandomSource + ?Sized,
    {
        store
            .set(RAW_TEXT_KEY, &self.raw_text)
            .context("persist menu text")?;

        let items = format.extract(&self.raw_text);
        let Some(item) = pick(rng, &items)? else {
            return Ok(Submission::NoItems);
        };

        let item = item.to_string();
        self.result = Some(item.clone());
        self.generation += 1;
        Ok(Submission::Picked {
            item,
            candidates: items.len(),
            generation: self.generation,
        })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
