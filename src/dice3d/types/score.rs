//! Running score shared by every die on the table

use bevy::prelude::*;

use super::DisplaySettings;
use crate::dice3d::lifecycle::ScoreSink;

/// A text display showing `prefix + value`, or a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDisplay {
    prefix: String,
    text: String,
}

impl ValueDisplay {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            text: prefix.clone(),
            prefix,
        }
    }

    pub fn set_value(&mut self, value: i32) {
        self.text = format!("{}{}", self.prefix, value);
    }

    pub fn set_placeholder(&mut self, placeholder: &str) {
        self.text = format!("{}{}", self.prefix, placeholder);
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// The score sink: running sum plus "current" and "sum" displays.
#[derive(Resource, Debug, Clone)]
pub struct ScoreBoard {
    sum: i32,
    last_result: Option<i32>,
    rolls: u32,
    pending_text: String,
    discarded_text: String,
    pub current: ValueDisplay,
    pub total: ValueDisplay,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(&DisplaySettings::default())
    }
}

impl ScoreBoard {
    pub fn new(display: &DisplaySettings) -> Self {
        let mut total = ValueDisplay::new(display.sum_prefix.clone());
        total.set_value(0);
        Self {
            sum: 0,
            last_result: None,
            rolls: 0,
            pending_text: display.pending_text.clone(),
            discarded_text: display.discarded_text.clone(),
            current: ValueDisplay::new(display.current_prefix.clone()),
            total,
        }
    }

    pub fn sum(&self) -> i32 {
        self.sum
    }

    pub fn last_result(&self) -> Option<i32> {
        self.last_result
    }

    /// Number of results submitted since the last reset.
    pub fn rolls(&self) -> u32 {
        self.rolls
    }

    /// Clear the running sum and both displays.
    pub fn reset(&mut self) {
        self.sum = 0;
        self.last_result = None;
        self.rolls = 0;
        self.current = ValueDisplay::new(self.current.prefix.clone());
        self.total.set_value(0);
    }
}

impl ScoreSink for ScoreBoard {
    fn start_pending_roll(&mut self) {
        self.current.set_placeholder(&self.pending_text);
    }

    fn submit_result(&mut self, value: i32) {
        self.sum += value;
        self.rolls += 1;
        self.last_result = Some(value);
        self.current.set_value(value);
        self.total.set_value(self.sum);
    }

    fn discard_roll(&mut self) {
        self.current.set_placeholder(&self.discarded_text);
    }
}
