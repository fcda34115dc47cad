// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal progress bar for sync runs.

use indicatif::{ProgressBar, ProgressStyle};

use super::reconcile::Progress;

const TEMPLATE: &str = "{msg} [{bar:40}] {pos}/{len}";

/// Draws a bar on stderr; indicatif hides it when stderr is not a terminal.
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new(message: &'static str) -> Self {
        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar().template(TEMPLATE) {
            bar.set_style(style.progress_chars("=> "));
        }
        bar.set_message(message);
        BarProgress { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Progress for BarProgress {
    fn set_max(&mut self, max: usize) {
        self.bar.set_length(max as u64);
    }

    fn increment(&mut self) {
        self.bar.inc(1);
    }
}
