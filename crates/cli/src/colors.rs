// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal colors for help output.
//!
//! `NO_COLOR=1` turns colors off, `COLOR=1` forces them without a TTY.

use std::io::IsTerminal;

use anstyle::{Ansi256Color, Color, Style};

use crate::env;

/// ANSI 256-color codes used by help output.
pub mod codes {
    /// Section headers
    pub const HEADER: u8 = 74;
    /// Commands and flags
    pub const LITERAL: u8 = 250;
    /// Placeholders and descriptions
    pub const CONTEXT: u8 = 245;
}

/// Whether help output should carry colors.
pub fn should_colorize() -> bool {
    if env::no_color() {
        return false;
    }
    if env::force_color() {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Foreground style for a 256-color code.
pub fn style(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

fn paint(code: u8, text: &str) -> String {
    let style = style(code);
    format!("{}{}{}", style.render(), text, style.render_reset())
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn literal(text: &str) -> String {
    paint(codes::LITERAL, text)
}

pub fn context(text: &str) -> String {
    paint(codes::CONTEXT, text)
}

/// Colorize an examples block.
///
/// Lines ending in `:` are headers. Other lines are split at the first run
/// of two spaces into a command, colored word by word, and a description
/// left as is.
pub fn examples(text: &str) -> String {
    if !should_colorize() {
        return text.to_string();
    }

    let lines: Vec<String> = text
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            if trimmed.ends_with(':') && !trimmed.contains("  ") {
                return format!("{}{}", indent, header(trimmed));
            }
            match find_description_start(trimmed) {
                Some(end) => format!(
                    "{}{}{}",
                    indent,
                    colorize_command(&trimmed[..end]),
                    &trimmed[end..]
                ),
                None => line.to_string(),
            }
        })
        .collect();
    lines.join("\n")
}

/// Color a command line: words as literals, `<placeholders>` and flag
/// values as context.
pub fn colorize_command(cmd: &str) -> String {
    let mut after_flag = false;
    let words: Vec<String> = cmd
        .split(' ')
        .map(|word| {
            if word.is_empty() {
                return String::new();
            }
            let placeholder = word.starts_with('<') || word.starts_with('"');
            let colored = if placeholder || after_flag {
                context(word)
            } else {
                literal(word)
            };
            after_flag = word.starts_with("--") && !word.contains('=') && !placeholder;
            colored
        })
        .collect();
    words.join(" ")
}

/// Byte offset where a description starts: the first run of two or more
/// spaces that follows some text.
pub fn find_description_start(line: &str) -> Option<usize> {
    let text_end = line.len() - line.trim_start().len();
    line[text_end..]
        .find("  ")
        .map(|pos| pos + text_end)
        .filter(|&pos| pos > 0)
}

#[cfg(test)]
#[path = "colors_tests.rs"]
mod tests;
