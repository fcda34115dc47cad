// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Name normalization shared by both sync directions.
//!
//! Remote names are user-editable and never trusted as-is. Local directory
//! names are always derived from [`normalize_name`], and every comparison
//! between a remote and a local name goes through [`names_match`] so the
//! two sides agree regardless of spacing or capitalisation.

/// Separator used to encode nested asset categories in a single board name.
pub const CATEGORY_SEPARATOR: char = '/';

/// Strip whitespace and title-case each word.
///
/// `"my shot"` becomes `"MyShot"` and `"SEQ01"` becomes `"Seq01"`. Capitals
/// inside a word are kept unless the whole name is upper case, so the result
/// is a fixpoint: normalizing it again returns it unchanged. Characters that
/// cannot appear in a directory name are dropped.
pub fn normalize_name(name: &str) -> String {
    let joined: String = name
        .split_whitespace()
        .map(capitalize_first)
        .collect::<String>()
        .chars()
        .filter(|c| is_path_safe(*c))
        .collect();

    if joined.chars().any(char::is_lowercase) {
        joined
    } else {
        let mut chars = joined.chars();
        match chars.next() {
            Some(first) => std::iter::once(first)
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => joined,
        }
    }
}

/// Normalize a name for use as one directory component.
///
/// Returns `None` when nothing usable is left (`""`, `.` or `..`), so a
/// remote name can never point outside the directory it is joined to.
pub fn path_segment(name: &str) -> Option<String> {
    let segment = normalize_name(name);
    match segment.as_str() {
        "" | "." | ".." => None,
        _ => Some(segment),
    }
}

/// Normalize every `/`-separated segment of a category name.
///
/// Asset boards may describe nested categories (`"characters/hero props"`),
/// which map to nested directories (`Characters/HeroProps`).
pub fn normalize_category(name: &str) -> String {
    category_segments(name).join("/")
}

/// Split a category name on `/` and normalize each non-empty segment.
pub fn category_segments(name: &str) -> Vec<String> {
    name.split(CATEGORY_SEPARATOR)
        .map(normalize_name)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Returns true if a remote name and a local name refer to the same thing.
pub fn names_match(remote: &str, local: &str) -> bool {
    normalize_category(remote).to_lowercase() == normalize_category(local).to_lowercase()
}

/// Returns true for boards that only serve as copy sources for new boards.
pub fn is_template_name(name: &str) -> bool {
    name.to_lowercase().contains("template")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_path_safe(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.')
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod tests;
