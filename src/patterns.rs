//! Compiled regex patterns used by the extraction pipeline.
//!
//! All patterns are compiled once at first use via `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

/// Two or more consecutive line-break characters (`\r` or `\n`).
pub static LINE_BREAK_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\r\n]{2,}").expect("LINE_BREAK_RUN regex")
});

/// Literal doctype marker at the start of a text run.
pub static DOCTYPE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<!doctype").expect("DOCTYPE_MARKER regex")
});
