// ABOUTME: Display helpers for session progress values
// ABOUTME: Formats elapsed seconds as zero-padded MM:SS for timers and summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Format elapsed seconds as `MM:SS`
///
/// Minutes are not wrapped into hours, so 3725 seconds renders as `62:05`.
#[must_use]
pub fn format_elapsed(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
