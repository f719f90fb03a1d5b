// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Structural schedule validation
//!
//! Only the shape of the expression is checked: five fields for the standard
//! form, up to seven with the seconds/year extensions. Value ranges and
//! step syntax are left to `crontab` itself at install time.

/// Smallest accepted field count
pub const MIN_FIELDS: usize = 5;

/// Largest accepted field count
pub const MAX_FIELDS: usize = 7;

/// Check that `expr` has between [`MIN_FIELDS`] and [`MAX_FIELDS`] fields.
pub fn is_valid_schedule(expr: &str) -> bool {
    let count = expr.split_whitespace().count();
    (MIN_FIELDS..=MAX_FIELDS).contains(&count)
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;
