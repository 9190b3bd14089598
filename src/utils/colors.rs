/// ANSI color helper utilities for terminal output.
use crate::models::{StaffStatus, WorkStatus};

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub fn color_for_work_status(status: WorkStatus) -> &'static str {
    match status {
        WorkStatus::Pending => YELLOW,
        WorkStatus::InProgress => BLUE,
        WorkStatus::Completed => GREEN,
        WorkStatus::Cancelled => GREY,
    }
}

pub fn color_for_staff_status(status: StaffStatus) -> &'static str {
    match status {
        StaffStatus::Active => GREEN,
        StaffStatus::OnLeave => YELLOW,
        StaffStatus::Inactive => RED,
    }
}

/// ≥ 4.5 green, ≥ 4.0 yellow, red below.
pub fn color_for_rating(rating: f64) -> &'static str {
    if rating >= 4.5 {
        GREEN
    } else if rating >= 4.0 {
        YELLOW
    } else {
        RED
    }
}

/// Confidence percentage: ≥ 80 red (likely overflow), ≥ 50 yellow, grey below.
pub fn color_for_confidence(pct: f64) -> &'static str {
    if pct >= 80.0 {
        RED
    } else if pct >= 50.0 {
        YELLOW
    } else {
        GREY
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}
