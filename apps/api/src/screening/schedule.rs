//! Deterministic email finalization: interview slot drawing and
//! placeholder substitution.
//!
//! The model writes placeholder tokens; everything that replaces them is
//! computed here, in pure functions, before the finished email is appended
//! to the transcript. Nothing in this module touches the network or the
//! clock, which is what makes the substitution rules unit-testable.

use chrono::{Duration, NaiveDate, NaiveTime};
use rand::Rng;

pub const CANDIDATE_NAME_TOKEN: &str = "[CANDIDATE_NAME]";
pub const INTERVIEW_DATE_TOKEN: &str = "[INTERVIEW_DATE]";
pub const INTERVIEW_TIME_TOKEN: &str = "[INTERVIEW_TIME]";

/// Interviews land this many days after the screening run.
const INTERVIEW_LEAD_DAYS: i64 = 3;

/// A drawn interview slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewSlot {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl InterviewSlot {
    /// Draws a slot three days after `today`, on the hour or half hour
    /// between 13:00 and 16:00. A 16:30 draw snaps back to 16:00 so the
    /// window's end is respected.
    pub fn draw(today: NaiveDate, rng: &mut impl Rng) -> Self {
        let date = today + Duration::days(INTERVIEW_LEAD_DAYS);
        let hour = rng.gen_range(13..=16i64);
        let mut minute = if rng.gen_bool(0.5) { 30 } else { 0 };
        if hour == 16 && minute == 30 {
            minute = 0;
        }
        Self {
            date,
            time: NaiveTime::MIN + Duration::hours(hour) + Duration::minutes(minute),
        }
    }

    /// Day-first date, e.g. `04-01-2024`.
    pub fn formatted_date(&self) -> String {
        self.date.format("%d-%m-%Y").to_string()
    }

    /// Twelve-hour clock time, e.g. `01:30 PM`.
    pub fn formatted_time(&self) -> String {
        self.time.format("%I:%M %p").to_string()
    }
}

/// Finalizes a rejection email: only the name token applies.
pub fn finalize_rejection(body: &str, candidate_name: &str) -> String {
    substitute_name(body, candidate_name)
}

/// Finalizes an invitation email. Date and time substitute together or
/// not at all: a body carrying only one of the two tokens keeps both
/// untouched rather than advertising half a slot.
pub fn finalize_invitation(body: &str, candidate_name: &str, slot: &InterviewSlot) -> String {
    let body = substitute_name(body, candidate_name);
    if body.contains(INTERVIEW_DATE_TOKEN) && body.contains(INTERVIEW_TIME_TOKEN) {
        body.replace(INTERVIEW_DATE_TOKEN, &slot.formatted_date())
            .replace(INTERVIEW_TIME_TOKEN, &slot.formatted_time())
    } else {
        body
    }
}

/// A blank candidate name leaves the token in place; an email addressed
/// to nobody is worse than one still carrying the placeholder.
fn substitute_name(body: &str, candidate_name: &str) -> String {
    if candidate_name.trim().is_empty() {
        return body.to_string();
    }
    body.replace(CANDIDATE_NAME_TOKEN, candidate_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::thread_rng;

    fn slot(hour: u32, minute: u32) -> InterviewSlot {
        InterviewSlot {
            date: NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(),
            time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_slot_lands_three_days_out() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let drawn = InterviewSlot::draw(today, &mut thread_rng());
        assert_eq!(drawn.formatted_date(), "04-01-2024");
    }

    #[test]
    fn test_drawn_times_stay_inside_the_window() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let mut rng = thread_rng();
        let floor = NaiveTime::from_hms_opt(13, 0, 0).unwrap();
        let ceiling = NaiveTime::from_hms_opt(16, 0, 0).unwrap();

        for _ in 0..10_000 {
            let drawn = InterviewSlot::draw(today, &mut rng);
            assert!(drawn.time >= floor && drawn.time <= ceiling, "drew {}", drawn.time);
            let minute = drawn.formatted_time()[3..5].parse::<u32>().unwrap();
            assert!(minute == 0 || minute == 30);
        }
    }

    #[test]
    fn test_time_formats_on_twelve_hour_clock() {
        assert_eq!(slot(13, 0).formatted_time(), "01:00 PM");
        assert_eq!(slot(13, 30).formatted_time(), "01:30 PM");
        assert_eq!(slot(16, 0).formatted_time(), "04:00 PM");
    }

    #[test]
    fn test_rejection_substitutes_name_only() {
        let body = "Hello, [CANDIDATE_NAME]\n\nUnfortunately...\n\nThanks,\nThe Recruiting Team.";
        let out = finalize_rejection(body, "Jane Doe");
        assert!(out.contains("Hello, Jane Doe"));
        assert!(!out.contains(CANDIDATE_NAME_TOKEN));
    }

    #[test]
    fn test_blank_name_leaves_token_in_place() {
        let body = "Hello, [CANDIDATE_NAME]";
        assert_eq!(finalize_rejection(body, "   "), body);
    }

    #[test]
    fn test_invitation_substitutes_all_three_tokens() {
        let body =
            "Hello, [CANDIDATE_NAME]\nDate : [INTERVIEW_DATE]\nTime : [INTERVIEW_TIME]\nThanks";
        let out = finalize_invitation(body, "Jane Doe", &slot(14, 30));
        assert!(out.contains("Hello, Jane Doe"));
        assert!(out.contains("Date : 04-01-2024"));
        assert!(out.contains("Time : 02:30 PM"));
    }

    #[test]
    fn test_lone_date_token_is_left_untouched() {
        let body = "Hello, [CANDIDATE_NAME]\nDate : [INTERVIEW_DATE]\nThanks";
        let out = finalize_invitation(body, "Jane Doe", &slot(14, 0));
        assert!(out.contains(INTERVIEW_DATE_TOKEN));
        assert!(!out.contains(CANDIDATE_NAME_TOKEN));
    }

    #[test]
    fn test_finalization_is_idempotent() {
        let body =
            "Hello, [CANDIDATE_NAME]\nDate : [INTERVIEW_DATE]\nTime : [INTERVIEW_TIME]\nThanks";
        let once = finalize_invitation(body, "Jane Doe", &slot(14, 30));
        let twice = finalize_invitation(&once, "Someone Else", &slot(15, 0));
        assert_eq!(once, twice);
    }
}
