use crate::config::BreakDays;
use crate::models::{ActivityDay, DateRange, StreakStats};
use chrono::{Datelike, NaiveDate};

/// Aggregates an ascending day series into totals and streaks.
pub fn build_stats(days: &[ActivityDay], break_days: &BreakDays) -> StreakStats {
    let (longest_streak, longest_range) = longest_streak(days, break_days);
    let (current_streak, current_range) = current_streak(days, break_days);

    StreakStats {
        total: total_contributions(days),
        longest_streak,
        current_streak,
        longest_range,
        current_range,
        overall_range: overall_range(days),
    }
}

pub fn total_contributions(days: &[ActivityDay]) -> u64 {
    days.iter().fold(0u64, |sum, day| sum.saturating_add(day.count))
}

pub fn longest_streak(days: &[ActivityDay], break_days: &BreakDays) -> (u32, DateRange) {
    let mut run_len = 0u32;
    let mut run_start: Option<NaiveDate> = None;
    let mut best_len = 0u32;
    let mut best = DateRange::none();

    for day in days {
        if day.is_active() {
            if run_len == 0 {
                run_start = Some(day.date);
            }
            run_len += 1;
            if run_len > best_len {
                best_len = run_len;
                best = DateRange {
                    start: run_start,
                    end: Some(day.date),
                };
            }
        } else if !is_break_day(day, break_days) {
            run_len = 0;
        }
    }

    (best_len, best)
}

/// Walks back from the most recent day until an inactive day outside the break set.
pub fn current_streak(days: &[ActivityDay], break_days: &BreakDays) -> (u32, DateRange) {
    let mut streak = 0u32;
    let mut range = DateRange::none();

    for day in days.iter().rev() {
        if day.is_active() {
            streak += 1;
            range.start = Some(day.date);
            if range.end.is_none() {
                range.end = Some(day.date);
            }
        } else if is_break_day(day, break_days) {
            continue;
        } else {
            break;
        }
    }

    (streak, range)
}

pub fn overall_range(days: &[ActivityDay]) -> DateRange {
    let start = days
        .iter()
        .find(|day| day.is_active())
        .or_else(|| days.first())
        .map(|day| day.date);

    DateRange {
        start,
        end: days.last().map(|day| day.date),
    }
}

fn is_break_day(day: &ActivityDay, break_days: &BreakDays) -> bool {
    break_days.contains(day.date.weekday())
}
