use crate::models::{DateRange, StreakStats};
use chrono::NaiveDate;

const EMPTY_RANGE: &str = "No activity yet";

pub fn render_card(stats: &StreakStats) -> String {
    CARD_SVG
        .replace("{{TOTAL}}", &format_count(stats.total))
        .replace("{{TOTAL_RANGE}}", &escape_xml(&format_range(&stats.overall_range)))
        .replace("{{CURRENT}}", &format_count(u64::from(stats.current_streak)))
        .replace("{{CURRENT_RANGE}}", &escape_xml(&format_range(&stats.current_range)))
        .replace("{{LONGEST}}", &format_count(u64::from(stats.longest_streak)))
        .replace("{{LONGEST_RANGE}}", &escape_xml(&format_range(&stats.longest_range)))
}

pub fn format_range(range: &DateRange) -> String {
    match (range.start, range.end) {
        (Some(start), Some(end)) if start == end => format_date(start),
        (Some(start), Some(end)) => format!("{} - {}", format_date(start), format_date(end)),
        (Some(date), None) | (None, Some(date)) => format_date(date),
        (None, None) => EMPTY_RANGE.to_string(),
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Groups digits in threes: `12345` becomes `12,345`.
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const CARD_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="495" height="195" viewBox="0 0 495 195" role="img" aria-label="Contribution streak">
  <style>
    .number { font: 700 28px "Segoe UI", Ubuntu, sans-serif; fill: #2f4858; }
    .label { font: 600 14px "Segoe UI", Ubuntu, sans-serif; fill: #ff6b4a; }
    .range { font: 400 12px "Segoe UI", Ubuntu, sans-serif; fill: #5f5c57; }
    .current { font: 700 28px "Segoe UI", Ubuntu, sans-serif; fill: #2b2a28; }
  </style>
  <rect x="0.5" y="0.5" rx="4.5" width="494" height="194" fill="#fffaf2" stroke="#e4e2e2"/>
  <line x1="165" y1="28" x2="165" y2="170" stroke="#e4e2e2" stroke-width="1"/>
  <line x1="330" y1="28" x2="330" y2="170" stroke="#e4e2e2" stroke-width="1"/>

  <g transform="translate(82.5, 48)" text-anchor="middle">
    <text class="number" y="32">{{TOTAL}}</text>
    <text class="label" y="70">Total Contributions</text>
    <text class="range" y="100">{{TOTAL_RANGE}}</text>
  </g>

  <g transform="translate(247.5, 48)" text-anchor="middle">
    <circle cx="0" cy="21" r="40" fill="none" stroke="#ff6b4a" stroke-width="5"/>
    <text class="current" y="32">{{CURRENT}}</text>
    <text class="label" y="90">Current Streak</text>
    <text class="range" y="114">{{CURRENT_RANGE}}</text>
  </g>

  <g transform="translate(412.5, 48)" text-anchor="middle">
    <text class="number" y="32">{{LONGEST}}</text>
    <text class="label" y="70">Longest Streak</text>
    <text class="range" y="100">{{LONGEST_RANGE}}</text>
  </g>
</svg>
"##;
