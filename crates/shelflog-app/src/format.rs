// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::macros::format_description;
use time::{Date, OffsetDateTime};

const PROGRESS_FILLED: char = '█';
const PROGRESS_EMPTY: char = '░';

/// Whole-number percentage of `current` over `total`; a zero total counts as one unit.
pub fn completion_percent(current: u32, total: u32) -> u32 {
    let total = total.max(1);
    ((f64::from(current) / f64::from(total)) * 100.0).round() as u32
}

pub fn format_rating(rating: f64) -> String {
    let rounded = (rating * 10.0).round() / 10.0;
    if rounded.fract().abs() < f64::EPSILON {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

pub fn rating_label(rating: Option<f64>) -> String {
    rating.map_or_else(String::new, |value| format!("{}/10", format_rating(value)))
}

pub fn tags_label(tags: &[String]) -> String {
    tags.join(", ")
}

pub fn format_date(value: Option<Date>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

pub fn format_timestamp(value: Option<OffsetDateTime>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    value
        .format(&format_description!("[year]-[month]-[day] [hour]:[minute]"))
        .unwrap_or_default()
}

pub fn parse_date(input: &str) -> Option<Date> {
    Date::parse(input.trim(), &format_description!("[year]-[month]-[day]")).ok()
}

/// Fixed-width text bar; percentages past 100 render full.
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width).div_ceil(100).min(width);
    let mut bar = String::with_capacity(width * PROGRESS_FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(PROGRESS_FILLED, filled));
    bar.extend(std::iter::repeat_n(PROGRESS_EMPTY, width - filled));
    bar
}

pub fn progress_label(current: u32, total: u32) -> String {
    format!(
        "{current}/{total} ({}%)",
        completion_percent(current, total)
    )
}
