// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use shelflog_app::{BUILTIN_CATEGORIES, ItemDetail, ItemRecord, ServerTimestamp};
use std::path::PathBuf;
use time::{Date, Duration, Month};

const REFERENCE_YEAR: i32 = 2025;

const TITLE_OPENERS: [&str; 12] = [
    "The", "A", "Last", "Silent", "Northern", "Hidden", "Broken", "Golden", "Distant", "Midnight",
    "Paper", "Glass",
];

const TITLE_NOUNS: [&str; 14] = [
    "Harbor", "Orchard", "Signal", "Lantern", "Frontier", "Archive", "Garden", "Machine", "River",
    "Kingdom", "Letter", "Circuit", "Voyage", "Tide",
];

const FIRST_NAMES: [&str; 12] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Quinn", "Parker", "Rowan", "Hayden",
    "Elliot", "Robin",
];

const LAST_NAMES: [&str; 12] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Reed", "Turner", "Flores", "Bennett",
    "Price", "Brooks",
];

const TAGS: [&str; 10] = [
    "classic",
    "sci-fi",
    "comfort",
    "rewatch",
    "co-op",
    "indie",
    "award-winner",
    "slow-burn",
    "funny",
    "recommended",
];

const COMMENT_WORDS: [&str; 16] = [
    "great", "pacing", "ending", "characters", "soundtrack", "twist", "dragged", "middle",
    "beautiful", "writing", "would", "revisit", "loved", "world", "tense", "finale",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator for plausible item records. The same seed always yields
/// the same sequence.
#[derive(Debug, Clone)]
pub struct ItemFaker {
    rng: DeterministicRng,
}

impl ItemFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn record(&mut self) -> ItemRecord {
        if self.rng.bool() {
            self.completed_record()
        } else {
            self.in_progress_record()
        }
    }

    pub fn completed_record(&mut self) -> ItemRecord {
        let rating = self.int_n(21) as f64 / 2.0;
        let comments = if self.rng.bool() {
            self.sentence(3, 8)
        } else {
            String::new()
        };
        ItemRecord {
            detail: ItemDetail::Completed {
                rating: Some(rating),
                comments,
            },
            completed_at: Some(ServerTimestamp),
            ..self.common_fields()
        }
    }

    pub fn in_progress_record(&mut self) -> ItemRecord {
        let total_units = 1 + self.int_n(40) as u32;
        let current_units = self.int_n(total_units as usize) as u32;
        ItemRecord {
            detail: ItemDetail::InProgress {
                current_units,
                total_units,
            },
            completed_at: None,
            ..self.common_fields()
        }
    }

    pub fn date_in_year(&mut self, year: i32) -> Date {
        let start = calendar_date(year, Month::January, 1);
        let offset = self.int_n(365) as i64;
        start + Duration::days(offset)
    }

    fn common_fields(&mut self) -> ItemRecord {
        let category = self.pick(&BUILTIN_CATEGORIES).to_owned();
        let name = format!("{} {}", self.pick(&TITLE_OPENERS), self.pick(&TITLE_NOUNS));
        let creator = if self.int_n(4) == 0 {
            String::new()
        } else {
            format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&LAST_NAMES))
        };
        let tag_count = self.int_n(3);
        let tags = (0..tag_count)
            .map(|_| self.pick(&TAGS).to_owned())
            .collect::<Vec<_>>();
        let date_experienced = self
            .rng
            .bool()
            .then(|| self.date_in_year(REFERENCE_YEAR));
        ItemRecord {
            category,
            name,
            creator,
            tags,
            date_experienced,
            detail: ItemDetail::Completed {
                rating: None,
                comments: String::new(),
            },
            completed_at: None,
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn sentence(&mut self, min_words: usize, max_words: usize) -> String {
        let count = min_words + self.int_n(max_words.saturating_sub(min_words) + 1);
        let mut sentence = (0..count)
            .map(|_| self.pick(&COMMENT_WORDS))
            .collect::<Vec<_>>()
            .join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("shelflog.db");
    Ok((dir, db_path))
}

pub fn fixture_datetime() -> &'static str {
    "2026-02-19T12:34:56Z"
}

fn calendar_date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}
