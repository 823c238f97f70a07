//! Conversation aggregation.
//!
//! [`aggregate`] is a pure function from a [`Conversation`] to a
//! [`StatsBundle`]. Per-sender breakdowns always list every participant,
//! with zero where they have no messages in that slice.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike};
use tracing::debug;

use super::stats::{
    Bucket, CallRecord, DailyCount, DistinguishingWords, ParticipantStats, StatsBundle, Streak,
    WEEKDAYS, WordScore,
};
use super::tokens::{emojis, first_name, words};
use crate::config::AggregateConfig;
use crate::conversation::Conversation;

/// Computes every statistic for a conversation.
///
/// An empty conversation yields a bundle whose series are all empty.
///
/// # Example
///
/// ```rust
/// use chatgraph::{Conversation, Message};
/// use chatgraph::config::AggregateConfig;
/// use chatgraph::core::aggregate;
/// use chrono::{TimeZone, Utc};
///
/// let day1 = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
/// let day2 = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
/// let conv = Conversation::new(None, vec![
///     Message::text("A", day1, "hi"),
///     Message::text("B", day1, "hey"),
///     Message::text("A", day2, "bye"),
/// ]);
///
/// let stats = aggregate(&conv, &AggregateConfig::default());
/// assert_eq!(stats.participants[0].messages, 2);
/// assert_eq!(stats.daily[0].messages, 2);
/// assert_eq!(stats.daily[1].messages, 1);
/// ```
pub fn aggregate(conversation: &Conversation, config: &AggregateConfig) -> StatsBundle {
    let mut stats = StatsBundle {
        title: conversation.title().map(str::to_string),
        total_messages: conversation.len() as u64,
        ..StatsBundle::default()
    };

    if conversation.is_empty() {
        return stats;
    }

    let offset = config.utc_offset();
    let names: Vec<&str> = conversation
        .participants()
        .iter()
        .map(String::as_str)
        .collect();

    let mut participants: BTreeMap<&str, ParticipantStats> = names
        .iter()
        .map(|&n| (n, ParticipantStats::new(n)))
        .collect();
    let mut weekday: Vec<Bucket> = WEEKDAYS
        .iter()
        .map(|d| Bucket::new(*d, names.iter().copied()))
        .collect();
    let mut hourly: Vec<Bucket> = (0..24)
        .map(|h| Bucket::new(format!("{h:02}"), names.iter().copied()))
        .collect();
    let mut days: BTreeMap<NaiveDate, Bucket> = BTreeMap::new();
    let mut terms: BTreeMap<String, Bucket> = BTreeMap::new();
    let mut stickers: HashMap<String, Bucket> = HashMap::new();
    let mut emoji_counts: HashMap<String, Bucket> = HashMap::new();
    let mut calls: Vec<CallRecord> = Vec::new();
    let mut vocabulary: BTreeMap<&str, HashMap<String, u64>> =
        names.iter().map(|&n| (n, HashMap::new())).collect();

    let mut mentions: BTreeMap<String, Bucket> = names
        .iter()
        .filter_map(|n| first_name(n))
        .map(|f| (f.clone(), Bucket::new(f, names.iter().copied())))
        .collect();

    for msg in conversation.messages() {
        let sender = msg.sender();
        let local: DateTime<FixedOffset> = msg.timestamp().with_timezone(&offset);
        let date = local.date_naive();

        if let Some(p) = participants.get_mut(sender) {
            p.messages += 1;
            if msg.is_text() {
                p.words += msg.word_count() as u64;
                p.characters += msg.char_count() as u64;
            } else if msg.is_media() {
                p.media += 1;
            } else if msg.is_other() {
                p.other += 1;
            }
        }

        weekday[local.weekday().num_days_from_monday() as usize].add(sender, 1);
        hourly[local.hour() as usize].add(sender, 1);
        days.entry(date)
            .or_insert_with(|| Bucket::new(date.to_string(), names.iter().copied()))
            .add(sender, 1);
        let term = term_label(date);
        terms
            .entry(term.clone())
            .or_insert_with(|| Bucket::new(term, names.iter().copied()))
            .add(sender, 1);

        if let Some(uri) = msg.sticker() {
            stickers
                .entry(uri.to_string())
                .or_insert_with(|| Bucket::new(uri, names.iter().copied()))
                .add(sender, 1);
        }

        if let Some(duration_secs) = msg.call_duration() {
            calls.push(CallRecord {
                date,
                caller: sender.to_string(),
                duration_secs,
            });
        }

        // Call and membership records carry system text, not user text.
        if msg.is_text() {
            if let Some(text) = msg.text_content() {
                for emoji in emojis(text) {
                    emoji_counts
                        .entry(emoji.to_string())
                        .or_insert_with(|| Bucket::new(emoji, names.iter().copied()))
                        .add(sender, 1);
                }
                let used = vocabulary.entry(sender).or_default();
                for word in words(text) {
                    if let Some(bucket) = mentions.get_mut(&word) {
                        bucket.add(sender, 1);
                    }
                    if word.chars().count() > 1 {
                        *used.entry(word).or_insert(0) += 1;
                    }
                }
            }
        }
    }

    stats.daily = days
        .iter()
        .map(|(date, b)| DailyCount {
            date: *date,
            messages: b.total,
        })
        .collect();
    stats.longest_streak = longest_streak(days.keys().copied());
    stats.top_days = top_n(days.into_values(), config.top_days);
    stats.participants = participants.into_values().collect();
    stats.weekday = weekday;
    stats.hourly = hourly;
    stats.terms = terms.into_values().collect();
    stats.top_stickers = top_n(stickers.into_values(), config.top_stickers);
    stats.top_emojis = top_n(emoji_counts.into_values(), config.top_emojis);
    stats.name_mentions = mentions.into_values().collect();
    stats.distinguishing_words = distinguishing_words(&vocabulary, config.top_words);

    // Longest first; ties keep chronological order because the sort is stable.
    calls.sort_by(|a, b| b.duration_secs.cmp(&a.duration_secs));
    calls.truncate(config.top_calls);
    stats.longest_calls = calls;

    debug!(
        messages = stats.total_messages,
        participants = stats.participants.len(),
        days = stats.daily.len(),
        "aggregated conversation"
    );

    stats
}

/// Four-month term label: `2024 T1 W` (Jan-Apr), `2024 T2 S` (May-Aug),
/// `2024 T3 F` (Sep-Dec).
pub fn term_label(date: NaiveDate) -> String {
    let term = match date.month() {
        1..=4 => "T1 W",
        5..=8 => "T2 S",
        _ => "T3 F",
    };
    format!("{} {}", date.year(), term)
}

/// Keeps the `n` largest buckets, ordered by total descending then label.
fn top_n(buckets: impl IntoIterator<Item = Bucket>, n: usize) -> Vec<Bucket> {
    let mut all: Vec<Bucket> = buckets.into_iter().collect();
    all.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    all.truncate(n);
    all
}

/// Scores every sender's words by tf-idf, each sender being one document.
fn distinguishing_words(
    vocabulary: &BTreeMap<&str, HashMap<String, u64>>,
    n: usize,
) -> Vec<DistinguishingWords> {
    let documents = vocabulary.len() as f64;
    let mut document_frequency: HashMap<&str, u64> = HashMap::new();
    for used in vocabulary.values() {
        for word in used.keys() {
            *document_frequency.entry(word.as_str()).or_insert(0) += 1;
        }
    }

    vocabulary
        .iter()
        .map(|(&sender, used)| {
            let total: u64 = used.values().sum();
            let mut scored: Vec<WordScore> = used
                .iter()
                .filter_map(|(word, &count)| {
                    let df = document_frequency.get(word.as_str()).copied().unwrap_or(1);
                    let idf = (documents / df as f64).ln();
                    let score = round_score(count as f64 / total as f64 * idf);
                    (score > 0.0).then(|| WordScore {
                        word: word.clone(),
                        count,
                        score,
                    })
                })
                .collect();
            scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.word.cmp(&b.word)));
            scored.truncate(n);

            DistinguishingWords {
                sender: sender.to_string(),
                words: scored,
            }
        })
        .collect()
}

fn round_score(score: f64) -> f64 {
    (score * 1e6).round() / 1e6
}

/// Longest run of consecutive dates; the earliest run wins ties.
///
/// `dates` must be ascending and unique.
fn longest_streak(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Streak> {
    let mut best: Option<Streak> = None;
    let mut current: Option<Streak> = None;

    for date in dates {
        current = match current {
            Some(run) if run.end.succ_opt() == Some(date) => Some(Streak {
                end: date,
                days: run.days + 1,
                ..run
            }),
            _ => Some(Streak {
                start: date,
                end: date,
                days: 1,
            }),
        };

        if let Some(run) = current {
            if best.is_none_or(|b| run.days > b.days) {
                best = Some(run);
            }
        }
    }

    best
}
