//! Chart descriptions derived from a [`StatsBundle`].
//!
//! Building the data for each chart is kept apart from drawing it so the
//! selection, ordering and labelling can be tested without touching the
//! plotting backend.

use chrono::{Days, NaiveDate};

use crate::core::stats::{Bucket, DistinguishingWords, ParticipantStats, StatsBundle};

/// Longest category label drawn under a bar group.
const MAX_LABEL_CHARS: usize = 18;

/// One chart, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    /// File stem of the rendered image
    pub name: &'static str,
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Bars(BarChart),
    Line(LineChart),
    /// Small bar charts laid out in a grid, one per participant
    Panels(Vec<Panel>),
}

/// One titled cell of a [`ChartData::Panels`] grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    pub bars: BarChart,
}

/// Grouped bar chart: one group per category, one bar per series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BarChart {
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl BarChart {
    /// Largest value across all series (0 when empty).
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }
}

/// Values of one series, aligned with [`BarChart::categories`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Day-indexed time series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    /// Date of point `0`
    pub start: Option<NaiveDate>,
    /// `(days since start, value)`, one point per day, gaps filled with zero
    pub points: Vec<(u64, f64)>,
}

impl LineChart {
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.1).fold(0.0, f64::max)
    }

    /// Date of a point offset.
    pub fn date_at(&self, offset: u64) -> Option<NaiveDate> {
        self.start?.checked_add_days(Days::new(offset))
    }
}

/// Every chart the renderer produces, in output order.
pub fn charts(stats: &StatsBundle) -> Vec<Chart> {
    let senders = stats.participant_names();

    vec![
        Chart {
            name: "sender_messages",
            title: "Messages sent".into(),
            x_label: "Sender",
            y_label: "Messages sent",
            data: ChartData::Bars(per_participant(&stats.participants, "Messages", |p| p.messages)),
        },
        Chart {
            name: "sender_words",
            title: "Words written".into(),
            x_label: "Sender",
            y_label: "Words",
            data: ChartData::Bars(per_participant(&stats.participants, "Words", |p| p.words)),
        },
        Chart {
            name: "sender_media",
            title: "Photos, videos and stickers sent".into(),
            x_label: "Sender",
            y_label: "Media messages",
            data: ChartData::Bars(per_participant(&stats.participants, "Media", |p| p.media)),
        },
        Chart {
            name: "daily_messages",
            title: "Messages per day".into(),
            x_label: "Day",
            y_label: "Messages sent",
            data: ChartData::Line(daily_line(stats)),
        },
        Chart {
            name: "weekday_messages",
            title: "Messages per day of the week".into(),
            x_label: "Day of the week",
            y_label: "Messages sent",
            data: ChartData::Bars(grouped(&stats.weekday, &senders, |b| b.label.clone())),
        },
        Chart {
            name: "time_in_day_messages",
            title: "Messages per hour of the day".into(),
            x_label: "Hour in day",
            y_label: "Messages sent",
            data: ChartData::Bars(grouped(&stats.hourly, &senders, |b| b.label.clone())),
        },
        Chart {
            name: "top_days_messages",
            title: "Busiest days".into(),
            x_label: "Top days with most messages",
            y_label: "Messages sent",
            data: ChartData::Bars(grouped(&stats.top_days, &senders, |b| b.label.clone())),
        },
        Chart {
            name: "per_term_messages",
            title: "Messages per term".into(),
            x_label: "Term",
            y_label: "Messages sent",
            data: ChartData::Bars(grouped(&stats.terms, &senders, |b| b.label.clone())),
        },
        Chart {
            name: "top_stickers",
            title: "Most used stickers".into(),
            x_label: "Sticker",
            y_label: "Occurrences",
            data: ChartData::Bars(grouped(&stats.top_stickers, &senders, |b| {
                sticker_label(&b.label, &stats.top_stickers)
            })),
        },
        Chart {
            name: "call_duration",
            title: "Longest calls".into(),
            x_label: "Day of call",
            y_label: "Call duration in seconds",
            data: ChartData::Bars(BarChart {
                categories: stats
                    .longest_calls
                    .iter()
                    .map(|c| c.date.format("%Y-%m-%d").to_string())
                    .collect(),
                series: single_series(
                    "Duration",
                    stats.longest_calls.iter().map(|c| c.duration_secs),
                    stats.longest_calls.is_empty(),
                ),
            }),
        },
        Chart {
            name: "emoji_total",
            title: "Most common emoji".into(),
            x_label: "Emoji",
            y_label: "Occurrences",
            data: ChartData::Bars(grouped(&stats.top_emojis, &senders, |b| b.label.clone())),
        },
        Chart {
            name: "names",
            title: "Who says whose name".into(),
            x_label: "Name said in chat",
            y_label: "Occurrences",
            data: ChartData::Bars(grouped(&stats.name_mentions, &senders, |b| {
                format!("\"{}\"", b.label)
            })),
        },
        Chart {
            name: "distinguishing_words",
            title: "Our most distinguishing words".into(),
            x_label: "Most distinguishing words",
            y_label: "Uniqueness score",
            data: ChartData::Panels(word_panels(&stats.distinguishing_words)),
        },
    ]
}

/// One bar per participant, tallest first.
fn per_participant(
    participants: &[ParticipantStats],
    series: &str,
    value: impl Fn(&ParticipantStats) -> u64,
) -> BarChart {
    let mut ranked: Vec<&ParticipantStats> = participants.iter().collect();
    ranked.sort_by(|a, b| value(*b).cmp(&value(*a)).then_with(|| a.name.cmp(&b.name)));

    BarChart {
        categories: ranked.iter().map(|p| truncate(&p.name)).collect(),
        series: single_series(series, ranked.iter().map(|p| value(*p)), ranked.is_empty()),
    }
}

fn single_series(name: &str, values: impl Iterator<Item = u64>, empty: bool) -> Vec<Series> {
    if empty {
        return Vec::new();
    }
    vec![Series {
        name: name.to_string(),
        values: values.map(|v| v as f64).collect(),
    }]
}

/// One category per bucket, one series per sender.
fn grouped(buckets: &[Bucket], senders: &[&str], label: impl Fn(&Bucket) -> String) -> BarChart {
    if buckets.is_empty() {
        return BarChart::default();
    }

    BarChart {
        categories: buckets.iter().map(|b| truncate(&label(b))).collect(),
        series: senders
            .iter()
            .map(|&sender| Series {
                name: sender.to_string(),
                values: buckets.iter().map(|b| b.count(sender) as f64).collect(),
            })
            .collect(),
    }
}

fn daily_line(stats: &StatsBundle) -> LineChart {
    let Some(first) = stats.daily.first() else {
        return LineChart::default();
    };

    let points = stats
        .daily
        .iter()
        .map(|d| {
            let offset = (d.date - first.date).num_days().max(0) as u64;
            (offset, d.messages as f64)
        })
        .collect::<Vec<_>>();

    let mut filled = Vec::with_capacity(points.last().map_or(0, |p| p.0 as usize + 1));
    let mut next = 0;
    for (offset, value) in points {
        while next < offset {
            filled.push((next, 0.0));
            next += 1;
        }
        filled.push((offset, value));
        next = offset + 1;
    }

    LineChart {
        start: Some(first.date),
        points: filled,
    }
}

fn word_panels(distinguishing: &[DistinguishingWords]) -> Vec<Panel> {
    distinguishing
        .iter()
        .map(|d| Panel {
            title: truncate(&d.sender),
            bars: BarChart {
                categories: d.words.iter().map(|w| truncate(&w.word)).collect(),
                series: if d.words.is_empty() {
                    Vec::new()
                } else {
                    vec![Series {
                        name: d.sender.clone(),
                        values: d.words.iter().map(|w| w.score).collect(),
                    }]
                },
            },
        })
        .collect()
}

/// Sticker URIs are long export paths, so only the file name is shown.
/// The parent folder is kept when another sticker has the same file name.
fn sticker_label(uri: &str, stickers: &[Bucket]) -> String {
    let mut parts = uri.rsplitn(3, '/');
    let name = parts.next().unwrap_or(uri);
    let clashes = stickers
        .iter()
        .filter(|b| b.label.rsplit('/').next() == Some(name))
        .count()
        > 1;

    match parts.next() {
        Some(parent) if clashes => format!("{parent}/{name}"),
        _ => name.to_string(),
    }
}

fn truncate(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        label.to_string()
    } else {
        let mut short: String = label.chars().take(MAX_LABEL_CHARS - 1).collect();
        short.push('…');
        short
    }
}
