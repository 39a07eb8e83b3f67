// Offset adjustment log domain models
use chrono::{NaiveDateTime, Timelike};
use std::collections::VecDeque;
use std::fmt;

/// Stored in place of a blank device id.
pub const DEVICE_ID_PLACEHOLDER: &str = "device id not provided";

const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(u64);

impl EntryId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Local wall-clock time truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordedAt(NaiveDateTime);

impl RecordedAt {
    pub fn new(time: NaiveDateTime) -> Self {
        let truncated = time
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(time);
        Self(truncated)
    }

    pub fn time(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for RecordedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RECORDED_AT_FORMAT))
    }
}

/// One hand-recorded offset change. Fields are private so an entry cannot
/// drift from the delta it was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetLogEntry {
    id: EntryId,
    device_id: String,
    previous_offset_kpa: f64,
    new_offset_kpa: f64,
    delta_kpa: f64,
    recorded_at: RecordedAt,
}

impl OffsetLogEntry {
    fn new(
        id: EntryId,
        device_id_raw: &str,
        previous_offset_kpa: f64,
        new_offset_kpa: f64,
        recorded_at: RecordedAt,
    ) -> Self {
        Self {
            id,
            device_id: normalize_device_id(device_id_raw),
            previous_offset_kpa,
            new_offset_kpa,
            delta_kpa: new_offset_kpa - previous_offset_kpa,
            recorded_at,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn previous_offset_kpa(&self) -> f64 {
        self.previous_offset_kpa
    }

    pub fn new_offset_kpa(&self) -> f64 {
        self.new_offset_kpa
    }

    pub fn delta_kpa(&self) -> f64 {
        self.delta_kpa
    }

    pub fn recorded_at(&self) -> RecordedAt {
        self.recorded_at
    }
}

fn normalize_device_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEVICE_ID_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Newest-first history of offset adjustments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetLog {
    entries: VecDeque<OffsetLogEntry>,
    last_id: u64,
}

impl OffsetLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entry with the next id and put it at the head of the log.
    pub fn prepend(
        &mut self,
        device_id_raw: &str,
        previous_offset_kpa: f64,
        new_offset_kpa: f64,
        recorded_at: RecordedAt,
    ) -> &OffsetLogEntry {
        self.last_id += 1;
        let entry = OffsetLogEntry::new(
            EntryId(self.last_id),
            device_id_raw,
            previous_offset_kpa,
            new_offset_kpa,
            recorded_at,
        );
        self.entries.push_front(entry);
        &self.entries[0]
    }

    pub fn entries(&self) -> impl Iterator<Item = &OffsetLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&OffsetLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
