// Offset log service - Use case for recording hand-made offset adjustments
use crate::application::clock::Clock;
use crate::domain::error::{ParseError, ParseResult};
use crate::domain::offset_log::{OffsetLog, OffsetLogEntry, RecordedAt};
use crate::domain::pressure::parse_decimal;
use std::sync::Arc;

#[derive(Clone)]
pub struct OffsetLogService {
    clock: Arc<dyn Clock>,
}

impl OffsetLogService {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Returns the new entry together with a copy of `existing_log` that has
    /// it at the head. `existing_log` itself is never modified.
    pub fn record_offset_adjustment(
        &self,
        device_id_raw: &str,
        previous_raw: &str,
        new_raw: &str,
        existing_log: &OffsetLog,
    ) -> ParseResult<(OffsetLogEntry, OffsetLog)> {
        let (Some(previous), Some(new)) = (parse_decimal(previous_raw), parse_decimal(new_raw)) else {
            tracing::warn!(
                "Rejected offset input: previous={:?}, new={:?}",
                previous_raw, new_raw
            );
            return Err(ParseError::Offset);
        };

        let recorded_at = RecordedAt::new(self.clock.now());

        let mut log = existing_log.clone();
        let entry = log.prepend(device_id_raw, previous, new, recorded_at).clone();

        tracing::info!(
            "Recorded offset adjustment #{} for {}: {:.3} -> {:.3} kPa (delta {:+.3})",
            entry.id(),
            entry.device_id(),
            entry.previous_offset_kpa(),
            entry.new_offset_kpa(),
            entry.delta_kpa()
        );

        Ok((entry, log))
    }
}
