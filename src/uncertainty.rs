//! Positional uncertainty index built from the national `.apu` file.

use crate::layout::{APU_LAYOUT, field, slice_field};
use crate::models::UncertaintyRecord;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Lookup from trimmed station name to its uncertainty figures
#[derive(Debug, Clone, Default)]
pub struct UncertaintyIndex {
    entries: HashMap<String, UncertaintyRecord>,
}

impl UncertaintyIndex {
    /// Index every station row of an `.apu` file.
    ///
    /// Rows whose raw station field is entirely spaces are summary or
    /// separator rows and are never indexed. A row that ends before the
    /// uncertainty columns is indexed with whatever figures it reaches,
    /// which may be empty.
    pub fn build<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let station_spec = APU_LAYOUT.fields[0];
        let mut entries: HashMap<String, UncertaintyRecord> = HashMap::new();
        let mut skipped = 0usize;
        let mut partial = 0usize;

        for (line_number, line) in lines.into_iter().enumerate() {
            let raw_station = slice_field(line, station_spec.start, station_spec.end);
            if raw_station.trim().is_empty() {
                skipped += 1;
                continue;
            }

            let complete = line.trim_end_matches(['\r', '\n']).len() >= APU_LAYOUT.min_span;
            let record = APU_LAYOUT.decode_partial(line);
            let station = record.value(field::STATION).to_string();
            if !complete {
                partial += 1;
                debug!(
                    "apu line {} ('{}') ends before the uncertainty columns",
                    line_number + 1,
                    station
                );
            }

            if entries.contains_key(&station) {
                if complete {
                    warn!(
                        "Station '{}' has a second uncertainty row at line {}; keeping the first",
                        station,
                        line_number + 1
                    );
                } else {
                    trace!("Ignoring repeated apu key '{}' at line {}", station, line_number + 1);
                }
                continue;
            }

            entries.insert(
                station.clone(),
                UncertaintyRecord {
                    station,
                    hz_pos_u: record.value(field::HZ_POS_U).to_string(),
                    vt_pos_u: record.value(field::VT_POS_U).to_string(),
                },
            );
        }

        debug!(
            "Built uncertainty index: {} keys, {} short rows, {} rows skipped",
            entries.len(),
            partial,
            skipped
        );
        Self { entries }
    }

    pub fn lookup(&self, station: &str) -> Option<&UncertaintyRecord> {
        self.entries.get(station.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
