//! Fixed-width record codec.
//!
//! Named column layouts for the national adjustment position file (`.xyz`),
//! the positional uncertainty file (`.apu`) and the jurisdiction report.
//! Every byte offset used anywhere in the crate lives in one of these tables.

use std::collections::HashMap;

/// How a decoded field value is trimmed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trim {
    /// Trailing whitespace removed, leading alignment kept (numeric columns)
    End,
    /// Both sides trimmed (name columns)
    Both,
}

/// A single named column: `line[start..end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
    pub trim: Trim,
}

impl FieldSpec {
    const fn new(name: &'static str, start: usize, end: usize, trim: Trim) -> Self {
        Self {
            name,
            start,
            end,
            trim,
        }
    }

    pub fn width(&self) -> usize {
        self.end - self.start
    }
}

/// An ordered column layout
#[derive(Debug, Clone, Copy)]
pub struct FixedWidthLayout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    /// Shortest line that still carries every mandatory field
    pub min_span: usize,
}

/// Raised when a line is too short for the layout's mandatory fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTooShort {
    pub layout: &'static str,
    pub required: usize,
    pub found: usize,
}

/// Field values decoded from one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    values: HashMap<&'static str, String>,
}

impl DecodedRecord {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Field value, empty when the layout has no such field
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }
}

pub mod field {
    pub const STATION: &str = "station";
    pub const CONSTRAINT: &str = "constraint";
    pub const EASTING: &str = "easting";
    pub const NORTHING: &str = "northing";
    pub const ZONE: &str = "zone";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const H_ORTHO: &str = "h_ortho";
    pub const H_ELLIPSE: &str = "h_ellipse";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const Z: &str = "z";
    pub const SD_E: &str = "sd_e";
    pub const SD_N: &str = "sd_n";
    pub const SD_UP: &str = "sd_up";
    pub const DESCRIPTION: &str = "description";
    pub const HZ_POS_U: &str = "hz_pos_u";
    pub const VT_POS_U: &str = "vt_pos_u";
}

const POSITION_FIELDS: [FieldSpec; 16] = [
    FieldSpec::new(field::STATION, 0, 20, Trim::Both),
    FieldSpec::new(field::CONSTRAINT, 20, 28, Trim::End),
    FieldSpec::new(field::EASTING, 28, 42, Trim::End),
    FieldSpec::new(field::NORTHING, 42, 60, Trim::End),
    FieldSpec::new(field::ZONE, 60, 63, Trim::End),
    FieldSpec::new(field::LATITUDE, 63, 78, Trim::End),
    FieldSpec::new(field::LONGITUDE, 78, 93, Trim::End),
    FieldSpec::new(field::H_ORTHO, 93, 104, Trim::End),
    FieldSpec::new(field::H_ELLIPSE, 104, 115, Trim::End),
    FieldSpec::new(field::X, 115, 131, Trim::End),
    FieldSpec::new(field::Y, 131, 145, Trim::End),
    FieldSpec::new(field::Z, 145, 164, Trim::End),
    FieldSpec::new(field::SD_E, 164, 174, Trim::End),
    FieldSpec::new(field::SD_N, 174, 184, Trim::End),
    FieldSpec::new(field::SD_UP, 184, 192, Trim::End),
    FieldSpec::new(field::DESCRIPTION, 192, 212, Trim::Both),
];

const REPORT_FIELDS: [FieldSpec; 18] = [
    POSITION_FIELDS[0],
    POSITION_FIELDS[1],
    POSITION_FIELDS[2],
    POSITION_FIELDS[3],
    POSITION_FIELDS[4],
    POSITION_FIELDS[5],
    POSITION_FIELDS[6],
    POSITION_FIELDS[7],
    POSITION_FIELDS[8],
    POSITION_FIELDS[9],
    POSITION_FIELDS[10],
    POSITION_FIELDS[11],
    POSITION_FIELDS[12],
    POSITION_FIELDS[13],
    POSITION_FIELDS[14],
    POSITION_FIELDS[15],
    FieldSpec::new(field::HZ_POS_U, 212, 222, Trim::End),
    FieldSpec::new(field::VT_POS_U, 222, 232, Trim::End),
];

const UNCERTAINTY_FIELDS: [FieldSpec; 3] = [
    FieldSpec::new(field::STATION, 0, 20, Trim::Both),
    FieldSpec::new(field::HZ_POS_U, 56, 62, Trim::End),
    FieldSpec::new(field::VT_POS_U, 67, 73, Trim::End),
];

/// National adjustment position file (`.xyz`) data row.
///
/// The description column is optional in the national file; everything up
/// to and including `sd_up` is mandatory.
pub const XYZ_LAYOUT: FixedWidthLayout = FixedWidthLayout {
    name: "xyz",
    fields: &POSITION_FIELDS,
    min_span: 192,
};

/// National positional uncertainty file (`.apu`) data row
pub const APU_LAYOUT: FixedWidthLayout = FixedWidthLayout {
    name: "apu",
    fields: &UNCERTAINTY_FIELDS,
    min_span: 73,
};

/// Jurisdiction report row: position columns plus two uncertainty columns
pub const REPORT_LAYOUT: FixedWidthLayout = FixedWidthLayout {
    name: "report",
    fields: &REPORT_FIELDS,
    min_span: 192,
};

impl FixedWidthLayout {
    /// End offset of the last field
    pub fn span(&self) -> usize {
        self.fields.iter().map(|f| f.end).max().unwrap_or(0)
    }

    /// Decode a line into trimmed field values.
    ///
    /// Optional fields past `min_span` that the line does not reach decode
    /// as empty strings.
    pub fn decode(&self, line: &str) -> Result<DecodedRecord, RecordTooShort> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.len() < self.min_span {
            return Err(RecordTooShort {
                layout: self.name,
                required: self.min_span,
                found: trimmed.len(),
            });
        }
        Ok(self.decode_partial(trimmed))
    }

    /// Decode without a length check; every field the line does not reach
    /// decodes as an empty string
    pub fn decode_partial(&self, line: &str) -> DecodedRecord {
        let line = line.trim_end_matches(['\r', '\n']);
        let mut values = HashMap::with_capacity(self.fields.len());
        for spec in self.fields {
            let raw = slice_field(line, spec.start, spec.end);
            let value = match spec.trim {
                Trim::End => raw.trim_end(),
                Trim::Both => raw.trim(),
            };
            values.insert(spec.name, value.to_string());
        }

        DecodedRecord { values }
    }

    /// Encode field values back into a line of exactly `span()` characters.
    ///
    /// Gaps between fields are filled with spaces; missing fields are blank.
    pub fn encode<'a>(&self, value_of: impl Fn(&'static str) -> Option<&'a str>) -> String {
        let mut line = String::with_capacity(self.span());
        for spec in self.fields {
            if line.len() < spec.start {
                line.push_str(&" ".repeat(spec.start - line.len()));
            }
            line.push_str(&pad_to_width(value_of(spec.name).unwrap_or(""), spec.width()));
        }
        line
    }
}

/// Pad with trailing spaces, or truncate, to exactly `width` characters
pub fn pad_to_width(value: &str, width: usize) -> String {
    let mut padded: String = value.chars().take(width).collect();
    let count = padded.chars().count();
    if count < width {
        padded.push_str(&" ".repeat(width - count));
    }
    padded
}

/// Raw `line[start..end]`, clipped to the line and to character boundaries
pub fn slice_field(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or_else(|| {
        // Non-ASCII content: fall back to the widest valid sub-slice
        let mut s = start;
        while !line.is_char_boundary(s) {
            s += 1;
        }
        let mut e = end;
        while e > s && !line.is_char_boundary(e) {
            e -= 1;
        }
        &line[s..e.max(s)]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_contiguous(layout: &FixedWidthLayout) {
        let mut expected_start = layout.fields[0].start;
        for spec in layout.fields {
            assert_eq!(
                spec.start, expected_start,
                "{} field '{}' leaves a gap",
                layout.name, spec.name
            );
            expected_start = spec.end;
        }
    }

    #[test]
    fn test_position_layouts_are_contiguous() {
        assert_contiguous(&XYZ_LAYOUT);
        assert_contiguous(&REPORT_LAYOUT);
        assert_eq!(XYZ_LAYOUT.span(), 212);
        assert_eq!(REPORT_LAYOUT.span(), 232);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("0.005", 10), "0.005     ");
        assert_eq!(pad_to_width("Smith Peak", 20).len(), 20);
        assert_eq!(
            pad_to_width("A very long jurisdiction name", 20),
            "A very long jurisdic"
        );
        assert_eq!(pad_to_width("", 3), "   ");
    }

    #[test]
    fn test_decode_short_line_is_rejected() {
        let err = XYZ_LAYOUT.decode("AAAA   short").unwrap_err();
        assert_eq!(err.layout, "xyz");
        assert_eq!(err.required, 192);
        assert_eq!(err.found, 12);
    }

    #[test]
    fn test_decode_trims_per_field() {
        let line = XYZ_LAYOUT.encode(|name| match name {
            field::STATION => Some("AAAA"),
            field::EASTING => Some("   691234.123"),
            field::DESCRIPTION => Some("Trig"),
            _ => None,
        });
        let record = XYZ_LAYOUT.decode(&line).unwrap();

        assert_eq!(record.value(field::STATION), "AAAA");
        assert_eq!(record.value(field::EASTING), "   691234.123");
        assert_eq!(record.value(field::DESCRIPTION), "Trig");
        assert_eq!(record.value(field::ZONE), "");
    }

    #[test]
    fn test_decode_tolerates_missing_optional_description() {
        let line = format!("{:<192}", "BBBB");
        let record = XYZ_LAYOUT.decode(&line).unwrap();
        assert_eq!(record.value(field::STATION), "BBBB");
        assert_eq!(record.value(field::DESCRIPTION), "");
    }

    #[test]
    fn test_encode_restores_right_trimmed_columns() {
        let original = format!(
            "{:<20}{:<8}{:>14}{:<170}",
            "CCCC", "CCC", "123.456", ""
        );
        let record = XYZ_LAYOUT.decode(&original).unwrap();
        let encoded = XYZ_LAYOUT.encode(|name| record.get(name));
        assert_eq!(encoded, original);
    }

    #[test]
    fn test_decode_partial_clips_short_lines() {
        let line = format!("{:<56}{:<8}", "AAAA", "0.005");
        assert!(APU_LAYOUT.decode(&line).is_err());

        let record = APU_LAYOUT.decode_partial(&line);
        assert_eq!(record.value(field::STATION), "AAAA");
        assert_eq!(record.value(field::HZ_POS_U), "0.005");
        assert_eq!(record.value(field::VT_POS_U), "");
    }

    #[test]
    fn test_uncertainty_layout_offsets() {
        let line = format!("{:<56}{:<11}{:<6}  ", "AAAA", "0.005", "0.011");
        let record = APU_LAYOUT.decode(&line).unwrap();
        assert_eq!(record.value(field::STATION), "AAAA");
        assert_eq!(record.value(field::HZ_POS_U), "0.005");
        assert_eq!(record.value(field::VT_POS_U), "0.011");
    }

    #[test]
    fn test_slice_field_clips_to_line() {
        assert_eq!(slice_field("abc", 1, 10), "bc");
        assert_eq!(slice_field("abc", 5, 10), "");
    }
}
