//! `Key : value` submission parser.
//!
//! Each line is split on its first `:`. Keys are matched after lower-casing
//! and stripping all whitespace, so `Kode Kapal`, `kodekapal` and
//! `KODE  KAPAL` are the same field. Unknown keys and lines without a key
//! contribute nothing. A repeated key overwrites the earlier value.

use std::fmt;

/// Fields a submission is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// `L OR NL`: landed (`L`) or not landed (`NL`).
    LandingType,
    /// `Kode Kapal`
    VesselCode,
    /// `Kode Alat`
    GearCode,
    /// `Satuan`
    Unit,
    /// `Kode Ikan`
    SpeciesCode,
    /// `Volume`
    Volume,
}

impl FieldKey {
    pub const ALL: [FieldKey; 6] = [
        FieldKey::LandingType,
        FieldKey::VesselCode,
        FieldKey::GearCode,
        FieldKey::Unit,
        FieldKey::SpeciesCode,
        FieldKey::Volume,
    ];

    /// Match a normalized key (lower-case, whitespace stripped).
    pub fn from_normalized(key: &str) -> Option<Self> {
        match key {
            "lornl" | "lor nl" => Some(Self::LandingType),
            "kodekapal" => Some(Self::VesselCode),
            "kodealat" => Some(Self::GearCode),
            "satuan" => Some(Self::Unit),
            "kodeikan" => Some(Self::SpeciesCode),
            "volume" => Some(Self::Volume),
            _ => None,
        }
    }

    /// Normalize a raw key and look it up.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        Self::from_normalized(&normalized)
    }

    /// Volume keeps the typed text; every other field is upper-cased.
    fn normalize_value(self, value: &str) -> String {
        match self {
            Self::Volume => value.to_string(),
            _ => value.to_uppercase(),
        }
    }

    /// Label as shown in the `/format` template.
    pub fn label(self) -> &'static str {
        match self {
            Self::LandingType => "L OR NL",
            Self::VesselCode => "Kode Kapal",
            Self::GearCode => "Kode Alat",
            Self::Unit => "Satuan",
            Self::SpeciesCode => "Kode Ikan",
            Self::Volume => "Volume",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw field values collected from a message, before completeness checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFields {
    pub landing_type: Option<String>,
    pub vessel_code: Option<String>,
    pub gear_code: Option<String>,
    pub unit: Option<String>,
    pub species_code: Option<String>,
    pub volume: Option<String>,
}

impl ParsedFields {
    fn slot(&mut self, key: FieldKey) -> &mut Option<String> {
        match key {
            FieldKey::LandingType => &mut self.landing_type,
            FieldKey::VesselCode => &mut self.vessel_code,
            FieldKey::GearCode => &mut self.gear_code,
            FieldKey::Unit => &mut self.unit,
            FieldKey::SpeciesCode => &mut self.species_code,
            FieldKey::Volume => &mut self.volume,
        }
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        let value = match key {
            FieldKey::LandingType => &self.landing_type,
            FieldKey::VesselCode => &self.vessel_code,
            FieldKey::GearCode => &self.gear_code,
            FieldKey::Unit => &self.unit,
            FieldKey::SpeciesCode => &self.species_code,
            FieldKey::Volume => &self.volume,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Fields that are absent or empty, in template order.
    pub fn missing(&self) -> Vec<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .filter(|key| self.get(*key).is_none())
            .collect()
    }
}

/// Collect recognized `key: value` lines from `text`.
pub fn parse_fields(text: &str) -> ParsedFields {
    let mut fields = ParsedFields::default();

    for line in text.lines() {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        if raw_key.is_empty() {
            continue;
        }
        let Some(key) = FieldKey::parse(raw_key) else {
            continue;
        };

        *fields.slot(key) = Some(key.normalize_value(raw_value.trim()));
    }

    fields
}

/// Why a message could not be turned into a [`Submission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// One or more fields absent or empty.
    Incomplete(Vec<FieldKey>),
    /// `L OR NL` was something other than `L` or `NL`.
    InvalidLandingType(String),
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Incomplete(missing) => {
                let names: Vec<&str> = missing.iter().map(|k| k.label()).collect();
                write!(f, "missing fields: {}", names.join(", "))
            }
            Self::InvalidLandingType(value) => write!(f, "invalid L OR NL value: {value}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// A complete submission. All codes are upper-cased; volume is still text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub landing_type: LandingType,
    pub vessel_code: String,
    pub gear_code: String,
    pub unit: String,
    pub species_code: String,
    pub volume: String,
}

/// Landed (`L`) or not landed (`NL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingType {
    Landed,
    NotLanded,
}

impl LandingType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landed => "L",
            Self::NotLanded => "NL",
        }
    }
}

impl TryFrom<ParsedFields> for Submission {
    type Error = SubmissionError;

    fn try_from(fields: ParsedFields) -> Result<Self, Self::Error> {
        let missing = fields.missing();
        if !missing.is_empty() {
            return Err(SubmissionError::Incomplete(missing));
        }

        let landing_type = match fields.get(FieldKey::LandingType) {
            Some("L") => LandingType::Landed,
            Some("NL") => LandingType::NotLanded,
            other => {
                return Err(SubmissionError::InvalidLandingType(
                    other.unwrap_or_default().to_string(),
                ));
            }
        };

        // `missing()` was empty, so every slot is filled
        let take = |slot: Option<String>| slot.unwrap_or_default();

        Ok(Self {
            landing_type,
            vessel_code: take(fields.vessel_code),
            gear_code: take(fields.gear_code),
            unit: take(fields.unit),
            species_code: take(fields.species_code),
            volume: take(fields.volume),
        })
    }
}

impl Submission {
    /// Parse and check completeness in one step.
    pub fn parse(text: &str) -> Result<Self, SubmissionError> {
        Self::try_from(parse_fields(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "L OR NL : NL\nKode Kapal : 1422\nKode Alat : JIH\nSatuan : KG\nKode Ikan : TNL\nVolume : 200";

    #[test]
    fn test_key_synonyms() {
        let cases = [
            ("L OR NL", Some(FieldKey::LandingType)),
            ("lornl", Some(FieldKey::LandingType)),
            ("l or nl", Some(FieldKey::LandingType)),
            ("Kode Kapal", Some(FieldKey::VesselCode)),
            ("KODEKAPAL", Some(FieldKey::VesselCode)),
            ("kode\talat", Some(FieldKey::GearCode)),
            (" Satuan ", Some(FieldKey::Unit)),
            ("Kode  Ikan", Some(FieldKey::SpeciesCode)),
            ("VOLUME", Some(FieldKey::Volume)),
            ("Kapal", None),
            ("", None),
        ];

        for (raw, expected) in cases {
            assert_eq!(FieldKey::parse(raw), expected, "key {:?}", raw);
        }
    }

    #[test]
    fn test_label_round_trips_through_parse() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::parse(key.label()), Some(key));
        }
    }

    #[test]
    fn test_parse_sample() {
        let submission = Submission::parse(SAMPLE).unwrap();

        assert_eq!(submission.landing_type, LandingType::NotLanded);
        assert_eq!(submission.vessel_code, "1422");
        assert_eq!(submission.gear_code, "JIH");
        assert_eq!(submission.unit, "KG");
        assert_eq!(submission.species_code, "TNL");
        assert_eq!(submission.volume, "200");
    }

    #[test]
    fn test_values_upper_cased_except_volume() {
        let text = "lornl: nl\nkodekapal: km-01\nkodealat: jih\nsatuan: kg\nkodeikan: tnl\nvolume: 12.5";
        let fields = parse_fields(text);

        assert_eq!(fields.landing_type.as_deref(), Some("NL"));
        assert_eq!(fields.vessel_code.as_deref(), Some("KM-01"));
        assert_eq!(fields.unit.as_deref(), Some("KG"));
        assert_eq!(fields.volume.as_deref(), Some("12.5"));
    }

    #[test]
    fn test_line_order_does_not_matter() {
        let reversed: Vec<&str> = SAMPLE.lines().rev().collect();
        let reversed = reversed.join("\n");

        assert_eq!(Submission::parse(&reversed), Submission::parse(SAMPLE));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let text = format!("{SAMPLE}\nKode Kapal : 9999");
        assert_eq!(Submission::parse(&text).unwrap().vessel_code, "9999");
    }

    #[test]
    fn test_value_keeps_extra_colons() {
        let fields = parse_fields("Kode Kapal : KM:01 : A");
        assert_eq!(fields.vessel_code.as_deref(), Some("KM:01 : A"));
    }

    #[test]
    fn test_malformed_lines_ignored() {
        let text = format!("halo pak\n: NL\nCatatan : ombak tinggi\n{SAMPLE}\n\n");
        assert!(Submission::parse(&text).is_ok());
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = SAMPLE.replace('\n', "\r\n");
        assert_eq!(Submission::parse(&text).unwrap().volume, "200");
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        for key in FieldKey::ALL {
            let text: Vec<&str> = SAMPLE
                .lines()
                .filter(|line| !line.starts_with(key.label()))
                .collect();

            let err = Submission::parse(&text.join("\n")).unwrap_err();
            assert_eq!(err, SubmissionError::Incomplete(vec![key]));
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let text = SAMPLE.replace("Satuan : KG", "Satuan :");
        let err = Submission::parse(&text).unwrap_err();
        assert_eq!(err, SubmissionError::Incomplete(vec![FieldKey::Unit]));
    }

    #[test]
    fn test_empty_duplicate_clears_earlier_value() {
        let text = format!("{SAMPLE}\nVolume :   ");
        let err = Submission::parse(&text).unwrap_err();
        assert_eq!(err, SubmissionError::Incomplete(vec![FieldKey::Volume]));
    }

    #[test]
    fn test_landing_type_must_be_l_or_nl() {
        let landed = SAMPLE.replace("L OR NL : NL", "L OR NL : l");
        assert_eq!(Submission::parse(&landed).unwrap().landing_type, LandingType::Landed);

        let bogus = SAMPLE.replace("L OR NL : NL", "L OR NL : X");
        assert_eq!(
            Submission::parse(&bogus).unwrap_err(),
            SubmissionError::InvalidLandingType("X".into())
        );
    }
}
