//! Records read from and written to the reference store.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collection names in the reference store.
pub mod collections {
    /// Authorized enumerators, keyed by Telegram user id.
    pub const OFFICERS: &str = "petugasTelegram";
    /// Pending self-registrations, keyed by Telegram user id.
    pub const REGISTRATIONS: &str = "penggunaBaru";
    pub const VESSELS: &str = "kapal";
    pub const GEARS: &str = "alattangkap";
    pub const SPECIES: &str = "jenisikan";
    /// Append-only landing log.
    pub const LANDINGS: &str = "pendaratan";
}

/// Registration lifecycle. Only `Pending` is ever written here; promotion
/// happens outside the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
}

/// Self-registration request awaiting admin verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(rename = "nama")]
    pub name: String,
    /// Telegram handle without `@`, `-` when the user has none.
    pub username: String,
    #[serde(rename = "tanggalDaftar")]
    pub registered_at: String,
    pub status: RegistrationStatus,
}

impl RegistrationRequest {
    pub fn pending(name: &str, username: Option<&str>, registered_at: String) -> Self {
        Self {
            name: name.to_string(),
            username: username.unwrap_or("-").to_string(),
            registered_at,
            status: RegistrationStatus::Pending,
        }
    }
}

/// Pick the first non-empty candidate.
fn first_filled(candidates: &[&Option<String>]) -> String {
    candidates
        .iter()
        .filter_map(|c| c.as_deref())
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Decode a reference record leniently: a record of the wrong shape still
/// counts as existing, it just contributes empty display fields.
pub fn decode_reference<T: for<'de> Deserialize<'de> + Default>(value: Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

/// Vessel lookup record (`kapal/{code}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VesselReference {
    #[serde(rename = "namaKapal", default)]
    pub name: Option<String>,
    /// Gross tonnage, stored as either a number or text.
    #[serde(rename = "gtKapal", default)]
    pub tonnage: Option<Value>,
    #[serde(rename = "pemilik", default)]
    pub owner: Option<String>,
}

impl VesselReference {
    pub fn display_name(&self) -> String {
        first_filled(&[&self.name])
    }
}

/// Fishing gear lookup record (`alattangkap/{code}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GearReference {
    #[serde(rename = "namaAlat", default)]
    pub name: Option<String>,
    /// Older records carry the name under this key.
    #[serde(rename = "alatTangkap", default)]
    pub legacy_name: Option<String>,
}

impl GearReference {
    pub fn display_name(&self) -> String {
        first_filled(&[&self.name, &self.legacy_name])
    }
}

/// Species lookup record (`jenisikan/{code}`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeciesReference {
    #[serde(rename = "namaIkan", default)]
    pub name: Option<String>,
    #[serde(rename = "namaLokal", default)]
    pub local_name: Option<String>,
}

impl SpeciesReference {
    pub fn display_name(&self) -> String {
        first_filled(&[&self.name, &self.local_name])
    }
}

/// One persisted landing, denormalized with reference display names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingRecord {
    #[serde(rename = "L_OR_NL")]
    pub landing_type: String,
    #[serde(rename = "kodeKapal")]
    pub vessel_code: String,
    #[serde(rename = "namaKapal")]
    pub vessel_name: String,
    #[serde(rename = "gtKapal")]
    pub vessel_tonnage: Value,
    #[serde(rename = "pemilik")]
    pub vessel_owner: String,
    #[serde(rename = "kodeAlat")]
    pub gear_code: String,
    #[serde(rename = "namaAlat")]
    pub gear_name: String,
    #[serde(rename = "satuan")]
    pub unit: String,
    #[serde(rename = "kodeIkan")]
    pub species_code: String,
    #[serde(rename = "namaIkan")]
    pub species_name: String,
    pub volume: String,
    /// Handle, or full name when the sender has no handle.
    #[serde(rename = "userTelegram")]
    pub submitted_by: String,
    #[serde(rename = "userIdTelegram")]
    pub submitter_id: u64,
    #[serde(rename = "tanggalInput")]
    pub submitted_at: String,
}
