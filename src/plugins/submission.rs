//! Landing submission plugin.
//!
//! Any non-command text from an officer is treated as a landing report:
//! parse, validate volume, resolve the vessel/gear/species codes, then
//! append one [`LandingRecord`].

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bot::dispatcher::AppState;
use crate::bot::update::InboundMessage;
use crate::database::models::{
    GearReference, LandingRecord, SpeciesReference, VesselReference, collections, decode_reference,
};
use crate::database::{ReferenceStore, StorePath};
use crate::errors::Result;
use crate::landing::{Submission, Volume};
use crate::texts;

/// Handle a free-text landing submission.
pub async fn submission_handler(state: &AppState, msg: &InboundMessage) -> Result<()> {
    if !is_officer(state.store.as_ref(), msg.sender_id).await {
        return state.reply(msg, texts::NOT_REGISTERED).await;
    }

    let submission = match Submission::parse(&msg.text) {
        Ok(s) => s,
        Err(e) => {
            debug!("Rejected submission from {}: {}", msg.sender_id, e);
            return state.reply(msg, texts::INCOMPLETE_FORMAT).await;
        }
    };

    let volume = match Volume::parse(&submission.volume) {
        Ok(v) => v,
        Err(e) => {
            debug!("Rejected submission from {}: {}", msg.sender_id, e);
            return state.reply(msg, texts::INVALID_VOLUME).await;
        }
    };

    let Some(references) = resolve_references(state.store.as_ref(), &submission).await else {
        return state.reply(msg, texts::REFERENCE_NOT_FOUND).await;
    };

    let record = build_record(
        &submission,
        &volume,
        references,
        msg,
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    );

    let key = state
        .store
        .append(collections::LANDINGS, &serde_json::to_value(&record)?)
        .await?;

    info!(
        "Landing {} stored: vessel {} species {} volume {} {} by {}",
        key,
        record.vessel_code,
        record.species_code,
        volume.value(),
        record.unit,
        msg.sender_id
    );

    state.reply(msg, &texts::landing_saved(&record)).await
}

/// Read that treats store failures as "not found".
async fn lookup(store: &dyn ReferenceStore, path: StorePath) -> Option<Value> {
    match store.get(&path).await {
        Ok(value) => value,
        Err(e) => {
            warn!("Store error at {}: {}", path, e);
            None
        }
    }
}

async fn is_officer(store: &dyn ReferenceStore, sender_id: u64) -> bool {
    lookup(store, StorePath::new(collections::OFFICERS, sender_id.to_string()))
        .await
        .is_some()
}

struct References {
    vessel: VesselReference,
    gear: GearReference,
    species: SpeciesReference,
}

/// Look up all three codes; `None` if any is missing.
async fn resolve_references(store: &dyn ReferenceStore, submission: &Submission) -> Option<References> {
    let (vessel, gear, species) = tokio::join!(
        lookup(store, StorePath::new(collections::VESSELS, &submission.vessel_code)),
        lookup(store, StorePath::new(collections::GEARS, &submission.gear_code)),
        lookup(store, StorePath::new(collections::SPECIES, &submission.species_code)),
    );

    debug!(
        "Reference lookup {}/{}/{}: vessel={} gear={} species={}",
        submission.vessel_code,
        submission.gear_code,
        submission.species_code,
        vessel.is_some(),
        gear.is_some(),
        species.is_some()
    );

    Some(References {
        vessel: decode_reference(vessel?),
        gear: decode_reference(gear?),
        species: decode_reference(species?),
    })
}

fn build_record(
    submission: &Submission,
    volume: &Volume,
    references: References,
    msg: &InboundMessage,
    submitted_at: String,
) -> LandingRecord {
    let References {
        vessel,
        gear,
        species,
    } = references;

    LandingRecord {
        landing_type: submission.landing_type.as_str().to_string(),
        vessel_code: submission.vessel_code.clone(),
        vessel_name: vessel.display_name(),
        vessel_tonnage: vessel
            .tonnage
            .filter(|t| !t.is_null())
            .unwrap_or_else(|| Value::String(String::new())),
        vessel_owner: vessel.owner.unwrap_or_default(),
        gear_code: submission.gear_code.clone(),
        gear_name: gear.display_name(),
        unit: submission.unit.clone(),
        species_code: submission.species_code.clone(),
        species_name: species.display_name(),
        volume: volume.as_str().to_string(),
        submitted_by: msg.identity(),
        submitter_id: msg.sender_id,
        submitted_at,
    }
}
