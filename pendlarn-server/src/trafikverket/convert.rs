//! Assembly of upstream envelopes into flat results.

use std::collections::HashSet;

use crate::domain::TrainIdent;

use super::error::TrafikverketError;
use super::types::{Envelope, LightAnnouncement, TrainAnnouncement};

/// Identifiers from every result group, first occurrence kept.
pub fn collect_train_idents(envelope: Envelope<LightAnnouncement>) -> Vec<TrainIdent> {
    dedup_first_seen(
        envelope
            .response
            .result
            .into_iter()
            .flat_map(|group| group.train_announcement)
            .map(|ann| TrainIdent::new(ann.advertised_train_ident)),
    )
}

/// Announcements from every result group, in upstream order.
///
/// Upstream already orders each query by advertised time; nothing is
/// re-sorted here.
pub fn flatten_announcements(envelope: Envelope<TrainAnnouncement>) -> Vec<TrainAnnouncement> {
    envelope
        .response
        .result
        .into_iter()
        .flat_map(|group| group.train_announcement)
        .collect()
}

/// Drop repeated identifiers, keeping the order in which each was first
/// seen.
pub fn dedup_first_seen(idents: impl IntoIterator<Item = TrainIdent>) -> Vec<TrainIdent> {
    let mut seen = HashSet::new();
    idents
        .into_iter()
        .filter(|ident| seen.insert(ident.clone()))
        .collect()
}

/// Surface an `ERROR` object upstream embedded in a 200 response.
pub fn check_faults<T>(envelope: &Envelope<T>) -> Result<(), TrafikverketError> {
    match envelope.response.result.iter().find_map(|g| g.error.as_ref()) {
        Some(fault) => Err(TrafikverketError::Upstream {
            status: 200,
            message: format!("{}: {}", fault.source, fault.message),
        }),
        None => Ok(()),
    }
}
