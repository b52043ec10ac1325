use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::OffsetDateTime;

/// Kinds of UI signal reported to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    SignalInitialize,
    SignalLoadStart,
    SignalLoadComplete,
    SignalImpression,
    SignalViewed,
    SignalResponse,
    SignalGatedResponse,
    SignalDismissal,
    SignalActivation,
    SignalTimeOnSite,
    SignalUserInteraction,
    SignalCartItemInstantPurchaseInitiated,
    SignalCartItemInstantPurchase,
    SignalCartItemInstantPurchaseFailure,
    SignalInstantPurchaseDismissal,
}

impl EventType {
    /// Types that are forwarded every time, never deduplicated.
    pub fn bypasses_dedup(&self) -> bool {
        matches!(
            self,
            EventType::SignalUserInteraction | EventType::SignalCartItemInstantPurchaseInitiated
        )
    }

    /// Load lifecycle signals; a server-to-server integration reports these
    /// itself.
    pub fn is_load_signal(&self) -> bool {
        matches!(self, EventType::SignalLoadStart | EventType::SignalLoadComplete)
    }
}

/// A `{name, value}` pair in event data or metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        NameValue {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One UI signal, created where it was observed and submitted once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub instance_guid: String,
    pub session_id: String,
    pub event_type: EventType,
    pub parent_guid: String,
    /// UTC, millisecond precision: `yyyy-MM-ddTHH:mm:ss.SSSZ`.
    pub event_time: String,
    #[serde(default)]
    pub event_data: Vec<NameValue>,
    #[serde(default)]
    pub metadata: Vec<NameValue>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub object_data: BTreeMap<String, String>,
    pub page_instance_guid: String,
    pub token: String,
}

/// The identity two records must share to count as duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub session_id: String,
    pub parent_guid: String,
    pub event_type: EventType,
    pub page_instance_guid: String,
    pub event_data: Vec<NameValue>,
}

impl EventRecord {
    /// A record stamped with a fresh instance guid and the current time.
    pub fn new(
        event_type: EventType,
        session_id: impl Into<String>,
        parent_guid: impl Into<String>,
        page_instance_guid: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        EventRecord {
            instance_guid: uuid::Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            event_type,
            parent_guid: parent_guid.into(),
            event_time: format_event_time(OffsetDateTime::now_utc()),
            event_data: Vec::new(),
            metadata: Vec::new(),
            object_data: BTreeMap::new(),
            page_instance_guid: page_instance_guid.into(),
            token: token.into(),
        }
    }

    pub fn with_event_data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.event_data.push(NameValue::new(name, value));
        self
    }

    pub fn with_metadata(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push(NameValue::new(name, value));
        self
    }

    pub fn with_object_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.object_data.insert(key.into(), value.into());
        self
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            session_id: self.session_id.clone(),
            parent_guid: self.parent_guid.clone(),
            event_type: self.event_type,
            page_instance_guid: self.page_instance_guid.clone(),
            event_data: self.event_data.clone(),
        }
    }
}

/// Format a timestamp as `yyyy-MM-ddTHH:mm:ss.SSSZ` in UTC.
pub fn format_event_time(at: OffsetDateTime) -> String {
    let utc = at.to_offset(time::UtcOffset::UTC);
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    // Four-digit years always format; the fallback only covers years the
    // format cannot express.
    utc.format(format)
        .unwrap_or_else(|_| "1970-01-01T00:00:00.000Z".to_string())
}
