use serde::Serialize;

use crate::config::IntegrationInfo;
use crate::error::EventError;
use crate::record::EventRecord;

/// One outgoing batch: integration metadata plus the window's events.
#[derive(Debug, Serialize)]
pub struct EventPayload<'a> {
    pub integration: &'a IntegrationInfo,
    pub events: &'a [EventRecord],
}

impl<'a> EventPayload<'a> {
    pub fn new(integration: &'a IntegrationInfo, events: &'a [EventRecord]) -> Self {
        EventPayload {
            integration,
            events,
        }
    }

    pub fn to_json(&self) -> Result<String, EventError> {
        serde_json::to_string(self).map_err(|e| EventError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EventType;

    #[test]
    fn payload_shape() {
        let integration = IntegrationInfo {
            name: "host".to_string(),
            platform: "iOS".to_string(),
            ..IntegrationInfo::default()
        };
        let events = vec![
            EventRecord::new(EventType::SignalImpression, "sess", "parent", "page", "tok")
                .with_event_data("slot", "0"),
        ];
        let json: serde_json::Value =
            serde_json::from_str(&EventPayload::new(&integration, &events).to_json().unwrap())
                .unwrap();

        assert_eq!(json["integration"]["name"], "host");
        assert_eq!(json["integration"]["operatingSystemVersion"], "");
        let event = &json["events"][0];
        assert_eq!(event["sessionId"], "sess");
        assert_eq!(event["parentGuid"], "parent");
        assert_eq!(event["pageInstanceGuid"], "page");
        assert_eq!(event["eventData"][0]["name"], "slot");
        assert_eq!(event["eventData"][0]["value"], "0");
        assert!(event.get("objectData").is_none());
    }
}
