//! Placeholder expansion against records decoded from a schema document.
//!
//! Each test builds the schema JSON inline, decodes it with
//! `placard_interchange::from_schema`, and expands templates against the
//! resulting offer.

use placard_core::{bind, expand, expand_with_state, DataBinding, DataSource, StateValues};
use placard_interchange::{from_schema, LayoutSchema, ResponseKey};
use serde_json::json;

fn schema() -> LayoutSchema {
    from_schema(&json!({
        "breakpoints": { "mobile": 0 },
        "slots": [{
            "instanceGuid": "slot-1",
            "offer": {
                "creative": {
                    "copy": {
                        "creative.title": "Hello",
                        "creative.subtitle": "",
                        "creative.disclaimer": "Terms apply"
                    },
                    "responseOptionsMap": {
                        "positive": { "id": "p", "shortLabel": "Accept", "longLabel": "Accept offer" }
                    },
                    "links": { "terms": { "title": "Terms", "url": "https://example.com/t" } }
                },
                "catalogItems": [{
                    "catalogItemId": "c-1",
                    "title": "Catalog Title",
                    "price": 12.5,
                    "copy": { "ui.badge": "New" }
                }]
            }
        }]
    }))
    .unwrap()
}

#[test]
fn first_non_empty_link_wins() {
    let schema = schema();
    let offer = schema.offer(0).unwrap();
    let source = DataSource::offer_with_catalog_item(&offer.creative, &offer.catalog_items[0]);

    assert_eq!(
        expand(
            "%^DATA.catalogItem.nonexistent | DATA.catalogItem.title^%",
            &source
        )
        .unwrap(),
        "Catalog Title"
    );
    assert_eq!(
        expand(
            "%^DATA.creativeCopy.creative.subtitle|DATA.creativeCopy.creative.title^%",
            &source
        )
        .unwrap(),
        "Hello"
    );
    assert_eq!(
        expand("%^DATA.catalogItem.copy.ui.badge^%", &source).unwrap(),
        "New"
    );
    assert_eq!(
        expand("%^DATA.catalogItem.price^% USD", &source).unwrap(),
        "12.5 USD"
    );
}

#[test]
fn default_literal_and_plain_text() {
    let schema = schema();
    let offer = schema.offer(0).unwrap();
    let source = DataSource::offer(&offer.creative);

    assert_eq!(
        expand("Hi %^DATA.creativeCopy.missing|friend^%!", &source).unwrap(),
        "Hi friend!"
    );
    assert_eq!(expand("no placeholders", &source).unwrap(), "no placeholders");
}

#[test]
fn mandatory_miss_empties_whole_string() {
    let schema = schema();
    let offer = schema.offer(0).unwrap();
    let source = DataSource::offer(&offer.creative);

    assert_eq!(
        expand(
            "%^DATA.creativeCopy.creative.title^% - %^DATA.creativeCopy.creative.subtitle!^%",
            &source
        )
        .unwrap(),
        ""
    );
    assert!(bind("%^DATA.creativeCopy.creative.subtitle!^%", &source).is_err());
}

#[test]
fn response_options_need_a_bound_key() {
    let schema = schema();
    let offer = schema.offer(0).unwrap();

    let unbound = DataSource::offer(&offer.creative);
    assert_eq!(
        expand("%^DATA.creativeResponse.shortLabel|Ok^%", &unbound).unwrap(),
        "Ok"
    );

    let positive = unbound.with_response(ResponseKey::Positive);
    assert_eq!(
        expand("%^DATA.creativeResponse.longLabel^%", &positive).unwrap(),
        "Accept offer"
    );
    let negative = unbound.with_response(ResponseKey::Negative);
    assert_eq!(
        expand("%^DATA.creativeResponse.longLabel^%", &negative).unwrap(),
        ""
    );
}

#[test]
fn catalog_item_namespace_is_illegal_at_offer_level() {
    let schema = schema();
    let offer = schema.offer(0).unwrap();
    let source = DataSource::offer(&offer.creative);
    assert!(expand("%^DATA.catalogItem.title^%", &source).is_err());
}

#[test]
fn state_binding_renders_later() {
    let schema = schema();
    let offer = schema.offer(0).unwrap();
    let source = DataSource::offer(&offer.creative);

    let binding = bind(
        "%^DATA.creativeLink.terms^% %^STATE.IndicatorPosition^%/%^STATE.TotalOffers^%",
        &source,
    )
    .unwrap();
    let DataBinding::State(bound) = binding else {
        panic!("expected a state binding");
    };
    assert_eq!(
        bound.text(),
        "<a href=\"https://example.com/t\">Terms</a> %^STATE.IndicatorPosition^%/%^STATE.TotalOffers^%"
    );

    let values = StateValues {
        indicator_position: 0,
        total_offers: 4,
    };
    assert_eq!(
        bound.render(&values),
        "<a href=\"https://example.com/t\">Terms</a> 1/4"
    );
}

#[test]
fn copy_containing_markers_is_literal() {
    let mut schema = schema();
    let copy = &mut schema.slots[0].offer.as_mut().unwrap().creative.copy;
    copy.insert("creative.title".to_string(), "50%^ off".to_string());
    copy.insert(
        "creative.disclaimer".to_string(),
        "%^STATE.TotalOffers^%".to_string(),
    );
    let offer = schema.offer(0).unwrap();
    let source = DataSource::offer(&offer.creative);
    let values = StateValues {
        indicator_position: 2,
        total_offers: 5,
    };

    assert_eq!(
        expand_with_state(
            "%^DATA.creativeCopy.creative.title^% (%^STATE.IndicatorPosition^%)",
            &source,
            &values
        )
        .unwrap(),
        "50%^ off (3)"
    );
    assert_eq!(
        expand_with_state(
            "%^DATA.creativeCopy.creative.disclaimer^% / %^STATE.TotalOffers^%",
            &source,
            &values
        )
        .unwrap(),
        "%^STATE.TotalOffers^% / 5"
    );
}
