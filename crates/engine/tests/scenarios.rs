//! Black-box scenarios against the public engine API.

use std::sync::Arc;

use carconfig_catalog::Catalog;
use carconfig_core::{ConfiguratorError, PriceUnit, SessionId};
use carconfig_engine::{
    Availability, ConfigurationRecord, LoadOutcome, Pricing, Selection, SelectionStage, Session,
    price, resolve_option_amount, serialize_configuration,
};
use serde_json::json;

fn catalog() -> Catalog {
    Catalog::from_value(&json!({
        "Palisade": {
            "Diesel 2.2": {
                "Exclusive": {
                    "가격": 4500,
                    "옵션": {
                        "Smart Key": { "value": true },
                        "Sunroof": { "value": 100 },
                        "PremiumSound": { "value": 80, "requires": ["Sunroof"] },
                        "HeatedSeats": {
                            "value": 50,
                            "conditional": [{ "requires": ["Sunroof"], "value": 30 }]
                        },
                        "Third Row Captain": { "value": false }
                    }
                },
                "Calligraphy": {
                    "가격": 5300,
                    "옵션": { "Sunroof": { "value": true }, "PremiumSound": { "value": 60, "requires": ["Sunroof"] } }
                },
                "색상": { "Abyss Black": { "value": 0 }, "Gaia Brown": { "value": 8 } }
            },
            "Gasoline 3.8": {
                "Exclusive": { "가격": 4300, "옵션": {} }
            }
        }
    }))
    .unwrap()
}

fn session() -> Session {
    let mut session = Session::with_defaults(SessionId::new());
    let ticket = session.choose_category("RV").unwrap();
    assert_eq!(
        session.complete_load(&ticket, Ok(Arc::new(catalog()))),
        Ok(LoadOutcome::Applied)
    );
    session.choose_model("Palisade").unwrap();
    session.choose_powertrain("Diesel 2.2").unwrap();
    session.choose_trim("Exclusive").unwrap();
    session
}

#[test]
fn sunroof_scenario_prices_as_documented() {
    let mut session = session();
    session.set_option("Sunroof", true).unwrap();
    assert_eq!(
        session.pricing(),
        Pricing {
            base: 45_000_000,
            options: 1_000_000,
            color: 0,
            total: 46_000_000,
        }
    );
}

#[test]
fn premium_sound_needs_sunroof() {
    let mut session = session();
    let before = session.selection().clone();
    assert_eq!(
        session.set_option("PremiumSound", true),
        Err(ConfiguratorError::Dependency {
            option: "PremiumSound".to_string(),
            missing: vec!["Sunroof".to_string()],
        })
    );
    assert_eq!(session.selection(), &before);
}

#[test]
fn heated_seats_use_the_conditional_price() {
    let mut session = session();
    session.set_option("Sunroof", true).unwrap();
    session.set_option("HeatedSeats", true).unwrap();

    let (_, trim) = session.current_trim().unwrap();
    let seats = trim.option("HeatedSeats").unwrap();
    assert_eq!(resolve_option_amount(seats, session.selection()), 30);
    assert_eq!(session.pricing().options, 1_300_000);
}

#[test]
fn standard_equipment_is_on_after_choosing_a_trim_and_stays_on() {
    let mut session = session();
    assert!(session.selection().is_checked("Smart Key"));
    assert_eq!(session.availability("Smart Key"), Ok(Availability::Included));
    assert!(matches!(
        session.set_option("Smart Key", false),
        Err(ConfiguratorError::ImmutableOption { .. })
    ));

    // Standard sunroof on another trim satisfies PremiumSound immediately.
    session.choose_trim("Calligraphy").unwrap();
    assert!(session.selection().is_checked("Sunroof"));
    assert!(!session.selection().is_checked("HeatedSeats"));
    session.set_option("PremiumSound", true).unwrap();
}

#[test]
fn excluded_options_never_turn_on() {
    let mut session = session();
    assert!(session.set_option("Third Row Captain", true).is_err());
    assert!(!session.selection().is_checked("Third Row Captain"));
}

#[test]
fn color_changes_only_touch_color_and_total() {
    let mut session = session();
    session.set_option("Sunroof", true).unwrap();
    let plain = session.pricing();

    session.choose_color(Some("Gaia Brown")).unwrap();
    let brown = session.pricing();
    assert_eq!(brown.base, plain.base);
    assert_eq!(brown.options, plain.options);
    assert_eq!(brown.color, 80_000);
    assert_eq!(brown.total, plain.total + 80_000);
}

#[test]
fn choosing_a_model_again_clears_everything_below() {
    let mut session = session();
    session.set_option("Sunroof", true).unwrap();
    session.choose_color(Some("Abyss Black")).unwrap();

    session.choose_model("Palisade").unwrap();
    let s = session.selection();
    assert_eq!(s.stage(), SelectionStage::ModelChosen);
    assert_eq!(s.powertrain(), None);
    assert_eq!(s.trim(), None);
    assert_eq!(s.color(), None);
    assert!(s.options().is_empty());
}

#[test]
fn exported_record_round_trips_through_json() {
    let mut session = session();
    session.set_option("Sunroof", true).unwrap();
    session.choose_color(Some("Gaia Brown")).unwrap();

    let record = session.export();
    let reparsed = ConfigurationRecord::from_json_str(&record.to_json_pretty().unwrap()).unwrap();
    assert_eq!(reparsed, record);
    assert_eq!(reparsed.pricing, session.pricing());
}

#[test]
fn pure_functions_match_the_session_view() {
    let catalog = catalog();
    let s = Selection::for_category("RV")
        .choose_model(&catalog, "Palisade")
        .and_then(|s| s.choose_powertrain(&catalog, "Diesel 2.2"))
        .and_then(|s| s.choose_trim(&catalog, "Exclusive"))
        .and_then(|s| s.set_option(&catalog, "Sunroof", true))
        .unwrap();
    let (powertrain, trim) = s.current_trim(&catalog).unwrap();
    let pricing = price(trim, &s, powertrain.colors.as_ref(), PriceUnit::default());

    let mut session = session();
    session.set_option("Sunroof", true).unwrap();
    assert_eq!(serialize_configuration(&s, &pricing), session.export());
}
