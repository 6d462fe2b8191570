use crisis_actions::services::shelters::{
    CityEntry, DirectoryError, ShelterDirectory, ShelterDirectoryConfig, ShelterRecord,
};
use serde_json::json;

fn default_directory() -> ShelterDirectory {
    ShelterDirectory::new(ShelterDirectoryConfig::default()).unwrap()
}

fn shelter(name: &str) -> ShelterRecord {
    ShelterRecord {
        name: name.to_string(),
        address: format!("{} Street 1", name),
        distance: "0.5 km".to_string(),
        maps_link: format!("https://maps.example/{}", name),
    }
}

#[test]
fn test_lookup_matches_city_by_substring() {
    let directory = default_directory();

    let shelters = directory.lookup(Some("Munich, Germany"));
    assert_eq!(shelters[0].name, "Munich Stadtmission");

    let shelters = directory.lookup(Some("MÜNCHEN Hauptbahnhof"));
    assert_eq!(shelters[0].name, "Munich Stadtmission", "Alias should match case-insensitively");

    let shelters = directory.lookup(Some("Mitte, berlin"));
    assert_eq!(shelters[0].name, "Berliner Stadtmission");
}

#[test]
fn test_lookup_falls_back() {
    let directory = default_directory();

    assert_eq!(directory.lookup(Some("Paris"))[0].name, "Berliner Stadtmission");
    assert_eq!(directory.lookup(None)[0].name, "Berliner Stadtmission");
    assert!(!directory.lookup(Some("")).is_empty());
}

#[test]
fn test_priority_order_decides_ties() {
    let directory = default_directory();
    // Both keys present: munich is listed first
    assert_eq!(directory.city_for(Some("berlin to munich")).key, "munich");
}

#[test]
fn test_injected_directory() {
    let config = ShelterDirectoryConfig {
        fallback: "hamburg".into(),
        cities: vec![
            CityEntry {
                key: "hamburg".into(),
                display_name: "Hamburg".into(),
                aliases: vec![],
                shelters: vec![shelter("Hafen"), shelter("Altona")],
            },
            CityEntry {
                key: "köln".into(),
                display_name: "Köln".into(),
                aliases: vec!["cologne".into()],
                shelters: vec![shelter("Dom")],
            },
        ],
    };
    let directory = ShelterDirectory::new(config).unwrap();

    assert_eq!(directory.lookup(Some("Cologne"))[0].name, "Dom");
    assert_eq!(directory.lookup(Some("Berlin")).len(), 2);
}

#[test]
fn test_construction_validates_fallback() {
    let missing = ShelterDirectoryConfig {
        fallback: "paris".into(),
        cities: ShelterDirectoryConfig::default().cities,
    };
    assert_eq!(
        ShelterDirectory::new(missing).unwrap_err(),
        DirectoryError::MissingFallback("paris".into())
    );

    let empty = ShelterDirectoryConfig {
        fallback: "nowhere".into(),
        cities: vec![CityEntry {
            key: "nowhere".into(),
            display_name: "Nowhere".into(),
            aliases: vec![],
            shelters: vec![],
        }],
    };
    assert!(matches!(ShelterDirectory::new(empty), Err(DirectoryError::EmptyFallback(_))));
}

#[test]
fn test_shelter_message_payload() {
    let directory = default_directory();

    // 1. Known location is echoed back
    let outcome = directory.respond(Some("Munich, Germany"));
    assert!(outcome.updates.is_empty());
    let msg = &outcome.messages[0];
    assert_eq!(msg.text_body(), Some("I found 1 emergency shelters near Munich, Germany."));

    let custom = msg.custom.as_ref().unwrap();
    assert_eq!(custom["show_shelters"], json!(true));
    assert_eq!(custom["shelters"][0]["name"], json!("Munich Stadtmission"));
    assert!(custom["shelters"][0]["maps_link"].is_string());

    let payloads: Vec<&str> = msg.buttons.iter().map(|b| b.payload.as_str()).collect();
    assert_eq!(payloads, vec!["/request_operator", "/deny_emergency"]);

    // 2. No location: fallback city name is shown
    let outcome = directory.respond(None);
    assert_eq!(
        outcome.messages[0].text_body(),
        Some("I found 1 emergency shelters near Berlin.")
    );
}
