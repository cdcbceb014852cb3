use super::*;

#[test]
fn topic_wire_values_are_stable() {
    assert_eq!(u8::from(Topic::National), 0);
    assert_eq!(u8::from(Topic::Sports), 2);
    assert_eq!(u8::from(Topic::Technology), 6);

    for (i, topic) in Topic::ALL.iter().enumerate() {
        assert_eq!(topic.index(), i);
        assert_eq!(Topic::try_from(i as u8).unwrap(), *topic);
    }
}

#[test]
fn invalid_topic_discriminant_is_rejected() {
    assert!(Topic::try_from(7).is_err());
    assert!(Topic::try_from(255).is_err());
}

#[test]
fn topic_serializes_as_integer() {
    // The cache files store topics as bare integers.
    let json = serde_json::to_string(&Topic::Business).unwrap();
    assert_eq!(json, "4");

    let back: Topic = serde_json::from_str("4").unwrap();
    assert_eq!(back, Topic::Business);
}

#[test]
fn unknown_language_falls_back_to_english() {
    let names = topic_names(99);
    assert_eq!(names[0], "National News");
    assert_eq!(names[2], "Sports");
}

#[test]
fn every_language_table_has_seven_names() {
    for code in 0..=6u8 {
        let names = topic_names(code);
        assert_eq!(names.len(), TOPIC_COUNT);
        assert!(names.iter().all(|n| !n.is_empty()));
    }
}

#[test]
fn country_config_parses_operator_json() {
    let raw = r#"{
        "countries": [
            {
                "countryCode": 49,
                "languageCode": 1,
                "name": "United States",
                "language": "English",
                "source": "wire-service"
            }
        ]
    }"#;

    let parsed: Countries = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.countries.len(), 1);
    assert_eq!(parsed.countries[0].country_code, 49);
    assert_eq!(parsed.countries[0].language_code, 1);
    assert_eq!(parsed.countries[0].source, "wire-service");
}
