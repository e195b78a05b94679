use chrono::{NaiveDate, Weekday};
use fraudsim_core::{
    config::GeneratorConfig,
    distribution::Distribution,
    generator::RecordSampler,
    model::{Currency, TransactionType},
};

#[test]
fn loads_a_config_file_from_disk() {
    let path = std::env::temp_dir().join(format!("fraudsim-config-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
            "seed": 9,
            "currency": "EUR",
            "start_date": "2024-03-01",
            "end_date": "2024-03-03",
            "record_count": 25,
            "card_networks": [{"value": "CARTES_BANCAIRES", "weight": 1.0}],
            "merchants": [{"name": "Boulangerie", "mcc": "5462", "weight": 1.0}]
        }"#,
    )
    .expect("write config");

    let config = GeneratorConfig::load(&path).expect("load");
    std::fs::remove_file(&path).ok();

    assert_eq!(config.seed, 9);
    assert_eq!(config.currency, Currency::Eur);
    assert_eq!(config.end_date, NaiveDate::from_ymd_opt(2024, 3, 3).expect("date"));

    let mut sampler = RecordSampler::from_config(&config).expect("sampler");
    for record in sampler.records(config.record_count).expect("records") {
        assert_eq!(record.merchant.name, "Boulangerie");
        assert_eq!(record.amount.currency(), Currency::Eur);
        if let TransactionType::Card(card) = &record.transaction_type {
            assert_eq!(card.network, "CARTES_BANCAIRES");
        }
    }
    assert_eq!(sampler.name(), "TransactionRecord");
}

#[test]
fn missing_file_names_the_path() {
    let err = GeneratorConfig::load("/nonexistent/fraudsim.json").unwrap_err();
    assert!(format!("{err:#}").contains("/nonexistent/fraudsim.json"));
}

#[test]
fn bad_hourly_override_fails_sampler_construction() {
    let config = GeneratorConfig::from_json(r#"{"hourly_overrides": [{"day": "Mon", "weights": [1.0, 2.0]}]}"#)
        .expect("parses");
    assert_eq!(config.hourly_overrides[0].day, Weekday::Mon);
    assert!(RecordSampler::from_config(&config).is_err());
}

#[test]
fn empty_merchant_list_is_rejected() {
    let config = GeneratorConfig::from_json(r#"{"merchants": []}"#).expect("parses");
    assert!(RecordSampler::from_config(&config).is_err());
}

#[test]
fn inverted_date_range_is_rejected() {
    let config = GeneratorConfig::from_json(r#"{"start_date": "2024-02-01", "end_date": "2024-01-01"}"#)
        .expect("parses");
    assert!(RecordSampler::from_config(&config).is_err());
}

#[test]
fn config_survives_a_json_round_trip() {
    let config = GeneratorConfig::default();
    let json = config.to_json().expect("to json");
    let back = GeneratorConfig::from_json(&json).expect("from json");
    assert_eq!(back.merchants.len(), config.merchants.len());
    assert_eq!(back.start_date, config.start_date);
}
