#[cfg(test)]
use super::*;
use serde_json::json;

fn card_document() -> serde_json::Value {
    json!({
        "master": {
            "default": {"expiry_date": "08/18", "cvv": "123"},
            "visa": {"account_number": "4213423432432234"},
            "amex": {"account_number": "344651926666442"}
        },
        "GB": {
            "default": {"start_date": "01/14"},
            "visa": {
                "account_number": "0000000000000000",
                "issuer_bank": {"name": "Standard Chartered", "country": "GB"}
            },
            "switch": {"account_number": "6759649826438453"}
        },
        "en": {
            "default": {"en_default": "en default"},
            "visa": {"en_visa": "en visa"}
        },
        "GB-en": {
            "default": {"start_date": "01/12", "gb_en_default": "gb en default"},
            "visa": {"account_number": "1111111111111111", "gb_en_visa": "gb en visa"}
        },
        "GB-en-dev": {
            "visa": {"account_number": "2222222222222222"}
        }
    })
}

#[test]
fn test_hierarchy_expansion() {
    assert_eq!(
        profile_hierarchy("GB-en-dev"),
        vec!["master", "GB", "en", "dev", "GB-en", "GB-en-dev"]
    );
    assert_eq!(profile_hierarchy("GB"), vec!["master", "GB"]);
    assert_eq!(profile_hierarchy(""), vec!["master"]);
    assert_eq!(profile_hierarchy("master"), vec!["master"]);
    assert_eq!(profile_hierarchy("GB-GB"), vec!["master", "GB", "GB-GB"]);
}

#[test]
fn test_deep_merge() {
    let mut target = json!({"a": {"b": 1, "c": [1, 2, 3]}, "d": "x"});
    deep_merge(&mut target, &json!({"a": {"c": [9]}, "d": {"e": true}}));

    assert_eq!(target, json!({"a": {"b": 1, "c": [9, 2, 3]}, "d": {"e": true}}));
}

#[test]
fn test_default_values_extend_siblings() {
    let object = json!({
        "default": {"expiry_date": "08/18"},
        "visa": {"account_number": "123"},
        "amex": {},
        "label": "cards"
    });

    let extended = extend_default_values(object);
    assert_eq!(
        extended,
        json!({
            "visa": {"account_number": "123", "expiry_date": "08/18"},
            "amex": {"expiry_date": "08/18"},
            "label": "cards"
        })
    );
}

#[test]
fn test_default_values_sibling_wins() {
    let object = json!({
        "default": {"cvv": "123", "bank": {"name": "A", "country": "GB"}},
        "visa": {"cvv": "999", "bank": {"name": "B"}}
    });

    let extended = extend_default_values(object);
    assert_eq!(extended["visa"]["cvv"], "999");
    assert_eq!(extended["visa"]["bank"], json!({"name": "B", "country": "GB"}));
}

#[test]
fn test_default_values_idempotent() {
    let object = json!({
        "default": {"expiry_date": "08/18"},
        "visa": {"account_number": "123"}
    });

    let once = extend_default_values(object);
    let twice = extend_default_values(once.clone());
    assert_eq!(once, twice);
    assert!(twice.get("default").is_none());
}

#[test]
fn test_master_profile() {
    let card = extend_object(card_document(), "master");

    assert!(card.get("default").is_none());
    assert!(card.get("GB").is_none());
    assert_eq!(card["visa"]["account_number"], "4213423432432234");
    assert_eq!(card["visa"]["expiry_date"], "08/18");
    assert_eq!(card["amex"]["cvv"], "123");
}

#[test]
fn test_first_level_profile() {
    let card = extend_object(card_document(), "GB");

    assert!(card.get("master").is_none());
    assert!(card.get("GB-en").is_none());
    assert_eq!(card["visa"]["account_number"], "0000000000000000");
    assert_eq!(
        card["visa"]["issuer_bank"],
        json!({"name": "Standard Chartered", "country": "GB"})
    );
    assert_eq!(card["switch"]["expiry_date"], "08/18");
    assert_eq!(card["switch"]["start_date"], "01/14");
    assert_eq!(card["amex"]["start_date"], "01/14");
}

#[test]
fn test_second_level_profile() {
    let card = extend_object(card_document(), "GB-en");

    assert_eq!(card["visa"]["account_number"], "1111111111111111");
    assert_eq!(card["visa"]["en_default"], "en default");
    assert_eq!(card["visa"]["en_visa"], "en visa");
    assert_eq!(card["amex"]["en_default"], "en default");
    assert!(card["amex"].get("en_visa").is_none());
    assert_eq!(card["switch"]["start_date"], "01/12");
    assert_eq!(card["amex"]["expiry_date"], "08/18");
}

#[test]
fn test_third_level_profile() {
    let card = extend_object(card_document(), "GB-en-dev");

    assert_eq!(card["visa"]["account_number"], "2222222222222222");
    assert_eq!(card["visa"]["gb_en_default"], "gb en default");
    assert_eq!(card["visa"]["gb_en_visa"], "gb en visa");
    assert_eq!(card["amex"]["gb_en_default"], "gb en default");
    assert!(card["amex"].get("gb_en_visa").is_none());
}

#[test]
fn test_later_hierarchy_entry_wins() {
    let document = json!({
        "master": {"item": {"kept": "master", "shared": "master"}},
        "A": {"item": {"shared": "A"}},
        "B": {"item": {"shared": "B"}},
        "A-B": {}
    });

    let item = &extend_object(document, "A-B")["item"];
    assert_eq!(item["shared"], "B");
    assert_eq!(item["kept"], "master");
}

#[test]
fn test_unknown_profile_falls_back_to_master() {
    let card = extend_object(card_document(), "UNKNOWN");

    assert!(card.get("default").is_none());
    assert_eq!(card["visa"]["account_number"], "4213423432432234");
    assert_eq!(card["visa"]["expiry_date"], "08/18");
    assert_eq!(card["amex"]["account_number"], "344651926666442");
}

#[test]
fn test_document_without_master() {
    let document = json!({
        "default": {"expiry_date": "08/18", "cvv": "123"},
        "visa": {"account_number": "4213423432432234"}
    });

    let card = extend_object(document.clone(), "GB");
    assert!(card.get("default").is_none());
    assert_eq!(card["visa"]["expiry_date"], "08/18");
    assert_eq!(card, extend_object(document, "master"));
}

#[test]
fn test_end_to_end_defaults() {
    let document = json!({
        "master": {
            "default": {"expiry_date": "08/18"},
            "visa": {"account_number": "123"},
            "amex": {}
        }
    });

    assert_eq!(
        extend_object(document, "master"),
        json!({
            "visa": {"account_number": "123", "expiry_date": "08/18"},
            "amex": {"expiry_date": "08/18"}
        })
    );
}

#[test]
fn test_non_mapping_document_untouched() {
    assert_eq!(extend_object(json!([1, 2]), "GB"), json!([1, 2]));
    assert_eq!(extend_object(serde_json::Value::Null, "GB"), serde_json::Value::Null);
}

#[test]
fn test_master_segment_in_profile_keeps_earlier_layers() {
    let document = json!({
        "master": {"a": 1},
        "GB": {"b": 2},
        "GB-master": {"c": 3}
    });

    assert_eq!(
        profile_hierarchy("GB-master"),
        vec!["master", "GB", "master", "GB-master"]
    );
    assert_eq!(extend_object(document, "GB-master"), json!({"a": 1, "b": 2, "c": 3}));
}

#[test]
fn test_null_profile_section_falls_back_to_master() {
    let document = json!({
        "master": {"default": {"cvv": "123"}, "visa": {"account_number": "1"}},
        "GB": null
    });

    assert_eq!(
        extend_object(document, "GB"),
        json!({"visa": {"account_number": "1", "cvv": "123"}})
    );
}

#[test]
fn test_null_section_in_hierarchy_is_skipped() {
    let document = json!({
        "master": {"a": 1},
        "GB": null,
        "GB-en": {"b": 2}
    });

    assert_eq!(extend_object(document, "GB-en"), json!({"a": 1, "b": 2}));
}
