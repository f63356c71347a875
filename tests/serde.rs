#![cfg(feature = "serde")]

use cxr::{DedupState, Record, Schema, Session, Value, INBOX};

#[test]
fn record_json_round_trip() {
    let json = r#"{"id":"m1","from":"boss@corp.com","size":42,"flagged":true,"score":0.5}"#;
    let record: Record = serde_json::from_str(json).unwrap();
    assert_eq!(record.id(), "m1");
    assert_eq!(record.text("from"), Some("boss@corp.com"));
    assert_eq!(record.get("size"), Some(&Value::Int(42)));
    assert_eq!(record.get("flagged"), Some(&Value::Bool(true)));
    assert_eq!(record.get("score"), Some(&Value::Float(0.5)));

    let back: Record = serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();
    assert_eq!(back, record);
}

#[test]
fn schema_from_json_map() {
    let schema: Schema = serde_json::from_str(r#"{"sender":"from_address"}"#).unwrap();
    assert_eq!(schema.resolve("sender"), "from_address");
    assert_eq!(schema.resolve("subject"), "subject");
    assert_eq!(schema.resolve("body"), "body");
    assert_eq!(schema.iter().count(), 3);
}

#[test]
fn schema_json_overrides_merge_with_defaults() {
    let schema: Schema = serde_json::from_str(r#"{"priority":"X-Priority"}"#).unwrap();
    assert_eq!(schema.resolve("sender"), "from");
    assert_eq!(schema.resolve("priority"), "X-Priority");

    let rules = r#"
Folder Boss WHEN sender contains "boss" THEN move to Boss
Folder Hot WHEN priority contains "high" THEN move to Hot
"#;
    let records = [
        Record::new("1").set("from", "boss@corp.com"),
        Record::new("2").set("X-Priority", "High"),
    ];
    let result = Session::new().run(rules, records, &schema).unwrap();
    assert_eq!(result.bucket_ids("Boss"), vec!["1"]);
    assert_eq!(result.bucket_ids("Hot"), vec!["2"]);
    assert!(result.bucket_ids(INBOX).is_empty());
}

#[test]
fn schema_json_round_trip() {
    let schema = Schema::with_overrides([("priority", "X-Priority")]);
    let json = serde_json::to_string(&schema).unwrap();
    assert_eq!(
        json,
        r#"{"body":"body","priority":"X-Priority","sender":"from","subject":"subject"}"#
    );
    let back: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(back, schema);
}

#[test]
fn dedup_state_persists_as_list() {
    let state: DedupState = ["a", "b"].into_iter().collect();
    let json = serde_json::to_string(&state).unwrap();
    let back: DedupState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);

    let mut session = Session::with_state(back);
    let result = session
        .run(
            r#"Folder A WHEN subject contains "" THEN move to A"#,
            [Record::new("a"), Record::new("c")],
            &Schema::default(),
        )
        .unwrap();
    assert_eq!(result.bucket_ids("A"), vec!["c"]);
}

#[test]
fn run_result_serializes() {
    let mut session = Session::new();
    let result = session
        .run(
            r#"Folder Alerts WHEN subject contains "alert" THEN move to Alerts AND notify"#,
            [Record::new("1").set("subject", "ALERT"), Record::new("2")],
            &Schema::default(),
        )
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["buckets"]["Alerts"][0]["id"], "1");
    assert_eq!(json["buckets"]["Inbox"][0]["id"], "2");
    assert_eq!(json["action_log"][0]["actions"][1], "notify");
    assert_eq!(json["meta"]["engine"], "cxr");
    assert_eq!(json["meta"]["record_count"], 2);

    let keys: Vec<&str> = json["buckets"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert!(keys.contains(&"Inbox") && keys.contains(&"Alerts"));
}
