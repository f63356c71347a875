use std::io::Write;

use cxr::{
    load_sources, CxrError, Program, Record, RuleSource, Schema, Session, INBOX,
};

fn email(id: &str, from: &str, subject: &str) -> Record {
    Record::new(id).set("from", from).set("subject", subject)
}

fn run(rules: &str, records: Vec<Record>) -> cxr::RunResult {
    Session::new()
        .run(rules, records, &Schema::default())
        .unwrap()
}

#[test]
fn dsl_parse_and_run() {
    let rules = r#"
Folder Alerts priority 100
    WHEN sender IN ["github.com", "gitlab.com"] AND subject contains ["failed", "error"]
    THEN move to Alerts AND notify

Folder "Team Updates" priority 10
    WHEN sender contains "corp.com"
    THEN move to "Team Updates" AND mark as read
"#;

    let result = run(
        rules,
        vec![
            email("1", "ci@github.com", "Build FAILED on main"),
            email("2", "alice@corp.com", "Weekly sync"),
            email("3", "friend@home.org", "lunch?"),
        ],
    );

    assert_eq!(result.bucket_ids("Alerts"), vec!["1"]);
    assert_eq!(result.bucket_ids("Team Updates"), vec!["2"]);
    assert_eq!(result.bucket_ids(INBOX), vec!["3"]);

    assert_eq!(
        result.log_for("1").unwrap().actions,
        vec!["move to Alerts", "notify"]
    );
    assert_eq!(
        result.log_for("2").unwrap().actions,
        vec!["move to Team Updates", "mark as read"]
    );
    assert!(result.log_for("3").is_none());
}

#[test]
fn dsl_priority_ordering() {
    let rules = r#"
Folder Low priority 10 WHEN subject contains "report" THEN move to Low
Folder High priority 100 WHEN subject contains "report" THEN move to High
"#;
    let result = run(rules, vec![email("1", "a@b.c", "Quarterly report")]);
    assert_eq!(result.bucket_ids("High"), vec!["1"]);
    assert!(result.bucket_ids("Low").is_empty());
}

#[test]
fn dsl_first_match_wins() {
    let rules = r#"
Folder Work WHEN sender contains "corp" THEN move to Work
Folder Bills WHEN subject contains "invoice" THEN move to Bills
"#;
    let result = run(rules, vec![email("1", "ap@corp.com", "Invoice #7")]);
    assert_eq!(result.bucket_ids("Work"), vec!["1"]);
    assert!(result.bucket_ids("Bills").is_empty());
    assert_eq!(result.action_log().len(), 1);
}

#[test]
fn dsl_first_rule_in_folder_wins() {
    let rules = r#"
Folder Work
    WHEN subject contains "budget" THEN move to Work AND call
    WHEN subject contains "budget" THEN move to Work AND remind
"#;
    let result = run(rules, vec![email("1", "", "budget")]);
    assert_eq!(
        result.log_for("1").unwrap().actions,
        vec!["move to Work", "call"]
    );
}

#[test]
fn dsl_contains_list_case_insensitive() {
    let rules = r#"Folder Urgent WHEN subject contains ["urgent", "important"] THEN move to Urgent"#;
    let result = run(
        rules,
        vec![
            email("1", "", "this is URGENT"),
            email("2", "", "Important notice"),
            email("3", "", "newsletter"),
        ],
    );
    assert_eq!(result.bucket_ids("Urgent"), vec!["1", "2"]);
    assert_eq!(result.bucket_ids(INBOX), vec!["3"]);
}

#[test]
fn dsl_in_is_substring_match() {
    let rules = r#"Folder Dev WHEN sender IN ["github.com", "google.com"] THEN move to Dev"#;
    let result = run(
        rules,
        vec![
            email("1", "notifications@github.com", ""),
            email("2", "me@yahoo.com", ""),
        ],
    );
    assert_eq!(result.bucket_ids("Dev"), vec!["1"]);
    assert_eq!(result.bucket_ids(INBOX), vec!["2"]);
}

#[test]
fn dsl_not_and_grouping() {
    let rules = r#"
Folder Boss
    WHEN sender contains "boss" AND NOT (subject contains "lunch" OR subject contains "party")
    THEN move to Boss
"#;
    let result = run(
        rules,
        vec![
            email("1", "boss@corp.com", "Q3 numbers"),
            email("2", "boss@corp.com", "team lunch"),
            email("3", "boss@corp.com", "Holiday PARTY"),
        ],
    );
    assert_eq!(result.bucket_ids("Boss"), vec!["1"]);
    assert_eq!(result.bucket_ids(INBOX), vec!["2", "3"]);
}

#[test]
fn dsl_dedup_and_reset() {
    let rules = r#"Folder Checks WHEN subject contains "chk" THEN move to Checks"#;
    let schema = Schema::default();
    let record = || Record::new("x").set("subject", "chk");
    let mut session = Session::new();

    let first = session.run(rules, [record()], &schema).unwrap();
    assert_eq!(first.bucket_ids("Checks"), vec!["x"]);
    assert_eq!(first.action_log().len(), 1);

    let second = session.run(rules, [record()], &schema).unwrap();
    assert!(second.buckets().values().all(Vec::is_empty));
    assert!(second.action_log().is_empty());
    assert_eq!(second.meta().skipped_count, 1);

    session.reset();
    let third = session.run(rules, [record()], &schema).unwrap();
    assert_eq!(third.bucket_ids("Checks"), vec!["x"]);
    assert_eq!(third.action_log().len(), 1);
}

#[test]
fn dsl_unmatched_not_marked_processed() {
    let rules = r#"Folder Checks WHEN subject contains "chk" THEN move to Checks"#;
    let schema = Schema::default();
    let mut session = Session::new();

    let first = session
        .run(rules, [Record::new("y").set("subject", "other")], &schema)
        .unwrap();
    assert_eq!(first.bucket_ids(INBOX), vec!["y"]);
    assert!(!session.processed().contains("y"));

    let second = session
        .run(rules, [Record::new("y").set("subject", "chk now")], &schema)
        .unwrap();
    assert_eq!(second.bucket_ids("Checks"), vec!["y"]);
}

#[test]
fn dsl_custom_schema() {
    let rules = r#"Folder Hot WHEN priority contains "high" THEN move to Hot"#;
    let schema = Schema::with_overrides([("priority", "X-Priority")]);
    let records = [
        Record::new("1").set("X-Priority", "High"),
        Record::new("2").set("priority", "high"),
    ];
    let result = Session::new().run(rules, records, &schema).unwrap();
    assert_eq!(result.bucket_ids("Hot"), vec!["1"]);
    assert_eq!(result.bucket_ids(INBOX), vec!["2"]);
}

#[test]
fn dsl_schema_override_replaces_sender() {
    let rules = r#"Folder Boss WHEN sender contains "boss" THEN move to Boss"#;
    let schema = Schema::with_overrides([("sender", "from_address")]);
    let records = [
        Record::new("1").set("from_address", "boss@corp.com"),
        Record::new("2").set("from", "boss@corp.com"),
    ];
    let result = Session::new().run(rules, records, &schema).unwrap();
    assert_eq!(result.bucket_ids("Boss"), vec!["1"]);
}

#[test]
fn dsl_meta() {
    let rules = r#"
Folder A WHEN subject contains "a" THEN auto WHEN subject contains "b" THEN auto
Folder B WHEN subject contains "c" THEN auto
"#;
    let result = run(rules, vec![email("1", "", "x"), email("2", "", "y")]);
    let meta = result.meta();
    assert_eq!(meta.engine, "cxr");
    assert_eq!(meta.version, cxr::ENGINE_VERSION);
    assert_eq!(meta.rule_count, 3);
    assert_eq!(meta.record_count, 2);
}

#[test]
fn dsl_malformed_input() {
    let mut session = Session::new();
    let schema = Schema::default();

    let err = session.run("Folder Errors WHEN", Vec::<Record>::new(), &schema).unwrap_err();
    assert!(matches!(err, CxrError::Parse(_)), "{err}");

    let err = session
        .run(r#"Folder A WHEN subject contains "open THEN auto"#, Vec::<Record>::new(), &schema)
        .unwrap_err();
    match err {
        CxrError::Lex(e) => {
            assert_eq!((e.line(), e.column()), (1, 32));
            assert_eq!(e.character(), '"');
        }
        other => panic!("expected lex error, got {other}"),
    }
}

#[test]
fn dsl_error_messages() {
    let err = Program::from_rules("Folder A\n  WHEN subject contains \"x\" THEN fly").unwrap_err();
    assert_eq!(
        err.to_string(),
        "parse error at line 2, column 34: expected action (move, remove, notify, call, remind, mark or auto), found 'fly'"
    );

    let err = Program::from_rules("Folder A WHEN subject ~ \"x\" THEN auto").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unexpected character '~' at line 1, column 23"
    );
}

#[test]
fn dsl_from_file() {
    let mut file = tempfile::Builder::new().suffix(".cxr").tempfile().unwrap();
    writeln!(file, "Folder Alerts priority 5").unwrap();
    writeln!(file, "    WHEN subject contains \"alert\" THEN move to Alerts").unwrap();

    let program = Program::from_file(file.path()).unwrap();
    assert_eq!(program.folder_names(), vec!["Alerts"]);
    assert_eq!(program.folders[0].priority, 5);
}

#[test]
fn dsl_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Program::from_file(dir.path().join("nope.cxr")).unwrap_err();
    assert!(matches!(err, CxrError::RuleFileNotFound { .. }), "{err}");
}

#[test]
fn dsl_from_mixed_sources() {
    let mut file = tempfile::Builder::new().suffix(".cxr").tempfile().unwrap();
    write!(file, "Folder Bills WHEN subject contains \"invoice\" THEN move to Bills").unwrap();
    let path = file.path().to_str().unwrap().to_owned();

    let sources = [
        RuleSource::from("Folder Alerts priority 10 WHEN subject contains \"alert\" THEN move to Alerts"),
        RuleSource::from(path.as_str()),
    ];
    assert!(matches!(sources[1], RuleSource::File(_)));
    assert_eq!(load_sources(&sources).unwrap().lines().count(), 2);

    let program = Program::from_sources(&sources).unwrap();
    assert_eq!(program.folder_names(), vec!["Alerts", "Bills"]);

    let result = Session::new()
        .run_program(&program, [email("1", "", "Invoice due")], &Schema::default());
    assert_eq!(result.bucket_ids("Bills"), vec!["1"]);
}
