use cxr::{load_sources, Program, Record, RuleSource, Schema, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Strings ending in `.cxr` are files; anything else is inline rule text.
    let sources: Vec<RuleSource> = [
        "demos/mail.cxr",
        r#"Folder Newsletters WHEN body contains "unsubscribe" THEN move to Newsletters AND mark as read"#,
    ]
    .into_iter()
    .map(RuleSource::from)
    .collect();

    let text = load_sources(&sources).expect("failed to load rule sources");
    println!("{} bytes of rules from {} sources", text.len(), sources.len());

    let program = Program::from_sources(&sources).expect("invalid rules");
    println!("folders by priority:");
    for folder in program.priority_order() {
        println!("  {:>4}  {}", folder.priority, folder.name);
    }

    // Map rule fields onto a different record layout.
    let schema = Schema::with_overrides([("sender", "from_address"), ("body", "text")]);
    let records = [
        Record::new("n1")
            .set("from_address", "news@shop.example")
            .set("subject", "Spring sale")
            .set("text", "Click here to unsubscribe"),
        Record::new("a1")
            .set("from_address", "ci@gitlab.com")
            .set("subject", "pipeline error"),
    ];

    let result = Session::new().run_program(&program, records, &schema);
    println!("{result}");

    match Program::from_file("demos/missing.cxr") {
        Ok(_) => println!("unexpectedly found demos/missing.cxr"),
        Err(e) => println!("expected failure: {e}"),
    }
}
