use cxr::{Program, Record, Schema, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let program = Program::from_file("demos/mail.cxr").expect("failed to load rules");
    println!("{program}");

    let records = vec![
        Record::new("1")
            .set("from", "ci@github.com")
            .set("subject", "Build FAILED on main"),
        Record::new("2")
            .set("from", "alice@corp.com")
            .set("subject", "Roadmap draft"),
        Record::new("3")
            .set("from", "billing@vendor.io")
            .set("subject", "Your receipt"),
        Record::new("4")
            .set("from", "friend@home.org")
            .set("subject", "lunch?"),
    ];

    let mut session = Session::new();
    let result = session.run_program(&program, records, &Schema::default());

    println!("{result}");
    for (folder, records) in result.buckets() {
        let ids: Vec<&str> = records.iter().map(Record::id).collect();
        println!("  {folder}: {ids:?}");
    }
    for entry in result.action_log() {
        println!(
            "  {} <- {}: {}",
            entry.record_id,
            entry.folder,
            entry.actions.join(", ")
        );
    }
}
