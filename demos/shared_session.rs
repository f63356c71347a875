use std::sync::{Arc, Mutex};
use std::thread;

use cxr::{Program, Record, Schema, Session};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let program = Arc::new(Program::from_file("demos/mail.cxr").expect("failed to load rules"));
    let session = Arc::new(Mutex::new(Session::new()));

    // Two pollers see overlapping batches; the shared dedup state makes sure
    // each matched message is routed once.
    let batches = [
        vec![
            Record::new("m1").set("from", "ci@github.com").set("subject", "deploy failed"),
            Record::new("m2").set("from", "ops@corp.com").set("subject", "on-call rota"),
        ],
        vec![
            Record::new("m2").set("from", "ops@corp.com").set("subject", "on-call rota"),
            Record::new("m3").set("from", "shop@vendor.io").set("subject", "Invoice 881"),
        ],
    ];

    let handles: Vec<_> = batches
        .into_iter()
        .enumerate()
        .map(|(poller, batch)| {
            let program = Arc::clone(&program);
            let session = Arc::clone(&session);
            thread::spawn(move || {
                let result = session
                    .lock()
                    .expect("session lock poisoned")
                    .run_program(&program, batch, &Schema::default());
                format!("poller {poller}: {result}")
            })
        })
        .collect();

    for handle in handles {
        println!("{}", handle.join().expect("poller panicked"));
    }

    let session = session.lock().expect("session lock poisoned");
    let mut processed: Vec<&str> = session.processed().iter().collect();
    processed.sort_unstable();
    println!("processed: {processed:?}");
}
