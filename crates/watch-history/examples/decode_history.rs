use std::path::Path;
use std::time::Instant;
use watch_history::InMemoryHistoryStore;

fn main() {
    let path = Path::new("data/history.json");

    println!("Loading watch history from {}...\n", path.display());

    let start = Instant::now();
    let store = InMemoryHistoryStore::load_from_file(path)
        .expect("Failed to load history file");
    let users = store.user_keys().expect("Failed to list users");

    let mut records = 0;
    let mut legacy = 0;
    let mut skipped = 0;
    for user in &users {
        let batch = store.decode_user(user).expect("Failed to decode history");
        records += batch.records.len();
        legacy += batch.legacy_count;
        skipped += batch.skipped.len();
    }
    let elapsed = start.elapsed();

    println!("=== Decode Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users.len());
    println!("Records: {} ({} legacy)", records, legacy);
    println!("Skipped lines: {}", skipped);
    println!("\nPerformance: {:.0} records/second",
             records as f64 / elapsed.as_secs_f64());
}
