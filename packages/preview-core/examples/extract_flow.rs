//! End-to-end demo: classify a file, create a template, stream a mock
//! extraction, persist the result, and page through history.
//!
//! Run with: cargo run --example extract_flow

use futures::StreamExt;
use preview_core::{
    validate, ExtractStore, ExtractionDriver, FieldSchema, FieldType, FileMeta, FileRecord,
    JsonFileBackend, MockDriver, NewExtractResult,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let store = ExtractStore::new(JsonFileBackend::new("./preview-state"));
    store.load().await;

    // 1. Classify and validate the incoming file
    let record = FileRecord::from_url("https://example.com/contracts/msa.pdf", FileMeta::new());
    let verdict = validate(record.file_type.as_str(), &record.url);
    println!("classified as {} (valid: {})", record.file_type, verdict.valid);

    // 2. Create an extraction template
    let template = store
        .create_template(
            vec![
                FieldSchema::new("company name", FieldType::Text),
                FieldSchema::new("contract amount", FieldType::Number),
                FieldSchema::new("signing date", FieldType::Date),
                FieldSchema::new("status", FieldType::Select)
                    .with_options(["draft", "signed", "expired"]),
                FieldSchema::new("auto-renews", FieldType::Boolean),
            ],
            true,
        )
        .await?;
    println!("created template {}", template.id);

    // 3. Stream the extraction run
    let driver = MockDriver::new().with_step_delay(Duration::from_millis(200));
    let mut events = driver.extract("doc-msa", &template);
    let mut terminal = None;
    while let Some(event) = events.next().await {
        let event = event?;
        println!("  {:?} {}%", event.status, event.progress);
        if event.is_terminal() {
            terminal = Some(event);
        }
    }

    // 4. Persist the terminal event
    let terminal = terminal.expect("driver terminates with a completed event");
    let saved = store
        .save_result(
            NewExtractResult::new(&template.id, "doc-msa")
                .with_data(terminal.data.unwrap())
                .with_confidence(terminal.confidence.unwrap()),
        )
        .await?;
    println!("saved result {} (confidence {})", saved.id, saved.confidence);

    // 5. Page through history, newest first
    let history = store.history(1, 10);
    println!("history: {} of {} result(s)", history.results.len(), history.total);
    for result in &history.results {
        println!("  {} <- template {} file {}", result.id, result.template_id, result.file_id);
    }

    Ok(())
}
