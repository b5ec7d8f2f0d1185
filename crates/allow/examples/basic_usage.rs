//! Basic usage example for allow

use allow::prelude::*;
use serde_json::json;
use std::sync::Arc;

fn main() {
    tracing_subscriber::fmt().init();

    // Throw (the default): the first violation comes back as Err
    let allow = Allow::new();
    match allow.an_integer(&Value::from(json!("42")), 0..=100) {
        Ok(_) => println!("✓ '42' is an integer"),
        Err(e) => println!("✗ {e} ({})", e.code()),
    }

    // Structural check against a model derived from an example object
    let model = Model::from_value(&Value::from(json!({
        "name": "",
        "address": { "city": "", "zip": "" },
        "tags": [],
    })))
    .unwrap_or_default();
    let user = Value::from(json!({
        "name": "ada",
        "address": { "city": "London" },
        "tags": ["math"],
    }));
    if let Err(e) = allow.an_instance_of(&user, &model) {
        println!("✗ {e}");
    }

    // Warn: violations are logged and execution continues
    let lenient = Allow::builder()
        .failure_behavior(FailureBehavior::Warn)
        .on_failure(|violation| println!("  on_failure saw: {}", violation.code()))
        .build();
    let ok = lenient
        .a_string(&Value::from(7), 1..)
        .and_then(|a| a.one_of(&Value::from("purple"), &json!(["red", "green"]).into()))
        .is_ok();
    println!("✓ chain under warn completed: {ok}");

    // Settings persisted through a store survive a new validator
    let store = Arc::new(MemoryStore::new());
    let mut first = Allow::with_store(store.clone());
    first.set_allow_null(true);
    let second = Allow::with_store(store);
    println!("✓ allow_null survives: {}", second.allow_null());
}
