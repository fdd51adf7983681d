//! Demonstration of a store that resets itself, e.g. when a screen closes

use tincan_reset::{create_with_reset, State, Value};
use tracing_subscriber::EnvFilter;

fn count(state: &State, name: &str) -> i64 {
    state.get(name).and_then(Value::as_i64).unwrap_or_default()
}

fn main() -> tincan_reset::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Reset Example: Counter ===\n");

    let store = create_with_reset(|store| {
        let weak = store.downgrade();
        Ok(State::new()
            .with("count", 0)
            .with("secondaryCount", 10)
            .with("user", Value::Null)
            .with_action("increment", move |_| {
                if let Some(store) = weak.upgrade() {
                    store.update(|s| State::new().with("count", count(s, "count") + 1));
                }
            })
            .into())
    })?;

    println!("1. Setting up subscriber");
    store
        .subscribe(|state, _| {
            println!(
                "   [Store Update] count: {}, secondaryCount: {}, user: {:?}",
                count(state, "count"),
                count(state, "secondaryCount"),
                state.get("user").and_then(Value::as_object).map(|u| u.len()),
            );
        })
        .detach();

    println!("\n2. Incrementing twice");
    store.call("increment", &[])?;
    store.call("increment", &[])?;

    println!("\n3. Resetting only `count`");
    store.reset_state(["count"])?;

    println!("\n4. Changing secondaryCount and user");
    store.set_state(
        State::new()
            .with("secondaryCount", 15)
            .with("user", State::new().with("name", "Ann")),
    );

    println!("\n5. Resetting the whole store");
    store.reset_store()?;

    println!("\n✓ Example complete!");
    Ok(())
}
