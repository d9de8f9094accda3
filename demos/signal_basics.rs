//! # Signal Basics Example
//!
//! Shows the parameterless channel variant with both registration styles:
//! a hand-written `Listen` implementation and a `Binding` with response
//! actions driven by activation hooks.
//!
//! ## Run
//! ```bash
//! cargo run --example signal_basics
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use eventry::{Binding, Listen, Signal};

struct DoorBell {
    rings: AtomicU32,
}

impl Listen<()> for DoorBell {
    fn on_raised(&self, _: &()) {
        let n = self.rings.fetch_add(1, Ordering::Relaxed) + 1;
        println!(" ├─► ding-dong (#{n})");
    }

    fn name(&self) -> &str {
        "door-bell"
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let door_opened = Signal::new("door-opened");

    // A plain listener, registered directly.
    let bell = Arc::new(DoorBell {
        rings: AtomicU32::new(0),
    });
    door_opened
        .register_listener(Arc::clone(&bell), None)
        .expect("fresh listener");

    // A binding, driven the way a host component lifecycle would drive it.
    let porch_light = Binding::builder(door_opened.channel())
        .on_trigger(|| println!(" ├─► porch light on"))
        .build();
    porch_light.activate().expect("fresh binding");

    println!("visitor arrives:");
    door_opened.raise(None);

    // Deactivation detaches the light; the bell keeps listening.
    porch_light.deactivate();
    println!("second visitor (light binding deactivated):");
    door_opened.raise(None);

    println!(" └─► total rings: {}", bell.rings.load(Ordering::Relaxed));
}
