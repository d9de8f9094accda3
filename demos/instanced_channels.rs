//! # Instanced Channels Example
//!
//! One channel asset, many independent per-key copies: two "enemies" share
//! the same `on-damaged` channel object, but each hears only its own raises.
//! A change watcher on the registry observes instances appearing and the
//! teardown at the end.
//!
//! ## Run
//! ```bash
//! cargo run --example instanced_channels
//! ```

use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use eventry::{Binding, FloatChannel, InstanceKey};

struct Enemy {
    label: &'static str,
    key: InstanceKey,
    health: Arc<AtomicU32>,
    // Held for its registration; dropping the enemy detaches it.
    _on_damaged: Binding<f32>,
}

impl Enemy {
    fn spawn(label: &'static str, channel: &FloatChannel) -> Self {
        let key = InstanceKey::mint();
        let health = Arc::new(AtomicU32::new(100));

        let hp = Arc::clone(&health);
        let on_damaged = Binding::builder(channel)
            .key(key)
            .persistent(true)
            .on(move |amount: &f32| {
                let before = hp.load(Ordering::Relaxed);
                let after = before.saturating_sub(*amount as u32);
                hp.store(after, Ordering::Relaxed);
                println!(" ├─► {label}: {before} -> {after} hp");
            })
            .build();

        Self {
            label,
            key,
            health,
            _on_damaged: on_damaged,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .init();

    let on_damaged = FloatChannel::builder("on-damaged").instanced(true).build();

    on_damaged.registry().watch(|template| {
        println!(
            " ├─► [watch] '{}' instances changed",
            eventry::Template::name(template.as_ref())
        );
    });

    let grunt = Enemy::spawn("grunt", &on_damaged);
    let brute = Enemy::spawn("brute", &on_damaged);
    println!(
        "spawned {} per-key channels",
        on_damaged.registry().instance_count()
    );

    println!("grunt takes two hits, brute takes one:");
    on_damaged.raise(30.0, Some(grunt.key));
    on_damaged.raise(45.0, Some(grunt.key));
    on_damaged.raise(10.0, Some(brute.key));

    println!(
        " ├─► {}: {} hp left",
        grunt.label,
        grunt.health.load(Ordering::Relaxed)
    );
    println!(
        " ├─► {}: {} hp left",
        brute.label,
        brute.health.load(Ordering::Relaxed)
    );

    // Scene teardown: enemies drop their bindings, then the registry clears.
    drop(grunt);
    drop(brute);
    on_damaged.registry().clear();
    println!(
        " └─► after clear: {} instances",
        on_damaged.registry().instance_count()
    );
}
