// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Task map session.
//!
//! Drive a `TaskMap` through a select / split / delete session against a
//! fake renderer and print what the host would see.
//!
//! Run:
//! - `cargo run -p understory_demos --example task_map_session`
//! - `RUST_LOG=debug cargo run -p understory_demos --example task_map_session`
//!
//! Pass a path to a JSON file to override the default configuration.

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_hierarchy::Task;
use understory_overlap::ControlKind;
use understory_task_map::{RenderEvent, TaskMap, TaskMapConfig, TaskMapEvent};
use understory_view2d::{MemoryViewStore, Viewport2D};

type Id = &'static str;

fn load_config() -> TaskMapConfig {
    let Some(path) = std::env::args().nth(1) else {
        return TaskMapConfig::default();
    };
    match std::fs::read_to_string(&path).map(|s| serde_json::from_str(&s)) {
        Ok(Ok(config)) => config,
        Ok(Err(err)) => {
            tracing::warn!(%path, %err, "bad config; using defaults");
            TaskMapConfig::default()
        }
        Err(err) => {
            tracing::warn!(%path, %err, "unreadable config; using defaults");
            TaskMapConfig::default()
        }
    }
}

/// Reports every visible rectangle, with a split control in its top-left corner.
fn render(map: &mut TaskMap<Id>, controls: &[(Id, Id)], now: u64) {
    let visible: Vec<Id> = map
        .states()
        .iter()
        .filter(|(_, s)| !s.is_hidden())
        .map(|(id, _)| *id)
        .collect();
    for id in visible {
        let Some(bounds) = map.world_rect(&id) else {
            continue;
        };
        map.handle_render(RenderEvent::RectangleRendered { id, bounds }, now);
        if let Some((control, _)) = controls.iter().find(|(_, linked)| *linked == id) {
            let bounds = Rect::from_origin_size(bounds.origin(), (24.0, 24.0));
            map.handle_render(
                RenderEvent::ControlRendered {
                    id: *control,
                    linked: id,
                    kind: ControlKind::Split,
                    bounds,
                },
                now,
            );
        }
    }
}

/// Ticks until nothing is pending and prints the drained events.
fn run(map: &mut TaskMap<Id>, label: &str, mut now: u64) -> u64 {
    while let Some(deadline) = map.next_deadline() {
        map.tick(deadline);
        now = deadline;
    }
    println!("== {label}");
    for event in map.drain_events() {
        match event {
            TaskMapEvent::HierarchyApplied { states, .. } => {
                let mut shown: Vec<_> = states
                    .iter()
                    .filter(|(_, s)| !s.is_hidden())
                    .map(|(id, s)| format!("{id}={:.2}", s.opacity()))
                    .collect();
                shown.sort();
                println!("   hierarchy: {}", shown.join(" "));
            }
            TaskMapEvent::LayoutComputed { positions } => {
                let mut placed: Vec<_> = positions
                    .iter()
                    .map(|(id, p)| format!("{id}@({:.0},{:.0})", p.x, p.y))
                    .collect();
                placed.sort();
                println!("   layout: {}", placed.join(" "));
            }
            TaskMapEvent::CenteringComplete => {
                let t = map.transform();
                println!(
                    "   centered: translate=({:.0},{:.0}) scale={}",
                    t.translate.x, t.translate.y, t.scale
                );
            }
            TaskMapEvent::ControlVisibilityChanged { visibility } => {
                let mut shown: Vec<_> = visibility
                    .iter()
                    .map(|(id, v)| format!("{id}:{}", if *v { "on" } else { "off" }))
                    .collect();
                shown.sort();
                println!("   controls: {}", shown.join(" "));
            }
        }
    }
    now
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config();
    println!(
        "config: {}",
        serde_json::to_string(&config).unwrap_or_else(|e| e.to_string())
    );

    let viewport = Viewport2D::new(Rect::new(0.0, 0.0, 1280.0, 800.0));
    let mut map = TaskMap::new("project", viewport, config).with_store(MemoryViewStore::default());
    let controls = [("design:split", "design"), ("build:split", "build")];

    let mut tasks = vec![
        Task::new("design", None).with_name("Design"),
        Task::new("build", None).with_name("Build"),
        Task::new("ship", None).with_name("Ship"),
    ];
    if let Err(err) = map.task_list_changed(tasks.clone(), 0) {
        eprintln!("layout failed: {err}");
        return;
    }
    render(&mut map, &controls, 0);
    let now = run(&mut map, "loaded", 0);

    map.select_task("build", now + 10);
    render(&mut map, &controls, now + 20);
    let now = run(&mut map, "selected build", now + 20);

    map.split_starting(&"build", now + 10);
    tasks.push(Task::new("build-api", Some("build")).with_name("API"));
    tasks.push(Task::new("build-ui", Some("build")).with_name("UI"));
    if let Err(err) = map.task_list_changed(tasks, now + 200) {
        eprintln!("layout failed: {err}");
        return;
    }
    map.split_completed("build", now + 210);
    render(&mut map, &controls, now + 220);
    let now = run(&mut map, "split build", now + 220);

    map.select_task("build-ui", now + 10);
    let now = run(&mut map, "selected build-ui", now + 10);

    map.delete_starting(&"build-ui", now + 10);
    map.delete_completed(&"build-ui", now + 100);
    render(&mut map, &controls, now + 110);
    run(&mut map, "deleted build-ui", now + 110);

    println!("focus: {:?}", map.focus());
}
