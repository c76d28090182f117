// SPDX-License-Identifier: AGPL-3.0-or-later
//! Benchmark for skeleton extraction and navigation.
//!
//! Uses a synthetic installation with many rooms and devices, roughly the
//! size of a large house check response.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Map, Value};

use sectorlib::navigator::{DisplayPolicy, Navigator};
use sectorlib::path::TreePath;
use sectorlib::shape::skeleton;
use sectorlib::CacheStatistics;

fn installation(rooms: usize, devices: usize) -> Value {
    let sections: Vec<Value> = (0..rooms)
        .map(|room| {
            let components: Vec<Value> = (0..devices)
                .map(|device| {
                    json!({
                        "Id": format!("{}-{}", room, device),
                        "Label": format!("Sensor {}", device),
                        "SerialNo": format!("SN{:06}", room * devices + device),
                        "Temperature": 20.5,
                        "Humidity": 41,
                        "LowBattery": false,
                        "History": [1, 2, 3, 4]
                    })
                })
                .collect();
            json!({"Name": format!("Room {}", room), "Components": components})
        })
        .collect();
    json!({"Sections": sections})
}

fn logs(entries: usize) -> Value {
    Value::Array(
        (0..entries)
            .map(|i| json!({"Time": format!("2024-05-{:02}T08:{:02}:00", i % 28 + 1, i % 60), "EventType": "armed"}))
            .collect(),
    )
}

fn bench_skeleton(c: &mut Criterion) {
    let data = installation(50, 20);
    c.bench_function("skeleton_50x20", |b| {
        b.iter(|| skeleton(black_box(&data)));
    });
}

fn bench_settle(c: &mut Criterion) {
    let shape = skeleton(&installation(50, 20));
    let nav = Navigator::default();
    c.bench_function("settle_root_menu", |b| {
        b.iter(|| nav.settle(black_box(&shape), TreePath::root("Temperatures")));
    });

    let entries = logs(500);
    let chronological = Navigator::new(DisplayPolicy { chronological: true });
    c.bench_function("settle_chronological_500", |b| {
        b.iter(|| chronological.settle(black_box(&entries), TreePath::root("Logs")));
    });
}

fn bench_statistics(c: &mut Criterion) {
    let mut entries = Map::new();
    for name in ["Temperatures", "Humidity", "Smoke Detectors"] {
        entries.insert(name.to_string(), skeleton(&installation(50, 20)));
    }
    c.bench_function("cache_statistics", |b| {
        b.iter(|| CacheStatistics::of(black_box(&entries)));
    });
}

criterion_group!(benches, bench_skeleton, bench_settle, bench_statistics);
criterion_main!(benches);
