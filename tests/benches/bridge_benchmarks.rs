//! # Event Bridge Benchmarks
//!
//! Hot paths of the bridge:
//!
//! | Path | Work per call |
//! |------|---------------|
//! | Glob matching | one pattern against one topic |
//! | Listener evaluation | every pattern in the filter set, then emission |
//! | Envelope mapping | header copy plus reserved keys |

use std::sync::Arc;

use bridge_types::{headers, Event, Lifecycle, Message, Properties, Value};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use event_bridge::{
    DefaultMessageEventMapper, EventInboundListener, GlobMatcher, MessageEventMapper, TopicMatcher,
};

use bridge_tests::doubles::RecordingChannel;

fn bench_glob_matcher(c: &mut Criterion) {
    let mut group = c.benchmark_group("glob-matcher");
    let matcher = GlobMatcher::new();

    let cases = [
        ("literal", "orders/eu/created", "orders/eu/created"),
        ("single", "orders/*/created", "orders/eu/created"),
        ("multi", "orders/**/created", "orders/eu/de/berlin/created"),
        ("in-segment", "orders/order-*", "orders/order-12345"),
    ];

    for (name, pattern, topic) in cases {
        group.bench_function(name, |b| {
            b.iter(|| matcher.matches(black_box(pattern), black_box(topic)))
        });
    }

    group.finish();
}

fn bench_listener(c: &mut Criterion) {
    let mut group = c.benchmark_group("inbound-listener");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    for patterns in [1usize, 16, 128] {
        let output = Arc::new(RecordingChannel::new());
        let listener = EventInboundListener::new(Arc::clone(&output));
        listener.set_topics((0..patterns).map(|i| format!("svc-{i}/**")));
        runtime.block_on(listener.start()).expect("start");

        let mut properties = Properties::new();
        properties.insert("k".to_string(), Value::from("v"));
        let event = Event::new("svc-0/a/b", properties).expect("event");

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("on_event", patterns), &event, |b, event| {
            b.iter(|| listener.on_event(black_box(event)))
        });
    }

    group.finish();
}

fn bench_mapper(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope-mapper");
    let mapper = DefaultMessageEventMapper::with_default_topic("bench");

    for header_count in [0usize, 8, 64] {
        let message = Message::builder("payload")
            .header(headers::TOPIC, "bench/topic")
            .copy_headers((0..header_count).map(|i| (format!("h-{i}"), Value::from(i as u64))))
            .build();

        group.bench_with_input(
            BenchmarkId::new("to_event", header_count),
            &message,
            |b, message| b.iter(|| mapper.to_event(black_box(message))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_glob_matcher, bench_listener, bench_mapper);
criterion_main!(benches);
