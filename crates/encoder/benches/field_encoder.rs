use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use zlog_encoder::encode_message;
use zlog_schema::{DynamicMessage, FieldDescriptor, Kind, MessageDescriptor, Value};

fn request_message(list_len: usize) -> DynamicMessage {
    let peer = MessageDescriptor::builder("bench.Peer")
        .field(FieldDescriptor::singular("host", 1, Kind::String))
        .field(FieldDescriptor::singular("port", 2, Kind::Uint32))
        .build()
        .unwrap();
    let request = MessageDescriptor::builder("bench.Request")
        .field(FieldDescriptor::singular("id", 1, Kind::String))
        .field(FieldDescriptor::singular("latency_ms", 2, Kind::Double))
        .field(FieldDescriptor::list("hops", 3, Kind::Message))
        .field(FieldDescriptor::map("headers", 4, Kind::String, Kind::String))
        .build()
        .unwrap();

    let hops = (0..list_len).map(|i| {
        DynamicMessage::new(peer.clone())
            .with("host", format!("10.0.0.{i}"))
            .unwrap()
            .with("port", 8000 + i as u32)
            .unwrap()
    });
    let headers = (0..list_len).map(|i| (format!("x-h{i}"), format!("v{i}")));

    DynamicMessage::new(request)
        .with("id", "req-1")
        .unwrap()
        .with("latency_ms", 12.5f64)
        .unwrap()
        .with("hops", Value::list(hops))
        .unwrap()
        .with("headers", Value::map(headers))
        .unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_message");
    for len in [1usize, 16, 128] {
        let msg = request_message(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &msg, |b, msg| {
            b.iter(|| black_box(encode_message(msg)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode);
criterion_main!(benches);
