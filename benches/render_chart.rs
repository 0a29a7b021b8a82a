/// Benchmarks for the dashboard hot path: decoding a `results` frame and
/// rendering chart configurations from it.
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sentiment_live::chart::{ChartAdapter, HourCycle, LabelFormat, Locale};
use sentiment_live::feed::{LiveEvent, SentimentSample, parse_event};
use sentiment_live::types::{DateTime, Utc};

const HOUR_START: i64 = 1_730_642_400;

fn hour_of_samples(n: usize) -> Vec<SentimentSample> {
    (0..n)
        .map(|minute| {
            let offset = i64::try_from(minute).expect("minute fits in i64") * 60;
            SentimentSample::builder()
                .timestamp(
                    DateTime::<Utc>::from_timestamp(HOUR_START + offset, 0)
                        .expect("timestamp in range"),
                )
                .positive(0.6)
                .neutral(0.3)
                .negative(0.1)
                .build()
        })
        .collect()
}

fn results_frame(channels: usize, points: usize) -> String {
    let samples: Vec<_> = (0..points)
        .map(|minute| {
            format!(
                r#"{{"timestamp":"2024-11-03T14:{minute:02}:00Z","avg_sentiment_positive":0.6,"avg_sentiment_neutral":0.3,"avg_sentiment_negative":0.1}}"#
            )
        })
        .collect();
    let series = samples.join(",");
    let data: Vec<_> = (0..channels)
        .map(|channel| format!(r#""channel_{channel}":[{series}]"#))
        .collect();

    format!(r#"{{"event":"results","data":{{{}}}}}"#, data.join(","))
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart/render");

    let adapter = ChartAdapter::default();
    for points in [1_usize, 15, 60] {
        let samples = hour_of_samples(points);
        group.throughput(Throughput::Elements(points as u64));
        group.bench_with_input(BenchmarkId::new("default", points), &samples, |b, samples| {
            b.iter(|| adapter.render(std::hint::black_box("xqc"), std::hint::black_box(samples)));
        });
    }

    let localized = ChartAdapter::new(
        LabelFormat::default()
            .with_locale(Locale::from_tag("de-DE"))
            .with_hour_cycle(HourCycle::H23),
    );
    let samples = hour_of_samples(60);
    group.throughput(Throughput::Elements(60));
    group.bench_function("de-DE/60", |b| {
        b.iter(|| localized.render(std::hint::black_box("xqc"), std::hint::black_box(&samples)));
    });

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed/parse_event");

    for channels in [1_usize, 10] {
        let frame = results_frame(channels, 60);
        group.throughput(Throughput::Bytes(frame.len() as u64));
        group.bench_with_input(BenchmarkId::new("results", channels), &frame, |b, frame| {
            b.iter(|| {
                parse_event(std::hint::black_box(frame.as_bytes()))
                    .expect("Deserialization should succeed")
            });
        });
    }

    let keepalive = "  ";
    group.bench_function("keepalive", |b| {
        b.iter(|| parse_event(std::hint::black_box(keepalive.as_bytes())));
    });

    group.finish();
}

fn bench_decode_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let adapter = ChartAdapter::default();
    let frame = results_frame(10, 60);
    group.throughput(Throughput::Bytes(frame.len() as u64));
    group.bench_function("results_to_charts", |b| {
        b.iter(|| {
            let event = parse_event(std::hint::black_box(frame.as_bytes()))
                .expect("Deserialization should succeed")
                .expect("results event");
            match event {
                LiveEvent::Results(results) => adapter.render_channels(&results).len(),
                _ => 0,
            }
        });
    });

    group.finish();
}

criterion_group!(chart_benches, bench_render, bench_decode, bench_decode_and_render);
criterion_main!(chart_benches);
