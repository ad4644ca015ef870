use criterion::{Criterion, criterion_group, criterion_main};

use rasterlink::layout::{ACTIVE_WIDTH, VIEW_AREA_BOTTOM, VIEW_AREA_TOP};
use rasterlink::{FETCH_STEPS, FrameFormat, FrameMemory, Ingest, ROW_START_DELAY, Rgb4, Scanout, encode_codeword};
use std::hint::black_box;

fn build_frame(format: &FrameFormat) -> Vec<u8> {
    let mut bytes = vec![0u8; format.header_len];
    bytes.extend_from_slice(&format.lead_in);

    for pair in 0..format.codewords() {
        if pair == format.run1 && format.run2 > 0 {
            bytes.extend(std::iter::repeat_n(0u8, format.transition));
        }

        let p = pair as u8;
        let even = Rgb4 {
            r: p % 16,
            g: (p + 1) % 16,
            b: (p + 2) % 16,
        };
        let odd = Rgb4 {
            r: (p + 3) % 16,
            g: (p + 4) % 16,
            b: (p + 5) % 16,
        };

        bytes.extend_from_slice(&encode_codeword(even, odd));
    }

    bytes.extend_from_slice(&format.lead_out);
    bytes
}

fn run_benchmarks(c: &mut Criterion) {
    let baseline = build_frame(&FrameFormat::baseline());
    let extended = build_frame(&FrameFormat::extended());

    c.bench_function("ingest full frame (baseline)", |b| {
        let mut ingest = Ingest::new(FrameFormat::baseline());
        let mut mem = FrameMemory::new();

        b.iter(|| ingest.feed(black_box(&baseline), &mut mem).unwrap());
    });

    c.bench_function("ingest full frame (extended)", |b| {
        let mut ingest = Ingest::new(FrameFormat::extended());
        let mut mem = FrameMemory::new();

        b.iter(|| ingest.feed(black_box(&extended), &mut mem).unwrap());
    });

    c.bench_function("scanout full frame", |b| {
        let mut mem = FrameMemory::new();
        Ingest::new(FrameFormat::baseline())
            .feed(&baseline, &mut mem)
            .unwrap();

        b.iter(|| {
            let mut scan = Scanout::new();
            let mut acc = 0u64;

            for _ in 0..VIEW_AREA_TOP {
                scan.new_row();
            }

            for _ in VIEW_AREA_TOP..VIEW_AREA_BOTTOM {
                for _ in 0..ROW_START_DELAY + FETCH_STEPS * ACTIVE_WIDTH {
                    let px = scan.tick(black_box(&mem));
                    acc += px.r as u64;
                }
                scan.new_row();
            }

            acc
        });
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    run_benchmarks(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
