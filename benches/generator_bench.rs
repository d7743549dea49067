use criterion::{Criterion, criterion_group, criterion_main};
use sample_runner::core::config::{RunnerConfig, TestSpec};
use sample_runner::core::generator::generate_cases;
use std::hint::black_box;
use std::path::Path;

fn bench_generate_cases(c: &mut Criterion) {
    let cfg: RunnerConfig = toml::from_str(
        r#"
samples_folder = "samples"

[streams.foreman_cif]
path = "foreman_cif.yuv"
width = 352
height = 288
"#,
    )
    .unwrap();

    // 2 x 8 x 3 axes -> 48 cases per expansion
    let spec = TestSpec::parse(
        r#"{
            "type": "encode",
            "stream": ["foreman_cif", "foreman_cif"],
            "codec": "h264",
            "bitrate": [500, 1000, 1500, 2000, 3000, 4000, 6000, 8000],
            "target_usage": [1, 4, 7]
        }"#,
    )
    .unwrap();
    let base_dir = Path::new(".");

    c.bench_function("generate_cases", |b| {
        b.iter(|| {
            let cases = generate_cases(black_box(&spec), base_dir, &cfg).unwrap();
            black_box(cases);
        });
    });
}

criterion_group!(benches, bench_generate_cases);
criterion_main!(benches);
