use criterion::{Criterion, criterion_group, criterion_main};
use terrain_core::{
    InMemoryHost, MeshParameters, NoiseBasis, NoiseParameters, NormalMode, TerrainConfig,
    build_mesh, construct, generate, to_pixel_buffer,
};

const SIZE: usize = 256;
const SEED: i32 = 2025;

fn bench_generate_perlin(c: &mut Criterion) {
    c.bench_function("Noise field 256x256 (Perlin, 10 octaves)", |b| {
        let params = NoiseParameters::square(SEED, SIZE);
        b.iter(|| generate(&params).unwrap())
    });
}

fn bench_generate_simplex(c: &mut Criterion) {
    c.bench_function("Noise field 256x256 (Simplex, 10 octaves)", |b| {
        let params = NoiseParameters {
            basis: NoiseBasis::Simplex,
            ..NoiseParameters::square(SEED, SIZE)
        };
        b.iter(|| generate(&params).unwrap())
    });
}

fn bench_pixel_buffer(c: &mut Criterion) {
    let grid = generate(&NoiseParameters::square(SEED, SIZE)).unwrap();
    c.bench_function("Pixel buffer 256x256", |b| b.iter(|| to_pixel_buffer(&grid)));
}

fn bench_mesh(c: &mut Criterion) {
    let grid = generate(&NoiseParameters::square(SEED, SIZE)).unwrap();
    c.bench_function("Mesh 256x256 (placeholder normals)", |b| {
        let params = MeshParameters::default();
        b.iter(|| build_mesh(&grid, &params))
    });
    c.bench_function("Mesh 256x256 (per-vertex normals)", |b| {
        let params = MeshParameters {
            normals: NormalMode::PerVertex,
            ..MeshParameters::default()
        };
        b.iter(|| build_mesh(&grid, &params))
    });
}

fn bench_construct(c: &mut Criterion) {
    c.bench_function("Construct 256x256 into memory host (update path)", |b| {
        let config = TerrainConfig {
            noise: NoiseParameters::square(SEED, SIZE),
            ..TerrainConfig::default()
        };
        let mut host = InMemoryHost::new();
        b.iter(|| construct(&config, &mut host).unwrap())
    });
}

criterion_group!(
    terrain_benchmarks,
    bench_generate_perlin,
    bench_generate_simplex,
    bench_pixel_buffer,
    bench_mesh,
    bench_construct
);
criterion_main!(terrain_benchmarks);
