use terrain_core::{
    Channel, InMemoryHost, MeshSink, NoiseParameters, NormalMode, SectionChange, TerrainConfig,
    TerrainError, construct,
};

fn config(seed: i32, size: usize) -> TerrainConfig {
    let mut config = TerrainConfig {
        noise: NoiseParameters::square(seed, size),
        ..TerrainConfig::default()
    };
    config.noise.scale = 8.0;
    config.noise.octaves = 4;
    config.noise.persistence = 0.5;
    config.noise.lacunarity = 2.0;
    config
}

#[test]
fn test_construct_then_reconstruct() {
    let mut host = InMemoryHost::new();

    let first = construct(&config(7, 16), &mut host).expect("first construct failed");
    assert_eq!(first.section, SectionChange::Created);
    assert_eq!(host.section_count(), 1);
    assert_eq!(first.mesh.vertices.len(), 16 * 16);
    assert_eq!(first.mesh.triangles.len(), 6 * 15 * 15);

    // Same size, new seed: topology is unchanged so the section is updated
    let second = construct(&config(8, 16), &mut host).expect("second construct failed");
    assert_eq!(second.section, SectionChange::Updated);
    assert_eq!(host.section_count(), 1);
    assert_eq!((host.creates, host.updates), (1, 1));
    assert_eq!(host.sections[0].mesh.vertices, second.mesh.vertices);

    // The texture is replaced under its name, keeping the bound handle
    assert_eq!(second.texture, first.texture);
    assert_eq!(host.textures.len(), 1);
    let bound = host.bound_texture("NoiseTexture").expect("texture not bound");
    assert_eq!(bound.pixels, second.pixels);
}

#[test]
fn test_construct_is_deterministic() {
    let mut a = InMemoryHost::new();
    let mut b = InMemoryHost::new();
    let ra = construct(&config(99, 12), &mut a).unwrap();
    let rb = construct(&config(99, 12), &mut b).unwrap();
    assert_eq!(ra.grid, rb.grid);
    assert_eq!(ra.mesh, rb.mesh);
    assert_eq!(ra.pixels, rb.pixels);
}

#[test]
fn test_pixels_and_vertices_describe_same_cells() {
    let mut host = InMemoryHost::new();
    let mut cfg = config(3, 10);
    cfg.mesh.height_factor = 1.0;
    cfg.mesh.width_factor = 1.0;
    let built = construct(&cfg, &mut host).unwrap();

    let heights: Vec<f32> = built.grid.channel(Channel::Magnitude).collect();
    let tallest = heights
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(built.mesh.vertices[tallest][2], 1.0);
    assert_eq!(built.pixels.pixels[tallest], [255, 255, 255, 255]);
}

#[test]
fn test_per_vertex_normals_end_to_end() {
    let mut host = InMemoryHost::new();
    let mut cfg = config(5, 8);
    cfg.mesh.normals = NormalMode::PerVertex;
    let built = construct(&cfg, &mut host).unwrap();
    assert_eq!(built.mesh.normals.len(), 64);
    assert!(built.mesh.normals.iter().all(|n| n[2] > 0.0));
}

#[test]
fn test_invalid_dimensions_are_rejected() {
    let mut host = InMemoryHost::new();
    let mut cfg = config(1, 4);
    cfg.noise.height = 0;
    let err = construct(&cfg, &mut host).unwrap_err();
    assert!(matches!(err, TerrainError::InvalidDimensions { width: 4, height: 0 }));
    assert_eq!(host.section_count(), 0);
}

#[test]
fn test_repeated_construct_keeps_host_bounded() {
    let mut host = InMemoryHost::new();
    for seed in 0..5 {
        construct(&config(seed, 6), &mut host).unwrap();
    }
    assert_eq!(host.textures.len(), 1);
    assert_eq!(host.section_count(), 1);
    assert_eq!((host.creates, host.updates), (1, 4));
}

#[test]
fn test_zero_lacunarity_is_rejected() {
    let mut host = InMemoryHost::new();
    let mut cfg = config(1, 8);
    cfg.noise.lacunarity = 0.0;
    let err = construct(&cfg, &mut host).unwrap_err();
    assert!(matches!(err, TerrainError::InvalidParameter { name: "lacunarity", .. }));
    assert_eq!(host.section_count(), 0);
    assert!(host.textures.is_empty());
}
