// Host-side tests for the particle field update.

use approx::assert_abs_diff_eq;
use sphere_core::{
    Hsl, MapperParams, ParticleField, PointInstance, SpectrumMapper, SpectrumSnapshot,
    SphereSampler,
};

fn make_field(count: usize) -> ParticleField {
    ParticleField::new(
        &SphereSampler::default(),
        count,
        100.0,
        SpectrumMapper::new(MapperParams {
            gain: 1.0,
            ..MapperParams::default()
        }),
    )
}

#[test]
fn new_field_is_at_rest_and_dirty() {
    let mut f = make_field(32);
    assert_eq!(f.len(), 32);
    for p in f.points() {
        assert_eq!(p.current(), p.initial());
        assert_eq!(p.color(), Hsl::REST);
    }
    assert!(f.take_dirty());
    assert!(!f.take_dirty());
}

#[test]
fn update_scales_current_from_initial() {
    let mut f = make_field(8);
    let bins = [255u8, 0];
    let snap = SpectrumSnapshot::new(&bins).unwrap();
    f.update(&snap);
    for (i, p) in f.points().iter().enumerate() {
        let want = if i % 2 == 0 { 2.0 } else { 1.0 };
        let got = p.current().length() / p.initial().length();
        assert_abs_diff_eq!(got, want, epsilon = 1e-5);
        // Direction is preserved: no inversion through the origin.
        assert!(p.current().dot(p.initial()) > 0.0);
    }
}

#[test]
fn update_is_idempotent_for_same_snapshot() {
    let mut f = make_field(300);
    let bins: Vec<u8> = (0..64).map(|i| (i * 4) as u8).collect();
    let snap = SpectrumSnapshot::new(&bins).unwrap();
    f.update(&snap);
    let first: Vec<_> = f.points().to_vec();
    f.update(&snap);
    assert_eq!(first, f.points());
}

#[test]
fn update_never_changes_length_or_initial_positions() {
    let mut f = make_field(100);
    let initial: Vec<_> = f.points().iter().map(|p| p.initial()).collect();
    for level in [0u8, 128, 255] {
        let bins = [level; 16];
        f.update(&SpectrumSnapshot::new(&bins).unwrap());
        assert_eq!(f.len(), 100);
    }
    let after: Vec<_> = f.points().iter().map(|p| p.initial()).collect();
    assert_eq!(initial, after);
}

#[test]
fn one_dirty_signal_per_update() {
    let mut f = make_field(50);
    f.take_dirty();
    let bins = [200u8; 4];
    f.update(&SpectrumSnapshot::new(&bins).unwrap());
    assert!(f.is_dirty());
    assert!(f.take_dirty());
    assert!(!f.take_dirty());
}

#[test]
fn rest_restores_initial_state() {
    let mut f = make_field(20);
    let bins = [255u8; 4];
    f.update(&SpectrumSnapshot::new(&bins).unwrap());
    f.take_dirty();
    f.rest();
    assert!(f.take_dirty());
    for p in f.points() {
        assert_eq!(p.current(), p.initial());
        assert_eq!(p.color(), Hsl::REST);
    }
}

#[test]
fn write_instances_reuses_buffer_and_packs_rgb() {
    let f = make_field(10);
    let mut out: Vec<PointInstance> = Vec::with_capacity(10);
    let ptr = out.as_ptr();
    f.write_instances(&mut out);
    f.write_instances(&mut out);
    assert_eq!(out.len(), 10);
    assert_eq!(out.as_ptr(), ptr);
    let [r, g, b] = Hsl::REST.to_rgb();
    for (inst, p) in out.iter().zip(f.points()) {
        assert_eq!(inst.position, p.current().to_array());
        assert_eq!(inst.color, [r, g, b, 1.0]);
    }
    assert_eq!(std::mem::size_of::<PointInstance>(), 32);
}

#[test]
fn empty_field_is_harmless() {
    let mut f = make_field(0);
    assert!(f.is_empty());
    let bins = [255u8];
    f.update(&SpectrumSnapshot::new(&bins).unwrap());
    let mut out = Vec::new();
    f.write_instances(&mut out);
    assert!(out.is_empty());
}
