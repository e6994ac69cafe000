use sketch_noise::{Noise, NoiseError};
use sketch_random::{Generator, RandomError, Seed};
use std::sync::Arc;
use std::thread;

#[test]
fn identical_seeds_draw_identical_sequences() {
    for seed in [Seed::Integer(42), Seed::from("sketch"), Seed::State([9, 8, 7, 6])] {
        let mut a = Generator::new(seed.clone()).unwrap();
        let mut b = Generator::new(seed).unwrap();
        let xs: Vec<f64> = (0..1000).map(|_| a.random()).collect();
        let ys: Vec<f64> = (0..1000).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
        assert_eq!(a, b);
    }
}

#[test]
fn draws_respect_ranges() {
    let mut random = Generator::new(1234).unwrap();
    for _ in 0..10_000 {
        let value = random.random_range(-2.5, 7.0).unwrap();
        assert!((-2.5..7.0).contains(&value));
        let int = random.random_int_range(-3, 4).unwrap();
        assert!((-3..4).contains(&int));
    }
}

#[test]
fn noise_stays_within_advertised_range() {
    let mut coords = Generator::new(99).unwrap();
    for (octaves, falloff) in [(1, 0.5), (4, 0.5), (6, 0.8), (3, 1.5)] {
        let mut noise = Noise::from_seed(42).unwrap();
        noise.set_detail(octaves, falloff).unwrap();
        assert_eq!(noise.min_value(), -noise.max_value());
        for _ in 0..2000 {
            let p: Vec<f64> = (0..4)
                .map(|_| coords.random_range(-50.0, 50.0).unwrap())
                .collect();
            for dims in 2..=4 {
                let value = noise.noise(&p[..dims]).unwrap();
                assert!((-1.0..=1.0).contains(&value));
                assert!(noise.min_value() <= value && value <= noise.max_value());
            }
        }
    }
}

#[test]
fn noise_is_a_pure_function() {
    let a = Noise::from_seed("field").unwrap();
    let b = Noise::from_seed("field").unwrap();
    let points = [[0.1, 0.2, 0.3, 0.4], [-8.5, 3.25, 100.0, 0.0], [1e3, -1e3, 7.0, 7.0]];
    for p in points {
        let first = a.noise(&p).unwrap();
        assert_eq!(first, a.noise(&p).unwrap());
        assert_eq!(first, b.noise(&p).unwrap());
    }
}

#[test]
fn permutation_tables_hold_for_every_seed() {
    for seed in 1..100 {
        let noise = Noise::from_seed(seed).unwrap();
        for dimensions in 2..=4 {
            assert!(noise.permutation(dimensions).unwrap().is_valid());
        }
    }
}

#[test]
fn shuffle_is_a_permutation() {
    let mut random = Generator::new(5).unwrap();
    let input: Vec<u32> = (0..100).collect();
    let shuffled = random.shuffle(&input);
    assert_ne!(shuffled, input);
    let mut sorted = shuffled.clone();
    sorted.sort();
    assert_eq!(sorted, input);
}

#[test]
fn errors() {
    assert!(matches!(
        Generator::from_words(&[1, 2, 3]),
        Err(RandomError::InvalidSeed(_))
    ));
    assert!(matches!(Generator::new(0), Err(RandomError::InvalidSeed(_))));

    let mut random = Generator::new(42).unwrap();
    assert!(matches!(
        random.random_range(5.0, 1.0),
        Err(RandomError::InvalidRange { .. })
    ));
    assert!(matches!(
        random.pick_value(&serde_json::json!(42)),
        Err(RandomError::TypeMismatch { .. })
    ));

    assert!(matches!(
        Noise::from_seed(-1),
        Err(NoiseError::Random(RandomError::InvalidSeed(_)))
    ));
}

#[test]
fn explicit_state_golden_vector() {
    let mut random = Generator::new([1, 2, 3, 4]).unwrap();
    let max = u32::MAX as f64;
    assert_eq!(random.random(), 2061.0 / max);
    assert_eq!(random.random(), 6175.0 / max);
    assert_eq!(random.random(), 4.0 / max);
}

#[test]
fn detail_changes_field_but_not_range() {
    let mut noise = Noise::from_seed(42).unwrap();
    let origin = noise.noise2(0.0, 0.0).unwrap();
    assert_eq!(origin, noise.noise2(0.0, 0.0).unwrap());
    assert!((-1.0..=1.0).contains(&origin));

    let before = noise.noise2(0.3, 0.7).unwrap();
    noise.set_detail(4, 0.5).unwrap();
    let after = noise.noise2(0.3, 0.7).unwrap();
    assert_ne!(before, after);
    assert!((-1.0..=1.0).contains(&after));
    assert!((before - 0.41876971478859326).abs() < 1e-12);
    assert!((after - 0.228807543091123).abs() < 1e-12);
}

#[test]
fn noise_is_shared_across_threads() {
    let noise = Arc::new(Noise::from_seed(42).unwrap());
    let expected = noise.noise3(1.5, -2.25, 3.75).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let noise = Arc::clone(&noise);
            thread::spawn(move || noise.noise3(1.5, -2.25, 3.75).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
