use super::*;

#[test]
fn test_empty() {
    let a: Vec<i32> = vec![];
    assert_eq!(contains(&1, &a), false);
    assert_eq!(floor_index(&1, &a), None);
    assert_eq!(ceil_index(&1, &a), None);
}

#[test]
fn test_contains() {
    let a = vec![1, 3, 5, 7, 9];
    for x in &a {
        assert!(contains(x, &a));
    }
    assert_eq!(contains(&0, &a), false);
    assert_eq!(contains(&4, &a), false);
    assert_eq!(contains(&10, &a), false);
}

#[test]
fn test_floor_index() {
    let a = vec![1, 3, 5, 7, 9];
    assert_eq!(floor_index(&0, &a), None);
    assert_eq!(floor_index(&1, &a), Some(0));
    assert_eq!(floor_index(&2, &a), Some(0));
    assert_eq!(floor_index(&5, &a), Some(2));
    assert_eq!(floor_index(&6, &a), Some(2));
    assert_eq!(floor_index(&9, &a), Some(4));
    assert_eq!(floor_index(&100, &a), Some(4));
}

#[test]
fn test_ceil_index() {
    let a = vec![1, 3, 5, 7, 9];
    assert_eq!(ceil_index(&10, &a), None);
    assert_eq!(ceil_index(&9, &a), Some(4));
    assert_eq!(ceil_index(&8, &a), Some(4));
    assert_eq!(ceil_index(&5, &a), Some(2));
    assert_eq!(ceil_index(&0, &a), Some(0));
    assert_eq!(ceil_index(&1, &a), Some(0));
}

#[test]
fn test_consistency() {
    let a = vec![2, 4, 6, 8, 10];
    for x in 0..12 {
        if contains(&x, &a) {
            assert_eq!(floor_index(&x, &a), ceil_index(&x, &a));
        }
    }
}

#[test]
fn test_randomized_against_btreeset() {
    use rand::{rngs::SmallRng, Rng, SeedableRng};
    use std::collections::BTreeSet;

    let seed: u64 = rand::random();
    println!("test_randomized_against_btreeset seed={}", seed);
    let mut rng = SmallRng::seed_from_u64(seed);

    for _ in 0..200 {
        let mut set: BTreeSet<i32> = BTreeSet::new();
        let n = rng.gen_range(0..50);
        for _ in 0..n {
            set.insert(rng.gen_range(-100..100));
        }
        let a: Vec<i32> = set.iter().cloned().collect();

        for _ in 0..50 {
            let x = rng.gen_range(-110..110);
            assert_eq!(contains(&x, &a), set.contains(&x));
            assert_eq!(
                floor_index(&x, &a),
                set.range(..=x).next_back().map(|_| {
                    a.iter().rposition(|v| v <= &x).unwrap()
                })
            );
        }
    }
}
