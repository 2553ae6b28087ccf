//! Integration tests for the documented usage scenarios, run against both
//! variants through the static and the dynamic interfaces.

use rstest::rstest;
use setalg::prelude::*;
use std::hash::{BuildHasherDefault, DefaultHasher};

// =============================================================================
// Static Interface
// =============================================================================

#[rstest]
fn test_fruit_scenario_unsafe() {
    let fruits = ThreadUnsafeSet::from(["apple", "banana", "pear"]);

    assert_eq!(fruits.cardinality(), 3);
    assert!(fruits.contains(&["apple", "pear"]));
    assert!(!fruits.contains(&["apple", "kiwi"]));
    assert!(fruits.contains_any(&["kiwi", "pear"]));
}

#[rstest]
fn test_fruit_scenario_safe() {
    let fruits = ThreadSafeSet::from(["apple", "banana", "pear"]);

    assert_eq!(fruits.cardinality(), 3);
    assert!(fruits.contains(&["apple", "pear"]));
    assert!(!fruits.contains(&["apple", "kiwi"]));
}

#[rstest]
fn test_algebra_scenario_safe() {
    let set_a = ThreadSafeSet::from([1, 2, 3]);
    let set_b = ThreadSafeSet::from([2, 3, 4]);

    assert_eq!(set_a.intersect(&set_b), ThreadSafeSet::from([2, 3]));
    assert_eq!(set_a.union(&set_b), ThreadSafeSet::from([1, 2, 3, 4]));
    assert_eq!(set_a.difference(&set_b), ThreadSafeSet::from([1]));
    assert_eq!(set_a.symmetric_difference(&set_b), ThreadSafeSet::from([1, 4]));
}

#[rstest]
fn test_product_and_power_set_scenario() {
    let set = ThreadUnsafeSet::from([1, 2, 3]);
    let pairs = ThreadUnsafeSet::from(["a", "b"]);

    assert_eq!(set.power_set().cardinality(), 8);
    assert_eq!(
        ThreadUnsafeSet::from([1, 2]).cartesian_product(&ThreadUnsafeSet::from([3, 4])),
        ThreadUnsafeSet::from([
            OrderedPair::new(1, 3),
            OrderedPair::new(1, 4),
            OrderedPair::new(2, 3),
            OrderedPair::new(2, 4),
        ])
    );
    assert_eq!(pairs.cartesian_product(&pairs).cardinality(), 4);
}

#[rstest]
fn test_literals_use_the_default_hasher() {
    let unsafe_set = ThreadUnsafeSet::from([1, 2, 3]);
    let safe_set = ThreadSafeSet::from([1, 2, 3]);
    let empty = ThreadUnsafeSet::new();

    assert_eq!(unsafe_set.cardinality(), 3);
    assert_eq!(safe_set.cardinality(), 3);
    assert!(empty.is_subset(&unsafe_set));
    assert_eq!(ThreadSafeSet::with_capacity(8), ThreadSafeSet::from([0_u8; 0]));
}

#[rstest]
fn test_custom_hasher() {
    type Fixed = BuildHasherDefault<DefaultHasher>;

    let mut unsafe_set = ThreadUnsafeSet::with_hasher(Fixed::default());
    unsafe_set.append([1, 2, 3]);
    let other: ThreadUnsafeSet<i32, Fixed> = [3, 4].into_iter().collect();
    assert_eq!(sorted(&unsafe_set.union(&other)), vec![1, 2, 3, 4]);

    let safe_set = ThreadSafeSet::with_capacity_and_hasher(4, Fixed::default());
    safe_set.add("apple");
    assert_eq!(safe_set.power_set().cardinality(), 2);
}

#[rstest]
fn test_owned_iteration_and_extend() {
    let mut set: ThreadUnsafeSet<u32> = (1..=3).collect();
    set.extend([3, 4]);

    let mut owned: Vec<u32> = set.into_iter().collect();
    owned.sort_unstable();
    assert_eq!(owned, vec![1, 2, 3, 4]);
}

#[rstest]
fn test_sorted_rendering() {
    let set = ThreadSafeSet::from(["pear", "apple", "banana"]);
    assert_eq!(sorted(&set), vec!["apple", "banana", "pear"]);
}

// =============================================================================
// Dynamic Interface
// =============================================================================

#[rstest]
#[case(Concurrency::ThreadSafe)]
#[case(Concurrency::ThreadUnsafe)]
fn test_dynamic_relations(#[case] concurrency: Concurrency) {
    let small = new_set(concurrency, [1, 2]);
    let large = new_set(concurrency, [1, 2, 3]);

    assert!(small.is_proper_subset(&*large));
    assert!(large.is_proper_superset(&*small));
    assert!(small.contains_any_element(&*large));
    assert!(!small.equal(&*large));
    assert!(*small == *small.clone_set());
}

#[rstest]
#[case(Concurrency::ThreadSafe)]
#[case(Concurrency::ThreadUnsafe)]
fn test_dynamic_iteration_stops_early(#[case] concurrency: Concurrency) {
    let set = new_set(concurrency, 0..100);
    let mut iterator = set.iterator();

    assert!(iterator.next().is_some());
    iterator.stop();

    let channel_total: i32 = set.iter_channel().iter().sum();
    assert_eq!(channel_total, (0..100).sum::<i32>());
}

#[rstest]
#[case(Concurrency::ThreadSafe)]
#[case(Concurrency::ThreadUnsafe)]
fn test_dynamic_factory_builds_usable_set(#[case] concurrency: Concurrency) {
    let mut set = new_set(concurrency, [1_i32, 2, 3]);
    assert_eq!(set.cardinality(), 3);
    assert!(set.add(4));

    let other = new_set(concurrency, [4, 5]);
    assert_eq!(sorted(&*set.intersect(&*other)), vec![4]);
}

#[rstest]
#[case(Concurrency::ThreadSafe)]
#[case(Concurrency::ThreadUnsafe)]
fn test_dynamic_cartesian_product(#[case] concurrency: Concurrency) {
    let set_a = new_set(concurrency, [1, 2]);
    let set_b = new_set(concurrency, [3, 4]);

    let product = set_a.cartesian_product(&*set_b);

    assert_eq!(
        product,
        ThreadUnsafeSet::from([
            OrderedPair::new(1, 3),
            OrderedPair::new(1, 4),
            OrderedPair::new(2, 3),
            OrderedPair::new(2, 4),
        ])
    );
    assert_eq!(ThreadSafeSet::from(product).cardinality(), 4);
}

#[rstest]
fn test_default_concurrency_is_thread_safe() {
    let set = new_set(Concurrency::default(), [1]);
    assert!(set.type_name().contains("ThreadSafeSet"));
}

#[rstest]
#[should_panic(expected = "set type mismatch")]
fn test_mixed_variants_are_rejected() {
    let safe = new_set(Concurrency::ThreadSafe, [1, 2, 3]);
    let unsafe_set = new_set(Concurrency::ThreadUnsafe, [2, 3, 4]);
    let _ = safe.intersect(&*unsafe_set);
}
