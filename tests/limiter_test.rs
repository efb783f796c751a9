//! Token bucket behavior under a paused tokio clock.

use std::time::Duration;

use offer_revive::error::Error;
use offer_revive::limiter::{RateLimiter, TokenBucket, TokenBucketConfig, Unlimited};

fn bucket(initial: u32, capacity: u32, increment_secs: u64, acquire_secs: u64) -> TokenBucket {
    TokenBucket::new(TokenBucketConfig {
        initial,
        capacity,
        increment_interval: Duration::from_secs(increment_secs),
        acquire_interval: Duration::from_secs(acquire_secs),
    })
    .expect("valid bucket config")
}

#[tokio::test(start_paused = true)]
async fn empty_bucket_denies_until_refill() {
    let mut bucket = bucket(2, 2, 30, 0);

    assert!(bucket.try_acquire());
    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(!bucket.try_acquire());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn acquires_are_spaced_by_acquire_interval() {
    let mut bucket = bucket(10, 10, 30, 5);

    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());

    tokio::time::advance(Duration::from_secs(4)).await;
    assert!(!bucket.try_acquire());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(bucket.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn denied_acquire_does_not_consume() {
    let mut bucket = bucket(3, 3, 30, 5);

    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());
    assert!(!bucket.try_acquire());

    assert_eq!(bucket.available(), 2);
}

#[tokio::test(start_paused = true)]
async fn full_bucket_does_not_bank_idle_time() {
    let mut bucket = bucket(1, 1, 30, 0);

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(bucket.try_acquire());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(!bucket.try_acquire());

    tokio::time::advance(Duration::from_secs(29)).await;
    assert!(bucket.try_acquire());
}

#[tokio::test(start_paused = true)]
async fn refill_is_capped_at_capacity() {
    let mut bucket = bucket(0, 2, 1, 0);

    tokio::time::advance(Duration::from_secs(60)).await;

    assert_eq!(bucket.available(), 2);
}

#[tokio::test(start_paused = true)]
async fn partial_intervals_carry_over() {
    let mut bucket = bucket(0, 5, 10, 0);

    tokio::time::advance(Duration::from_secs(15)).await;
    assert_eq!(bucket.available(), 1);

    tokio::time::advance(Duration::from_secs(5)).await;
    assert_eq!(bucket.available(), 2);
}

#[tokio::test(start_paused = true)]
async fn default_config_grants_first_acquire() {
    let mut bucket = TokenBucket::new(TokenBucketConfig::default()).unwrap();

    assert!(bucket.try_acquire());
    assert!(!bucket.try_acquire());
}

#[test]
fn config_rejects_zero_capacity() {
    let config = TokenBucketConfig {
        initial: 0,
        capacity: 0,
        ..TokenBucketConfig::default()
    };
    assert!(matches!(TokenBucket::new(config), Err(Error::Config(_))));
}

#[test]
fn config_rejects_initial_over_capacity() {
    let config = TokenBucketConfig {
        initial: 10,
        capacity: 5,
        ..TokenBucketConfig::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn config_rejects_zero_increment_interval() {
    let config = TokenBucketConfig {
        increment_interval: Duration::ZERO,
        ..TokenBucketConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn unlimited_always_grants() {
    let mut limiter = Unlimited;
    assert!((0..100).all(|_| limiter.try_acquire()));
}

#[test]
fn boxed_limiter_delegates() {
    let mut limiter: Box<dyn RateLimiter> = Box::new(Unlimited);
    assert!(limiter.try_acquire());
}
