//! Unit tests for the countdown publisher

use std::sync::Arc;

use chrono::Duration;

use crate::services::verification::Countdown;

use super::mocks::{test_epoch, MockClock};

#[tokio::test(start_paused = true)]
async fn test_countdown_publishes_decreasing_values() {
    let clock = Arc::new(MockClock::new(test_epoch()));
    let countdown = Countdown::start(test_epoch() + Duration::seconds(3), clock.clone());
    let mut rx = countdown.subscribe();

    assert_eq!(countdown.remaining(), 3);

    clock.advance(Duration::seconds(1));
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 2);

    clock.advance(Duration::seconds(1));
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 1);

    clock.advance(Duration::seconds(1));
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 0);

    // Task stops at zero: the sender is dropped and no further tick arrives
    assert!(rx.changed().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_countdown_repeats_value_until_clock_moves() {
    let clock = Arc::new(MockClock::new(test_epoch()));
    let countdown = Countdown::start(test_epoch() + Duration::seconds(10), clock.clone());
    let mut rx = countdown.subscribe();

    // Ticker fires but the clock hasn't moved; the published value holds
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 10);

    clock.advance(Duration::seconds(4));
    rx.changed().await.unwrap();
    assert_eq!(*rx.borrow_and_update(), 6);
}

#[tokio::test(start_paused = true)]
async fn test_countdown_zero_when_already_expired() {
    let clock = Arc::new(MockClock::new(test_epoch()));
    let countdown = Countdown::start(test_epoch() - Duration::seconds(5), clock);

    assert_eq!(countdown.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_ticks() {
    let clock = Arc::new(MockClock::new(test_epoch()));
    let countdown = Countdown::start(test_epoch() + Duration::seconds(60), clock.clone());
    let mut rx = countdown.subscribe();

    countdown.cancel();
    clock.advance(Duration::seconds(5));

    // The aborted task can never publish again
    assert!(rx.changed().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_ticks() {
    let clock = Arc::new(MockClock::new(test_epoch()));
    let countdown = Countdown::start(test_epoch() + Duration::seconds(60), clock);
    let mut rx = countdown.subscribe();

    drop(countdown);

    assert!(rx.changed().await.is_err());
}
