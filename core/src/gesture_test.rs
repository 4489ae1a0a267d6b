use super::*;

fn tracker() -> SwipeTracker {
    SwipeTracker::new(80.0)
}

#[test]
fn displacement_at_threshold_is_not_a_swipe() {
    let mut tracker = tracker();
    tracker.begin(200.0);
    assert_eq!(tracker.finish(120.0), None);
}

#[test]
fn leftward_swipe_past_threshold_is_next() {
    let mut tracker = tracker();
    tracker.begin(300.0);
    assert_eq!(tracker.finish(210.0), Some(SwipeDirection::Next));
}

#[test]
fn rightward_swipe_past_threshold_is_prev() {
    let mut tracker = tracker();
    tracker.begin(100.0);
    assert_eq!(tracker.finish(190.5), Some(SwipeDirection::Prev));
}

#[test]
fn finish_without_begin_is_none() {
    let mut tracker = tracker();
    assert_eq!(tracker.finish(500.0), None);
}

#[test]
fn finish_consumes_the_start_point() {
    let mut tracker = tracker();
    tracker.begin(0.0);
    assert_eq!(tracker.finish(200.0), Some(SwipeDirection::Prev));
    assert_eq!(tracker.finish(400.0), None);
}

#[test]
fn cancel_discards_the_start_point() {
    let mut tracker = tracker();
    tracker.begin(0.0);
    tracker.cancel();
    assert_eq!(tracker.finish(200.0), None);
}
