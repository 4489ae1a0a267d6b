#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Prev,
    Next,
}

/// Horizontal swipe thresholding for touch page navigation.
///
/// `begin` records the touch-down x coordinate; `finish` compares it with the
/// touch-up coordinate and reports a direction only when the displacement
/// magnitude exceeds the threshold. A leftward swipe advances to the next
/// page.
#[derive(Debug)]
pub struct SwipeTracker {
    threshold: f64,
    start_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            start_x: None,
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = Some(x);
    }

    pub fn cancel(&mut self) {
        self.start_x = None;
    }

    pub fn finish(&mut self, x: f64) -> Option<SwipeDirection> {
        let start = self.start_x.take()?;
        let distance = x - start;
        if distance.abs() <= self.threshold {
            return None;
        }
        if distance < 0.0 {
            Some(SwipeDirection::Next)
        } else {
            Some(SwipeDirection::Prev)
        }
    }
}
