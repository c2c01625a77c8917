//! Animated statistic counters
//!
//! Each `[data-count]` element counts from zero to its target the first
//! time at least half of it is on screen. The displayed number is a pure
//! function of elapsed time ([`CountTiming::value_at`]); [`CountUp::tick`]
//! only feeds it the clock.

use crate::dom::{Document, NodeId};
use std::time::{Duration, Instant};

/// Attribute holding a counter's target value
pub const COUNT_ATTR: &str = "data-count";

/// Visible fraction that starts a counter
const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Non-breaking space, the sk-SK thousands separator
const GROUP_SEPARATOR: char = '\u{a0}';

/// Format `value` with sk-SK digit grouping, e.g. `12 500`
pub fn format_sk(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(digit);
    }
    out
}

/// A displayed counter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountFrame {
    Running(u64),
    /// The target was reached; nothing changes after this
    Finished(u64),
}

impl CountFrame {
    pub fn value(self) -> u64 {
        match self {
            CountFrame::Running(value) | CountFrame::Finished(value) => value,
        }
    }
}

/// Duration and tick length of a counter animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountTiming {
    pub duration: Duration,
    pub tick: Duration,
}

impl CountTiming {
    pub fn new(duration: Duration, tick: Duration) -> Self {
        Self {
            duration,
            tick: tick.max(Duration::from_millis(1)),
        }
    }

    /// Number of ticks over the whole duration, possibly fractional
    fn steps(&self) -> f64 {
        self.duration.as_nanos() as f64 / self.tick.as_nanos() as f64
    }

    /// Whole ticks elapsed
    fn ticks(&self, elapsed: Duration) -> u64 {
        (elapsed.as_nanos() / self.tick.as_nanos()) as u64
    }

    /// Counter value `elapsed` after the animation started
    pub fn value_at(&self, target: u64, elapsed: Duration) -> CountFrame {
        let ticks = self.ticks(elapsed);
        if ticks == 0 {
            return CountFrame::Running(0);
        }
        let steps = self.steps();
        if steps <= 0.0 {
            return CountFrame::Finished(target);
        }
        let current = ticks as f64 * target as f64 / steps;
        if current >= target as f64 {
            CountFrame::Finished(target)
        } else {
            CountFrame::Running(current.floor() as u64)
        }
    }
}

/// Animation state of one counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterPhase {
    #[default]
    Pending,
    Animating {
        started: Instant,
    },
    Done,
}

#[derive(Debug, Clone)]
pub struct Counter {
    pub node: NodeId,
    pub target: u64,
    pub phase: CounterPhase,
}

#[derive(Debug, Clone)]
pub struct CountUp {
    counters: Vec<Counter>,
    timing: CountTiming,
}

impl CountUp {
    /// Bind to every `[data-count]` with a parsable target and start the visible ones
    pub fn bind(doc: &mut Document, timing: CountTiming, now: Instant) -> Option<Self> {
        let counters: Vec<Counter> = doc
            .with_attr(COUNT_ATTR)
            .into_iter()
            .filter_map(|node| {
                let raw = doc.attr(node, COUNT_ATTR).unwrap_or_default();
                match raw.trim().parse::<u64>() {
                    Ok(target) => Some(Counter {
                        node,
                        target,
                        phase: CounterPhase::Pending,
                    }),
                    Err(err) => {
                        tracing::warn!("Skipping counter with target {:?}: {}", raw, err);
                        None
                    }
                }
            })
            .collect();
        if counters.is_empty() {
            return None;
        }

        let mut count_up = Self { counters, timing };
        count_up.observe(doc, now);
        Some(count_up)
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    /// Start every pending counter that is now at least half visible
    pub fn observe(&mut self, doc: &mut Document, now: Instant) {
        for counter in &mut self.counters {
            if counter.phase == CounterPhase::Pending
                && doc.visible_ratio(counter.node) >= VISIBILITY_THRESHOLD
            {
                tracing::debug!("Counter to {} started", counter.target);
                counter.phase = CounterPhase::Animating { started: now };
                doc.set_text(counter.node, format_sk(0));
            }
        }
    }

    /// Start newly visible counters and redraw running ones
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        self.observe(doc, now);
        for counter in &mut self.counters {
            let CounterPhase::Animating { started } = counter.phase else {
                continue;
            };
            let frame = self
                .timing
                .value_at(counter.target, now.saturating_duration_since(started));
            doc.set_text(counter.node, format_sk(frame.value()));
            if let CountFrame::Finished(_) = frame {
                counter.phase = CounterPhase::Done;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, ScrollBehavior, Viewport};
    use pretty_assertions::assert_eq;

    fn timing() -> CountTiming {
        CountTiming::new(Duration::from_millis(2000), Duration::from_millis(16))
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    mod formatting {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_groups_thousands_with_nbsp() {
            assert_eq!(format_sk(0), "0");
            assert_eq!(format_sk(999), "999");
            assert_eq!(format_sk(1500), "1\u{a0}500");
            assert_eq!(format_sk(12500), "12\u{a0}500");
            assert_eq!(format_sk(1234567), "1\u{a0}234\u{a0}567");
        }
    }

    mod value_at {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_step_function_of_whole_ticks() {
            let timing = timing();
            assert_eq!(timing.value_at(1500, ms(0)), CountFrame::Running(0));
            assert_eq!(timing.value_at(1500, ms(15)), CountFrame::Running(0));
            assert_eq!(timing.value_at(1500, ms(16)), CountFrame::Running(12));
            assert_eq!(timing.value_at(1500, ms(31)), CountFrame::Running(12));
            assert_eq!(timing.value_at(1500, ms(16 * 50)), CountFrame::Running(600));
            assert_eq!(timing.value_at(1500, ms(16 * 124)), CountFrame::Running(1488));
        }

        #[test]
        fn test_finishes_exactly_on_target() {
            let timing = timing();
            assert_eq!(timing.value_at(1500, ms(2000)), CountFrame::Finished(1500));
            assert_eq!(timing.value_at(1500, ms(60_000)), CountFrame::Finished(1500));
        }

        #[test]
        fn test_fractional_step_counts() {
            let timing = timing();
            // 12 / 125 per tick
            assert_eq!(timing.value_at(12, ms(16 * 10)), CountFrame::Running(0));
            assert_eq!(timing.value_at(12, ms(16 * 11)), CountFrame::Running(1));
            assert_eq!(timing.value_at(12, ms(16 * 125)), CountFrame::Finished(12));
        }

        #[test]
        fn test_zero_target_finishes_on_first_tick() {
            assert_eq!(timing().value_at(0, ms(16)), CountFrame::Finished(0));
        }

        #[test]
        fn test_zero_duration_finishes_immediately() {
            let timing = CountTiming::new(Duration::ZERO, ms(16));
            assert_eq!(timing.value_at(250, ms(16)), CountFrame::Finished(250));
        }
    }

    mod counters {
        use super::*;
        use pretty_assertions::assert_eq;

        fn page() -> (Document, NodeId, NodeId) {
            let mut doc = Document::new(Viewport::new(1024.0, 400.0));
            let body = doc.body();
            let near = doc.append(
                body,
                Element::new("span").attr(COUNT_ATTR, "1500").text("0").at(100.0, 40.0),
            );
            let far = doc.append(
                body,
                Element::new("span").attr(COUNT_ATTR, "250").text("0").at(1000.0, 40.0),
            );
            doc.append(body, Element::new("span").attr(COUNT_ATTR, "veľa"));
            doc.append(body, Element::new("footer").at(1040.0, 400.0));
            (doc, near, far)
        }

        #[test]
        fn test_unparsable_targets_are_skipped() {
            let (mut doc, ..) = page();
            let count_up = CountUp::bind(&mut doc, timing(), Instant::now()).unwrap();
            assert_eq!(count_up.counters().len(), 2);
        }

        #[test]
        fn test_visible_counter_runs_once_to_target() {
            let (mut doc, near, far) = page();
            let start = Instant::now();
            let mut count_up = CountUp::bind(&mut doc, timing(), start).unwrap();
            assert_eq!(
                count_up.counters()[0].phase,
                CounterPhase::Animating { started: start }
            );
            assert_eq!(count_up.counters()[1].phase, CounterPhase::Pending);

            count_up.tick(&mut doc, start + ms(16 * 50));
            assert_eq!(doc.text(near), "600");

            count_up.tick(&mut doc, start + ms(2000));
            assert_eq!(doc.text(near), "1\u{a0}500");
            assert_eq!(count_up.counters()[0].phase, CounterPhase::Done);

            // Done counters are never touched again
            doc.set_text(near, "x");
            count_up.tick(&mut doc, start + ms(5000));
            assert_eq!(doc.text(near), "x");
            assert_eq!(doc.text(far), "0");
        }

        #[test]
        fn test_counter_starts_when_half_visible() {
            let (mut doc, _, far) = page();
            let start = Instant::now();
            let mut count_up = CountUp::bind(&mut doc, timing(), start).unwrap();

            // Counter at 1000..1040, viewport bottom at 1019: 19/40 visible
            doc.scroll_to(619.0, ScrollBehavior::Instant, start);
            count_up.tick(&mut doc, start);
            assert_eq!(count_up.counters()[1].phase, CounterPhase::Pending);

            doc.scroll_to(620.0, ScrollBehavior::Instant, start);
            let seen = start + ms(100);
            count_up.tick(&mut doc, seen);
            assert_eq!(
                count_up.counters()[1].phase,
                CounterPhase::Animating { started: seen }
            );
            assert_eq!(doc.text(far), "0");

            // Scrolling away does not restart or stop it
            doc.scroll_to(0.0, ScrollBehavior::Instant, seen);
            count_up.tick(&mut doc, seen + ms(2000));
            assert_eq!(doc.text(far), "250");
            assert_eq!(count_up.counters()[1].phase, CounterPhase::Done);
        }

        #[test]
        fn test_no_counters_binds_nothing() {
            let mut doc = Document::new(Viewport::new(1024.0, 400.0));
            assert!(CountUp::bind(&mut doc, timing(), Instant::now()).is_none());
        }
    }
}
