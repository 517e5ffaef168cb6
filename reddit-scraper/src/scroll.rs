use crate::browser::{NodeIdentity, PageDriver};
use persona_core::ErrorExt;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Enough distinct elements were collected.
    ItemCap,
    /// The scroll budget is used up.
    ScrollCap,
    /// Content height did not grow after a scroll: end of list or a render stall.
    HeightStable,
    /// The page could not be measured.
    DriverError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDecision {
    Continue,
    Stop(StopReason),
}

/// What one query/scroll/settle/measure round saw.
#[derive(Debug)]
pub struct Observation<E> {
    pub elements: Vec<E>,
    /// `None` when the height could not be read.
    pub height: Option<i64>,
}

/// Accumulated elements and termination bookkeeping for one collection run.
#[derive(Debug)]
pub struct ScrollState<E> {
    seen: Vec<E>,
    seen_ids: HashSet<i64>,
    last_height: Option<i64>,
    scrolls: u32,
    max_items: usize,
    max_scrolls: u32,
}

impl<E: NodeIdentity> ScrollState<E> {
    pub fn new(max_items: usize, max_scrolls: u32) -> Self {
        Self {
            seen: Vec::new(),
            seen_ids: HashSet::new(),
            last_height: None,
            scrolls: 0,
            max_items,
            max_scrolls,
        }
    }

    /// Decision before any round has run, and after each height update.
    pub fn check_limits(&self) -> ScrollDecision {
        if self.seen.len() >= self.max_items {
            ScrollDecision::Stop(StopReason::ItemCap)
        } else if self.scrolls >= self.max_scrolls {
            ScrollDecision::Stop(StopReason::ScrollCap)
        } else {
            ScrollDecision::Continue
        }
    }

    pub fn step(&mut self, observation: Observation<E>) -> ScrollDecision {
        for element in observation.elements {
            if self.seen_ids.insert(element.node_id()) {
                self.seen.push(element);
            }
        }

        let Some(height) = observation.height else {
            return ScrollDecision::Stop(StopReason::DriverError);
        };
        if self.last_height == Some(height) {
            return ScrollDecision::Stop(StopReason::HeightStable);
        }

        self.last_height = Some(height);
        self.scrolls += 1;
        self.check_limits()
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    pub fn scrolls(&self) -> u32 {
        self.scrolls
    }

    pub fn last_height(&self) -> Option<i64> {
        self.last_height
    }

    /// At most `max_items` elements, in first-seen order.
    pub fn into_elements(mut self) -> Vec<E> {
        self.seen.truncate(self.max_items);
        self.seen
    }
}

/// Scrolls an infinite list until it stops growing, collecting matching elements.
#[derive(Debug, Clone)]
pub struct ScrollCollector {
    settle_delay: Duration,
    scroll_step_px: i64,
}

impl ScrollCollector {
    pub fn new(settle_delay: Duration, scroll_step_px: i64) -> Self {
        Self {
            settle_delay,
            scroll_step_px,
        }
    }

    pub async fn collect<P: PageDriver>(
        &self,
        page: &P,
        selector: &str,
        max_items: usize,
        max_scrolls: u32,
    ) -> Vec<P::Element> {
        let mut state = ScrollState::new(max_items, max_scrolls);
        let mut decision = state.check_limits();

        let reason = loop {
            if let ScrollDecision::Stop(reason) = decision {
                break reason;
            }

            let elements = page.query_all(selector).await.unwrap_or_else(|e| {
                e.log_warn();
                Vec::new()
            });

            if let Err(e) = page.scroll_by(self.scroll_step_px).await {
                e.log_warn();
            }
            sleep(self.settle_delay).await;

            let height = match page.scroll_height().await {
                Ok(height) => Some(height),
                Err(e) => {
                    e.log_warn();
                    None
                }
            };

            decision = state.step(Observation { elements, height });
            debug!(
                "Scroll {} on '{}': {} elements, height {:?}",
                state.scrolls(),
                selector,
                state.len(),
                state.last_height()
            );
        };

        debug!(
            "Stopped collecting '{}' after {} scrolls with {} elements: {:?}",
            selector,
            state.scrolls(),
            state.len(),
            reason
        );
        state.into_elements()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Node(i64);

    impl NodeIdentity for Node {
        fn node_id(&self) -> i64 {
            self.0
        }
    }

    fn observe(ids: &[i64], height: i64) -> Observation<Node> {
        Observation {
            elements: ids.iter().map(|&id| Node(id)).collect(),
            height: Some(height),
        }
    }

    #[test]
    fn test_duplicates_across_rounds_are_merged() {
        let mut state = ScrollState::new(100, 10);
        assert_eq!(state.step(observe(&[1, 2, 3], 1000)), ScrollDecision::Continue);
        assert_eq!(state.step(observe(&[2, 3, 4, 4], 2000)), ScrollDecision::Continue);
        assert_eq!(state.len(), 4);
        assert_eq!(state.scrolls(), 2);
        assert_eq!(
            state.into_elements(),
            vec![Node(1), Node(2), Node(3), Node(4)]
        );
    }

    #[test]
    fn test_unchanged_height_stops() {
        let mut state = ScrollState::new(100, 10);
        assert_eq!(state.step(observe(&[1], 1000)), ScrollDecision::Continue);
        assert_eq!(
            state.step(observe(&[1, 2], 1000)),
            ScrollDecision::Stop(StopReason::HeightStable)
        );
        // Elements from the final round are still kept
        assert_eq!(state.len(), 2);
        assert_eq!(state.scrolls(), 1);
    }

    #[test]
    fn test_scroll_budget() {
        let mut state = ScrollState::new(100, 3);
        assert_eq!(state.step(observe(&[], 1)), ScrollDecision::Continue);
        assert_eq!(state.step(observe(&[], 2)), ScrollDecision::Continue);
        assert_eq!(
            state.step(observe(&[], 3)),
            ScrollDecision::Stop(StopReason::ScrollCap)
        );
        assert!(state.is_empty());
    }

    #[test]
    fn test_item_cap_truncates() {
        let mut state = ScrollState::new(3, 10);
        assert_eq!(
            state.step(observe(&[1, 2, 3, 4, 5], 500)),
            ScrollDecision::Stop(StopReason::ItemCap)
        );
        assert_eq!(state.len(), 5);
        assert_eq!(state.into_elements(), vec![Node(1), Node(2), Node(3)]);
    }

    #[test]
    fn test_zero_limits_stop_before_first_round() {
        let state: ScrollState<Node> = ScrollState::new(0, 10);
        assert_eq!(state.check_limits(), ScrollDecision::Stop(StopReason::ItemCap));

        let state: ScrollState<Node> = ScrollState::new(10, 0);
        assert_eq!(
            state.check_limits(),
            ScrollDecision::Stop(StopReason::ScrollCap)
        );
    }

    #[test]
    fn test_missing_height_stops() {
        let mut state = ScrollState::new(10, 10);
        let decision = state.step(Observation {
            elements: vec![Node(9)],
            height: None,
        });
        assert_eq!(decision, ScrollDecision::Stop(StopReason::DriverError));
        assert_eq!(state.into_elements(), vec![Node(9)]);
    }
}
