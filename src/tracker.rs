//! Which labelled section of the page is currently "active".
//!
//! The tracker is fed visibility events from the viewport observer and
//! navigation requests from the nav controls. It never scrolls anything
//! itself: navigation methods return the index the caller should bring into
//! view.

use crate::error::{Result, SiteError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Prev => -1,
            Direction::Next => 1,
        }
    }
}

/// One visibility report for a tracked section, as delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEvent {
    pub index: usize,
    pub ratio: f64,
    pub intersecting: bool,
}

impl VisibilityEvent {
    fn qualifies(&self, threshold: f64) -> bool {
        self.intersecting && self.ratio >= threshold
    }
}

#[derive(Clone, Debug)]
pub struct SectionTracker {
    active: usize,
    len: usize,
    threshold: f64,
}

impl SectionTracker {
    pub fn new(len: usize, threshold: f64) -> Result<Self> {
        if len == 0 {
            return Err(SiteError::NoSections);
        }
        Ok(Self {
            active: 0,
            len,
            threshold,
        })
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn can_go_prev(&self) -> bool {
        self.active > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.active + 1 < self.len
    }

    /// Mark `index` as the section in view. Unknown indices are ignored.
    pub fn on_intersection(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Apply a batch of visibility reports in delivery order; the last
    /// qualifying report wins.
    pub fn observe<I>(&mut self, events: I) -> bool
    where
        I: IntoIterator<Item = VisibilityEvent>,
    {
        let before = self.active;
        for event in events {
            if event.qualifies(self.threshold) {
                self.on_intersection(event.index);
            }
        }
        self.active != before
    }

    /// Step one section forwards or backwards. Returns the new index, or
    /// `None` when already at that end of the page.
    pub fn navigate(&mut self, direction: Direction) -> Option<usize> {
        let last = self.len as isize - 1;
        let target = (self.active as isize + direction.step()).clamp(0, last) as usize;
        if target == self.active {
            return None;
        }
        self.active = target;
        Some(target)
    }

    /// Jump to an explicit section. Out-of-range indices are rejected.
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        self.active = index;
        Some(index)
    }

    pub fn go_relative(&mut self, delta: i32) -> Option<usize> {
        match delta.signum() {
            1 => self.navigate(Direction::Next),
            -1 => self.navigate(Direction::Prev),
            _ => None,
        }
    }
}
