//! Baserunner state decoding.
//!
//! The raw encoding is a free-form string whose presence of the digit
//! characters `'1'`, `'2'`, `'3'` signals a runner on that base; order and
//! separators are irrelevant. A missing or non-string value decodes to the
//! empty state, never an error.

/// A base a runner may occupy, ordered by advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Base {
    First,
    Second,
    Third,
}

/// Decoded occupancy at the start of a play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseState {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl BaseState {
    pub fn decode(encoding: Option<&str>) -> BaseState {
        match encoding {
            Some(s) => BaseState {
                first: s.contains('1'),
                second: s.contains('2'),
                third: s.contains('3'),
            },
            None => BaseState::default(),
        }
    }

    /// Bases loaded: a runner on all three bases.
    pub fn loaded(self) -> bool {
        self.first && self.second && self.third
    }

    pub fn empty(self) -> bool {
        !self.first && !self.second && !self.third
    }

    /// The most advanced occupied base, third > second > first.
    pub fn most_advanced(self) -> Option<Base> {
        if self.third {
            Some(Base::Third)
        } else if self.second {
            Some(Base::Second)
        } else if self.first {
            Some(Base::First)
        } else {
            None
        }
    }
}
