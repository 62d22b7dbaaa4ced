use std::fmt;

use crate::rational::Rational;

/// Half-open range `[start, end)` of positions in the digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// `None` unless `start < end`.
    pub fn new(start: usize, end: usize) -> Option<Span> {
        (start < end).then_some(Span { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Span covering `self` followed directly by `next`.
    pub fn join(&self, next: &Span) -> Option<Span> {
        (self.end == next.start).then_some(Span {
            start: self.start,
            end: next.end,
        })
    }

    /// Every way to cut the span into a non-empty left and right part.
    pub fn splits(&self) -> impl Iterator<Item = (Span, Span)> + use<> {
        let Span { start, end } = *self;
        (start + 1..end).map(move |i| (Span { start, end: i }, Span { start: i, end }))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A reachable value together with the digits it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Solution {
    pub value: Rational,
    pub span: Span,
}

impl Solution {
    pub fn new(value: Rational, span: Span) -> Self {
        Self { value, span }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} @ {}", self.value, self.span)
    }
}
