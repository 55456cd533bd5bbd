use std::fmt;
use std::ops::Range;

/// Byte range into a single source string
#[derive(PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Copy)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Span {
        Span { start, end }
    }

    pub fn start(self) -> u32 {
        self.start
    }

    pub fn end(self) -> u32 {
        self.end
    }

    /// Returns a span starting at our start and ending at `other`'s end
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end,
        }
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start as usize..span.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "Span[>{}]", self.start)
        } else {
            write!(f, "Span[{}:{}]", self.start, self.end)
        }
    }
}

pub const EMPTY_SPAN: Span = Span { start: 0, end: 0 };

/// Builds a span from a marker string
///
/// `^` marks every byte covered by the span while `>` marks the byte immediately before a
/// zero-width span. This isn't `#[cfg(test)]` because other crates' tests use it.
pub fn t2s(v: &str) -> Span {
    if let Some(zero_size_off) = v.find('>') {
        let byte_pos = (zero_size_off + 1) as u32;
        return Span::new(byte_pos, byte_pos);
    }

    let start = v.find('^').expect("Positioning character not found") as u32;
    let end = v.rfind('^').map(|i| i + 1).unwrap() as u32;

    Span::new(start, end)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn marker_spans() {
        assert_eq!(Span::new(2, 5), t2s("  ^^^  "));
        assert_eq!(Span::new(4, 4), t2s("   >"));
    }

    #[test]
    fn joined_span() {
        let open = t2s("^      ");
        let close = t2s("      ^");

        assert_eq!(t2s("^^^^^^^"), open.to(close));
    }

    #[test]
    fn span_to_range() {
        let range: Range<usize> = t2s(" ^^^").into();
        assert_eq!(1..4, range);
    }
}
