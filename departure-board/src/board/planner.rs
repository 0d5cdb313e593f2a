//! Splitting a lookahead window into upstream-sized chunks.

use crate::domain::TimeWindow;

/// Width of each upstream query, in minutes.
pub const CHUNK_MINS: u16 = 30;

/// One bounded upstream query: minutes from now, and how many minutes to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub offset: u16,
    pub width: u16,
}

/// Plan the chunks covering `[0, total)` with no gaps or overlap.
///
/// Every chunk is `chunk_size` wide except possibly the last, which takes
/// whatever remains.
///
/// ```
/// use departure_board::board::{Chunk, plan_chunks};
/// use departure_board::domain::TimeWindow;
///
/// let plan = plan_chunks(TimeWindow::clamped(65), 30);
/// assert_eq!(
///     plan,
///     [
///         Chunk { offset: 0, width: 30 },
///         Chunk { offset: 30, width: 30 },
///         Chunk { offset: 60, width: 5 },
///     ]
/// );
/// ```
pub fn plan_chunks(total: TimeWindow, chunk_size: u16) -> Vec<Chunk> {
    let total = total.mins();
    let chunk_size = chunk_size.max(1);

    (0..total.div_ceil(chunk_size))
        .map(|i| {
            let offset = i * chunk_size;
            Chunk {
                offset,
                width: chunk_size.min(total - offset),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(total: i64) -> Vec<(u16, u16)> {
        plan_chunks(TimeWindow::clamped(total), CHUNK_MINS)
            .into_iter()
            .map(|c| (c.offset, c.width))
            .collect()
    }

    #[test]
    fn small_window_is_one_chunk() {
        assert_eq!(plan(1), [(0, 1)]);
        assert_eq!(plan(10), [(0, 10)]);
        assert_eq!(plan(30), [(0, 30)]);
    }

    #[test]
    fn partial_last_chunk() {
        assert_eq!(plan(65), [(0, 30), (30, 30), (60, 5)]);
        assert_eq!(plan(31), [(0, 30), (30, 1)]);
    }

    #[test]
    fn full_window() {
        assert_eq!(plan(120), [(0, 30), (30, 30), (60, 30), (90, 30)]);
    }
}
