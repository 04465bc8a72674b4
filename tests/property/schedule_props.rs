//! Properties of the deterministic move schedule

use proptest::prelude::*;
use parlor::session::move_schedule;

proptest! {
    /// Every coordinate of the board appears exactly once.
    #[test]
    fn schedule_covers_board_exactly_once(n in 1u32..12) {
        let schedule: Vec<(u32, u32)> = move_schedule(n).collect();
        prop_assert_eq!(schedule.len(), (n * n) as usize);

        let unique: std::collections::HashSet<&(u32, u32)> = schedule.iter().collect();
        prop_assert_eq!(unique.len(), (n * n) as usize);

        for &(x, y) in &schedule {
            prop_assert!(x < n && y < n);
        }
    }

    /// The schedule is row-major: lexicographically increasing, so the same
    /// board always produces the same sequence.
    #[test]
    fn schedule_is_row_major(n in 1u32..12) {
        let schedule: Vec<(u32, u32)> = move_schedule(n).collect();

        for pair in schedule.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }

        prop_assert_eq!(schedule[0], (0, 0));
        prop_assert_eq!(schedule[schedule.len() - 1], (n - 1, n - 1));
    }

    /// Reruns yield the identical sequence.
    #[test]
    fn schedule_is_reproducible(n in 1u32..12) {
        let first: Vec<(u32, u32)> = move_schedule(n).collect();
        let second: Vec<(u32, u32)> = move_schedule(n).collect();
        prop_assert_eq!(first, second);
    }
}
