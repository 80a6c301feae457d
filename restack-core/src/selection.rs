//! Block-move mechanics: gathering a (possibly scattered) selection into one
//! contiguous run and rotating that run through the plan one row at a time.

use std::ops::Range;

use crate::plan::Plan;

/// The rows a move operates on: the selection if there is one, otherwise
/// just the active row. Always sorted ascending.
pub fn block_for_move(selected: &[usize], active_index: usize) -> Vec<usize> {
    if selected.is_empty() {
        vec![active_index]
    } else {
        let mut block = selected.to_vec();
        block.sort_unstable();
        block
    }
}

/// Pull the rows in `block` (sorted ascending) together into one contiguous
/// run, preserving their relative order. The bottom row keeps its original
/// index; everything else closes up around it. Returns the new plan and the
/// run's index range.
pub fn gather_block(plan: &Plan, block: &[usize]) -> (Plan, Range<usize>) {
    let Some(&bottom) = block.last() else {
        return (plan.clone(), 0..0);
    };
    if bottom >= plan.len() || block.len() > plan.len() {
        return (plan.clone(), 0..0);
    }
    let in_block = |i: usize| block.binary_search(&i).is_ok();

    let mut moved = Vec::with_capacity(block.len());
    let mut rest = Vec::with_capacity(plan.len() - block.len());
    for (i, item) in plan.items().iter().enumerate() {
        if in_block(i) {
            moved.push(item.clone());
        } else {
            rest.push(item.clone());
        }
    }

    let dest = bottom + 1 - block.len();
    let run = dest..bottom + 1;
    rest.splice(dest..dest, moved);
    (Plan::new(rest), run)
}

/// Rotate the row just above the contiguous run to the bottom of the run,
/// shifting the run up by one. `None` when the run is already at the top.
pub fn rotate_up(plan: &Plan, run: &Range<usize>) -> Option<(Plan, Range<usize>)> {
    if run.start == 0 || run.end > plan.len() {
        return None;
    }
    let mut items = plan.items().to_vec();
    let displaced = items.remove(run.start - 1);
    items.insert(run.end - 1, displaced);
    Some((Plan::new(items), run.start - 1..run.end - 1))
}

/// Rotate the row just below the contiguous run to the top of the run,
/// shifting the run down by one. `None` when the run is already at the bottom.
pub fn rotate_down(plan: &Plan, run: &Range<usize>) -> Option<(Plan, Range<usize>)> {
    if run.end >= plan.len() {
        return None;
    }
    let mut items = plan.items().to_vec();
    let displaced = items.remove(run.end);
    items.insert(run.start, displaced);
    Some((Plan::new(items), run.start + 1..run.end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{RebaseAction, RebaseItem};

    fn plan_of(ids: &[&str]) -> Plan {
        Plan::new(
            ids.iter()
                .map(|id| {
                    RebaseItem::new(
                        (*id).to_string(),
                        format!("commit {id}"),
                        RebaseAction::Pick,
                        std::iter::empty(),
                    )
                })
                .collect(),
        )
    }

    fn ids(plan: &Plan) -> Vec<&str> {
        plan.items().iter().map(|i| i.origin_id.as_str()).collect()
    }

    #[test]
    fn test_block_for_move_falls_back_to_active_row() {
        assert_eq!(block_for_move(&[], 3), vec![3]);
        assert_eq!(block_for_move(&[4, 1], 3), vec![1, 4]);
    }

    #[test]
    fn test_gather_scattered_selection() {
        let plan = plan_of(&["a", "b", "c", "d", "e"]);
        let (gathered, run) = gather_block(&plan, &[0, 2, 4]);
        // Bottom of the block keeps index 4
        assert_eq!(ids(&gathered), vec!["b", "d", "a", "c", "e"]);
        assert_eq!(run, 2..5);
    }

    #[test]
    fn test_gather_contiguous_selection_is_identity() {
        let plan = plan_of(&["a", "b", "c"]);
        let (gathered, run) = gather_block(&plan, &[1, 2]);
        assert_eq!(ids(&gathered), vec!["a", "b", "c"]);
        assert_eq!(run, 1..3);
    }

    #[test]
    fn test_rotate_up_moves_displaced_row_below_block() {
        let plan = plan_of(&["a", "b", "c", "d"]);
        let (rotated, run) = rotate_up(&plan, &(1..3)).unwrap();
        assert_eq!(ids(&rotated), vec!["b", "c", "a", "d"]);
        assert_eq!(run, 0..2);
    }

    #[test]
    fn test_rotate_down_moves_displaced_row_above_block() {
        let plan = plan_of(&["a", "b", "c", "d"]);
        let (rotated, run) = rotate_down(&plan, &(1..3)).unwrap();
        assert_eq!(ids(&rotated), vec!["a", "d", "b", "c"]);
        assert_eq!(run, 2..4);
    }

    #[test]
    fn test_rotate_up_then_down_restores_order() {
        let plan = plan_of(&["a", "b", "c", "d", "e"]);
        let run = 2..4;
        let (up, up_run) = rotate_up(&plan, &run).unwrap();
        let (back, back_run) = rotate_down(&up, &up_run).unwrap();
        assert_eq!(ids(&back), ids(&plan));
        assert_eq!(back_run, run);
    }

    #[test]
    fn test_gather_on_empty_plan_is_noop() {
        let plan = Plan::default();
        let (gathered, run) = gather_block(&plan, &[0]);
        assert!(gathered.is_empty());
        assert_eq!(run, 0..0);
    }

    #[test]
    fn test_gather_with_out_of_range_index_is_noop() {
        let plan = plan_of(&["a", "b"]);
        let (gathered, run) = gather_block(&plan, &[5]);
        assert_eq!(ids(&gathered), vec!["a", "b"]);
        assert_eq!(run, 0..0);
    }

    #[test]
    fn test_rotate_noop_at_boundaries() {
        let plan = plan_of(&["a", "b", "c"]);
        assert!(rotate_up(&plan, &(0..2)).is_none());
        assert!(rotate_down(&plan, &(1..3)).is_none());
    }
}
