use crate::plan::Plan;

/// Linear undo/redo over whole-plan snapshots. Pushing after an undo
/// truncates the redo tail, so history is always a straight line.
#[derive(Debug)]
pub struct History {
    snapshots: Vec<Plan>,
    cursor: usize,
}

impl History {
    pub fn new(initial: Plan) -> Self {
        Self {
            snapshots: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Plan {
        &self.snapshots[self.cursor]
    }

    /// Record a new snapshot, discarding anything that was undone.
    pub fn push(&mut self, plan: Plan) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(plan);
        self.cursor += 1;
    }

    /// Step back one snapshot. Returns whether the cursor moved.
    pub fn undo(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Step forward one snapshot. Returns whether the cursor moved.
    pub fn redo(&mut self) -> bool {
        if self.cursor + 1 >= self.snapshots.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
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

    #[test]
    fn test_undo_redo_clamp_at_ends() {
        let mut history = History::new(plan_of(&["a"]));
        assert!(!history.undo());
        assert!(!history.redo());

        history.push(plan_of(&["a", "b"]));
        assert!(history.undo());
        assert!(!history.undo());
        assert!(history.redo());
        assert!(!history.redo());
        assert_eq!(history.current().len(), 2);
    }

    #[test]
    fn test_push_after_undo_truncates_redo_tail() {
        let mut history = History::new(plan_of(&["a"]));
        history.push(plan_of(&["a", "b"]));
        history.push(plan_of(&["a", "b", "c"]));

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.current().len(), 1);

        history.push(plan_of(&["a", "z"]));
        assert_eq!(history.current().len(), 2);
        assert_eq!(history.current().get(1).unwrap().origin_id, "z");

        // The old redo states are gone
        assert!(!history.redo());
    }
}
