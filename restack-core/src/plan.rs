use std::collections::BTreeMap;

/// The actions understood by `git rebase -i`, minus `exec`/`break`/`label`
/// and friends, which the editor never assigns to a commit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseAction {
    Pick,
    Drop,
    Edit,
    Reword,
    Squash,
    Fixup,
}

impl RebaseAction {
    pub const ALL: [RebaseAction; 6] = [
        RebaseAction::Pick,
        RebaseAction::Drop,
        RebaseAction::Edit,
        RebaseAction::Reword,
        RebaseAction::Squash,
        RebaseAction::Fixup,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RebaseAction::Pick => "pick",
            RebaseAction::Drop => "drop",
            RebaseAction::Edit => "edit",
            RebaseAction::Reword => "reword",
            RebaseAction::Squash => "squash",
            RebaseAction::Fixup => "fixup",
        }
    }

    /// Parse a todo keyword, accepting the single-letter abbreviations git
    /// itself writes and accepts.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pick" | "p" => Some(RebaseAction::Pick),
            "drop" | "d" => Some(RebaseAction::Drop),
            "edit" | "e" => Some(RebaseAction::Edit),
            "reword" | "r" => Some(RebaseAction::Reword),
            "squash" | "s" => Some(RebaseAction::Squash),
            "fixup" | "f" => Some(RebaseAction::Fixup),
            _ => None,
        }
    }
}

impl std::fmt::Display for RebaseAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the change the origin commit made to `path` should end up in the
/// commit this item assembles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub included: bool,
}

/// One step of the plan: an origin commit, an action, and per-file inclusion
/// flags. The key set of `file_changes` is fixed at construction (exactly the
/// paths the origin commit touched); only the `included` flags and `action`
/// ever change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseItem {
    pub origin_id: String,
    pub message: String,
    pub action: RebaseAction,
    pub file_changes: BTreeMap<String, FileChange>,
}

impl RebaseItem {
    pub fn new<I>(origin_id: String, message: String, action: RebaseAction, paths: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let file_changes = paths
            .into_iter()
            .map(|path| {
                (
                    path.clone(),
                    FileChange {
                        path,
                        included: true,
                    },
                )
            })
            .collect();
        Self {
            origin_id,
            message,
            action,
            file_changes,
        }
    }

    /// Abbreviated commit id, as shown in todo files.
    pub fn short_id(&self) -> &str {
        let end = self
            .origin_id
            .char_indices()
            .nth(7)
            .map_or(self.origin_id.len(), |(i, _)| i);
        &self.origin_id[..end]
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn included_paths(&self) -> impl Iterator<Item = &str> {
        self.file_changes
            .values()
            .filter(|change| change.included)
            .map(|change| change.path.as_str())
    }

    pub fn all_included(&self) -> bool {
        self.file_changes.values().all(|change| change.included)
    }

    pub fn none_included(&self) -> bool {
        self.file_changes.values().all(|change| !change.included)
    }

    pub fn with_action(&self, action: RebaseAction) -> Self {
        Self {
            action,
            ..self.clone()
        }
    }

    /// Copy with `included` flipped for `path`. Returns `None` when the
    /// origin commit never touched `path`.
    pub fn with_file_toggled(&self, path: &str) -> Option<Self> {
        let mut item = self.clone();
        let change = item.file_changes.get_mut(path)?;
        change.included = !change.included;
        Some(item)
    }

    /// Copy with `included` set to whether each path is in `keep`.
    pub fn restricted_to(&self, keep: &std::collections::HashSet<&str>) -> Self {
        let mut item = self.clone();
        for change in item.file_changes.values_mut() {
            change.included = keep.contains(change.path.as_str());
        }
        item
    }
}

/// An ordered snapshot of the whole rebase plan. A `Plan` is a value: every
/// editing operation returns a new one, which is what makes the undo history
/// a plain list of snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    items: Vec<RebaseItem>,
}

impl Plan {
    pub fn new(items: Vec<RebaseItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[RebaseItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&RebaseItem> {
        self.items.get(index)
    }

    /// New plan with `action` applied to every item in `indices`.
    pub fn with_actions(&self, indices: &[usize], action: RebaseAction) -> Self {
        let mut items = self.items.clone();
        for &index in indices {
            if let Some(item) = items.get_mut(index) {
                item.action = action;
            }
        }
        Self { items }
    }

    /// New plan with the inclusion flag of `path` flipped on item `index`.
    /// Unchanged if the item doesn't carry that path.
    pub fn with_file_toggled(&self, index: usize, path: &str) -> Self {
        let mut items = self.items.clone();
        if let Some(item) = items.get(index)
            && let Some(toggled) = item.with_file_toggled(path)
        {
            items[index] = toggled;
        }
        Self { items }
    }

    /// New plan with a copy of item `index` inserted directly below it.
    pub fn with_item_copied(&self, index: usize) -> Self {
        let mut items = self.items.clone();
        if let Some(item) = items.get(index) {
            let copy = item.clone();
            items.insert(index + 1, copy);
        }
        Self { items }
    }

    /// Union of all origin commits' paths, in first-seen order. This is the
    /// column list for the file grid; it never changes while editing.
    pub fn visible_files(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut files = Vec::new();
        for item in &self.items {
            for path in item.file_changes.keys() {
                if seen.insert(path.clone()) {
                    files.push(path.clone());
                }
            }
        }
        files
    }
}
