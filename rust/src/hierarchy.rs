//! Work-breakdown hierarchy flattening for table and Gantt rows.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::{HierarchyRow, Task};

/// Flatten a task list into depth-first pre-order rows.
///
/// Tasks without a parent, or whose parent is not in `tasks`, are roots.
/// Roots and siblings are ordered by `order_index` (missing = 0), keeping
/// input order on ties. A task in `collapsed` is emitted but its subtree is
/// not.
pub fn flatten_hierarchy(tasks: &[Task], collapsed: &FxHashSet<String>) -> Vec<HierarchyRow> {
    let known: FxHashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    // Indices into `tasks`
    let mut children: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    let mut roots: Vec<usize> = Vec::new();
    for (idx, task) in tasks.iter().enumerate() {
        match task.parent_id.as_deref() {
            Some(parent) if known.contains(parent) => {
                children.entry(parent).or_default().push(idx);
            }
            _ => roots.push(idx),
        }
    }

    let order = |idx: &usize| tasks[*idx].order_index.unwrap_or(0);
    roots.sort_by_key(order);
    for siblings in children.values_mut() {
        siblings.sort_by_key(order);
    }

    let mut rows = Vec::with_capacity(tasks.len());
    let mut visited = vec![false; tasks.len()];
    let mut stack: Vec<(usize, u32)> = roots.into_iter().rev().map(|idx| (idx, 0)).collect();

    while let Some((idx, level)) = stack.pop() {
        if std::mem::replace(&mut visited[idx], true) {
            continue;
        }
        let task = &tasks[idx];
        let kids = children.get(task.id.as_str());
        rows.push(HierarchyRow {
            task: task.clone(),
            level,
            has_children: kids.is_some_and(|k| !k.is_empty()),
        });
        if collapsed.contains(task.id.as_str()) {
            continue;
        }
        if let Some(kids) = kids {
            stack.extend(kids.iter().rev().map(|&child| (child, level + 1)));
        }
    }

    rows
}
