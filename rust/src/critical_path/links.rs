//! Emphasis flags for dependency arrows.

use rustc_hash::FxHashSet;

use crate::dates::days_diff;
use crate::models::{DependencyLink, Task};

use super::calculation::index_tasks;

/// Build one link per drawable dependency.
///
/// A dependency is drawable when its predecessor is in `tasks` and both the
/// predecessor's end and the successor's start parse. A link is critical when
/// both ends are critical and the finish-to-start gap is within
/// `slack_threshold_days`, whatever the dependency's type.
pub fn critical_links(
    tasks: &[Task],
    critical: &FxHashSet<String>,
    slack_threshold_days: i64,
) -> Vec<DependencyLink> {
    let task_map = index_tasks(tasks);
    let mut links = Vec::new();

    for task in tasks {
        let Some(succ_start) = task.start() else {
            continue;
        };
        for dep in &task.dependencies {
            let Some(pred) = task_map.get(dep.predecessor_id.as_str()) else {
                continue;
            };
            let Some(pred_end) = pred.end() else {
                continue;
            };
            let is_critical = critical.contains(task.id.as_str())
                && critical.contains(pred.id.as_str())
                && days_diff(pred_end, succ_start) <= slack_threshold_days;
            links.push(DependencyLink {
                predecessor_id: pred.id.clone(),
                successor_id: task.id.clone(),
                kind: dep.kind,
                is_critical,
            });
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CriticalPathConfig;
    use crate::critical_path::calculation::tests::make_task;
    use crate::critical_path::calculate_critical_path;
    use crate::models::DependencyType;

    #[test]
    fn test_links_follow_critical_membership() {
        let tasks = vec![
            make_task("a", "2024-01-01", "2024-01-10", vec![], None),
            make_task("b", "2024-01-01", "2024-01-03", vec![], None),
            make_task(
                "c",
                "2024-01-11",
                "2024-01-20",
                vec![
                    ("a", DependencyType::FinishToStart),
                    ("b", DependencyType::FinishToStart),
                ],
                None,
            ),
        ];
        let result = calculate_critical_path(&tasks, &CriticalPathConfig::default());

        assert_eq!(result.links.len(), 2);
        assert_eq!(result.links[0].predecessor_id, "a");
        assert!(result.links[0].is_critical);
        assert_eq!(result.links[1].predecessor_id, "b");
        assert!(!result.links[1].is_critical);
    }

    #[test]
    fn test_links_use_finish_to_start_gap_for_every_type() {
        // Both tasks are terminal; the SF edge itself is never evaluated but
        // its arrow still qualifies on the finish-to-start gap.
        let tasks = vec![
            make_task("a", "2024-01-01", "2024-01-20", vec![], None),
            make_task(
                "b",
                "2024-01-20",
                "2024-01-20",
                vec![("a", DependencyType::StartToFinish)],
                None,
            ),
        ];
        let result = calculate_critical_path(&tasks, &CriticalPathConfig::default());

        assert_eq!(result.links.len(), 1);
        assert_eq!(result.links[0].kind, DependencyType::StartToFinish);
        assert!(result.links[0].is_critical);
    }

    #[test]
    fn test_undrawable_dependencies_are_skipped() {
        let tasks = vec![
            make_task("a", "2024-01-01", "bad", vec![], None),
            make_task(
                "b",
                "2024-01-11",
                "2024-01-20",
                vec![
                    ("a", DependencyType::FinishToStart),
                    ("ghost", DependencyType::FinishToStart),
                ],
                None,
            ),
        ];
        let critical = FxHashSet::from_iter(["b".to_string()]);
        assert!(critical_links(&tasks, &critical, 1).is_empty());
    }
}
