//! Critical path calculation by backward slack propagation.
//!
//! Rather than a full forward/backward pass with per-task float, the path is
//! grown backwards from the task(s) finishing on the project end date: a
//! predecessor joins when the gap to its successor is within the configured
//! slack threshold for the dependency's type.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

use crate::config::CriticalPathConfig;
use crate::dates::days_diff;
use crate::models::{DependencyType, Task};
use crate::{log_changes, log_checks, log_debug};

use super::links::critical_links;
use super::types::{CriticalPathResult, ScheduleIssue};

/// Task id -> task. The last record wins when ids repeat.
pub(crate) fn index_tasks(tasks: &[Task]) -> FxHashMap<&str, &Task> {
    let mut map: FxHashMap<&str, &Task> =
        FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
    for task in tasks {
        map.insert(task.id.as_str(), task);
    }
    map
}

/// Gap in days between a predecessor and its successor for one dependency.
///
/// `None` when a required date does not parse, or for start-to-finish
/// dependencies, which are not evaluated.
pub fn dependency_slack(pred: &Task, succ: &Task, kind: DependencyType) -> Option<i64> {
    match kind {
        DependencyType::FinishToStart => Some(days_diff(pred.end()?, succ.start()?)),
        DependencyType::StartToStart => Some(days_diff(pred.start()?, succ.start()?)),
        DependencyType::FinishToFinish => Some(days_diff(pred.end()?, succ.end()?)),
        DependencyType::StartToFinish => None,
    }
}

/// Collect ignored input in list order: bad dates first per task, then
/// unresolved predecessors.
fn collect_issues(tasks: &[Task], task_map: &FxHashMap<&str, &Task>) -> Vec<ScheduleIssue> {
    let mut issues = Vec::new();
    for task in tasks {
        for (field, value, parsed) in [
            ("startDate", &task.start_date, task.start()),
            ("endDate", &task.end_date, task.end()),
        ] {
            if parsed.is_none() {
                issues.push(ScheduleIssue::InvalidDate {
                    task_id: task.id.clone(),
                    field,
                    value: value.clone(),
                });
            }
        }
        for dep in &task.dependencies {
            if !task_map.contains_key(dep.predecessor_id.as_str()) {
                issues.push(ScheduleIssue::DanglingDependency {
                    task_id: task.id.clone(),
                    predecessor_id: dep.predecessor_id.clone(),
                });
            }
        }
    }
    issues
}

/// Breadth-first walk from the terminal tasks over qualifying predecessor edges.
fn propagate_backward<'a>(
    tasks: &'a [Task],
    task_map: &FxHashMap<&'a str, &'a Task>,
    project_end: NaiveDate,
    config: &CriticalPathConfig,
) -> FxHashSet<&'a str> {
    let verbosity = config.verbosity;

    let mut queue: VecDeque<&str> = tasks
        .iter()
        .filter(|t| t.end() == Some(project_end))
        .map(|t| t.id.as_str())
        .collect();
    log_debug!(verbosity, "Terminal tasks: {:?}", queue);

    let mut critical: FxHashSet<&str> = FxHashSet::default();

    while let Some(current_id) = queue.pop_front() {
        // Already-processed ids may be queued again by another successor
        if !critical.insert(current_id) {
            continue;
        }
        let Some(&current) = task_map.get(current_id) else {
            continue;
        };

        for dep in &current.dependencies {
            let Some(&pred) = task_map.get(dep.predecessor_id.as_str()) else {
                log_checks!(
                    verbosity,
                    "Skip {} -> {}: predecessor not found",
                    dep.predecessor_id,
                    current_id
                );
                continue;
            };
            let Some(slack) = dependency_slack(pred, current, dep.kind) else {
                log_checks!(
                    verbosity,
                    "Skip {} -{}-> {}: not evaluated",
                    pred.id,
                    dep.kind,
                    current_id
                );
                continue;
            };
            log_debug!(
                verbosity,
                "{} -{}-> {}: slack={}d",
                pred.id,
                dep.kind,
                current_id,
                slack
            );
            if slack <= config.slack_threshold_days {
                queue.push_back(pred.id.as_str());
            }
        }
    }

    critical
}

/// Mark every summary task that has a critical descendant via direct children.
fn propagate_to_summaries<'a>(
    task_map: &FxHashMap<&'a str, &'a Task>,
    critical: &mut FxHashSet<&'a str>,
) {
    let leaves: Vec<&str> = critical.iter().copied().collect();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for leaf in leaves {
        let mut current = leaf;
        while let Some(parent_id) = task_map
            .get(current)
            .and_then(|task| task.parent_id.as_deref())
        {
            let Some((&parent_key, _)) = task_map.get_key_value(parent_id) else {
                break;
            };
            // Stops on parent cycles and on chains already walked
            if !seen.insert(parent_key) {
                break;
            }
            critical.insert(parent_key);
            current = parent_key;
        }
    }
}

/// Compute the critical task set for one project's task list.
///
/// Never fails: unparseable dates and dangling predecessors are reported in
/// `issues` and otherwise contribute nothing.
pub fn calculate_critical_path(tasks: &[Task], config: &CriticalPathConfig) -> CriticalPathResult {
    if tasks.is_empty() {
        return CriticalPathResult::default();
    }
    let verbosity = config.verbosity;
    let task_map = index_tasks(tasks);

    let issues = collect_issues(tasks, &task_map);
    for issue in &issues {
        log_checks!(verbosity, "{}", issue);
    }

    let Some(project_end) = tasks.iter().filter_map(Task::end).max() else {
        log_changes!(verbosity, "No task has a valid end date");
        return CriticalPathResult {
            issues,
            ..Default::default()
        };
    };

    let mut critical = propagate_backward(tasks, &task_map, project_end, config);
    propagate_to_summaries(&task_map, &mut critical);

    let critical_task_ids: FxHashSet<String> =
        critical.into_iter().map(str::to_string).collect();
    log_changes!(
        verbosity,
        "Critical path: {} of {} tasks, project end {}",
        critical_task_ids.len(),
        tasks.len(),
        project_end
    );

    let links = critical_links(tasks, &critical_task_ids, config.slack_threshold_days);

    CriticalPathResult {
        critical_task_ids,
        project_end: Some(project_end),
        links,
        issues,
    }
}
