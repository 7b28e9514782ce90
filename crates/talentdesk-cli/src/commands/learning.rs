use super::current_identity;
use anyhow::{Context, Result, bail};
use talentdesk_application::Portal;
use talentdesk_core::learning::SavedLearningPath;

async fn resolve_employee_id(portal: &Portal, explicit: Option<i64>) -> Result<i64> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    let identity = current_identity(portal).await?;
    match identity.emp_id.or(identity.user_id) {
        Some(id) => Ok(id),
        None => bail!("The current user has no employee id. Pass one explicitly."),
    }
}

/// Lines describing one saved path and its modules.
fn render_path(path: &SavedLearningPath, active: bool) -> Vec<String> {
    let marker = if active { "▶" } else { " " };
    let modules = path.learning_path.modules();
    let mut lines = vec![format!(
        "{} #{} {} (progress {}, {}/{} modules)",
        marker,
        path.id,
        path.learning_path.title().unwrap_or("Untitled path"),
        path.progress,
        path.learning_path.completed_count(),
        modules.len()
    )];
    for (index, module) in modules.iter().enumerate() {
        let check = if module.completed { "x" } else { " " };
        lines.push(format!("    [{}] {}. {}", check, index, module.title));
    }
    lines
}

fn render_saved_paths(portal: &Portal) -> Vec<String> {
    let active = portal.learning.active_path().and_then(|snapshot| snapshot.id);
    portal
        .learning
        .saved_paths()
        .iter()
        .flat_map(|path| render_path(path, active == Some(path.id)))
        .collect()
}

pub async fn paths(portal: &Portal, employee_id: Option<i64>) -> Result<()> {
    let employee_id = resolve_employee_id(portal, employee_id).await?;
    portal
        .learning
        .fetch_saved_paths(employee_id)
        .await
        .context("Failed to fetch learning paths")?;

    let lines = render_saved_paths(portal);
    if lines.is_empty() {
        println!("No saved learning paths");
        return Ok(());
    }

    println!("📚 Learning paths for employee {}", employee_id);
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

pub async fn complete_module(
    portal: &Portal,
    path_id: i64,
    module_index: usize,
    completed: bool,
    employee_id: Option<i64>,
) -> Result<()> {
    let employee_id = resolve_employee_id(portal, employee_id).await?;
    portal
        .learning
        .fetch_saved_paths(employee_id)
        .await
        .context("Failed to fetch learning paths")?;

    if !portal.learning.select_path(path_id) {
        bail!("Learning path #{} not found for employee {}", path_id, employee_id);
    }

    portal
        .learning
        .update_module(path_id, module_index, completed)
        .await
        .context("Failed to update module")?;

    if let Some(path) = portal.learning.saved_paths().iter().find(|path| path.id == path_id) {
        for line in render_path(path, true) {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{MockTransport, portal_with};
    use serde_json::json;
    use std::sync::Arc;
    use talentdesk_core::http::{ApiResponse, HttpMethod, RequestBody};

    fn saved_paths_body() -> serde_json::Value {
        json!({
            "learning_paths": [
                {
                    "id": 7,
                    "progress": 2.0,
                    "learning_path": {
                        "title": "Analyst to Lead",
                        "modules": [
                            {"module_name": "Foundations", "completed": true},
                            {"module_name": "Advanced Skills", "completed": true},
                            {"module_name": "Practical Experience"}
                        ]
                    }
                },
                {"id": 4, "progress": 1, "learning_path": {"modules": []}}
            ]
        })
    }

    #[tokio::test]
    async fn test_paths_marks_most_recent_as_active() {
        let transport = Arc::new(MockTransport::default());
        let portal = portal_with(transport.clone());
        transport.respond(ApiResponse::ok(saved_paths_body()));

        paths(&portal, Some(3)).await.unwrap();

        assert_eq!(transport.requests()[0].path, "/api/learning/paths/3");
        let lines = render_saved_paths(&portal);
        assert_eq!(lines[0], "▶ #7 Analyst to Lead (progress 2, 2/3 modules)");
        assert_eq!(lines[2], "    [x] 1. Advanced Skills");
        assert!(lines.iter().any(|line| line.starts_with("  #4 Untitled path")));
    }

    #[tokio::test]
    async fn test_complete_module_advances_progress() {
        let transport = Arc::new(MockTransport::default());
        let portal = portal_with(transport.clone());
        transport.respond(ApiResponse::ok(saved_paths_body()));
        transport.respond(ApiResponse::ok(json!({"message": "Module updated"})));

        complete_module(&portal, 7, 2, true, Some(3)).await.unwrap();

        let update = &transport.requests()[1];
        assert_eq!(update.method, HttpMethod::Patch);
        assert_eq!(
            update.body,
            RequestBody::Json(json!({"path_id": 7, "module_index": 2, "completed": true}))
        );
        let active = portal.learning.active_path().unwrap();
        assert_eq!(active.id, Some(7));
        assert_eq!(active.progress, Some(3));
        assert_eq!(active.plan.completed_count(), 3);
    }

    #[tokio::test]
    async fn test_complete_module_rejects_unknown_path() {
        let transport = Arc::new(MockTransport::default());
        let portal = portal_with(transport.clone());
        transport.respond(ApiResponse::ok(saved_paths_body()));

        let err = complete_module(&portal, 99, 0, true, Some(3)).await.unwrap_err();

        assert!(err.to_string().contains("#99 not found"));
        assert_eq!(transport.requests().len(), 1);
    }
}
