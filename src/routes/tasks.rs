//! Task CRUD handlers.
//!
//! Every operation is scoped to the authenticated caller: lookups filter on
//! `user_id`, so a task that exists but belongs to someone else is
//! indistinguishable from one that does not exist at all. A path id that is
//! not a UUID is a 400, distinct from 404.

use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthenticatedUserId;
use crate::error::AppError;
use crate::models::{list_order, parse_due_date, Task, TaskPayload};
use crate::response::ApiResponse;
use crate::validation::{validate_task, TaskMode};

const TASK_COLUMNS: &str =
    "id, user_id, title, description, due_date, priority, completed, created_at, updated_at";

fn parse_task_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidIdentifier("Invalid Task ID".into()))
}

async fn find_owned_task(
    pool: &PgPool,
    task_id: Uuid,
    user_id: Uuid,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE id = $1 AND user_id = $2",
        TASK_COLUMNS
    ))
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    task.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Create a task owned by the caller.
///
/// Missing optional fields take their defaults: empty description, medium
/// priority, no due date, not completed.
#[post("/tasks")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
    payload: web::Json<TaskPayload>,
) -> Result<impl Responder, AppError> {
    validate_task(&payload, TaskMode::Create)?;

    let title = payload.title.as_deref().unwrap_or_default().trim().to_string();
    let description = payload.description.as_ref().map(|d| d.trim().to_string());
    let due_date = payload.due_date.as_deref().and_then(parse_due_date);
    let priority = payload.priority.as_deref().and_then(|p| p.parse().ok());

    let task = Task::new(caller.0, title, description, due_date, priority);

    sqlx::query(
        "INSERT INTO tasks (id, user_id, title, description, due_date, priority, completed, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(task.id)
    .bind(task.user_id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.due_date)
    .bind(task.priority)
    .bind(task.completed)
    .bind(task.created_at)
    .bind(task.updated_at)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message("Task created successfully", task)))
}

/// List all of the caller's tasks, due date ascending with undated tasks
/// last, ties broken by most recently created first.
#[get("/tasks")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let mut tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {} FROM tasks WHERE user_id = $1",
        TASK_COLUMNS
    ))
    .bind(caller.0)
    .fetch_all(&**pool)
    .await?;

    tasks.sort_by(list_order);

    Ok(HttpResponse::Ok().json(ApiResponse::data(tasks)))
}

/// Fetch a single task by id, caller-scoped.
#[get("/tasks/{id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;
    let task = find_owned_task(&pool, task_id, caller.0).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::data(task)))
}

/// Partially update a task. Only supplied fields change; `updated_at` always
/// advances.
#[put("/tasks/{id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
    path: web::Path<String>,
    payload: web::Json<TaskPayload>,
) -> Result<impl Responder, AppError> {
    validate_task(&payload, TaskMode::Update)?;

    let task_id = parse_task_id(&path)?;
    let mut task = find_owned_task(&pool, task_id, caller.0).await?;

    if let Some(title) = &payload.title {
        task.title = title.trim().to_string();
    }
    if let Some(description) = &payload.description {
        task.description = description.trim().to_string();
    }
    if let Some(due_date) = &payload.due_date {
        task.due_date = parse_due_date(due_date);
    }
    if let Some(priority) = &payload.priority {
        if let Ok(parsed) = priority.parse() {
            task.priority = parsed;
        }
    }
    if let Some(completed) = payload.completed {
        task.completed = completed;
    }
    task.updated_at = Utc::now();

    sqlx::query(
        "UPDATE tasks
         SET title = $1, description = $2, due_date = $3, priority = $4, completed = $5, updated_at = $6
         WHERE id = $7 AND user_id = $8",
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.due_date)
    .bind(task.priority)
    .bind(task.completed)
    .bind(task.updated_at)
    .bind(task.id)
    .bind(task.user_id)
    .execute(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message("Task updated successfully", task)))
}

/// Delete a task by id, caller-scoped.
#[delete("/tasks/{id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    caller: AuthenticatedUserId,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let task_id = parse_task_id(&path)?;

    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id)
        .bind(caller.0)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Task deleted successfully")))
}
