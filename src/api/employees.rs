//! Employee CRUD endpoints

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path};
use crate::domain::{Employee, EmployeeId, EmployeeInput};

/// Body for create and update. A client supplied `id` is ignored, missing or
/// null fields become empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

impl From<EmployeeRequest> for EmployeeInput {
    fn from(request: EmployeeRequest) -> Self {
        EmployeeInput::new(
            request.name.unwrap_or_default(),
            request.position.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeResponse {
    pub id: i32,
    pub name: String,
    pub position: String,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.value(),
            name: employee.name,
            position: employee.position,
        }
    }
}

pub fn create_employee_router() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// GET /employees
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeResponse>>, ApiError> {
    let employees = state.employee_service.list().await?;
    debug!(count = employees.len(), "Listing employees");

    Ok(Json(employees.into_iter().map(EmployeeResponse::from).collect()))
}

/// GET /employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = state.employee_service.get(EmployeeId::new(id)).await?;
    Ok(Json(employee.into()))
}

/// POST /employees
pub async fn create_employee(
    State(state): State<AppState>,
    Json(request): Json<EmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = state.employee_service.create(request.into()).await?;
    let location = format!("/employees/{}", employee.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(EmployeeResponse::from(employee)),
    ))
}

/// PUT /employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<EmployeeRequest>,
) -> Result<Json<EmployeeResponse>, ApiError> {
    let employee = state
        .employee_service
        .update(EmployeeId::new(id), request.into())
        .await?;

    Ok(Json(employee.into()))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.employee_service.delete(EmployeeId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
