use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::database::SharedRegistry;
use crate::error::{ApiError, SignupError};
use crate::models::ActivityCatalog;
use crate::services::activities_service;

// Raw pairs rather than a struct: a repeated `email` takes the last value
// instead of failing deserialization.
type QueryPairs = Vec<(String, String)>;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// An activity segment that can't be decoded can't name an activity.
fn activity_name(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(name)| name).map_err(|e| {
        warn!("Rejected activity path segment: {}", e.body_text());
        ApiError::from(SignupError::ActivityNotFound)
    })
}

fn email_param(query: Result<Query<QueryPairs>, QueryRejection>) -> Result<String, ApiError> {
    let Query(pairs) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    pairs
        .into_iter()
        .filter(|(key, _)| key == "email")
        .map(|(_, value)| value)
        .last()
        .ok_or(ApiError::MissingEmail)
}

pub async fn activities_handler(State(registry): State<SharedRegistry>) -> Json<ActivityCatalog> {
    Json(activities_service::list_activities(&registry))
}

pub async fn signup_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(registry): State<SharedRegistry>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = email_param(query)?;
    let message = activities_service::sign_up(&registry, &activity_name, &email)?;
    Ok(Json(MessageResponse { message }))
}

pub async fn unregister_handler(
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<QueryPairs>, QueryRejection>,
    State(registry): State<SharedRegistry>,
) -> Result<Json<MessageResponse>, ApiError> {
    let activity_name = activity_name(path)?;
    let email = email_param(query)?;
    let message = activities_service::unregister(&registry, &activity_name, &email)?;
    Ok(Json(MessageResponse { message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Result<Query<QueryPairs>, QueryRejection> {
        Ok(Query(
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        ))
    }

    #[test]
    fn last_email_wins() {
        let email = email_param(pairs(&[
            ("email", "a@mergington.edu"),
            ("ref", "x"),
            ("email", "b@mergington.edu"),
        ]))
        .unwrap();
        assert_eq!(email, "b@mergington.edu");
    }

    #[test]
    fn no_email_pair_is_missing() {
        let err = email_param(pairs(&[("mail", "a@mergington.edu")])).unwrap_err();
        assert!(matches!(err, ApiError::MissingEmail));
    }
}
