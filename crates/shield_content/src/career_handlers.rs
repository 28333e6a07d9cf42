// File: crates/shield_content/src/career_handlers.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use shield_auth::{AdminUser, MaybeAuthUser};
use shield_db::repositories::now_rfc3339;
use shield_db::{Career, JobLocation, SalaryRange};
use tracing::{error, info};
use uuid::Uuid;

use crate::state::ContentState;
use shield_common::services::{EmailMessage, NotificationService};

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CareerRequest {
    pub job_title: String,
    pub job_code: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub full_description: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub industry: String,
    pub work_model: Option<String>,
    pub employment_type: Option<String>,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub location: JobLocation,
    #[serde(default)]
    pub salary_range: SalaryRange,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub apply_email: String,
    #[serde(default)]
    pub apply_link: String,
    pub is_active: Option<bool>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct JobApplicationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub job_id: String,
}

/// Handler for the job listing. The public sees active postings; a valid
/// admin token sees everything.
#[axum::debug_handler]
pub async fn list_careers_handler(
    State(state): State<ContentState>,
    MaybeAuthUser(caller): MaybeAuthUser,
) -> Result<Json<Vec<Career>>, (StatusCode, String)> {
    let is_admin = caller.map(|user| user.is_admin()).unwrap_or(false);

    state
        .careers
        .find_all(!is_admin)
        .await
        .map(Json)
        .map_err(|e| {
            error!("Career listing failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch jobs".to_string(),
            )
        })
}

/// Handler fetching a single job posting. Inactive postings are hidden.
#[axum::debug_handler]
pub async fn get_career_handler(
    State(state): State<ContentState>,
    Path(id): Path<String>,
) -> Result<Json<Career>, (StatusCode, String)> {
    let job = state
        .careers
        .find_by_id(&id)
        .await
        .map_err(|e| {
            error!("Career lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch job".to_string(),
            )
        })?
        .filter(|job| job.is_active)
        .ok_or((StatusCode::NOT_FOUND, "Job not found".to_string()))?;

    Ok(Json(job))
}

fn career_from_request(payload: CareerRequest) -> Career {
    let now = now_rfc3339();
    Career {
        id: Uuid::new_v4().to_string(),
        job_title: payload.job_title,
        job_code: payload
            .job_code
            .filter(|code| !code.is_empty())
            .unwrap_or_else(Career::generate_job_code),
        short_description: payload.short_description,
        full_description: payload.full_description,
        department: payload.department,
        industry: payload.industry,
        work_model: payload.work_model.unwrap_or_else(|| "Onsite".to_string()),
        employment_type: payload
            .employment_type
            .unwrap_or_else(|| "Full-time".to_string()),
        experience_level: payload.experience_level,
        location: payload.location,
        salary_range: payload.salary_range,
        skills_required: payload.skills_required,
        responsibilities: payload.responsibilities,
        qualifications: payload.qualifications,
        apply_email: payload.apply_email,
        apply_link: payload.apply_link,
        is_active: payload.is_active.unwrap_or(true),
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Handler creating a job posting (admin only).
#[axum::debug_handler]
pub async fn create_career_handler(
    State(state): State<ContentState>,
    _admin: AdminUser,
    Json(payload): Json<CareerRequest>,
) -> Result<Json<Career>, (StatusCode, String)> {
    state
        .careers
        .create(career_from_request(payload))
        .await
        .map(Json)
        .map_err(|e| {
            error!("Career creation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to create job".to_string(),
            )
        })
}

/// Handler updating a job posting (admin only).
#[axum::debug_handler]
pub async fn update_career_handler(
    State(state): State<ContentState>,
    _admin: AdminUser,
    Path(id): Path<String>,
    Json(payload): Json<CareerRequest>,
) -> Result<Json<Career>, (StatusCode, String)> {
    let existing = state
        .careers
        .find_by_id(&id)
        .await
        .map_err(|e| {
            error!("Career lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update job".to_string(),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, "Job not found".to_string()))?;

    let mut updated = career_from_request(payload);
    updated.id = existing.id;
    updated.created_at = existing.created_at;

    let job = state
        .careers
        .update(&updated)
        .await
        .map_err(|e| {
            error!("Career update failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to update job".to_string(),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, "Job not found".to_string()))?;

    Ok(Json(job))
}

/// Handler deleting a job posting (admin only).
#[axum::debug_handler]
pub async fn delete_career_handler(
    State(state): State<ContentState>,
    _admin: AdminUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let deleted = state.careers.delete(&id).await.map_err(|e| {
        error!("Career deletion failed: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to delete job".to_string(),
        )
    })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Job not found".to_string()));
    }

    Ok(Json(json!({ "message": "Job deleted" })))
}

/// Handler for public job applications. Sends an admin notification and an
/// applicant confirmation; unlike the booking flow these sends are awaited,
/// and a failed send fails the request.
#[axum::debug_handler]
pub async fn apply_career_handler(
    State(state): State<ContentState>,
    Json(payload): Json<JobApplicationRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    if payload.name.is_empty()
        || payload.email.is_empty()
        || payload.phone.is_empty()
        || payload.job_title.is_empty()
    {
        return Err((
            StatusCode::BAD_REQUEST,
            "Please enter all required fields".to_string(),
        ));
    }

    let Some(notifier) = state.notifier.as_ref() else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Mailer service is disabled.".to_string(),
        ));
    };
    let Some(mailer_config) = state.config.mailer.as_ref() else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            "Server configuration error: mailer config missing.".to_string(),
        ));
    };

    let cover_letter = if payload.cover_letter.is_empty() {
        "N/A".to_string()
    } else {
        payload.cover_letter.clone()
    };

    let admin_html = format!(
        r#"<h3>New Job Application</h3>
<p><strong>Job Title:</strong> {}</p>
<p><strong>Applicant Name:</strong> {}</p>
<p><strong>Email:</strong> {}</p>
<p><strong>Phone:</strong> {}</p>
<p><strong>Cover Letter / Details:</strong></p>
<p>{}</p>"#,
        payload.job_title, payload.name, payload.email, payload.phone, cover_letter
    );

    let applicant_html = format!(
        r#"<h3>Application Received</h3>
<p>Dear {},</p>
<p>Thank you for applying for the position of <strong>{}</strong> at Shield Support.</p>
<p>We have successfully received your application details:</p>
<ul>
    <li><strong>Phone:</strong> {}</li>
    <li><strong>Email:</strong> {}</li>
</ul>
<p>Our team will review your application and get back to you if your profile matches our requirements.</p>
<p>Best regards,<br>Shield Support HR Team</p>"#,
        payload.name, payload.job_title, payload.phone, payload.email
    );

    let admin_message = EmailMessage::new(
        mailer_config.operator_email.clone(),
        format!("New Application for {} - {}", payload.job_title, payload.name),
        admin_html,
    );
    let applicant_message = EmailMessage::new(
        payload.email.clone(),
        format!("Application Received: {}", payload.job_title),
        applicant_html,
    );

    for message in [admin_message, applicant_message] {
        if let Err(e) = notifier.send_email(message).await {
            error!("Failed to send application email: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send application email".to_string(),
            ));
        }
    }

    info!(
        "Job application received: {} for {}",
        payload.email, payload.job_title
    );
    Ok(Json(json!({ "message": "Application submitted successfully" })))
}
