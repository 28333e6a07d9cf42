//! Job posting model and SQL repository

use crate::error::DbError;
use crate::DbClient;
use serde::{Deserialize, Serialize};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error};
use uuid::Uuid;

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JobLocation {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip_code: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// A job posting. Inactive postings stay stored but are hidden from the
/// public listing.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Career {
    pub id: String,
    pub job_title: String,
    pub job_code: String,
    pub short_description: String,
    pub full_description: String,
    pub department: String,
    pub industry: String,
    pub work_model: String,
    pub employment_type: String,
    pub experience_level: String,
    pub location: JobLocation,
    pub salary_range: SalaryRange,
    pub skills_required: Vec<String>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub apply_email: String,
    pub apply_link: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Career {
    /// Generated code shown to applicants, assigned when none was supplied.
    pub fn generate_job_code() -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("JOB-{}", &suffix[..8].to_uppercase())
    }
}

/// SQL repository for job postings
#[derive(Debug, Clone)]
pub struct SqlCareerRepository {
    db_client: DbClient,
}

fn row_to_career(row: &AnyRow) -> Career {
    let location_json: String = row.try_get("location").unwrap_or_default();
    let salary_json: String = row.try_get("salary_range").unwrap_or_default();
    let skills_json: String = row.try_get("skills_required").unwrap_or_default();
    let responsibilities_json: String = row.try_get("responsibilities").unwrap_or_default();
    let qualifications_json: String = row.try_get("qualifications").unwrap_or_default();
    Career {
        id: row.try_get("id").unwrap_or_default(),
        job_title: row.try_get("job_title").unwrap_or_default(),
        job_code: row.try_get("job_code").unwrap_or_default(),
        short_description: row.try_get("short_description").unwrap_or_default(),
        full_description: row.try_get("full_description").unwrap_or_default(),
        department: row.try_get("department").unwrap_or_default(),
        industry: row.try_get("industry").unwrap_or_default(),
        work_model: row.try_get("work_model").unwrap_or_default(),
        employment_type: row.try_get("employment_type").unwrap_or_default(),
        experience_level: row.try_get("experience_level").unwrap_or_default(),
        location: serde_json::from_str(&location_json).unwrap_or_default(),
        salary_range: serde_json::from_str(&salary_json).unwrap_or_default(),
        skills_required: serde_json::from_str(&skills_json).unwrap_or_default(),
        responsibilities: serde_json::from_str(&responsibilities_json).unwrap_or_default(),
        qualifications: serde_json::from_str(&qualifications_json).unwrap_or_default(),
        apply_email: row.try_get("apply_email").unwrap_or_default(),
        apply_link: row.try_get("apply_link").unwrap_or_default(),
        is_active: row.try_get::<i64, _>("is_active").unwrap_or(1) != 0,
        created_at: row.try_get("created_at").unwrap_or_default(),
        updated_at: row.try_get("updated_at").unwrap_or_default(),
    }
}

impl SqlCareerRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing careers schema");
        let query = r#"
            CREATE TABLE IF NOT EXISTS careers (
                id TEXT PRIMARY KEY,
                job_title TEXT NOT NULL,
                job_code TEXT NOT NULL,
                short_description TEXT NOT NULL DEFAULT '',
                full_description TEXT NOT NULL DEFAULT '',
                department TEXT NOT NULL DEFAULT '',
                industry TEXT NOT NULL DEFAULT '',
                work_model TEXT NOT NULL DEFAULT 'Onsite',
                employment_type TEXT NOT NULL DEFAULT 'Full-time',
                experience_level TEXT NOT NULL DEFAULT '',
                location TEXT NOT NULL DEFAULT '{}',
                salary_range TEXT NOT NULL DEFAULT '{}',
                skills_required TEXT NOT NULL DEFAULT '[]',
                responsibilities TEXT NOT NULL DEFAULT '[]',
                qualifications TEXT NOT NULL DEFAULT '[]',
                apply_email TEXT NOT NULL DEFAULT '',
                apply_link TEXT NOT NULL DEFAULT '',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
        "#;
        self.db_client.execute(query).await?;
        Ok(())
    }

    pub async fn create(&self, career: Career) -> Result<Career, DbError> {
        let query = r#"
            INSERT INTO careers (
                id, job_title, job_code, short_description, full_description,
                department, industry, work_model, employment_type,
                experience_level, location, salary_range, skills_required,
                responsibilities, qualifications, apply_email, apply_link,
                is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                      $14, $15, $16, $17, $18, $19, $20)
        "#;

        sqlx::query(query)
            .bind(&career.id)
            .bind(&career.job_title)
            .bind(&career.job_code)
            .bind(&career.short_description)
            .bind(&career.full_description)
            .bind(&career.department)
            .bind(&career.industry)
            .bind(&career.work_model)
            .bind(&career.employment_type)
            .bind(&career.experience_level)
            .bind(json_text(&career.location)?)
            .bind(json_text(&career.salary_range)?)
            .bind(json_text(&career.skills_required)?)
            .bind(json_text(&career.responsibilities)?)
            .bind(json_text(&career.qualifications)?)
            .bind(&career.apply_email)
            .bind(&career.apply_link)
            .bind(if career.is_active { 1i64 } else { 0i64 })
            .bind(&career.created_at)
            .bind(&career.updated_at)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert career: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        Ok(career)
    }

    /// All postings, newest first. `active_only` hides deactivated ones.
    pub async fn find_all(&self, active_only: bool) -> Result<Vec<Career>, DbError> {
        let query = if active_only {
            "SELECT * FROM careers WHERE is_active = 1 ORDER BY created_at DESC"
        } else {
            "SELECT * FROM careers ORDER BY created_at DESC"
        };
        let rows = sqlx::query(query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(rows.iter().map(row_to_career).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Career>, DbError> {
        let row = sqlx::query("SELECT * FROM careers WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(row.as_ref().map(row_to_career))
    }

    pub async fn update(&self, career: &Career) -> Result<Option<Career>, DbError> {
        let query = r#"
            UPDATE careers SET
                job_title = $1, job_code = $2, short_description = $3,
                full_description = $4, department = $5, industry = $6,
                work_model = $7, employment_type = $8, experience_level = $9,
                location = $10, salary_range = $11, skills_required = $12,
                responsibilities = $13, qualifications = $14, apply_email = $15,
                apply_link = $16, is_active = $17, updated_at = $18
            WHERE id = $19
        "#;

        let result = sqlx::query(query)
            .bind(&career.job_title)
            .bind(&career.job_code)
            .bind(&career.short_description)
            .bind(&career.full_description)
            .bind(&career.department)
            .bind(&career.industry)
            .bind(&career.work_model)
            .bind(&career.employment_type)
            .bind(&career.experience_level)
            .bind(json_text(&career.location)?)
            .bind(json_text(&career.salary_range)?)
            .bind(json_text(&career.skills_required)?)
            .bind(json_text(&career.responsibilities)?)
            .bind(json_text(&career.qualifications)?)
            .bind(&career.apply_email)
            .bind(&career.apply_link)
            .bind(if career.is_active { 1i64 } else { 0i64 })
            .bind(super::now_rfc3339())
            .bind(&career.id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(&career.id).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM careers WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

fn json_text<T: Serialize>(value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|e| DbError::DecodeError(e.to_string()))
}
