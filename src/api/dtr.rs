use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::client::PolicyClient;
use crate::config::Config;
use crate::dtr::classify::{ReferenceInstant, classify_all};
use crate::dtr::stats::{AttendanceStats, aggregate};
use crate::model::attendance::{AttendanceRecord, ClassifiedRecord};
use crate::model::policy::{EffectivePolicy, PolicySource, WorkHoursPolicyDto};

#[derive(Deserialize, ToSchema)]
pub struct ClassifyDtrRequest {
    pub records: Vec<AttendanceRecord>,

    /// Optional inline policy; when present it takes precedence over the
    /// upstream-fetched one for this request.
    pub policy: Option<WorkHoursPolicyDto>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    #[schema(example = "10:30:00", value_type = Option<String>)]
    pub work_start: Option<NaiveTime>,

    #[schema(example = "16:30:00", value_type = String)]
    pub work_end: NaiveTime,

    #[schema(example = 360)]
    pub required_minutes: i64,

    pub source: PolicySource,
}

impl From<EffectivePolicy> for PolicySummary {
    fn from(policy: EffectivePolicy) -> Self {
        Self {
            work_start: policy.work_start,
            work_end: policy.work_end,
            required_minutes: policy.required_minutes,
            source: policy.source,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ClassifyDtrResponse {
    pub records: Vec<ClassifiedRecord>,
    pub stats: AttendanceStats,
    pub policy: PolicySummary,
}

/// Policy in force for a request: inline override first, then the cached
/// upstream fetch, then the configured defaults. An upstream failure is
/// logged and reported through `policy.source` rather than failing the
/// request.
async fn resolve_policy(
    client: &PolicyClient,
    config: &Config,
    inline: Option<&WorkHoursPolicyDto>,
) -> Result<EffectivePolicy, HttpResponse> {
    if let Some(dto) = inline {
        return EffectivePolicy::from_dto(dto, PolicySource::Override).map_err(|e| {
            HttpResponse::BadRequest().json(serde_json::json!({
                "message": format!("Invalid policy override: {e}")
            }))
        });
    }

    match client.effective_policy().await {
        Ok(Some(policy)) => Ok(policy),
        Ok(None) => Ok(EffectivePolicy::fallback(config)),
        Err(e) => {
            tracing::warn!(error = %e, "Work-hours policy fetch failed, using defaults");
            Ok(EffectivePolicy::fallback(config))
        }
    }
}

/// Classify a batch of daily time records
#[utoipa::path(
    post,
    path = "/api/v1/dtr/classify",
    request_body = ClassifyDtrRequest,
    responses(
        (status = 200, description = "Classified records with aggregate stats", body = ClassifyDtrResponse),
        (status = 400, description = "Invalid policy override", body = Object, example = json!({
            "message": "Invalid policy override: work_end 09:00:00 is not after work_start 17:00:00"
        }))
    ),
    tag = "DTR"
)]
pub async fn classify_dtr(
    client: web::Data<PolicyClient>,
    config: web::Data<Config>,
    payload: web::Json<ClassifyDtrRequest>,
) -> actix_web::Result<impl Responder> {
    let policy = match resolve_policy(&client, &config, payload.policy.as_ref()).await {
        Ok(policy) => policy,
        Err(response) => return Ok(response),
    };

    let records = classify_all(&payload.records, &policy, ReferenceInstant::wall_clock());
    let stats = aggregate(&records);

    Ok(HttpResponse::Ok().json(ClassifyDtrResponse {
        records,
        stats,
        policy: policy.into(),
    }))
}

/// Export a classified DTR as a downloadable CSV report
#[utoipa::path(
    post,
    path = "/api/v1/dtr/export",
    request_body = ClassifyDtrRequest,
    responses(
        (status = 200, description = "CSV report", content_type = "text/csv"),
        (status = 400, description = "Invalid policy override"),
        (status = 500, description = "Internal server error")
    ),
    tag = "DTR"
)]
pub async fn export_dtr(
    client: web::Data<PolicyClient>,
    config: web::Data<Config>,
    payload: web::Json<ClassifyDtrRequest>,
) -> actix_web::Result<impl Responder> {
    let policy = match resolve_policy(&client, &config, payload.policy.as_ref()).await {
        Ok(policy) => policy,
        Err(response) => return Ok(response),
    };

    let records = classify_all(&payload.records, &policy, ReferenceInstant::wall_clock());

    let body = write_report_csv(&records).map_err(|e| {
        tracing::error!(error = %e, "Failed to render DTR report");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"dtr-report.csv\"",
        ))
        .body(body))
}

fn write_report_csv(records: &[ClassifiedRecord]) -> Result<Vec<u8>, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Date",
        "Name",
        "Position",
        "Clock In",
        "Clock Out",
        "Hours Rendered",
        "Status",
    ])?;

    for classified in records {
        let record = &classified.record;
        writer.write_record([
            record.date.to_string().as_str(),
            record.name.as_str(),
            record.position.as_str(),
            record.clock_in.as_deref().unwrap_or("-"),
            record.clock_out.as_deref().unwrap_or("-"),
            classified.hours_rendered.as_str(),
            classified.status.label().as_str(),
        ])?;
    }

    Ok(writer.into_inner()?)
}

/// Work-hours policy currently in force
#[utoipa::path(
    get,
    path = "/api/v1/dtr/policy",
    responses(
        (status = 200, description = "Effective policy and where it came from", body = PolicySummary)
    ),
    tag = "DTR"
)]
pub async fn get_policy(
    client: web::Data<PolicyClient>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    // No inline override on this path.
    let policy = match resolve_policy(&client, &config, None).await {
        Ok(policy) => policy,
        Err(response) => return Ok(response),
    };

    Ok(HttpResponse::Ok().json(PolicySummary::from(policy)))
}
