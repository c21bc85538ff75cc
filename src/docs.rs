use crate::api::dtr::{ClassifyDtrRequest, ClassifyDtrResponse, PolicySummary};
use crate::dtr::stats::AttendanceStats;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus, ClassifiedRecord};
use crate::model::policy::{PolicySource, WorkHoursPolicyDto};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EPOL DTR Classification API",
        version = "1.0.0",
        description = r#"
## EPOL Daily Time Record (DTR) Classification Service

Classifies per-day clock-in/clock-out records for environmental police
personnel against the configured work-hours policy.

### 🔹 Key Features
- **Classification**
  - Per-record status: Present, Present (still working), Late, Undertime,
    Absent, Absent (missed clock-out), Invalid
- **Aggregate Statistics**
  - Status counts and attendance rate per record set
- **Policy**
  - Work-hours policy fetched from the upstream attendance API, cached,
    with explicit fallback to configured defaults
- **Export**
  - Downloadable CSV DTR report

### 📦 Response Format
- JSON-based RESTful responses; CSV for report export

---
Built with **Rust**, **Actix Web**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::dtr::classify_dtr,
        crate::api::dtr::export_dtr,
        crate::api::dtr::get_policy
    ),
    components(
        schemas(
            AttendanceRecord,
            AttendanceStatus,
            ClassifiedRecord,
            AttendanceStats,
            WorkHoursPolicyDto,
            PolicySource,
            PolicySummary,
            ClassifyDtrRequest,
            ClassifyDtrResponse
        )
    ),
    tags(
        (name = "DTR", description = "Daily time record classification APIs"),
    )
)]
pub struct ApiDoc;
