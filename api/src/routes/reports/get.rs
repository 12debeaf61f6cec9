use axum::{
    Extension, Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use chrono::Utc;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, XlsxError};
use util::state::AppState;

use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::reports::common::{RobotReport, build_report};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Spreadsheet column headers, in fixed order.
const EXPORT_HEADERS: [&str; 11] = [
    "ID",
    "Name",
    "Model",
    "Status",
    "Battery%",
    "SensorCount",
    "AvgTemp",
    "AvgHumidity",
    "AvgSpeed",
    "LastReading",
    "CreatedAt",
];

/// GET /api/reports/summary
///
/// Per-robot aggregates for the authenticated user: reading count, mean
/// temperature/humidity/speed (2 decimals, zero when empty) and the most
/// recent reading timestamp ("N/A" when empty).
///
/// ### Responses
/// - `200 OK` with one record per robot.
/// - `500 Internal Server Error` on database failure.
pub async fn get_report_summary(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    match build_report(state.db(), claims.sub).await {
        Ok(rows) => (
            StatusCode::OK,
            Json(ApiResponse::success(rows, "Report generated")),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<Vec<RobotReport>>::error(format!(
                "Database error: {}",
                e
            ))),
        ),
    }
}

fn render_workbook(rows: &[RobotReport]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Robot Report")?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x667EEA))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    for (col, title) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_with_format(0, col as u16, *title, &header_format)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        worksheet.write_with_format(r, 0, row.id, &cell_format)?;
        worksheet.write_with_format(r, 1, row.name.as_str(), &cell_format)?;
        worksheet.write_with_format(r, 2, row.model.as_str(), &cell_format)?;
        worksheet.write_with_format(r, 3, row.status.as_str(), &cell_format)?;
        worksheet.write_with_format(r, 4, row.battery, &cell_format)?;
        worksheet.write_with_format(r, 5, row.sensor_count as u32, &cell_format)?;
        worksheet.write_with_format(r, 6, row.avg_temperature, &cell_format)?;
        worksheet.write_with_format(r, 7, row.avg_humidity, &cell_format)?;
        worksheet.write_with_format(r, 8, row.avg_speed, &cell_format)?;
        worksheet.write_with_format(r, 9, row.last_reading.as_str(), &cell_format)?;
        worksheet.write_with_format(r, 10, row.created_at.as_str(), &cell_format)?;
    }

    // Column widths match the dashboard's legacy export.
    worksheet.set_column_width(0, 8)?;
    for col in 1..=2 {
        worksheet.set_column_width(col, 20)?;
    }
    worksheet.set_column_width(3, 12)?;
    for col in 4..=8 {
        worksheet.set_column_width(col, 15)?;
    }
    for col in 9..=10 {
        worksheet.set_column_width(col, 20)?;
    }

    workbook.save_to_buffer()
}

/// GET /api/reports/export
///
/// Same aggregation as the summary, rendered as a single-sheet spreadsheet:
/// one header row plus one row per robot, streamed as a timestamped
/// attachment.
pub async fn export_report(
    State(state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> (StatusCode, (HeaderMap, Vec<u8>)) {
    let mut headers = HeaderMap::new();

    let rows = match build_report(state.db(), claims.sub).await {
        Ok(rows) => rows,
        Err(e) => {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                (headers, format!("Database error: {}", e).into_bytes()),
            );
        }
    };

    let buffer = match render_workbook(&rows) {
        Ok(buffer) => buffer,
        Err(e) => {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                (headers, format!("Export error: {}", e).into_bytes()),
            );
        }
    };

    let filename = format!("robot_report_{}.xlsx", Utc::now().format("%Y%m%d_%H%M%S"));

    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    (StatusCode::OK, (headers, buffer))
}
