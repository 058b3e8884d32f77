//! Minimal RFC 4180 CSV rendering for the session export.

use crate::ports::ExportRow;

pub const HEADER: &str = "Session ID,Title,Sport,Club,Coach,Starts At,Attendance Count";

/// Quotes a field when it contains a comma, quote, or line break;
/// embedded quotes are doubled.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Renders the export rows, header line first, CRLF separated.
pub fn render(rows: &[ExportRow]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        let fields = [
            row.session_id.to_string(),
            row.title.clone(),
            row.sport.clone(),
            row.club.clone(),
            row.coach.clone().unwrap_or_else(|| "Unassigned".to_string()),
            row.starts_at.to_rfc3339(),
            row.attendance_count.to_string(),
        ];
        out.push_str("\r\n");
        let line: Vec<String> = fields.iter().map(|f| escape_field(f)).collect();
        out.push_str(&line.join(","));
    }
    out.push_str("\r\n");
    out
}
