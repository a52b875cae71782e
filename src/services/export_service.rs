use crate::catalog::Catalog;
use crate::error::Result;
use crate::form::FormState;
use crate::models::analytics_event::AnalyticsEvent;
use crate::models::submission::{Submission, STATUS_DRAFT, STATUS_INCOMPLETE, STATUS_SUBMITTED};
use rust_xlsxwriter::*;

pub struct ExportService;

impl ExportService {
    fn csv_escape(field: &str) -> String {
        format!("\"{}\"", field.replace('"', "\"\""))
    }

    /// Submission summary CSV, one row per submission.
    pub fn generate_submissions_csv(submissions: &[Submission]) -> String {
        let mut csv = String::from("ID,Email,Name,Status,Created At,Updated At\n");
        for submission in submissions {
            let row = [
                submission.id.to_string(),
                submission.user_email.clone(),
                submission.user_name.clone(),
                submission.status.clone(),
                submission.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                submission.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ];
            let line: Vec<String> = row.iter().map(|f| Self::csv_escape(f)).collect();
            csv.push_str(&line.join(","));
            csv.push('\n');
        }
        csv
    }

    /// JSON dump of the buffered analytics events.
    pub fn generate_events_json(events: &[AnalyticsEvent]) -> Result<Vec<u8>> {
        let body = serde_json::json!({
            "export_timestamp": chrono::Utc::now().to_rfc3339(),
            "total_events": events.len(),
            "events": events,
        });
        Ok(serde_json::to_vec_pretty(&body)?)
    }

    /// Generate a styled XLSX workbook from submissions.
    pub fn generate_submissions_xlsx(
        catalog: &Catalog,
        submissions: &[Submission],
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Submissions")?;

        // ── Color palette ──
        let primary_color = Color::RGB(0x1E293B); // Slate 800
        let header_bg = Color::RGB(0x0F172A); // Slate 900
        let header_text = Color::White;
        let alt_row_1 = Color::RGB(0xF8FAFC); // Slate 50
        let alt_row_2 = Color::White;
        let border_color = Color::RGB(0xE2E8F0); // Slate 200

        let status_submitted = Color::RGB(0x10B981); // Emerald
        let status_incomplete = Color::RGB(0xF59E0B); // Amber
        let status_draft = Color::RGB(0x3B82F6); // Blue

        let completion_high = Color::RGB(0x10B981); // 100%
        let completion_mid = Color::RGB(0xF59E0B); // 50-99%
        let completion_low = Color::RGB(0xEF4444); // <50%

        // ── Column definitions ──
        let columns = [
            ("#", 8.0),
            ("Name", 28.0),
            ("Email", 30.0),
            ("Status", 14.0),
            ("Completion (%)", 16.0),
            ("Answered", 12.0),
            ("Organization", 28.0),
            ("Submitted At", 20.0),
            ("Last Update", 20.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        // ── Title row ──
        let title_format = Format::new()
            .set_font_size(16)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(0, 40)?;
        worksheet.merge_range(
            0,
            0,
            0,
            (columns.len() - 1) as u16,
            "AI Readiness Assessment — Submissions",
            &title_format,
        )?;

        // ── Subtitle row ──
        let subtitle_format = Format::new()
            .set_font_size(10)
            .set_italic()
            .set_font_color(Color::RGB(0x94A3B8))
            .set_background_color(primary_color)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);

        worksheet.set_row_height(1, 22)?;
        let now = chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();
        let subtitle_text = format!("Exported: {}  •  Total submissions: {}", now, submissions.len());
        worksheet.merge_range(1, 0, 1, (columns.len() - 1) as u16, &subtitle_text, &subtitle_format)?;

        // ── Header row ──
        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_text_wrap()
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        let header_row = 2;
        worksheet.set_row_height(header_row, 30)?;
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_string_with_format(header_row, i as u16, *name, &header_format)?;
        }

        // ── Data rows ──
        let data_start_row = 3;
        for (idx, submission) in submissions.iter().enumerate() {
            let row = data_start_row + idx as u32;
            let bg = if idx % 2 == 0 { alt_row_1 } else { alt_row_2 };

            let base_fmt = Format::new()
                .set_font_size(10)
                .set_background_color(bg)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);

            let center_fmt = base_fmt.clone().set_align(FormatAlign::Center);
            let wrap_fmt = base_fmt.clone().set_text_wrap();

            worksheet.set_row_height(row, 22)?;

            worksheet.write_number_with_format(row, 0, (idx + 1) as f64, &center_fmt)?;

            let name_fmt = base_fmt.clone().set_bold();
            worksheet.write_string_with_format(row, 1, &submission.user_name, &name_fmt)?;
            worksheet.write_string_with_format(row, 2, &submission.user_email, &base_fmt)?;

            let status_color = match submission.status.as_str() {
                STATUS_SUBMITTED => status_submitted,
                STATUS_INCOMPLETE => status_incomplete,
                STATUS_DRAFT => status_draft,
                _ => Color::RGB(0x64748B),
            };
            let status_fmt = Format::new()
                .set_font_size(10)
                .set_bold()
                .set_font_color(Color::White)
                .set_background_color(status_color)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            worksheet.write_string_with_format(row, 3, &submission.status, &status_fmt)?;

            // Completion, recomputed from the stored answers
            let progress = serde_json::from_value(submission.submission_data.clone())
                .ok()
                .map(|data| FormState::from_data(catalog, data).progress());
            if let Some(progress) = &progress {
                let pct = progress.percentage;
                let pct_color = if pct >= 100.0 {
                    completion_high
                } else if pct >= 50.0 {
                    completion_mid
                } else {
                    completion_low
                };
                let pct_fmt = Format::new()
                    .set_font_size(11)
                    .set_bold()
                    .set_font_color(pct_color)
                    .set_background_color(bg)
                    .set_align(FormatAlign::Center)
                    .set_align(FormatAlign::VerticalCenter)
                    .set_border(FormatBorder::Thin)
                    .set_border_color(border_color);
                worksheet.write_number_with_format(row, 4, pct.round(), &pct_fmt)?;
                worksheet.write_string_with_format(
                    row,
                    5,
                    &format!("{} / {}", progress.answered, progress.total),
                    &center_fmt,
                )?;
            } else {
                worksheet.write_string_with_format(row, 4, "—", &center_fmt)?;
                worksheet.write_string_with_format(row, 5, "—", &center_fmt)?;
            }

            let organization = submission
                .submission_data
                .pointer("/metadata-respondent-info/company-name")
                .and_then(|v| v.as_str())
                .unwrap_or("—");
            worksheet.write_string_with_format(row, 6, organization, &wrap_fmt)?;

            let created = submission.created_at.format("%Y-%m-%d %H:%M").to_string();
            worksheet.write_string_with_format(row, 7, &created, &center_fmt)?;
            let updated = submission.updated_at.format("%Y-%m-%d %H:%M").to_string();
            worksheet.write_string_with_format(row, 8, &updated, &center_fmt)?;
        }

        // ── Summary row ──
        let total_row = data_start_row + submissions.len() as u32 + 1;
        let summary_fmt = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(primary_color)
            .set_background_color(Color::RGB(0xE0E7FF)) // Indigo 100
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);

        worksheet.set_row_height(total_row, 26)?;
        worksheet.merge_range(
            total_row,
            0,
            total_row,
            2,
            &format!("Total: {} submissions", submissions.len()),
            &summary_fmt,
        )?;

        let submitted = submissions.iter().filter(|s| s.status == STATUS_SUBMITTED).count();
        let incomplete = submissions.iter().filter(|s| s.status == STATUS_INCOMPLETE).count();
        let completion_rate = if submissions.is_empty() {
            0.0
        } else {
            (submitted as f64 / submissions.len() as f64) * 100.0
        };
        let status_summary = format!(
            "Submitted: {} | Incomplete: {} | Completion rate: {:.0}%",
            submitted, incomplete, completion_rate
        );
        worksheet.merge_range(total_row, 3, total_row, 6, &status_summary, &summary_fmt)?;
        for col in 7..columns.len() as u16 {
            worksheet.write_string_with_format(total_row, col, "", &summary_fmt)?;
        }

        // Freeze panes (header stays visible while scrolling)
        worksheet.set_freeze_panes(3, 0)?;

        // Auto-filter on data columns
        worksheet.autofilter(
            2,
            0,
            (data_start_row + submissions.len() as u32).saturating_sub(1).max(2),
            (columns.len() - 1) as u16,
        )?;

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
