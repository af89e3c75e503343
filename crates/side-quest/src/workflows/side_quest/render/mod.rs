//! Landscape PDF rendition of a finished hunt.

pub mod fonts;
pub mod layout;
mod pdf;

use super::pipeline::SideQuestReport;
use super::views::GENERATED_AT_FORMAT;
use chrono::DateTime;
use chrono_tz::Tz;
use mime::Mime;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub const REPORT_FILE_NAME: &str = "side_quest_hunt.pdf";
pub const DOCUMENT_TITLE: &str = "Side Quest Hunt";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to build report document: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to write report document: {0}")]
    Io(#[from] std::io::Error),
}

/// Finished document, ready to be offered for download or persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub file_name: &'static str,
    pub mime: Mime,
    pub bytes: Vec<u8>,
}

impl RenderedReport {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }

    /// Writes the exact download bytes to `dir`, so the file and the
    /// in-memory buffer never differ. The bytes go to a temporary file in
    /// the same directory that is then renamed over the target, so
    /// concurrent runs replace the file whole and never interleave.
    pub fn persist<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf, RenderError> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name);

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(&self.bytes)?;
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|err| err.error)?;
        info!(path = %path.display(), bytes = self.bytes.len(), "wrote side quest report");
        Ok(path)
    }
}

pub fn render_report(report: &SideQuestReport) -> Result<RenderedReport, RenderError> {
    let title_lines = vec![
        layout::TITLE.to_string(),
        report.generated_at.format(GENERATED_AT_FORMAT).to_string(),
    ];
    let rows: Vec<[String; 8]> = report.rows.iter().map(|row| row.cells()).collect();
    let pages = layout::paginate(title_lines.len(), &rows);

    let info = pdf::DocumentInfo {
        title: DOCUMENT_TITLE,
        creation_date: pdf_date(&report.generated_at),
    };
    let bytes = pdf::write_document(&pages, &title_lines, &info)?;

    Ok(RenderedReport {
        file_name: REPORT_FILE_NAME,
        mime: mime::APPLICATION_PDF,
        bytes,
    })
}

/// PDF date string, e.g. `D:20261016120000+01'00'`.
fn pdf_date(instant: &DateTime<Tz>) -> String {
    let offset = instant.format("%:z").to_string().replace(':', "'");
    format!("D:{}{}'", instant.format("%Y%m%d%H%M%S"), offset)
}
