//! 公共类型（对外暴露）
use serde::Serialize;

use crate::incident::{Incident, IncidentCounts};
use crate::report::FileReport;

/// 输出项结构（JSON 数组中的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub path: String,
    pub ok: bool,
    pub lines: Option<u64>,
    pub counts: Option<&'a IncidentCounts>,
    pub incidents: &'a [Incident],
    pub error: Option<String>,
}

impl<'a> From<&'a FileReport> for OutputItem<'a> {
    fn from(report: &'a FileReport) -> Self {
        let summary = report.summary();
        Self {
            path: report.path.display().to_string(),
            ok: report.passed(),
            lines: summary.map(|s| s.lines),
            counts: summary.map(|s| &s.counts),
            incidents: summary.map(|s| s.incidents.as_slice()).unwrap_or(&[]),
            error: report.error().map(|e| e.to_string()),
        }
    }
}
