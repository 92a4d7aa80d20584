//! 报告输出（Text / JSON 数组流式写入）
use std::io::Write;

use crate::error::Result;
use crate::options::OutputFormat;
use crate::report::FileReport;
use crate::types::OutputItem;

/// 按文件顺序写出报告；违规写到 `out`，I/O 失败描述写到 `err`
pub(crate) struct ReportWriter<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
    format: OutputFormat,
    first: bool,
}

impl<'a> ReportWriter<'a> {
    pub(crate) fn new(out: &'a mut dyn Write, err: &'a mut dyn Write, format: OutputFormat) -> Self {
        Self { out, err, format, first: true }
    }

    pub(crate) fn begin(&mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            write!(self.out, "[")?;
        }
        Ok(())
    }

    pub(crate) fn write(&mut self, report: &FileReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(report),
            OutputFormat::Json => self.write_json(report),
        }
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            writeln!(self.out, "]")?;
        }
        self.out.flush()?;
        self.err.flush()?;
        Ok(())
    }

    fn write_text(&mut self, report: &FileReport) -> Result<()> {
        let path = report.path.display();
        writeln!(self.out, "Checking {path}")?;
        if let Some(summary) = report.summary() {
            for incident in &summary.incidents {
                writeln!(self.out, "{path}({}) [ERROR] :{}", incident.line, incident.message)?;
            }
        }
        if let Some(e) = report.error() {
            // 先冲刷 stdout，保证终端上两路输出的先后顺序
            self.out.flush()?;
            writeln!(self.err, "{e}")?;
        }
        Ok(())
    }

    fn write_json(&mut self, report: &FileReport) -> Result<()> {
        if !self.first {
            write!(self.out, ",")?;
        } else {
            self.first = false;
        }
        serde_json::to_writer(&mut *self.out, &OutputItem::from(report))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
