//! 单文件检查：打开、扫描、汇总为 `FileReport`
use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::CheckError;
use crate::machine::{scan_reader, ScanSummary};

/// 单个文件的检查结果
/// - 正常结束：`summary` 有值，`error` 为空
/// - 打开失败：只有 `error`
/// - 读取中途失败：两者都有，`summary` 为失败前已扫描部分
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub summary: Option<ScanSummary>,
    pub error: Option<CheckError>,
}

impl FileReport {
    pub(crate) fn failed(path: PathBuf, error: CheckError) -> Self {
        Self { path, summary: None, error: Some(error) }
    }

    /// 仅 I/O 失败时为 false；内容违规不影响该结果
    pub fn passed(&self) -> bool {
        self.error.is_none()
    }

    pub fn summary(&self) -> Option<&ScanSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&CheckError> {
        self.error.as_ref()
    }
}

/// 以二进制方式检查单个文件（不做换行转换，不假设编码）
pub fn check_file(path: &Path) -> FileReport {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) => {
            let error = CheckError::Open { path: path.to_path_buf(), source };
            warn!(?path, %error, "file check failed");
            return FileReport::failed(path.to_path_buf(), error);
        }
    };

    match scan_reader(file) {
        Ok(summary) => {
            debug!(?path, lines = summary.lines, incidents = summary.counts.total(), "file checked");
            FileReport { path: path.to_path_buf(), summary: Some(summary), error: None }
        }
        Err(failure) => {
            let error = CheckError::Read { path: path.to_path_buf(), source: failure.source };
            warn!(?path, %error, incidents = failure.partial.counts.total(), "file check failed");
            FileReport { path: path.to_path_buf(), summary: Some(failure.partial), error: Some(error) }
        }
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
