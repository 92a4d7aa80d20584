//! 错误类型：I/O 失败（致命，仅影响当前文件）与输出失败
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckError {
    /// 无法打开文件（不存在、无权限、是目录等）
    #[error("{}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 到达 EOF 之前读取失败
    #[error("{}: {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 递归展开目录时失败
    #[error("{}: {}", .path.display(), .source)]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to write report: {0}")]
    Write(#[from] io::Error),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// 扫描线程异常退出，或有文件结果未送达 writer
    #[error("check worker failed: {written} of {expected} reports written")]
    Worker { written: usize, expected: usize },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl CheckError {
    /// 与单个文件相关的错误（不含输出/调度类错误）
    pub fn is_file_error(&self) -> bool {
        matches!(self, CheckError::Open { .. } | CheckError::Read { .. } | CheckError::Walk { .. })
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
