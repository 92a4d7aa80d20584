//! 源码文件字节级规范检查库
//!
//! 设计要点：
//! - 逐字节单遍扫描，状态机识别制表符、非 Unix 换行（CR、CRLF）、C0 控制字符
//!   以及结构错误的 UTF-8 多字节序列；不解码码点、不校验 Unicode 语义。
//! - 每类违规在单文件内只报告首次出现，计数记录全部次数。
//! - 内容违规不影响检查结果；只有 I/O 失败才视为失败。
//! - 文件之间互不共享状态，可按文件并行，输出顺序仍与参数顺序一致。

mod classify;
mod error;
mod incident;
mod machine;
mod options;
mod output;
mod report;
mod scan;
mod types;

pub use classify::{
    is_c0_control, is_continuation_byte, is_lead_byte_1, is_lead_byte_2, is_lead_byte_3, ByteClass,
};
pub use error::{CheckError, Result};
pub use incident::{Category, Incident, IncidentCounts};
pub use machine::{scan_bytes, scan_reader, LineScanner, ReadFailure, ScanSummary, State};
pub use options::{CheckOptions, CheckStats, OutputFormat};
pub use report::{check_file, FileReport};
pub use scan::check_and_write;
pub use types::OutputItem;
