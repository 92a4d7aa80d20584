//! 检查选项与统计信息
use crate::report::FileReport;

/// 输出格式
/// - Text：逐文件 `Checking <path>` 与 `<path>(<line>) [ERROR] :<message>` 行
/// - Json：单个 JSON 数组，每个文件一个对象，附带全部计数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// 检查选项
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    pub format: OutputFormat,
    /// 目录参数是否递归展开为其中的普通文件
    pub recursive: bool,
    /// 首个 I/O 失败后立即停止（强制串行）
    pub fail_fast: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            threads: Some(1),
            format: OutputFormat::Text,
            recursive: false,
            fail_fast: false,
        }
    }
}

/// 检查统计信息（便于 CLI 打印与决定退出码）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CheckStats {
    pub files_checked: usize,
    pub files_failed: usize,
    pub files_with_incidents: usize,
    pub incidents_total: u64,
}

impl CheckStats {
    pub(crate) fn add(&mut self, report: &FileReport) {
        // 读取中途失败的文件同样计入已发现的违规
        if let Some(summary) = report.summary() {
            let total = summary.counts.total();
            if total > 0 {
                self.files_with_incidents += 1;
            }
            self.incidents_total += total;
        }
        if report.passed() {
            self.files_checked += 1;
        } else {
            self.files_failed += 1;
        }
    }

    /// 所有文件都在无 I/O 失败的情况下完成（内容违规不影响）
    pub fn success(&self) -> bool {
        self.files_failed == 0
    }
}
