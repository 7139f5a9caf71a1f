/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端服务地址
    pub base_url: String,
    /// 报告图片的访问前缀
    pub image_base_url: String,
    /// 已登录会话的 Cookie（可选）
    pub session_cookie: Option<String>,
    /// 单个文件大小上限（字节）
    pub max_file_size: u64,
    /// 模拟进度条的刷新间隔（毫秒）
    pub progress_tick_ms: u64,
    /// 请求超时（秒）
    pub request_timeout_secs: u64,
    /// 错误提示的显示时长（毫秒）
    pub error_ttl_ms: u64,
    /// 报告任务文件
    pub job_file: String,
    /// 报告预览输出文件
    pub output_html: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            image_base_url: "/uploads".to_string(),
            session_cookie: None,
            max_file_size: 50 * 1024 * 1024,
            progress_tick_ms: 500,
            request_timeout_secs: 600,
            error_ttl_ms: 3000,
            job_file: "report_job.toml".to_string(),
            output_html: "report_preview.html".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            base_url: std::env::var("REPORT_BASE_URL").unwrap_or(default.base_url),
            image_base_url: std::env::var("REPORT_IMAGE_BASE_URL").unwrap_or(default.image_base_url),
            session_cookie: std::env::var("REPORT_SESSION_COOKIE").ok().filter(|v| !v.trim().is_empty()).or(default.session_cookie),
            max_file_size: std::env::var("REPORT_MAX_FILE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_file_size),
            progress_tick_ms: std::env::var("REPORT_PROGRESS_TICK_MS").ok().and_then(|v| v.parse().ok()).filter(|&ms: &u64| ms > 0).unwrap_or(default.progress_tick_ms),
            request_timeout_secs: std::env::var("REPORT_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            error_ttl_ms: std::env::var("REPORT_ERROR_TTL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.error_ttl_ms),
            job_file: std::env::var("REPORT_JOB_FILE").unwrap_or(default.job_file),
            output_html: std::env::var("REPORT_OUTPUT_HTML").unwrap_or(default.output_html),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
