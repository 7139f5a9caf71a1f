use anyhow::Result;
/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use std::fs;
use tracing::info;

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n报告生成日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `base_url`: 后端地址
pub fn log_startup(base_url: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 实训报告生成");
    info!("🌐 后端地址: {}", base_url);
    info!("{}", "=".repeat(60));
}

/// 记录报告生成完成信息
///
/// # 参数
/// - `download_url`: 下载地址
/// - `image_count`: 插图数量
/// - `preview_path`: 预览文件路径
pub fn log_report_ready(download_url: &str, image_count: usize, preview_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 报告生成完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📥 下载地址: {}", download_url);
    info!("🖼️ 插图数量: {}", image_count);
    info!("{}", "=".repeat(60));
    info!("\n预览已保存至: {}", preview_path);
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

/// 格式化文件大小（1024 进制）
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(50 * 1024 * 1024), "50 MB");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("实训报告", 2), "实训...");
        assert_eq!(truncate_text("abc", 5), "abc");
    }
}
