//! 报告渲染 - 业务能力层
//!
//! 1. 用插图块替换 `{{image:<id>}}` 占位符
//! 2. 仍未匹配的占位符替换为"图片未找到"
//! 3. 按固定顺序做简单的 Markdown → HTML 转换（有损、近似）

use regex::{Captures, Regex};
use tracing::debug;

use crate::error::AppResult;
use crate::models::ReportImage;

/// 未匹配占位符的替换内容
pub const IMAGE_NOT_FOUND: &str = r#"<div class="report-image-missing" style="color:red;text-align:center;padding:20px;background:#fff5f5;border:1px solid #fed7d7;border-radius:4px;">[图片未找到]</div>"#;

/// 一条替换规则
enum Rule {
    /// 替换所有匹配
    All(Regex, &'static str),
    /// 只替换第一个匹配
    First(Regex, &'static str),
    /// 逐行包裹段落
    Paragraphs,
}

/// 简单 Markdown 转换流水线
///
/// 规则按声明顺序执行：标题在段落包裹之前，代码块在行内代码之前
pub struct MarkdownPipeline {
    rules: Vec<Rule>,
    empty_paragraph: Regex,
}

impl MarkdownPipeline {
    pub fn new() -> AppResult<Self> {
        let rules = vec![
            Rule::All(Regex::new(r"(?m)^# (.*)$")?, "<h1>$1</h1>"),
            Rule::All(Regex::new(r"(?m)^## (.*)$")?, "<h2>$1</h2>"),
            Rule::All(Regex::new(r"(?m)^### (.*)$")?, "<h3>$1</h3>"),
            Rule::All(Regex::new(r"(?m)^#### (.*)$")?, "<h4>$1</h4>"),
            Rule::All(Regex::new(r"\*\*(.*?)\*\*")?, "<strong>$1</strong>"),
            Rule::All(Regex::new(r"(?s)```(.*?)```")?, "<pre><code>$1</code></pre>"),
            Rule::All(Regex::new(r"`([^`]+)`")?, "<code>$1</code>"),
            Rule::All(Regex::new(r"(?m)^- (.*)$")?, "<li>$1</li>"),
            Rule::First(Regex::new(r"(?s)(<li>.*</li>)")?, "<ul>$1</ul>"),
            Rule::Paragraphs,
        ];
        Ok(Self {
            rules,
            empty_paragraph: Regex::new(r"<p>\s*</p>")?,
        })
    }

    pub fn convert(&self, markdown: &str) -> String {
        let mut html = markdown.to_string();
        for rule in &self.rules {
            html = match rule {
                Rule::All(re, rep) => re.replace_all(&html, *rep).into_owned(),
                Rule::First(re, rep) => re.replacen(&html, 1, *rep).into_owned(),
                Rule::Paragraphs => wrap_paragraphs(&html),
            };
        }
        self.empty_paragraph.replace_all(&html, "").into_owned()
    }
}

/// 不以块级标签开头的行包成 `<p>`；代码块内部的行保持原样
fn wrap_paragraphs(html: &str) -> String {
    const BLOCK_PREFIXES: [&str; 7] = ["<h", "<u", "<p", "<d", "<i", "<l", "</"];

    let mut in_pre = false;
    let mut lines = Vec::new();
    for line in html.split('\n') {
        if in_pre {
            if line.contains("</pre>") {
                in_pre = false;
            }
            lines.push(line.to_string());
            continue;
        }
        if line.starts_with("<pre>") && !line.contains("</pre>") {
            in_pre = true;
        }
        if BLOCK_PREFIXES.iter().any(|p| line.starts_with(p)) {
            lines.push(line.to_string());
        } else {
            lines.push(format!("<p>{}</p>", line));
        }
    }
    lines.join("\n")
}

/// 转义 HTML 属性和文本中的特殊字符
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// 报告渲染器
pub struct ReportRenderer {
    image_base_url: String,
    leftover_placeholder: Regex,
    markdown: MarkdownPipeline,
}

impl ReportRenderer {
    pub fn new(image_base_url: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            image_base_url: image_base_url.into().trim_end_matches('/').to_string(),
            leftover_placeholder: Regex::new(r"\{\{image:[^{}]*\}\}")?,
            markdown: MarkdownPipeline::new()?,
        })
    }

    /// 图片访问地址
    pub fn image_url(&self, image: &ReportImage) -> String {
        format!("{}/{}", self.image_base_url, image.filepath.trim_start_matches('/'))
    }

    /// 渲染报告正文
    pub fn render(&self, report: &str, images: &[ReportImage]) -> String {
        let mut html = report.to_string();

        for image in images {
            let placeholder = image.placeholder();
            if html.contains(&placeholder) {
                html = html.replace(&placeholder, &self.image_block(image));
            } else {
                debug!("正文中没有图片占位符: {}", placeholder);
            }
        }

        // 必须在全部插图替换之后执行
        html = self
            .leftover_placeholder
            .replace_all(&html, |caps: &Captures| {
                debug!("未找到图片: {}", &caps[0]);
                IMAGE_NOT_FOUND.to_string()
            })
            .into_owned();

        self.markdown.convert(&html)
    }

    /// 插图块（单行，避免被段落规则拆开）
    fn image_block(&self, image: &ReportImage) -> String {
        let url = escape_html(&self.image_url(image));
        let alt = escape_html(&image.description);
        let caption = if image.description.trim().is_empty() {
            "图片描述".to_string()
        } else {
            alt.clone()
        };
        format!(
            concat!(
                r#"<div class="report-image-block" style="text-align:center;margin:20px 0;border:1px solid #eee;border-radius:8px;padding:15px;background:#fafafa;">"#,
                r#"<img src="{}" alt="{}" style="max-width:400px;max-height:300px;display:block;margin:0 auto 8px;border-radius:4px;">"#,
                r#"<div class="report-image-caption" style="color:#666;font-size:0.9em;font-style:italic;">{}</div>"#,
                r#"</div>"#
            ),
            url, alt, caption
        )
    }
}
