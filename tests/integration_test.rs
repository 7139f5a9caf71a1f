use report_page::config::Config;
use report_page::logger;
use report_page::models::ReportForm;
use report_page::services::ValidationError;
use report_page::{Category, DragEvent, DragOutcome, GenerateOutcome, ReportPage, SelectedFile};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// ========== 本地模拟后端 ==========

/// 路由表：路径 → (状态码, JSON 响应体)
type Routes = HashMap<&'static str, (u16, &'static str)>;

/// 启动一个只认识固定路由的 HTTP 服务，返回地址和收到的请求体记录
async fn spawn_backend(routes: Routes) -> (String, Arc<Mutex<Vec<(String, String)>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&requests);
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let routes = Arc::clone(&routes);
            let recorded = Arc::clone(&recorded);
            tokio::spawn(async move {
                let _ = serve_one(stream, &routes, &recorded).await;
            });
        }
    });

    (format!("http://{}", addr), requests)
}

async fn serve_one(
    mut stream: TcpStream,
    routes: &Routes,
    recorded: &Mutex<Vec<(String, String)>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let lower = head.to_ascii_lowercase();
    let content_length = lower
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok());

    match content_length {
        Some(len) => {
            while buf.len() < header_end + len {
                let n = stream.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
        }
        None if lower.contains("transfer-encoding: chunked") => {
            while !buf.ends_with(b"0\r\n\r\n") {
                let n = stream.read(&mut chunk).await?;
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
        }
        None => {}
    }

    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    recorded.lock().unwrap().push((path.clone(), body));

    let (status, json) = routes
        .get(path.as_str())
        .copied()
        .unwrap_or((404, r#"{"detail":"Not Found"}"#));
    let response = format!(
        "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        json.len(),
        json
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

// ========== 辅助函数 ==========

fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        progress_tick_ms: 10,
        ..Config::default()
    }
}

/// 指向一个不会有服务监听的端口
fn unreachable_config() -> Config {
    config_for("http://127.0.0.1:9")
}

fn filled_form() -> ReportForm {
    ReportForm {
        name: "张三".to_string(),
        student_id: "2023001".to_string(),
        class_name: "软件2301".to_string(),
        project_name: "操作系统实训".to_string(),
        ..ReportForm::default()
    }
}

fn data_names(page: &ReportPage) -> Vec<String> {
    page.panel()
        .uploads()
        .order(Category::Data)
        .map(str::to_string)
        .collect()
}

/// 渲染后的列表与上传队列一一对应且顺序一致
fn assert_list_matches_uploads(page: &ReportPage, category: Category) {
    let list = page.panel().list(category).unwrap();
    let expected: Vec<_> = page
        .panel()
        .uploads()
        .entries(category)
        .iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(list.entry_ids(), expected);
}

/// 完整的拖拽手势：开始 → 经过 → 放下 → 结束
fn drag(page: &mut ReportPage, from: usize, to: usize) -> Vec<DragOutcome> {
    let list = page.panel().list(Category::Data).unwrap();
    let source = list.element_at(from).unwrap().id();
    let target = list.element_at(to).unwrap().id();
    [
        DragEvent::Start(source),
        DragEvent::Over(target),
        DragEvent::Drop(target),
        DragEvent::End(source),
    ]
    .into_iter()
    .map(|event| page.dispatch_drag(Category::Data, event))
    .collect()
}

// ========== 上传面板 ==========

#[test]
fn test_reorder_keeps_list_and_uploads_in_sync() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    page.add_files(
        Category::Data,
        vec![
            SelectedFile::new("a.md", "# a"),
            SelectedFile::new("b.pdf", "%PDF"),
            SelectedFile::new("c.png", vec![0x89u8, 0x50]),
        ],
    );
    assert_list_matches_uploads(&page, Category::Data);

    let outcomes = drag(&mut page, 0, 2);
    assert!(outcomes.contains(&DragOutcome::Reorder { from: 0, to: 2 }));
    assert_eq!(data_names(&page), ["b.pdf", "c.png", "a.md"]);
    assert_list_matches_uploads(&page, Category::Data);

    page.add_files(Category::Data, vec![SelectedFile::new("d.jpg", "jpg")]);
    assert_list_matches_uploads(&page, Category::Data);

    assert_eq!(page.remove_file(Category::Data, "c.png"), 1);
    assert_eq!(data_names(&page), ["b.pdf", "a.md", "d.jpg"]);
    assert_list_matches_uploads(&page, Category::Data);

    drag(&mut page, 2, 0);
    assert_eq!(data_names(&page), ["d.jpg", "b.pdf", "a.md"]);
    assert_list_matches_uploads(&page, Category::Data);
}

#[test]
fn test_stale_drop_after_rerender_is_ignored() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    page.add_files(
        Category::Data,
        vec![
            SelectedFile::new("a.md", "a"),
            SelectedFile::new("b.md", "b"),
            SelectedFile::new("c.md", "c"),
        ],
    );

    let list = page.panel().list(Category::Data).unwrap();
    let old_first = list.element_at(0).unwrap().id();
    let old_last = list.element_at(2).unwrap().id();

    page.dispatch_drag(Category::Data, DragEvent::Start(old_first));
    page.dispatch_drag(Category::Data, DragEvent::Drop(old_last));
    assert_eq!(data_names(&page), ["b.md", "c.md", "a.md"]);

    // 旧元素已被销毁，再次放下不能产生第二次修改
    let outcome = page.dispatch_drag(Category::Data, DragEvent::Drop(old_last));
    assert_eq!(outcome, DragOutcome::Unbound);
    assert_eq!(data_names(&page), ["b.md", "c.md", "a.md"]);
}

#[test]
fn test_rejected_files_show_errors() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    let added = page.add_files(
        Category::Cover,
        vec![
            SelectedFile::new("cover.pdf", "x"),
            SelectedFile::new("cover.docx", "x"),
        ],
    );

    assert_eq!(added.len(), 1);
    assert_eq!(page.status().errors(), ["不支持的文件类型: cover.pdf"]);
    assert_list_matches_uploads(&page, Category::Cover);
}

// ========== 提交 ==========

#[tokio::test]
async fn test_validation_runs_before_any_network_call() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();

    let outcome = page.generate().await;

    assert_eq!(
        outcome,
        GenerateOutcome::Invalid(ValidationError::MissingField {
            field: "name".to_string(),
            label: "姓名".to_string(),
        })
    );
    assert_eq!(page.status().last_text(), Some("请填写姓名"));
    assert!(!page.submit_control().is_busy());
    assert!(!page.progress().is_visible());
}

#[tokio::test]
async fn test_missing_templates_are_reported_in_order() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    *page.form_mut() = filled_form();

    assert_eq!(
        page.generate().await,
        GenerateOutcome::Invalid(ValidationError::MissingCoverTemplate)
    );

    page.add_files(Category::Cover, vec![SelectedFile::new("c.docx", "c")]);
    page.add_files(Category::Body, vec![SelectedFile::new("b.docx", "b")]);
    assert_eq!(
        page.generate().await,
        GenerateOutcome::Invalid(ValidationError::MissingDataFiles)
    );
    assert_eq!(page.status().last_text(), Some("请上传至少一个资料文件"));
}

#[tokio::test]
async fn test_network_error_restores_submit_control() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    *page.form_mut() = filled_form();
    page.add_files(Category::Cover, vec![SelectedFile::new("c.docx", "c")]);
    page.add_files(Category::Body, vec![SelectedFile::new("b.docx", "b")]);
    page.add_files(Category::Data, vec![SelectedFile::new("d.md", "d")]);

    let outcome = page.generate().await;

    assert_eq!(outcome, GenerateOutcome::Failed("网络错误，请稍后重试".to_string()));
    assert!(!page.submit_control().is_busy());
    assert!(!page.submit_control().is_disabled());
    assert_eq!(page.submit_control().label(), "生成报告");
    assert!(!page.progress().is_visible());
    assert!(page.preview().is_none());
}

#[tokio::test]
async fn test_generate_renders_preview_and_sends_order() {
    logger::init();
    let routes = Routes::from([
        ("/user/profile", (200, r#"{"id":2,"username":"alice","usage_count":5}"#)),
        ("/user/admin_id", (200, r#"{"admin_id":1}"#)),
        (
            "/generate_report",
            (
                200,
                r#"{"report":"Intro {{image:img_1}} End {{image:img_2}}","images":[{"id":"img_1","filepath":"x.png","description":"fig"}],"download_url":"/download/r.docx"}"#,
            ),
        ),
    ]);
    let (base_url, requests) = spawn_backend(routes).await;

    let mut page = ReportPage::new(config_for(&base_url)).unwrap();
    page.bootstrap().await;
    assert_eq!(page.session().usage_display(), "5");
    assert_eq!(page.session().admin_id, Some(1));

    *page.form_mut() = filled_form();
    page.add_files(Category::Cover, vec![SelectedFile::new("cover.docx", "c")]);
    page.add_files(Category::Body, vec![SelectedFile::new("body.docx", "b")]);
    page.add_files(
        Category::Data,
        vec![
            SelectedFile::new("a.md", "a"),
            SelectedFile::new("b.pdf", "b"),
            SelectedFile::new("c.png", "c"),
        ],
    );
    drag(&mut page, 0, 2);

    let outcome = page.generate().await;
    assert_eq!(outcome, GenerateOutcome::Generated);
    assert_eq!(page.status().last_text(), Some("报告生成成功！"));
    assert_eq!(page.progress().percent(), 100.0);
    assert!(!page.progress().is_visible());
    assert!(!page.submit_control().is_busy());

    let preview = page.preview().unwrap();
    let html = preview.html.as_deref().unwrap();
    assert!(html.contains("/uploads/x.png"));
    assert!(html.contains("fig"));
    assert!(!html.contains("{{image:img_1}}"));
    assert!(html.contains("图片未找到"));
    assert_eq!(preview.download_url, "/download/r.docx");
    assert_eq!(preview.images.thumbs().len(), 1);

    let requests = requests.lock().unwrap();
    let (_, body) = requests
        .iter()
        .find(|(path, _)| path == "/generate_report")
        .unwrap();
    assert!(body.contains(r#"["b.pdf","c.png","a.md"]"#));
    assert!(body.contains("name=\"query\""));
    assert!(body.contains("操作系统实训"));
    // 提交后重新拉取了用户信息
    let profile_calls = requests
        .iter()
        .filter(|(path, _)| path == "/user/profile")
        .count();
    assert_eq!(profile_calls, 2);
}

#[tokio::test]
async fn test_backend_detail_is_shown_on_failure() {
    let routes = Routes::from([
        ("/user/profile", (200, r#"{"username":"alice","usage_count":3}"#)),
        ("/generate_report", (400, r#"{"detail":"请先登录"}"#)),
    ]);
    let (base_url, _) = spawn_backend(routes).await;

    let mut page = ReportPage::new(config_for(&base_url)).unwrap();
    page.bootstrap().await;
    *page.form_mut() = filled_form();
    page.add_files(Category::Cover, vec![SelectedFile::new("c.docx", "c")]);
    page.add_files(Category::Body, vec![SelectedFile::new("b.docx", "b")]);
    page.add_files(Category::Data, vec![SelectedFile::new("d.md", "d")]);

    let outcome = page.generate().await;

    assert_eq!(outcome, GenerateOutcome::Failed("请先登录".to_string()));
    assert_eq!(page.status().last_text(), Some("请先登录"));
    assert!(!page.submit_control().is_disabled());
}

// ========== 会话 ==========

#[tokio::test]
async fn test_zero_usage_disables_submit() {
    let routes = Routes::from([(
        "/user/profile",
        (200, r#"{"username":"alice","usage_count":0}"#),
    )]);
    let (base_url, requests) = spawn_backend(routes).await;

    let mut page = ReportPage::new(config_for(&base_url)).unwrap();
    page.bootstrap().await;

    assert!(page.submit_control().is_disabled());
    assert!(page.submit_control().has_disabled_class());
    assert_eq!(page.submit_control().label(), "使用次数已用完，请充值");

    *page.form_mut() = filled_form();
    assert_eq!(page.generate().await, GenerateOutcome::Blocked);
    assert!(!requests
        .lock()
        .unwrap()
        .iter()
        .any(|(path, _)| path == "/generate_report"));
}

#[tokio::test]
async fn test_positive_usage_enables_submit() {
    let routes = Routes::from([(
        "/user/profile",
        (200, r#"{"username":"alice","usage_count":5}"#),
    )]);
    let (base_url, _) = spawn_backend(routes).await;

    let mut page = ReportPage::new(config_for(&base_url)).unwrap();
    page.bootstrap().await;

    assert!(!page.submit_control().is_disabled());
    assert_eq!(page.submit_control().label(), "生成报告");
    assert!(!page.session().is_admin);
    // 管理员ID接口不可用时保持未知
    assert_eq!(page.session().admin_id, None);
}

#[tokio::test]
async fn test_profile_failure_degrades_to_enabled_control() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    page.bootstrap().await;

    assert!(!page.session().profile_loaded);
    assert!(!page.session().is_admin);
    assert_eq!(page.session().usage_display(), "--");
    assert!(!page.submit_control().is_disabled());
    assert_eq!(page.submit_control().label(), "生成报告");
}

// ========== 模板与消息 ==========

#[tokio::test]
async fn test_use_template_requires_both_paths() {
    let routes = Routes::from([
        (
            "/templates/3/files",
            (
                200,
                r#"{"cover_template_path":"tpl/cover.docx","body_template_path":"tpl/body.docx"}"#,
            ),
        ),
        (
            "/templates/4/files",
            (200, r#"{"cover_template_path":"tpl/cover.docx"}"#),
        ),
    ]);
    let (base_url, _) = spawn_backend(routes).await;
    let mut page = ReportPage::new(config_for(&base_url)).unwrap();

    assert!(page.use_template(3).await);
    assert_eq!(page.status().last_text(), Some("模板已应用！"));
    assert_eq!(page.template().unwrap().template_id, 3);

    assert!(!page.use_template(4).await);
    assert_eq!(page.status().last_text(), Some("模板信息不完整，请稍后重试"));
    // 失败时保留之前的模板
    assert_eq!(page.template().unwrap().template_id, 3);

    assert!(!page.use_template(5).await);
    assert_eq!(page.status().last_text(), Some("使用模板失败，请稍后重试"));

    // 选择模板后不再要求上传封面/正文
    *page.form_mut() = filled_form();
    assert_eq!(
        page.generate().await,
        GenerateOutcome::Invalid(ValidationError::MissingDataFiles)
    );
}

#[tokio::test]
async fn test_admin_helpers() {
    let routes = Routes::from([
        ("/user/profile", (200, r#"{"username":"admin","usage_count":99}"#)),
        ("/user/admin_id", (200, r#"{"admin_id":1}"#)),
        (
            "/admin/users",
            (200, r#"[{"id":1,"username":"admin"},{"id":2,"username":"alice"}]"#),
        ),
        ("/messages/send", (200, r#"{"success":true}"#)),
    ]);
    let (base_url, requests) = spawn_backend(routes).await;

    let mut page = ReportPage::new(config_for(&base_url)).unwrap();
    page.bootstrap().await;
    assert!(page.session().is_admin);

    let users = page.load_users_if_admin().await;
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].username, "alice");

    assert!(page.send_message_to_admin("你好").await);
    let requests = requests.lock().unwrap();
    let (_, body) = requests
        .iter()
        .find(|(path, _)| path == "/messages/send")
        .unwrap();
    assert!(body.contains("name=\"to_user_id\""));
    assert!(body.contains("你好"));
}

#[tokio::test]
async fn test_send_message_without_admin_id_is_refused() {
    let mut page = ReportPage::new(unreachable_config()).unwrap();
    page.bootstrap().await;

    assert!(page.load_users_if_admin().await.is_empty());
    assert!(!page.send_message_to_admin("你好").await);
    assert_eq!(
        page.status().last_text(),
        Some("管理员ID未获取到，无法发送消息")
    );
}

// ========== 真实后端 ==========

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_real_backend_session() {
    logger::init();

    let config = Config::from_env();
    let mut page = ReportPage::new(config).expect("创建页面失败");
    page.bootstrap().await;

    assert!(page.session().profile_loaded, "应该能够获取用户信息");
}
