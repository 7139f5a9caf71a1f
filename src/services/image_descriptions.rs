//! 插图描述编辑

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::ReportImage;
use crate::services::report_renderer::ReportRenderer;
use crate::services::status_board::StatusBoard;

/// 缩略图列表中的一项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageThumb {
    pub id: String,
    pub thumb_url: String,
    pub description: String,
    /// `图片 N`，从 1 开始
    pub caption: String,
}

/// 插图描述编辑器
#[derive(Debug, Clone, Default)]
pub struct ImageDescriptionEditor {
    thumbs: Vec<ImageThumb>,
}

impl ImageDescriptionEditor {
    pub fn new(images: &[ReportImage], renderer: &ReportRenderer) -> Self {
        let thumbs = images
            .iter()
            .enumerate()
            .map(|(index, image)| ImageThumb {
                id: image.id.clone(),
                thumb_url: renderer.image_url(image),
                description: image.description.clone(),
                caption: format!("图片 {}", index + 1),
            })
            .collect();
        Self { thumbs }
    }

    pub fn thumbs(&self) -> &[ImageThumb] {
        &self.thumbs
    }

    /// 修改描述，返回是否找到该图片
    pub fn set_description(&mut self, id: &str, description: impl Into<String>) -> bool {
        match self.thumbs.iter_mut().find(|t| t.id == id) {
            Some(thumb) => {
                thumb.description = description.into();
                debug!("图片描述已修改: {} {}", thumb.id, thumb.description);
                true
            }
            None => false,
        }
    }

    /// 保存描述
    ///
    /// 目前只在本地汇总并提示成功，不经过后端确认。
    // TODO: 后端提供 /save_image_descriptions 接口后改为真实提交
    pub fn save(&self, status: &mut StatusBoard) -> BTreeMap<String, String> {
        let descriptions: BTreeMap<String, String> = self
            .thumbs
            .iter()
            .map(|t| (t.id.clone(), t.description.trim().to_string()))
            .collect();

        status.show_success("图片描述已保存");
        debug!("保存的图片描述: {:?}", descriptions);
        descriptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_edit_and_save() {
        let renderer = ReportRenderer::new("/uploads/").unwrap();
        let images = vec![
            ReportImage {
                id: "img_1".to_string(),
                filepath: "3/a.png".to_string(),
                description: "架构图".to_string(),
            },
            ReportImage {
                id: "img_2".to_string(),
                filepath: "3/b.png".to_string(),
                description: String::new(),
            },
        ];
        let mut editor = ImageDescriptionEditor::new(&images, &renderer);
        assert_eq!(editor.thumbs()[1].caption, "图片 2");
        assert_eq!(editor.thumbs()[0].thumb_url, "/uploads/3/a.png");

        assert!(editor.set_description("img_2", "  流程图 "));
        assert!(!editor.set_description("img_9", "x"));

        let mut status = StatusBoard::new(Duration::from_secs(3));
        let saved = editor.save(&mut status);
        assert_eq!(saved.get("img_2").map(String::as_str), Some("流程图"));
        assert_eq!(saved.get("img_1").map(String::as_str), Some("架构图"));
        assert_eq!(status.last_text(), Some("图片描述已保存"));
    }
}
