use serde::Deserialize;

// 创建资料请求，三项均为必填
#[derive(Debug, Deserialize)]
pub struct CreateMaterialRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub document_link: String,
}

// 更新资料请求，缺省字段保持不变
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMaterialRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub document_link: Option<String>,
}

impl UpdateMaterialRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.document_link.is_none()
    }
}
