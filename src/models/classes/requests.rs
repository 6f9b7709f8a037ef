use serde::Deserialize;

// 创建班级请求
#[derive(Debug, Deserialize)]
pub struct CreateClassRequest {
    #[serde(default)]
    pub name: String,
}

// 更新班级请求，缺省字段保持不变
#[derive(Debug, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
}

// 加入班级请求
#[derive(Debug, Deserialize)]
pub struct JoinClassRequest {
    #[serde(default)]
    pub code: String,
}
