//! HTTP DTO - 请求 / 响应体定义
//!
//! 字段命名与后端序列化器保持一致，客户端不做任何改写

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::ProviderUserInfo;
use crate::domain::User;

// ---------- 认证 ----------

/// 登录凭据
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// `POST /api/oauth/token/` 请求体
///
/// 后端以 email 作为用户名字段，两个字段都要带上
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub email: &'a str,
}

/// `POST /api/oauth/token/` 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct TokenPairResponse {
    pub access: String,
    pub refresh: String,
}

/// 注册数据
#[derive(Debug, Clone, Serialize)]
pub struct RegisterData {
    pub username: String,
    pub email: String,
    pub password: String,
    /// 确认密码，后端字段名为 password2
    #[serde(rename = "password2")]
    pub confirm_password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// `POST /api/oauth/register/` 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub user: User,
    pub token: String,
}

/// 修改密码数据
#[derive(Debug, Clone, Serialize)]
pub struct ChangePasswordData {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// 资料更新数据
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// `PUT /api/oauth/profile/` 响应体
///
/// 后端返回更新后的字段，客户端把存在的字段合并进当前用户
#[derive(Debug, Default, Deserialize)]
pub(crate) struct UpdateProfileResponse {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `POST /api/oauth/avatar/` 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct AvatarResponse {
    pub avatar: String,
}

// ---------- Google OAuth ----------

/// `POST /api/oauth/google/callback/` 请求体
#[derive(Debug, Serialize)]
pub(crate) struct GoogleCallbackRequest<'a> {
    pub user_info: &'a ProviderUserInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleTokens {
    pub access: String,
    pub refresh: String,
}

/// `POST /api/oauth/google/callback/` 响应体
#[derive(Debug, Deserialize)]
pub(crate) struct GoogleCallbackResponse {
    pub user: User,
    pub tokens: GoogleTokens,
}

// ---------- 小说 ----------

/// 待上传的文件
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// 新建小说数据
///
/// 内容可以是内联文本、上传文件，或两者都有，走 multipart 表单
#[derive(Debug, Clone, Default)]
pub struct NewNovel {
    pub name: String,
    pub content: Option<String>,
    pub content_file: Option<FileUpload>,
}

/// `POST .../create_audiobook/` 的任务受理响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateAudiobookResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// ---------- 角色 ----------

/// 新建角色数据
#[derive(Debug, Clone, Serialize)]
pub struct NewCharacter {
    pub name: String,
    pub character_info: String,
    pub index: i64,
}

/// 新建角色请求体（附上所属小说）
#[derive(Debug, Serialize)]
pub(crate) struct CreateCharacterRequest<'a> {
    #[serde(flatten)]
    pub data: &'a NewCharacter,
    pub novel: Uuid,
}

/// 角色更新数据（部分更新，缺省字段不下发）
#[derive(Debug, Clone, Default, Serialize)]
pub struct CharacterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_data_renames_password2() {
        let data = RegisterData {
            username: "alice".to_string(),
            email: "a@b.com".to_string(),
            password: "x".to_string(),
            confirm_password: "x".to_string(),
            first_name: None,
            last_name: None,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["password2"], "x");
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_character_patch_skips_missing_fields() {
        let patch = CharacterPatch {
            name: Some("Fox".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"name":"Fox"}"#);
    }

    #[test]
    fn test_create_character_request_flattens_data() {
        let data = NewCharacter {
            name: "Fox".to_string(),
            character_info: "A wise fox".to_string(),
            index: 2,
        };
        let request = CreateCharacterRequest {
            data: &data,
            novel: Uuid::nil(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["name"], "Fox");
        assert_eq!(json["novel"], Uuid::nil().to_string());
    }
}
