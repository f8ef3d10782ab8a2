//! HTTP 基础设施 - 后端 API 客户端与 DTO

pub mod api_client;
pub mod dto;

pub use api_client::{ApiClient, ApiClientConfig};
pub use dto::{
    ChangePasswordData, CharacterPatch, CreateAudiobookResponse, FileUpload, LoginCredentials,
    NewCharacter, NewNovel, RegisterData, UpdateProfileData,
};
