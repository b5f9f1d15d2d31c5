use serde::{Deserialize, Serialize};

use avatarforge_auth::Role;
use avatarforge_infra::UserView;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub display_name: Option<String>,
    /// Accepted but ignored: registration always yields the `user` role.
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminUpdateUserRequest {
    pub display_name: Option<String>,
    /// Rehashed before storage when present.
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct CreateAvatarRequest {
    pub name: String,
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_style() -> String {
    "default".to_string()
}

#[derive(Debug, Deserialize)]
pub struct UpdateAvatarRequest {
    pub name: Option<String>,
    pub style: Option<String>,
    pub unlocked_by_default: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AddXpRequest {
    pub amount: u32,
}

#[derive(Debug, Deserialize)]
pub struct BondPointsRequest {
    pub points: u32,
}

#[derive(Debug, Deserialize)]
pub struct HumorLevelRequest {
    pub humor_level: u32,
}

#[derive(Debug, Deserialize)]
pub struct DialogueRequest {
    pub context: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserView,
}

#[derive(Debug, Serialize)]
pub struct DialogueResponse {
    pub line: String,
}
