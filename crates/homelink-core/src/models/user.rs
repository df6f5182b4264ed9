use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The account the session belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub mail: String,
}

/// Body for `POST /user/login`.
#[derive(Debug, Serialize)]
pub struct UserLogin<'a> {
    pub mail: &'a str,
    pub password: &'a str,
}

/// Body for the enable/disable endpoints.
#[derive(Debug, Serialize)]
pub struct UserId {
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ChangeMailRequest<'a> {
    #[serde(rename = "newMail")]
    pub new_mail: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest<'a> {
    #[serde(rename = "oldPassword")]
    pub old_password: &'a str,
    #[serde(rename = "newPassword")]
    pub new_password: &'a str,
}
