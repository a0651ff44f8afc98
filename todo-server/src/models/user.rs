//! User input and response shapes

use serde::{Deserialize, Serialize};

use super::ValidationError;

const MAX_USERNAME_LEN: usize = 64;
const MAX_EMAIL_LEN: usize = 254;

/// Validated registration data. The password is still plaintext here and
/// is hashed before it reaches storage.
///
/// Deserializing goes through `NewUser::new`, so a JSON body that fails
/// validation is rejected like any other malformed body.
#[derive(Clone, Deserialize)]
#[serde(try_from = "UserBody")]
pub struct NewUser {
    username: String,
    email: String,
    password: String,
}

impl NewUser {
    pub fn new(username: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        let username = username.trim();
        let email = email.trim();

        if username.is_empty() {
            return Err(ValidationError::Empty { field: "username" });
        }
        if username.len() > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong {
                field: "username",
                max: MAX_USERNAME_LEN,
            });
        }
        if email.is_empty() {
            return Err(ValidationError::Empty { field: "email" });
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong {
                field: "email",
                max: MAX_EMAIL_LEN,
            });
        }
        if !email.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "must contain '@'",
            });
        }
        if password.is_empty() {
            return Err(ValidationError::Empty { field: "password" });
        }

        Ok(Self {
            username: username.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Wire shape of POST /users/ and PUT /users/{id}
#[derive(Deserialize)]
struct UserBody {
    username: String,
    email: String,
    password: String,
}

impl TryFrom<UserBody> for NewUser {
    type Error = ValidationError;

    fn try_from(body: UserBody) -> Result<Self, Self::Error> {
        Self::new(&body.username, &body.email, &body.password)
    }
}

// Keep the password out of logs.
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// User as returned to clients; never carries the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// GET /users/ response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserPublic>,
}

/// POST /auth/token form body (OAuth2 password grant field names)
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /auth/token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
}

impl AccessToken {
    pub fn bearer(token: String) -> Self {
        Self {
            access_token: token,
            token_type: "bearer".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        let user = NewUser::new(" alice ", "alice@example.com", "secret").unwrap();
        assert_eq!(user.username(), "alice");
        assert_eq!(user.email(), "alice@example.com");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            NewUser::new("", "a@b.c", "x").unwrap_err(),
            ValidationError::Empty { field: "username" }
        );
        assert!(matches!(
            NewUser::new("alice", "alice.example.com", "x").unwrap_err(),
            ValidationError::InvalidFormat { field: "email", .. }
        ));
        assert_eq!(
            NewUser::new("alice", "a@b.c", "").unwrap_err(),
            ValidationError::Empty { field: "password" }
        );
        assert!(matches!(
            NewUser::new(&"x".repeat(65), "a@b.c", "x").unwrap_err(),
            ValidationError::TooLong { field: "username", max: 64 }
        ));
    }

    #[test]
    fn debug_hides_password() {
        let user = NewUser::new("alice", "a@b.c", "hunter2").unwrap();
        assert!(!format!("{:?}", user).contains("hunter2"));
    }

    #[test]
    fn json_body_is_validated() {
        let user: NewUser = serde_json::from_str(
            r#"{"username":"alice","email":"alice@example.com","password":"secret"}"#,
        )
        .unwrap();
        assert_eq!(user.username(), "alice");
        assert_eq!(user.password(), "secret");

        let bad = serde_json::from_str::<NewUser>(
            r#"{"username":"alice","email":"nope","password":"secret"}"#,
        )
        .unwrap_err();
        assert!(bad.to_string().contains("email"));

        assert!(serde_json::from_str::<NewUser>(r#"{"username":"alice"}"#).is_err());
    }
}
