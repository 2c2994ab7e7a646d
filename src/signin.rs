//! Sign-in flow of the web client: submit credentials to an
//! authentication hook and pick where to navigate afterwards.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const STUDENT_SIGNUP_URL: &str = "/signup/student";
pub const BUSINESS_SIGNUP_URL: &str = "/signup/business";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Business,
    Student,
    Institution,
}

impl UserType {
    /// Destination after a successful sign-in. Every role lands on the
    /// home route for now.
    pub fn destination(&self) -> &'static str {
        match self {
            UserType::Business => "/",
            UserType::Student => "/",
            UserType::Institution => "/",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

/// What the authentication hook reports back
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

impl SignInResponse {
    /// Where to navigate, or `None` to stay on the form
    pub fn redirect(&self) -> Option<&'static str> {
        if self.error {
            return None;
        }
        self.user_type.map(|user_type| user_type.destination())
    }
}

#[async_trait]
pub trait SignInHook: Send + Sync {
    async fn sign_in(&self, credentials: UserCredentials) -> SignInResponse;
}

pub struct SignInFlow<H> {
    hook: H,
}

impl<H: SignInHook> SignInFlow<H> {
    pub fn new(hook: H) -> Self {
        Self { hook }
    }

    /// Submit the form values and resolve the navigation target
    pub async fn submit(&self, credentials: UserCredentials) -> Option<&'static str> {
        self.hook.sign_in(credentials).await.redirect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpLink {
    pub label: String,
    pub href: String,
}

/// Static content of the sign-in page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInPage {
    pub title: String,
    pub divider: String,
    pub sign_up_links: Vec<SignUpLink>,
}

impl Default for SignInPage {
    fn default() -> Self {
        Self {
            title: "Entre com suas credenciais".to_string(),
            divider: "OU".to_string(),
            sign_up_links: vec![
                SignUpLink {
                    label: "Crie uma conta de aluno".to_string(),
                    href: STUDENT_SIGNUP_URL.to_string(),
                },
                SignUpLink {
                    label: "Crie uma conta de empresa parceira".to_string(),
                    href: BUSINESS_SIGNUP_URL.to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedHook(SignInResponse);

    #[async_trait]
    impl SignInHook for FixedHook {
        async fn sign_in(&self, _credentials: UserCredentials) -> SignInResponse {
            self.0.clone()
        }
    }

    fn credentials() -> UserCredentials {
        UserCredentials {
            email: "aluno@example.com".to_string(),
            password: "segredo".to_string(),
        }
    }

    #[tokio::test]
    async fn recognized_user_type_navigates_home() {
        for user_type in [UserType::Business, UserType::Student, UserType::Institution] {
            let flow = SignInFlow::new(FixedHook(SignInResponse {
                error: false,
                user_type: Some(user_type),
            }));
            assert_eq!(flow.submit(credentials()).await, Some("/"));
        }
    }

    #[tokio::test]
    async fn error_or_missing_type_stays_on_form() {
        let flow = SignInFlow::new(FixedHook(SignInResponse {
            error: true,
            user_type: Some(UserType::Student),
        }));
        assert_eq!(flow.submit(credentials()).await, None);

        let flow = SignInFlow::new(FixedHook(SignInResponse::default()));
        assert_eq!(flow.submit(credentials()).await, None);
    }

    #[test]
    fn hook_response_wire_format() {
        let response: SignInResponse = serde_json::from_str(r#"{"userType":"institution"}"#).unwrap();
        assert_eq!(response.redirect(), Some("/"));

        // Unknown user types never navigate
        assert!(serde_json::from_str::<SignInResponse>(r#"{"userType":"admin"}"#).is_err());
    }

    #[test]
    fn page_offers_student_and_business_sign_up() {
        let page = SignInPage::default();
        let hrefs: Vec<&str> = page.sign_up_links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec![STUDENT_SIGNUP_URL, BUSINESS_SIGNUP_URL]);
    }
}
