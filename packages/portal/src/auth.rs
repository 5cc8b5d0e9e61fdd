//! # Authentication: login, signup, logout
//!
//! There is no authority behind this module. A "login" validates the form,
//! optionally checks the configured volunteer allow-list and access code, and
//! writes the resulting [`Session`] into tab storage (mirrored durably when
//! `auth.mirror_session` is set).
//!
//! | Check | Applies to | Failure |
//! |-------|-----------|---------|
//! | email and password present | login, signup | [`ValidationError::MissingField`] |
//! | password length | login (`login_min_password`), signup (`signup_min_password`) | [`ValidationError::PasswordTooShort`] |
//! | name length | signup (`signup_min_name`) | [`ValidationError::NameTooShort`] |
//! | email shape | signup | [`ValidationError::InvalidEmail`] |
//! | allow-list pair | volunteer login | [`AuthError::InvalidVolunteerCredentials`] |
//! | access code | volunteer login | [`AuthError::InvalidAccessCode`] |
//!
//! The allow-list and access code are plaintext client-side values. They only
//! decide which panels the UI offers.

use std::sync::LazyLock;

use regex::Regex;
use store::{KeyValueStore, Role, Session, UserProfile};
use tracing::{info, warn};

use crate::error::{AuthError, ValidationError};
use crate::state::AppState;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Display name derived from an email: everything before the `@`.
pub fn display_name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Required when `role` is volunteer.
    pub access_code: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// The Terms of Service and Privacy Policy box.
    pub accepted_terms: bool,
}

pub struct Auth<S: KeyValueStore> {
    state: AppState<S>,
}

impl<S: KeyValueStore> Auth<S> {
    pub fn new(state: AppState<S>) -> Self {
        Self { state }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<Session, AuthError> {
        let config = &self.state.config().auth;
        let email = request.email.trim();

        if email.is_empty() {
            return Err(ValidationError::MissingField("email").into());
        }
        if request.password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        if request.password.chars().count() < config.login_min_password {
            return Err(ValidationError::PasswordTooShort {
                min: config.login_min_password,
            }
            .into());
        }

        if request.role.is_volunteer() {
            if config.volunteer(email, &request.password).is_none() {
                warn!(email, "volunteer login rejected: not on the allow-list");
                return Err(AuthError::InvalidVolunteerCredentials);
            }
            let code = request.access_code.as_deref().map(str::trim);
            if code != Some(config.access_code.as_str()) {
                warn!(email, "volunteer login rejected: wrong access code");
                return Err(AuthError::InvalidAccessCode);
            }
        }

        let session = Session {
            display_name: display_name_from_email(email).to_string(),
            email: email.to_string(),
            role: request.role,
            logged_in: true,
        };
        self.state
            .store()
            .write_session(&session, config.mirror_session);
        info!(email, role = session.role.as_str(), "logged in");
        Ok(session)
    }

    /// Create an attendee account. Signup always yields the user role.
    pub fn signup(&self, request: &SignupRequest) -> Result<Session, ValidationError> {
        let config = &self.state.config().auth;
        let name = request.name.trim();
        let email = request.email.trim();

        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if email.is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if request.password.is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        if name.chars().count() < config.signup_min_name {
            return Err(ValidationError::NameTooShort {
                min: config.signup_min_name,
            });
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if request.password.chars().count() < config.signup_min_password {
            return Err(ValidationError::PasswordTooShort {
                min: config.signup_min_password,
            });
        }
        if !request.accepted_terms {
            return Err(ValidationError::TermsNotAccepted);
        }

        let store = self.state.store();
        store.save_profile(&UserProfile {
            name: name.to_string(),
            email: email.to_string(),
        });
        let session = Session {
            display_name: name.to_string(),
            email: email.to_string(),
            role: Role::User,
            logged_in: true,
        };
        store.write_session(&session, config.mirror_session);
        info!(email, "signed up");
        Ok(session)
    }

    pub fn logout(&self) {
        self.state.store().clear_session();
        info!("logged out");
    }

    pub fn current_session(&self) -> Option<Session> {
        self.state.session()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    fn volunteer_request(code: &str) -> LoginRequest {
        LoginRequest {
            email: "volunteer1@example.com".to_string(),
            password: "vol123".to_string(),
            role: Role::Volunteer,
            access_code: Some(code.to_string()),
        }
    }

    #[test]
    fn test_user_login_derives_display_name() {
        let auth = Auth::new(testing::state());
        let session = auth
            .login(&LoginRequest {
                email: "priya.shah@example.com".to_string(),
                password: "hunter".to_string(),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(session.display_name, "priya.shah");
        assert_eq!(session.role, Role::User);
        assert_eq!(auth.current_session(), Some(session));
    }

    #[test]
    fn test_login_rejects_short_password() {
        let auth = Auth::new(testing::state());
        let err = auth
            .login(&LoginRequest {
                email: "a@b.co".to_string(),
                password: "abc".to_string(),
                ..Default::default()
            })
            .unwrap_err();

        assert_eq!(
            err,
            AuthError::Validation(ValidationError::PasswordTooShort { min: 4 })
        );
        assert!(auth.current_session().is_none());
    }

    #[test]
    fn test_login_requires_email() {
        let auth = Auth::new(testing::state());
        let err = auth
            .login(&LoginRequest {
                email: "   ".to_string(),
                password: "secret".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("email").into());
    }

    #[test]
    fn test_volunteer_login_checks_allow_list_then_code() {
        let auth = Auth::new(testing::state());

        let mut stranger = volunteer_request("VOL-SECRET-2025");
        stranger.password = "wrong".to_string();
        assert_eq!(
            auth.login(&stranger).unwrap_err(),
            AuthError::InvalidVolunteerCredentials
        );

        assert_eq!(
            auth.login(&volunteer_request("guess")).unwrap_err(),
            AuthError::InvalidAccessCode
        );

        let mut no_code = volunteer_request("");
        no_code.access_code = None;
        assert_eq!(auth.login(&no_code).unwrap_err(), AuthError::InvalidAccessCode);
        assert!(auth.current_session().is_none());

        let session = auth.login(&volunteer_request("VOL-SECRET-2025")).unwrap();
        assert_eq!(session.role, Role::Volunteer);
        assert_eq!(auth.current_session().unwrap().role, Role::Volunteer);
    }

    #[test]
    fn test_signup_validation() {
        let auth = Auth::new(testing::state());
        let base = SignupRequest {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            password: "secret1".to_string(),
            accepted_terms: true,
        };

        let short_name = SignupRequest {
            name: "R".to_string(),
            ..base.clone()
        };
        assert_eq!(
            auth.signup(&short_name).unwrap_err(),
            ValidationError::NameTooShort { min: 2 }
        );

        let bad_email = SignupRequest {
            email: "ravi@example".to_string(),
            ..base.clone()
        };
        assert_eq!(auth.signup(&bad_email).unwrap_err(), ValidationError::InvalidEmail);

        let short_password = SignupRequest {
            password: "12345".to_string(),
            ..base.clone()
        };
        assert_eq!(
            auth.signup(&short_password).unwrap_err(),
            ValidationError::PasswordTooShort { min: 6 }
        );
        assert!(auth.current_session().is_none());
    }

    #[test]
    fn test_signup_requires_terms() {
        let state = testing::state();
        let auth = Auth::new(state.clone());
        let request = SignupRequest {
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            password: "secret1".to_string(),
            accepted_terms: false,
        };

        let err = auth.signup(&request).unwrap_err();
        assert_eq!(err, ValidationError::TermsNotAccepted);
        assert_eq!(
            err.to_string(),
            "Please agree to the Terms of Service and Privacy Policy."
        );
        assert!(state.store().profile().is_none());
        assert!(auth.current_session().is_none());

        let agreed = SignupRequest {
            accepted_terms: true,
            ..request
        };
        assert!(auth.signup(&agreed).is_ok());
    }

    #[test]
    fn test_signup_records_profile_and_session() {
        let state = testing::state();
        let auth = Auth::new(state.clone());
        let session = auth
            .signup(&SignupRequest {
                name: "  Ravi Kumar ".to_string(),
                email: "ravi@example.com".to_string(),
                password: "secret1".to_string(),
                accepted_terms: true,
            })
            .unwrap();

        assert_eq!(session.display_name, "Ravi Kumar");
        assert_eq!(session.role, Role::User);
        let profile = state.store().profile().unwrap();
        assert_eq!(profile.name, "Ravi Kumar");
        assert_eq!(profile.email, "ravi@example.com");
    }

    #[test]
    fn test_logout_clears_session() {
        let auth = Auth::new(testing::state());
        auth.login(&LoginRequest {
            email: "a@b.co".to_string(),
            password: "pass".to_string(),
            ..Default::default()
        })
        .unwrap();
        auth.logout();
        assert!(auth.current_session().is_none());
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("x@y.io"));
        assert!(!is_valid_email("x y@z.io"));
        assert!(!is_valid_email("@z.io"));
        assert_eq!(display_name_from_email("no-at-sign"), "no-at-sign");
    }
}
