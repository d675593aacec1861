//! Profile projection types.

use serde::{Deserialize, Serialize};

use crate::user::{UpdateProfileData, User};

/// Placeholder picture used whenever the account has none.
pub const DEFAULT_PROFILE_PICTURE: &str =
    "https://cdn-icons-png.flaticon.com/512/3135/3135715.png";

/// Profile store lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileStatus {
    /// Initial reconciliation has not completed yet
    #[default]
    Loading,
    /// Current value is settled (a profile, or none persisted)
    Ready,
}

/// Editable projection of the user's profile.
///
/// Unlike [`User`], every field is a plain string: an absent phone number
/// is the empty string and an absent picture is the fixed placeholder.
/// `password` is transient and write-only; it is never populated from a
/// read and refreshing always leaves it empty.
///
/// Persisted as camelCase JSON, the same shape the backend speaks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_profile_picture")]
    pub profile_picture: String,
    #[serde(default)]
    pub password: String,
}

fn default_profile_picture() -> String {
    DEFAULT_PROFILE_PICTURE.to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            profile_picture: default_profile_picture(),
            password: String::new(),
        }
    }
}

impl Profile {
    /// Builds the projection of an authenticated identity, applying the
    /// field defaults.
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            profile_picture: user
                .profile_picture
                .clone()
                .unwrap_or_else(default_profile_picture),
            password: String::new(),
        }
    }

    /// Merges a partial update into this profile; absent fields are left
    /// untouched.
    pub fn apply(&mut self, update: UpdateProfileData) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(profile_picture) = update.profile_picture {
            self.profile_picture = profile_picture;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            phone: None,
            profile_picture: None,
        }
    }

    #[test]
    fn test_from_user_applies_defaults() {
        let profile = Profile::from_user(&user());
        assert_eq!(profile.name, "A");
        assert_eq!(profile.phone, "");
        assert_eq!(profile.profile_picture, DEFAULT_PROFILE_PICTURE);
        assert_eq!(profile.password, "");
    }

    #[test]
    fn test_from_user_keeps_present_fields() {
        let mut user = user();
        user.phone = Some("555".to_string());
        user.profile_picture = Some("https://example.com/a.png".to_string());

        let profile = Profile::from_user(&user);
        assert_eq!(profile.phone, "555");
        assert_eq!(profile.profile_picture, "https://example.com/a.png");
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut profile = Profile::from_user(&user());
        profile.apply(UpdateProfileData {
            phone: Some("555".to_string()),
            ..Default::default()
        });

        assert_eq!(profile.phone, "555");
        assert_eq!(profile.name, "A");
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.profile_picture, DEFAULT_PROFILE_PICTURE);
    }

    #[test]
    fn test_snapshot_round_trip_is_camel_case() {
        let profile = Profile::from_user(&user());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.as_object().unwrap().contains_key("profilePicture"));

        let back: Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }
}
