//! Settings panel: profile form, preferences, theme, export, and cache reset.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::io::export::{ExportData, write_export};
use crate::io::storage::StorageError;
use crate::model::{NotificationLevel, Preferences, ThemeMode, User};
use crate::ops::store::AppState;

pub const AVATAR_OPTIONS: [&str; 4] = ["SA", "MC", "JR", "AB"];

const MIN_NAME_CHARS: usize = 3;
const MIN_PHONE_CHARS: usize = 10;

/// Error type for the profile form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least 3 characters")]
    NameTooShort,
    #[error("Phone must be at least 10 characters")]
    PhoneTooShort,
    #[error("unknown avatar: {0}")]
    InvalidAvatar(String),
    #[error("You must be signed in")]
    NotSignedIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Phone,
    Avatar,
}

impl ProfileError {
    /// Which field the message belongs under, if any
    pub fn field(&self) -> Option<ProfileField> {
        match self {
            ProfileError::NameRequired | ProfileError::NameTooShort => Some(ProfileField::Name),
            ProfileError::PhoneTooShort => Some(ProfileField::Phone),
            ProfileError::InvalidAvatar(_) => Some(ProfileField::Avatar),
            ProfileError::NotSignedIn => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
    pub avatar: String,
}

impl ProfileForm {
    pub fn from_user(user: &User) -> Self {
        ProfileForm {
            name: user.name.clone(),
            phone: user.phone.clone(),
            avatar: user.avatar.clone(),
        }
    }

    /// Trimmed copy, checked in form order: name, then phone, then avatar.
    /// An empty phone is allowed.
    pub fn validate(&self) -> Result<ProfileForm, ProfileError> {
        let name = self.name.trim();
        let phone = self.phone.trim();
        if name.is_empty() {
            return Err(ProfileError::NameRequired);
        }
        if name.chars().count() < MIN_NAME_CHARS {
            return Err(ProfileError::NameTooShort);
        }
        if !phone.is_empty() && phone.chars().count() < MIN_PHONE_CHARS {
            return Err(ProfileError::PhoneTooShort);
        }
        if !AVATAR_OPTIONS.contains(&self.avatar.as_str()) {
            return Err(ProfileError::InvalidAvatar(self.avatar.clone()));
        }
        Ok(ProfileForm {
            name: name.to_string(),
            phone: phone.to_string(),
            avatar: self.avatar.clone(),
        })
    }
}

/// Validate and apply the profile form to the current user and the user list
pub fn update_profile(state: &mut AppState, form: &ProfileForm) -> Result<User, ProfileError> {
    if state.user().is_none() {
        return Err(ProfileError::NotSignedIn);
    }
    let form = form.validate()?;
    state.update_current_user(|u| {
        u.name = form.name.clone();
        u.phone = form.phone.clone();
        u.avatar = form.avatar.clone();
    });
    state.notify(NotificationLevel::Success, "Profile updated successfully");
    state.user().cloned().ok_or(ProfileError::NotSignedIn)
}

/// Replace the current user's preferences and apply the theme
pub fn update_preferences(state: &mut AppState, prefs: Preferences) {
    if state.user().is_none() {
        return;
    }
    let theme = prefs.theme;
    state.update_user_preferences(|p| *p = prefs);
    state.update_ui(|ui| ui.theme = theme);
    state.notify(NotificationLevel::Success, "Preferences updated successfully");
}

/// Flip dark/light, remembering the choice in the user's preferences
pub fn toggle_theme(state: &mut AppState) -> ThemeMode {
    let theme = state.ui.theme.toggled();
    state.update_ui(|ui| ui.theme = theme);
    state.update_user_preferences(|p| p.theme = theme);
    state.notify(
        NotificationLevel::Success,
        format!("Switched to {} mode", theme.label()),
    );
    theme
}

/// Write the JSON export into `dir`
pub fn export_data(
    state: &mut AppState,
    dir: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf, StorageError> {
    let data = ExportData::new(now, state.user(), &state.users, &state.tasks);
    let path = write_export(dir, &data)?;
    info!(path = %path.display(), "data exported");
    state.notify(NotificationLevel::Success, "Data exported successfully");
    Ok(path)
}

/// Drop the saved snapshot and start over from the mock data
pub fn clear_cache(state: &mut AppState) {
    state.reset();
    state.notify(NotificationLevel::Success, "Cache cleared");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::Storage;
    use crate::model::{Density, View};
    use tempfile::TempDir;

    fn signed_in(username: &str, password: &str) -> AppState {
        let mut state = AppState::seeded();
        state.login(username, password).unwrap();
        state
    }

    fn form(name: &str, phone: &str, avatar: &str) -> ProfileForm {
        ProfileForm {
            name: name.into(),
            phone: phone.into(),
            avatar: avatar.into(),
        }
    }

    #[test]
    fn profile_validation_messages() {
        let cases = [
            (form("  ", "", "SA"), ProfileError::NameRequired),
            (form("Al", "", "SA"), ProfileError::NameTooShort),
            (form("Alex", "555-01", "SA"), ProfileError::PhoneTooShort),
            (form("Alex", "", "ZZ"), ProfileError::InvalidAvatar("ZZ".into())),
        ];
        for (f, want) in cases {
            assert_eq!(f.validate(), Err(want));
        }
        assert_eq!(
            ProfileError::PhoneTooShort.to_string(),
            "Phone must be at least 10 characters"
        );
        assert_eq!(ProfileError::NameTooShort.field(), Some(ProfileField::Name));
    }

    #[test]
    fn empty_phone_is_allowed() {
        let ok = form(" Alex Doe ", "", "AB").validate().unwrap();
        assert_eq!(ok.name, "Alex Doe");
        assert_eq!(ok.phone, "");
    }

    #[test]
    fn profile_update_reaches_user_list() {
        let mut state = signed_in("user@example.com", "user123");
        let user = update_profile(&mut state, &form("Mike Chen", "+1-555-9999", "AB")).unwrap();
        assert_eq!(user.name, "Mike Chen");
        let stored = state.user_by_id("user-2").unwrap();
        assert_eq!(stored.avatar, "AB");
        assert_eq!(stored.phone, "+1-555-9999");
        assert!(stored.password.is_some());
        assert!(state.user().unwrap().password.is_none());
    }

    #[test]
    fn invalid_profile_changes_nothing() {
        let mut state = signed_in("user@example.com", "user123");
        let before = state.users.clone();
        assert!(update_profile(&mut state, &form("Mi", "", "MC")).is_err());
        assert_eq!(state.users, before);
    }

    #[test]
    fn preferences_apply_theme() {
        let mut state = signed_in("sales@example.com", "sales123");
        update_preferences(
            &mut state,
            Preferences {
                theme: ThemeMode::Light,
                layout_density: Density::Compact,
                advanced_metrics: true,
            },
        );
        assert_eq!(state.ui.theme, ThemeMode::Light);
        let prefs = &state.user_by_id("user-3").unwrap().preferences;
        assert_eq!(prefs.layout_density, Density::Compact);
        assert!(prefs.advanced_metrics);
    }

    #[test]
    fn toggle_theme_round_trip() {
        let mut state = signed_in("admin@example.com", "admin123");
        assert_eq!(toggle_theme(&mut state), ThemeMode::Light);
        assert_eq!(
            state.notifications.last().unwrap().message,
            "Switched to light mode"
        );
        assert_eq!(toggle_theme(&mut state), ThemeMode::Dark);
        assert_eq!(state.user().unwrap().preferences.theme, ThemeMode::Dark);
    }

    #[test]
    fn export_writes_file() {
        let tmp = TempDir::new().unwrap();
        let mut state = signed_in("admin@example.com", "admin123");
        let path = export_data(&mut state, tmp.path(), Utc::now()).unwrap();
        assert!(path.is_file());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("dashboard-export-"));
        assert!(name.ends_with(".json"));
    }

    #[test]
    fn clear_cache_reseeds_and_signs_out() {
        let tmp = TempDir::new().unwrap();
        let mut state = AppState::initialize(Some(Storage::new(tmp.path(), "app_state.json")));
        state.login("admin@example.com", "admin123").unwrap();
        state.delete_task("task-1");
        assert!(state.storage().unwrap().exists());

        clear_cache(&mut state);
        assert!(!state.storage().unwrap().exists());
        assert!(state.user().is_none());
        assert_eq!(state.tasks.len(), 10);
        assert_eq!(state.ui.active_view, View::Login);
    }
}
