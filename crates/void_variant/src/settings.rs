//! Project settings registry
//!
//! Named settings stored as Variants, with editor metadata, per-name
//! overrides, a restart-if-changed flag, and a stable display order.
//! Typed reads go through [`FromVariant`] and check the stored kind first.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::convert::FromVariant;
use crate::error::SettingsError;
use crate::kind::VariantType;
use crate::variant::Variant;

/// Result type for settings access
pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// First display order handed out. A large start keeps registered settings
/// after the host's built-in groups.
pub const SETTINGS_ORDER_START: i32 = 1_000_000;

/// Editor hint attached to a setting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PropertyHint {
    #[default]
    None,
    Range,
    Enum,
    File,
    Dir,
    GlobalFile,
    GlobalDir,
    Multiline,
    PlaceholderText,
}

/// Editor-facing description of a setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyInfo {
    pub name: String,
    pub kind: VariantType,
    pub hint: PropertyHint,
    pub hint_string: String,
}

#[derive(Debug, Clone)]
struct Setting {
    value: Variant,
    initial: Variant,
    override_value: Option<Variant>,
    info: PropertyInfo,
    restart_if_changed: bool,
    order: i32,
}

impl Setting {
    fn effective(&self) -> &Variant {
        self.override_value.as_ref().unwrap_or(&self.value)
    }
}

#[derive(Debug)]
struct SettingsState {
    settings: HashMap<String, Setting>,
    next_order: i32,
}

impl Default for SettingsState {
    fn default() -> Self {
        Self {
            settings: HashMap::new(),
            next_order: SETTINGS_ORDER_START,
        }
    }
}

impl SettingsState {
    fn take_order(&mut self) -> i32 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}

/// Thread-safe settings store
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    state: RwLock<SettingsState>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a setting.
    ///
    /// The value is only stored if the name is new; a value already present
    /// (e.g. loaded from a project file) is kept. Metadata, initial value,
    /// restart flag and display order are always refreshed.
    pub fn register(
        &self,
        name: &str,
        value: impl Into<Variant>,
        needs_restart: bool,
        hint: PropertyHint,
        hint_string: &str,
    ) {
        let value = value.into();
        let info = PropertyInfo {
            name: name.to_string(),
            kind: value.get_type(),
            hint,
            hint_string: hint_string.to_string(),
        };

        let mut guard = self.state.write();
        let state = &mut *guard;
        let order = state.take_order();
        match state.settings.get_mut(name) {
            Some(setting) => {
                setting.initial = value;
                setting.info = info;
                setting.restart_if_changed = needs_restart;
                setting.order = order;
            }
            None => {
                state.settings.insert(
                    name.to_string(),
                    Setting {
                        initial: value.clone(),
                        value,
                        override_value: None,
                        info,
                        restart_if_changed: needs_restart,
                        order,
                    },
                );
            }
        }

        log::debug!("Registered setting '{}' (order {})", name, order);
    }

    /// Register with no hint and no restart requirement
    pub fn register_plain(&self, name: &str, value: impl Into<Variant>) {
        self.register(name, value, false, PropertyHint::None, "");
    }

    pub fn has_setting(&self, name: &str) -> bool {
        self.state.read().settings.contains_key(name)
    }

    /// Store a value. Unregistered names are created with plain metadata.
    pub fn set(&self, name: &str, value: impl Into<Variant>) {
        let value = value.into();
        let mut guard = self.state.write();
        let state = &mut *guard;
        if let Some(setting) = state.settings.get_mut(name) {
            setting.value = value;
            return;
        }

        let order = state.take_order();
        state.settings.insert(
            name.to_string(),
            Setting {
                initial: Variant::Nil,
                info: PropertyInfo {
                    name: name.to_string(),
                    kind: value.get_type(),
                    hint: PropertyHint::None,
                    hint_string: String::new(),
                },
                value,
                override_value: None,
                restart_if_changed: false,
                order,
            },
        );
    }

    /// Stored value, ignoring overrides
    pub fn get_setting(&self, name: &str) -> Option<Variant> {
        self.state.read().settings.get(name).map(|s| s.value.clone())
    }

    /// Shadow a registered setting's stored value
    pub fn set_override(&self, name: &str, value: impl Into<Variant>) -> SettingsResult<()> {
        let mut state = self.state.write();
        let setting = state
            .settings
            .get_mut(name)
            .ok_or_else(|| SettingsError::NotFound(name.to_string()))?;
        setting.override_value = Some(value.into());
        Ok(())
    }

    pub fn clear_override(&self, name: &str) -> Option<Variant> {
        let mut state = self.state.write();
        state.settings.get_mut(name)?.override_value.take()
    }

    /// Override if one is set, otherwise the stored value
    pub fn get_with_override(&self, name: &str) -> Option<Variant> {
        self.state.read().settings.get(name).map(|s| s.effective().clone())
    }

    /// Typed read.
    ///
    /// The effective value must have the same kind as `T::default()`
    /// converts to; anything else is a [`SettingsError::TypeMismatch`].
    pub fn get<T>(&self, name: &str) -> SettingsResult<T>
    where
        T: FromVariant + Default + Into<Variant>,
    {
        let value = self
            .get_with_override(name)
            .ok_or_else(|| SettingsError::NotFound(name.to_string()))?;

        let expected = Into::<Variant>::into(T::default()).get_type();
        let found = value.get_type();
        if found != expected {
            log::error!(
                "Setting '{}' has type {}, expected {}",
                name,
                found,
                expected
            );
            return Err(SettingsError::TypeMismatch {
                name: name.to_string(),
                expected,
                found,
            });
        }

        Ok(T::from_variant(&value)?)
    }

    pub fn property_info(&self, name: &str) -> Option<PropertyInfo> {
        self.state.read().settings.get(name).map(|s| s.info.clone())
    }

    pub fn initial_value(&self, name: &str) -> Option<Variant> {
        self.state.read().settings.get(name).map(|s| s.initial.clone())
    }

    pub fn order(&self, name: &str) -> Option<i32> {
        self.state.read().settings.get(name).map(|s| s.order)
    }

    pub fn restart_if_changed(&self, name: &str) -> bool {
        self.state
            .read()
            .settings
            .get(name)
            .map_or(false, |s| s.restart_if_changed)
    }

    /// Setting names in display order
    pub fn names(&self) -> Vec<String> {
        let state = self.state.read();
        let mut entries: Vec<(&String, i32)> =
            state.settings.iter().map(|(k, s)| (k, s.order)).collect();
        entries.sort_by_key(|(_, order)| *order);
        entries.into_iter().map(|(k, _)| k.clone()).collect()
    }

    /// Restart-flagged settings whose effective value differs from the
    /// registered initial value, in display order
    pub fn restart_required(&self) -> Vec<String> {
        let state = self.state.read();
        let mut changed: Vec<(&String, i32)> = state
            .settings
            .iter()
            .filter(|(_, s)| s.restart_if_changed && *s.effective() != s.initial)
            .map(|(k, s)| (k, s.order))
            .collect();
        changed.sort_by_key(|(_, order)| *order);
        changed.into_iter().map(|(k, _)| k.clone()).collect()
    }
}

/// Settings the sandbox itself registers
pub struct SandboxSettings;

impl SandboxSettings {
    /// Path to the docker executable used to build guest programs
    pub const DOCKER_PATH: &'static str = "editor/script/docker";

    #[cfg(windows)]
    const DEFAULT_DOCKER_PATH: &'static str = "C:\\Program Files\\Docker\\Docker\\bin\\";
    #[cfg(not(windows))]
    const DEFAULT_DOCKER_PATH: &'static str = "docker";

    pub fn register_defaults(registry: &SettingsRegistry) {
        if cfg!(windows) {
            registry.register(
                Self::DOCKER_PATH,
                Self::DEFAULT_DOCKER_PATH,
                true,
                PropertyHint::None,
                "",
            );
        } else {
            registry.register_plain(Self::DOCKER_PATH, Self::DEFAULT_DOCKER_PATH);
        }
    }

    pub fn docker_path(registry: &SettingsRegistry) -> SettingsResult<String> {
        registry.get::<String>(Self::DOCKER_PATH)
    }
}
