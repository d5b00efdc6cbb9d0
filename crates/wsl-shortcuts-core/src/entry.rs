//! Selectable application entries.

use crate::error::{Result, ShortcutError};
use serde::Serialize;
use std::path::PathBuf;

/// Where an entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    /// Found by scanning desktop manifests inside the distribution.
    Discovered,
    /// Registered by the user with an explicit command.
    Custom,
}

/// An application that can be turned into a shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationEntry {
    /// Name shown to the user and used as the shortcut file name.
    pub display_name: String,
    /// Manifest path for discovered entries, a command line for custom ones.
    pub invocation: String,
    /// Host path of an `.ico` file, when the user supplied an icon.
    pub icon_path: Option<PathBuf>,
    pub source: EntrySource,
}

impl ApplicationEntry {
    /// Entry for a manifest found during discovery.
    pub fn discovered(display_name: impl Into<String>, manifest_path: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            invocation: manifest_path.into(),
            icon_path: None,
            source: EntrySource::Discovered,
        }
    }

    /// Entry registered by the user.
    pub fn custom(
        display_name: impl Into<String>,
        command: impl Into<String>,
        icon_path: Option<PathBuf>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            invocation: command.into(),
            icon_path,
            source: EntrySource::Custom,
        }
    }

    /// Check that both the name and the invocation are present.
    pub fn validate(&self) -> Result<()> {
        let mut fields = Vec::new();
        if self.display_name.trim().is_empty() {
            fields.push("name".to_string());
        }
        if self.invocation.trim().is_empty() {
            fields.push("command".to_string());
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ShortcutError::Validation { fields })
        }
    }

    /// Whether the invocation points at a desktop manifest rather than a command.
    ///
    /// Decided by extension alone, so a custom entry whose command is a
    /// `.desktop` path is launched through the manifest hint as well.
    pub fn is_manifest(&self, manifest_extension: &str) -> bool {
        self.invocation
            .trim()
            .rsplit_once('.')
            .map(|(_, ext)| ext.eq_ignore_ascii_case(manifest_extension))
            .unwrap_or(false)
    }

    /// Lowercased application token passed after the manifest hint.
    pub fn app_token(&self) -> String {
        self.display_name.trim().to_lowercase()
    }

    /// Shortcut file stem: the display name with characters Windows forbids
    /// in file names replaced by `_` and trailing dots and spaces removed.
    ///
    /// Empty for names made only of dots and spaces.
    pub fn shortcut_stem(&self) -> String {
        let stem: String = self
            .display_name
            .trim()
            .chars()
            .map(|c| match c {
                '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        stem.trim_end_matches(['.', ' ']).to_string()
    }

    /// File name of the shortcut for this entry, e.g. `Firefox.lnk`.
    pub fn shortcut_file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.shortcut_stem(), extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(ApplicationEntry::custom("Foo", "/bin/foo", None).validate().is_ok());

        match ApplicationEntry::custom("  ", "", None).validate() {
            Err(ShortcutError::Validation { fields }) => assert_eq!(fields, vec!["name", "command"]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_is_manifest() {
        let discovered =
            ApplicationEntry::discovered("Firefox", "/usr/share/applications/firefox.desktop");
        assert!(discovered.is_manifest("desktop"));

        let custom = ApplicationEntry::custom("Editor", "gedit --new-window", None);
        assert!(!custom.is_manifest("desktop"));

        let upper = ApplicationEntry::custom("X", "/opt/x/X.DESKTOP", None);
        assert!(upper.is_manifest("desktop"));
    }

    #[test]
    fn test_app_token() {
        let entry = ApplicationEntry::discovered("Firefox", "/usr/share/applications/firefox.desktop");
        assert_eq!(entry.app_token(), "firefox");
    }

    #[test]
    fn test_shortcut_file_name_sanitizes() {
        let entry = ApplicationEntry::custom("Tool (beta) | x: y?", "tool", None);
        assert_eq!(entry.shortcut_file_name("lnk"), "Tool (beta) _ x_ y_.lnk");

        let dotted = ApplicationEntry::custom("App...", "app", None);
        assert_eq!(dotted.shortcut_file_name("lnk"), "App.lnk");

        let dots_only = ApplicationEntry::custom(" . . ", "xeyes", None);
        assert_eq!(dots_only.shortcut_stem(), "");
    }
}
