//! Hidden/system classification of filesystem entries.
//!
//! Every platform shares the same name rules (dot-prefix, artifact
//! denylist, pseudo-filesystem roots). Platform strategies add the native
//! attribute bits on top. Attribute lookups never fail: a path that cannot be
//! stat'ed, or a platform without the attribute API, simply contributes
//! nothing.

use std::path::Path;
use std::sync::Arc;

use fixity_core::Classification;

/// Decides the hidden/system status of a path without reading its content.
pub trait PathClassifier: Send + Sync + std::fmt::Debug {
    /// Classify `path`. Must not fail for missing or unreadable paths.
    fn classify(&self, path: &Path) -> Classification;

    /// Short name of the strategy, for logs.
    fn name(&self) -> &'static str;
}

/// How a denylist entry is compared against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Whole final component, case-insensitive.
    Exact,
    /// Start of the final component, case-insensitive.
    NamePrefix,
    /// Start of the full path: the fragment itself or anything beneath it.
    PathPrefix,
}

/// One well-known platform artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenyEntry {
    /// Lowercase pattern.
    pub pattern: &'static str,
    /// Comparison applied to `pattern`.
    pub mode: MatchMode,
}

impl DenyEntry {
    const fn exact(pattern: &'static str) -> Self {
        Self {
            pattern,
            mode: MatchMode::Exact,
        }
    }

    const fn name_prefix(pattern: &'static str) -> Self {
        Self {
            pattern,
            mode: MatchMode::NamePrefix,
        }
    }

    const fn path_prefix(pattern: &'static str) -> Self {
        Self {
            pattern,
            mode: MatchMode::PathPrefix,
        }
    }

    /// Check whether this entry matches. `name` must already be lowercase.
    pub fn matches(&self, name: &str, path: &Path) -> bool {
        match self.mode {
            MatchMode::Exact => name == self.pattern,
            MatchMode::NamePrefix => name.starts_with(self.pattern),
            MatchMode::PathPrefix => {
                let full = path.to_string_lossy();
                match full.strip_prefix(self.pattern) {
                    Some(rest) => rest.is_empty() || rest.starts_with('/'),
                    None => false,
                }
            }
        }
    }
}

/// Well-known OS and filesystem-management artifacts.
pub const SYSTEM_DENYLIST: &[DenyEntry] = &[
    // Windows
    DenyEntry::exact("thumbs.db"),
    DenyEntry::exact("ehthumbs.db"),
    DenyEntry::exact("desktop.ini"),
    DenyEntry::exact("$recycle.bin"),
    DenyEntry::exact("recycler"),
    DenyEntry::exact("system volume information"),
    // macOS
    DenyEntry::exact(".ds_store"),
    DenyEntry::exact(".spotlight-v100"),
    DenyEntry::exact(".trashes"),
    DenyEntry::exact(".trash"),
    DenyEntry::exact(".fseventsd"),
    DenyEntry::exact(".temporaryitems"),
    DenyEntry::exact(".documentrevisions-v100"),
    DenyEntry::exact(".apdisk"),
    // Linux and other unixes
    DenyEntry::exact("lost+found"),
    DenyEntry::name_prefix(".trash-"),
    DenyEntry::path_prefix("/proc"),
    DenyEntry::path_prefix("/sys"),
    DenyEntry::path_prefix("/dev"),
];

/// Portable rules shared by every platform strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameClassifier;

impl PathClassifier for NameClassifier {
    fn classify(&self, path: &Path) -> Classification {
        let Some(name) = path.file_name() else {
            return Classification::NONE;
        };
        let name = name.to_string_lossy().to_lowercase();

        Classification {
            hidden: name.starts_with('.'),
            system: SYSTEM_DENYLIST.iter().any(|entry| entry.matches(&name, path)),
        }
    }

    fn name(&self) -> &'static str {
        "name"
    }
}

/// Linux and other unixes: name rules only, there is no attribute bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnixClassifier;

impl PathClassifier for UnixClassifier {
    fn classify(&self, path: &Path) -> Classification {
        NameClassifier.classify(path)
    }

    fn name(&self) -> &'static str {
        "unix"
    }
}

/// macOS: name rules plus the `UF_HIDDEN` file flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct MacClassifier;

impl PathClassifier for MacClassifier {
    fn classify(&self, path: &Path) -> Classification {
        NameClassifier
            .classify(path)
            .union(Classification::new(has_hidden_flag(path), false))
    }

    fn name(&self) -> &'static str {
        "macos"
    }
}

/// Windows: name rules plus the hidden and system file attributes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsClassifier;

impl PathClassifier for WindowsClassifier {
    fn classify(&self, path: &Path) -> Classification {
        NameClassifier.classify(path).union(file_attributes(path))
    }

    fn name(&self) -> &'static str {
        "windows"
    }
}

/// Select the strategy for the platform this binary was built for.
pub fn platform_classifier() -> Arc<dyn PathClassifier> {
    if cfg!(windows) {
        Arc::new(WindowsClassifier)
    } else if cfg!(target_os = "macos") {
        Arc::new(MacClassifier)
    } else {
        Arc::new(UnixClassifier)
    }
}

#[cfg(target_os = "macos")]
fn has_hidden_flag(path: &Path) -> bool {
    use std::os::macos::fs::MetadataExt;

    const UF_HIDDEN: u32 = 0x0000_8000;

    std::fs::symlink_metadata(path)
        .map(|m| m.st_flags() & UF_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(target_os = "macos"))]
fn has_hidden_flag(_path: &Path) -> bool {
    false
}

#[cfg(windows)]
fn file_attributes(path: &Path) -> Classification {
    use std::os::windows::fs::MetadataExt;

    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
    const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;

    match std::fs::symlink_metadata(path) {
        Ok(m) => {
            let attrs = m.file_attributes();
            Classification::new(
                attrs & FILE_ATTRIBUTE_HIDDEN != 0,
                attrs & FILE_ATTRIBUTE_SYSTEM != 0,
            )
        }
        Err(_) => Classification::NONE,
    }
}

#[cfg(not(windows))]
fn file_attributes(_path: &Path) -> Classification {
    Classification::NONE
}
