use crate::error::{LiftError, Result};
use crate::library::record::{NewComponent, SavedComponent};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// File name used when no library path is given
pub const DEFAULT_LIBRARY_FILE: &str = "sitelift-components.json";

/// Saved components persisted as a JSON array, newest first
#[derive(Debug, Clone)]
pub struct ComponentLibrary {
    path: PathBuf,
}

impl Default for ComponentLibrary {
    fn default() -> Self {
        Self::open(DEFAULT_LIBRARY_FILE)
    }
}

impl ComponentLibrary {
    /// Use the library stored at `path`. The file is created on first save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All components, newest first. A missing or unreadable file is an empty library.
    pub fn list(&self) -> Vec<SavedComponent> {
        self.load().unwrap_or_else(|e| {
            log::warn!("{}", e);
            Vec::new()
        })
    }

    /// Store a component with a fresh id and timestamp, ahead of existing ones.
    ///
    /// Fails without touching the file if the existing library cannot be read.
    pub fn save(&self, component: NewComponent) -> Result<SavedComponent> {
        let mut list = self.load()?;
        let saved = component.into_saved(uuid::Uuid::new_v4().to_string(), now_millis());
        list.insert(0, saved.clone());
        self.write(&list)?;

        log::info!("saved component {} ({})", saved.name, saved.id);
        Ok(saved)
    }

    /// Remove the component with `id`. Returns whether anything was removed.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut list = self.load()?;
        let before = list.len();
        list.retain(|c| c.id != id);

        let removed = list.len() != before;
        if removed {
            self.write(&list)?;
        }
        Ok(removed)
    }

    /// Components whose name, section label or code contain `query`,
    /// ignoring case. A blank query returns everything.
    pub fn search(&self, query: &str) -> Vec<SavedComponent> {
        let list = self.list();
        if query.trim().is_empty() {
            return list;
        }

        let needle = query.to_lowercase();
        list.into_iter().filter(|c| c.matches(&needle)).collect()
    }

    pub fn get(&self, id: &str) -> Option<SavedComponent> {
        self.list().into_iter().find(|c| c.id == id)
    }

    /// Read the stored array. Only a missing or blank file counts as empty.
    fn load(&self) -> Result<Vec<SavedComponent>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(LiftError::Storage(format!(
                    "cannot read library {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            LiftError::Storage(format!("corrupt library {}: {}", self.path.display(), e))
        })
    }

    fn write(&self, list: &[SavedComponent]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(list)?;
        std::fs::write(&self.path, json).map_err(|e| {
            LiftError::Storage(format!("cannot write {}: {}", self.path.display(), e))
        })
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn library() -> (TempDir, ComponentLibrary) {
        let dir = TempDir::new().unwrap();
        let library = ComponentLibrary::open(dir.path().join("components.json"));
        (dir, library)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, library) = library();
        assert!(library.list().is_empty());
        assert!(library.search("anything").is_empty());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let (_dir, library) = library();
        std::fs::write(library.path(), "{not json").unwrap();
        assert!(library.list().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_never_overwritten() {
        let (_dir, library) = library();
        std::fs::write(library.path(), "{not json").unwrap();

        let err = library.save(NewComponent::new("Header", "a")).unwrap_err();
        assert!(matches!(err, LiftError::Storage(ref msg) if msg.contains("corrupt library")));
        assert!(library.delete("anything").is_err());
        assert_eq!(std::fs::read_to_string(library.path()).unwrap(), "{not json");
    }

    #[test]
    fn test_blank_file_is_empty_and_writable() {
        let (_dir, library) = library();
        std::fs::write(library.path(), "  \n").unwrap();
        library.save(NewComponent::new("Header", "a")).unwrap();
        assert_eq!(library.list().len(), 1);
    }

    #[test]
    fn test_delete_of_unknown_id_leaves_missing_file_alone() {
        let (_dir, library) = library();
        assert!(!library.delete("nope").unwrap());
        assert!(!library.path().exists());
    }

    #[test]
    fn test_save_puts_newest_first() {
        let (_dir, library) = library();
        let first = library.save(NewComponent::new("Header", "a")).unwrap();
        let second = library.save(NewComponent::new("Footer", "b")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(uuid::Uuid::parse_str(&first.id).unwrap().get_version_num(), 4);
        assert!(second.created_at >= first.created_at);

        let names: Vec<_> = library.list().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Footer", "Header"]);
    }

    #[test]
    fn test_delete() {
        let (_dir, library) = library();
        let keep = library.save(NewComponent::new("Keep", "a")).unwrap();
        let drop = library.save(NewComponent::new("Drop", "b")).unwrap();

        assert!(library.delete(&drop.id).unwrap());
        assert!(!library.delete(&drop.id).unwrap());
        assert_eq!(library.list(), vec![keep.clone()]);
        assert_eq!(library.get(&keep.id), Some(keep));
    }

    #[test]
    fn test_search() {
        let (_dir, library) = library();
        library
            .save(
                NewComponent::new("PricingTable", "export default function PricingTable() {}")
                    .section_label("Pricing"),
            )
            .unwrap();
        library
            .save(NewComponent::new("SiteFooter", "<footer>Contact us</footer>"))
            .unwrap();
        library
            .save(NewComponent::new("Hero", "const x = 1;").section_label("Hero"))
            .unwrap();

        let names =
            |q: &str| library.search(q).into_iter().map(|c| c.name).collect::<Vec<_>>();

        assert_eq!(names("PRICING"), vec!["PricingTable"]);
        assert_eq!(names("contact"), vec!["SiteFooter"]);
        assert_eq!(names("hero"), vec!["Hero"]);
        assert_eq!(names("   ").len(), 3);
        assert!(names("nothing").is_empty());
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let library = ComponentLibrary::open(dir.path().join("nested/deeper/lib.json"));
        library.save(NewComponent::new("A", "a")).unwrap();
        assert_eq!(library.list().len(), 1);
    }
}
