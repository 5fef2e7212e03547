use std::path::{Component, Path, PathBuf};

/// Renders a path for user-facing messages.
///
/// Existing paths are canonicalized. Anything else is made absolute and
/// normalized lexically, so a missing input still reads unambiguously.
pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        let path = self.as_ref();
        if let Ok(canonical) = path.canonicalize() {
            return canonical.display().to_string();
        }
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        normalize(&absolute).display().to_string()
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.last(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized.iter().collect()
}
