use super::Node;

const FOLDER_SUFFIX: char = '/';

pub fn is_folder_name(name: &str) -> bool {
    name.ends_with(FOLDER_SUFFIX)
}

pub fn ensure_trailing_slash(name: &str) -> String {
    if is_folder_name(name) {
        name.to_string()
    } else {
        format!("{name}{FOLDER_SUFFIX}")
    }
}

pub fn strip_trailing_slash(name: &str) -> &str {
    name.strip_suffix(FOLDER_SUFFIX).unwrap_or(name)
}

/// Appends `name` to the path of its parent.
///
/// Root nodes have an empty parent path, so their path is their own name.
/// A parent path that somehow lacks the folder suffix still gets a separator.
pub fn join_path(parent_path: &str, name: &str) -> String {
    if parent_path.is_empty() {
        name.to_string()
    } else if is_folder_name(parent_path) {
        format!("{parent_path}{name}")
    } else {
        format!("{parent_path}{FOLDER_SUFFIX}{name}")
    }
}

/// Recomputes the `path` of every node in the forest from the node names.
pub fn refresh_paths<I>(forest: &mut [Node<I>]) {
    refresh_paths_under(forest, "");
}

fn refresh_paths_under<I>(nodes: &mut [Node<I>], parent_path: &str) {
    for node in nodes {
        let path = join_path(parent_path, &node.label());
        node.path = path.clone();
        if let Some(children) = node.children_mut() {
            refresh_paths_under(children, &path);
        }
    }
}
