//! Slash-separated path manipulation on plain strings.
//!
//! These helpers never touch the filesystem. Trailing separators are ignored,
//! except that the root path `/` stays `/`.

const SEPARATOR: char = '/';
const ROOT: &str = "/";

fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() && path.starts_with(SEPARATOR) {
        ROOT
    } else {
        trimmed
    }
}

/// Split into components. An absolute path starts with a `/` component.
#[must_use]
pub fn path_components(path: &str) -> Vec<String> {
    let mut components = Vec::new();
    if path.starts_with(SEPARATOR) {
        components.push(ROOT.to_string());
    }
    components.extend(
        path.split(SEPARATOR)
            .filter(|component| !component.is_empty())
            .map(str::to_string),
    );
    components
}

/// Absolute paths start at the root or at a home directory (`~`).
#[must_use]
pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with(SEPARATOR) || path.starts_with('~')
}

#[must_use]
pub fn last_path_component(path: &str) -> &str {
    let path = trim_trailing_separators(path);
    if path == ROOT {
        return ROOT;
    }
    path.rsplit_once(SEPARATOR).map_or(path, |(_, last)| last)
}

#[must_use]
pub fn deleting_last_path_component(path: &str) -> &str {
    let path = trim_trailing_separators(path);
    if path == ROOT {
        return ROOT;
    }
    match path.rfind(SEPARATOR) {
        Some(0) => ROOT,
        Some(index) => trim_trailing_separators(&path[..index]),
        None => "",
    }
}

/// Extension of the last component, without the dot. Dotfiles have none.
#[must_use]
pub fn path_extension(path: &str) -> &str {
    let last = last_path_component(path);
    match last.rfind('.') {
        Some(index) if index > 0 => &last[index + 1..],
        _ => "",
    }
}

#[must_use]
pub fn deleting_path_extension(path: &str) -> &str {
    let path = trim_trailing_separators(path);
    let last = last_path_component(path);
    match last.rfind('.') {
        Some(index) if index > 0 => &path[..path.len() - (last.len() - index)],
        _ => path,
    }
}

#[must_use]
pub fn path_with_components<S: AsRef<str>>(components: &[S]) -> String {
    components.iter().fold(String::new(), |path, component| {
        appending_path_component(&path, Some(component.as_ref()))
    })
}

/// Join `component` onto `path` with exactly one separator.
#[must_use]
pub fn appending_path_component(path: &str, component: Option<&str>) -> String {
    let Some(component) = component else {
        return path.to_string();
    };
    let base = trim_trailing_separators(path);
    if base.is_empty() {
        return trim_trailing_separators(component).to_string();
    }

    let component = component
        .trim_start_matches(SEPARATOR)
        .trim_end_matches(SEPARATOR);
    if component.is_empty() {
        return base.to_string();
    }
    if base == ROOT {
        format!("{ROOT}{component}")
    } else {
        format!("{base}{SEPARATOR}{component}")
    }
}

/// Append `.extension` to the last component.
///
/// Unchanged when the extension is missing, empty, or contains a separator,
/// or when there is no last component to extend.
#[must_use]
pub fn appending_path_extension(path: &str, extension: Option<&str>) -> String {
    let base = trim_trailing_separators(path);
    match extension {
        Some(extension)
            if !extension.is_empty()
                && !extension.contains(SEPARATOR)
                && !base.is_empty()
                && base != ROOT =>
        {
            format!("{base}.{extension}")
        }
        _ => path.to_string(),
    }
}
