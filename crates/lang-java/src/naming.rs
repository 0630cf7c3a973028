use once_cell::sync::Lazy;
use regex::Regex;

/// Separator used between packages and between package/class.
pub const TYPE_SEPARATOR: char = '.';

/// Separator used by binary names of nested classes.
pub const NESTED_SEPARATOR: char = '$';

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_$][a-zA-Z_$0-9]*$").expect("identifier pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Package,
    Class,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JavaNaming;

impl JavaNaming {
    /// Build a fully qualified class name.
    ///
    /// # Examples
    /// ```ignore
    /// join("java.util", "Map.Entry") => "java.util.Map.Entry"
    /// join("", "Foo") => "Foo"
    /// ```
    pub fn join(package: &str, name: &str) -> String {
        if package.is_empty() {
            name.to_string()
        } else {
            format!("{}{}{}", package, TYPE_SEPARATOR, name)
        }
    }

    /// Split a fully qualified name into package and class segments.
    ///
    /// Heuristic: Uppercase = Class, Lowercase = Package. Once a class segment is seen,
    /// every following segment is a (nested) class.
    pub fn split_fqn(fqn: &str) -> Vec<(SegmentKind, &str)> {
        let mut result = Vec::new();
        let mut in_class = false;
        for part in fqn.split(|c| c == TYPE_SEPARATOR || c == NESTED_SEPARATOR) {
            if part.is_empty() {
                continue;
            }
            let is_uppercase = part.chars().next().is_some_and(|c| c.is_uppercase());
            in_class |= is_uppercase;
            let kind = if in_class {
                SegmentKind::Class
            } else {
                SegmentKind::Package
            };
            result.push((kind, part));
        }
        result
    }

    /// Package part of a fully qualified name, e.g. `java.util` for `java.util.Map.Entry`.
    pub fn package_of(fqn: &str) -> &str {
        let segments = Self::split_fqn(fqn);
        let mut packages = segments
            .iter()
            .take_while(|(kind, _)| *kind == SegmentKind::Package)
            .count();
        // A name without any class-like segment still ends with its type name.
        if packages == segments.len() {
            packages = packages.saturating_sub(1);
        }
        let mut end = 0;
        for (i, part) in fqn.split(TYPE_SEPARATOR).take(packages).enumerate() {
            end += part.len() + usize::from(i > 0);
        }
        &fqn[..end]
    }

    /// Name relative to its package, e.g. `Map.Entry` for `java.util.Map.Entry`.
    pub fn relative_name(fqn: &str) -> &str {
        let package = Self::package_of(fqn);
        if package.is_empty() {
            fqn
        } else {
            fqn[package.len()..].trim_start_matches(TYPE_SEPARATOR)
        }
    }

    /// Last segment of a name, e.g. `Entry` for `java.util.Map$Entry`.
    pub fn simple_name(fqn: &str) -> &str {
        fqn.rsplit(|c| c == TYPE_SEPARATOR || c == NESTED_SEPARATOR)
            .next()
            .unwrap_or(fqn)
    }

    /// Whether `name` is usable as a Java identifier (parameters, executables).
    pub fn is_valid_identifier(name: &str) -> bool {
        IDENTIFIER.is_match(name)
    }
}
