use regex::Regex;
use std::sync::LazyLock;

/// Placeholder for the package name in tag and commit-message templates
pub const PACKAGE_NAME: &str = "package_name";

/// Placeholder for the resolved version in tag and commit-message templates
pub const PACKAGE_VERSION: &str = "package_version";

/// Default tag template for packages inside a monorepo
pub const MONOREPO_TEMPLATE: &str = "{package_name}@{package_version}";

/// Default tag template for standalone packages
pub const STANDALONE_TEMPLATE: &str = "v{package_version}";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder regex is valid"));

/// Fill `{name}` placeholders in a template.
///
/// Every occurrence of a bound placeholder is replaced. Variables whose value
/// is absent or empty are skipped, so their placeholders stay verbatim.
///
/// # Example
/// ```
/// use version_manager::domain::template::render;
///
/// assert_eq!(render("{w} is {w}.", &[("w", Some("x"))]), "x is x.");
/// assert_eq!(render("Hi {name}.", &[]), "Hi {name}.");
/// ```
pub fn render(template: &str, variables: &[(&str, Option<&str>)]) -> String {
    let mut result = template.to_string();

    for (name, value) in variables {
        match value {
            Some(value) if !value.is_empty() => {
                result = result.replace(&format!("{{{}}}", name), value);
            }
            _ => {}
        }
    }

    result
}

/// Names of `{placeholder}` tokens still present in `text`, in order of appearance
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for captures in PLACEHOLDER.captures_iter(text) {
        if let Some(name) = captures.get(1) {
            let name = name.as_str().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_repeated_placeholder() {
        assert_eq!(render("{w} is {w}.", &[("w", Some("x"))]), "x is x.");
    }

    #[test]
    fn test_render_unbound_placeholder_passes_through() {
        assert_eq!(render("Hi {name}.", &[]), "Hi {name}.");
    }

    #[test]
    fn test_render_no_variables_is_noop() {
        let template = "{package_name}@{package_version}";
        assert_eq!(render(template, &[]), template);
    }

    #[test]
    fn test_render_empty_value_is_skipped() {
        assert_eq!(
            render("{a}-{b}", &[("a", Some("")), ("b", None)]),
            "{a}-{b}"
        );
    }

    #[test]
    fn test_render_monorepo_template() {
        let tag = render(
            MONOREPO_TEMPLATE,
            &[(PACKAGE_NAME, Some("pkg-a")), (PACKAGE_VERSION, Some("1.0.2"))],
        );
        assert_eq!(tag, "pkg-a@1.0.2");
    }

    #[test]
    fn test_render_standalone_template() {
        let tag = render(
            STANDALONE_TEMPLATE,
            &[(PACKAGE_NAME, Some("root")), (PACKAGE_VERSION, Some("1.0.1"))],
        );
        assert_eq!(tag, "v1.0.1");
    }

    #[test]
    fn test_unresolved_placeholders() {
        assert_eq!(
            unresolved_placeholders("release/{scope}-{package_version}-{scope}"),
            vec!["scope".to_string(), "package_version".to_string()]
        );
        assert!(unresolved_placeholders("v1.2.3").is_empty());
    }
}
