use std::{
    collections::HashMap,
    fs,
    path::PathBuf,
};

use regex::Regex;

use crate::core::BunpoError;

/// Candidate locations for a named template, checked in order. A name with
/// a path separator is resolved under the email root directly.
fn template_paths(name: &str) -> Vec<PathBuf> {
    let root = PathBuf::from("assets/emails");
    let filename = format!("{}.html", name);

    let mut paths = vec![root.join("billing").join(&filename), root.join("templates").join(&filename)];
    if name.contains('/') {
        paths.push(root.join(&filename));
    }
    paths
}

pub fn load_template(name: &str) -> Result<String, BunpoError> {
    for path in template_paths(name) {
        if let Ok(contents) = fs::read_to_string(&path) {
            return Ok(contents);
        }
    }
    Err(BunpoError::MissingTemplate(name.to_string()))
}

/// Replaces every `{{ key }}` occurrence (whitespace optional) with its
/// value. Unknown placeholders are left untouched.
pub fn replace_variables(template: &str, variables: &HashMap<String, String>) -> String {
    variables.iter().fold(template.to_string(), |acc, (key, value)| {
        match Regex::new(&format!(r"\{{\{{\s*{}\s*\}}\}}", regex::escape(key))) {
            Ok(re) => re.replace_all(&acc, value.as_str()).to_string(),
            Err(e) => {
                eprintln!("Bad template variable {}: {}", key, e);
                acc
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn replaces_with_and_without_inner_whitespace() {
        let template = "Hi {{name}}, your plan is {{ plan }}.";
        let result = replace_variables(template, &vars(&[("name", "Kei"), ("plan", "Plus")]));
        assert_eq!(result, "Hi Kei, your plan is Plus.");
    }

    #[test]
    fn repeated_placeholders_all_replaced() {
        let result = replace_variables("{{x}} and {{x}}", &vars(&[("x", "y")]));
        assert_eq!(result, "y and y");
    }

    #[test]
    fn unknown_placeholders_survive() {
        let result = replace_variables("{{known}} {{unknown}}", &vars(&[("known", "ok")]));
        assert_eq!(result, "ok {{unknown}}");
    }

    #[test]
    fn subscription_template_loads_and_renders() {
        let raw = load_template("subscription-confirmed").unwrap();
        let rendered = replace_variables(
            &raw,
            &vars(&[
                ("name", "Kei"),
                ("plan", "Master"),
                ("features", "<li>Full grammar catalog</li>"),
            ]),
        );

        assert!(rendered.contains("Welcome to bunpo100, Kei!"));
        assert!(rendered.contains("<li>Full grammar catalog</li>"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn missing_template_is_an_error() {
        let err = load_template("does-not-exist").unwrap_err();
        assert!(matches!(err, BunpoError::MissingTemplate(name) if name == "does-not-exist"));
    }
}
