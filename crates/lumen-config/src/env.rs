use std::sync::OnceLock;

use regex::Regex;

/// Expand `{{ env.VAR }}` placeholders in raw configuration text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Comment lines are copied through untouched so a
/// commented-out secret never has to exist in the environment.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut output = input
        .lines()
        .map(expand_line)
        .collect::<Result<Vec<_>, _>>()?
        .join("\n");

    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 1: dotted key, 2: optional default("...") argument
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

fn expand_line(line: &str) -> Result<String, String> {
    if line.trim_start().starts_with('#') {
        return Ok(line.to_owned());
    }

    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder().captures_iter(line) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key
        .strip_prefix("env.")
        .filter(|name| !name.is_empty() && !name.contains('.'))
    else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[server]\nlisten_address = \"127.0.0.1:8501\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_token() {
        temp_env::with_var("LUMEN_TEST_TOKEN", Some("ya29.token"), || {
            let result = expand_env("api_key = \"{{ env.LUMEN_TEST_TOKEN }}\"").unwrap();
            assert_eq!(result, "api_key = \"ya29.token\"");
        });
    }

    #[test]
    fn substitutes_several_on_one_line() {
        let vars = [("LUMEN_A", Some("a")), ("LUMEN_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("x = \"{{env.LUMEN_A}}-{{ env.LUMEN_B }}\"").unwrap();
            assert_eq!(result, "x = \"a-b\"");
        });
    }

    #[test]
    fn unset_variable_is_an_error() {
        temp_env::with_var_unset("LUMEN_UNSET", || {
            let err = expand_env("project = \"{{ env.LUMEN_UNSET }}\"").unwrap_err();
            assert!(err.contains("LUMEN_UNSET"));
        });
    }

    #[test]
    fn default_covers_unset_variable() {
        temp_env::with_var_unset("LUMEN_LOCATION", || {
            let result = expand_env("location = \"{{ env.LUMEN_LOCATION | default(\"us-central1\") }}\"").unwrap();
            assert_eq!(result, "location = \"us-central1\"");
        });
    }

    #[test]
    fn set_variable_wins_over_default() {
        temp_env::with_var("LUMEN_LOCATION", Some("europe-west4"), || {
            let result = expand_env("location = \"{{ env.LUMEN_LOCATION | default(\"us-central1\") }}\"").unwrap();
            assert_eq!(result, "location = \"europe-west4\"");
        });
    }

    #[test]
    fn non_env_scope_is_rejected() {
        let err = expand_env("key = \"{{ secrets.TOKEN }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("LUMEN_UNSET", || {
            let input = "  # api_key = \"{{ env.LUMEN_UNSET }}\"\nmodel = \"imagegeneration@002\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
