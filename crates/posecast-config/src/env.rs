use std::sync::OnceLock;

use regex::Regex;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("fallback") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw configuration text
///
/// A placeholder may carry a fallback, `{{ env.VAR | default("x") }}`, used
/// when the variable is unset. Lines that are TOML comments are copied
/// through untouched so commented-out secrets never have to exist.
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
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
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
        let input = "[tts]\noutput_dir = \"generated/audio\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn expands_api_key() {
        temp_env::with_var("ELEVEN_LABS_API_KEY", Some("xi-123"), || {
            let result = expand_env("api_key = \"{{ env.ELEVEN_LABS_API_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"xi-123\"");
        });
    }

    #[test]
    fn expands_several_on_one_line() {
        temp_env::with_vars([("HOST", Some("localhost")), ("PORT", Some("8000"))], || {
            let result = expand_env("listen_address = \"{{ env.HOST }}:{{ env.PORT }}\"").unwrap();
            assert_eq!(result, "listen_address = \"localhost:8000\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("FAL_KEY", || {
            let err = expand_env("api_key = \"{{ env.FAL_KEY }}\"").unwrap_err();
            assert!(err.contains("FAL_KEY"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("ELEVEN_LABS_API_KEY", || {
            let result = expand_env("api_key = \"{{ env.ELEVEN_LABS_API_KEY | default(\"\") }}\"").unwrap();
            assert_eq!(result, "api_key = \"\"");
        });

        temp_env::with_var("ELEVEN_LABS_API_KEY", Some("set"), || {
            let result = expand_env("api_key = \"{{ env.ELEVEN_LABS_API_KEY | default(\"\") }}\"").unwrap();
            assert_eq!(result, "api_key = \"set\"");
        });
    }

    #[test]
    fn unscoped_key_is_rejected() {
        let err = expand_env("key = \"{{ secrets.TOKEN }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("OPENAI_API_KEY", || {
            let input = "  # api_key = \"{{ env.OPENAI_API_KEY }}\"\nmodel = \"gpt-4o-mini\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
