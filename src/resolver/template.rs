use crate::error::{GitVersioningError, Result};
use regex::Regex;
use std::collections::HashMap;

/// Expand every `${key}` placeholder in the template with the context's
/// value for that key.
///
/// A placeholder referencing a key absent from the context is a
/// configuration error, not a transient one.
pub fn render(template: &str, context: &HashMap<String, String>) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([^}]+)\}")
        .map_err(|e| GitVersioningError::pattern(e.to_string()))?;

    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    for captures in placeholder.captures_iter(template) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        let value = context.get(key.as_str()).ok_or_else(|| {
            GitVersioningError::MissingPlaceholder {
                key: key.as_str().to_string(),
            }
        })?;

        output.push_str(&template[cursor..whole.start()]);
        output.push_str(value);
        cursor = whole.end();
    }
    output.push_str(&template[cursor..]);

    Ok(output)
}

/// Replace path separators with hyphens - ref names may legally contain
/// `/`, which is illegal in a version string.
pub fn escape(version: &str) -> String {
    version.replace('/', "-")
}
