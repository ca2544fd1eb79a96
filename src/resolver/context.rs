use crate::domain::{VersionComponents, VersionRule};
use crate::git::RepositoryFacts;
use crate::resolver::matcher::MatchedRef;
use std::collections::HashMap;

/// Assemble the substitution context for one resolution.
///
/// Construction order matters: user properties may override the base
/// project keys, but every key the engine writes afterwards wins over
/// a colliding property.
pub fn build(
    nominal_version: &str,
    properties: &HashMap<String, String>,
    facts: &RepositoryFacts,
    matched: &MatchedRef,
    tag_rules: &[VersionRule],
) -> HashMap<String, String> {
    let mut context = HashMap::new();

    // 1. nominal project version
    context.insert("version".to_string(), nominal_version.to_string());
    context.insert(
        "version.release".to_string(),
        nominal_version
            .strip_suffix("-SNAPSHOT")
            .unwrap_or(nominal_version)
            .to_string(),
    );

    // 2. user-supplied static properties
    for (key, value) in properties {
        context.insert(key.clone(), value.clone());
    }

    // 3. commit info; the commit may be a provided override, so the
    // truncation must stay char-boundary safe
    let commit = &facts.commit;
    let short: String = commit.chars().take(7).collect();
    context.insert("commit".to_string(), commit.clone());
    context.insert("commit.short".to_string(), short);

    // 4. the matched ref's own key, prefix stripped
    context.insert(
        matched.ref_type.as_str().to_string(),
        matched.stripped_name().to_string(),
    );

    // 5. capture groups from the match against the un-stripped ref name
    for (key, value) in &matched.captures {
        context.insert(key.clone(), value.clone());
    }

    // 6. last tag, expanded when a tag rule recognizes it
    if let Some(last_tag) = &facts.last_tag {
        context.insert("lastTag".to_string(), last_tag.clone());

        if let Some(rule) = tag_rules.iter().find(|rule| rule.matches(last_tag)) {
            expand_version_information(&mut context, "lastTag", rule.strip_prefix(last_tag));

            if let Some(describe) = facts
                .last_tag_describe
                .as_deref()
                .and_then(crate::domain::DescribeFacts::parse)
            {
                context.insert(
                    "lastTag.commitCount".to_string(),
                    describe.distance.to_string(),
                );
            }
        }
    }

    // 7. nominal version expansion, only when its numeric triple parsed
    if VersionComponents::parse_strict(nominal_version).is_some() {
        expand_version_information(&mut context, "version", nominal_version);
    }

    context
}

/// Expand parsed version components of `text` into
/// `<key>.majorVersion` .. `<key>.nextBuildNumber`. Empty text expands
/// to nothing.
pub fn expand_version_information(context: &mut HashMap<String, String>, key: &str, text: &str) {
    if text.is_empty() {
        return;
    }

    let components = VersionComponents::parse(text);
    context.insert(
        format!("{}.majorVersion", key),
        components.major.to_string(),
    );
    context.insert(
        format!("{}.minorVersion", key),
        components.minor.to_string(),
    );
    context.insert(
        format!("{}.incrementalVersion", key),
        components.incremental.to_string(),
    );
    context.insert(
        format!("{}.buildNumber", key),
        components.build_number.to_string(),
    );
    context.insert(format!("{}.qualifier", key), components.qualifier.clone());
    context.insert(
        format!("{}.nextMajorVersion", key),
        components.next_major().to_string(),
    );
    context.insert(
        format!("{}.nextMinorVersion", key),
        components.next_minor().to_string(),
    );
    context.insert(
        format!("{}.nextIncrementalVersion", key),
        components.next_incremental().to_string(),
    );
    context.insert(
        format!("{}.nextBuildNumber", key),
        components.next_build_number().to_string(),
    );
}

/// The key prefix to compose the describe base version from:
/// `version` when its components were expanded, else `lastTag`.
pub fn base_key(context: &HashMap<String, String>) -> Option<&'static str> {
    if context.contains_key("version.majorVersion") {
        Some("version")
    } else if context.contains_key("lastTag.majorVersion") {
        Some("lastTag")
    } else {
        None
    }
}

/// Compose `major.minor.incremental` from the expanded components of
/// the given base key
pub fn compose_base(context: &HashMap<String, String>, key: &str) -> Option<String> {
    Some(format!(
        "{}.{}.{}",
        context.get(&format!("{}.majorVersion", key))?,
        context.get(&format!("{}.minorVersion", key))?,
        context.get(&format!("{}.incrementalVersion", key))?,
    ))
}
