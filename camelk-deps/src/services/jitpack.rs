//! Translation of source-hosting shorthands into Jitpack coordinates

use camelk_core::domain::{Dependency, parse_gav};

pub const JITPACK_REPOSITORY_URL: &str = "https://jitpack.io";

/// Version Jitpack builds when a coordinate does not pin one
pub const JITPACK_DEFAULT_VERSION: &str = "main-SNAPSHOT";

const HOST_GROUPS: [(&str, &str); 5] = [
    ("github:", "com.github."),
    ("gitlab:", "com.gitlab."),
    ("bitbucket:", "org.bitbucket."),
    ("gitee:", "com.gitee."),
    ("azure:", "com.azure."),
];

/// Map `github:<user>/<repo>[/<version>]` and its siblings for other hosts
/// to a Maven dependency, or `None` when the identifier is not one.
pub fn to_dependency(id: &str, default_version: &str) -> Option<Dependency> {
    let (prefix, group) = HOST_GROUPS.iter().find(|(prefix, _)| id.starts_with(prefix))?;
    let path = &id[prefix.len()..];
    if path.is_empty() {
        return None;
    }

    let gav = format!("{group}{}", path.replace('/', ":"));
    let mut dependency = parse_gav(&gav).ok()?;
    if dependency.version.is_empty() {
        dependency.version = default_version.to_string();
    }
    Some(dependency)
}
