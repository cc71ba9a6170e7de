//! Lookup of prebuilt single-component integration images

use tracing::debug;

use camelk_core::config::ImageConfig;
use camelk_core::infrastructure::RuntimeCatalog;

/// Dependencies every integration image already carries
fn is_standard_dependency(dependency: &str) -> bool {
    matches!(
        dependency,
        "camel:core" | "camel-k:runtime" | "camel-k:knative" | "camel:knative"
    ) || dependency.starts_with("camel-k:loader-")
}

/// Image prebuilt for an integration that needs a single Camel component
/// on top of the standard ones, `None` when there is no such image.
///
/// Anything outside the `camel:` form rules a prebuilt image out.
pub fn lookup_predefined_image<I, S>(
    catalog: &RuntimeCatalog,
    dependencies: I,
    images: &ImageConfig,
) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut component: Option<String> = None;
    for dependency in dependencies {
        let dependency = dependency.as_ref();
        if is_standard_dependency(dependency) {
            continue;
        }
        let name = dependency.strip_prefix("camel:")?;
        if component.replace(name.to_string()).is_some() {
            return None;
        }
    }

    let component = component?;
    if !catalog.has_artifact(&component) {
        debug!(%component, "No catalog artifact for predefined image");
        return None;
    }
    Some(format!(
        "{}:{}-{component}",
        images.repository,
        catalog.runtime_version()
    ))
}
