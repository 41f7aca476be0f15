/// Well-known framebuffer names.
///
/// Default names used by the built-in render stages when looking up
/// framebuffers in the registry.

use crate::resource::{ResourceName, DEFAULT_NAMESPACE};

fn buffer(path: &'static str) -> ResourceName {
    ResourceName::from_static(DEFAULT_NAMESPACE, path)
}

/// Main scene framebuffer (`galaxy3d:main`)
pub fn main() -> ResourceName {
    buffer("main")
}

/// First-person (hand/held item) pass
pub fn first_person() -> ResourceName {
    buffer("first_person")
}

/// Deferred geometry buffer
pub fn deferred() -> ResourceName {
    buffer("deferred")
}

/// Resolved deferred output
pub fn deferred_final() -> ResourceName {
    buffer("deferred_final")
}

/// Transparent geometry
pub fn transparent() -> ResourceName {
    buffer("transparent")
}

/// Resolved transparent output
pub fn transparent_final() -> ResourceName {
    buffer("transparent_final")
}

/// Light accumulation
pub fn light() -> ResourceName {
    buffer("light")
}

/// Post-processing output
pub fn post() -> ResourceName {
    buffer("post")
}

/// Every built-in name
pub fn all() -> Vec<ResourceName> {
    vec![
        main(),
        first_person(),
        deferred(),
        deferred_final(),
        transparent(),
        transparent_final(),
        light(),
        post(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_names_are_namespaced() {
        assert_eq!(main().to_string(), "galaxy3d:main");
        assert_eq!(deferred_final().to_string(), "galaxy3d:deferred_final");
        assert!(all().iter().all(|n| n.namespace() == DEFAULT_NAMESPACE));
    }

    #[test]
    fn test_built_in_names_are_unique() {
        let names = all();
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
