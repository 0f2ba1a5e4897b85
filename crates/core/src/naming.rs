//! Derivation of native-extension class names from request names.

/// Fixed suffix token appended to every derived extension class name.
pub const SERVICE_SUFFIX: &str = "Service";

/// Derive the conventional extension class name for a base request name.
///
/// The directory components become a lowercased, dot-joined namespace
/// prefix; the final component is split on `_` with each piece
/// capitalized and concatenated, then the fixed suffix is appended.
/// `"my_ext/sub_thing"` derives `"my_ext.SubThingService"`.
pub fn extension_class_name(base_name: &str) -> String {
    let components: Vec<&str> = base_name.split('/').collect();

    let mut name = String::new();
    for component in &components[..components.len() - 1] {
        name.push_str(&component.to_lowercase());
        name.push('.');
    }

    for piece in components[components.len() - 1].split('_') {
        if piece.is_empty() {
            break;
        }
        let mut chars = piece.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    name.push_str(SERVICE_SUFFIX);

    // A namespace must not begin with dots.
    name.trim_start_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_namespaced_service_name() {
        assert_eq!(
            extension_class_name("my_ext/sub_thing"),
            "my_ext.SubThingService"
        );
    }

    #[test]
    fn capitalizes_each_underscore_piece() {
        assert_eq!(extension_class_name("foo_bar_baz"), "FooBarBazService");
    }

    #[test]
    fn lowercases_namespace_components() {
        assert_eq!(extension_class_name("Acme/Widget"), "acme.WidgetService");
    }

    #[test]
    fn strips_leading_dots() {
        assert_eq!(extension_class_name("/thing"), "ThingService");
    }

    #[test]
    fn stops_at_empty_underscore_piece() {
        // A doubled underscore truncates the mangled tail, matching the
        // historical derivation rule.
        assert_eq!(extension_class_name("a__b"), "AService");
    }
}
