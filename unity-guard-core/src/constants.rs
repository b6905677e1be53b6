//! Constants for the Unity YAML document stream
//!
//! Unity-specific tokens, directives and class identifiers used
//! throughout the checking process.

/// Token every Unity YAML file must begin with
pub const FORMAT_HEADER_TOKEN: &str = "%YAML";

/// Tag directive declaring Unity's class-tag namespace
pub const TAG_DIRECTIVE: &str = "%TAG !u! tag:unity3d.com";

/// Unity YAML tag URI
pub const UNITY_TAG_URI: &str = "tag:unity3d.com,2011:";

/// Prefix of every document marker line, e.g. `--- !u!1 &100`
pub const DOCUMENT_MARKER_PREFIX: &str = "--- !u!";

/// Reserved fileID meaning "no object"
pub const NULL_FILE_ID: &str = "0";

/// Number of hex digits in an asset GUID
pub const GUID_LENGTH: usize = 32;

/// Extensions of Unity files that carry a YAML document stream
pub const UNITY_FILE_EXTENSIONS: &[&str] = &["unity", "prefab", "asset"];

/// Returns true if `id` is the null fileID sentinel.
///
/// References to `0` are how Unity serializes an empty object field, so
/// they never point at a document.
pub fn is_null_file_id(id: &str) -> bool {
    id == NULL_FILE_ID
}

/// Returns true if `value` is exactly 32 hexadecimal characters
pub fn is_valid_guid(value: &str) -> bool {
    value.len() == GUID_LENGTH && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Get the Unity class name for a numeric class tag.
///
/// Covers the classes that show up in scene, prefab and asset streams;
/// unknown ids return `None`.
pub fn class_name_for(class_id: &str) -> Option<&'static str> {
    let name = match class_id.parse::<i64>().ok()? {
        1 => "GameObject",
        4 => "Transform",
        20 => "Camera",
        21 => "Material",
        23 => "MeshRenderer",
        29 => "OcclusionCullingSettings",
        33 => "MeshFilter",
        54 => "Rigidbody",
        64 => "MeshCollider",
        65 => "BoxCollider",
        81 => "AudioListener",
        82 => "AudioSource",
        95 => "Animator",
        104 => "RenderSettings",
        108 => "Light",
        114 => "MonoBehaviour",
        135 => "SphereCollider",
        136 => "CapsuleCollider",
        157 => "LightmapSettings",
        196 => "NavMeshSettings",
        212 => "SpriteRenderer",
        222 => "CanvasRenderer",
        223 => "Canvas",
        224 => "RectTransform",
        1001 => "PrefabInstance",
        1660057539 => "SceneRoots",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_file_id() {
        assert!(is_null_file_id("0"));
        assert!(!is_null_file_id("00"));
        assert!(!is_null_file_id("17"));
    }

    #[test]
    fn test_guid_shape() {
        assert!(is_valid_guid("0123456789abcdef0123456789abcdef"));
        assert!(is_valid_guid("0123456789ABCDEF0123456789ABCDEF"));
        assert!(!is_valid_guid("0123456789abcdef0123456789abcde"));
        assert!(!is_valid_guid("0123456789abcdef0123456789abcdef0"));
        assert!(!is_valid_guid("0123456789abcdef0123456789abcdeg"));
        assert!(!is_valid_guid(""));
    }

    #[test]
    fn test_class_names() {
        assert_eq!(class_name_for("1"), Some("GameObject"));
        assert_eq!(class_name_for("1001"), Some("PrefabInstance"));
        assert_eq!(class_name_for("999999"), None);
        assert_eq!(class_name_for("abc"), None);
    }
}
