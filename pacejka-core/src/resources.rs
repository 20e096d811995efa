use include_dir::{include_dir, Dir};

use crate::imports::*;

pub const RESOURCES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/resources");

/// Sorted file names directly under `subdir` of the bundled resources.
/// An unknown `subdir` has no files.
pub fn list_resources<P: AsRef<Path>>(subdir: P) -> Vec<String> {
    let mut file_names: Vec<String> = RESOURCES_DIR
        .get_dir(subdir.as_ref())
        .map(|dir| {
            dir.files()
                .filter_map(|f| f.path().file_name()?.to_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();
    file_names.sort();
    file_names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tyre::TyreCoefficients;

    #[test]
    fn test_list_resources() {
        let result = list_resources("coeffs");
        assert_eq!(result, vec!["bakker.yaml", "simple.yaml"]);
        assert!(list_resources("no_such_dir").is_empty());
    }

    #[test]
    fn test_bundled_coefficients_load_into_their_schema() {
        let simple = TyreCoefficients::from_resource("coeffs/simple.yaml").unwrap();
        assert_eq!(simple.variant_name(), "simple");
        let bakker = TyreCoefficients::from_resource("coeffs/bakker.yaml").unwrap();
        assert_eq!(bakker.variant_name(), "bakker");
    }
}
