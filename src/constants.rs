/// Dataset keys used by the bundled organisation JSON.
/// These are the exact (case-sensitive) keys of each record object.

// Filterable fields
pub const MAIN_CATEGORY_FIELD: &str = "MainCategory";
pub const SUB_CATEGORY_FIELD: &str = "SubCategory";
pub const TARGET_GROUP_FIELD: &str = "TargetGroup";
pub const SUB_TARGET_GROUP_FIELD: &str = "SubTargetGroup";
pub const REGION_FIELD: &str = "Region";

// Display-only fields
pub const NAME_FIELD: &str = "Name";
pub const DESCRIPTION_FIELD: &str = "Description";
pub const WEBSITE_FIELD: &str = "Website";
pub const IMAGES_FIELD: &str = "Images";

// Environment variables
pub const CONFIG_PATH_ENV: &str = "SUPPORT_FINDER_CONFIG";
pub const DATASET_PATH_ENV: &str = "SUPPORT_FINDER_DATASET";
pub const LOG_DIR_ENV: &str = "SUPPORT_FINDER_LOG_DIR";

// Defaults
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_DATASET_PATH: &str = "data/orgs.json";
pub const DEFAULT_LOG_DIR: &str = "logs";
pub const LOG_FILE_NAME: &str = "support_finder.log";

// Top-level section holding the two-level category tree
pub const AREA_OF_SUPPORT_SECTION: &str = "Area of Support";

/// Get all filterable field names, in the order filtering checks them
pub fn get_default_filter_fields() -> Vec<&'static str> {
    vec![
        MAIN_CATEGORY_FIELD,
        SUB_CATEGORY_FIELD,
        TARGET_GROUP_FIELD,
        SUB_TARGET_GROUP_FIELD,
        REGION_FIELD,
    ]
}
