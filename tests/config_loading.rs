use quadcell::{Bounds2D, Domain, IndexConfig, QuadCellError, RectangleCoverer};
use std::io::Write;
use tempfile::Builder;

fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_json_config() {
    let file = write_temp(
        ".json",
        r#"{
            "domain": { "min_x": 0.0, "min_y": 0.0, "max_x": 16.0, "max_y": 16.0 },
            "depth_levels": 19,
            "default_cell_budget": 4
        }"#,
    );

    let config = IndexConfig::load(file.path()).unwrap();
    assert_eq!(config.domain, Domain::new(0.0, 0.0, 16.0, 16.0).unwrap());
    assert_eq!(config.max_depth(), 18);

    let coverer = RectangleCoverer::new(config);
    let keys: Vec<String> = coverer
        .cover_rect_with_defaults(&Bounds2D::new(5.0, 5.0, 11.0, 11.0))
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert_eq!(keys, ["03", "12", "21", "30"]);
}

#[test]
fn test_saved_config_loads_back() {
    let config = IndexConfig::mercator()
        .with_depth_levels(14)
        .with_default_max_depth(10);
    let file = write_temp(".json", &config.to_json().unwrap());

    assert_eq!(IndexConfig::load(file.path()).unwrap(), config);
}

#[test]
fn test_load_rejects_invalid_domain() {
    let file = write_temp(
        ".json",
        r#"{ "domain": { "min_x": 5.0, "min_y": 0.0, "max_x": 1.0, "max_y": 16.0 } }"#,
    );
    assert!(matches!(
        IndexConfig::load(file.path()),
        Err(QuadCellError::SerializationError(_))
    ));
}

#[test]
fn test_load_errors() {
    assert!(matches!(
        IndexConfig::load("/definitely/not/here.json"),
        Err(QuadCellError::Io(_))
    ));

    let file = write_temp(".yaml", "depth_levels: 10");
    assert!(matches!(
        IndexConfig::load(file.path()),
        Err(QuadCellError::InvalidConfig(_))
    ));
}

#[cfg(feature = "toml")]
#[test]
fn test_load_toml_config() {
    let file = write_temp(
        ".toml",
        r#"
depth_levels = 12
default_cell_budget = 6

[domain]
min_x = -180.0
min_y = -90.0
max_x = 180.0
max_y = 90.0
"#,
    );

    let config = IndexConfig::load(file.path()).unwrap();
    assert_eq!(config.domain, Domain::GEOGRAPHIC);
    assert_eq!(config.depth_levels, 12);
    assert_eq!(config.default_cell_budget, 6);
    assert_eq!(config.default_max_depth, None);
}
