use mortgage_planner_core::PlannerConfig;

/// Load planner configuration, or the built-in defaults when no path is given.
///
/// Files ending in `.json` are parsed as JSON; anything else as YAML.
pub fn load_config(path: Option<&str>) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(PlannerConfig::default());
    };

    let (canonical, contents) = super::file::read_to_string(path)?;
    let is_json = canonical
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        PlannerConfig::from_json(&contents)?
    } else {
        let config: PlannerConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
        config.validate()?;
        config
    };

    tracing::info!(
        path = %canonical.display(),
        products = config.catalog.products.len(),
        "loaded planner config"
    );
    Ok(config)
}
