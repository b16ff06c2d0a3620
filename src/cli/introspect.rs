use pg2graphql::catalog::SchemaIntrospector;
use pg2graphql::error::Result;
use pg2graphql::schema::{build_shape, TableSnapshot};

/// Run the introspect command: dump the table snapshot as JSON to stdout or
/// a file. Useful for documentation and client codegen.
pub async fn run(config_path: String, output: Option<String>) -> Result<()> {
    let config = pg2graphql::config::load_config(&config_path)?;
    super::init_tracing(config.server.log_level.as_deref());

    let pool = pg2graphql::db::connect_pool(&config.database)?;
    let tables = SchemaIntrospector::new(pool).get().await?;

    let mut snapshot = Vec::with_capacity(tables.len());
    for meta in &tables {
        match build_shape(meta) {
            Ok(shape) => snapshot.push(TableSnapshot::from(&shape)),
            Err(e) => tracing::error!("Excluding table '{}': {}", meta.table_name, e),
        }
    }

    let json = serde_json::to_string_pretty(&snapshot)?;

    if let Some(output_path) = output {
        std::fs::write(&output_path, &json)?;
        tracing::info!("Wrote table snapshot for {} tables to {}", snapshot.len(), output_path);
    } else {
        println!("{}", json);
    }

    Ok(())
}
