use qry_config::QryConfig;

use crate::cli::{Commands, GlobalFlags};

pub mod catalog;
pub mod render;
pub mod schema;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, config: &QryConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Render(args) => render::handle(&args, config, flags),
        Commands::Catalog => catalog::handle(flags),
        Commands::Schema(args) => schema::handle(&args, flags),
    }
}
