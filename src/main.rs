//! Binary entry point: load configuration, bring up logging and the database,
//! and report how many rows each table holds. Editors embed the library and
//! call [`LibraryStore`] directly; this binary is the bootstrap check.
use library_catalog::{logging, LibraryConfig, LibraryStore};
use log::info;

fn main() -> anyhow::Result<()> {
    let config = LibraryConfig::load()?;
    logging::init(&config.logging);

    let store = LibraryStore::open(config.database)?;
    for (kind, count) in store.counts()? {
        info!("{}: {count} rows", kind.table());
    }
    Ok(())
}
