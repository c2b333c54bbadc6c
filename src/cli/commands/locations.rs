//! Supported-locations listing.

use crate::config::SUPPORTED_LOCATIONS;

pub fn cmd_locations() -> anyhow::Result<()> {
    for location in SUPPORTED_LOCATIONS {
        println!("{}", location);
    }
    Ok(())
}
