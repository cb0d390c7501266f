//! JSON chart-spec output

use std::io::{self, Write};

use crate::report::Dashboard;

pub fn write<W: Write>(writer: &mut W, dashboard: &Dashboard) -> io::Result<()> {
    let json = serde_json::to_string_pretty(dashboard)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}
