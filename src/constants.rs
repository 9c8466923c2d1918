/// Schema version stored in the metadata table.
///
/// Bump this whenever the table layout changes in a way older binaries
/// cannot read. The serve command refuses to start on a mismatch.
pub const EXPECTED_DB_VERSION: &str = "1";
