/// Renders a value as a PostgreSQL quoted identifier.
///
/// DDL cannot take bind parameters, so every name spliced into a statement
/// goes through here: the value is wrapped in double quotes and embedded
/// double quotes are doubled.
pub fn quote_identifier(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
