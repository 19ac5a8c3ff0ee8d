/// Schema for the planet cache.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS planets (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE
);
"#;
