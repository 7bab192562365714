use crate::schema::{ColumnType, Index, TableSchema};

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.col_type {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Boolean => "INTEGER",
        };

        let pk = if col.is_primary_key() {
            " PRIMARY KEY AUTOINCREMENT"
        } else {
            ""
        };
        let null_constraint = if !col.nullable && !col.is_primary_key() {
            " NOT NULL"
        } else {
            ""
        };
        let unique = if col.unique { " UNIQUE" } else { "" };
        let default = col
            .default
            .map(|literal| format!(" DEFAULT {}", literal))
            .unwrap_or_default();

        columns.push(format!(
            "    {} {}{}{}{}{}",
            col.name, sql_type, pk, null_constraint, unique, default
        ));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns and explicit indexes
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    let fk_indexes = schema.foreign_keys.iter().map(|fk| {
        format!(
            "CREATE INDEX idx_{}_{} ON {}({})",
            schema.name, fk.column, schema.name, fk.column
        )
    });

    let explicit = schema
        .indexes
        .iter()
        .map(|index| generate_index(schema.name, index));

    fk_indexes.chain(explicit).collect()
}

fn generate_index(table: &str, index: &Index) -> String {
    let (kind, prefix) = if index.unique {
        ("UNIQUE INDEX", "uidx")
    } else {
        ("INDEX", "idx")
    };

    let mut sql = format!(
        "CREATE {} {}_{}_{} ON {}({})",
        kind,
        prefix,
        table,
        index.columns.join("_"),
        table,
        index.columns.join(", ")
    );

    if let Some(condition) = index.filter {
        sql.push_str(" WHERE ");
        sql.push_str(condition);
    }

    sql
}
