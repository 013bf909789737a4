use sqlx::SqlitePool;

use crate::models::ToDoRecord;

/// Quotes a binding target such as `dbo.ToDo` as a single SQLite identifier.
fn quote_table(table: &str) -> String {
    format!("\"{}\"", table.replace('"', "\"\""))
}

/// Inserts `record`, replacing the row that already carries its `Id`.
pub async fn upsert_todo(
    db: &SqlitePool,
    table: &str,
    record: &ToDoRecord,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        r#"
        INSERT INTO {}
            (Id, title, completed, url)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(Id) DO UPDATE SET
            title = excluded.title,
            completed = excluded.completed,
            url = excluded.url
        "#,
        quote_table(table)
    );

    sqlx::query(&sql)
        .bind(&record.id)
        .bind(&record.title)
        .bind(record.completed)
        .bind(&record.url)
        .execute(db)
        .await?;

    Ok(())
}

pub async fn fetch_todos(db: &SqlitePool, table: &str) -> Result<Vec<ToDoRecord>, sqlx::Error> {
    let sql = format!(
        "SELECT Id, title, completed, url FROM {} ORDER BY rowid",
        quote_table(table)
    );

    sqlx::query_as::<_, ToDoRecord>(&sql).fetch_all(db).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_dotted_table_as_one_identifier() {
        assert_eq!(quote_table("dbo.ToDo"), "\"dbo.ToDo\"");
        assert_eq!(quote_table("we\"ird"), "\"we\"\"ird\"");
    }
}
