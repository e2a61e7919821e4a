//! Statement SQL generation
//!
//! The same renderer produces parameterised SQL (`$n` placeholders plus the
//! values to bind) for execution and inlined SQL for logs and assertions.

use super::builder::Statement;
use super::types::*;
use crate::session::value::DatabaseValue;

/// Accumulates SQL text and, in parameterised mode, the bound values
struct SqlWriter {
    sql: String,
    params: Option<Vec<DatabaseValue>>,
}

impl SqlWriter {
    fn parameterised() -> Self {
        Self {
            sql: String::new(),
            params: Some(Vec::new()),
        }
    }

    fn inline() -> Self {
        Self {
            sql: String::new(),
            params: None,
        }
    }

    fn push_str(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    fn push_value(&mut self, value: &DatabaseValue) {
        match &mut self.params {
            Some(params) => {
                params.push(value.clone());
                self.sql.push_str(&format!("${}", params.len()));
            }
            None => self.sql.push_str(&format_value(value)),
        }
    }

    fn push_values(&mut self, values: &[DatabaseValue]) {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.push_value(value);
        }
    }

    fn finish(self) -> (String, Vec<DatabaseValue>) {
        (self.sql, self.params.unwrap_or_default())
    }
}

impl Statement {
    /// Generate SQL with parameter placeholders and the values to bind
    pub fn to_sql_with_params(&self) -> (String, Vec<DatabaseValue>) {
        let mut writer = SqlWriter::parameterised();
        self.write_sql(&mut writer);
        writer.finish()
    }

    /// Generate SQL with values inlined, for logging and tests
    pub fn to_sql(&self) -> String {
        let mut writer = SqlWriter::inline();
        self.write_sql(&mut writer);
        writer.finish().0
    }

    fn write_sql(&self, writer: &mut SqlWriter) {
        match self.query_type {
            QueryType::Select => self.write_select(writer),
            QueryType::Insert => self.write_insert(writer),
            QueryType::Delete => self.write_delete(writer),
        }
    }

    fn write_select(&self, writer: &mut SqlWriter) {
        writer.push_str("SELECT ");

        if self.select_fields.is_empty() {
            writer.push_str("*");
        } else {
            writer.push_str(&self.select_fields.join(", "));
        }

        if !self.from_tables.is_empty() {
            writer.push_str(" FROM ");
            writer.push_str(&self.from_tables.join(", "));
        }

        for join in &self.joins {
            writer.push_str(&format!(" {} {}", join.join_type, join.table));
            if !join.on_conditions.is_empty() {
                let conditions: Vec<String> = join
                    .on_conditions
                    .iter()
                    .map(|(left, right)| format!("{} = {}", left, right))
                    .collect();
                writer.push_str(" ON ");
                writer.push_str(&conditions.join(" AND "));
            }
        }

        self.write_where(writer);

        if !self.order_by.is_empty() {
            let order_clauses: Vec<String> = self
                .order_by
                .iter()
                .map(|(column, direction)| format!("{} {}", column, direction))
                .collect();
            writer.push_str(" ORDER BY ");
            writer.push_str(&order_clauses.join(", "));
        }

        if let Some(limit) = self.limit_count {
            writer.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset_value {
            writer.push_str(&format!(" OFFSET {}", offset));
        }
    }

    fn write_insert(&self, writer: &mut SqlWriter) {
        let Some(table) = &self.insert_table else {
            return;
        };

        writer.push_str(&format!("INSERT INTO {}", table));
        if self.set_clauses.is_empty() {
            writer.push_str(" DEFAULT VALUES");
            return;
        }

        let columns: Vec<&str> = self.set_clauses.iter().map(|c| c.column.as_str()).collect();
        writer.push_str(&format!(" ({}) VALUES (", columns.join(", ")));
        for (i, clause) in self.set_clauses.iter().enumerate() {
            if i > 0 {
                writer.push_str(", ");
            }
            match &clause.value {
                Some(value) => writer.push_value(value),
                None => writer.push_str("NULL"),
            }
        }
        writer.push_str(")");
    }

    fn write_delete(&self, writer: &mut SqlWriter) {
        if let Some(table) = &self.delete_table {
            writer.push_str(&format!("DELETE FROM {}", table));
            self.write_where(writer);
        }
    }

    fn write_where(&self, writer: &mut SqlWriter) {
        for (i, condition) in self.where_conditions.iter().enumerate() {
            writer.push_str(if i == 0 { " WHERE " } else { " AND " });
            write_condition(writer, condition);
        }
    }
}

fn write_condition(writer: &mut SqlWriter, condition: &WhereCondition) {
    let column = condition.column.as_str();

    match condition.operator {
        QueryOperator::Raw => writer.push_str(column),
        QueryOperator::IsNull | QueryOperator::IsNotNull => {
            writer.push_str(&format!("{} {}", column, condition.operator));
        }
        QueryOperator::In | QueryOperator::NotIn if condition.values.is_empty() => {
            // Empty lists are not valid SQL; IN () matches nothing, NOT IN () everything.
            writer.push_str(if condition.operator == QueryOperator::In {
                "1=-1"
            } else {
                "1=1"
            });
        }
        QueryOperator::In | QueryOperator::NotIn => {
            writer.push_str(&format!("{} {} (", column, condition.operator));
            writer.push_values(&condition.values);
            writer.push_str(")");
        }
        QueryOperator::Between => match condition.values.as_slice() {
            [start, end] => {
                writer.push_str(&format!("{} BETWEEN ", column));
                writer.push_value(start);
                writer.push_str(" AND ");
                writer.push_value(end);
            }
            _ => writer.push_str("1=-1"),
        },
        _ => {
            writer.push_str(&format!("{} {} ", column, condition.operator));
            match &condition.value {
                Some(value) => writer.push_value(value),
                None => writer.push_str("NULL"),
            }
        }
    }
}

/// Format a value as an SQL literal
pub(crate) fn format_value(value: &DatabaseValue) -> String {
    match value {
        DatabaseValue::Null => "NULL".to_string(),
        DatabaseValue::Bool(b) => b.to_string(),
        DatabaseValue::Int32(i) => i.to_string(),
        DatabaseValue::Int64(i) => i.to_string(),
        DatabaseValue::Float32(f) => f.to_string(),
        DatabaseValue::Float64(f) => f.to_string(),
        DatabaseValue::String(s) => quote(s),
        DatabaseValue::Bytes(bytes) => {
            let hex: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            format!("'\\x{}'", hex)
        }
        DatabaseValue::Uuid(u) => quote(&u.to_string()),
        DatabaseValue::DateTime(dt) => quote(&dt.to_rfc3339()),
        DatabaseValue::NaiveDateTime(dt) => quote(&dt.to_string()),
        DatabaseValue::Date(d) => quote(&d.to_string()),
        DatabaseValue::Time(t) => quote(&t.to_string()),
        DatabaseValue::Json(j) => quote(&j.to_string()),
        DatabaseValue::Array(values) => {
            let items: Vec<String> = values.iter().map(format_value).collect();
            format!("ARRAY[{}]", items.join(", "))
        }
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterised_select_numbers_placeholders() {
        let statement = Statement::new()
            .select("users.*")
            .from("users")
            .where_eq("users.status", "active")
            .where_in("users.id", vec![1, 2, 3])
            .where_between("users.age", 18, 30);

        let (sql, params) = statement.to_sql_with_params();
        assert_eq!(
            sql,
            "SELECT users.* FROM users WHERE users.status = $1 AND users.id IN ($2, $3, $4) AND users.age BETWEEN $5 AND $6"
        );
        assert_eq!(params.len(), 6);
        assert_eq!(params[0], DatabaseValue::from("active"));
        assert_eq!(params[5], DatabaseValue::Int32(30));
    }

    #[test]
    fn test_inline_select_escapes_strings() {
        let statement = Statement::new()
            .from("users")
            .where_eq("name", "O'Brien")
            .where_null("deleted_at");

        assert_eq!(
            statement.to_sql(),
            "SELECT * FROM users WHERE name = 'O''Brien' AND deleted_at IS NULL"
        );
    }

    #[test]
    fn test_raw_condition_is_verbatim() {
        let statement = Statement::new().from("users").where_raw("1=-1");
        assert_eq!(statement.to_sql(), "SELECT * FROM users WHERE 1=-1");
    }

    #[test]
    fn test_joins_render_before_where() {
        let statement = Statement::new()
            .select("posts.*")
            .from("posts")
            .join("users", "users.id", "posts.user_id")
            .where_eq("users.email", "a@b.c");

        assert_eq!(
            statement.to_sql(),
            "SELECT posts.* FROM posts INNER JOIN users ON users.id = posts.user_id WHERE users.email = 'a@b.c'"
        );
    }

    #[test]
    fn test_left_join_with_ordering_and_window() {
        let statement = Statement::new()
            .select("users.*")
            .from("users")
            .left_join("posts", "posts.user_id", "users.id")
            .where_gte("users.age", 18)
            .order_by("users.email")
            .order_by_desc("users.id")
            .limit(20)
            .offset(40);

        assert_eq!(
            statement.to_sql(),
            "SELECT users.* FROM users LEFT JOIN posts ON posts.user_id = users.id \
             WHERE users.age >= 18 ORDER BY users.email ASC, users.id DESC LIMIT 20 OFFSET 40"
        );
    }

    #[test]
    fn test_insert_and_delete() {
        let insert = Statement::new()
            .insert_into("users")
            .set("email", "a@b.c")
            .set_null("nickname");
        assert_eq!(
            insert.to_sql_with_params(),
            (
                "INSERT INTO users (email, nickname) VALUES ($1, NULL)".to_string(),
                vec![DatabaseValue::from("a@b.c")]
            )
        );

        let delete = Statement::new().delete_from("users").where_eq("id", 5);
        assert_eq!(delete.to_sql(), "DELETE FROM users WHERE id = 5");
    }

    #[test]
    fn test_empty_lists_render_as_constant_predicates() {
        let empty: Vec<i32> = Vec::new();
        let statement = Statement::new()
            .from("users")
            .where_in("id", empty.clone())
            .where_not_in("id", empty);

        assert_eq!(statement.to_sql(), "SELECT * FROM users WHERE 1=-1 AND 1=1");
    }
}
