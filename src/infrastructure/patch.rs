use diesel::pg::{Pg, PgConnection};
use diesel::query_builder::{BoxedSqlQuery, SqlQuery};
use diesel::sql_types::{Bool, Date, Integer, Nullable, SmallInt, Text};
use diesel::{QueryResult, RunQueryDsl};

use crate::domain::patch::{FieldKind, PatchSet, PatchValue};

/// `UPDATE <table> SET a = $1, b = $2 WHERE <key> = $3`. Identifiers come
/// from the static patch schema only; every value is a bind parameter.
pub fn update_statement(patch: &PatchSet) -> String {
    let schema = patch.schema();
    let assignments = patch.assignments();
    let set = assignments
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        schema.table,
        set,
        schema.key,
        assignments.len() + 1
    )
}

/// Runs the patch and returns the number of rows it touched.
pub fn execute_patch(conn: &mut PgConnection, patch: &PatchSet) -> QueryResult<usize> {
    let mut query = diesel::sql_query(update_statement(patch)).into_boxed::<Pg>();
    for (_, value) in patch.assignments() {
        query = bind_value(query, value.clone());
    }
    query.bind::<Integer, _>(patch.id()).execute(conn)
}

fn bind_value<'f>(
    query: BoxedSqlQuery<'f, Pg, SqlQuery>,
    value: PatchValue,
) -> BoxedSqlQuery<'f, Pg, SqlQuery> {
    match value {
        PatchValue::Int(v) => query.bind::<Integer, _>(v),
        PatchValue::SmallInt(v) => query.bind::<SmallInt, _>(v),
        PatchValue::Bool(v) => query.bind::<Bool, _>(v),
        PatchValue::Text(v) => query.bind::<Text, _>(v),
        PatchValue::Date(v) => query.bind::<Date, _>(v),
        PatchValue::Null(FieldKind::Int) => query.bind::<Nullable<Integer>, _>(None::<i32>),
        PatchValue::Null(FieldKind::SmallInt) => {
            query.bind::<Nullable<SmallInt>, _>(None::<i16>)
        }
        PatchValue::Null(FieldKind::Bool) => query.bind::<Nullable<Bool>, _>(None::<bool>),
        PatchValue::Null(FieldKind::Text) => query.bind::<Nullable<Text>, _>(None::<String>),
        PatchValue::Null(FieldKind::Date) => {
            query.bind::<Nullable<Date>, _>(None::<chrono::NaiveDate>)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::patch::{ORDER_PATCH, STAFF_PATCH};

    fn patch(schema: &'static crate::domain::patch::PatchSchema, body: serde_json::Value) -> PatchSet {
        let fields = body.as_object().cloned().expect("object body");
        PatchSet::build(schema, 12, &fields).expect("valid patch")
    }

    #[test]
    fn single_field_statement() {
        let p = patch(&STAFF_PATCH, json!({"active": false}));
        assert_eq!(
            update_statement(&p),
            "UPDATE staffs SET active = $1 WHERE staff_id = $2"
        );
    }

    #[test]
    fn placeholders_follow_assignment_order() {
        let p = patch(
            &ORDER_PATCH,
            json!({"staff_id": 3, "order_status": 2, "shipped_date": null}),
        );
        assert_eq!(
            update_statement(&p),
            "UPDATE orders SET order_status = $1, shipped_date = $2, staff_id = $3 \
             WHERE order_id = $4"
        );
    }
}
