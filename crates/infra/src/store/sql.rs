//! Statement builders.
//!
//! Identifiers come from `ResourceSpec` statics; every value is a bound
//! parameter.

use sqlx::{Postgres, QueryBuilder};

use travelhub_core::{Column, ColumnKind, FieldSet, FieldValue, ResourceSpec};

pub type Builder = QueryBuilder<'static, Postgres>;

/// Bind `value` with the SQL type of `column` (so `NULL`s are typed too).
pub fn push_value(qb: &mut Builder, column: &Column, value: &FieldValue) {
    match (value, column.kind) {
        (FieldValue::Null, ColumnKind::Integer) => qb.push_bind(None::<i64>),
        (FieldValue::Null, ColumnKind::Float) => qb.push_bind(None::<f64>),
        (FieldValue::Null, ColumnKind::Boolean) => qb.push_bind(None::<bool>),
        (FieldValue::Null, ColumnKind::Text | ColumnKind::OneOf(_)) => qb.push_bind(None::<String>),
        (FieldValue::Integer(v), ColumnKind::Float) => qb.push_bind(*v as f64),
        (FieldValue::Integer(v), _) => qb.push_bind(*v),
        (FieldValue::Float(v), _) => qb.push_bind(*v),
        (FieldValue::Bool(v), _) => qb.push_bind(*v),
        (FieldValue::Text(v), _) => qb.push_bind(v.clone()),
    };
}

fn push_select_list(qb: &mut Builder, spec: &ResourceSpec) {
    qb.push("SELECT ");
    qb.push(spec.id_column);
    for column in spec.columns {
        qb.push(", ");
        qb.push(column.name);
    }
    qb.push(" FROM ");
    qb.push(spec.table);
}

/// `INSERT ... RETURNING <id>` over the supplied columns only, so store
/// defaults apply to everything else.
pub fn insert(spec: &ResourceSpec, fields: &FieldSet) -> Builder {
    let mut qb = QueryBuilder::new("INSERT INTO ");
    qb.push(spec.table);

    if fields.is_empty() {
        qb.push(" DEFAULT VALUES");
    } else {
        qb.push(" (");
        {
            let mut names = qb.separated(", ");
            for (column, _) in fields.iter() {
                names.push(column.name);
            }
        }
        qb.push(") VALUES (");
        for (i, (column, value)) in fields.iter().enumerate() {
            if i > 0 {
                qb.push(", ");
            }
            push_value(&mut qb, column, value);
        }
        qb.push(")");
    }

    qb.push(" RETURNING ");
    qb.push(spec.id_column);
    qb
}

/// Partial update: one `SET` assignment per supplied column.
///
/// Callers must not pass an empty set.
pub fn update(spec: &ResourceSpec, id: i64, changes: &FieldSet) -> Builder {
    let mut qb = QueryBuilder::new("UPDATE ");
    qb.push(spec.table);
    qb.push(" SET ");
    for (i, (column, value)) in changes.iter().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(column.name);
        qb.push(" = ");
        push_value(&mut qb, column, value);
    }
    qb.push(" WHERE ");
    qb.push(spec.id_column);
    qb.push(" = ");
    qb.push_bind(id);
    qb
}

pub fn select_all(spec: &ResourceSpec, window: Option<(i64, i64)>) -> Builder {
    let mut qb = QueryBuilder::new("");
    push_select_list(&mut qb, spec);
    qb.push(" ORDER BY ");
    qb.push(spec.id_column);
    if let Some((limit, offset)) = window {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);
    }
    qb
}

pub fn select_one(spec: &ResourceSpec, id: i64) -> Builder {
    let mut qb = QueryBuilder::new("");
    push_select_list(&mut qb, spec);
    qb.push(" WHERE ");
    qb.push(spec.id_column);
    qb.push(" = ");
    qb.push_bind(id);
    qb
}

pub fn select_by(spec: &ResourceSpec, column: &Column, value: &FieldValue) -> Builder {
    let mut qb = QueryBuilder::new("");
    push_select_list(&mut qb, spec);
    qb.push(" WHERE ");
    qb.push(column.name);
    qb.push(" = ");
    push_value(&mut qb, column, value);
    qb.push(" ORDER BY ");
    qb.push(spec.id_column);
    qb.push(" LIMIT 1");
    qb
}

pub fn exists(spec: &ResourceSpec, id: i64) -> Builder {
    let mut qb = QueryBuilder::new("SELECT EXISTS (SELECT 1 FROM ");
    qb.push(spec.table);
    qb.push(" WHERE ");
    qb.push(spec.id_column);
    qb.push(" = ");
    qb.push_bind(id);
    qb.push(")");
    qb
}

pub fn column_values(spec: &ResourceSpec, column: &Column) -> Builder {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(column.name);
    qb.push(" FROM ");
    qb.push(spec.table);
    qb.push(" ORDER BY ");
    qb.push(spec.id_column);
    qb
}

pub fn delete(spec: &ResourceSpec, id: i64) -> Builder {
    let mut qb = QueryBuilder::new("DELETE FROM ");
    qb.push(spec.table);
    qb.push(" WHERE ");
    qb.push(spec.id_column);
    qb.push(" = ");
    qb.push_bind(id);
    qb
}
