//! Partial updates: a sparse JSON object validated against a static
//! per-entity allow-list of columns.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::catalog::ensure_name;
use super::errors::{ensure_non_negative, ensure_positive, DomainError};
use super::party::ensure_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    SmallInt,
    Bool,
    Text,
    Date,
}

/// Value rule a column enforces on top of its type, the same one the
/// entity's full-update input applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Any,
    Name,
    Email,
    Positive,
    NonNegative,
}

#[derive(Debug)]
pub struct PatchField {
    pub column: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub rule: Rule,
}

/// Table, key column and the columns a patch may touch.
#[derive(Debug)]
pub struct PatchSchema {
    pub table: &'static str,
    pub key: &'static str,
    pub entity: &'static str,
    pub fields: &'static [PatchField],
}

impl PatchSchema {
    fn field(&self, name: &str) -> Option<&'static PatchField> {
        self.fields.iter().find(|f| f.column == name)
    }

    fn position(&self, column: &str) -> usize {
        self.fields
            .iter()
            .position(|f| f.column == column)
            .unwrap_or(usize::MAX)
    }
}

const fn field(column: &'static str, kind: FieldKind) -> PatchField {
    checked(column, kind, Rule::Any)
}

const fn checked(column: &'static str, kind: FieldKind, rule: Rule) -> PatchField {
    PatchField {
        column,
        kind,
        nullable: false,
        rule,
    }
}

const fn nullable(column: &'static str, kind: FieldKind) -> PatchField {
    PatchField {
        column,
        kind,
        nullable: true,
        rule: Rule::Any,
    }
}

pub static ORDER_PATCH: PatchSchema = PatchSchema {
    table: "orders",
    key: "order_id",
    entity: "Order",
    fields: &[
        checked("customer_id", FieldKind::Int, Rule::Positive),
        checked("order_status", FieldKind::SmallInt, Rule::NonNegative),
        field("order_date", FieldKind::Date),
        field("required_date", FieldKind::Date),
        nullable("shipped_date", FieldKind::Date),
        checked("store_id", FieldKind::Int, Rule::Positive),
        checked("staff_id", FieldKind::Int, Rule::Positive),
        nullable("promo_code", FieldKind::Int),
    ],
};

pub static STORE_PATCH: PatchSchema = PatchSchema {
    table: "stores",
    key: "store_id",
    entity: "Store",
    fields: &[
        checked("store_name", FieldKind::Text, Rule::Name),
        nullable("phone", FieldKind::Text),
        nullable("email", FieldKind::Text),
        nullable("street", FieldKind::Text),
        nullable("city", FieldKind::Text),
        nullable("state", FieldKind::Text),
        nullable("zip_code", FieldKind::Text),
    ],
};

pub static CUSTOMER_PATCH: PatchSchema = PatchSchema {
    table: "customers",
    key: "customer_id",
    entity: "Customer",
    fields: &[
        checked("first_name", FieldKind::Text, Rule::Name),
        checked("last_name", FieldKind::Text, Rule::Name),
        nullable("phone", FieldKind::Text),
        checked("email", FieldKind::Text, Rule::Email),
        nullable("street", FieldKind::Text),
        nullable("city", FieldKind::Text),
        nullable("state", FieldKind::Text),
        nullable("zip_code", FieldKind::Text),
    ],
};

pub static STAFF_PATCH: PatchSchema = PatchSchema {
    table: "staffs",
    key: "staff_id",
    entity: "Staff",
    fields: &[
        checked("first_name", FieldKind::Text, Rule::Name),
        checked("last_name", FieldKind::Text, Rule::Name),
        checked("email", FieldKind::Text, Rule::Email),
        nullable("phone", FieldKind::Text),
        field("active", FieldKind::Bool),
        field("store_id", FieldKind::Int),
        nullable("manager_id", FieldKind::Int),
    ],
};

#[derive(Debug, Clone, PartialEq)]
pub enum PatchValue {
    Int(i32),
    SmallInt(i16),
    Bool(bool),
    Text(String),
    Date(NaiveDate),
    Null(FieldKind),
}

/// A validated partial update: every column is from the schema's allow-list
/// and every value has the column's type. Assignments are kept in schema
/// order.
#[derive(Debug, Clone)]
pub struct PatchSet {
    schema: &'static PatchSchema,
    id: i32,
    assignments: Vec<(&'static str, PatchValue)>,
}

impl PatchSet {
    pub fn build(
        schema: &'static PatchSchema,
        id: i32,
        fields: &Map<String, Value>,
    ) -> Result<Self, DomainError> {
        if fields.is_empty() {
            return Err(DomainError::invalid("patch has no fields"));
        }

        let mut assignments = Vec::with_capacity(fields.len());
        for (name, value) in fields {
            let field = schema.field(name).ok_or_else(|| {
                DomainError::invalid(format!(
                    "field '{name}' cannot be updated on {}",
                    schema.entity
                ))
            })?;
            let value = coerce(field, value)?;
            enforce(field, &value)?;
            assignments.push((field.column, value));
        }
        assignments.sort_by_key(|(column, _)| schema.position(column));

        Ok(Self {
            schema,
            id,
            assignments,
        })
    }

    pub fn schema(&self) -> &'static PatchSchema {
        self.schema
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn assignments(&self) -> &[(&'static str, PatchValue)] {
        &self.assignments
    }

    /// The integer assigned to `column`, if the patch sets one.
    pub fn int(&self, column: &str) -> Option<i32> {
        self.assignments.iter().find_map(|(name, value)| match value {
            PatchValue::Int(n) if *name == column => Some(*n),
            _ => None,
        })
    }
}

fn coerce(field: &PatchField, value: &Value) -> Result<PatchValue, DomainError> {
    let mismatch = |expected: &str| {
        DomainError::invalid(format!(
            "field '{}' expects {expected}, got {value}",
            field.column
        ))
    };

    if value.is_null() {
        return if field.nullable {
            Ok(PatchValue::Null(field.kind))
        } else {
            Err(DomainError::invalid(format!(
                "field '{}' cannot be null",
                field.column
            )))
        };
    }

    match field.kind {
        FieldKind::Int => value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(PatchValue::Int)
            .ok_or_else(|| mismatch("a 32-bit integer")),
        FieldKind::SmallInt => value
            .as_i64()
            .and_then(|n| i16::try_from(n).ok())
            .map(PatchValue::SmallInt)
            .ok_or_else(|| mismatch("a 16-bit integer")),
        FieldKind::Bool => value
            .as_bool()
            .map(PatchValue::Bool)
            .ok_or_else(|| mismatch("a boolean")),
        FieldKind::Text => value
            .as_str()
            .map(|s| PatchValue::Text(s.to_string()))
            .ok_or_else(|| mismatch("a string")),
        FieldKind::Date => value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .map(PatchValue::Date)
            .ok_or_else(|| mismatch("a YYYY-MM-DD date")),
    }
}

fn enforce(field: &PatchField, value: &PatchValue) -> Result<(), DomainError> {
    match (field.rule, value) {
        (Rule::Name, PatchValue::Text(text)) => ensure_name(field.column, text),
        (Rule::Email, PatchValue::Text(text)) => ensure_email(text),
        (Rule::Positive, PatchValue::Int(n)) => ensure_positive(field.column, *n),
        (Rule::NonNegative, PatchValue::SmallInt(n)) => {
            ensure_non_negative(field.column, i32::from(*n))
        }
        _ => Ok(()),
    }
}
