use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{ListQuery, Page};
use crate::domain::party::{Customer, CustomerInput};
use crate::domain::patch::PatchSet;
use crate::domain::ports::CustomerRepository;
use crate::schema::customers;

use super::models::{CustomerChanges, CustomerRow};
use super::patch::execute_patch;

#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ListQuery) -> customers::BoxedQuery<'static, Pg> {
        let mut q = customers::table.into_boxed();
        if let Some(pattern) = query.search_pattern() {
            q = q.filter(
                customers::first_name
                    .ilike(pattern.clone())
                    .or(customers::last_name.ilike(pattern.clone()))
                    .or(customers::email.ilike(pattern)),
            );
        }
        q
    }
}

fn changes(input: &CustomerInput) -> CustomerChanges<'_> {
    CustomerChanges {
        first_name: input.first_name.trim(),
        last_name: input.last_name.trim(),
        phone: input.phone.as_deref(),
        email: input.email.trim(),
        street: input.street.as_deref(),
        city: input.city.as_deref(),
        state: input.state.as_deref(),
        zip_code: input.zip_code.as_deref(),
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn create(&self, input: &CustomerInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(customers::table)
            .values(&changes(input))
            .returning(customers::customer_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }

    fn list(&self, query: &ListQuery) -> Result<Page<Customer>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = Self::filtered(query).count().get_result(conn)?;
            let rows = Self::filtered(query)
                .select(CustomerRow::as_select())
                .order(customers::customer_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(Customer::from).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &CustomerInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(customers::table.find(id))
            .set(&changes(input))
            .execute(&mut conn)?;
        Ok(rows)
    }

    fn patch(&self, patch: &PatchSet) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(execute_patch(&mut conn, patch)?)
    }

    fn delete(&self, id: i32) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::delete(customers::table.find(id)).execute(&mut conn)?)
    }
}
