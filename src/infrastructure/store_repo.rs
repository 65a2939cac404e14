use diesel::pg::Pg;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::page::{ListQuery, Page};
use crate::domain::party::{Store, StoreInput};
use crate::domain::patch::PatchSet;
use crate::domain::ports::StoreRepository;
use crate::schema::stores;

use super::models::{StoreChanges, StoreRow};
use super::patch::execute_patch;

#[derive(Clone)]
pub struct DieselStoreRepository {
    pool: DbPool,
}

impl DieselStoreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn filtered(query: &ListQuery) -> stores::BoxedQuery<'static, Pg> {
        let mut q = stores::table.into_boxed();
        if let Some(pattern) = query.search_pattern() {
            q = q.filter(stores::store_name.ilike(pattern));
        }
        q
    }
}

fn changes(input: &StoreInput) -> StoreChanges<'_> {
    StoreChanges {
        store_name: input.store_name.trim(),
        phone: input.phone.as_deref(),
        email: input.email.as_deref(),
        street: input.street.as_deref(),
        city: input.city.as_deref(),
        state: input.state.as_deref(),
        zip_code: input.zip_code.as_deref(),
    }
}

impl StoreRepository for DieselStoreRepository {
    fn create(&self, input: &StoreInput) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        let id = diesel::insert_into(stores::table)
            .values(&changes(input))
            .returning(stores::store_id)
            .get_result(&mut conn)?;
        Ok(id)
    }

    fn find_by_id(&self, id: i32) -> Result<Option<Store>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = stores::table
            .find(id)
            .select(StoreRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Store::from))
    }

    fn list(&self, query: &ListQuery) -> Result<Page<Store>, DomainError> {
        let mut conn = self.pool.get()?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let count: i64 = Self::filtered(query).count().get_result(conn)?;
            let rows = Self::filtered(query)
                .select(StoreRow::as_select())
                .order(stores::store_id)
                .offset(query.offset)
                .limit(query.limit)
                .load(conn)?;
            Ok(Page {
                count,
                items: rows.into_iter().map(Store::from).collect(),
            })
        })
    }

    fn update(&self, id: i32, input: &StoreInput) -> Result<usize, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::update(stores::table.find(id))
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
        Ok(diesel::delete(stores::table.find(id)).execute(&mut conn)?)
    }
}
